use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum VizError {
    #[error("no .{extension} archives found in {}", dir.display())]
    NoInputFound { dir: PathBuf, extension: String },
    #[error("archive not found: {}", path.display())]
    ArchiveNotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    ArchiveIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed archive: {0}")]
    ArchiveFormat(String),
    #[error("channel `{key}` is not a 1-D numeric array: {reason}")]
    UnsupportedChannel { key: String, reason: String },
    #[error("recording is missing channel `{0}`")]
    MissingChannel(String),
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("invalid transform parameters: {0}")]
    InvalidTransform(String),
    #[error("grid holds {capacity} panels, got {actual}")]
    GridOverflow { capacity: usize, actual: usize },
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("display failed: {0}")]
    Display(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for VizError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        VizError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for VizError {
    fn from(value: image::ImageError) -> Self {
        VizError::Plot(value.to_string())
    }
}
impl From<ndarray_npy::ReadNpzError> for VizError {
    fn from(value: ndarray_npy::ReadNpzError) -> Self {
        VizError::ArchiveFormat(value.to_string())
    }
}
