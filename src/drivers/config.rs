use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::drivers::VizError;
/// Parameters of the mel spectrogram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MelParams {
    pub n_fft: usize,
    pub hop_length: usize,
    pub n_mels: usize,
    pub fmin_hz: f64,
    /// Upper edge of the mel filterbank; `None` means the Nyquist frequency.
    pub fmax_hz: Option<f64>,
    /// Dynamic range kept below the per-channel peak, in dB.
    pub top_db: Option<f64>,
    /// Power floor applied before taking the logarithm.
    pub amin: f64,
}
impl MelParams {
    pub fn fmax_for(&self, sample_rate_hz: f64) -> f64 {
        self.fmax_hz.unwrap_or(sample_rate_hz / 2.0)
    }
    pub fn validate(&self) -> Result<(), VizError> {
        if self.n_fft == 0 || self.hop_length == 0 || self.n_mels == 0 {
            return Err(VizError::InvalidTransform(format!(
                "n_fft={}, hop_length={}, n_mels={} must all be non-zero",
                self.n_fft, self.hop_length, self.n_mels
            )));
        }
        if self.amin <= 0.0 {
            return Err(VizError::InvalidTransform("amin must be positive".into()));
        }
        Ok(())
    }
}
impl Default for MelParams {
    fn default() -> Self {
        Self {
            n_fft: 2048,
            hop_length: 512,
            n_mels: 128,
            fmin_hz: 0.0,
            fmax_hz: None,
            top_db: Some(80.0),
            amin: 1e-10,
        }
    }
}
/// Everything a run needs, passed explicitly to the selector and the renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VizConfig {
    pub data_dir: PathBuf,
    pub manual_archive: Option<PathBuf>,
    pub archive_extension: String,
    pub sample_rate_hz: f64,
    pub mel: MelParams,
    /// Lower and upper percentile used as the spectrogram colour bounds.
    pub percentiles: (f64, f64),
}
impl VizConfig {
    pub fn new(data_dir: impl Into<PathBuf>, manual_archive: Option<&Path>) -> Self {
        Self {
            data_dir: data_dir.into(),
            manual_archive: manual_archive.map(Path::to_path_buf),
            ..Self::default()
        }
    }
    /// The manual override, if one is set and non-empty.
    pub fn manual_override(&self) -> Option<&Path> {
        self.manual_archive
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
    pub fn validate(&self) -> Result<(), VizError> {
        if !(self.sample_rate_hz > 0.0) {
            return Err(VizError::InvalidSampleRate);
        }
        let (low, high) = self.percentiles;
        if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) || low > high {
            return Err(VizError::InvalidTransform(format!(
                "percentile bounds ({low}, {high}) must satisfy 0 <= low <= high <= 100"
            )));
        }
        self.mel.validate()
    }
}
impl Default for VizConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            manual_archive: None,
            archive_extension: "npz".to_owned(),
            // IMU logger rate.
            sample_rate_hz: 25.0,
            mel: MelParams::default(),
            percentiles: (5.0, 95.0),
        }
    }
}
