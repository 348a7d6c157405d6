use std::fs::{self, File};
use std::io::{ErrorKind, Read, Seek};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use log::{debug, info};
use ndarray_npy::{NpzReader, ReadNpyError, ReadNpzError};
use crate::drivers::{VizConfig, VizError};
use crate::types::{ChannelKey, Recording};
/// Newest file in `dir` whose extension matches `extension` (case-insensitive).
///
/// Equal modification times go to the path that sorts last.
pub fn latest_archive(dir: &Path, extension: &str) -> Result<PathBuf, VizError> {
    let no_input = || VizError::NoInputFound {
        dir: dir.to_path_buf(),
        extension: extension.to_owned(),
    };
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(no_input()),
        Err(source) => {
            return Err(VizError::ArchiveIo {
                path: dir.to_path_buf(),
                source,
            })
        }
    };
    let mut candidates: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        candidates.push((path, modified));
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    debug!("{} .{extension} candidates in {}", candidates.len(), dir.display());
    candidates
        .into_iter()
        .reduce(|best, next| if next.1 >= best.1 { next } else { best })
        .map(|(path, _)| path)
        .ok_or_else(no_input)
}
/// Archive to visualise: the manual override when set, otherwise the newest archive.
///
/// The override is not checked for existence here; a bad path surfaces when it is loaded.
pub fn resolve_archive(config: &VizConfig) -> Result<PathBuf, VizError> {
    if let Some(manual) = config.manual_override() {
        if let Ok(latest) = latest_archive(&config.data_dir, &config.archive_extension) {
            info!("Most recent archive found: {}", latest.display());
        }
        info!("Using manual archive: {}", manual.display());
        return Ok(manual.to_path_buf());
    }
    let latest = latest_archive(&config.data_dir, &config.archive_extension)?;
    info!("Most recent archive found: {}", latest.display());
    info!("Using archive: {}", latest.display());
    Ok(latest)
}
/// Anything that can produce a fresh `Recording` on demand.
pub trait RecordingSource {
    fn load(&self) -> Result<Recording, VizError>;
}
/// numpy `.npz` archive on disk. Every `load` opens, reads and closes the file.
pub struct NpzArchive {
    path: PathBuf,
}
impl NpzArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
impl RecordingSource for NpzArchive {
    fn load(&self) -> Result<Recording, VizError> {
        let file = File::open(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => VizError::ArchiveNotFound {
                path: self.path.clone(),
            },
            _ => VizError::ArchiveIo {
                path: self.path.clone(),
                source,
            },
        })?;
        let mut npz = NpzReader::new(file)?;
        let mut recording = Recording::new(Some(self.path.clone()));
        for name in npz.names()? {
            let key = name.strip_suffix(".npy").unwrap_or(&name);
            let Some(channel) = ChannelKey::from_name(key) else {
                debug!("skipping archive entry {name}");
                continue;
            };
            let values = read_numeric(&mut npz, &name).map_err(|err| {
                VizError::UnsupportedChannel {
                    key: channel.as_str().to_owned(),
                    reason: err.to_string(),
                }
            })?;
            recording.insert(channel.as_str(), values);
        }
        Ok(recording)
    }
}
/// Read a 1-D array of any common numeric dtype as f64.
fn read_numeric<R: Read + Seek>(
    npz: &mut NpzReader<R>,
    name: &str,
) -> Result<Vec<f64>, ReadNpzError> {
    match npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(name) {
        Ok(array) => return Ok(array.to_vec()),
        Err(err) if !is_wrong_dtype(&err) => return Err(err),
        Err(_) => {}
    }
    match npz.by_name::<ndarray::OwnedRepr<f32>, ndarray::Ix1>(name) {
        Ok(array) => return Ok(array.iter().map(|&v| f64::from(v)).collect()),
        Err(err) if !is_wrong_dtype(&err) => return Err(err),
        Err(_) => {}
    }
    match npz.by_name::<ndarray::OwnedRepr<i64>, ndarray::Ix1>(name) {
        Ok(array) => return Ok(array.iter().map(|&v| v as f64).collect()),
        Err(err) if !is_wrong_dtype(&err) => return Err(err),
        Err(_) => {}
    }
    let array = npz.by_name::<ndarray::OwnedRepr<i32>, ndarray::Ix1>(name)?;
    Ok(array.iter().map(|&v| f64::from(v)).collect())
}
fn is_wrong_dtype(err: &ReadNpzError) -> bool {
    matches!(err, ReadNpzError::Npy(ReadNpyError::WrongDescriptor(_)))
}
/// In-memory source useful for tests.
#[cfg(test)]
pub struct ManualSource {
    recording: Recording,
}
#[cfg(test)]
impl ManualSource {
    pub fn new(recording: Recording) -> Self {
        Self { recording }
    }
}
#[cfg(test)]
impl RecordingSource for ManualSource {
    fn load(&self) -> Result<Recording, VizError> {
        Ok(self.recording.clone())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_npy::NpzWriter;
    use std::time::Duration;
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("imuviz-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }
    fn touch(path: &Path, secs: u64) {
        let file = File::create(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }
    #[test]
    fn picks_most_recently_modified_archive() {
        let dir = scratch_dir("latest");
        touch(&dir.join("a.npz"), 1_000);
        touch(&dir.join("b.npz"), 3_000);
        touch(&dir.join("c.NPZ"), 2_000);
        touch(&dir.join("newer.csv"), 9_000);
        assert_eq!(latest_archive(&dir, "npz").unwrap(), dir.join("b.npz"));
        let config = VizConfig::new(&dir, None);
        assert_eq!(resolve_archive(&config).unwrap(), dir.join("b.npz"));
        fs::remove_dir_all(&dir).ok();
    }
    #[test]
    fn equal_mtimes_go_to_the_last_path() {
        let dir = scratch_dir("tie");
        touch(&dir.join("b.npz"), 4_000);
        touch(&dir.join("c.npz"), 4_000);
        touch(&dir.join("a.npz"), 4_000);
        touch(&dir.join("old.npz"), 1_000);
        assert_eq!(latest_archive(&dir, "npz").unwrap(), dir.join("c.npz"));
        fs::remove_dir_all(&dir).ok();
    }
    #[test]
    fn empty_directory_reports_no_input() {
        let dir = scratch_dir("empty");
        touch(&dir.join("notes.txt"), 1_000);
        assert!(matches!(
            latest_archive(&dir, "npz"),
            Err(VizError::NoInputFound { .. })
        ));
        assert!(matches!(
            latest_archive(&dir.join("missing"), "npz"),
            Err(VizError::NoInputFound { .. })
        ));
        fs::remove_dir_all(&dir).ok();
    }
    #[test]
    fn manual_override_wins_regardless_of_directory() {
        let dir = scratch_dir("override");
        touch(&dir.join("latest.npz"), 5_000);
        let manual = PathBuf::from("/nowhere/chosen.npz");
        let config = VizConfig::new(&dir, Some(manual.as_path()));
        assert_eq!(resolve_archive(&config).unwrap(), manual);
        let config = VizConfig::new(dir.join("missing"), Some(manual.as_path()));
        assert_eq!(resolve_archive(&config).unwrap(), manual);
        fs::remove_dir_all(&dir).ok();
    }
    #[test]
    fn loads_channels_of_mixed_dtypes() {
        let dir = scratch_dir("load");
        let path = dir.join("session.npz");
        {
            let mut npz = NpzWriter::new(File::create(&path).unwrap());
            npz.add_array("ax", &array![1.0f64, 2.0, 3.0]).unwrap();
            npz.add_array("ay", &array![1.5f32, -2.5]).unwrap();
            npz.add_array("gz", &array![4i64, 5]).unwrap();
            npz.add_array("label", &array![7i32]).unwrap();
            npz.finish().unwrap();
        }
        let recording = NpzArchive::new(&path).load().unwrap();
        assert_eq!(recording.get("ax"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(recording.get("ay"), Some(&[1.5, -2.5][..]));
        assert_eq!(recording.get("gz"), Some(&[4.0, 5.0][..]));
        assert!(recording.get("label").is_none());
        assert_eq!(recording.origin.as_deref(), Some(path.as_path()));
        fs::remove_dir_all(&dir).ok();
    }
    #[test]
    fn non_numeric_or_2d_channel_is_unsupported() {
        let dir = scratch_dir("unsupported");
        let flat = dir.join("bytes.npz");
        {
            let mut npz = NpzWriter::new(File::create(&flat).unwrap());
            npz.add_array("ax", &array![1u8, 2, 3]).unwrap();
            npz.finish().unwrap();
        }
        assert!(matches!(
            NpzArchive::new(&flat).load(),
            Err(VizError::UnsupportedChannel { ref key, .. }) if key == "ax"
        ));
        let grid = dir.join("grid.npz");
        {
            let mut npz = NpzWriter::new(File::create(&grid).unwrap());
            npz.add_array("gy", &array![[1.0f64, 2.0], [3.0, 4.0]]).unwrap();
            npz.finish().unwrap();
        }
        assert!(matches!(
            NpzArchive::new(&grid).load(),
            Err(VizError::UnsupportedChannel { ref key, .. }) if key == "gy"
        ));
        fs::remove_dir_all(&dir).ok();
    }
    #[test]
    fn missing_archive_is_file_not_found() {
        let archive = NpzArchive::new("/nowhere/missing.npz");
        assert!(matches!(
            archive.load(),
            Err(VizError::ArchiveNotFound { .. })
        ));
    }
}
