use log::{debug, warn};
use crate::drivers::VizError;
use crate::types::{ChannelKey, Recording};
/// The six IMU channels of one recording, in canonical grid order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelFrame {
    pub sample_rate_hz: f64,
    pub channels: Vec<(ChannelKey, Vec<f64>)>,
}
impl ChannelFrame {
    /// Pull `ax, ay, az, gx, gy, gz` out of a recording. Fails on the first absent key.
    pub fn extract(recording: &Recording, sample_rate_hz: f64) -> Result<Self, VizError> {
        if !(sample_rate_hz > 0.0) {
            return Err(VizError::InvalidSampleRate);
        }
        let mut channels = Vec::with_capacity(ChannelKey::ALL.len());
        for key in ChannelKey::ALL {
            let samples = recording
                .get(key.as_str())
                .ok_or_else(|| VizError::MissingChannel(key.as_str().to_owned()))?;
            debug!("channel {key}: {} samples", samples.len());
            channels.push((key, samples.to_vec()));
        }
        let frame = Self {
            sample_rate_hz,
            channels,
        };
        if !frame.equal_lengths() {
            warn!("channel lengths differ within one recording");
        }
        Ok(frame)
    }
    pub fn duration_seconds(&self) -> f64 {
        self.channels
            .first()
            .map(|(_, c)| c.len() as f64 / self.sample_rate_hz)
            .unwrap_or(0.0)
    }
    fn equal_lengths(&self) -> bool {
        let mut lengths = self.channels.iter().map(|(_, c)| c.len());
        match lengths.next() {
            Some(first) => lengths.all(|len| len == first),
            None => true,
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn labelled_recording() -> Recording {
        let mut recording = Recording::new(None);
        // Insert out of order; extraction must still follow the canonical order.
        for (idx, name) in ["gz", "ax", "gy", "extra", "az", "gx", "ay"].iter().enumerate() {
            recording.insert(*name, vec![idx as f64; 4]);
        }
        recording
    }
    #[test]
    fn extracts_six_channels_in_canonical_order() {
        let frame = ChannelFrame::extract(&labelled_recording(), 25.0).unwrap();
        assert_eq!(frame.channels.len(), 6);
        let keys: Vec<&str> = frame.channels.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["ax", "ay", "az", "gx", "gy", "gz"]);
        // "ax" was inserted second.
        assert_eq!(frame.channels[0].1, vec![1.0; 4]);
        assert_eq!(frame.duration_seconds(), 4.0 / 25.0);
    }
    #[test]
    fn missing_gz_fails() {
        let mut recording = labelled_recording();
        recording.arrays.remove("gz");
        match ChannelFrame::extract(&recording, 25.0) {
            Err(VizError::MissingChannel(key)) => assert_eq!(key, "gz"),
            other => panic!("expected MissingChannel, got {other:?}"),
        }
    }
    #[test]
    fn rejects_non_positive_rate() {
        assert!(matches!(
            ChannelFrame::extract(&labelled_recording(), 0.0),
            Err(VizError::InvalidSampleRate)
        ));
    }
}
