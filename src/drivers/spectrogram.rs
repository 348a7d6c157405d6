use log::debug;
use ndarray::Array2;
use crate::drivers::config::MelParams;
use crate::drivers::fft::SpectralTransform;
use crate::drivers::layout::{
    ColorScale, Figure, FigureKind, GridLayout, HeatmapTrace, PanelContent, PanelSpec,
};
use crate::drivers::mel;
use crate::drivers::render::Renderer;
use crate::drivers::{ChannelFrame, VizError};
/// Log-power mel spectrogram of one channel plus its axes and colour bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelSpectrogram {
    /// Decibels relative to this channel's peak, shaped `(n_mels, frames)`.
    pub db: Array2<f64>,
    pub times_s: Vec<f64>,
    pub mel_hz: Vec<f64>,
    pub z_min: f64,
    pub z_max: f64,
}
/// Six mel spectrograms. Each channel is referenced to its own peak and gets its
/// own percentile colour bounds, so intensities are not comparable across panels.
pub struct SpectrogramRenderer<T: SpectralTransform> {
    transform: T,
    layout: GridLayout,
    params: MelParams,
    percentiles: (f64, f64),
}
impl<T: SpectralTransform> SpectrogramRenderer<T> {
    pub fn new(transform: T, layout: GridLayout, params: MelParams, percentiles: (f64, f64)) -> Self {
        Self {
            transform,
            layout,
            params,
            percentiles,
        }
    }
    pub fn compute(&self, samples: &[f64], sample_rate_hz: f64) -> ChannelSpectrogram {
        let power = self
            .transform
            .mel_power(samples, sample_rate_hz, &self.params);
        let db = mel::power_to_db(&power, self.params.amin, self.params.top_db);
        let (n_mels, frames) = db.dim();
        let times_s = mel::frames_to_time(frames, self.params.hop_length, sample_rate_hz);
        let mel_hz = mel::mel_frequencies(
            n_mels,
            self.params.fmin_hz,
            self.params.fmax_for(sample_rate_hz),
        );
        let mut values: Vec<f64> = db.iter().copied().collect();
        values.sort_by(f64::total_cmp);
        let z_min = percentile(&values, self.percentiles.0).unwrap_or(0.0);
        let z_max = percentile(&values, self.percentiles.1).unwrap_or(0.0);
        ChannelSpectrogram {
            db,
            times_s,
            mel_hz,
            z_min,
            z_max,
        }
    }
}
/// Linear-interpolated percentile of already sorted values.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (pct / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
impl<T: SpectralTransform> Renderer for SpectrogramRenderer<T> {
    fn kind(&self) -> FigureKind {
        FigureKind::Spectrogram
    }
    fn render(&self, frame: &ChannelFrame) -> Result<Figure, VizError> {
        let mut specs = Vec::with_capacity(frame.channels.len());
        for (index, (key, samples)) in frame.channels.iter().enumerate() {
            let spec = self.compute(samples, frame.sample_rate_hz);
            debug!(
                "{key}: mel grid {:?}, colour bounds [{:.2}, {:.2}] dB",
                spec.db.dim(),
                spec.z_min,
                spec.z_max
            );
            let heatmap = HeatmapTrace {
                z: spec.db,
                x: spec.times_s,
                y: spec.mel_hz,
                z_min: spec.z_min,
                z_max: spec.z_max,
                color_scale: ColorScale::Jet,
                // One legend for the whole grid.
                show_scale: index == 0,
                colorbar_title: "Intensity [dB]".to_owned(),
            };
            specs.push(PanelSpec::new(key.as_str(), PanelContent::Heatmap(heatmap)));
        }
        self.layout.figure(self.kind(), specs)
    }
}
