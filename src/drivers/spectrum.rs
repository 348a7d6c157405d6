use log::debug;
use crate::drivers::fft::SpectralTransform;
use crate::drivers::layout::{Figure, FigureKind, GridLayout, LineTrace, PanelContent, PanelSpec};
use crate::drivers::render::Renderer;
use crate::drivers::{ChannelFrame, VizError};
/// Full-length FFT magnitude over the non-negative frequencies.
///
/// No window, no normalisation, no averaging.
pub struct SpectrumRenderer<T: SpectralTransform> {
    transform: T,
    layout: GridLayout,
}
impl<T: SpectralTransform> SpectrumRenderer<T> {
    pub fn new(transform: T, layout: GridLayout) -> Self {
        Self { transform, layout }
    }
}
impl<T: SpectralTransform> Renderer for SpectrumRenderer<T> {
    fn kind(&self) -> FigureKind {
        FigureKind::Spectrum
    }
    fn render(&self, frame: &ChannelFrame) -> Result<Figure, VizError> {
        let specs = frame
            .channels
            .iter()
            .map(|(key, samples)| {
                let spectrum = self
                    .transform
                    .magnitude_spectrum(samples, frame.sample_rate_hz);
                debug!(
                    "{key}: {} bins, peak at {:.2} Hz",
                    spectrum.magnitudes.len(),
                    spectrum.peak_frequency().unwrap_or(0.0)
                );
                let trace = LineTrace {
                    x: spectrum.frequencies_hz,
                    y: spectrum.magnitudes,
                };
                PanelSpec::new(key.as_str(), PanelContent::Line(trace))
                    .with_axis_labels("Frequency (Hz)", "Magnitude")
            })
            .collect();
        self.layout.figure(self.kind(), specs)
    }
}
