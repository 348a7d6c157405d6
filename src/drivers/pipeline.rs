use log::{debug, info};
use crate::drivers::config::VizConfig;
use crate::drivers::error::VizError;
use crate::drivers::fft::RustFftTransform;
use crate::drivers::layout::{Figure, GridLayout};
use crate::drivers::render::{Renderer, TimeDomainRenderer};
use crate::drivers::sink::FigureSink;
use crate::drivers::source::RecordingSource;
use crate::drivers::spectrogram::SpectrogramRenderer;
use crate::drivers::spectrum::SpectrumRenderer;
use crate::drivers::ChannelFrame;
/// Source -> extractor -> renderers -> sink, once per run.
pub struct VizPipeline<S: RecordingSource> {
    source: S,
    config: VizConfig,
    renderers: Vec<Box<dyn Renderer>>,
}
impl<S: RecordingSource> VizPipeline<S> {
    /// Spectrogram, FFT and time-domain renderers, shown in that order.
    pub fn new(source: S, config: VizConfig) -> Result<Self, VizError> {
        config.validate()?;
        let layout = GridLayout::default();
        let renderers: Vec<Box<dyn Renderer>> = vec![
            Box::new(SpectrogramRenderer::new(
                RustFftTransform,
                layout.clone(),
                config.mel.clone(),
                config.percentiles,
            )),
            Box::new(SpectrumRenderer::new(RustFftTransform, layout.clone())),
            Box::new(TimeDomainRenderer::new(layout)),
        ];
        Ok(Self {
            source,
            config,
            renderers,
        })
    }
    /// Reload the recording, extract its channels and build one figure.
    pub fn build_figure(&self, renderer: &dyn Renderer) -> Result<Figure, VizError> {
        let recording = self.source.load()?;
        if let Some(origin) = &recording.origin {
            debug!("loaded {}", origin.display());
        }
        let frame = ChannelFrame::extract(&recording, self.config.sample_rate_hz)?;
        info!(
            "building {:?} figure ({:.2} s of data)",
            renderer.kind(),
            frame.duration_seconds()
        );
        renderer.render(&frame)
    }
    /// Build every figure, then hand them to `sink`. Nothing is shown if any build fails.
    pub fn run(&self, sink: &mut dyn FigureSink) -> Result<(), VizError> {
        let figures = self
            .renderers
            .iter()
            .map(|renderer| self.build_figure(renderer.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        for figure in &figures {
            info!("showing \"{}\"", figure.title);
            sink.show(figure)?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::layout::{FigureKind, PanelContent};
    use crate::drivers::plot::{encode_png, render_figure_rgb};
    use crate::drivers::sink::CollectingSink;
    use crate::drivers::source::ManualSource;
    use crate::types::Recording;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    fn pipeline(recording: Recording) -> VizPipeline<ManualSource> {
        VizPipeline::new(ManualSource::new(recording), VizConfig::default()).unwrap()
    }
    #[test]
    fn zero_recording_yields_three_figures_in_display_order() {
        let mut sink = CollectingSink::default();
        pipeline(Recording::uniform(vec![0.0; 250]))
            .run(&mut sink)
            .unwrap();
        let kinds: Vec<FigureKind> = sink.figures.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FigureKind::Spectrogram,
                FigureKind::Spectrum,
                FigureKind::TimeDomain
            ]
        );
        for figure in &sink.figures {
            assert_eq!(figure.panels.len(), 6);
            assert_eq!(figure.size(), (1200, 800));
        }
        let PanelContent::Line(time) = &sink.figures[2].panels[5].spec.content else {
            panic!("time-domain panels are lines");
        };
        assert!((time.x[249] - 9.96).abs() < 1e-12);
    }
    #[test]
    fn missing_channel_aborts_before_anything_is_shown() {
        let mut recording = Recording::uniform(vec![0.0; 250]);
        recording.arrays.remove("gz");
        let mut sink = CollectingSink::default();
        let err = pipeline(recording).run(&mut sink).unwrap_err();
        assert!(matches!(err, VizError::MissingChannel(ref key) if key == "gz"));
        assert!(sink.figures.is_empty());
    }
    #[test]
    fn repeated_runs_are_identical() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples: Vec<f64> = (0..700).map(|_| rng.gen_range(-9.81..9.81)).collect();
        let pipeline = pipeline(Recording::uniform(samples));
        let mut first = CollectingSink::default();
        let mut second = CollectingSink::default();
        pipeline.run(&mut first).unwrap();
        pipeline.run(&mut second).unwrap();
        assert_eq!(first.figures, second.figures);
    }
    #[test]
    fn every_figure_rasterises_to_png() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise: Vec<f64> = (0..301).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let recordings = [
            Recording::uniform(vec![0.0; 250]),
            Recording::uniform(noise),
            Recording::uniform(vec![0.5]),
            Recording::uniform(Vec::new()),
        ];
        for recording in recordings {
            let mut sink = CollectingSink::default();
            pipeline(recording).run(&mut sink).unwrap();
            assert_eq!(sink.figures.len(), 3);
            for figure in &sink.figures {
                let (width, height) = figure.size();
                let rgb = render_figure_rgb(figure).unwrap();
                assert_eq!(rgb.len(), (width * height * 3) as usize);
                assert!(rgb.iter().any(|&b| b != 255), "{:?} is blank", figure.kind);
                let png = encode_png(&rgb, width, height).unwrap();
                assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
            }
        }
    }
    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = VizConfig::default();
        config.sample_rate_hz = -25.0;
        assert!(matches!(
            VizPipeline::new(ManualSource::new(Recording::default()), config),
            Err(VizError::InvalidSampleRate)
        ));
    }
}
