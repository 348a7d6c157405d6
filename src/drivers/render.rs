use crate::drivers::layout::{Figure, FigureKind, GridLayout, LineTrace, PanelContent, PanelSpec};
use crate::drivers::{ChannelFrame, VizError};
/// Turns the six extracted channels into one figure.
pub trait Renderer {
    fn kind(&self) -> FigureKind;
    fn render(&self, frame: &ChannelFrame) -> Result<Figure, VizError>;
}
/// Raw amplitude against time, one line per panel.
pub struct TimeDomainRenderer {
    layout: GridLayout,
}
impl TimeDomainRenderer {
    pub fn new(layout: GridLayout) -> Self {
        Self { layout }
    }
}
/// Sample index divided by the sampling rate, in seconds.
pub fn time_axis(len: usize, sample_rate_hz: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 / sample_rate_hz).collect()
}
impl Renderer for TimeDomainRenderer {
    fn kind(&self) -> FigureKind {
        FigureKind::TimeDomain
    }
    fn render(&self, frame: &ChannelFrame) -> Result<Figure, VizError> {
        let specs = frame
            .channels
            .iter()
            .map(|(key, samples)| {
                let trace = LineTrace {
                    x: time_axis(samples.len(), frame.sample_rate_hz),
                    y: samples.clone(),
                };
                PanelSpec::new(key.as_str(), PanelContent::Line(trace))
                    .with_axis_labels("Time (sec)", "Amplitude")
            })
            .collect();
        self.layout.figure(self.kind(), specs)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Recording;
    #[test]
    fn ten_seconds_at_25hz_ends_at_9_96() {
        let frame = ChannelFrame::extract(&Recording::uniform(vec![0.0; 250]), 25.0).unwrap();
        let figure = TimeDomainRenderer::new(GridLayout::default())
            .render(&frame)
            .unwrap();
        assert_eq!(figure.panels.len(), 6);
        for panel in &figure.panels {
            let PanelContent::Line(trace) = &panel.spec.content else {
                panic!("time-domain panels are lines");
            };
            assert_eq!(trace.x.len(), 250);
            assert_eq!(trace.x[0], 0.0);
            assert!((trace.x[249] - 9.96).abs() < 1e-12);
            assert!(trace.x.windows(2).all(|w| ((w[1] - w[0]) - 0.04).abs() < 1e-12));
            assert_eq!(panel.spec.x_label.as_deref(), Some("Time (sec)"));
            assert_eq!(panel.spec.y_label.as_deref(), Some("Amplitude"));
        }
    }
}
