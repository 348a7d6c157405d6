use ndarray::Array2;
use crate::drivers::VizError;
/// Which of the three diagnostic families a figure shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FigureKind {
    TimeDomain,
    Spectrum,
    Spectrogram,
}
impl FigureKind {
    pub fn title(self) -> &'static str {
        match self {
            FigureKind::TimeDomain => "Time Domain Signals for all 6 Sensor Channels",
            FigureKind::Spectrum => "FFT (Magnitude Spectrum) for all 6 Sensor Channels",
            FigureKind::Spectrogram => "Mel Spectrograms for all 6 Sensor Channels",
        }
    }
    pub fn file_stem(self) -> &'static str {
        match self {
            FigureKind::TimeDomain => "time_domain",
            FigureKind::Spectrum => "fft",
            FigureKind::Spectrogram => "mel_spectrogram",
        }
    }
}
#[derive(Clone, Debug, PartialEq)]
pub struct LineTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScale {
    Jet,
}
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapTrace {
    /// Rows follow `y`, columns follow `x`.
    pub z: Array2<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z_min: f64,
    pub z_max: f64,
    pub color_scale: ColorScale,
    pub show_scale: bool,
    pub colorbar_title: String,
}
#[derive(Clone, Debug, PartialEq)]
pub enum PanelContent {
    Line(LineTrace),
    Heatmap(HeatmapTrace),
}
/// One panel as handed to the layout engine, before placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub content: PanelContent,
}
impl PanelSpec {
    pub fn new(title: impl Into<String>, content: PanelContent) -> Self {
        Self {
            title: title.into(),
            x_label: None,
            y_label: None,
            content,
        }
    }
    pub fn with_axis_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = Some(x_label.to_owned());
        self.y_label = Some(y_label.to_owned());
        self
    }
}
/// A placed panel. `row` and `col` are zero-based.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    pub spec: PanelSpec,
}
/// Pixel rectangle inside a figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
/// Fixed subplot grid shared by all figures.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    /// Gap between columns as a fraction of the plotting width.
    pub horizontal_spacing: f64,
    /// Gap between rows as a fraction of the plotting height.
    pub vertical_spacing: f64,
    pub width: u32,
    pub height: u32,
    /// Left, right, top, bottom margins in pixels.
    pub margins: (u32, u32, u32, u32),
}
impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 3,
            horizontal_spacing: 0.08,
            vertical_spacing: 0.1,
            width: 1200,
            height: 800,
            margins: (80, 110, 100, 80),
        }
    }
}
impl GridLayout {
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
    /// Row-major placement: index 0..cols fills the first row, then the next.
    pub fn grid_position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
    /// Pixel area of the panel at (`row`, `col`).
    pub fn panel_rect(&self, row: usize, col: usize) -> PanelRect {
        let (left, right, top, bottom) = self.margins;
        let plot_w = self.width.saturating_sub(left + right) as f64;
        let plot_h = self.height.saturating_sub(top + bottom) as f64;
        let cols = self.cols as f64;
        let rows = self.rows as f64;
        let cell_w = plot_w * (1.0 - self.horizontal_spacing * (cols - 1.0)) / cols;
        let cell_h = plot_h * (1.0 - self.vertical_spacing * (rows - 1.0)) / rows;
        let x = left as f64 + col as f64 * (cell_w + plot_w * self.horizontal_spacing);
        let y = top as f64 + row as f64 * (cell_h + plot_h * self.vertical_spacing);
        PanelRect {
            x: x.round() as u32,
            y: y.round() as u32,
            width: cell_w.round() as u32,
            height: cell_h.round() as u32,
        }
    }
    /// Lay out `specs` in order into a figure.
    pub fn figure(&self, kind: FigureKind, specs: Vec<PanelSpec>) -> Result<Figure, VizError> {
        if specs.len() > self.capacity() {
            return Err(VizError::GridOverflow {
                capacity: self.capacity(),
                actual: specs.len(),
            });
        }
        let panels = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                let (row, col) = self.grid_position(index);
                Panel { row, col, spec }
            })
            .collect();
        Ok(Figure {
            kind,
            title: kind.title().to_owned(),
            layout: self.clone(),
            panels,
        })
    }
}
/// Fully specified figure, ready for a sink. Not retained after display.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: FigureKind,
    pub title: String,
    pub layout: GridLayout,
    pub panels: Vec<Panel>,
}
impl Figure {
    pub fn size(&self) -> (u32, u32) {
        (self.layout.width, self.layout.height)
    }
}
