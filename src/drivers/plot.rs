use std::fs;
use std::io::Cursor;
use std::path::Path;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::drivers::error::VizError;
use crate::drivers::layout::{ColorScale, Figure, HeatmapTrace, LineTrace, Panel, PanelContent};
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const TEXT_COLOR: RGBColor = RGBColor(42, 63, 95);
const GRID_COLOR: RGBColor = RGBColor(229, 236, 246);
/// Jet stops as (position, colour).
const JET: [(f64, (u8, u8, u8)); 6] = [
    (0.0, (0, 0, 131)),
    (0.125, (0, 60, 170)),
    (0.375, (5, 255, 255)),
    (0.625, (255, 255, 0)),
    (0.875, (250, 0, 0)),
    (1.0, (128, 0, 0)),
];
/// Rasterise a figure into a packed RGB buffer of `width * height * 3` bytes.
pub fn render_figure_rgb(figure: &Figure) -> Result<Vec<u8>, VizError> {
    let (width, height) = figure.size();
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        root.draw(&Text::new(
            figure.title.clone(),
            (figure.layout.margins.0 as i32, 30),
            ("sans-serif", 22).into_font().color(&TEXT_COLOR),
        ))?;
        for panel in &figure.panels {
            let rect = figure.layout.panel_rect(panel.row, panel.col);
            let area = root.clone().shrink((rect.x, rect.y), (rect.width, rect.height));
            match &panel.spec.content {
                PanelContent::Line(trace) => draw_line_panel(&area, panel, trace)?,
                PanelContent::Heatmap(heatmap) => draw_heatmap_panel(&area, panel, heatmap)?,
            }
        }
        if let Some(heatmap) = figure.panels.iter().find_map(|p| match &p.spec.content {
            PanelContent::Heatmap(h) if h.show_scale => Some(h),
            _ => None,
        }) {
            let (_, right, top, bottom) = figure.layout.margins;
            let bar_area = root.clone().shrink(
                (width.saturating_sub(right) + 20, top),
                (right.saturating_sub(30), height.saturating_sub(top + bottom)),
            );
            draw_colorbar(&bar_area, heatmap)?;
        }
        root.present()?;
    }
    Ok(buffer)
}
fn draw_line_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel: &Panel,
    trace: &LineTrace,
) -> Result<(), VizError> {
    let (x_min, x_max) = padded_range(&trace.x);
    let (y_min, y_max) = padded_range(&trace.y);
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.spec.title, ("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .margin(4)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc(panel.spec.x_label.clone().unwrap_or_default())
        .y_desc(panel.spec.y_label.clone().unwrap_or_default())
        .light_line_style(&GRID_COLOR)
        .label_style(("sans-serif", 11).into_font().color(&TEXT_COLOR))
        .x_labels(6)
        .y_labels(5)
        .draw()?;
    chart.draw_series(LineSeries::new(
        trace.x.iter().copied().zip(trace.y.iter().copied()),
        &LINE_COLOR,
    ))?;
    Ok(())
}
fn draw_heatmap_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel: &Panel,
    heatmap: &HeatmapTrace,
) -> Result<(), VizError> {
    let x_edges = cell_edges(&heatmap.x);
    let y_edges = cell_edges(&heatmap.y);
    let x_range = edge_range(&x_edges);
    let y_range = edge_range(&y_edges);
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.spec.title, ("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .margin(4)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(("sans-serif", 11).into_font().color(&TEXT_COLOR))
        .x_labels(5)
        .y_labels(5)
        .draw()?;
    let (rows, cols) = heatmap.z.dim();
    let cells = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c)));
    chart.draw_series(cells.map(|(r, c)| {
        let t = normalize(heatmap.z[[r, c]], heatmap.z_min, heatmap.z_max);
        Rectangle::new(
            [(x_edges[c], y_edges[r]), (x_edges[c + 1], y_edges[r + 1])],
            color_at(heatmap.color_scale, t).filled(),
        )
    }))?;
    Ok(())
}
fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, Shift>,
    heatmap: &HeatmapTrace,
) -> Result<(), VizError> {
    let (z_min, z_max) = if heatmap.z_max > heatmap.z_min {
        (heatmap.z_min, heatmap.z_max)
    } else {
        (heatmap.z_min - 1.0, heatmap.z_min + 1.0)
    };
    let mut chart = ChartBuilder::on(area)
        .caption(
            &heatmap.colorbar_title,
            ("sans-serif", 12).into_font().color(&TEXT_COLOR),
        )
        .margin(2)
        .y_label_area_size(0)
        .right_y_label_area_size(40)
        .build_cartesian_2d(0f64..1f64, z_min..z_max)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .label_style(("sans-serif", 10).into_font().color(&TEXT_COLOR))
        .draw()?;
    const STEPS: usize = 64;
    let step = (z_max - z_min) / STEPS as f64;
    chart.draw_series((0..STEPS).map(|i| {
        let lo = z_min + step * i as f64;
        let t = (i as f64 + 0.5) / STEPS as f64;
        Rectangle::new(
            [(0.0, lo), (1.0, lo + step)],
            color_at(heatmap.color_scale, t).filled(),
        )
    }))?;
    Ok(())
}
/// Position of `value` inside `[lo, hi]`, clamped to `[0, 1]`.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}
pub fn color_at(scale: ColorScale, t: f64) -> RGBColor {
    let stops = match scale {
        ColorScale::Jet => &JET,
    };
    let t = t.clamp(0.0, 1.0);
    for pair in stops.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
            let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
            return RGBColor(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2));
        }
    }
    let (_, last) = stops[stops.len() - 1];
    RGBColor(last.0, last.1, last.2)
}
/// Cell boundaries around centre coordinates: midpoints inside, mirrored at the ends.
pub fn cell_edges(centres: &[f64]) -> Vec<f64> {
    match centres {
        [] => vec![0.0, 1.0],
        [only] => vec![only - 0.5, only + 0.5],
        _ => {
            let n = centres.len();
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centres[0] - (centres[1] - centres[0]) / 2.0);
            edges.extend(centres.windows(2).map(|w| (w[0] + w[1]) / 2.0));
            edges.push(centres[n - 1] + (centres[n - 1] - centres[n - 2]) / 2.0);
            edges
        }
    }
}
fn edge_range(edges: &[f64]) -> (f64, f64) {
    let lo = edges.first().copied().unwrap_or(0.0);
    let hi = edges.last().copied().unwrap_or(1.0);
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, lo + 0.5)
    }
}
fn padded_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}
pub fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, VizError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| VizError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
/// Encode `buffer` and write it to `path`.
pub fn save_png(path: &Path, buffer: &[u8], width: u32, height: u32) -> Result<(), VizError> {
    let png = encode_png(buffer, width, height)?;
    fs::write(path, png).map_err(|source| VizError::ExportIo {
        path: path.to_path_buf(),
        source,
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn jet_endpoints_and_midpoint() {
        assert_eq!(color_at(ColorScale::Jet, 0.0), RGBColor(0, 0, 131));
        assert_eq!(color_at(ColorScale::Jet, 1.0), RGBColor(128, 0, 0));
        assert_eq!(color_at(ColorScale::Jet, 0.5), RGBColor(130, 255, 128));
        assert_eq!(color_at(ColorScale::Jet, -3.0), color_at(ColorScale::Jet, 0.0));
    }
    #[test]
    fn values_outside_the_bounds_saturate() {
        assert_eq!(normalize(-90.0, -60.0, -10.0), 0.0);
        assert_eq!(normalize(0.0, -60.0, -10.0), 1.0);
        assert_eq!(normalize(-35.0, -60.0, -10.0), 0.5);
        assert_eq!(normalize(3.0, 0.0, 0.0), 0.5);
    }
    #[test]
    fn edges_bracket_each_centre() {
        assert_eq!(cell_edges(&[0.0, 1.0, 2.0]), vec![-0.5, 0.5, 1.5, 2.5]);
        assert_eq!(cell_edges(&[4.0]), vec![3.5, 4.5]);
        assert_eq!(cell_edges(&[]).len(), 1 + 0 + 1);
    }
    #[test]
    fn save_into_missing_directory_is_a_write_error() {
        let path = std::env::temp_dir()
            .join(format!("imuviz-{}-no-such-dir", std::process::id()))
            .join("figure.png");
        let err = save_png(&path, &vec![0u8; 2 * 2 * 3], 2, 2).unwrap_err();
        assert!(matches!(err, VizError::ExportIo { path: ref p, .. } if p == &path));
        assert!(err.to_string().starts_with("failed to write"));
    }
    #[test]
    fn png_encoding_of_a_blank_buffer() {
        let png = encode_png(&vec![255u8; 4 * 3 * 3], 4, 3).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
