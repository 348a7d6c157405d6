// src/viewer.rs
use std::path::PathBuf;

use eframe::egui;
use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use log::{info, warn};

use crate::drivers::{render_figure_rgb, save_png, Figure, FigureSink, VizError};

/// Opens one native window per figure and blocks until it is closed.
pub struct WindowSink {
    // where "Save PNG" writes
    save_dir: PathBuf,
    // archive stem, used as the file name prefix
    label: String,
}

impl WindowSink {
    pub fn new(save_dir: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self { save_dir: save_dir.into(), label: label.into() }
    }
}

impl FigureSink for WindowSink {
    fn show(&mut self, figure: &Figure) -> Result<(), VizError> {
        let (width, height) = figure.size();
        let rgb = render_figure_rgb(figure)?;
        let save_path = self
            .save_dir
            .join(format!("{}_{}.png", self.label, figure.kind.file_stem()));
        let app = FigureWindow {
            image: ColorImage::from_rgb([width as usize, height as usize], &rgb),
            rgb,
            size: (width, height),
            texture: None,
            save_path,
            status: String::new(),
        };
        let viewport = egui::ViewportBuilder::default()
            .with_inner_size([width as f32 + 16.0, height as f32 + 48.0])
            .with_title(figure.title.clone());
        let options = eframe::NativeOptions {
            viewport,
            ..Default::default()
        };
        eframe::run_native(&figure.title, options, Box::new(move |_cc| Box::new(app)))
            .map_err(|err| VizError::Display(err.to_string()))
    }
}

struct FigureWindow {
    image: ColorImage,
    rgb: Vec<u8>,
    size: (u32, u32),
    texture: Option<TextureHandle>,
    save_path: PathBuf,
    status: String,
}

impl FigureWindow {
    fn save(&mut self) {
        let result = save_png(&self.save_path, &self.rgb, self.size.0, self.size.1);
        self.status = match result {
            Ok(()) => {
                info!("figure saved to {}", self.save_path.display());
                format!("Saved {}", self.save_path.display())
            }
            Err(err) => {
                warn!("could not save figure: {err}");
                format!("Save failed: {err}")
            }
        };
    }
}

impl eframe::App for FigureWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let image = &self.image;
        let texture = self
            .texture
            .get_or_insert_with(|| ctx.load_texture("figure", image.clone(), TextureOptions::LINEAR))
            .clone();

        let mut save_clicked = false;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                save_clicked = ui.button("💾 Save PNG").clicked();
                if !self.status.is_empty() {
                    ui.colored_label(Color32::GRAY, &self.status);
                }
            });
        });
        if save_clicked {
            self.save();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                ui.add(egui::Image::new(egui::load::SizedTexture::from_handle(&texture)));
            });
        });
    }
}
