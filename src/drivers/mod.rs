// src/drivers/mod.rs
pub mod channels;
pub mod config;
pub mod error;
pub mod fft;
pub mod layout;
pub mod mel;
pub mod pipeline;
pub mod plot;
pub mod render;
pub mod sink;
pub mod source;
pub mod spectrogram;
pub mod spectrum;
pub use channels::ChannelFrame;
pub use config::VizConfig;
pub use error::VizError;
pub use layout::Figure;
pub use pipeline::VizPipeline;
pub use plot::{render_figure_rgb, save_png};
pub use sink::FigureSink;
pub use source::{resolve_archive, NpzArchive};
