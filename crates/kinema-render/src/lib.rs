//! # kinema-render
//!
//! The Kinema rendering engine: samples a scene's timeline at frame
//! timestamps and rasterizes the resulting visual states into raw RGBA
//! frame buffers. CPU only; frames within a scene render in parallel.

pub mod pipeline;
pub mod raster;
pub mod text;

pub use pipeline::{RenderPipeline, RenderedScene};
pub use text::TextRenderer;
