//! # kinema-core
//!
//! Core types for the Kinema motion-graphics engine. This crate contains
//! the foundational types shared across all Kinema crates: colors, geometry,
//! durations, easing functions, frame buffers, render settings, scene style,
//! and the error type.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod math;
pub mod settings;
pub mod style;
pub mod time;
pub mod types;

pub use color::Color;
pub use config::KinemaConfig;
pub use error::{KinemaError, KinemaResult};
pub use frame::{FrameBuffer, PixelFormat};
pub use math::{Point2D, Rect, Size2D};
pub use settings::{Quality, RenderSettings};
pub use style::Style;
pub use time::{Duration, Timestamp};
pub use types::Easing;
