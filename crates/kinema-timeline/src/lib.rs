//! # kinema-timeline
//!
//! The Kinema sequencing core: a queryable, deterministic description of a
//! scene as an ordered list of animation batches over visual primitives.
//!
//! Scenes are authored through the [`Script`] builder, which registers
//! primitives as they are introduced, answers layout queries against the
//! live set, and fails fast on authoring errors (unknown targets, empty
//! batches, bad durations, leaked primitives). A finished [`Scene`] is
//! immutable; [`sample`] evaluates the visual state at any timestamp as a
//! pure function.

pub mod animation;
pub mod layout;
pub mod primitive;
pub mod registry;
pub mod sample;
pub mod scene;
pub mod script;
pub mod timeline;
pub mod validate;
pub mod widgets;

pub use animation::{AnimOp, Batch, Directive};
pub use primitive::{Primitive, PrimitiveId, PrimitiveKind};
pub use registry::Registry;
pub use sample::{sample, VisualState};
pub use scene::{Program, Scene};
pub use script::Script;
pub use timeline::{Entry, Timeline};
