//! # kinema-scenes
//!
//! The built-in scene catalog: a short explainer program about a small
//! language-model training pipeline, composed from timeline widgets. Each
//! scene is a plain function from a style to a validated [`Scene`].

pub mod conclusion;
pub mod inference;
pub mod intro;
pub mod pipeline;
pub mod tokenizer;
pub mod training;

use kinema_core::{KinemaError, KinemaResult, Style};
use kinema_timeline::{Program, Scene};

/// A scene constructor.
pub type SceneFn = fn(&Style) -> KinemaResult<Scene>;

/// The ordered catalog of built-in scenes.
pub fn catalog() -> Vec<(&'static str, SceneFn)> {
    vec![
        ("intro", intro::build as SceneFn),
        ("pipeline", pipeline::build),
        ("tokenizer", tokenizer::build),
        ("training", training::build),
        ("inference", inference::build),
        ("conclusion", conclusion::build),
    ]
}

/// Build one catalog scene by name.
pub fn build(name: &str, style: &Style) -> KinemaResult<Scene> {
    let constructor = catalog()
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| f)
        .ok_or_else(|| {
            KinemaError::Validation(format!(
                "unknown scene '{}'; run `kinema list` for the catalog",
                name
            ))
        })?;
    constructor(style)
}

/// Build the whole catalog as one program, in catalog order.
pub fn build_all(style: &Style) -> KinemaResult<Program> {
    let mut scenes = Vec::new();
    for (_, constructor) in catalog() {
        scenes.push(constructor(style)?);
    }
    Ok(Program::new(scenes))
}
