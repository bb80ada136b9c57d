/// Core error types for the Kinema engine.

/// A specialized Result type for Kinema operations.
pub type KinemaResult<T> = Result<T, KinemaError>;

/// Top-level error type covering all Kinema subsystems.
///
/// Script construction errors (unknown primitive, empty batch, bad duration,
/// leaked primitives) are authoring bugs and surface before any frame is
/// rendered, so a broken scene never emits a partial video.
#[derive(Debug, thiserror::Error)]
pub enum KinemaError {
    #[error("script error in scene '{scene}': {message}")]
    Script { scene: String, message: String },

    #[error("unknown primitive '{id}' in scene '{scene}'")]
    UnknownPrimitive { scene: String, id: String },

    #[error("animation targets primitive '{id}' before it is created in scene '{scene}'")]
    NotYetCreated { scene: String, id: String },

    #[error("animation targets primitive '{id}' after it was retired in scene '{scene}'")]
    AlreadyRetired { scene: String, id: String },

    #[error("empty animation batch at entry {entry} in scene '{scene}'")]
    EmptyBatch { scene: String, entry: usize },

    #[error("invalid duration {seconds} at entry {entry} in scene '{scene}'")]
    InvalidDuration {
        scene: String,
        entry: usize,
        seconds: f64,
    },

    #[error("scene '{scene}' leaks primitives still live at scene end: {ids:?}")]
    LeakedPrimitives { scene: String, ids: Vec<String> },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl KinemaError {
    /// Create a script error for a scene.
    pub fn script(scene: impl Into<String>, message: impl Into<String>) -> Self {
        KinemaError::Script {
            scene: scene.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_error_display() {
        let err = KinemaError::script("intro", "title never faded out");
        assert_eq!(
            err.to_string(),
            "script error in scene 'intro': title never faded out"
        );
    }

    #[test]
    fn test_leak_error_display() {
        let err = KinemaError::LeakedPrimitives {
            scene: "tokenizer".into(),
            ids: vec!["chip-3".into()],
        };
        assert!(err.to_string().contains("chip-3"));
    }
}
