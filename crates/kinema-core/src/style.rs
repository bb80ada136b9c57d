use serde::{Deserialize, Serialize};

use crate::Color;

/// Immutable visual style shared by the scenes of one program.
///
/// Passed into scene construction explicitly; there is no ambient global
/// styling state. Two programs can render side by side with different
/// palettes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub background: Color,
    pub surface: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub positive: Color,
    pub warning: Color,
    pub negative: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,
    pub heading_size: f64,
    pub subheading_size: f64,
    pub body_size: f64,
    pub caption_size: f64,
}

impl Style {
    /// The default dark-slate palette used by the built-in scenes.
    pub fn chalkboard() -> Self {
        let hex = |s| Color::from_hex(s).unwrap_or(Color::WHITE);
        Self {
            background: hex("#0f172a"),
            surface: hex("#334155"),
            primary: hex("#3b82f6"),
            secondary: hex("#8b5cf6"),
            accent: hex("#06b6d4"),
            positive: hex("#10b981"),
            warning: hex("#f59e0b"),
            negative: hex("#ef4444"),
            text: hex("#f8fafc"),
            text_muted: hex("#94a3b8"),
            text_dim: hex("#64748b"),
            heading_size: 72.0,
            subheading_size: 48.0,
            body_size: 32.0,
            caption_size: 22.0,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::chalkboard()
    }
}
