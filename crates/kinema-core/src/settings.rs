use serde::{Deserialize, Serialize};

use crate::Color;

/// Output quality tier selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 854x480 at 15 fps. Fast iteration while authoring.
    Low,
    /// 1280x720 at 30 fps.
    #[default]
    Medium,
    /// 1920x1080 at 60 fps. Final output.
    High,
}

impl Quality {
    pub fn settings(&self) -> RenderSettings {
        match self {
            Quality::Low => RenderSettings::low_480p15(),
            Quality::Medium => RenderSettings::medium_720p30(),
            Quality::High => RenderSettings::high_1080p60(),
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "l" => Ok(Quality::Low),
            "medium" | "m" => Ok(Quality::Medium),
            "high" | "h" => Ok(Quality::High),
            other => Err(format!(
                "unknown quality '{}': expected low, medium, or high",
                other
            )),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Low => write!(f, "low"),
            Quality::Medium => write!(f, "medium"),
            Quality::High => write!(f, "high"),
        }
    }
}

/// Concrete render settings: resolution, frame rate, and background color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub background: Color,
}

impl RenderSettings {
    pub fn low_480p15() -> Self {
        Self::custom(854, 480, 15.0)
    }

    pub fn medium_720p30() -> Self {
        Self::custom(1280, 720, 30.0)
    }

    pub fn high_1080p60() -> Self {
        Self::custom(1920, 1080, 60.0)
    }

    pub fn custom(width: u32, height: u32, fps: f64) -> Self {
        Self {
            width,
            height,
            fps,
            background: Color::BLACK,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Scale factor from authoring coordinates (a fixed 1920x1080 canvas)
    /// to this output resolution. Scenes are authored once and rendered at
    /// any tier.
    pub fn canvas_scale(&self) -> f64 {
        self.width as f64 / CANVAS_WIDTH
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::medium_720p30()
    }
}

/// Authoring canvas dimensions. Scene coordinates are expressed against
/// this logical viewport regardless of the output tier.
pub const CANVAS_WIDTH: f64 = 1920.0;
pub const CANVAS_HEIGHT: f64 = 1080.0;
