use serde::{Deserialize, Serialize};

use crate::primitive::{Primitive, PrimitiveId};
use crate::timeline::Timeline;
use kinema_core::settings::{CANVAS_HEIGHT, CANVAS_WIDTH};
use kinema_core::{Color, Duration, Size2D, Timestamp};

/// A self-contained unit of narrative content with its own primitive
/// lifecycle. Scenes own their primitives; nothing persists across scenes.
///
/// Scenes are produced by [`Script::finish`] and are immutable afterwards.
///
/// [`Script::finish`]: crate::script::Script::finish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub background: Color,
    /// Authoring viewport the scene's coordinates are expressed against.
    pub viewport: Size2D,
    /// All primitives the scene declares, in declaration (paint) order.
    pub primitives: Vec<Primitive>,
    pub timeline: Timeline,
}

impl Scene {
    pub fn duration(&self) -> Duration {
        self.timeline.duration()
    }

    pub fn frame_count(&self, fps: f64) -> u64 {
        self.duration().frame_count(fps)
    }

    pub fn primitive(&self, id: &PrimitiveId) -> Option<&Primitive> {
        self.primitives.iter().find(|p| &p.id == id)
    }
}

/// Default authoring viewport.
pub fn default_viewport() -> Size2D {
    Size2D::new(CANVAS_WIDTH, CANVAS_HEIGHT)
}

/// An ordered sequence of scenes played back to back. Concatenation
/// preserves each scene's internal ordering; a scene's primitives are never
/// visible outside its own time range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    pub scenes: Vec<Scene>,
}

impl Program {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    pub fn total_duration(&self) -> Duration {
        self.scenes
            .iter()
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }

    /// Resolve a program timestamp to the scene containing it and the local
    /// timestamp within that scene. Returns None past the end of the program.
    pub fn scene_at(&self, t: Timestamp) -> Option<(&Scene, Timestamp)> {
        let mut start = 0.0;
        for scene in &self.scenes {
            let end = start + scene.duration().as_seconds();
            if t.as_seconds() < end {
                return Some((scene, Timestamp::from_seconds(t.as_seconds() - start)));
            }
            start = end;
        }
        None
    }
}
