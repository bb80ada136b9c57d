use std::path::Path;

use rayon::prelude::*;

use kinema_core::hash::{self, ContentHash};
use kinema_core::{FrameBuffer, KinemaResult, RenderSettings, Timestamp};
use kinema_timeline::{sample, Program, Scene};

use crate::raster;
use crate::text::TextRenderer;

/// Frames produced by rendering one scene or one whole program.
pub struct RenderedScene {
    pub frames: Vec<FrameBuffer>,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl RenderedScene {
    /// Content hash over all frames. Equal scene + equal settings implies
    /// equal hash; rendering is deterministic.
    pub fn content_hash(&self) -> ContentHash {
        hash::hash_frames(&self.frames)
    }
}

/// The render pipeline: timeline sampling plus rasterization.
pub struct RenderPipeline {
    text: TextRenderer,
}

impl RenderPipeline {
    /// Create a pipeline. `font_path` overrides system font discovery.
    pub fn new(font_path: Option<&Path>) -> KinemaResult<Self> {
        Ok(Self {
            text: TextRenderer::new(font_path)?,
        })
    }

    /// Render every frame of a scene at the given settings.
    pub fn render_scene(
        &self,
        scene: &Scene,
        settings: &RenderSettings,
    ) -> KinemaResult<RenderedScene> {
        let frame_count = scene.frame_count(settings.fps);
        tracing::info!(
            scene = %scene.id,
            frames = frame_count,
            width = settings.width,
            height = settings.height,
            "rendering scene"
        );

        let frames: Result<Vec<FrameBuffer>, _> = (0..frame_count)
            .into_par_iter()
            .map(|index| self.render_frame(scene, settings, index))
            .collect();

        Ok(RenderedScene {
            frames: frames?,
            width: settings.width,
            height: settings.height,
            fps: settings.fps,
        })
    }

    /// Render a single frame of a scene by frame index.
    pub fn render_frame(
        &self,
        scene: &Scene,
        settings: &RenderSettings,
        index: u64,
    ) -> KinemaResult<FrameBuffer> {
        let t = Timestamp::from_seconds(index as f64 / settings.fps);
        let mut fb = FrameBuffer::solid(settings.width, settings.height, &scene.background);
        let scale = settings.canvas_scale();
        for state in sample(scene, t) {
            raster::draw_state(&mut fb, &state, scale, &self.text)?;
        }
        Ok(fb)
    }

    /// Render a program: each scene in order, frame runs concatenated.
    pub fn render_program(
        &self,
        program: &Program,
        settings: &RenderSettings,
    ) -> KinemaResult<RenderedScene> {
        let mut frames = Vec::new();
        for scene in &program.scenes {
            let rendered = self.render_scene(scene, settings)?;
            frames.extend(rendered.frames);
        }
        Ok(RenderedScene {
            frames,
            width: settings.width,
            height: settings.height,
            fps: settings.fps,
        })
    }
}
