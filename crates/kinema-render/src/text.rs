//! Text rasterization via fontdue.
//!
//! The renderer needs one usable TTF/OTF face. It takes an explicit path
//! from the project config when given one, otherwise it scans the standard
//! system font directories for a common sans-serif face. Shapes render
//! without any font; only scenes containing text require one.

use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};

use kinema_core::{Color, FrameBuffer, KinemaError, KinemaResult, PixelFormat};

const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

const FONT_CANDIDATES: &[&str] = &[
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "FreeSans.ttf",
    "Arial.ttf",
    "arial.ttf",
    "Helvetica.ttc",
];

/// Rasterizes text to frame buffers. Holds at most one loaded face.
#[derive(Debug)]
pub struct TextRenderer {
    font: Option<Font>,
}

impl TextRenderer {
    /// Create a renderer, loading the font at `path` if given, otherwise
    /// probing the system font directories. A renderer without a font is
    /// still usable for scenes that contain no text.
    pub fn new(path: Option<&Path>) -> KinemaResult<Self> {
        let font = match path {
            Some(p) => Some(load_font(p)?),
            None => match find_system_font() {
                Some(p) => {
                    tracing::debug!(font = %p.display(), "using system font");
                    load_font(&p).ok()
                }
                None => None,
            },
        };
        Ok(Self { font })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    fn font(&self) -> KinemaResult<&Font> {
        self.font.as_ref().ok_or_else(|| {
            KinemaError::Render(
                "no usable font found for text rendering; set [fonts].path in kinema.toml"
                    .to_string(),
            )
        })
    }

    /// Rasterize text into a tightly sized RGBA buffer. Supports multi-line
    /// text split on `\n`.
    pub fn render_text(&self, text: &str, px: f32, color: &Color) -> KinemaResult<FrameBuffer> {
        let font = self.font()?;
        if text.is_empty() {
            return Ok(FrameBuffer::new(1, 1, PixelFormat::Rgba8));
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let line_height = (px * 1.2).ceil() as i32;
        let ascent = (px * 0.95).ceil() as i32;

        let widths: Vec<i32> = lines.iter().map(|l| measure_line(font, l, px)).collect();
        let canvas_w = widths.iter().copied().max().unwrap_or(1).max(1) as u32;
        let canvas_h = (line_height * lines.len() as i32).max(1) as u32;

        let mut fb = FrameBuffer::new(canvas_w, canvas_h, PixelFormat::Rgba8);
        let [r, g, b, a] = color.to_rgba8();

        for (line_index, line) in lines.iter().enumerate() {
            let baseline = line_index as i32 * line_height + ascent;
            let mut pen_x = 0.0f32;
            for ch in line.chars() {
                let (metrics, bitmap) = font.rasterize(ch, px);
                let gx = (pen_x + metrics.xmin as f32).round() as i32;
                let gy = baseline - metrics.ymin - metrics.height as i32;
                for (i, coverage) in bitmap.iter().enumerate() {
                    if *coverage == 0 {
                        continue;
                    }
                    let x = gx + (i % metrics.width) as i32;
                    let y = gy + (i / metrics.width) as i32;
                    if x < 0 || y < 0 {
                        continue;
                    }
                    let alpha = (*coverage as u32 * a as u32 / 255) as u8;
                    fb.blend_pixel(x as u32, y as u32, [r, g, b, alpha]);
                }
                pen_x += metrics.advance_width;
            }
        }
        Ok(fb)
    }
}

fn measure_line(font: &Font, line: &str, px: f32) -> i32 {
    let mut width = 0.0f32;
    for ch in line.chars() {
        width += font.metrics(ch, px).advance_width;
    }
    width.ceil() as i32
}

fn load_font(path: &Path) -> KinemaResult<Font> {
    let data = std::fs::read(path)?;
    Font::from_bytes(data, FontSettings::default())
        .map_err(|e| KinemaError::Render(format!("failed to parse font {}: {}", path.display(), e)))
}

fn find_system_font() -> Option<PathBuf> {
    for dir in FONT_DIRS {
        let dir = Path::new(dir);
        if !dir.is_dir() {
            continue;
        }
        for candidate in FONT_CANDIDATES {
            if let Some(found) = find_in_tree(dir, candidate, 0) {
                return Some(found);
            }
        }
    }
    None
}

fn find_in_tree(dir: &Path, name: &str, depth: usize) -> Option<PathBuf> {
    if depth > 3 {
        return None;
    }
    let entries = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path.file_name().map(|f| f == name).unwrap_or(false) {
            return Some(path);
        }
    }
    for sub in subdirs {
        if let Some(found) = find_in_tree(&sub, name, depth + 1) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_path_is_an_error() {
        let err = TextRenderer::new(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(matches!(err, KinemaError::Io(_)));
    }

    #[test]
    fn test_fontless_renderer_errors_on_text_only() {
        let renderer = TextRenderer { font: None };
        assert!(!renderer.has_font());
        let err = renderer.render_text("hi", 32.0, &Color::WHITE).unwrap_err();
        assert!(matches!(err, KinemaError::Render(_)));
    }
}
