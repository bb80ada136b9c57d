use serde::{Deserialize, Serialize};

use kinema_core::{Color, Point2D, Rect, Size2D};

/// Unique identifier for a primitive within one scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveId(pub String);

impl PrimitiveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PrimitiveId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The visual content of a primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// A text label. `font_size` is in authoring-canvas pixels.
    Text { text: String, font_size: f64 },
    /// An axis-aligned rectangle, optionally with rounded corners.
    Rect {
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    /// A circle.
    Circle { radius: f64 },
    /// A straight line segment from the primitive position to `end`.
    Line { end: Point2D, width: f64 },
    /// An arrow from the primitive position to `end` with a filled head.
    Arrow { end: Point2D, width: f64 },
    /// A group owning child primitives. Children are positioned relative
    /// to the group origin and share the group's opacity and scale.
    Group { children: Vec<Primitive> },
}

/// A visual primitive: content plus static attributes. `position` is the
/// center for text/rect/circle/group, and the start point for line/arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub id: PrimitiveId,
    pub kind: PrimitiveKind,
    pub position: Point2D,
    pub fill: Color,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl Primitive {
    pub fn new(id: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            id: PrimitiveId::new(id),
            kind,
            position: Point2D::zero(),
            fill: Color::WHITE,
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point2D::new(x, y);
        self
    }

    pub fn at_point(mut self, p: Point2D) -> Self {
        self.position = p;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Intrinsic size of the primitive at scale 1.0, before placement.
    pub fn intrinsic_size(&self) -> Size2D {
        match &self.kind {
            PrimitiveKind::Text { text, font_size } => measure_text(text, *font_size),
            PrimitiveKind::Rect { width, height, .. } => Size2D::new(*width, *height),
            PrimitiveKind::Circle { radius } => Size2D::new(radius * 2.0, radius * 2.0),
            PrimitiveKind::Line { end, width } | PrimitiveKind::Arrow { end, width } => {
                Size2D::new(end.x.abs().max(*width), end.y.abs().max(*width))
            }
            PrimitiveKind::Group { children } => {
                let mut bounds: Option<Rect> = None;
                for child in children {
                    let b = child.bounds();
                    bounds = Some(match bounds {
                        Some(acc) => acc.union(&b),
                        None => b,
                    });
                }
                bounds
                    .map(|b| Size2D::new(b.width, b.height))
                    .unwrap_or_default()
            }
        }
    }

    /// Bounding box of the primitive as currently placed, used by layout
    /// queries. Lines and arrows are bounded by their endpoints.
    pub fn bounds(&self) -> Rect {
        match &self.kind {
            PrimitiveKind::Line { end, .. } | PrimitiveKind::Arrow { end, .. } => {
                let x0 = self.position.x.min(self.position.x + end.x);
                let y0 = self.position.y.min(self.position.y + end.y);
                Rect::new(x0, y0, end.x.abs(), end.y.abs())
            }
            PrimitiveKind::Group { children } => {
                let mut bounds: Option<Rect> = None;
                for child in children {
                    let mut b = child.bounds();
                    b.x += self.position.x;
                    b.y += self.position.y;
                    bounds = Some(match bounds {
                        Some(acc) => acc.union(&b),
                        None => b,
                    });
                }
                bounds.unwrap_or(Rect::new(self.position.x, self.position.y, 0.0, 0.0))
            }
            _ => {
                let size = self.intrinsic_size();
                Rect::centered_at(self.position, size)
            }
        }
    }
}

/// Deterministic text measurement at the IR level. Real glyph metrics are a
/// rasterization concern; layout only needs a stable estimate.
pub fn measure_text(text: &str, font_size: f64) -> Size2D {
    let lines: Vec<&str> = text.split('\n').collect();
    let max_chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = max_chars as f64 * font_size * 0.55;
    let height = lines.len() as f64 * font_size * 1.2;
    Size2D::new(width, height)
}
