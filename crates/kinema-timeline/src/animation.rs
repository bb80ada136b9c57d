use serde::{Deserialize, Serialize};

use crate::primitive::{PrimitiveId, PrimitiveKind};
use kinema_core::types::Easing;
use kinema_core::{Duration, Point2D};

/// An animation operation: an idempotent description of a start/end state
/// interpolation applied to one primitive over one batch window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimOp {
    /// Introduce the primitive by scaling it up from zero while fading in.
    Create,
    /// Introduce the primitive by fading it in.
    FadeIn,
    /// Introduce a text primitive by revealing its characters left to right.
    Write,
    /// Retire the primitive by fading it out. After the batch ends the
    /// primitive is no longer live.
    FadeOut,
    /// Move the primitive's position to an absolute point.
    MoveTo(Point2D),
    /// Move the primitive's position by a relative offset.
    MoveBy(Point2D),
    /// Interpolate the primitive's scale factor to the given value.
    Scale(f64),
    /// Interpolate the primitive's opacity to the given value.
    SetOpacity(f64),
    /// Crossfade the primitive into a different kind: the old content fades
    /// out over the first half of the batch, the new content fades in over
    /// the second half.
    MorphInto(PrimitiveKind),
}

impl AnimOp {
    /// Whether this operation introduces its target into the live set.
    pub fn introduces(&self) -> bool {
        matches!(self, AnimOp::Create | AnimOp::FadeIn | AnimOp::Write)
    }

    /// Whether this operation retires its target from the live set.
    pub fn retires(&self) -> bool {
        matches!(self, AnimOp::FadeOut)
    }

    /// Short operation name for logs and `inspect` output.
    pub fn name(&self) -> &'static str {
        match self {
            AnimOp::Create => "create",
            AnimOp::FadeIn => "fade_in",
            AnimOp::Write => "write",
            AnimOp::FadeOut => "fade_out",
            AnimOp::MoveTo(_) => "move_to",
            AnimOp::MoveBy(_) => "move_by",
            AnimOp::Scale(_) => "scale",
            AnimOp::SetOpacity(_) => "set_opacity",
            AnimOp::MorphInto(_) => "morph_into",
        }
    }
}

/// One (primitive, operation, easing) entry inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub target: PrimitiveId,
    pub op: AnimOp,
    pub easing: Easing,
}

impl Directive {
    pub fn new(target: impl Into<String>, op: AnimOp) -> Self {
        Self {
            target: PrimitiveId::new(target),
            op,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// A set of directives that play concurrently: every operation in a batch
/// begins and ends together over the shared duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub directives: Vec<Directive>,
    pub duration: Duration,
}

impl Batch {
    pub fn new(directives: Vec<Directive>, duration: Duration) -> Self {
        Self {
            directives,
            duration,
        }
    }

    /// Whether the batch animates the given primitive.
    pub fn targets(&self, id: &PrimitiveId) -> bool {
        self.directives.iter().any(|d| &d.target == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_lifecycle_classification() {
        assert!(AnimOp::FadeIn.introduces());
        assert!(AnimOp::Write.introduces());
        assert!(!AnimOp::FadeIn.retires());
        assert!(AnimOp::FadeOut.retires());
        assert!(!AnimOp::MoveTo(Point2D::zero()).introduces());
        assert!(!AnimOp::Scale(2.0).retires());
    }

    #[test]
    fn test_batch_targets() {
        let batch = Batch::new(
            vec![
                Directive::new("a", AnimOp::FadeIn),
                Directive::new("b", AnimOp::FadeIn),
            ],
            Duration::from_seconds(0.5),
        );
        assert!(batch.targets(&PrimitiveId::new("a")));
        assert!(!batch.targets(&PrimitiveId::new("c")));
    }
}
