//! Pure timeline evaluation.
//!
//! [`sample`] computes the visual state of every primitive at a timestamp
//! as a pure function of (scene, time). Completed batches contribute their
//! final state, the batch containing the timestamp interpolates with its
//! directives' easings, and later batches contribute nothing. Sampling the
//! same scene at the same timestamp always yields the same states, which is
//! what makes rendering idempotent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::animation::AnimOp;
use crate::primitive::{Primitive, PrimitiveId, PrimitiveKind};
use crate::scene::Scene;
use crate::timeline::Entry;
use kinema_core::{Color, Point2D, Timestamp};

/// The sampled state of one primitive at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub id: PrimitiveId,
    pub kind: PrimitiveKind,
    pub position: Point2D,
    pub fill: Color,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
    pub scale: f64,
    /// Fraction of a text primitive's characters revealed (write-on).
    pub text_progress: f64,
}

#[derive(Debug, Clone)]
struct Accum {
    visible: bool,
    kind: PrimitiveKind,
    position: Point2D,
    opacity: f64,
    scale: f64,
    text_progress: f64,
}

impl Accum {
    fn from_primitive(p: &Primitive) -> Self {
        Self {
            visible: false,
            kind: p.kind.clone(),
            position: p.position,
            // Invisible until an introducing op runs; the primitive's own
            // opacity is the fade-in target.
            opacity: 0.0,
            scale: p.scale,
            text_progress: 1.0,
        }
    }
}

/// Sample the visual state of all primitives live at timestamp `t`.
/// States are returned in declaration (paint) order.
pub fn sample(scene: &Scene, t: Timestamp) -> Vec<VisualState> {
    let mut states: HashMap<&str, Accum> = scene
        .primitives
        .iter()
        .map(|p| (p.id.as_str(), Accum::from_primitive(p)))
        .collect();
    let base: HashMap<&str, &Primitive> = scene
        .primitives
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();

    let mut clock = 0.0;
    for entry in &scene.timeline.entries {
        let duration = entry.duration().as_seconds();
        let end = clock + duration;

        if let Entry::Play(batch) = entry {
            if t.as_seconds() >= end {
                // Completed batch: apply final states.
                for directive in &batch.directives {
                    let (Some(accum), Some(target)) = (
                        states.get_mut(directive.target.as_str()),
                        base.get(directive.target.as_str()).copied(),
                    ) else {
                        continue;
                    };
                    apply(&directive.op, 1.0, accum, target);
                }
            } else if t.as_seconds() >= clock {
                // Active batch: all directives share the batch window.
                let raw = if duration > 0.0 {
                    (t.as_seconds() - clock) / duration
                } else {
                    1.0
                };
                for directive in &batch.directives {
                    let (Some(accum), Some(target)) = (
                        states.get_mut(directive.target.as_str()),
                        base.get(directive.target.as_str()).copied(),
                    ) else {
                        continue;
                    };
                    apply(&directive.op, directive.easing.apply(raw), accum, target);
                }
            }
        }

        if t.as_seconds() < end {
            break;
        }
        clock = end;
    }

    scene
        .primitives
        .iter()
        .filter_map(|p| {
            let accum = &states[p.id.as_str()];
            if !accum.visible {
                return None;
            }
            Some(VisualState {
                id: p.id.clone(),
                kind: accum.kind.clone(),
                position: accum.position,
                fill: p.fill,
                stroke: p.stroke,
                stroke_width: p.stroke_width,
                opacity: accum.opacity.clamp(0.0, 1.0),
                scale: accum.scale,
                text_progress: accum.text_progress,
            })
        })
        .collect()
}

/// Apply one operation at eased progress `u` in [0, 1]. Operations are
/// start/end interpolations: `u = 1` is the idempotent final state.
fn apply(op: &AnimOp, u: f64, accum: &mut Accum, base: &Primitive) {
    match op {
        AnimOp::Create => {
            accum.visible = true;
            accum.opacity = base.opacity * u;
            accum.scale = base.scale * u;
        }
        AnimOp::FadeIn => {
            accum.visible = true;
            accum.opacity = base.opacity * u;
        }
        AnimOp::Write => {
            accum.visible = true;
            accum.opacity = base.opacity;
            accum.text_progress = u;
        }
        AnimOp::FadeOut => {
            accum.opacity *= 1.0 - u;
            if u >= 1.0 {
                accum.visible = false;
            }
        }
        AnimOp::MoveTo(p) => {
            accum.position = accum.position.lerp(p, u);
        }
        AnimOp::MoveBy(dp) => {
            accum.position = accum.position.offset(dp.x * u, dp.y * u);
        }
        AnimOp::Scale(s) => {
            accum.scale += (s - accum.scale) * u;
        }
        AnimOp::SetOpacity(o) => {
            accum.opacity += (o - accum.opacity) * u;
        }
        AnimOp::MorphInto(kind) => {
            if u >= 1.0 {
                accum.kind = kind.clone();
            } else if u < 0.5 {
                accum.opacity *= 1.0 - 2.0 * u;
            } else {
                accum.kind = kind.clone();
                accum.opacity *= 2.0 * u - 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Directive;
    use crate::script::Script;
    use kinema_core::types::Easing;
    use kinema_core::{Duration, Style};

    fn secs(s: f64) -> Duration {
        Duration::from_seconds(s)
    }

    fn at(s: f64) -> Timestamp {
        Timestamp::from_seconds(s)
    }

    fn rect(id: &str) -> Primitive {
        Primitive::new(
            id,
            PrimitiveKind::Rect {
                width: 100.0,
                height: 50.0,
                corner_radius: 0.0,
            },
        )
    }

    fn fade_cycle() -> Scene {
        let style = Style::chalkboard();
        let mut script = Script::new("s", &style);
        script.add(rect("box").at(500.0, 500.0)).unwrap();
        script
            .play(
                vec![Directive::new("box", AnimOp::FadeIn).with_easing(Easing::Linear)],
                secs(1.0),
            )
            .unwrap();
        script.wait(secs(1.0)).unwrap();
        script
            .play(
                vec![Directive::new("box", AnimOp::FadeOut).with_easing(Easing::Linear)],
                secs(1.0),
            )
            .unwrap();
        script.finish().unwrap()
    }

    #[test]
    fn test_invisible_before_introduction() {
        let scene = fade_cycle();
        // At t=0 the fade-in has started (visible, opacity 0).
        let states = sample(&scene, at(0.0));
        assert_eq!(states.len(), 1);
        assert!(states[0].opacity.abs() < 0.001);
    }

    #[test]
    fn test_fade_in_midpoint() {
        let scene = fade_cycle();
        let states = sample(&scene, at(0.5));
        assert!((states[0].opacity - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_fully_visible_during_wait() {
        let scene = fade_cycle();
        let states = sample(&scene, at(1.5));
        assert!((states[0].opacity - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_gone_after_fade_out() {
        let scene = fade_cycle();
        let states = sample(&scene, at(2.5));
        assert!((states[0].opacity - 0.5).abs() < 0.01);
        // Past the end of the timeline the primitive is retired.
        let states = sample(&scene, at(3.0));
        assert!(states.is_empty());
    }

    #[test]
    fn test_sampling_is_pure() {
        let scene = fade_cycle();
        assert_eq!(sample(&scene, at(1.25)), sample(&scene, at(1.25)));
    }

    #[test]
    fn test_move_to_interpolates() {
        let style = Style::chalkboard();
        let mut script = Script::new("s", &style);
        script.add(rect("box").at(0.0, 0.0)).unwrap();
        script.play_one("box", AnimOp::FadeIn, secs(0.0)).unwrap();
        script
            .play(
                vec![Directive::new("box", AnimOp::MoveTo(Point2D::new(100.0, 0.0)))
                    .with_easing(Easing::Linear)],
                secs(1.0),
            )
            .unwrap();
        script.fade_out_all(secs(0.1)).unwrap();
        let scene = script.finish().unwrap();

        let states = sample(&scene, at(0.5));
        assert!((states[0].position.x - 50.0).abs() < 0.01);
        let states = sample(&scene, at(1.0));
        assert!((states[0].position.x - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_duration_batch_applies_instantly() {
        let style = Style::chalkboard();
        let mut script = Script::new("s", &style);
        script.add(rect("box")).unwrap();
        script.play_one("box", AnimOp::FadeIn, secs(0.0)).unwrap();
        script.wait(secs(1.0)).unwrap();
        script.fade_out_all(secs(0.1)).unwrap();
        let scene = script.finish().unwrap();

        let states = sample(&scene, at(0.0));
        assert_eq!(states.len(), 1);
        assert!((states[0].opacity - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_morph_crossfades_and_swaps_kind() {
        let style = Style::chalkboard();
        let mut script = Script::new("s", &style);
        script.add(rect("box")).unwrap();
        script.play_one("box", AnimOp::FadeIn, secs(0.0)).unwrap();
        let circle = PrimitiveKind::Circle { radius: 40.0 };
        script
            .play(
                vec![Directive::new("box", AnimOp::MorphInto(circle.clone()))
                    .with_easing(Easing::Linear)],
                secs(1.0),
            )
            .unwrap();
        script.fade_out_all(secs(0.1)).unwrap();
        let scene = script.finish().unwrap();

        // First half: still a rect, fading out.
        let states = sample(&scene, at(0.25));
        assert!(matches!(states[0].kind, PrimitiveKind::Rect { .. }));
        assert!((states[0].opacity - 0.5).abs() < 0.01);

        // Second half: circle fading in.
        let states = sample(&scene, at(0.75));
        assert!(matches!(states[0].kind, PrimitiveKind::Circle { .. }));
        assert!((states[0].opacity - 0.5).abs() < 0.01);

        // Completed: circle at full opacity.
        let states = sample(&scene, at(1.05));
        assert_eq!(states[0].kind, circle);
        assert!((states[0].opacity - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_write_reveals_text() {
        let style = Style::chalkboard();
        let mut script = Script::new("s", &style);
        script
            .add(Primitive::new(
                "t",
                PrimitiveKind::Text {
                    text: "tokenize".into(),
                    font_size: 40.0,
                },
            ))
            .unwrap();
        script
            .play(
                vec![Directive::new("t", AnimOp::Write).with_easing(Easing::Linear)],
                secs(1.0),
            )
            .unwrap();
        script.fade_out_all(secs(0.1)).unwrap();
        let scene = script.finish().unwrap();

        let states = sample(&scene, at(0.5));
        assert!((states[0].text_progress - 0.5).abs() < 0.01);
        assert!((states[0].opacity - 1.0).abs() < 0.001);
    }
}
