//! Training pipeline overview: four stages connected by arrows.

use kinema_core::types::Direction;
use kinema_core::{Duration, KinemaResult, Point2D, Style};
use kinema_timeline::widgets::{arrow_between, labeled_box};
use kinema_timeline::{AnimOp, Directive, Primitive, PrimitiveKind, Scene, Script};

const STAGES: &[(&str, &str)] = &[
    ("stage-data", "Data"),
    ("stage-tokenize", "Tokenize"),
    ("stage-train", "Train"),
    ("stage-chat", "Chat"),
];

pub fn build(style: &Style) -> KinemaResult<Scene> {
    let mut s = Script::new("pipeline", style).with_title("The pipeline at a glance");

    let heading = Primitive::new(
        "heading",
        PrimitiveKind::Text {
            text: "From raw text to a chat model".into(),
            font_size: style.subheading_size,
        },
    )
    .fill(style.accent);
    let heading_pos = s.to_edge(&heading, Direction::Up, 90.0);
    s.add(heading.at_point(heading_pos))?;

    let colors = [style.primary, style.secondary, style.warning, style.positive];
    for ((id, label), color) in STAGES.iter().zip(colors) {
        s.add(labeled_box(
            id,
            label,
            color,
            style.text,
            300.0,
            130.0,
            style.body_size,
        ))?;
    }

    let ids: Vec<&str> = STAGES.iter().map(|(id, _)| *id).collect();
    s.arrange(&ids, Direction::Right, 110.0, Point2D::new(960.0, 540.0))?;

    // Arrows connect the facing edges of neighboring stages.
    for window in STAGES.windows(2) {
        let from = s.bounds(window[0].0)?;
        let to = s.bounds(window[1].0)?;
        let arrow_id = format!("arrow-{}", window[0].0);
        s.add(arrow_between(&arrow_id, &from, &to, style.text_dim, 5.0))?;
    }

    s.play_one("heading", AnimOp::Write, Duration::from_seconds(1.0))?;

    // Stages pop in one at a time, each pulling its arrow along.
    for (i, (id, _)) in STAGES.iter().enumerate() {
        let mut directives = vec![Directive::new(*id, AnimOp::Create)];
        if i > 0 {
            let arrow_id = format!("arrow-{}", STAGES[i - 1].0);
            directives.push(Directive::new(arrow_id, AnimOp::FadeIn));
        }
        s.play(directives, Duration::from_seconds(0.6))?;
    }

    s.wait(Duration::from_seconds(2.5))?;

    // Spotlight the training stage before closing.
    s.play_one("stage-train", AnimOp::Scale(1.15), Duration::from_seconds(0.5))?;
    s.wait(Duration::from_seconds(1.2))?;
    s.play_one("stage-train", AnimOp::Scale(1.0), Duration::from_seconds(0.4))?;
    s.wait(Duration::from_seconds(0.5))?;

    s.fade_out_all(Duration::from_seconds(0.8))?;
    s.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stage_spacing() {
        let scene = build(&Style::chalkboard()).unwrap();
        let first = scene
            .primitive(&"stage-data".into())
            .unwrap();
        let last = scene
            .primitive(&"stage-chat".into())
            .unwrap();
        assert!(last.position.x > first.position.x);
        // The row is centered on the canvas midline.
        assert!((first.position.x + last.position.x - 1920.0).abs() < 0.001);
    }
}
