//! Training: attention weights light up while the loss walks downhill.

use kinema_core::types::{Direction, Easing};
use kinema_core::{Duration, KinemaResult, Point2D, Style};
use kinema_timeline::widgets::{labeled_box, matrix_grid};
use kinema_timeline::{AnimOp, Directive, Primitive, PrimitiveKind, Scene, Script};

pub fn build(style: &Style) -> KinemaResult<Scene> {
    let mut s = Script::new("training", style).with_title("Pretraining the network");

    let heading = Primitive::new(
        "heading",
        PrimitiveKind::Text {
            text: "Training".into(),
            font_size: style.subheading_size,
        },
    )
    .fill(style.accent);
    let heading_pos = s.to_edge(&heading, Direction::Up, 90.0);
    s.add(heading.at_point(heading_pos))?;

    // Attention-pattern stand-in: a diagonally graded grid.
    s.add(matrix_grid("attention", 6, 6, 52.0, style.secondary, style.surface).at(560.0, 520.0))?;
    let attn_label = Primitive::new(
        "attention-label",
        PrimitiveKind::Text {
            text: "attention weights".into(),
            font_size: style.caption_size * 1.2,
        },
    )
    .fill(style.text_muted);
    let label_pos = s.next_to("attention", &attn_label, Direction::Down, 30.0)?;
    s.add(attn_label.at_point(label_pos))?;

    // Loss curve sketched as three descending segments.
    let loss_points = [
        Point2D::new(1080.0, 420.0),
        Point2D::new(1260.0, 560.0),
        Point2D::new(1450.0, 620.0),
        Point2D::new(1660.0, 650.0),
    ];
    for (i, pair) in loss_points.windows(2).enumerate() {
        s.add(
            Primitive::new(
                format!("loss-{}", i),
                PrimitiveKind::Line {
                    end: pair[1] - pair[0],
                    width: 5.0,
                },
            )
            .at_point(pair[0])
            .fill(style.warning),
        )?;
    }
    let loss_label = Primitive::new(
        "loss-label",
        PrimitiveKind::Text {
            text: "loss".into(),
            font_size: style.caption_size * 1.2,
        },
    )
    .at(1370.0, 720.0)
    .fill(style.text_muted);
    s.add(loss_label)?;

    s.add(labeled_box(
        "stage-tag",
        "one pass over the corpus",
        style.primary,
        style.text,
        560.0,
        90.0,
        style.caption_size * 1.3,
    ).at(1370.0, 300.0))?;

    s.play_one("heading", AnimOp::Write, Duration::from_seconds(0.9))?;

    s.play(
        vec![
            Directive::new("attention", AnimOp::FadeIn).with_easing(Easing::EaseOut),
            Directive::new("attention-label", AnimOp::FadeIn),
        ],
        Duration::from_seconds(0.8),
    )?;

    s.play_one("stage-tag", AnimOp::Create, Duration::from_seconds(0.5))?;

    // The loss reveals segment by segment as training progresses.
    s.play_one("loss-label", AnimOp::FadeIn, Duration::from_seconds(0.4))?;
    for i in 0..loss_points.len() - 1 {
        s.play_one(
            format!("loss-{}", i),
            AnimOp::Create,
            Duration::from_seconds(0.7),
        )?;
    }

    // The grid sharpens: scale up slightly and settle.
    s.play_one("attention", AnimOp::Scale(1.1), Duration::from_seconds(0.6))?;
    s.play_one("attention", AnimOp::Scale(1.0), Duration::from_seconds(0.4))?;
    s.wait(Duration::from_seconds(1.5))?;

    s.fade_out_all(Duration::from_seconds(0.8))?;
    s.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_loss_segments_descend() {
        let scene = build(&Style::chalkboard()).unwrap();
        for i in 0..3 {
            let seg = scene
                .primitive(&format!("loss-{}", i).as_str().into())
                .unwrap();
            let PrimitiveKind::Line { end, .. } = &seg.kind else {
                panic!("expected line");
            };
            assert!(end.y > 0.0, "loss segment {} should descend", i);
        }
    }
}
