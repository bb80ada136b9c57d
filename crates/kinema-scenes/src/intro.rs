//! Opening title card.

use kinema_core::types::{Direction, Easing};
use kinema_core::{Duration, KinemaResult, Point2D, Style};
use kinema_timeline::{AnimOp, Directive, Primitive, PrimitiveKind, Scene, Script};

pub fn build(style: &Style) -> KinemaResult<Scene> {
    let mut s = Script::new("intro", style).with_title("A tiny chat model, end to end");

    let title = Primitive::new(
        "title",
        PrimitiveKind::Text {
            text: "tinychat".into(),
            font_size: style.heading_size * 1.3,
        },
    )
    .at(960.0, 460.0)
    .fill(style.primary);
    s.add(title)?;

    let subtitle = Primitive::new(
        "subtitle",
        PrimitiveKind::Text {
            text: "a chat model you can train in a weekend".into(),
            font_size: style.subheading_size * 0.75,
        },
    )
    .fill(style.text_muted);
    let subtitle_pos = s.next_to("title", &subtitle, Direction::Down, 40.0)?;
    s.add(subtitle.at_point(subtitle_pos))?;

    let rule = Primitive::new(
        "rule",
        PrimitiveKind::Line {
            end: Point2D::new(480.0, 0.0),
            width: 3.0,
        },
    )
    .at(720.0, 620.0)
    .fill(style.accent);
    s.add(rule)?;

    s.play_one("title", AnimOp::Write, Duration::from_seconds(1.6))?;
    s.wait(Duration::from_seconds(0.4))?;
    s.play(
        vec![
            Directive::new("subtitle", AnimOp::FadeIn).with_easing(Easing::EaseOut),
            Directive::new("rule", AnimOp::Create),
        ],
        Duration::from_seconds(0.8),
    )?;
    s.wait(Duration::from_seconds(2.0))?;

    // Pull the title up and shrink it, the way a header tucks away before
    // the next section.
    s.play(
        vec![
            Directive::new("title", AnimOp::MoveTo(Point2D::new(960.0, 140.0)))
                .with_easing(Easing::EaseInOut),
            Directive::new("title", AnimOp::Scale(0.5)).with_easing(Easing::EaseInOut),
            Directive::new("subtitle", AnimOp::FadeOut),
            Directive::new("rule", AnimOp::FadeOut),
        ],
        Duration::from_seconds(1.0),
    )?;
    s.wait(Duration::from_seconds(0.8))?;
    s.fade_out_all(Duration::from_seconds(0.6))?;

    s.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_builds_and_retires_everything() {
        let scene = build(&Style::chalkboard()).unwrap();
        assert_eq!(scene.id, "intro");
        assert!(scene.duration().as_seconds() > 5.0);
    }
}
