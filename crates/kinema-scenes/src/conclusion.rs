//! Closing card: recap and sign-off.

use kinema_core::types::Easing;
use kinema_core::{Duration, KinemaResult, Style};
use kinema_timeline::{AnimOp, Directive, Primitive, PrimitiveKind, Scene, Script};

const TAKEAWAYS: &[&str] = &[
    "tokenize: text to integers",
    "train: predict the next token",
    "chat: sample, append, repeat",
];

pub fn build(style: &Style) -> KinemaResult<Scene> {
    let mut s = Script::new("conclusion", style).with_title("That's the whole loop");

    let heading = Primitive::new(
        "heading",
        PrimitiveKind::Text {
            text: "That's the whole loop".into(),
            font_size: style.heading_size,
        },
    )
    .at(960.0, 300.0)
    .fill(style.primary);
    s.add(heading)?;

    for (i, line) in TAKEAWAYS.iter().enumerate() {
        s.add(
            Primitive::new(
                format!("takeaway-{}", i),
                PrimitiveKind::Text {
                    text: (*line).into(),
                    font_size: style.body_size,
                },
            )
            .at(960.0, 470.0 + i as f64 * 70.0)
            .fill(style.text),
        )?;
    }

    let signoff = Primitive::new(
        "signoff",
        PrimitiveKind::Text {
            text: "go train one yourself".into(),
            font_size: style.subheading_size * 0.8,
        },
    )
    .at(960.0, 800.0)
    .fill(style.accent);
    s.add(signoff)?;

    s.play_one("heading", AnimOp::Write, Duration::from_seconds(1.4))?;
    s.wait(Duration::from_seconds(0.5))?;

    for i in 0..TAKEAWAYS.len() {
        s.play_one(
            format!("takeaway-{}", i),
            AnimOp::FadeIn,
            Duration::from_seconds(0.5),
        )?;
        s.wait(Duration::from_seconds(0.3))?;
    }

    s.play(
        vec![Directive::new("signoff", AnimOp::FadeIn).with_easing(Easing::CubicOut)],
        Duration::from_seconds(0.8),
    )?;
    s.wait(Duration::from_seconds(2.5))?;
    s.fade_out_all(Duration::from_seconds(1.0))?;
    s.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conclusion_ends_clean() {
        let scene = build(&Style::chalkboard()).unwrap();
        // Last timeline entry retires everything at once.
        assert!(scene.duration().as_seconds() > 6.0);
    }
}
