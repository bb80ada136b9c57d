//! Inference: a prompt goes into the model, tokens stream out one by one.

use kinema_core::types::{Direction, Easing};
use kinema_core::{Duration, KinemaResult, Point2D, Style};
use kinema_timeline::widgets::{arrow_between, labeled_box, token_chip};
use kinema_timeline::{AnimOp, Directive, Primitive, PrimitiveKind, Scene, Script};

const REPLY: &[&str] = &["Paris", "is", "the", "capital", "."];

pub fn build(style: &Style) -> KinemaResult<Scene> {
    let mut s = Script::new("inference", style).with_title("Talking to the model");

    let heading = Primitive::new(
        "heading",
        PrimitiveKind::Text {
            text: "Inference".into(),
            font_size: style.subheading_size,
        },
    )
    .fill(style.accent);
    let heading_pos = s.to_edge(&heading, Direction::Up, 90.0);
    s.add(heading.at_point(heading_pos))?;

    s.add(
        token_chip(
            "prompt",
            "What is the capital of France?",
            style.positive,
            style.text,
            style.caption_size * 1.4,
        )
        .at(400.0, 460.0),
    )?;

    s.add(
        labeled_box(
            "model",
            "tinychat",
            style.primary,
            style.text,
            320.0,
            160.0,
            style.body_size,
        )
        .at(960.0, 460.0),
    )?;

    let prompt_bounds = s.bounds("prompt")?;
    let model_bounds = s.bounds("model")?;
    s.add(arrow_between(
        "arrow-in",
        &prompt_bounds,
        &model_bounds,
        style.text_dim,
        5.0,
    ))?;

    // One chip per generated token, laid out to the model's right.
    for (i, word) in REPLY.iter().enumerate() {
        s.add(token_chip(
            &format!("out-{}", i),
            word,
            style.secondary,
            style.text,
            style.caption_size * 1.4,
        ))?;
    }
    let out_ids: Vec<String> = (0..REPLY.len()).map(|i| format!("out-{}", i)).collect();
    let out_refs: Vec<&str> = out_ids.iter().map(String::as_str).collect();
    s.arrange(&out_refs, Direction::Right, 24.0, Point2D::new(1480.0, 460.0))?;

    let cache_note = Primitive::new(
        "cache-note",
        PrimitiveKind::Text {
            text: "each step reuses the cached context".into(),
            font_size: style.caption_size * 1.3,
        },
    )
    .at(960.0, 700.0)
    .fill(style.text_muted);
    s.add(cache_note)?;

    s.play_one("heading", AnimOp::Write, Duration::from_seconds(0.9))?;
    s.play(
        vec![
            Directive::new("prompt", AnimOp::FadeIn),
            Directive::new("model", AnimOp::Create).with_easing(Easing::EaseOut),
            Directive::new("arrow-in", AnimOp::FadeIn),
        ],
        Duration::from_seconds(0.9),
    )?;
    s.wait(Duration::from_seconds(0.6))?;

    // Autoregressive loop: the model pulses as each token appears.
    for id in &out_ids {
        s.play(
            vec![
                Directive::new(id.clone(), AnimOp::FadeIn).with_easing(Easing::EaseOut),
                Directive::new("model", AnimOp::SetOpacity(0.7)),
            ],
            Duration::from_seconds(0.3),
        )?;
        s.play_one("model", AnimOp::SetOpacity(1.0), Duration::from_seconds(0.2))?;
    }

    s.play_one("cache-note", AnimOp::FadeIn, Duration::from_seconds(0.6))?;
    s.wait(Duration::from_seconds(2.0))?;
    s.fade_out_all(Duration::from_seconds(0.8))?;
    s.finish()
}
