//! Tokenization: a sentence splits into token chips, chips become ids.

use kinema_core::types::Direction;
use kinema_core::{Duration, KinemaResult, Point2D, Style};
use kinema_timeline::widgets::token_chip;
use kinema_timeline::{AnimOp, Directive, Primitive, PrimitiveKind, Scene, Script};

const TOKENS: &[(&str, u32)] = &[
    ("The", 464),
    ("quick", 4853),
    ("brown", 14198),
    ("fox", 21831),
];

pub fn build(style: &Style) -> KinemaResult<Scene> {
    let mut s = Script::new("tokenizer", style).with_title("Text becomes tokens");

    let heading = Primitive::new(
        "heading",
        PrimitiveKind::Text {
            text: "Tokenization".into(),
            font_size: style.subheading_size,
        },
    )
    .fill(style.accent);
    let heading_pos = s.to_edge(&heading, Direction::Up, 90.0);
    s.add(heading.at_point(heading_pos))?;

    let sentence = Primitive::new(
        "sentence",
        PrimitiveKind::Text {
            text: "The quick brown fox".into(),
            font_size: style.body_size * 1.4,
        },
    )
    .at(960.0, 380.0)
    .fill(style.text);
    s.add(sentence)?;

    for (word, _) in TOKENS {
        let id = format!("chip-{}", word);
        s.add(token_chip(
            &id,
            word,
            style.primary,
            style.text,
            style.body_size,
        ))?;
    }
    let chip_ids: Vec<String> = TOKENS.iter().map(|(w, _)| format!("chip-{}", w)).collect();
    let chip_refs: Vec<&str> = chip_ids.iter().map(String::as_str).collect();
    s.arrange(&chip_refs, Direction::Right, 40.0, Point2D::new(960.0, 560.0))?;

    s.play_one("heading", AnimOp::Write, Duration::from_seconds(0.9))?;
    s.play_one("sentence", AnimOp::Write, Duration::from_seconds(1.4))?;
    s.wait(Duration::from_seconds(0.8))?;

    // Chips drop out of the sentence one by one.
    for id in &chip_ids {
        s.play_one(id.clone(), AnimOp::FadeIn, Duration::from_seconds(0.35))?;
    }
    s.wait(Duration::from_seconds(1.0))?;

    // Each chip morphs into its vocabulary id.
    let morphs = TOKENS
        .iter()
        .map(|(word, id)| {
            Directive::new(
                format!("chip-{}", word),
                AnimOp::MorphInto(PrimitiveKind::Text {
                    text: id.to_string(),
                    font_size: style.body_size,
                }),
            )
        })
        .collect();
    s.play(morphs, Duration::from_seconds(1.2))?;

    let caption = Primitive::new(
        "caption",
        PrimitiveKind::Text {
            text: "4 words, 4 integers from a 32k vocabulary".into(),
            font_size: style.caption_size * 1.3,
        },
    )
    .at(960.0, 720.0)
    .fill(style.text_muted);
    s.add(caption)?;
    s.play_one("caption", AnimOp::FadeIn, Duration::from_seconds(0.6))?;

    s.wait(Duration::from_seconds(2.0))?;
    s.fade_out_all(Duration::from_seconds(0.8))?;
    s.finish()
}
