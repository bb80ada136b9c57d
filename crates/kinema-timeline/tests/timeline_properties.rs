//! End-to-end properties of scene scripts and programs.

use kinema_core::types::Direction;
use kinema_core::{Duration, Point2D, Style, Timestamp};
use kinema_timeline::{
    sample, widgets, AnimOp, Directive, Entry, Primitive, PrimitiveKind, Program, Script,
};

fn secs(s: f64) -> Duration {
    Duration::from_seconds(s)
}

fn title(id: &str, text: &str, style: &Style) -> Primitive {
    Primitive::new(
        id,
        PrimitiveKind::Text {
            text: text.into(),
            font_size: style.heading_size,
        },
    )
    .fill(style.text)
}

/// Build a small but realistic scene: title written on, three chips
/// arranged and faded in, everything faded out at the end.
fn chips_scene(style: &Style) -> kinema_timeline::Scene {
    let mut script = Script::new("chips", style).with_title("Tokens");

    let mut t = title("title", "Tokens", style);
    t.position = script.to_edge(&t, Direction::Up, 60.0);
    script.add(t).unwrap();

    for (i, word) in ["Hello", ",", " world"].iter().enumerate() {
        script
            .add(widgets::token_chip(
                &format!("chip-{}", i),
                word,
                style.primary,
                style.text,
                36.0,
            ))
            .unwrap();
    }
    script
        .arrange(
            &["chip-0", "chip-1", "chip-2"],
            Direction::Right,
            30.0,
            Point2D::new(960.0, 540.0),
        )
        .unwrap();

    script.play_one("title", AnimOp::Write, secs(0.8)).unwrap();
    script
        .play(
            vec![
                Directive::new("chip-0", AnimOp::FadeIn),
                Directive::new("chip-1", AnimOp::FadeIn),
                Directive::new("chip-2", AnimOp::FadeIn),
            ],
            secs(0.6),
        )
        .unwrap();
    script.wait(secs(1.0)).unwrap();
    script.fade_out_all(secs(0.5)).unwrap();
    script.finish().unwrap()
}

#[test]
fn no_scene_leaks_primitives() {
    // finish() rejects leaks, so a built scene replayed through the live
    // set must end empty.
    let scene = chips_scene(&Style::chalkboard());
    assert!(kinema_timeline::validate::validate_scene(&scene).is_ok());
}

#[test]
fn all_batch_durations_valid() {
    let scene = chips_scene(&Style::chalkboard());
    for entry in &scene.timeline.entries {
        assert!(entry.duration().is_valid());
    }
}

#[test]
fn rebuilding_a_scene_is_structurally_identical() {
    let style = Style::chalkboard();
    assert_eq!(chips_scene(&style), chips_scene(&style));
}

#[test]
fn batch_operations_share_one_window() {
    let scene = chips_scene(&Style::chalkboard());
    // Entry 1 fades in all three chips together; mid-batch they must all
    // have the same opacity.
    let starts = scene.timeline.entry_starts();
    let mid = Timestamp::from_seconds(starts[1].as_seconds() + 0.3);
    let states = sample(&scene, mid);
    let chip_opacities: Vec<f64> = states
        .iter()
        .filter(|s| s.id.as_str().starts_with("chip-"))
        .map(|s| s.opacity)
        .collect();
    assert_eq!(chip_opacities.len(), 3);
    assert!(chip_opacities
        .windows(2)
        .all(|w| (w[0] - w[1]).abs() < 1e-9));
}

#[test]
fn program_concatenation_preserves_order_and_isolation() {
    let style = Style::chalkboard();
    let a = chips_scene(&style);
    let b = {
        let mut script = Script::new("outro", &style);
        script.add(title("bye", "That's all", &style).at(960.0, 540.0)).unwrap();
        script.play_one("bye", AnimOp::FadeIn, secs(0.5)).unwrap();
        script.wait(secs(1.0)).unwrap();
        script.play_one("bye", AnimOp::FadeOut, secs(0.5)).unwrap();
        script.finish().unwrap()
    };

    let a_duration = a.duration().as_seconds();
    let a_entries = a.timeline.entries.clone();
    let program = Program::new(vec![a, b]);

    // Scene ordering within the program is untouched.
    assert_eq!(program.scenes[0].timeline.entries, a_entries);

    // Sampling inside scene B's range never shows scene A's primitives.
    let (scene, local) = program
        .scene_at(Timestamp::from_seconds(a_duration + 0.25))
        .unwrap();
    assert_eq!(scene.id, "outro");
    let states = sample(scene, local);
    assert!(states.iter().all(|s| s.id.as_str() == "bye"));
}

#[test]
fn empty_scene_renders_to_empty_timeline() {
    let style = Style::chalkboard();
    let scene = Script::new("empty", &style).finish().unwrap();
    assert!(scene.timeline.is_empty());
    assert!(sample(&scene, Timestamp::zero()).is_empty());
}

#[test]
fn create_wait_retire_scenario() {
    let style = Style::chalkboard();
    let mut script = Script::new("s", &style);
    script.add(title("t", "hi", &style)).unwrap();
    script.play_one("t", AnimOp::FadeIn, secs(0.5)).unwrap();
    let live_after_entry_1 = script.live_ids();
    script.wait(secs(2.0)).unwrap();
    script.play_one("t", AnimOp::FadeOut, secs(0.5)).unwrap();
    let live_after_entry_3 = script.live_ids();
    let scene = script.finish().unwrap();

    assert_eq!(scene.timeline.len(), 3);
    assert!(matches!(scene.timeline.entries[0], Entry::Play(_)));
    assert!(matches!(scene.timeline.entries[1], Entry::Wait(_)));
    assert!(matches!(scene.timeline.entries[2], Entry::Play(_)));
    assert_eq!(live_after_entry_1, vec!["t".to_string()]);
    assert!(live_after_entry_3.is_empty());
}

#[test]
fn scene_serializes_to_json_and_back() {
    let scene = chips_scene(&Style::chalkboard());
    let json = serde_json::to_string(&scene).unwrap();
    let back: kinema_timeline::Scene = serde_json::from_str(&json).unwrap();
    assert_eq!(scene, back);
}
