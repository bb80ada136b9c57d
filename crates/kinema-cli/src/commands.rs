use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};

use kinema_core::{KinemaConfig, Quality, RenderSettings, Style, Timestamp};
use kinema_encode::{FfmpegEncoder, GifEncoder, OutputFormat, PngSequenceEncoder};
use kinema_render::{RenderPipeline, RenderedScene};
use kinema_timeline::validate::validate_scene;
use kinema_timeline::{sample, Entry, Scene};

pub fn render(
    scene: Option<String>,
    all: bool,
    combined: bool,
    quality: Option<Quality>,
    output: Option<PathBuf>,
    format: Option<String>,
) -> Result<()> {
    let config = KinemaConfig::load_or_default()?;
    let style = Style::chalkboard();

    let quality = quality.unwrap_or(config.output.quality);
    // Scenes carry their own background; settings only pick the tier.
    let settings = quality.settings();
    let format: OutputFormat = format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()?;
    let out_dir = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));

    let font_path = config.fonts.path.as_deref().map(Path::new);
    let pipeline = RenderPipeline::new(font_path)?;

    let started = Instant::now();

    if combined {
        let program = kinema_scenes::build_all(&style)?;
        tracing::info!(
            scenes = program.scenes.len(),
            duration = %program.total_duration(),
            "rendering combined program"
        );
        let rendered = pipeline.render_program(&program, &settings)?;
        let path = write_output(&rendered, format, &out_dir, "combined")?;
        println!("Wrote {}", path.display());
    } else if all {
        for (name, constructor) in kinema_scenes::catalog() {
            let scene = constructor(&style)?;
            let rendered = pipeline.render_scene(&scene, &settings)?;
            let path = write_output(&rendered, format, &out_dir, name)?;
            println!("Wrote {}", path.display());
        }
    } else if let Some(name) = scene {
        let scene = kinema_scenes::build(&name, &style)?;
        let rendered = pipeline.render_scene(&scene, &settings)?;
        let path = write_output(&rendered, format, &out_dir, &name)?;
        println!("Wrote {}", path.display());
    } else {
        bail!("nothing to render: pass a scene name, --all, or --combined");
    }

    tracing::info!(elapsed = ?started.elapsed(), "render finished");
    Ok(())
}

/// Encode rendered frames in the requested format. PNG output is a
/// directory of numbered frames; MP4 and GIF are single files.
fn write_output(
    rendered: &RenderedScene,
    format: OutputFormat,
    out_dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    let path = match format {
        OutputFormat::Mp4 => {
            let path = out_dir.join(format!("{}.mp4", name));
            FfmpegEncoder::encode(
                &rendered.frames,
                rendered.width,
                rendered.height,
                rendered.fps,
                &path,
            )?;
            path
        }
        OutputFormat::Gif => {
            let path = out_dir.join(format!("{}.gif", name));
            GifEncoder::encode(
                &rendered.frames,
                rendered.width,
                rendered.height,
                rendered.fps,
                &path,
                None,
            )?;
            path
        }
        OutputFormat::Png => {
            let dir = out_dir.join(name);
            PngSequenceEncoder::encode(&rendered.frames, rendered.width, rendered.height, &dir)?;
            dir
        }
    };
    Ok(path)
}

pub fn list() -> Result<()> {
    let style = Style::chalkboard();
    println!("{:<12} {:>9}  {:>7}", "SCENE", "DURATION", "ENTRIES");
    for (name, constructor) in kinema_scenes::catalog() {
        let scene = constructor(&style)
            .with_context(|| format!("failed to build scene '{}'", name))?;
        println!(
            "{:<12} {:>8.1}s  {:>7}",
            name,
            scene.duration().as_seconds(),
            scene.timeline.len()
        );
    }
    Ok(())
}

pub fn check(scene: Option<String>) -> Result<()> {
    let style = Style::chalkboard();
    let scenes: Vec<(String, Scene)> = match scene {
        Some(name) => vec![(name.clone(), kinema_scenes::build(&name, &style)?)],
        None => {
            let mut all = Vec::new();
            for (name, constructor) in kinema_scenes::catalog() {
                all.push((name.to_string(), constructor(&style)?));
            }
            all
        }
    };

    let mut failed = false;
    for (name, scene) in &scenes {
        match validate_scene(scene) {
            Ok(()) => println!("{}: ok", name),
            Err(errors) => {
                failed = true;
                for e in errors {
                    eprintln!("{}: {}", name, e);
                }
            }
        }
    }
    if failed {
        bail!("validation failed");
    }
    Ok(())
}

pub fn inspect(name: &str, frame: Option<u64>, json: bool) -> Result<()> {
    let config = KinemaConfig::load_or_default()?;
    let style = Style::chalkboard();
    let scene = kinema_scenes::build(name, &style)?;
    let settings = config.output.quality.settings();

    match frame {
        Some(frame) => inspect_frame(&scene, &settings, frame, json),
        None => inspect_timeline(&scene, json),
    }
}

fn inspect_frame(scene: &Scene, settings: &RenderSettings, frame: u64, json: bool) -> Result<()> {
    let total = scene.frame_count(settings.fps);
    if frame >= total {
        bail!(
            "frame {} out of range: scene '{}' has {} frames at {} fps",
            frame,
            scene.id,
            total,
            settings.fps
        );
    }
    let t = Timestamp::from_seconds(frame as f64 / settings.fps);
    let states = sample(scene, t);

    if json {
        println!("{}", serde_json::to_string_pretty(&states)?);
        return Ok(());
    }

    println!(
        "scene '{}' frame {}/{} (t={:.3}s): {} visible",
        scene.id,
        frame,
        total,
        t.as_seconds(),
        states.len()
    );
    for state in &states {
        println!(
            "  {:<24} pos=({:.0},{:.0}) opacity={:.2} scale={:.2}",
            state.id, state.position.x, state.position.y, state.opacity, state.scale
        );
    }
    Ok(())
}

fn inspect_timeline(scene: &Scene, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(scene)?);
        return Ok(());
    }

    println!(
        "scene '{}' — {} ({:.1}s, {} primitives)",
        scene.id,
        scene.title,
        scene.duration().as_seconds(),
        scene.primitives.len()
    );
    let mut clock = 0.0;
    for (i, entry) in scene.timeline.entries.iter().enumerate() {
        let duration = entry.duration().as_seconds();
        match entry {
            Entry::Wait(_) => {
                println!("  [{:>2}] {:>6.2}s  wait {:.2}s", i, clock, duration);
            }
            Entry::Play(batch) => {
                let ops: Vec<String> = batch
                    .directives
                    .iter()
                    .map(|d| format!("{}({})", d.op.name(), d.target))
                    .collect();
                println!(
                    "  [{:>2}] {:>6.2}s  play {:.2}s  {}",
                    i,
                    clock,
                    duration,
                    ops.join(", ")
                );
            }
        }
        clock += duration;
    }
    Ok(())
}

pub fn info() -> Result<()> {
    println!("kinema {}", env!("CARGO_PKG_VERSION"));
    println!("  scenes:  {}", kinema_scenes::catalog().len());
    println!(
        "  ffmpeg:  {}",
        if FfmpegEncoder::is_available() {
            "available"
        } else {
            "not found (mp4 output disabled)"
        }
    );
    let config = KinemaConfig::load_or_default()?;
    let pipeline_font = config.fonts.path.as_deref().map(Path::new);
    let text = kinema_render::TextRenderer::new(pipeline_font)?;
    println!(
        "  font:    {}",
        if text.has_font() {
            "loaded"
        } else {
            "none found (text scenes will fail)"
        }
    );
    Ok(())
}
