//! CPU rasterization of sampled visual states.
//!
//! Coordinates arrive in authoring-canvas space; `scale` maps them to the
//! output resolution. Shapes are drawn by per-pixel coverage tests over
//! their device-space bounding boxes and blended with Porter-Duff "over".

use kinema_core::{Color, FrameBuffer, KinemaResult, Point2D};
use kinema_timeline::{PrimitiveKind, VisualState};

use crate::text::TextRenderer;

/// Draw one sampled state onto the frame.
pub fn draw_state(
    fb: &mut FrameBuffer,
    state: &VisualState,
    scale: f64,
    text: &TextRenderer,
) -> KinemaResult<()> {
    if state.opacity <= 0.0 || state.scale <= 0.0 {
        return Ok(());
    }
    draw_kind(
        fb,
        &state.kind,
        state.position,
        state.fill.scale_alpha(state.opacity as f32),
        state.stroke.map(|c| c.scale_alpha(state.opacity as f32)),
        state.stroke_width,
        state.scale,
        state.text_progress,
        scale,
        text,
    )
}

#[allow(clippy::too_many_arguments)]
fn draw_kind(
    fb: &mut FrameBuffer,
    kind: &PrimitiveKind,
    position: Point2D,
    fill: Color,
    stroke: Option<Color>,
    stroke_width: f64,
    shape_scale: f64,
    text_progress: f64,
    scale: f64,
    text: &TextRenderer,
) -> KinemaResult<()> {
    match kind {
        PrimitiveKind::Rect {
            width,
            height,
            corner_radius,
        } => {
            fill_rounded_rect(
                fb,
                position,
                width * shape_scale,
                height * shape_scale,
                corner_radius * shape_scale,
                fill,
                stroke,
                stroke_width * shape_scale,
                scale,
            );
            Ok(())
        }
        PrimitiveKind::Circle { radius } => {
            fill_circle(
                fb,
                position,
                radius * shape_scale,
                fill,
                stroke,
                stroke_width * shape_scale,
                scale,
            );
            Ok(())
        }
        PrimitiveKind::Line { end, width } => {
            let to = position + *end;
            stroke_segment(fb, position, to, width * shape_scale, fill, scale);
            Ok(())
        }
        PrimitiveKind::Arrow { end, width } => {
            draw_arrow(fb, position, *end, width * shape_scale, fill, scale);
            Ok(())
        }
        PrimitiveKind::Text { text: content, font_size } => {
            draw_text(
                fb,
                content,
                position,
                font_size * shape_scale,
                fill,
                text_progress,
                scale,
                text,
            )
        }
        PrimitiveKind::Group { children } => {
            for child in children {
                draw_kind(
                    fb,
                    &child.kind,
                    position + Point2D::new(child.position.x * shape_scale, child.position.y * shape_scale),
                    child.fill.scale_alpha(fill.a),
                    child.stroke.map(|c| c.scale_alpha(fill.a)),
                    child.stroke_width,
                    shape_scale * child.scale,
                    text_progress,
                    scale,
                    text,
                )?;
            }
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn fill_rounded_rect(
    fb: &mut FrameBuffer,
    center: Point2D,
    width: f64,
    height: f64,
    radius: f64,
    fill: Color,
    stroke: Option<Color>,
    stroke_width: f64,
    scale: f64,
) {
    let hw = width * scale / 2.0;
    let hh = height * scale / 2.0;
    let r = radius.min(width / 2.0).min(height / 2.0) * scale;
    let cx = center.x * scale;
    let cy = center.y * scale;
    let sw = stroke_width * scale;

    let x0 = (cx - hw).floor().max(0.0) as u32;
    let x1 = (cx + hw).ceil().min(fb.width as f64) as u32;
    let y0 = (cy - hh).floor().max(0.0) as u32;
    let y1 = (cy + hh).ceil().min(fb.height as f64) as u32;

    let fill_px = fill.to_rgba8();
    let stroke_px = stroke.map(|c| c.to_rgba8());

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (x as f64 + 0.5 - cx).abs();
            let dy = (y as f64 + 0.5 - cy).abs();
            // Signed distance to the rounded-rect boundary.
            let qx = dx - (hw - r);
            let qy = dy - (hh - r);
            let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt() + qx.max(qy).min(0.0) - r;
            if outside > 0.0 {
                continue;
            }
            if let Some(sp) = stroke_px {
                if outside > -sw {
                    fb.blend_pixel(x, y, sp);
                    continue;
                }
            }
            fb.blend_pixel(x, y, fill_px);
        }
    }
}

fn fill_circle(
    fb: &mut FrameBuffer,
    center: Point2D,
    radius: f64,
    fill: Color,
    stroke: Option<Color>,
    stroke_width: f64,
    scale: f64,
) {
    let r = radius * scale;
    let cx = center.x * scale;
    let cy = center.y * scale;
    let sw = stroke_width * scale;

    let x0 = (cx - r).floor().max(0.0) as u32;
    let x1 = (cx + r).ceil().min(fb.width as f64) as u32;
    let y0 = (cy - r).floor().max(0.0) as u32;
    let y1 = (cy + r).ceil().min(fb.height as f64) as u32;

    let fill_px = fill.to_rgba8();
    let stroke_px = stroke.map(|c| c.to_rgba8());

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > r {
                continue;
            }
            if let Some(sp) = stroke_px {
                if dist > r - sw {
                    fb.blend_pixel(x, y, sp);
                    continue;
                }
            }
            fb.blend_pixel(x, y, fill_px);
        }
    }
}

fn stroke_segment(
    fb: &mut FrameBuffer,
    from: Point2D,
    to: Point2D,
    width: f64,
    color: Color,
    scale: f64,
) {
    let ax = from.x * scale;
    let ay = from.y * scale;
    let bx = to.x * scale;
    let by = to.y * scale;
    let half = (width * scale / 2.0).max(0.5);

    let x0 = (ax.min(bx) - half).floor().max(0.0) as u32;
    let x1 = (ax.max(bx) + half).ceil().min(fb.width as f64) as u32;
    let y0 = (ay.min(by) - half).floor().max(0.0) as u32;
    let y1 = (ay.max(by) + half).ceil().min(fb.height as f64) as u32;

    let px = color.to_rgba8();
    let seg_x = bx - ax;
    let seg_y = by - ay;
    let seg_len2 = seg_x * seg_x + seg_y * seg_y;

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f64 + 0.5 - ax;
            let dy = y as f64 + 0.5 - ay;
            let t = if seg_len2 > 0.0 {
                ((dx * seg_x + dy * seg_y) / seg_len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let ex = dx - t * seg_x;
            let ey = dy - t * seg_y;
            if (ex * ex + ey * ey).sqrt() <= half {
                fb.blend_pixel(x, y, px);
            }
        }
    }
}

fn draw_arrow(
    fb: &mut FrameBuffer,
    from: Point2D,
    delta: Point2D,
    width: f64,
    color: Color,
    scale: f64,
) {
    let len = (delta.x * delta.x + delta.y * delta.y).sqrt();
    if len < f64::EPSILON {
        return;
    }
    let head_len = (len * 0.2).min(width * 4.0).max(width * 2.0);
    let (ux, uy) = (delta.x / len, delta.y / len);
    let tip = from + delta;
    let base = Point2D::new(tip.x - ux * head_len, tip.y - uy * head_len);

    stroke_segment(fb, from, base, width, color, scale);

    // Head: widening strokes from the base toward the tip.
    let half_w = head_len * 0.6;
    let (nx, ny) = (-uy, ux);
    let steps = (head_len * scale).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let p = base.lerp(&tip, t);
        let w = half_w * (1.0 - t);
        let a = Point2D::new(p.x + nx * w, p.y + ny * w);
        let b = Point2D::new(p.x - nx * w, p.y - ny * w);
        stroke_segment(fb, a, b, 1.0 / scale, color, scale);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    fb: &mut FrameBuffer,
    content: &str,
    center: Point2D,
    font_size: f64,
    fill: Color,
    progress: f64,
    scale: f64,
    text: &TextRenderer,
) -> KinemaResult<()> {
    let total = content.chars().count();
    let shown = ((progress.clamp(0.0, 1.0) * total as f64).ceil() as usize).min(total);
    if shown == 0 {
        return Ok(());
    }
    let visible: String = content.chars().take(shown).collect();

    let rendered = text.render_text(&visible, (font_size * scale) as f32, &fill)?;
    // Center against the measure of the full string so the text does not
    // shift while being written on.
    let full = kinema_timeline::primitive::measure_text(content, font_size);
    let dx = (center.x - full.width / 2.0) * scale;
    let dy = (center.y - full.height / 2.0) * scale;
    fb.composite_over(&rendered, dx.round() as i32, dy.round() as i32);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::PixelFormat;

    fn white() -> Color {
        Color::WHITE
    }

    #[test]
    fn test_fill_circle_inside_and_outside() {
        let mut fb = FrameBuffer::new(100, 100, PixelFormat::Rgba8);
        fill_circle(&mut fb, Point2D::new(50.0, 50.0), 20.0, white(), None, 0.0, 1.0);
        assert_eq!(fb.get_pixel(50, 50).unwrap()[3], 255);
        assert_eq!(fb.get_pixel(50, 10).unwrap()[3], 0);
    }

    #[test]
    fn test_rect_stroke_ring() {
        let mut fb = FrameBuffer::new(100, 100, PixelFormat::Rgba8);
        fill_rounded_rect(
            &mut fb,
            Point2D::new(50.0, 50.0),
            40.0,
            40.0,
            0.0,
            Color::rgba(1.0, 0.0, 0.0, 1.0),
            Some(Color::rgba(0.0, 1.0, 0.0, 1.0)),
            4.0,
            1.0,
        );
        // Center is fill, edge is stroke.
        assert_eq!(fb.get_pixel(50, 50).unwrap()[0], 255);
        let edge = fb.get_pixel(50, 31).unwrap();
        assert_eq!(edge[1], 255);
    }

    #[test]
    fn test_segment_horizontal() {
        let mut fb = FrameBuffer::new(100, 20, PixelFormat::Rgba8);
        stroke_segment(
            &mut fb,
            Point2D::new(10.0, 10.0),
            Point2D::new(90.0, 10.0),
            4.0,
            white(),
            1.0,
        );
        assert_eq!(fb.get_pixel(50, 10).unwrap()[3], 255);
        assert_eq!(fb.get_pixel(50, 2).unwrap()[3], 0);
    }

    #[test]
    fn test_scale_halves_device_size() {
        let mut full = FrameBuffer::new(100, 100, PixelFormat::Rgba8);
        fill_circle(&mut full, Point2D::new(50.0, 50.0), 30.0, white(), None, 0.0, 1.0);
        let mut half = FrameBuffer::new(50, 50, PixelFormat::Rgba8);
        fill_circle(&mut half, Point2D::new(50.0, 50.0), 30.0, white(), None, 0.0, 0.5);
        // At half scale the circle is centered at (25, 25) with radius 15.
        assert_eq!(half.get_pixel(25, 25).unwrap()[3], 255);
        assert_eq!(half.get_pixel(25, 5).unwrap()[3], 0);
        assert_eq!(full.get_pixel(50, 50).unwrap()[3], 255);
    }
}
