//! Reusable visual widgets.
//!
//! Each widget is a pure function from content parameters to a primitive
//! group; there is no widget state and no inheritance. Scenes compose these
//! into their scripts like any other primitive.

use crate::primitive::{measure_text, Primitive, PrimitiveKind};
use kinema_core::{Color, Point2D, Rect};

/// A rounded box with a centered label. The staple building block for
/// pipeline and architecture diagrams.
pub fn labeled_box(
    id: &str,
    label: &str,
    color: Color,
    text_color: Color,
    width: f64,
    height: f64,
    font_size: f64,
) -> Primitive {
    let box_part = Primitive::new(
        format!("{}/box", id),
        PrimitiveKind::Rect {
            width,
            height,
            corner_radius: 16.0,
        },
    )
    .fill(color.with_alpha(0.3))
    .stroke(color, 3.0);

    let label_part = Primitive::new(
        format!("{}/label", id),
        PrimitiveKind::Text {
            text: label.to_string(),
            font_size,
        },
    )
    .fill(text_color);

    Primitive::new(
        id,
        PrimitiveKind::Group {
            children: vec![box_part, label_part],
        },
    )
}

/// A small rounded chip sized to its text, used for token visualizations.
pub fn token_chip(id: &str, text: &str, color: Color, text_color: Color, font_size: f64) -> Primitive {
    let text_size = measure_text(text, font_size);
    let padding = font_size * 0.4;

    let box_part = Primitive::new(
        format!("{}/box", id),
        PrimitiveKind::Rect {
            width: text_size.width + padding * 2.0,
            height: text_size.height + padding,
            corner_radius: 8.0,
        },
    )
    .fill(color.with_alpha(0.4))
    .stroke(color, 2.0);

    let label_part = Primitive::new(
        format!("{}/label", id),
        PrimitiveKind::Text {
            text: text.to_string(),
            font_size,
        },
    )
    .fill(text_color);

    Primitive::new(
        id,
        PrimitiveKind::Group {
            children: vec![box_part, label_part],
        },
    )
}

/// A rows x cols grid of cells with opacity graded along the diagonal,
/// used for attention/weight matrix visualizations.
pub fn matrix_grid(
    id: &str,
    rows: usize,
    cols: usize,
    cell_size: f64,
    color: Color,
    stroke: Color,
) -> Primitive {
    let mut children = Vec::with_capacity(rows * cols);
    let denom = (rows + cols).saturating_sub(2).max(1) as f32;
    for row in 0..rows {
        for col in 0..cols {
            let fade = 0.3 + 0.7 * (1.0 - (row + col) as f32 / denom);
            let x = col as f64 * cell_size - (cols as f64 - 1.0) * cell_size / 2.0;
            let y = row as f64 * cell_size - (rows as f64 - 1.0) * cell_size / 2.0;
            children.push(
                Primitive::new(
                    format!("{}/cell-{}-{}", id, row, col),
                    PrimitiveKind::Rect {
                        width: cell_size,
                        height: cell_size,
                        corner_radius: 0.0,
                    },
                )
                .at(x, y)
                .fill(color.with_alpha(fade))
                .stroke(stroke, 1.0),
            );
        }
    }
    Primitive::new(id, PrimitiveKind::Group { children })
}

/// An arrow between the facing edges of two bounding boxes, trimmed by a
/// small buffer at each end.
pub fn arrow_between(id: &str, from: &Rect, to: &Rect, color: Color, width: f64) -> Primitive {
    let a = from.center();
    let b = to.center();
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return Primitive::new(
            id,
            PrimitiveKind::Arrow {
                end: Point2D::zero(),
                width,
            },
        )
        .at_point(a)
        .fill(color);
    }
    let (ux, uy) = (dx / len, dy / len);
    // Start and end on the box edges, approximated by the half-extent along
    // the dominant axis, plus a 10px buffer.
    let from_trim = if ux.abs() > uy.abs() {
        from.width / 2.0
    } else {
        from.height / 2.0
    } + 10.0;
    let to_trim = if ux.abs() > uy.abs() {
        to.width / 2.0
    } else {
        to.height / 2.0
    } + 10.0;

    let start = Point2D::new(a.x + ux * from_trim, a.y + uy * from_trim);
    let end = Point2D::new(b.x - ux * to_trim, b.y - uy * to_trim);
    Primitive::new(
        id,
        PrimitiveKind::Arrow {
            end: end - start,
            width,
        },
    )
    .at_point(start)
    .fill(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_box_structure() {
        let w = labeled_box("stage", "Tokenizer", Color::WHITE, Color::BLACK, 300.0, 120.0, 32.0);
        let PrimitiveKind::Group { children } = &w.kind else {
            panic!("expected group");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id.as_str(), "stage/box");
        assert_eq!(children[1].id.as_str(), "stage/label");
    }

    #[test]
    fn test_token_chip_sized_to_text() {
        let short = token_chip("a", "hi", Color::WHITE, Color::BLACK, 30.0);
        let long = token_chip("b", "tokenization", Color::WHITE, Color::BLACK, 30.0);
        assert!(long.intrinsic_size().width > short.intrinsic_size().width);
    }

    #[test]
    fn test_matrix_grid_cell_count() {
        let grid = matrix_grid("m", 4, 5, 50.0, Color::WHITE, Color::BLACK);
        let PrimitiveKind::Group { children } = &grid.kind else {
            panic!("expected group");
        };
        assert_eq!(children.len(), 20);
    }

    #[test]
    fn test_arrow_between_horizontal_boxes() {
        let from = Rect::new(0.0, 0.0, 100.0, 100.0);
        let to = Rect::new(300.0, 0.0, 100.0, 100.0);
        let arrow = arrow_between("a", &from, &to, Color::WHITE, 4.0);
        let PrimitiveKind::Arrow { end, .. } = arrow.kind else {
            panic!("expected arrow");
        };
        // Trimmed by half-width + buffer on both sides: 300 - 2*60 = 180.
        assert!((arrow.position.x - 110.0).abs() < 0.001);
        assert!((end.x - 180.0).abs() < 0.001);
        assert!(end.y.abs() < 0.001);
    }

    #[test]
    fn test_widgets_are_deterministic() {
        let a = matrix_grid("m", 3, 3, 40.0, Color::WHITE, Color::BLACK);
        let b = matrix_grid("m", 3, 3, 40.0, Color::WHITE, Color::BLACK);
        assert_eq!(a, b);
    }
}
