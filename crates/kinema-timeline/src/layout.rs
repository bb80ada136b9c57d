//! Layout queries over primitive bounding boxes.
//!
//! Each function is a pure computation from already-placed bounds to a new
//! center position; nothing here mutates scene state. The [`Script`]
//! builder wraps these with lookups against its declared primitives, so
//! scenes can be laid out before anything is animated.
//!
//! [`Script`]: crate::script::Script

use kinema_core::types::{Axis, Direction};
use kinema_core::{Point2D, Rect, Size2D};

/// Center position that places a primitive of `size` beside `anchor` in the
/// given direction with a gap between the facing edges.
pub fn beside(anchor: &Rect, size: Size2D, dir: Direction, gap: f64) -> Point2D {
    let c = anchor.center();
    match dir {
        Direction::Up => Point2D::new(c.x, anchor.top() - gap - size.height / 2.0),
        Direction::Down => Point2D::new(c.x, anchor.bottom() + gap + size.height / 2.0),
        Direction::Left => Point2D::new(anchor.left() - gap - size.width / 2.0, c.y),
        Direction::Right => Point2D::new(anchor.right() + gap + size.width / 2.0, c.y),
    }
}

/// Center position that aligns a primitive currently centered at `center`
/// with `anchor` along one axis, leaving the other axis unchanged.
pub fn aligned(anchor: &Rect, center: Point2D, axis: Axis) -> Point2D {
    let a = anchor.center();
    match axis {
        Axis::Horizontal => Point2D::new(center.x, a.y),
        Axis::Vertical => Point2D::new(a.x, center.y),
    }
}

/// Center positions arranging primitives of the given sizes in a row or
/// column, with `gap` between neighbors, centered as a whole on `center`.
pub fn arranged(sizes: &[Size2D], dir: Direction, gap: f64, center: Point2D) -> Vec<Point2D> {
    if sizes.is_empty() {
        return Vec::new();
    }
    let horizontal = matches!(dir, Direction::Left | Direction::Right);
    let extents: Vec<f64> = sizes
        .iter()
        .map(|s| if horizontal { s.width } else { s.height })
        .collect();
    let total: f64 = extents.iter().sum::<f64>() + gap * (sizes.len() - 1) as f64;

    let mut cursor = -total / 2.0;
    let mut positions = Vec::with_capacity(sizes.len());
    for extent in &extents {
        let mid = cursor + extent / 2.0;
        positions.push(if horizontal {
            Point2D::new(center.x + mid, center.y)
        } else {
            Point2D::new(center.x, center.y + mid)
        });
        cursor += extent + gap;
    }
    // Left/Up reverse the flow direction.
    if matches!(dir, Direction::Left | Direction::Up) {
        positions.reverse();
    }
    positions
}

/// Center position pinning a primitive of `size` against a viewport edge
/// with the given margin, centered along the perpendicular axis.
pub fn to_edge(size: Size2D, dir: Direction, margin: f64, viewport: Size2D) -> Point2D {
    let cx = viewport.width / 2.0;
    let cy = viewport.height / 2.0;
    match dir {
        Direction::Up => Point2D::new(cx, margin + size.height / 2.0),
        Direction::Down => Point2D::new(cx, viewport.height - margin - size.height / 2.0),
        Direction::Left => Point2D::new(margin + size.width / 2.0, cy),
        Direction::Right => Point2D::new(viewport.width - margin - size.width / 2.0, cy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beside_right() {
        let anchor = Rect::new(100.0, 100.0, 50.0, 20.0);
        let p = beside(&anchor, Size2D::new(30.0, 20.0), Direction::Right, 10.0);
        assert!((p.x - (150.0 + 10.0 + 15.0)).abs() < 0.001);
        assert!((p.y - 110.0).abs() < 0.001);
    }

    #[test]
    fn test_beside_up() {
        let anchor = Rect::new(0.0, 100.0, 40.0, 40.0);
        let p = beside(&anchor, Size2D::new(10.0, 20.0), Direction::Up, 5.0);
        assert!((p.y - (100.0 - 5.0 - 10.0)).abs() < 0.001);
        assert!((p.x - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_aligned_vertical() {
        let anchor = Rect::new(100.0, 0.0, 100.0, 10.0);
        let p = aligned(&anchor, Point2D::new(0.0, 400.0), Axis::Vertical);
        assert!((p.x - 150.0).abs() < 0.001);
        assert!((p.y - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_arranged_row_centered() {
        let sizes = vec![Size2D::new(20.0, 10.0); 3];
        let ps = arranged(&sizes, Direction::Right, 10.0, Point2D::new(100.0, 50.0));
        assert_eq!(ps.len(), 3);
        // Total extent 20*3 + 10*2 = 80, so centers at 100-30, 100, 100+30.
        assert!((ps[0].x - 70.0).abs() < 0.001);
        assert!((ps[1].x - 100.0).abs() < 0.001);
        assert!((ps[2].x - 130.0).abs() < 0.001);
        assert!((ps[0].y - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_arranged_empty() {
        assert!(arranged(&[], Direction::Down, 5.0, Point2D::zero()).is_empty());
    }

    #[test]
    fn test_to_edge_top() {
        let p = to_edge(
            Size2D::new(100.0, 40.0),
            Direction::Up,
            60.0,
            Size2D::new(1920.0, 1080.0),
        );
        assert!((p.x - 960.0).abs() < 0.001);
        assert!((p.y - 80.0).abs() < 0.001);
    }
}
