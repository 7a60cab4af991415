//! Rectangle support for collider bounds and overlap reporting

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered_at(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Overlap region of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min().max(other.min());
        let max = self.max().min(other.max());
        if min.x < max.x && min.y < max.y {
            Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn centered_rect_surrounds_its_center() {
        let rect = Rect::centered_at(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_abs_diff_eq!(rect.x, 8.0);
        assert_abs_diff_eq!(rect.y, 17.0);
        assert_abs_diff_eq!(rect.w, 4.0);
        assert_abs_diff_eq!(rect.h, 6.0);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 2.0, 2.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn intersection_matches_overlap_region() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(6.0, 4.0, 10.0, 10.0);

        let overlap = a.intersection(&b).unwrap();
        assert_abs_diff_eq!(overlap.x, 6.0);
        assert_abs_diff_eq!(overlap.y, 4.0);
        assert_abs_diff_eq!(overlap.w, 4.0);
        assert_abs_diff_eq!(overlap.h, 6.0);
    }
}
