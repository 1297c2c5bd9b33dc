use super::Vec2;

/// Axis-aligned rectangle, top-left origin.
///
/// Sizes stay non-negative by construction; rects are built from a position
/// plus a measured extent, never from two arbitrary corners.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rect of the given size whose midpoint sits at `center`.
    #[inline]
    pub fn centered_at(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size / 2.0, size)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Overlap of two rects. `None` when they are disjoint or only share
    /// an edge.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let lo = Vec2::new(
            self.origin.x.max(other.origin.x),
            self.origin.y.max(other.origin.y),
        );
        let hi = Vec2::new(self.max().x.min(other.max().x), self.max().y.min(other.max().y));

        let size = hi - lo;
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        Some(Rect::from_origin_size(lo, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn centered_at_splits_size_evenly() {
        let rect = Rect::centered_at(Vec2::zero(), Vec2::new(10.0, 4.0));
        assert_eq!(rect, Rect::new(-5.0, -2.0, 10.0, 4.0));
        assert_eq!(rect.center(), Vec2::zero());
    }

    #[test]
    fn min_max_span_the_rect() {
        let rect = Rect::new(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.min(), Vec2::new(1.0, 2.0));
        assert_eq!(rect.max(), Vec2::new(11.0, 22.0));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_of_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 8.0, 8.0);
        let b = Rect::new(6.0, 2.0, 8.0, 8.0);
        assert_eq!(a.intersect(b), Some(Rect::new(6.0, 2.0, 2.0, 6.0)));
    }

    #[test]
    fn intersect_with_contained_rect_is_the_inner_one() {
        let outer = Rect::new(-50.0, -50.0, 100.0, 100.0);
        let inner = Rect::new(-10.0, -5.0, 20.0, 10.0);
        assert_eq!(outer.intersect(inner), Some(inner));
    }

    #[test]
    fn shared_edge_does_not_intersect() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(4.0, 0.0, 4.0, 4.0);
        assert_eq!(a.intersect(b), None);
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(9.0, 9.0, 4.0, 4.0);
        assert_eq!(a.intersect(b), None);
    }

    // ── emptiness ─────────────────────────────────────────────────────────

    #[test]
    fn zero_extent_is_empty() {
        assert!(Rect::new(3.0, 3.0, 0.0, 2.0).is_empty());
        assert!(Rect::new(3.0, 3.0, 2.0, 0.0).is_empty());
        assert!(!Rect::new(3.0, 3.0, 2.0, 2.0).is_empty());
    }
}
