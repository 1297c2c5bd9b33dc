use crate::coords::{Rect, Vec2, Viewport};

/// Pan speed in logical pixels per second, measured on screen.
const PAN_SPEED: f32 = 240.0;

/// Pan speed multiplier while accelerated (Shift held, typically).
const FAST_MULTIPLIER: f32 = 4.0;

/// Zoom factor applied per wheel step.
const ZOOM_STEP: f32 = 1.25;

const ZOOM_MIN: f32 = 1.0 / 16.0;
const ZOOM_MAX: f32 = 32.0;

/// 2D camera over world space.
///
/// `center` is the world point shown at the middle of the viewport; `zoom`
/// scales world units to screen pixels (2.0 shows content at twice its size).
/// World space follows the engine convention: +X right, +Y down.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2d {
    center: Vec2,
    zoom: f32,
}

impl Camera2d {
    pub fn new() -> Self {
        Self {
            center: Vec2::zero(),
            zoom: 1.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Pans along `dir` (unit axis components) for `dt` seconds.
    ///
    /// Speed is constant in screen pixels, so the world-space distance
    /// shrinks as zoom grows.
    pub fn pan(&mut self, dir: Vec2, dt: f32, fast: bool) {
        if dir.is_zero() {
            return;
        }
        let speed = if fast {
            PAN_SPEED * FAST_MULTIPLIER
        } else {
            PAN_SPEED
        };
        self.center = self.center + dir * (speed * dt / self.zoom);
    }

    /// Multiplicative zoom by wheel steps; positive steps zoom in.
    pub fn zoom_by(&mut self, steps: f32) {
        if steps == 0.0 {
            return;
        }
        self.zoom = (self.zoom * ZOOM_STEP.powf(steps)).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Recenters on the world origin at 1:1 scale.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// World-space rect currently visible through `viewport`.
    pub fn visible_rect(&self, viewport: Viewport) -> Rect {
        let size = Vec2::new(viewport.width / self.zoom, viewport.height / self.zoom);
        Rect::centered_at(self.center, size)
    }

    /// Screen-space offset term of the camera transform:
    /// `screen = world * zoom + offset`.
    pub fn screen_offset(&self, viewport: Viewport) -> Vec2 {
        Vec2::new(
            viewport.width / 2.0 - self.center.x * self.zoom,
            viewport.height / 2.0 - self.center.y * self.zoom,
        )
    }
}

impl Default for Camera2d {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    // ── pan ───────────────────────────────────────────────────────────────

    #[test]
    fn pan_scales_with_dt() {
        let mut cam = Camera2d::new();
        cam.pan(Vec2::new(1.0, 0.0), 0.5, false);
        assert_eq!(cam.center(), Vec2::new(PAN_SPEED * 0.5, 0.0));
    }

    #[test]
    fn fast_pan_multiplies_speed() {
        let mut slow = Camera2d::new();
        let mut fast = Camera2d::new();
        slow.pan(Vec2::new(0.0, 1.0), 1.0, false);
        fast.pan(Vec2::new(0.0, 1.0), 1.0, true);
        assert_eq!(fast.center().y, slow.center().y * FAST_MULTIPLIER);
    }

    #[test]
    fn pan_distance_shrinks_when_zoomed_in() {
        let mut cam = Camera2d::new();
        cam.zoom_by(1.0);
        let zoom = cam.zoom();
        cam.pan(Vec2::new(1.0, 0.0), 1.0, false);
        assert_eq!(cam.center().x, PAN_SPEED / zoom);
    }

    #[test]
    fn zero_direction_is_a_noop() {
        let mut cam = Camera2d::new();
        cam.pan(Vec2::zero(), 1.0, true);
        assert_eq!(cam, Camera2d::new());
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn zoom_is_multiplicative_and_symmetric() {
        let mut cam = Camera2d::new();
        cam.zoom_by(2.0);
        cam.zoom_by(-2.0);
        assert!((cam.zoom() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let mut cam = Camera2d::new();
        cam.zoom_by(1000.0);
        assert_eq!(cam.zoom(), ZOOM_MAX);
        cam.zoom_by(-1000.0);
        assert_eq!(cam.zoom(), ZOOM_MIN);
    }

    // ── view math ─────────────────────────────────────────────────────────

    #[test]
    fn visible_rect_halves_at_double_zoom() {
        let mut cam = Camera2d::new();
        cam.zoom_by(f32::log(2.0, ZOOM_STEP));
        let rect = cam.visible_rect(VIEWPORT);
        assert!((rect.size.x - 400.0).abs() < 0.5);
        assert!((rect.size.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn screen_offset_puts_center_mid_viewport() {
        let mut cam = Camera2d::new();
        cam.pan(Vec2::new(1.0, 1.0), 1.0, false);
        let offset = cam.screen_offset(VIEWPORT);
        let screen = cam.center() * cam.zoom() + offset;
        assert_eq!(screen, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn reset_restores_identity() {
        let mut cam = Camera2d::new();
        cam.pan(Vec2::new(1.0, 0.0), 2.0, true);
        cam.zoom_by(3.0);
        cam.reset();
        assert_eq!(cam, Camera2d::new());
    }
}
