//! Viewport camera: scroll, zoom, and the world/screen transforms.
//!
//! Scroll is the world-space point currently at the viewport center. Panning
//! subtracts the pointer delta so content appears to follow the pointer;
//! wheel input scales zoom and clamps it to a fixed range. Centering happens
//! once per rebuild, never continuously.

use nimsforest_model::ScreenVec;

/// Default zoom floor.
pub const ZOOM_MIN: f32 = 0.5;
/// Default zoom ceiling.
pub const ZOOM_MAX: f32 = 2.0;
/// Default wheel-delta-to-zoom factor.
pub const WHEEL_SENSITIVITY: f32 = 0.001;

/// Camera tunables. Defaults are the viewer's fixed constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTuning {
    /// Smallest allowed zoom factor.
    pub zoom_min: f32,
    /// Largest allowed zoom factor.
    pub zoom_max: f32,
    /// Zoom change per unit of wheel delta.
    pub wheel_sensitivity: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            wheel_sensitivity: WHEEL_SENSITIVITY,
        }
    }
}

/// The scene camera.
#[derive(Debug, Clone)]
pub struct Camera {
    scroll: ScreenVec,
    zoom: f32,
    viewport: (f32, f32),
    tuning: CameraTuning,
}

impl Camera {
    /// Creates a camera with default tuning, centered on the world origin.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self::with_tuning(viewport_width, viewport_height, CameraTuning::default())
    }

    /// Creates a camera with explicit tuning.
    #[must_use]
    pub fn with_tuning(viewport_width: f32, viewport_height: f32, tuning: CameraTuning) -> Self {
        Self {
            scroll: ScreenVec::ZERO,
            zoom: 1.0,
            viewport: (viewport_width, viewport_height),
            tuning,
        }
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// World-space point at the viewport center.
    #[must_use]
    pub const fn scroll(&self) -> ScreenVec {
        self.scroll
    }

    /// Viewport size in pixels.
    #[must_use]
    pub const fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Resizes the viewport.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    /// Centers the viewport on a world-space point.
    pub fn center_on(&mut self, point: ScreenVec) {
        self.scroll = point;
    }

    /// Pans by a pointer delta. Scroll moves opposite the delta, so dragged
    /// content tracks the pointer.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.scroll.x -= dx;
        self.scroll.y -= dy;
    }

    /// Applies a wheel delta to the zoom factor, clamped to the tuned range.
    pub fn apply_wheel(&mut self, delta_y: f32) {
        self.zoom = (self.zoom - delta_y * self.tuning.wheel_sensitivity)
            .clamp(self.tuning.zoom_min, self.tuning.zoom_max);
    }

    /// World space to screen space.
    #[must_use]
    pub fn world_to_screen(&self, point: ScreenVec) -> ScreenVec {
        ScreenVec::new(
            (point.x - self.scroll.x) * self.zoom + self.viewport.0 / 2.0,
            (point.y - self.scroll.y) * self.zoom + self.viewport.1 / 2.0,
        )
    }

    /// Screen space to world space.
    #[must_use]
    pub fn screen_to_world(&self, point: ScreenVec) -> ScreenVec {
        ScreenVec::new(
            (point.x - self.viewport.0 / 2.0) / self.zoom + self.scroll.x,
            (point.y - self.viewport.1 / 2.0) / self.zoom + self.scroll.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_zoom_clamps_at_both_ends() {
        let mut cam = Camera::new(800.0, 600.0);

        // Wheel-up (negative delta) raises zoom, never past the ceiling.
        for _ in 0..10_000 {
            cam.apply_wheel(-120.0);
        }
        assert!((cam.zoom() - ZOOM_MAX).abs() < f32::EPSILON);

        // Wheel-down lowers zoom, never past the floor.
        for _ in 0..10_000 {
            cam.apply_wheel(120.0);
        }
        assert!((cam.zoom() - ZOOM_MIN).abs() < f32::EPSILON);
    }

    #[test]
    fn centered_point_lands_mid_viewport() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.center_on(ScreenVec::new(44.0, 66.0));
        let s = cam.world_to_screen(ScreenVec::new(44.0, 66.0));
        assert_eq!(s, ScreenVec::new(400.0, 300.0));
    }

    #[test]
    fn screen_world_round_trip() {
        let mut cam = Camera::new(1280.0, 720.0);
        cam.center_on(ScreenVec::new(-30.0, 120.0));
        cam.apply_wheel(-250.0); // zoom 1.25

        let screen = ScreenVec::new(613.0, 402.5);
        let world = cam.screen_to_world(screen);
        let back = cam.world_to_screen(world);
        assert!((back.x - screen.x).abs() < 1e-3);
        assert!((back.y - screen.y).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_scroll_against_the_delta() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.pan(10.0, -4.0);
        assert_eq!(cam.scroll(), ScreenVec::new(-10.0, 4.0));
    }
}
