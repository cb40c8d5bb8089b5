//! View state: camera, viewport and the host interface the snapper
//! queries for display-dependent lengths.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Base zoom level that corresponds to "100%" in the UI.
pub const BASE_ZOOM: f64 = 1.68;

/// Typical display density (96 dpi).
pub const DEFAULT_PIXELS_PER_MM: f64 = 96.0 / 25.4;

/// Display-side services the snapper depends on.
pub trait SnapHost {
    /// Convert a length in display millimetres to model units.
    fn display_mm_to_model(&self, mm: f64) -> f64;

    /// Convert a length in device pixels to model units.
    fn display_px_to_model(&self, px: f64) -> f64;

    /// Visible window in model coordinates.
    fn window_rect(&self) -> Rect;

    /// Ask the host to repaint the snap feedback.
    fn request_redraw(&self) {}
}

/// Camera manages the view transform for the canvas: a screen-space
/// offset and a zoom factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (BASE_ZOOM = 100% in UI)
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: BASE_ZOOM,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen to world transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale()) * Affine::translate(-self.offset)
    }

    /// Zoom actually applied: `zoom` held to `min_zoom..=max_zoom`, or
    /// [`BASE_ZOOM`] when it is not a finite number.
    pub fn scale(&self) -> f64 {
        if !self.zoom.is_finite() {
            return BASE_ZOOM;
        }
        let (lo, hi) = (self.min_zoom.min(self.max_zoom), self.min_zoom.max(self.max_zoom));
        self.zoom.max(lo).min(hi)
    }
}

/// A camera looking through a window of a given pixel size on a display of
/// known density.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub camera: Camera,
    /// Window size in device pixels.
    pub size: Size,
    /// Device pixels per display millimetre.
    pub pixels_per_mm: f64,
    #[serde(skip)]
    redraw_requested: Cell<bool>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Camera::default(), Size::new(1280.0, 800.0))
    }
}

impl Viewport {
    pub fn new(camera: Camera, size: Size) -> Self {
        Self {
            camera,
            size,
            pixels_per_mm: DEFAULT_PIXELS_PER_MM,
            redraw_requested: Cell::new(false),
        }
    }

    pub fn with_pixels_per_mm(mut self, pixels_per_mm: f64) -> Self {
        self.pixels_per_mm = pixels_per_mm;
        self
    }

    /// Return and reset the pending redraw request.
    pub fn take_redraw(&self) -> bool {
        self.redraw_requested.replace(false)
    }
}

impl SnapHost for Viewport {
    fn display_mm_to_model(&self, mm: f64) -> f64 {
        mm * self.pixels_per_mm / self.camera.scale()
    }

    fn display_px_to_model(&self, px: f64) -> f64 {
        px / self.camera.scale()
    }

    fn window_rect(&self) -> Rect {
        let inverse = self.camera.inverse_transform();
        Rect::from_points(inverse * Point::ZERO, inverse * Point::new(self.size.width, self.size.height))
    }

    fn request_redraw(&self) {
        self.redraw_requested.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - BASE_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverse_transform_with_offset_and_zoom() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        camera.zoom = 2.0;
        let world = camera.inverse_transform() * Point::new(150.0, 300.0);
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom = 0.0;
        assert!((camera.scale() - camera.min_zoom).abs() < f64::EPSILON);
        camera.zoom = 1000.0;
        assert!((camera.scale() - camera.max_zoom).abs() < f64::EPSILON);
        camera.zoom = f64::NAN;
        assert!((camera.scale() - BASE_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_zoom_keeps_lengths_finite() {
        let camera = Camera {
            zoom: 0.0,
            ..Camera::default()
        };
        let viewport = Viewport::new(camera, Size::new(1000.0, 1000.0)).with_pixels_per_mm(1.0);
        assert!((viewport.display_mm_to_model(1.0) - 10.0).abs() < 1e-9);
        assert!((viewport.display_px_to_model(1.0) - 10.0).abs() < 1e-9);
        let window = viewport.window_rect();
        assert!(window.width().is_finite());
        assert!((window.width() - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_conversion_follows_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 4.0;
        let viewport = Viewport::new(camera, Size::new(1000.0, 1000.0)).with_pixels_per_mm(2.0);
        assert!((viewport.display_mm_to_model(1.0) - 0.5).abs() < f64::EPSILON);
        assert!((viewport.display_px_to_model(2.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_window_rect() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        camera.offset = Vec2::new(-100.0, 0.0);
        let viewport = Viewport::new(camera, Size::new(800.0, 600.0));
        let window = viewport.window_rect();
        assert!((window.x0 - 50.0).abs() < 1e-9);
        assert!((window.x1 - 450.0).abs() < 1e-9);
        assert!((window.y1 - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_redraw_request() {
        let viewport = Viewport::default();
        assert!(!viewport.take_redraw());
        viewport.request_redraw();
        assert!(viewport.take_redraw());
        assert!(!viewport.take_redraw());
    }
}
