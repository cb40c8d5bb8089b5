use crate::view::{Camera, Viewport};
use kurbo::{Size, Vec2};

/// Host where 1 display mm is 0.25 model units and the window spans
/// (-125, -125) to (125, 125).
pub(crate) fn host() -> Viewport {
    let camera = Camera {
        offset: Vec2::new(500.0, 500.0),
        zoom: 4.0,
        ..Camera::default()
    };
    Viewport::new(camera, Size::new(1000.0, 1000.0)).with_pixels_per_mm(1.0)
}
