//! Ellipse shape.

use super::{Handle, HandleKind, ShapeFlags, ShapeId, ShapeTrait, new_id};
use crate::geometry::{self, EPSILON, OutlineHit};
use kurbo::{Affine, BezPath, Circle, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An ellipse shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Rotation angle in radians (around center).
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub(crate) flags: ShapeFlags,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: new_id(),
            center,
            radius_x,
            radius_y,
            rotation: 0.0,
            flags: ShapeFlags::empty(),
        }
    }

    /// Create a circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center, (self.radius_x, self.radius_y), self.rotation)
    }

    /// Get as a circle when both radii agree.
    pub fn as_circle(&self) -> Option<Circle> {
        ((self.radius_x - self.radius_y).abs() < EPSILON).then(|| Circle::new(self.center, self.radius_x))
    }

    /// Quadrant points in order right, bottom, left, top.
    pub fn quadrants(&self) -> [Point; 4] {
        let xf = Affine::rotate(self.rotation);
        [
            self.center + (xf * Point::new(self.radius_x, 0.0)).to_vec2(),
            self.center + (xf * Point::new(0.0, self.radius_y)).to_vec2(),
            self.center + (xf * Point::new(-self.radius_x, 0.0)).to_vec2(),
            self.center + (xf * Point::new(0.0, -self.radius_y)).to_vec2(),
        ]
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn flags(&self) -> ShapeFlags {
        self.flags
    }

    fn bounds(&self) -> Rect {
        self.as_kurbo().bounding_box()
    }

    fn points(&self) -> Vec<Point> {
        let b = self.bounds();
        vec![
            Point::new(b.x0, b.y0),
            Point::new(b.x1, b.y0),
            Point::new(b.x1, b.y1),
            Point::new(b.x0, b.y1),
        ]
    }

    fn handles(&self) -> Vec<Handle> {
        let mut handles: Vec<Handle> = self
            .quadrants()
            .into_iter()
            .map(|p| Handle::new(p, HandleKind::Quadrant))
            .collect();
        handles.push(Handle::new(self.center, HandleKind::Center));
        handles
    }

    fn is_curve(&self) -> bool {
        true
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> Option<OutlineHit> {
        if let Some(circle) = self.as_circle() {
            let offset = point - circle.center;
            let len = offset.hypot();
            let distance = (len - circle.radius).abs();
            if distance > tolerance {
                return None;
            }
            let dir = if len < EPSILON { Vec2::new(1.0, 0.0) } else { offset / len };
            return Some(OutlineHit {
                nearest: circle.center + dir * circle.radius,
                distance,
                segment: 0,
            });
        }
        geometry::path_hit(&self.to_path(), point, tolerance)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(geometry::CURVE_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_creation() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        assert!((ellipse.center.x - 50.0).abs() < f64::EPSILON);
        assert!((ellipse.radius_x - 30.0).abs() < f64::EPSILON);
        assert!((ellipse.radius_y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quadrant_handles() {
        let circle = Ellipse::circle(Point::new(0.0, 0.0), 10.0);
        let handles = circle.handles();
        assert_eq!(handles.len(), 5);
        assert!((handles[0].position.x - 10.0).abs() < 1e-9);
        assert!((handles[1].position.y - 10.0).abs() < 1e-9);
        assert_eq!(handles[4].kind, HandleKind::Center);
    }

    #[test]
    fn test_rotated_quadrants() {
        let mut ellipse = Ellipse::new(Point::new(5.0, 5.0), 20.0, 10.0);
        ellipse.rotation = std::f64::consts::FRAC_PI_2;
        let [right, bottom, left, top] = ellipse.quadrants();
        assert!((right - Point::new(5.0, 25.0)).hypot() < 1e-9);
        assert!((bottom - Point::new(-5.0, 5.0)).hypot() < 1e-9);
        assert!((left - Point::new(5.0, -15.0)).hypot() < 1e-9);
        assert!((top - Point::new(15.0, 5.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_circle_hit_closed_form() {
        let circle = Ellipse::circle(Point::new(0.0, 0.0), 10.0);
        let hit = circle.hit_test(Point::new(0.0, 11.0), 2.0).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-9);
        assert!((hit.nearest.y - 10.0).abs() < 1e-9);
        assert!(circle.hit_test(Point::new(0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_ellipse_hit_on_path() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 20.0, 10.0);
        let hit = ellipse.hit_test(Point::new(21.0, 0.0), 2.0).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_bounds() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        let bounds = ellipse.bounds();
        assert!((bounds.x0 - 20.0).abs() < 1e-9);
        assert!((bounds.y0 - 30.0).abs() < 1e-9);
        assert!((bounds.x1 - 80.0).abs() < 1e-9);
        assert!((bounds.y1 - 70.0).abs() < 1e-9);
    }
}
