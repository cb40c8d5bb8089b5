//! Rectangle shape.

use super::{Handle, HandleKind, ShapeFlags, ShapeId, ShapeTrait, new_id};
use crate::geometry::{self, OutlineHit};
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A rectangle, optionally rotated around its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    /// Top-left corner position (before rotation).
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Rotation angle in radians (around center).
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub(crate) flags: ShapeFlags,
}

impl Rectangle {
    /// Distance of the rotation knob above the top edge, in model units.
    pub const ROTATE_HANDLE_OFFSET: f64 = 20.0;

    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: new_id(),
            position,
            width,
            height,
            rotation: 0.0,
            flags: ShapeFlags::empty(),
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let width = (p2.x - p1.x).abs();
        let height = (p2.y - p1.y).abs();

        Self::new(Point::new(min_x, min_y), width, height)
    }

    /// Get the unrotated rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Get the center point.
    pub fn center(&self) -> Point {
        self.as_rect().center()
    }

    fn rotation_transform(&self) -> Affine {
        if self.rotation == 0.0 {
            return Affine::IDENTITY;
        }
        Affine::rotate_about(self.rotation, self.center())
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.as_rect();
        let xf = self.rotation_transform();
        [
            xf * Point::new(r.x0, r.y0),
            xf * Point::new(r.x1, r.y0),
            xf * Point::new(r.x1, r.y1),
            xf * Point::new(r.x0, r.y1),
        ]
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn flags(&self) -> ShapeFlags {
        self.flags
    }

    fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.corners())
    }

    fn points(&self) -> Vec<Point> {
        self.corners().to_vec()
    }

    fn handles(&self) -> Vec<Handle> {
        let corners = self.corners();
        let mut handles: Vec<Handle> = corners.iter().map(|&p| Handle::new(p, HandleKind::Vertex)).collect();
        for i in 0..4 {
            handles.push(Handle::new(corners[i].midpoint(corners[(i + 1) % 4]), HandleKind::Midpoint));
        }
        handles.push(Handle::new(self.center(), HandleKind::Center));
        let r = self.as_rect();
        let knob = self.rotation_transform() * Point::new(r.center().x, r.y0 - Self::ROTATE_HANDLE_OFFSET);
        handles.push(Handle::new(knob, HandleKind::Outside).fixed());
        handles
    }

    fn is_curve(&self) -> bool {
        false
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> Option<OutlineHit> {
        geometry::polyline_hit(&self.corners(), true, point, tolerance)
    }

    fn to_path(&self) -> BezPath {
        let corners = self.corners();
        let mut path = BezPath::new();
        path.move_to(corners[0]);
        for p in &corners[1..] {
            path.line_to(*p);
        }
        path.close_path();
        path
    }
}
