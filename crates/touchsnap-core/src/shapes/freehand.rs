//! Freehand drawing shape.

use super::{Handle, HandleKind, ShapeFlags, ShapeId, ShapeTrait, new_id};
use crate::geometry::{self, OutlineHit};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A freehand drawing (series of points).
///
/// Its sample points are exposed as handles but never matched as snap targets;
/// only its outline takes part in nearest-boundary and intersection snapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Freehand {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    /// Points in the freehand path.
    pub points: Vec<Point>,
    #[serde(default)]
    pub(crate) flags: ShapeFlags,
}

impl Freehand {
    /// Create a new empty freehand shape.
    pub fn new() -> Self {
        Self::from_points(Vec::new())
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: new_id(),
            points,
            flags: ShapeFlags::empty(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Freehand {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn flags(&self) -> ShapeFlags {
        self.flags
    }

    fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.points)
    }

    fn points(&self) -> Vec<Point> {
        self.points.clone()
    }

    fn handles(&self) -> Vec<Handle> {
        self.points.iter().map(|&p| Handle::new(p, HandleKind::Vertex)).collect()
    }

    fn is_curve(&self) -> bool {
        true
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> Option<OutlineHit> {
        geometry::polyline_hit(&self.points, false, point, tolerance)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        if self.points.is_empty() {
            return path;
        }

        path.move_to(self.points[0]);
        for point in self.points.iter().skip(1) {
            path.line_to(*point);
        }

        path
    }
}
