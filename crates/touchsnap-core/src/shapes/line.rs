//! Line and polyline shape.

use super::{Handle, HandleKind, ShapeFlags, ShapeId, ShapeTrait, new_id};
use crate::geometry::{self, OutlineHit};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Path style for lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStyle {
    /// Straight line segments (sharp corners).
    #[default]
    Direct,
    /// Smooth bezier curves through points.
    Flowing,
}

/// A line segment, polyline or polygon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Intermediate points (for polylines/curves).
    #[serde(default)]
    pub intermediate_points: Vec<Point>,
    /// Whether the last point connects back to the start.
    #[serde(default)]
    pub closed: bool,
    /// Path style (Direct, Flowing).
    #[serde(default)]
    pub path_style: PathStyle,
    #[serde(default)]
    pub(crate) flags: ShapeFlags,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: new_id(),
            start,
            end,
            intermediate_points: Vec::new(),
            closed: false,
            path_style: PathStyle::Direct,
            flags: ShapeFlags::empty(),
        }
    }

    /// Create a polyline from multiple points.
    pub fn from_points(points: Vec<Point>, path_style: PathStyle) -> Self {
        let start = points.first().copied().unwrap_or(Point::ZERO);
        let end = points.last().copied().unwrap_or(Point::ZERO);
        let intermediate_points = if points.len() > 2 {
            points[1..points.len() - 1].to_vec()
        } else {
            Vec::new()
        };
        Self {
            id: new_id(),
            start,
            end,
            intermediate_points,
            closed: false,
            path_style,
            flags: ShapeFlags::empty(),
        }
    }

    /// Create a closed polygon from its vertices.
    pub fn polygon(points: Vec<Point>) -> Self {
        let mut line = Self::from_points(points, PathStyle::Direct);
        line.closed = true;
        line
    }

    /// Get all points including start, intermediate, and end.
    pub fn all_points(&self) -> Vec<Point> {
        let mut pts = vec![self.start];
        pts.extend(&self.intermediate_points);
        pts.push(self.end);
        pts
    }

    /// Move the last point (the one following the pointer while drawing).
    pub fn set_end(&mut self, end: Point) {
        self.end = end;
    }

    /// Commit the current end point and start a new segment from it.
    pub fn push_point(&mut self, point: Point) {
        self.intermediate_points.push(self.end);
        self.end = point;
    }

    /// Get the length of the path.
    pub fn length(&self) -> f64 {
        self.all_points().windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    fn edges(&self) -> Vec<(Point, Point)> {
        let points = self.all_points();
        let mut edges: Vec<_> = points.windows(2).map(|w| (w[0], w[1])).collect();
        if self.closed && points.len() > 2 {
            edges.push((self.end, self.start));
        }
        edges
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn flags(&self) -> ShapeFlags {
        self.flags
    }

    fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.all_points())
    }

    fn points(&self) -> Vec<Point> {
        self.all_points()
    }

    fn handles(&self) -> Vec<Handle> {
        let mut handles: Vec<Handle> = self
            .all_points()
            .into_iter()
            .map(|p| Handle::new(p, HandleKind::Vertex))
            .collect();
        if self.path_style == PathStyle::Direct {
            for (a, b) in self.edges() {
                handles.push(Handle::new(a.midpoint(b), HandleKind::Midpoint));
            }
        }
        handles
    }

    fn is_curve(&self) -> bool {
        self.path_style == PathStyle::Flowing
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> Option<OutlineHit> {
        match self.path_style {
            PathStyle::Direct => geometry::polyline_hit(&self.all_points(), self.closed, point, tolerance),
            PathStyle::Flowing => geometry::path_hit(&self.to_path(), point, tolerance),
        }
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let points = self.all_points();

        if points.len() < 2 || (points.len() == 2 && self.start == self.end) {
            return path;
        }

        path.move_to(points[0]);

        match self.path_style {
            PathStyle::Direct => {
                for p in &points[1..] {
                    path.line_to(*p);
                }
            }
            PathStyle::Flowing => {
                // Catmull-Rom spline converted to cubic bezier
                let tension = 0.5;
                for i in 0..points.len() - 1 {
                    let p0 = points[if i == 0 { 0 } else { i - 1 }];
                    let p1 = points[i];
                    let p2 = points[i + 1];
                    let p3 = points[(i + 2).min(points.len() - 1)];

                    let cp1 = p1 + (p2 - p0) * (tension / 3.0);
                    let cp2 = p2 - (p3 - p1) * (tension / 3.0);

                    path.curve_to(cp1, cp2, p2);
                }
            }
        }
        if self.closed {
            path.close_path();
        }
        path
    }
}
