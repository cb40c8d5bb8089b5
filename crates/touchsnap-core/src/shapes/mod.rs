//! Shape definitions consumed by the snapping engine.

mod ellipse;
mod freehand;
mod grid;
mod line;
mod rectangle;

pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use grid::{Grid, GridAxes, GridSnap};
pub use line::{Line, PathStyle};
pub use rectangle::Rectangle;

pub use crate::geometry::OutlineHit;

use bitflags::bitflags;
use kurbo::{BezPath, Circle, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

bitflags! {
    /// Per-shape behaviour flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ShapeFlags: u32 {
        /// The shape is never used as a snap target.
        const NO_SNAP = 1;
    }
}

/// Role of a control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// A defining vertex (corner, endpoint).
    Vertex,
    /// The center of a shape.
    Center,
    /// The midpoint of an edge.
    Midpoint,
    /// A quadrant point of an ellipse.
    Quadrant,
    /// A marker outside the geometry (e.g. a rotation knob); never matched.
    Outside,
}

/// A control point of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in model coordinates.
    pub position: Point,
    /// Handle role.
    pub kind: HandleKind,
    /// Fixed handles never act as a relocation anchor.
    pub fixed: bool,
}

impl Handle {
    /// Create a new movable handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self {
            position,
            kind,
            fixed: false,
        }
    }

    /// Mark the handle as fixed.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the behaviour flags.
    fn flags(&self) -> ShapeFlags;

    /// Get the bounding box in model coordinates.
    fn bounds(&self) -> Rect;

    /// Defining points (polyline vertices, rectangle corners, ...).
    fn points(&self) -> Vec<Point>;

    /// Control points in index order.
    fn handles(&self) -> Vec<Handle>;

    /// Whether the outline contains curved segments.
    fn is_curve(&self) -> bool;

    /// Whether the outline is closed.
    fn is_closed(&self) -> bool;

    /// Nearest outline point within `tolerance`.
    fn hit_test(&self, point: Point, tolerance: f64) -> Option<OutlineHit>;

    /// Get the outline path.
    fn to_path(&self) -> BezPath;
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Freehand(Freehand),
    Grid(Grid),
}

macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            Shape::Line($s) => $body,
            Shape::Rectangle($s) => $body,
            Shape::Ellipse($s) => $body,
            Shape::Freehand($s) => $body,
            Shape::Grid($s) => $body,
        }
    };
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        dispatch!(self, s => s.id())
    }

    pub fn flags(&self) -> ShapeFlags {
        dispatch!(self, s => s.flags())
    }

    pub fn bounds(&self) -> Rect {
        dispatch!(self, s => s.bounds())
    }

    pub fn points(&self) -> Vec<Point> {
        dispatch!(self, s => s.points())
    }

    /// Number of defining points.
    pub fn point_count(&self) -> usize {
        self.points().len()
    }

    pub fn handles(&self) -> Vec<Handle> {
        dispatch!(self, s => s.handles())
    }

    /// Number of control points.
    pub fn handle_count(&self) -> usize {
        self.handles().len()
    }

    /// Position of a control point, if the index is valid.
    pub fn handle_point(&self, index: usize) -> Option<Point> {
        self.handles().get(index).map(|h| h.position)
    }

    pub fn is_curve(&self) -> bool {
        dispatch!(self, s => s.is_curve())
    }

    pub fn is_closed(&self) -> bool {
        dispatch!(self, s => s.is_closed())
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<OutlineHit> {
        dispatch!(self, s => s.hit_test(point, tolerance))
    }

    pub fn to_path(&self) -> BezPath {
        dispatch!(self, s => s.to_path())
    }

    /// Check if the shape takes part in snapping.
    pub fn is_snappable(&self) -> bool {
        !self.flags().contains(ShapeFlags::NO_SNAP)
    }

    /// Set or clear behaviour flags.
    pub fn set_flags(&mut self, flags: ShapeFlags) {
        match self {
            Shape::Line(s) => s.flags = flags,
            Shape::Rectangle(s) => s.flags = flags,
            Shape::Ellipse(s) => s.flags = flags,
            Shape::Freehand(s) => s.flags = flags,
            Shape::Grid(s) => s.flags = flags,
        }
    }

    /// Check if this shape is a straight line or polyline.
    pub fn is_polyline(&self) -> bool {
        matches!(self, Shape::Line(line) if line.path_style == PathStyle::Direct)
    }

    /// Check if this shape is box-based (rectangle, ellipse, grid).
    pub fn is_rect_like(&self) -> bool {
        matches!(self, Shape::Rectangle(_) | Shape::Ellipse(_) | Shape::Grid(_))
    }

    /// Check if this shape is a free-form curve whose control points are not matchable.
    pub fn is_freeform(&self) -> bool {
        matches!(self, Shape::Freehand(_))
    }

    /// Get the grid if this shape is a grid.
    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Shape::Grid(g) => Some(g),
            _ => None,
        }
    }

    /// Get the circle if this shape is a circular primitive.
    pub fn as_circle(&self) -> Option<Circle> {
        match self {
            Shape::Ellipse(e) => e.as_circle(),
            _ => None,
        }
    }
}

impl From<Line> for Shape {
    fn from(s: Line) -> Self {
        Shape::Line(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Shape::Rectangle(s)
    }
}

impl From<Ellipse> for Shape {
    fn from(s: Ellipse) -> Self {
        Shape::Ellipse(s)
    }
}

impl From<Freehand> for Shape {
    fn from(s: Freehand) -> Self {
        Shape::Freehand(s)
    }
}

impl From<Grid> for Shape {
    fn from(s: Grid) -> Self {
        Shape::Grid(s)
    }
}

/// Generate a fresh shape identifier.
pub(crate) fn new_id() -> ShapeId {
    Uuid::new_v4()
}
