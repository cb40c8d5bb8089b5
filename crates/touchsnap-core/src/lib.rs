//! TouchSnap Core Library
//!
//! Geometric snapping for interactive 2D vector drawing: a shape model, a
//! document to snap against, the view services the snapper needs and the
//! snap engine itself.

pub mod canvas;
pub mod config;
pub mod geometry;
pub mod shapes;
pub mod snap;
pub mod view;

pub use canvas::CanvasDocument;
pub use config::{ConfigError, SnapOptions};
pub use shapes::{Ellipse, Freehand, Grid, Line, Rectangle, Shape, ShapeFlags, ShapeId};
pub use snap::{ActiveShape, SnapAnchor, SnapKind, SnapRequest, SnappedHandle, SnappedPoint, Snapper};
pub use view::{Camera, SnapHost, Viewport};
