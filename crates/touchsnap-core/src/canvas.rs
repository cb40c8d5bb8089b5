//! Canvas document: the shape collection the snapper scans.

use crate::geometry;
use crate::shapes::{Shape, ShapeId};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A canvas document containing all shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add a shape to the document and return its id.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> ShapeId {
        let shape = shape.into();
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
        id
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// First shape in z-order whose outline passes through `rect`, skipping
    /// the ids in `skip` and shapes flagged as non-snappable.
    pub fn shape_crossing_box(&self, rect: Rect, skip: &[ShapeId]) -> Option<&Shape> {
        let center = rect.center();
        let reach = rect.width().max(rect.height()) / 2.0;
        self.shapes_ordered().find(|shape| {
            shape.is_snappable()
                && !skip.contains(&shape.id())
                && geometry::rects_overlap(&shape.bounds(), &rect)
                && shape
                    .hit_test(center, reach)
                    .is_some_and(|hit| geometry::rect_contains(&rect, hit.nearest))
        })
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromIterator<Shape> for CanvasDocument {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        let mut doc = Self::new();
        for shape in iter {
            doc.add_shape(shape);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Line, Rectangle, ShapeFlags};
    use kurbo::Point;

    #[test]
    fn test_document_creation() {
        let doc = CanvasDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_add_shape() {
        let mut doc = CanvasDocument::new();
        let id = doc.add_shape(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0));

        assert_eq!(doc.len(), 1);
        assert!(doc.get_shape(id).is_some());
        assert_eq!(doc.z_order, vec![id]);
    }

    #[test]
    fn test_re_adding_keeps_single_z_entry() {
        let mut doc = CanvasDocument::new();
        let rect = Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0);
        let id = doc.add_shape(rect.clone());
        doc.add_shape(rect);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.z_order, vec![id]);
    }

    #[test]
    fn test_z_order() {
        let mut doc = CanvasDocument::new();
        let id1 = doc.add_shape(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0));
        let id2 = doc.add_shape(Ellipse::new(Point::new(50.0, 50.0), 30.0, 30.0));

        let ordered: Vec<ShapeId> = doc.shapes_ordered().map(|s| s.id()).collect();
        assert_eq!(ordered, vec![id1, id2]);
    }

    #[test]
    fn test_shape_crossing_box() {
        let mut doc = CanvasDocument::new();
        let wall = doc.add_shape(Line::new(Point::new(10.0, -50.0), Point::new(10.0, 50.0)));
        let other = doc.add_shape(Line::new(Point::new(20.0, -50.0), Point::new(20.0, 50.0)));

        let zone = geometry::square_around(Point::new(10.5, 0.0), 1.0);
        assert_eq!(doc.shape_crossing_box(zone, &[]).map(|s| s.id()), Some(wall));
        assert!(doc.shape_crossing_box(zone, &[wall]).is_none());

        let zone = geometry::square_around(Point::new(19.5, 0.0), 1.0);
        assert_eq!(doc.shape_crossing_box(zone, &[]).map(|s| s.id()), Some(other));
    }

    #[test]
    fn test_shape_crossing_box_skips_no_snap() {
        let mut doc = CanvasDocument::new();
        let mut line: Shape = Line::new(Point::new(0.0, -5.0), Point::new(0.0, 5.0)).into();
        line.set_flags(ShapeFlags::NO_SNAP);
        doc.add_shape(line);
        let zone = geometry::square_around(Point::ZERO, 1.0);
        assert!(doc.shape_crossing_box(zone, &[]).is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = CanvasDocument::new();
        let id = doc.add_shape(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        let json = doc.to_json().unwrap();
        let back = CanvasDocument::from_json(&json).unwrap();
        assert_eq!(back.z_order, vec![id]);
        assert!(back.get_shape(id).is_some());
    }

    #[test]
    fn test_from_iterator_keeps_order() {
        let shapes: Vec<Shape> = vec![
            Line::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).into(),
            Rectangle::new(Point::new(0.0, 0.0), 1.0, 1.0).into(),
        ];
        let ids: Vec<ShapeId> = shapes.iter().map(Shape::id).collect();
        let doc: CanvasDocument = shapes.into_iter().collect();
        assert_eq!(doc.z_order, ids);
    }
}
