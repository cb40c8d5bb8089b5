//! Candidate slots accumulated over a scan.

use super::SnapKind;
use crate::shapes::ShapeId;
use bitflags::bitflags;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What a snap refers to on the matched or the moving shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapAnchor {
    /// Control point index.
    Handle(usize),
    /// Outline segment index.
    Segment(usize),
    /// Another shape (intersection partner, perpendicular neighbour).
    Shape(ShapeId),
}

/// Best candidate found so far for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapItem {
    /// Snapped position.
    pub point: Point,
    /// Reference point that moves onto `point`.
    pub base: Point,
    /// Start of the line being drawn, for perpendicular snaps.
    pub start_point: Option<Point>,
    /// Tolerance the slot was opened with.
    pub max_tolerance: f64,
    /// Score of the current candidate; only ever decreases.
    pub distance: f64,
    pub kind: SnapKind,
    pub shape_id: Option<ShapeId>,
    /// Anchor on the matched shape.
    pub target: Option<SnapAnchor>,
    /// Anchor on the moving shape.
    pub source: Option<SnapAnchor>,
}

impl SnapItem {
    pub fn new(point: Point, tolerance: f64) -> Self {
        Self {
            point,
            base: point,
            start_point: None,
            max_tolerance: tolerance,
            distance: tolerance,
            kind: SnapKind::None,
            shape_id: None,
            target: None,
            source: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.kind.is_matched()
    }

    /// Replace the candidate. Anchors are reset and must be set by the caller.
    pub(crate) fn record(&mut self, kind: SnapKind, distance: f64, base: Point, point: Point) -> &mut Self {
        log::trace!("{kind:?} candidate {point:?} from {base:?} (distance {distance:.4})");
        self.kind = kind;
        self.distance = distance;
        self.base = base;
        self.point = point;
        self.start_point = None;
        self.shape_id = None;
        self.target = None;
        self.source = None;
        self
    }

    pub(crate) fn on_shape(&mut self, id: ShapeId) -> &mut Self {
        self.shape_id = Some(id);
        self
    }

    pub(crate) fn with_target(&mut self, target: Option<SnapAnchor>) -> &mut Self {
        self.target = target;
        self
    }

    pub(crate) fn with_source(&mut self, source: Option<SnapAnchor>) -> &mut Self {
        self.source = source;
        self
    }
}

bitflags! {
    /// Slots improved by a generator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SlotMask: u8 {
        const POINT = 1;
        const AXIS_X = 1 << 1;
        const AXIS_Y = 1 << 2;
    }
}

/// The three slots of a scan: a combined point snap and two independent axes.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapCandidates {
    pub point: SnapItem,
    /// Vertical guide / grid column.
    pub x_axis: SnapItem,
    /// Horizontal guide / grid row.
    pub y_axis: SnapItem,
}

impl SnapCandidates {
    pub fn new(pointer: Point, point_tolerance: f64, axis_tolerance: f64) -> Self {
        Self {
            point: SnapItem::new(pointer, point_tolerance),
            x_axis: SnapItem::new(pointer, axis_tolerance),
            y_axis: SnapItem::new(pointer, axis_tolerance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_is_open() {
        let slot = SnapItem::new(Point::new(1.0, 2.0), 0.5);
        assert!(!slot.is_matched());
        assert!((slot.distance - slot.max_tolerance).abs() < f64::EPSILON);
        assert_eq!(slot.base, slot.point);
    }

    #[test]
    fn test_record_resets_anchors() {
        let mut slot = SnapItem::new(Point::ZERO, 1.0);
        slot.record(SnapKind::Point, 0.2, Point::ZERO, Point::new(0.2, 0.0))
            .with_target(Some(SnapAnchor::Handle(3)));
        slot.start_point = Some(Point::ZERO);

        slot.record(SnapKind::Near, 0.1, Point::ZERO, Point::new(0.1, 0.0));
        assert_eq!(slot.kind, SnapKind::Near);
        assert!(slot.target.is_none());
        assert!(slot.start_point.is_none());
        assert!((slot.max_tolerance - 1.0).abs() < f64::EPSILON);
    }
}
