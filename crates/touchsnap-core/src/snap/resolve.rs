//! Resolved snap state and the queries a tool asks after a call.

use super::{SnapAnchor, SnapCandidates, SnapKind};
use crate::shapes::ShapeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Outcome of the most recent `snap_point` call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapState {
    /// Snapped position.
    pub point: Point,
    /// Reference points per axis; index 0 doubles as the point-snap base.
    pub base: [Point; 2],
    /// Point-snap or X-axis kind, then Y-axis kind.
    pub kind: [SnapKind; 2],
    pub shape_id: Option<ShapeId>,
    pub target: Option<SnapAnchor>,
    pub source: Option<SnapAnchor>,
    pub start_point: Option<Point>,
}

/// Where a snap came from and went to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnappedPoint {
    pub base: Point,
    pub target: Point,
    pub kind: SnapKind,
}

/// Concrete shape match of a point snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnappedHandle {
    pub shape_id: ShapeId,
    /// Anchor on the matched shape.
    pub target: Option<SnapAnchor>,
    /// Anchor on the moving shape.
    pub source: Option<SnapAnchor>,
}

impl SnapState {
    /// Fold the slots of a finished scan into the state.
    ///
    /// A point snap decides alone. Otherwise each axis replaces one
    /// coordinate of `point` and no shape is reported.
    pub(crate) fn resolve(&mut self, point: Point, slots: &SnapCandidates) {
        let matched = &slots.point;
        if matched.is_matched() {
            self.point = matched.point;
            self.base[0] = matched.base;
            self.kind = [matched.kind, SnapKind::None];
            self.shape_id = matched.shape_id;
            self.target = matched.target;
            self.source = matched.source;
            self.start_point = matched.start_point;
            return;
        }

        self.point = point;
        self.base = [point, point];
        self.shape_id = None;
        self.target = None;
        self.source = None;
        self.start_point = None;

        self.kind[0] = slots.x_axis.kind;
        if slots.x_axis.is_matched() {
            self.point.x = slots.x_axis.point.x;
            self.base[0] = slots.x_axis.base;
        }
        self.kind[1] = slots.y_axis.kind;
        if slots.y_axis.is_matched() {
            self.point.y = slots.y_axis.point.y;
            self.base[1] = slots.y_axis.base;
        }
    }

    /// Kind to report: a control-point, construction or nearest match, or
    /// `Grid` when both axes sit on grid lines.
    pub fn snapped_type(&self) -> SnapKind {
        match self.kind {
            [kind, _] if kind.is_point_snap() => kind,
            [SnapKind::GridX, SnapKind::GridY] => SnapKind::Grid,
            _ => SnapKind::None,
        }
    }

    pub fn snapped_point(&self) -> SnappedPoint {
        SnappedPoint {
            base: self.base[0],
            target: self.point,
            kind: self.snapped_type(),
        }
    }

    pub fn snapped_handle(&self) -> Option<SnappedHandle> {
        self.shape_id.map(|shape_id| SnappedHandle {
            shape_id,
            target: self.target,
            source: self.source,
        })
    }

    /// Forget the kinds. Returns whether anything was active.
    pub fn clear(&mut self) -> bool {
        if self.kind == [SnapKind::None; 2] {
            return false;
        }
        self.kind = [SnapKind::None; 2];
        true
    }
}
