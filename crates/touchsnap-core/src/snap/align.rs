//! Horizontal/vertical alignment with the previous point of a line being drawn.

use super::{SlotMask, SnapCandidates, SnapKind};
use crate::geometry::EPSILON;
use kurbo::Point;

/// Lock `point` to the X and/or Y coordinate of `reference`.
///
/// X is tested first and the Y test sees the X-adjusted point. A slot takes
/// the alignment when it is closer by more than epsilon, or tied and closer
/// on the other axis than the slot's current base.
pub(crate) fn align_to_previous(reference: Point, point: &mut Point, slots: &mut SnapCandidates) -> SlotMask {
    let mut mask = SlotMask::empty();

    let dx = (point.x - reference.x).abs();
    let d = slots.x_axis.distance - dx;
    if d > EPSILON || (d > -EPSILON && (point.y - reference.y).abs() < (point.y - slots.x_axis.base.y).abs()) {
        point.x = reference.x;
        slots.x_axis.record(SnapKind::SameX, dx, reference, *point);
        mask |= SlotMask::AXIS_X;
    }

    let dy = (point.y - reference.y).abs();
    let d = slots.y_axis.distance - dy;
    if d > EPSILON || (d > -EPSILON && (point.x - reference.x).abs() < (point.x - slots.y_axis.base.x).abs()) {
        point.y = reference.y;
        slots.y_axis.record(SnapKind::SameY, dy, reference, *point);
        mask |= SlotMask::AXIS_Y;
    }

    mask
}
