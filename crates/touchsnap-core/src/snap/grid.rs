//! Grid matcher.

use super::context::SnapContext;
use super::{SlotMask, SnapAnchor, SnapCandidates, SnapKind};
use crate::geometry::EPSILON;
use crate::shapes::{GridAxes, Shape};
use kurbo::Vec2;

/// Align the pointer to grid lines per axis and, when relocating, move a
/// handle of the active shape onto a grid crossing.
pub(crate) fn snap_grid(ctx: &SnapContext<'_>, candidate: &Shape, slots: &mut SnapCandidates) -> SlotMask {
    let Some(grid) = candidate.as_grid() else {
        return SlotMask::empty();
    };
    let mut mask = SlotMask::empty();

    let snap = grid.snap(ctx.pointer, Vec2::new(slots.x_axis.distance, slots.y_axis.distance));
    if snap.axes.contains(GridAxes::X) {
        slots.x_axis.record(SnapKind::GridX, snap.dist.x, snap.point, snap.point)
            .on_shape(candidate.id());
        mask |= SlotMask::AXIS_X;
    }
    if snap.axes.contains(GridAxes::Y) {
        slots.y_axis.record(SnapKind::GridY, snap.dist.y, snap.point, snap.point)
            .on_shape(candidate.id());
        mask |= SlotMask::AXIS_Y;
    }

    for &(own, position) in &ctx.movable_handles {
        let tolerance = Vec2::new(
            slots.point.distance.min(slots.x_axis.distance),
            slots.point.distance.min(slots.y_axis.distance),
        );
        let snap = grid.snap(position, tolerance);
        let distance = snap.point.distance(position);
        if snap.is_full() && distance < slots.point.distance + EPSILON {
            slots.point.record(SnapKind::Grid, distance, position, snap.point)
                .on_shape(candidate.id())
                .with_source(Some(SnapAnchor::Handle(own)));
            mask |= SlotMask::POINT;
        }
    }
    mask
}
