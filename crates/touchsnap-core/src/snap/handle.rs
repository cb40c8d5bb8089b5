//! Control-point matcher.

use super::context::SnapContext;
use super::{SnapAnchor, SnapItem, SnapKind};
use crate::geometry::EPSILON;
use crate::shapes::{HandleKind, Shape};

/// Strictly closer, or tied with an incumbent that is not itself a control
/// point. Earlier control-point matches survive ties.
fn improves(slot: &SnapItem, distance: f64) -> bool {
    distance < slot.distance - EPSILON || (distance < slot.distance + EPSILON && !slot.kind.is_handle())
}

/// Match the control points of `candidate` against the pointer, or against
/// every movable handle of the active shape when relocating it.
pub(crate) fn snap_handles(ctx: &SnapContext<'_>, candidate: &Shape, slot: &mut SnapItem) -> bool {
    if candidate.is_freeform() {
        return false;
    }

    let mut found = false;
    for (i, handle) in candidate.handles().iter().enumerate() {
        let Some(kind) = SnapKind::from_handle(handle.kind) else {
            continue;
        };
        let penalty = if handle.kind == HandleKind::Midpoint {
            ctx.midpoint_penalty
        } else {
            0.0
        };

        let distance = handle.position.distance(ctx.pointer) + penalty;
        if ctx.drag_mode && improves(slot, distance) && ctx.first_point != Some(handle.position) {
            slot.record(kind, distance, ctx.pointer, handle.position)
                .on_shape(candidate.id())
                .with_target(Some(SnapAnchor::Handle(i)))
                .with_source(ctx.ignore_handle.map(SnapAnchor::Handle));
            found = true;
        }

        for &(own, position) in &ctx.movable_handles {
            let distance = handle.position.distance(position) + penalty;
            if improves(slot, distance) {
                slot.record(kind, distance, position, handle.position)
                    .on_shape(candidate.id())
                    .with_target(Some(SnapAnchor::Handle(i)))
                    .with_source(Some(SnapAnchor::Handle(own)));
                found = true;
            }
        }
    }
    found
}
