//! Nearest-boundary matcher.

use super::context::SnapContext;
use super::{SnapAnchor, SnapItem, SnapKind};
use crate::shapes::Shape;

/// Snap to the nearest outline point of `candidate`.
///
/// Matches keep their raw distance. Against an earlier nearest point a new
/// one must be closer by more than the near bias, which keeps the marker from
/// jumping between outlines that run close together.
pub(crate) fn snap_nearest(ctx: &SnapContext<'_>, candidate: &Shape, slot: &mut SnapItem) -> bool {
    if slot.kind.blocks_near() {
        return false;
    }

    let mut found = false;
    for (own, reference) in ctx.references() {
        let Some(hit) = candidate.hit_test(reference, ctx.near_tol) else {
            continue;
        };
        let threshold = match slot.kind {
            SnapKind::Near => slot.distance - ctx.near_bias,
            _ => slot.distance,
        };
        if hit.distance < threshold {
            slot.record(SnapKind::Near, hit.distance, reference, hit.nearest)
                .on_shape(candidate.id())
                .with_target(Some(SnapAnchor::Segment(hit.segment)))
                .with_source(own.map(SnapAnchor::Handle));
            found = true;
        }
    }
    found
}
