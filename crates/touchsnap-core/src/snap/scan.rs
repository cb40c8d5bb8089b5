//! Per-shape dispatch and the document scan.

use super::context::SnapContext;
use super::cross::snap_intersections;
use super::grid::snap_grid;
use super::handle::snap_handles;
use super::near::snap_nearest;
use super::perp::snap_perpendicular;
use super::{SlotMask, SnapCandidates};
use crate::geometry;
use crate::shapes::Shape;

/// Run the enabled generators for one shape.
pub(crate) fn snap_shape(ctx: &SnapContext<'_>, candidate: &Shape, slots: &mut SnapCandidates) -> SlotMask {
    if ctx.skips(candidate) {
        return SlotMask::empty();
    }
    let extent = candidate.bounds();
    if candidate.point_count() > 1 && extent.width() < ctx.min_box && extent.height() < ctx.min_box {
        log::trace!("shape {} too small to snap", candidate.id());
        return SlotMask::empty();
    }

    let options = ctx.options;
    let mut matched = false;
    if geometry::rects_overlap(&extent, &ctx.window_box) {
        matched |= options.snap_handle && snap_handles(ctx, candidate, &mut slots.point);
        matched |= options.snap_perp && snap_perpendicular(ctx, candidate, &mut slots.point);
        matched |= options.snap_cross && snap_intersections(ctx, candidate, &mut slots.point);
        if !matched && options.snap_near && snap_nearest(ctx, candidate, &mut slots.point) {
            return SlotMask::POINT;
        }
    }
    if matched {
        return SlotMask::POINT;
    }
    if options.snap_grid && geometry::rects_overlap(&extent, &ctx.snap_box) {
        return snap_grid(ctx, candidate, slots);
    }
    SlotMask::empty()
}

/// Offer every shape of the document to the dispatcher, in z-order.
pub(crate) fn scan(ctx: &SnapContext<'_>, slots: &mut SnapCandidates) -> SlotMask {
    if !ctx.options.snap_enabled {
        return SlotMask::empty();
    }
    ctx.document
        .shapes_ordered()
        .fold(SlotMask::empty(), |mask, shape| mask | snap_shape(ctx, shape, slots))
}
