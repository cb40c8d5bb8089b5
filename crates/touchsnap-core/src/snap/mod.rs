//! Interactive snapping.
//!
//! A [`Snapper`] moves a raw pointer position onto nearby geometry: control
//! points, intersections, perpendicular feet, outlines and grid lines, or
//! aligns it horizontally/vertically with the previous point of the line
//! being drawn. Every call scans the whole document once; the outcome is
//! kept in the snapper until the next call so a tool can query what
//! happened and draw feedback.

mod align;
mod candidate;
mod context;
mod cross;
mod grid;
mod handle;
mod kind;
mod near;
mod perp;
mod resolve;
mod scan;
#[cfg(test)]
mod test_support;

pub use candidate::{SlotMask, SnapAnchor, SnapCandidates, SnapItem};
pub use kind::{SnapClass, SnapKind};
pub use resolve::{SnapState, SnappedHandle, SnappedPoint};

use crate::canvas::CanvasDocument;
use crate::config::SnapOptions;
use crate::shapes::{Shape, ShapeId};
use crate::view::SnapHost;
use context::SnapContext;
use kurbo::Point;

/// The shape a tool is currently drawing or editing.
#[derive(Debug, Clone, Copy)]
pub struct ActiveShape<'a> {
    pub shape: &'a Shape,
    /// Not yet part of the document (being drawn).
    pub is_new: bool,
}

impl<'a> ActiveShape<'a> {
    /// A shape under construction.
    pub fn drawing(shape: &'a Shape) -> Self {
        Self { shape, is_new: true }
    }

    /// A document shape being moved or reshaped.
    pub fn existing(shape: &'a Shape) -> Self {
        Self { shape, is_new: false }
    }
}

/// Input of one snap call.
#[derive(Debug, Clone, Copy)]
pub struct SnapRequest<'a> {
    /// Raw pointer position in model coordinates.
    pub point: Point,
    pub active: Option<ActiveShape<'a>>,
    /// Control point of the active shape following the pointer.
    pub hot_handle: Option<usize>,
    /// Control point of the active shape excluded from matching.
    pub ignore_handle: Option<usize>,
    /// Shapes excluded from matching; defaults to the active shape.
    pub ignore_ids: Option<&'a [ShapeId]>,
}

impl<'a> SnapRequest<'a> {
    pub fn new(point: Point) -> Self {
        Self {
            point,
            active: None,
            hot_handle: None,
            ignore_handle: None,
            ignore_ids: None,
        }
    }

    pub fn with_active(mut self, active: ActiveShape<'a>) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_hot_handle(mut self, index: usize) -> Self {
        self.hot_handle = Some(index);
        self
    }

    pub fn with_ignore_handle(mut self, index: usize) -> Self {
        self.ignore_handle = Some(index);
        self
    }

    pub fn with_ignore_ids(mut self, ids: &'a [ShapeId]) -> Self {
        self.ignore_ids = Some(ids);
        self
    }
}

/// Snap engine for one view. Holds the options and the outcome of the
/// last call.
#[derive(Debug, Clone, Default)]
pub struct Snapper {
    options: SnapOptions,
    state: SnapState,
}

impl Snapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SnapOptions) -> Self {
        Self {
            options,
            state: SnapState::default(),
        }
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SnapOptions) {
        self.options = options;
    }

    /// Snap `request.point` against `document`.
    ///
    /// When a whole existing shape is being moved and one of its control
    /// points matched, the pointer is shifted by the same offset that
    /// brings that control point onto its match.
    pub fn snap_point(&mut self, host: &dyn SnapHost, document: &CanvasDocument, request: &SnapRequest<'_>) -> Point {
        let ctx = SnapContext::new(host, document, &self.options, request);
        let mut slots = SnapCandidates::new(ctx.pointer, ctx.point_tol, ctx.axis_tol);

        let mut improved = SlotMask::empty();
        if let Some(reference) = ctx.alignment_reference() {
            let mut aligned = ctx.pointer;
            improved |= align::align_to_previous(reference, &mut aligned, &mut slots);
        }
        improved |= scan::scan(&ctx, &mut slots);
        self.state.resolve(ctx.pointer, &slots);

        let result = if ctx.relocating && improved.contains(SlotMask::POINT) {
            ctx.pointer + (slots.point.point - slots.point.base)
        } else {
            self.state.point
        };
        log::debug!(
            "snap {:?} -> {:?} ({:?}, {:?}, improved {:?})",
            ctx.pointer,
            result,
            self.state.kind[0],
            self.state.kind[1],
            improved
        );
        result
    }

    pub fn state(&self) -> &SnapState {
        &self.state
    }

    pub fn snapped_type(&self) -> SnapKind {
        self.state.snapped_type()
    }

    pub fn snapped_point(&self) -> SnappedPoint {
        self.state.snapped_point()
    }

    pub fn snapped_handle(&self) -> Option<SnappedHandle> {
        self.state.snapped_handle()
    }

    /// Drop the snap feedback, asking the host to redraw if there was any.
    pub fn clear_snap(&mut self, host: &dyn SnapHost) -> bool {
        let cleared = self.state.clear();
        if cleared {
            host.request_redraw();
        }
        cleared
    }
}
