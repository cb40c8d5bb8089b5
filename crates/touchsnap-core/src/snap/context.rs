//! Per-call tolerances, boxes and request state shared by the generators.

use super::{ActiveShape, SnapRequest};
use crate::canvas::CanvasDocument;
use crate::config::SnapOptions;
use crate::geometry;
use crate::shapes::{Shape, ShapeId};
use crate::view::SnapHost;
use kurbo::{Point, Rect};

/// Added to the distance of midpoint handles so that vertices and
/// intersections win over them (display mm).
const MIDPOINT_PENALTY_MM: f64 = 0.5;
/// Margin a nearest-boundary match must gain over an earlier one (display mm).
const NEAR_BIAS_MM: f64 = 4.0;
/// Upper bound of the perpendicular neighbourhood box side (display mm).
const NEAR_BOX_MM: f64 = 4.0;
/// Collinearity tolerance for perpendicular snapping (display mm).
const PERP_TOLERANCE_MM: f64 = 1.0;
/// Shapes smaller than this in both dimensions are ignored (device px).
const MIN_BOX_PX: f64 = 2.0;

pub(crate) struct SnapContext<'a> {
    pub pointer: Point,
    pub document: &'a CanvasDocument,
    pub options: &'a SnapOptions,
    pub active: Option<ActiveShape<'a>>,
    pub hot_handle: Option<usize>,
    pub ignore_handle: Option<usize>,
    ignore_ids: Vec<ShapeId>,
    /// Whole-shape drag: every movable handle of the active shape is a reference.
    pub relocating: bool,
    /// The pointer itself is the moving point.
    pub drag_mode: bool,
    /// Movable handles of the active shape in descending index order; empty
    /// unless relocating.
    pub movable_handles: Vec<(usize, Point)>,
    /// First point of a new shape that already has more than one point.
    pub first_point: Option<Point>,

    pub point_tol: f64,
    pub axis_tol: f64,
    pub near_tol: f64,
    pub perp_tol: f64,
    pub midpoint_penalty: f64,
    pub near_bias: f64,
    /// Side of the perpendicular neighbourhood box; zero when nearest snapping is off.
    pub near_box_side: f64,
    pub min_box: f64,
    /// Pointer tolerance box.
    pub snap_box: Rect,
    /// Window plus the inflated active shape extent.
    pub window_box: Rect,
}

impl<'a> SnapContext<'a> {
    pub fn new(
        host: &dyn SnapHost,
        document: &'a CanvasDocument,
        options: &'a SnapOptions,
        request: &SnapRequest<'a>,
    ) -> Self {
        let pointer = request.point;
        let active = request.active;
        let handle_count = active.map_or(0, |a| a.shape.handle_count());
        let hot_handle = request.hot_handle.filter(|&h| h < handle_count);
        let ignore_handle = request.ignore_handle;

        let ignore_ids = match (request.ignore_ids, active) {
            (Some(ids), _) => ids.to_vec(),
            (None, Some(a)) => vec![a.shape.id()],
            (None, None) => Vec::new(),
        };

        let relocating = active.is_some_and(|a| {
            !a.is_new && (hot_handle.is_none() || ignore_handle.is_some_and(|i| Some(i) != hot_handle))
        });

        let drag_mode = match active {
            None => true,
            Some(a) if a.is_new => true,
            Some(a) => ignore_handle.and_then(|i| a.shape.handle_point(i)) == Some(pointer),
        };

        let movable_handles = match active {
            Some(a) if relocating => a
                .shape
                .handles()
                .iter()
                .enumerate()
                .rev()
                .filter(|&(i, h)| Some(i) != ignore_handle && !h.fixed)
                .map(|(i, h)| (i, h.position))
                .collect(),
            _ => Vec::new(),
        };

        let first_point = active
            .filter(|a| a.is_new && a.shape.point_count() > 1)
            .and_then(|a| a.shape.points().first().copied());

        let point_tol = host.display_mm_to_model(options.snap_point_tol);
        let near_tol = host.display_mm_to_model(options.snap_near_tol);
        let near_box_side = if options.snap_near {
            near_tol.min(host.display_mm_to_model(NEAR_BOX_MM))
        } else {
            0.0
        };

        let mut window_box = host.window_rect();
        if let Some(a) = active {
            window_box = window_box.union(a.shape.bounds().inflate(point_tol, point_tol));
        }

        Self {
            pointer,
            document,
            options,
            active,
            hot_handle,
            ignore_handle,
            ignore_ids,
            relocating,
            drag_mode,
            movable_handles,
            first_point,
            point_tol,
            axis_tol: host.display_mm_to_model(options.snap_x_tol),
            near_tol,
            perp_tol: host.display_mm_to_model(PERP_TOLERANCE_MM),
            midpoint_penalty: host.display_mm_to_model(MIDPOINT_PENALTY_MM),
            near_bias: host.display_mm_to_model(NEAR_BIAS_MM),
            near_box_side,
            min_box: host.display_px_to_model(MIN_BOX_PX),
            snap_box: geometry::square_around(pointer, point_tol),
            window_box,
        }
    }

    pub fn active_id(&self) -> Option<ShapeId> {
        self.active.map(|a| a.shape.id())
    }

    /// Previous point of a new straight shape, used for axis alignment.
    pub fn alignment_reference(&self) -> Option<Point> {
        let active = self.active.filter(|a| a.is_new)?;
        let hot = self.hot_handle.filter(|&h| h > 0)?;
        if active.shape.is_curve() || active.shape.is_rect_like() {
            return None;
        }
        active.shape.points().get(hot - 1).copied()
    }

    /// Shapes that never take part: non-snappable, ignored, or the active shape.
    pub fn skips(&self, shape: &Shape) -> bool {
        let id = shape.id();
        !shape.is_snappable() || self.ignore_ids.contains(&id) || self.active_id() == Some(id)
    }

    /// Ids a perpendicular neighbour must not have.
    pub fn neighbour_exclusions(&self, candidate: ShapeId) -> Vec<ShapeId> {
        let mut ids = self.ignore_ids.clone();
        ids.push(candidate);
        ids.extend(self.active_id());
        ids
    }

    /// Reference points: movable handles of the relocating shape, then the pointer.
    pub fn references(&self) -> impl Iterator<Item = (Option<usize>, Point)> + '_ {
        self.movable_handles
            .iter()
            .map(|&(i, p)| (Some(i), p))
            .chain(std::iter::once((None, self.pointer)))
    }
}
