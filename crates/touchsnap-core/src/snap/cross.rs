//! Intersection matcher.

use super::context::SnapContext;
use super::{SnapAnchor, SnapItem, SnapKind};
use crate::geometry;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect};

/// Snap to a crossing between the outline of `candidate` and the outline of
/// any other shape. Crossings count only inside the tolerance square around
/// the pointer; distances are taken from the pointer or a movable handle.
pub(crate) fn snap_intersections(ctx: &SnapContext<'_>, candidate: &Shape, slot: &mut SnapItem) -> bool {
    if candidate.point_count() < 2 {
        return false;
    }
    let zone = geometry::square_around(ctx.pointer, slot.max_tolerance);
    if !geometry::rects_overlap(&candidate.bounds(), &zone) {
        return false;
    }
    let candidate_path = candidate.to_path();
    let candidate_circle = candidate.as_circle();

    let partners: Vec<(ShapeId, Vec<Point>)> = ctx
        .document
        .shapes_ordered()
        .filter(|other| {
            other.id() != candidate.id()
                && !ctx.skips(other)
                && other.point_count() >= 2
                && geometry::rects_overlap(&other.bounds(), &zone)
        })
        .map(|other| {
            let crossings = match (candidate_circle, other.as_circle()) {
                (Some(a), Some(b)) => geometry::circle_circle_intersections(&a, &b),
                (Some(a), None) => geometry::circle_path_crossings(&a, &other.to_path()),
                (None, Some(b)) => geometry::circle_path_crossings(&b, &candidate_path),
                (None, None) => geometry::path_crossings(&candidate_path, &other.to_path(), zone),
            };
            (other.id(), crossings)
        })
        .filter(|(_, crossings)| !crossings.is_empty())
        .collect();

    let mut found = false;
    for (own, reference) in ctx.references() {
        for (other, crossings) in &partners {
            let Some(crossing) = nearest_inside(crossings, reference, zone) else {
                continue;
            };
            let distance = crossing.distance(reference);
            if distance < slot.distance {
                slot.record(SnapKind::Intersect, distance, reference, crossing)
                    .on_shape(candidate.id())
                    .with_target(Some(SnapAnchor::Shape(*other)))
                    .with_source(own.map(SnapAnchor::Handle));
                found = true;
            }
        }
    }
    found
}

fn nearest_inside(points: &[Point], reference: Point, zone: Rect) -> Option<Point> {
    points
        .iter()
        .copied()
        .filter(|p| geometry::rect_contains(&zone, *p))
        .min_by(|a, b| a.distance(reference).total_cmp(&b.distance(reference)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasDocument;
    use crate::config::SnapOptions;
    use crate::shapes::{Ellipse, Line, ShapeFlags};
    use crate::snap::test_support::host;
    use crate::snap::{ActiveShape, SnapRequest};

    fn cross_doc() -> (CanvasDocument, Shape, Shape) {
        let horizontal: Shape = Line::new(Point::new(0.0, 10.0), Point::new(20.0, 10.0)).into();
        let vertical: Shape = Line::new(Point::new(10.0, 0.0), Point::new(10.0, 20.0)).into();
        let mut doc = CanvasDocument::new();
        doc.add_shape(horizontal.clone());
        doc.add_shape(vertical.clone());
        (doc, horizontal, vertical)
    }

    #[test]
    fn test_line_crossing() {
        let (doc, horizontal, vertical) = cross_doc();
        let options = SnapOptions::default();
        let request = SnapRequest::new(Point::new(10.3, 10.4));
        let ctx = SnapContext::new(&host(), &doc, &options, &request);

        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        assert!(snap_intersections(&ctx, &horizontal, &mut slot));
        assert_eq!(slot.kind, SnapKind::Intersect);
        assert!((slot.point - Point::new(10.0, 10.0)).hypot() < 1e-9);
        assert_eq!(slot.shape_id, Some(horizontal.id()));
        assert_eq!(slot.target, Some(SnapAnchor::Shape(vertical.id())));
        assert_eq!(slot.source, None);

        // Same crossing from the other side is not strictly better
        assert!(!snap_intersections(&ctx, &vertical, &mut slot));
    }

    #[test]
    fn test_crossing_outside_tolerance() {
        let (doc, horizontal, _) = cross_doc();
        let options = SnapOptions::default();
        let request = SnapRequest::new(Point::new(12.0, 10.0));
        let ctx = SnapContext::new(&host(), &doc, &options, &request);
        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        assert!(!snap_intersections(&ctx, &horizontal, &mut slot));
    }

    #[test]
    fn test_circle_and_line() {
        let line: Shape = Line::new(Point::new(-20.0, 0.0), Point::new(20.0, 0.0)).into();
        let circle: Shape = Ellipse::circle(Point::ZERO, 5.0).into();
        let mut doc = CanvasDocument::new();
        doc.add_shape(line.clone());
        doc.add_shape(circle.clone());
        let options = SnapOptions::default();
        let request = SnapRequest::new(Point::new(4.6, 0.5));
        let ctx = SnapContext::new(&host(), &doc, &options, &request);

        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        assert!(snap_intersections(&ctx, &circle, &mut slot));
        assert!((slot.point - Point::new(5.0, 0.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_two_circles() {
        let a: Shape = Ellipse::circle(Point::new(0.0, 0.0), 5.0).into();
        let b: Shape = Ellipse::circle(Point::new(8.0, 0.0), 5.0).into();
        let mut doc = CanvasDocument::new();
        doc.add_shape(a.clone());
        doc.add_shape(b);
        let options = SnapOptions::default();
        let request = SnapRequest::new(Point::new(4.2, 2.8));
        let ctx = SnapContext::new(&host(), &doc, &options, &request);

        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        assert!(snap_intersections(&ctx, &a, &mut slot));
        assert!((slot.point - Point::new(4.0, 3.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_unsnappable_partner_ignored() {
        let horizontal: Shape = Line::new(Point::new(0.0, 10.0), Point::new(20.0, 10.0)).into();
        let mut vertical: Shape = Line::new(Point::new(10.0, 0.0), Point::new(10.0, 20.0)).into();
        vertical.set_flags(ShapeFlags::NO_SNAP);
        let doc: CanvasDocument = [horizontal.clone(), vertical].into_iter().collect();
        let options = SnapOptions::default();
        let request = SnapRequest::new(Point::new(10.3, 10.4));
        let ctx = SnapContext::new(&host(), &doc, &options, &request);
        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        assert!(!snap_intersections(&ctx, &horizontal, &mut slot));
    }

    #[test]
    fn test_relocating_handle_onto_crossing() {
        let (doc, horizontal, _) = cross_doc();
        let moving: Shape = Line::new(Point::new(10.2, 10.3), Point::new(30.0, 30.0)).into();
        let options = SnapOptions::default();
        let request = SnapRequest::new(Point::new(10.5, 10.6)).with_active(ActiveShape::existing(&moving));
        let ctx = SnapContext::new(&host(), &doc, &options, &request);

        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        assert!(snap_intersections(&ctx, &horizontal, &mut slot));
        assert_eq!(slot.base, Point::new(10.2, 10.3));
        assert!((slot.distance - 0.13_f64.sqrt()).abs() < 1e-9);
        assert_eq!(slot.source, Some(SnapAnchor::Handle(0)));
    }

    #[test]
    fn test_crossing_near_handle_but_far_from_pointer() {
        let (doc, horizontal, _) = cross_doc();
        let moving: Shape = Line::new(Point::new(10.2, 10.3), Point::new(30.0, 30.0)).into();
        let options = SnapOptions::default();
        let request = SnapRequest::new(Point::new(20.0, 20.0)).with_active(ActiveShape::existing(&moving));
        let ctx = SnapContext::new(&host(), &doc, &options, &request);

        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        assert!(!snap_intersections(&ctx, &horizontal, &mut slot));
        assert!(!slot.is_matched());
    }
}
