//! Perpendicular-foot matcher for a straight line being drawn.

use super::context::SnapContext;
use super::{SnapAnchor, SnapItem, SnapKind};
use crate::geometry;
use crate::shapes::Shape;
use kurbo::Point;

/// Snap the end of a new line so that it stands perpendicular on an edge of
/// `candidate`, or so that its end lies on the foot of its start point.
pub(crate) fn snap_perpendicular(ctx: &SnapContext<'_>, candidate: &Shape, slot: &mut SnapItem) -> bool {
    let Some(active) = ctx.active.filter(|a| a.is_new) else {
        return false;
    };
    if !active.shape.is_polyline() || active.shape.point_count() != 2 || candidate.is_curve() {
        return false;
    }
    let Some(&start) = active.shape.points().first() else {
        return false;
    };

    let points = candidate.points();
    let count = points.len();
    if count < 2 {
        return false;
    }
    let edges = if candidate.is_closed() { count } else { count - 1 };
    let pointer = ctx.pointer;
    let mut found = false;

    for i in 0..edges {
        let (a, b) = (points[i], points[(i + 1) % count]);
        let (pointer_foot, pointer_offset) = geometry::foot_on_line(pointer, a, b);
        let (start_foot, start_offset) = geometry::foot_on_line(start, a, b);

        if start_offset <= ctx.perp_tol {
            // Start lies on the edge: the new line stands on it.
            let distance = pointer_foot.distance(start) * 2.0;
            if pointer_offset > 2.0 * slot.max_tolerance
                && distance < slot.distance
                && (ctx.options.perp_out || geometry::projects_within(a, b, pointer_foot))
            {
                slot.record(SnapKind::Perp, distance, start, start + (pointer - pointer_foot))
                    .on_shape(candidate.id())
                    .with_target(Some(SnapAnchor::Segment(i)));
                slot.start_point = Some(start);
                found = true;
                refine_on_neighbour(ctx, candidate, start, slot);
            }
        } else if pointer_offset < slot.max_tolerance {
            // End near the edge: drop it on the foot of the start point.
            let distance = start_foot.distance(pointer);
            if distance < slot.distance && (ctx.options.perp_out || geometry::projects_within(a, b, start_foot)) {
                slot.record(SnapKind::Perp, distance, start_foot, start_foot)
                    .on_shape(candidate.id())
                    .with_target(Some(SnapAnchor::Segment(i)))
                    .with_source(Some(SnapAnchor::Shape(candidate.id())));
                slot.start_point = Some(start);
                found = true;
            }
        }
    }
    found
}

/// Move a perpendicular end onto the outline of a shape passing close to it.
fn refine_on_neighbour(ctx: &SnapContext<'_>, candidate: &Shape, start: Point, slot: &mut SnapItem) {
    if ctx.near_box_side <= 0.0 {
        return;
    }
    let zone = geometry::square_around(slot.point, ctx.near_box_side / 2.0);
    let skip = ctx.neighbour_exclusions(candidate.id());
    let Some(neighbour) = ctx.document.shape_crossing_box(zone, &skip) else {
        return;
    };

    let crossings = match neighbour.as_circle() {
        Some(circle) => geometry::line_circle_intersections(start, slot.point, &circle, false),
        None => {
            let ray = kurbo::Line::new(start, start + (slot.point - start) * 2.0);
            geometry::line_path_crossings(ray, &neighbour.to_path())
        }
    };

    // First crossing wins ties.
    let nearest = crossings.into_iter().fold(None::<Point>, |best, p| match best {
        Some(b) if b.distance(ctx.pointer) <= p.distance(ctx.pointer) => Some(b),
        _ => Some(p),
    });
    if let Some(point) = nearest {
        log::trace!("perpendicular end moved onto {}", neighbour.id());
        slot.point = point;
        slot.kind = SnapKind::PerpNear;
        slot.source = Some(SnapAnchor::Shape(neighbour.id()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasDocument;
    use crate::config::SnapOptions;
    use crate::shapes::{Ellipse, Freehand, Line};
    use crate::snap::test_support::host;
    use crate::snap::{ActiveShape, SnapRequest};

    fn edge() -> Shape {
        Line::new(Point::new(-50.0, 10.0), Point::new(50.0, 10.0)).into()
    }

    fn run(doc: &CanvasDocument, options: &SnapOptions, drawing: &Shape, candidate: &Shape) -> SnapItem {
        let pointer = drawing.points()[1];
        let request = SnapRequest::new(pointer)
            .with_active(ActiveShape::drawing(drawing))
            .with_hot_handle(1);
        let ctx = SnapContext::new(&host(), doc, options, &request);
        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        snap_perpendicular(&ctx, candidate, &mut slot);
        slot
    }

    #[test]
    fn test_end_dropped_on_foot() {
        let drawing: Shape = Line::new(Point::new(3.0, 0.0), Point::new(3.4, 10.3)).into();
        let slot = run(&CanvasDocument::new(), &SnapOptions::default(), &drawing, &edge());
        assert_eq!(slot.kind, SnapKind::Perp);
        assert!((slot.point - Point::new(3.0, 10.0)).hypot() < 1e-9);
        assert_eq!(slot.base, slot.point);
        assert_eq!(slot.start_point, Some(Point::new(3.0, 0.0)));
        assert_eq!(slot.target, Some(SnapAnchor::Segment(0)));
    }

    #[test]
    fn test_standing_on_edge() {
        let drawing: Shape = Line::new(Point::new(0.0, 10.0), Point::new(0.3, 25.0)).into();
        let slot = run(&CanvasDocument::new(), &SnapOptions::default(), &drawing, &edge());
        assert_eq!(slot.kind, SnapKind::Perp);
        assert!((slot.point - Point::new(0.0, 25.0)).hypot() < 1e-9);
        assert_eq!(slot.base, Point::new(0.0, 10.0));
    }

    #[test]
    fn test_foot_outside_segment_needs_perp_out() {
        let short: Shape = Line::new(Point::new(-5.0, 10.0), Point::new(2.0, 10.0)).into();
        let drawing: Shape = Line::new(Point::new(3.0, 0.0), Point::new(3.4, 10.3)).into();
        let slot = run(&CanvasDocument::new(), &SnapOptions::default(), &drawing, &short);
        assert!(!slot.is_matched());

        let options = SnapOptions {
            perp_out: true,
            ..SnapOptions::default()
        };
        let slot = run(&CanvasDocument::new(), &options, &drawing, &short);
        assert_eq!(slot.kind, SnapKind::Perp);
    }

    #[test]
    fn test_refined_onto_neighbour_outline() {
        let candidate = edge();
        let mut doc = CanvasDocument::new();
        doc.add_shape(candidate.clone());
        let neighbour = doc.add_shape(Freehand::from_points(vec![Point::new(-5.0, 25.2), Point::new(45.0, 25.2)]));

        let drawing: Shape = Line::new(Point::new(0.0, 10.0), Point::new(0.3, 25.0)).into();
        let slot = run(&doc, &SnapOptions::default(), &drawing, &candidate);
        assert_eq!(slot.kind, SnapKind::PerpNear);
        assert!((slot.point - Point::new(0.0, 25.2)).hypot() < 1e-9);
        assert_eq!(slot.source, Some(SnapAnchor::Shape(neighbour)));
    }

    #[test]
    fn test_refined_onto_circle() {
        let candidate = edge();
        let mut doc = CanvasDocument::new();
        doc.add_shape(candidate.clone());
        doc.add_shape(Ellipse::circle(Point::new(0.0, 35.0), 9.8));

        let drawing: Shape = Line::new(Point::new(0.0, 10.0), Point::new(0.3, 25.0)).into();
        let slot = run(&doc, &SnapOptions::default(), &drawing, &candidate);
        assert_eq!(slot.kind, SnapKind::PerpNear);
        assert!((slot.point - Point::new(0.0, 25.2)).hypot() < 1e-9);
    }

    #[test]
    fn test_only_for_new_straight_lines() {
        let drawing: Shape = Line::new(Point::new(3.0, 0.0), Point::new(3.4, 10.3)).into();
        let request = SnapRequest::new(Point::new(3.4, 10.3)).with_active(ActiveShape::existing(&drawing));
        let doc = CanvasDocument::new();
        let options = SnapOptions::default();
        let ctx = SnapContext::new(&host(), &doc, &options, &request);
        let mut slot = SnapItem::new(ctx.pointer, ctx.point_tol);
        assert!(!snap_perpendicular(&ctx, &edge(), &mut slot));

        let circle: Shape = Ellipse::circle(Point::new(3.0, 20.0), 10.0).into();
        let slot = run(&doc, &options, &drawing, &circle);
        assert!(!slot.is_matched());
    }
}
