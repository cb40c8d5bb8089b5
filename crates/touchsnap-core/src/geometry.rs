//! Low-level geometry used by shape outlines and the snap generators.

use kurbo::{BezPath, Circle, Line, ParamCurve, ParamCurveNearest, PathEl, PathSeg, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Numerical zero for distance comparisons in model units.
pub const EPSILON: f64 = 1e-7;

/// Tolerance used when approximating curved outlines with cubic segments.
pub const CURVE_TOLERANCE: f64 = 1e-4;

/// Tolerance used when a curved segment has to be flattened into lines.
pub const FLATTEN_TOLERANCE: f64 = 1e-3;

/// Accuracy passed to kurbo's nearest-point solver.
const NEAREST_ACCURACY: f64 = 1e-6;

/// Result of a boundary hit test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineHit {
    /// Nearest point on the outline.
    pub nearest: Point,
    /// Distance from the query point to `nearest`.
    pub distance: f64,
    /// Index of the outline segment containing `nearest`.
    pub segment: usize,
}

/// Foot of the perpendicular from `point` onto the infinite line through `a` and `b`,
/// together with the distance from `point` to that line.
pub fn foot_on_line(point: Point, a: Point, b: Point) -> (Point, f64) {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return (a, point.distance(a));
    }
    let t = (point - a).dot(seg) / len_sq;
    let foot = a + seg * t;
    (foot, point.distance(foot))
}

/// Check if the projection of `point` onto the line `a`→`b` lies within the segment.
pub fn projects_within(a: Point, b: Point, point: Point) -> bool {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return point.distance(a) < EPSILON;
    }
    let t = (point - a).dot(seg) / len_sq;
    (-EPSILON..=1.0 + EPSILON).contains(&t)
}

/// Nearest point to `point` on the segment `a`→`b`.
pub fn nearest_on_segment(point: Point, a: Point, b: Point) -> Point {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return a;
    }
    let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Intersections of the line through `a` and `b` with a circle, ordered along `a`→`b`.
///
/// With `segment_only` the crossings are restricted to the segment itself.
pub fn line_circle_intersections(a: Point, b: Point, circle: &Circle, segment_only: bool) -> Vec<Point> {
    let d = b - a;
    let f = a - circle.center;
    let qa = d.hypot2();
    if qa < f64::EPSILON {
        return Vec::new();
    }
    let qb = 2.0 * f.dot(d);
    let qc = f.hypot2() - circle.radius * circle.radius;
    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return Vec::new();
    }
    let root = disc.sqrt();
    let params = if root < EPSILON {
        vec![-qb / (2.0 * qa)]
    } else {
        vec![(-qb - root) / (2.0 * qa), (-qb + root) / (2.0 * qa)]
    };
    params
        .into_iter()
        .filter(|t| !segment_only || (-EPSILON..=1.0 + EPSILON).contains(t))
        .map(|t| a + d * t)
        .collect()
}

/// Intersections of two circles (zero, one or two points).
pub fn circle_circle_intersections(c1: &Circle, c2: &Circle) -> Vec<Point> {
    let delta = c2.center - c1.center;
    let d = delta.hypot();
    let (r1, r2) = (c1.radius, c2.radius);
    if d < EPSILON || d > r1 + r2 + EPSILON || d < (r1 - r2).abs() - EPSILON {
        return Vec::new();
    }
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h_sq = r1 * r1 - a * a;
    let mid = c1.center + delta * (a / d);
    if h_sq <= 0.0 {
        return vec![mid];
    }
    let h = h_sq.sqrt();
    let offset = Vec2::new(-delta.y, delta.x) * (h / d);
    vec![mid + offset, mid - offset]
}

/// Straight pieces of one outline segment: the segment itself when it is a
/// line, its flattening otherwise.
fn straight_pieces(seg: PathSeg) -> Vec<Line> {
    if let PathSeg::Line(line) = seg {
        return vec![line];
    }
    let mut lines = Vec::new();
    let mut last = seg.start();
    kurbo::flatten([PathEl::MoveTo(last), seg.as_path_el()], FLATTEN_TOLERANCE, |el| {
        if let PathEl::LineTo(p) = el {
            lines.push(Line::new(last, p));
            last = p;
        }
    });
    lines
}

/// Crossings of the segment `line` with an outline.
pub fn line_path_crossings(line: Line, path: &BezPath) -> Vec<Point> {
    let mut points = Vec::new();
    for seg in path.segments() {
        for hit in seg.intersect_line(line) {
            points.push(line.eval(hit.line_t));
        }
    }
    points
}

/// All crossings between two outlines that fall inside `within`.
///
/// Whenever one side of a segment pair is straight the crossing is solved
/// exactly; only curve against curve flattens one of them.
pub fn path_crossings(a: &BezPath, b: &BezPath, within: Rect) -> Vec<Point> {
    let mut points = Vec::new();
    for seg_a in a.segments() {
        for seg_b in b.segments() {
            let (curve, lines) = match (seg_a, seg_b) {
                (_, PathSeg::Line(line)) => (seg_a, vec![line]),
                (PathSeg::Line(line), _) => (seg_b, vec![line]),
                _ => (seg_a, straight_pieces(seg_b)),
            };
            for line in lines {
                for hit in curve.intersect_line(line) {
                    let p = line.eval(hit.line_t);
                    if rect_contains(&within, p) {
                        points.push(p);
                    }
                }
            }
        }
    }
    points
}

/// Crossings between a circle and an arbitrary outline.
pub fn circle_path_crossings(circle: &Circle, path: &BezPath) -> Vec<Point> {
    path.segments()
        .flat_map(straight_pieces)
        .flat_map(|line| line_circle_intersections(line.p0, line.p1, circle, true))
        .collect()
}

/// Square box of half size `half` centered on `center`.
pub fn square_around(center: Point, half: f64) -> Rect {
    Rect::new(center.x - half, center.y - half, center.x + half, center.y + half)
}

/// Overlap test that treats degenerate (zero-width) boxes as valid.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Inclusive containment test (kurbo's `Rect::contains` is half-open).
pub fn rect_contains(rect: &Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Bounding box of a set of points.
pub fn points_bounds(points: &[Point]) -> Rect {
    let (min_x, max_x) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
        (mn.min(p.x), mx.max(p.x))
    });
    let (min_y, max_y) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
        (mn.min(p.y), mx.max(p.y))
    });
    if points.is_empty() {
        return Rect::ZERO;
    }
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Nearest point on a polyline (or polygon when `closed`) within `tolerance`.
pub fn polyline_hit(points: &[Point], closed: bool, point: Point, tolerance: f64) -> Option<OutlineHit> {
    let count = points.len();
    match count {
        0 => None,
        1 => {
            let distance = point.distance(points[0]);
            (distance <= tolerance).then_some(OutlineHit {
                nearest: points[0],
                distance,
                segment: 0,
            })
        }
        _ => {
            let edges = if closed { count } else { count - 1 };
            let mut best: Option<OutlineHit> = None;
            for i in 0..edges {
                let nearest = nearest_on_segment(point, points[i], points[(i + 1) % count]);
                let distance = point.distance(nearest);
                if distance <= tolerance && best.is_none_or(|hit| distance < hit.distance) {
                    best = Some(OutlineHit {
                        nearest,
                        distance,
                        segment: i,
                    });
                }
            }
            best
        }
    }
}

/// Nearest point on a curved outline within `tolerance`.
pub fn path_hit(path: &BezPath, point: Point, tolerance: f64) -> Option<OutlineHit> {
    let mut best: Option<OutlineHit> = None;
    for (segment, seg) in path.segments().enumerate() {
        let nearest = seg.nearest(point, NEAREST_ACCURACY);
        let distance = nearest.distance_sq.sqrt();
        if distance <= tolerance && best.is_none_or(|hit| distance < hit.distance) {
            best = Some(OutlineHit {
                nearest: seg.eval(nearest.t),
                distance,
                segment,
            });
        }
    }
    best
}
