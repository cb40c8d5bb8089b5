//! Grid shape: a rectangular area ruled into cells.

use super::{Handle, ShapeFlags, ShapeId, ShapeTrait, new_id};
use crate::geometry::{self, OutlineHit};
use bitflags::bitflags;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Axes that matched a grid line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GridAxes: u8 {
        const X = 1;
        const Y = 1 << 1;
    }
}

/// Outcome of [`Grid::snap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnap {
    /// Input point with every matched coordinate moved onto its grid line.
    pub point: Point,
    /// Per-axis distance to the nearest grid line.
    pub dist: Vec2,
    /// Axes that matched within tolerance.
    pub axes: GridAxes,
}

impl GridSnap {
    /// Whether both axes matched.
    pub fn is_full(&self) -> bool {
        self.axes.contains(GridAxes::all())
    }
}

/// A grid of vertical and horizontal lines covering `area`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    /// Covered area; grid lines start at its top-left corner.
    pub area: Rect,
    /// Distance between vertical lines.
    pub cell_width: f64,
    /// Distance between horizontal lines.
    pub cell_height: f64,
    #[serde(default)]
    pub(crate) flags: ShapeFlags,
}

impl Grid {
    pub fn new(area: Rect, cell_width: f64, cell_height: f64) -> Self {
        Self {
            id: new_id(),
            area: area.abs(),
            cell_width,
            cell_height,
            flags: ShapeFlags::empty(),
        }
    }

    /// Align `point` to the nearest grid lines.
    ///
    /// X and Y are tried independently; an axis matches when its distance to
    /// the nearest line is below the matching component of `tolerance`.
    /// Points outside the area inflated by the tolerance never match.
    pub fn snap(&self, point: Point, tolerance: Vec2) -> GridSnap {
        let mut result = GridSnap {
            point,
            dist: Vec2::new(f64::INFINITY, f64::INFINITY),
            axes: GridAxes::empty(),
        };
        let reach = self.area.inflate(tolerance.x, tolerance.y);
        if !geometry::rect_contains(&reach, point) {
            return result;
        }

        if let Some(x) = nearest_line(point.x, self.area.x0, self.area.x1, self.cell_width) {
            result.dist.x = (point.x - x).abs();
            if result.dist.x < tolerance.x {
                result.point.x = x;
                result.axes |= GridAxes::X;
            }
        }
        if let Some(y) = nearest_line(point.y, self.area.y0, self.area.y1, self.cell_height) {
            result.dist.y = (point.y - y).abs();
            if result.dist.y < tolerance.y {
                result.point.y = y;
                result.axes |= GridAxes::Y;
            }
        }
        result
    }
}

/// Nearest line coordinate in `[lo, hi]` for lines at `lo + k * step`; `hi` is
/// always a line.
fn nearest_line(value: f64, lo: f64, hi: f64, step: f64) -> Option<f64> {
    if step <= 0.0 || !step.is_finite() {
        return None;
    }
    let k = ((value - lo) / step).round();
    let line = (lo + k * step).clamp(lo, hi);
    if (value - hi).abs() < (value - line).abs() {
        Some(hi)
    } else {
        Some(line)
    }
}

impl ShapeTrait for Grid {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn flags(&self) -> ShapeFlags {
        self.flags
    }

    fn bounds(&self) -> Rect {
        self.area
    }

    fn points(&self) -> Vec<Point> {
        let r = self.area;
        vec![
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    fn handles(&self) -> Vec<Handle> {
        Vec::new()
    }

    fn is_curve(&self) -> bool {
        false
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn hit_test(&self, _point: Point, _tolerance: f64) -> Option<OutlineHit> {
        None
    }

    fn to_path(&self) -> BezPath {
        self.area.to_path(0.1)
    }
}
