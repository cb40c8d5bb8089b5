//! Snap classification.

use crate::shapes::HandleKind;
use serde::{Deserialize, Serialize};

/// Which rule produced a snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapKind {
    #[default]
    None,
    /// X aligned with the previous point (vertical guide).
    SameX,
    /// Y aligned with the previous point (horizontal guide).
    SameY,
    /// X on a grid column.
    GridX,
    /// Y on a grid row.
    GridY,
    /// Both coordinates on grid lines.
    Grid,
    /// A vertex of another shape.
    Point,
    Center,
    Midpoint,
    Quadrant,
    /// Crossing of two outlines.
    Intersect,
    /// Foot of a perpendicular.
    Perp,
    /// Perpendicular foot moved onto a neighbouring outline.
    PerpNear,
    /// Nearest point on an outline.
    Near,
}

/// Priority classes of [`SnapKind`], in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnapClass {
    None,
    Axis,
    Grid,
    Handle,
    Construction,
    Nearest,
}

impl SnapKind {
    pub const fn class(self) -> SnapClass {
        match self {
            SnapKind::None => SnapClass::None,
            SnapKind::SameX | SnapKind::SameY | SnapKind::GridX | SnapKind::GridY => SnapClass::Axis,
            SnapKind::Grid => SnapClass::Grid,
            SnapKind::Point | SnapKind::Center | SnapKind::Midpoint | SnapKind::Quadrant => SnapClass::Handle,
            SnapKind::Intersect | SnapKind::Perp | SnapKind::PerpNear => SnapClass::Construction,
            SnapKind::Near => SnapClass::Nearest,
        }
    }

    /// Snap kind for matching a control point of the given kind.
    pub fn from_handle(kind: HandleKind) -> Option<Self> {
        match kind {
            HandleKind::Vertex => Some(SnapKind::Point),
            HandleKind::Center => Some(SnapKind::Center),
            HandleKind::Midpoint => Some(SnapKind::Midpoint),
            HandleKind::Quadrant => Some(SnapKind::Quadrant),
            HandleKind::Outside => None,
        }
    }

    pub fn is_matched(self) -> bool {
        self != SnapKind::None
    }

    /// Control-point, construction or nearest-boundary kind.
    pub fn is_point_snap(self) -> bool {
        self.class() >= SnapClass::Handle
    }

    pub fn is_handle(self) -> bool {
        self.class() == SnapClass::Handle
    }

    /// Kinds that make nearest-boundary matching pointless for the rest of a scan.
    pub fn blocks_near(self) -> bool {
        matches!(self.class(), SnapClass::Grid | SnapClass::Handle | SnapClass::Construction)
    }

    /// Whether a renderer should draw a small marker rather than a large one.
    pub fn is_small_marker(self) -> bool {
        let class = self.class();
        class >= SnapClass::Nearest || class < SnapClass::Handle
    }
}
