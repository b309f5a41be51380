//! The [`Cell`] type, one voxel of the grid.

use crate::geom::Point3;

/// Traversal class of a cell. Reserved for per-kind movement rules; the
/// A* neighbor rule does not read it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellKind {
    #[default]
    Ground,
    Air,
}

/// A grid cell: fixed coordinates plus externally owned walkability.
///
/// Search bookkeeping (costs, parents) is deliberately absent; every search
/// keeps its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point3,
    pub walkable: bool,
    pub kind: CellKind,
}

impl Cell {
    /// A walkable ground cell at `pos`.
    #[inline]
    pub const fn new(pos: Point3) -> Self {
        Self {
            pos,
            walkable: true,
            kind: CellKind::Ground,
        }
    }

    /// Grid coordinates of the cell.
    #[inline]
    pub const fn pos(&self) -> Point3 {
        self.pos
    }

    /// Set walkability (builder).
    #[inline]
    pub const fn with_walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }

    /// Set the kind (builder).
    #[inline]
    pub const fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }
}
