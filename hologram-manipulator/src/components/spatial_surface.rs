use serde::{Deserialize, Serialize};

use crate::util::Aabb;

/// What a detected surface is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SurfaceKind {
    /// Horizontal, at floor height
    Floor,
    /// Horizontal, above the floor
    Table,
    /// Horizontal, overhead
    Ceiling,
    /// Vertical
    Wall,
    /// Unclassified. Never snapped to.
    Unknown,
}

/// A surface found by the host's spatial mapping. Holograms can snap their faces onto it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpatialSurface {
    /// World space bounds of the surface
    pub bounds: Aabb,
    /// Classification
    pub kind: SurfaceKind,
}

impl SpatialSurface {
    /// Can holograms snap to this surface?
    pub fn is_snappable(&self) -> bool {
        self.kind != SurfaceKind::Unknown
    }
}
