/// The box around a hologram and the points derived from it
pub mod boundary_box;
/// World space transform
pub mod global_transform;
/// Scale, rotate and translate handles
pub mod handles;
/// Outline highlighting capability
pub mod highlight;
/// The hologram marker and its interaction state
pub mod hologram;
/// Parent relative transform
pub mod local_transform;
/// Gestures in progress
pub mod manipulation;
/// Menu capability
pub mod menu;
/// Transform hierarchy
pub mod parent;
/// Bounds of visible geometry
pub mod render_bounds;
/// Surfaces found by spatial mapping
pub mod spatial_surface;
/// What the host should draw
pub mod visuals;

pub use boundary_box::{BoundaryBox, DominantFace, GroundProjection};
pub use global_transform::GlobalTransform;
pub use handles::{HandleId, Handles, RotateHandle, RotationAxis, ScaleHandle};
pub use highlight::{Color, Highlight, Highlightable, OutlineHighlight, OutlineSegment};
pub use hologram::{Hologram, HologramKind, HologramState, ScaleRange};
pub use local_transform::LocalTransform;
pub use manipulation::{
    DragGesture, Gesture, Manipulation, ManipulationAxis, RotateGesture, ScaleGesture,
    TranslateRotationMode,
};
pub use menu::{Menu, MenuController, MenuPlacement, TrackedMenu};
pub use parent::Parent;
pub use render_bounds::RenderBounds;
pub use spatial_surface::{SpatialSurface, SurfaceKind};
pub use visuals::{HologramVisuals, Visibility};
