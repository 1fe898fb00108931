/// Boxes as 8 corners and 6 faces
pub mod cuboid;
/// Plane math on a single face
pub mod face;
/// Per-drag snapping state
pub mod snapper;

pub use cuboid::{Cuboid, FaceMatch, FACE_CORNERS};
pub use face::{Face, PARALLEL_THRESHOLD};
pub use snapper::Snapper;
