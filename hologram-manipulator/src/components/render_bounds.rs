use serde::{Deserialize, Serialize};

use crate::util::Aabb;

/// Bounds of an entity's visible geometry, in the entity's own local space, ignoring its scale.
///
/// Supplied by the host for the content children of a hologram, or for the hologram itself.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RenderBounds(pub Aabb);
