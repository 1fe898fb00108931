use hecs::Entity;

/// Component added to indicate that an entity has a parent.
/// A hologram's content entities are its children; moving the hologram's pivot re-expresses them
/// in the new local frame so they stay put in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);
