use hecs::Entity;
use log::info;

/// Every hologram that takes part in cross hologram behaviour: only one registered hologram
/// can be active at a time, and registered volumetric holograms are snapping peers.
///
/// Owned by the [`crate::Manipulator`] and passed to systems explicitly. Insertion happens on
/// initialization and removal on destruction, never while iterating: callers take a copy with
/// [`HologramRegistry::entities`] before changing other holograms.
#[derive(Debug, Clone, Default)]
pub struct HologramRegistry {
    holograms: Vec<Entity>,
}

impl HologramRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns `false` if the hologram was already registered
    pub fn register(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        info!("[HOLOGRAM_REGISTRY] Registered {entity:?}");
        self.holograms.push(entity);
        true
    }

    /// Returns `false` if the hologram wasn't registered
    pub fn unregister(&mut self, entity: Entity) -> bool {
        let Some(index) = self.holograms.iter().position(|e| *e == entity) else {
            return false;
        };
        info!("[HOLOGRAM_REGISTRY] Unregistered {entity:?}");
        self.holograms.remove(index);
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.holograms.contains(&entity)
    }

    /// A snapshot of the registered holograms, in registration order
    pub fn entities(&self) -> Vec<Entity> {
        self.holograms.clone()
    }

    pub fn len(&self) -> usize {
        self.holograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holograms.is_empty()
    }
}
