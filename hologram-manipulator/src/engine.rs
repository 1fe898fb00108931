use hecs::{Entity, World};
use log::info;

use crate::{
    components::HandleId,
    contexts::{GestureInput, HologramRegistry, Viewer},
    settings::ManipulatorSettings,
    systems::{self, InteractionEvent},
    ManipulatorResult,
};

/// Builder for `Manipulator`.
#[derive(Debug, Default)]
pub struct ManipulatorBuilder {
    default_settings: Option<ManipulatorSettings>,
    viewer: Option<Viewer>,
}

impl ManipulatorBuilder {
    /// Create a `ManipulatorBuilder`
    pub fn new() -> Self {
        Default::default()
    }

    /// Settings used by holograms that don't carry their own `ManipulatorSettings` component
    pub fn default_settings(&mut self, settings: Option<ManipulatorSettings>) -> &mut Self {
        self.default_settings = settings;
        self
    }

    /// Set the initial viewer pose
    pub fn viewer(&mut self, viewer: Viewer) -> &mut Self {
        self.viewer = Some(viewer);
        self
    }

    /// Build the `Manipulator`
    pub fn build(&mut self) -> Manipulator {
        let manipulator = Manipulator {
            world: World::default(),
            registry: HologramRegistry::default(),
            viewer: self.viewer.unwrap_or_default(),
            default_settings: self.default_settings.take(),
        };
        info!(
            "[MANIPULATOR] Ready, default settings {}",
            if manipulator.default_settings.is_some() {
                "present"
            } else {
                "absent"
            }
        );
        manipulator
    }
}

/// The hologram manipulator.
/// Owns the world holding holograms and spatial surfaces, and forwards the host's events to the
/// systems. **IMPORTANT**: make sure you call `update` each frame.
pub struct Manipulator {
    /// World
    pub world: World,
    /// Holograms taking part in snapping and mutual deactivation
    pub registry: HologramRegistry,
    /// Current pose of the user's head
    pub viewer: Viewer,
    default_settings: Option<ManipulatorSettings>,
}

impl Default for Manipulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Manipulator {
    /// Create a manipulator with default settings and the viewer at the origin
    pub fn new() -> Self {
        ManipulatorBuilder::new()
            .default_settings(Some(Default::default()))
            .build()
    }

    /// Settings for holograms without their own
    pub fn default_settings(&self) -> Option<&ManipulatorSettings> {
        self.default_settings.as_ref()
    }

    /// Set up the box, handles and visuals of a hologram entity.
    pub fn init_hologram(&mut self, entity: Entity) -> ManipulatorResult<()> {
        systems::init_hologram(
            &mut self.world,
            &mut self.registry,
            entity,
            self.default_settings.as_ref(),
        )
    }

    /// Despawn a hologram and everything parented to it.
    pub fn destroy_hologram(&mut self, entity: Entity) -> ManipulatorResult<()> {
        systems::destroy_hologram(&mut self.world, &mut self.registry, entity)
    }

    /// Forward a focus, click or enable/disable event.
    pub fn handle_event(
        &mut self,
        entity: Entity,
        event: InteractionEvent,
    ) -> ManipulatorResult<bool> {
        systems::handle_interaction(&mut self.world, &self.registry, entity, event)
    }

    /// Forward a gesture start on one of the hologram's handles.
    pub fn gesture_start(
        &mut self,
        entity: Entity,
        handle: HandleId,
        input: &GestureInput,
    ) -> ManipulatorResult<bool> {
        systems::gesture_start(
            &mut self.world,
            &self.registry,
            &self.viewer,
            entity,
            handle,
            input,
        )
    }

    /// Forward a gesture update.
    pub fn gesture_update(
        &mut self,
        entity: Entity,
        input: &GestureInput,
    ) -> ManipulatorResult<bool> {
        systems::gesture_update(&mut self.world, &self.viewer, entity, input)
    }

    /// Forward a gesture end, or a lost input source.
    pub fn gesture_end(&mut self, entity: Entity) -> ManipulatorResult<bool> {
        systems::gesture_end(&mut self.world, entity)
    }

    /// Record where the user's head is this frame.
    pub fn set_viewer(&mut self, viewer: Viewer) {
        self.viewer = viewer;
    }

    /// IMPORTANT: Call this function each frame, after forwarding input
    pub fn update(&mut self) {
        systems::update_global_transform_system(&mut self.world);
        systems::hologram_system(&mut self.world, &self.viewer);
    }
}
