//! Scale, rotate and translate gestures.
//!
//! Every gesture goes start, update (any number of times), end. While one is in progress every
//! other handle on the hologram is disabled, other active holograms are deactivated and the menu
//! is turned off.

mod rotate;
mod scale;
mod translate;

use hecs::{Entity, World};
use log::{debug, warn};

use crate::{
    components::{
        Gesture, HandleId, Handles, Hologram, HologramState, Manipulation, Menu, MenuController,
    },
    contexts::{GestureInput, HologramRegistry, Viewer},
    systems::interaction::deactivate,
    ManipulatorError, ManipulatorResult,
};

/// Start a gesture on one of the hologram's handles.
///
/// Returns `false` without doing anything if the hologram isn't Active, the handle is disabled,
/// or another gesture is already in progress.
pub fn gesture_start(
    world: &mut World,
    registry: &HologramRegistry,
    viewer: &Viewer,
    entity: Entity,
    handle: HandleId,
    input: &GestureInput,
) -> ManipulatorResult<bool> {
    {
        let hologram = world.get::<&Hologram>(entity)?;
        if !hologram.is_initialized() {
            return Err(ManipulatorError::NotInitialized);
        }
        if !hologram.is_enabled() || hologram.state() != HologramState::Active {
            debug!("Not starting {handle:?} on {entity:?}, it's {:?}", hologram.state());
            return Ok(false);
        }
    }
    {
        let handles = world.get::<&Handles>(entity)?;
        if !handles.contains(handle) {
            return Err(ManipulatorError::InvalidHandle);
        }
        if !handles.is_enabled(handle) {
            debug!("Not starting {handle:?} on {entity:?}, it's disabled");
            return Ok(false);
        }
    }
    if world.get::<&Manipulation>(entity)?.gesture.is_active() {
        debug!("Not starting {handle:?} on {entity:?}, a gesture is in progress");
        return Ok(false);
    }

    manipulation_started(world, registry, entity, handle)?;
    let gesture = match handle {
        HandleId::Rotate(index) => rotate::start(world, viewer, entity, index, input),
        HandleId::Scale(index) => scale::start(world, entity, index, input),
        HandleId::Translate => translate::start(world, registry, viewer, entity, input),
    };
    let gesture = match gesture {
        Ok(gesture) => gesture,
        Err(e) => {
            manipulation_ended(world, entity)?;
            return Err(e);
        }
    };

    world.get::<&mut Manipulation>(entity)?.gesture = gesture;
    debug!("Started {handle:?} on {entity:?}");
    Ok(true)
}

/// Feed the latest input to the gesture in progress. Returns `false` if there isn't one.
pub fn gesture_update(
    world: &mut World,
    viewer: &Viewer,
    entity: Entity,
    input: &GestureInput,
) -> ManipulatorResult<bool> {
    // Taken out so the gesture can read and write the rest of the world
    let mut gesture = std::mem::take(&mut world.get::<&mut Manipulation>(entity)?.gesture);
    let result = match &mut gesture {
        Gesture::Idle => Ok(false),
        Gesture::Rotating(rotating) => rotate::update(world, viewer, entity, rotating, input),
        Gesture::Scaling(scaling) => scale::update(world, entity, scaling, input),
        Gesture::Dragging(dragging) => translate::update(world, viewer, entity, dragging, input),
    };
    world.get::<&mut Manipulation>(entity)?.gesture = gesture;
    result
}

/// End the gesture in progress. Returns `false` if there wasn't one, so it's safe to call
/// whenever a gesture might have been cancelled.
pub fn gesture_end(world: &mut World, entity: Entity) -> ManipulatorResult<bool> {
    let Ok(mut manipulation) = world.get::<&mut Manipulation>(entity) else {
        return Ok(false);
    };
    let gesture = std::mem::take(&mut manipulation.gesture);
    drop(manipulation);

    let handle = gesture.handle();
    let result = match gesture {
        Gesture::Idle => return Ok(false),
        Gesture::Rotating(_) => rotate::end(world, entity),
        Gesture::Scaling(_) => scale::end(world, entity),
        Gesture::Dragging(mut dragging) => translate::end(world, entity, &mut dragging),
    };
    if let Err(e) = &result {
        warn!("Error while ending {handle:?} on {entity:?}: {e}");
    }

    // Whatever happened, the hologram goes back to accepting gestures
    manipulation_ended(world, entity)?;
    debug!("Ended {handle:?} on {entity:?}");
    result.map(|_| true)
}

/// Gesture side effects shared by every handle
fn manipulation_started(
    world: &mut World,
    registry: &HologramRegistry,
    entity: Entity,
    handle: HandleId,
) -> ManipulatorResult<()> {
    if let Ok(mut menu) = world.get::<&mut Menu>(entity) {
        menu.set_state(false);
    }

    for other in registry.entities() {
        if other == entity {
            continue;
        }
        let is_active = world
            .get::<&Hologram>(other)
            .map_or(false, |h| h.state() == HologramState::Active);
        if is_active {
            deactivate(world, other)?;
        }
    }

    let mut handles = world.get::<&mut Handles>(entity)?;
    handles.set_enabled(false, Some(handle));
    handles.active = Some(handle);
    Ok(())
}

fn manipulation_ended(world: &mut World, entity: Entity) -> ManipulatorResult<()> {
    if let Ok(mut menu) = world.get::<&mut Menu>(entity) {
        menu.set_state(true);
    }

    let active = world.get::<&Hologram>(entity)?.state() == HologramState::Active;
    let mut handles = world.get::<&mut Handles>(entity)?;
    handles.set_enabled(active, None);
    handles.active = None;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{HologramKind, LocalTransform, Parent, RenderBounds, TrackedMenu},
        settings::ManipulatorSettings,
        systems::{handle_interaction, init_hologram, InteractionEvent},
        util::Aabb,
    };
    use glam::Vec3;

    pub(super) fn spawn_active(
        world: &mut World,
        registry: &mut HologramRegistry,
        settings: &ManipulatorSettings,
        position: Vec3,
        size: f32,
    ) -> Entity {
        let hologram = world.spawn((
            Hologram::new(HologramKind::Volumetric),
            LocalTransform::from_translation(position),
        ));
        world.spawn((
            Parent(hologram),
            LocalTransform::default(),
            RenderBounds(Aabb::from_center_size(Vec3::ZERO, Vec3::splat(size))),
        ));
        init_hologram(world, registry, hologram, Some(settings)).unwrap();
        for event in [InteractionEvent::FocusEnter, InteractionEvent::Click] {
            handle_interaction(world, registry, hologram, event).unwrap();
        }
        hologram
    }

    fn start(
        world: &mut World,
        registry: &HologramRegistry,
        entity: Entity,
        handle: HandleId,
    ) -> ManipulatorResult<bool> {
        let input = GestureInput::default();
        gesture_start(world, registry, &Viewer::default(), entity, handle, &input)
    }

    fn menu_enabled(world: &World, entity: Entity) -> bool {
        match &*world.get::<&Menu>(entity).unwrap() {
            Menu::Tracked(TrackedMenu { enabled, .. }) => *enabled,
            _ => panic!("init should add a tracked menu"),
        }
    }

    #[test]
    fn test_gesture_protocol() {
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let settings = ManipulatorSettings::default();
        let hologram = spawn_active(&mut world, &mut registry, &settings, Vec3::NEG_Z * 2., 1.);

        assert!(start(&mut world, &registry, hologram, HandleId::Scale(3)).unwrap());
        assert!(!menu_enabled(&world, hologram));
        {
            let handles = world.get::<&Handles>(hologram).unwrap();
            assert_eq!(handles.active, Some(HandleId::Scale(3)));
            assert!(handles.is_enabled(HandleId::Scale(3)));
            assert!(!handles.is_enabled(HandleId::Scale(2)));
            assert!(!handles.is_enabled(HandleId::Translate));
        }

        // Only one gesture at a time
        assert!(!start(&mut world, &registry, hologram, HandleId::Scale(3)).unwrap());
        assert!(!start(&mut world, &registry, hologram, HandleId::Rotate(0)).unwrap());

        assert!(gesture_end(&mut world, hologram).unwrap());
        assert!(menu_enabled(&world, hologram));
        {
            let handles = world.get::<&Handles>(hologram).unwrap();
            assert!(handles.is_enabled(HandleId::Translate));
            assert!(handles.active.is_none());
        }

        // Ending twice is fine
        assert!(!gesture_end(&mut world, hologram).unwrap());
        let input = GestureInput::default();
        assert!(!gesture_update(&mut world, &Viewer::default(), hologram, &input).unwrap());
    }

    #[test]
    fn test_gesture_rejections() {
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let settings = ManipulatorSettings::default();
        let hologram = spawn_active(&mut world, &mut registry, &settings, Vec3::NEG_Z * 2., 1.);

        assert!(matches!(
            start(&mut world, &registry, hologram, HandleId::Rotate(12)),
            Err(ManipulatorError::InvalidHandle)
        ));

        let uninitialized = world.spawn((
            Hologram::new(HologramKind::Volumetric),
            LocalTransform::default(),
        ));
        assert!(matches!(
            start(&mut world, &registry, uninitialized, HandleId::Translate),
            Err(ManipulatorError::NotInitialized)
        ));

        handle_interaction(&mut world, &registry, hologram, InteractionEvent::Disable).unwrap();
        assert!(!start(&mut world, &registry, hologram, HandleId::Translate).unwrap());
    }

    #[test]
    fn test_gesture_deactivates_other_active_holograms() {
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let settings = ManipulatorSettings::default();
        let first = spawn_active(&mut world, &mut registry, &settings, Vec3::new(-1., 0., -2.), 0.5);
        let second = world.spawn((
            Hologram::new(HologramKind::Volumetric),
            LocalTransform::from_translation(Vec3::new(1., 0., -2.)),
            RenderBounds(Aabb::from_center_size(Vec3::ZERO, Vec3::splat(0.5))),
        ));
        init_hologram(&mut world, &mut registry, second, Some(&settings)).unwrap();

        // Activated behind the registry's back, like a host that skipped the click
        crate::systems::set_hologram_state(&mut world, second, HologramState::Active).unwrap();
        assert!(start(&mut world, &registry, first, HandleId::Rotate(1)).unwrap());

        let state = |world: &World, e| world.get::<&Hologram>(e).unwrap().state();
        assert_eq!(state(&world, second), HologramState::Inactive);
        assert_eq!(state(&world, first), HologramState::Active);
        assert!(!world.get::<&Handles>(second).unwrap().is_enabled(HandleId::Scale(0)));

        gesture_end(&mut world, first).unwrap();
        assert!(world.get::<&Handles>(first).unwrap().is_enabled(HandleId::Scale(0)));
    }
}
