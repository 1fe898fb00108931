use hecs::{Entity, World};
use log::{debug, trace};

use crate::{
    components::{
        Handles, Highlight, Highlightable, Hologram, HologramState, HologramVisuals, Visibility,
    },
    contexts::HologramRegistry,
    settings::ManipulatorSettings,
    systems::gestures::gesture_end,
    ManipulatorResult,
};

/// Input events that drive a hologram's [`HologramState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionEvent {
    /// Gaze entered the hologram
    FocusEnter,
    /// Gaze left the hologram
    FocusExit,
    /// Air tap on a focused hologram
    Click,
    /// The hologram was hidden by the host
    Disable,
    /// The hologram was shown again by the host
    Enable,
}

/// Apply an interaction event. Returns `true` if the hologram's state changed.
///
/// Uninitialized holograms ignore every event. Clicking a focused hologram activates it and
/// deactivates every other registered hologram.
pub fn handle_interaction(
    world: &mut World,
    registry: &HologramRegistry,
    entity: Entity,
    event: InteractionEvent,
) -> ManipulatorResult<bool> {
    let (initialized, enabled, state) = {
        let hologram = world.get::<&Hologram>(entity)?;
        (hologram.initialized, hologram.enabled, hologram.state)
    };
    if !initialized {
        debug!("Ignoring {event:?} on {entity:?}, it isn't initialized");
        return Ok(false);
    }
    trace!("{event:?} on {entity:?} while {state:?}");

    match event {
        InteractionEvent::FocusEnter if enabled && state == HologramState::Inactive => {
            set_hologram_state(world, entity, HologramState::Focused)?;
            Ok(true)
        }
        InteractionEvent::FocusExit if enabled && state == HologramState::Focused => {
            set_hologram_state(world, entity, HologramState::Inactive)?;
            Ok(true)
        }
        InteractionEvent::Click if enabled && state == HologramState::Focused => {
            set_hologram_state(world, entity, HologramState::Active)?;
            for other in registry.entities() {
                if other != entity {
                    deactivate(world, other)?;
                }
            }
            Ok(true)
        }
        InteractionEvent::Disable => {
            gesture_end(world, entity)?;
            world.get::<&mut Hologram>(entity)?.enabled = false;
            set_hologram_state(world, entity, HologramState::Inactive)?;
            Ok(state != HologramState::Inactive)
        }
        InteractionEvent::Enable => {
            world.get::<&mut Hologram>(entity)?.enabled = true;
            set_hologram_state(world, entity, HologramState::Inactive)?;
            Ok(state != HologramState::Inactive)
        }
        _ => Ok(false),
    }
}

/// Put a hologram into `state`: what's visible, which handles are enabled and whether its
/// outline is highlighted all follow from it.
pub fn set_hologram_state(
    world: &mut World,
    entity: Entity,
    state: HologramState,
) -> ManipulatorResult<()> {
    let visibility = Visibility::for_state(state, &*world.get::<&ManipulatorSettings>(entity)?);

    world.get::<&mut Hologram>(entity)?.state = state;

    if let Ok(mut visuals) = world.get::<&mut HologramVisuals>(entity) {
        visuals.visibility = visibility;
        if !visibility.base {
            visuals.base = None;
        }
        if !visibility.pivot {
            visuals.pivot_marker = None;
        }
    }

    if let Ok(mut handles) = world.get::<&mut Handles>(entity) {
        handles.set_enabled(state == HologramState::Active, None);
    }

    if let Ok(mut highlight) = world.get::<&mut Highlight>(entity) {
        if visibility.boundary_box {
            highlight.show_highlight();
        } else {
            highlight.hide_highlight();
        }
    }

    debug!("{entity:?} is now {state:?}");
    Ok(())
}

/// Send a hologram back to Inactive, cancelling whatever gesture it was in
pub(crate) fn deactivate(world: &mut World, entity: Entity) -> ManipulatorResult<()> {
    let hologram = world.get::<&Hologram>(entity)?;
    if !hologram.initialized || hologram.state == HologramState::Inactive {
        return Ok(());
    }
    drop(hologram);

    gesture_end(world, entity)?;
    set_hologram_state(world, entity, HologramState::Inactive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{HandleId, HologramKind, LocalTransform, OutlineHighlight, Parent, RenderBounds},
        systems::init_hologram,
        util::{init_test_logging, Aabb},
    };
    use glam::Vec3;

    fn spawn_initialized(world: &mut World, registry: &mut HologramRegistry, x: f32) -> Entity {
        let hologram = world.spawn((
            Hologram::new(HologramKind::Volumetric),
            LocalTransform::from_translation(Vec3::new(x, 0., -2.)),
        ));
        world.spawn((
            Parent(hologram),
            LocalTransform::default(),
            RenderBounds(Aabb::from_center_size(Vec3::ZERO, Vec3::splat(0.5))),
        ));
        init_hologram(world, registry, hologram, Some(&ManipulatorSettings::default())).unwrap();
        hologram
    }

    fn state(world: &World, entity: Entity) -> HologramState {
        world.get::<&Hologram>(entity).unwrap().state()
    }

    #[test]
    fn test_state_machine() {
        init_test_logging();
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let hologram = spawn_initialized(&mut world, &mut registry, 0.);
        let event =
            |world: &mut World, e| handle_interaction(world, &registry, hologram, e).unwrap();

        // Clicks are ignored until the hologram is focused
        assert!(!event(&mut world, InteractionEvent::Click));
        assert_eq!(state(&world, hologram), HologramState::Inactive);

        assert!(event(&mut world, InteractionEvent::FocusEnter));
        assert_eq!(state(&world, hologram), HologramState::Focused);
        {
            let visuals = world.get::<&HologramVisuals>(hologram).unwrap();
            assert!(visuals.visibility.boundary_box);
            assert!(!visuals.visibility.handles);
        }

        assert!(event(&mut world, InteractionEvent::Click));
        assert_eq!(state(&world, hologram), HologramState::Active);
        assert!(world
            .get::<&Handles>(hologram)
            .unwrap()
            .is_enabled(HandleId::Scale(0)));

        // Losing focus doesn't deactivate
        assert!(!event(&mut world, InteractionEvent::FocusExit));
        assert_eq!(state(&world, hologram), HologramState::Active);

        assert!(event(&mut world, InteractionEvent::Disable));
        assert_eq!(state(&world, hologram), HologramState::Inactive);
        assert!(!world
            .get::<&Handles>(hologram)
            .unwrap()
            .is_enabled(HandleId::Translate));

        // Disabled holograms can't be focused
        assert!(!event(&mut world, InteractionEvent::FocusEnter));
        assert!(!event(&mut world, InteractionEvent::Enable));
        assert!(event(&mut world, InteractionEvent::FocusEnter));
        assert!(event(&mut world, InteractionEvent::FocusExit));
        assert_eq!(state(&world, hologram), HologramState::Inactive);
    }

    #[test]
    fn test_click_deactivates_others() {
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let first = spawn_initialized(&mut world, &mut registry, 0.);
        let second = spawn_initialized(&mut world, &mut registry, 2.);

        for e in [InteractionEvent::FocusEnter, InteractionEvent::Click] {
            handle_interaction(&mut world, &registry, first, e).unwrap();
        }
        assert_eq!(state(&world, first), HologramState::Active);

        for e in [InteractionEvent::FocusEnter, InteractionEvent::Click] {
            handle_interaction(&mut world, &registry, second, e).unwrap();
        }
        assert_eq!(state(&world, second), HologramState::Active);
        assert_eq!(state(&world, first), HologramState::Inactive);
        assert!(!world
            .get::<&Handles>(first)
            .unwrap()
            .is_enabled(HandleId::Rotate(0)));
    }

    #[test]
    fn test_highlight_follows_state() {
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let hologram = spawn_initialized(&mut world, &mut registry, 0.);

        let visible = |world: &World| match &*world.get::<&Highlight>(hologram).unwrap() {
            Highlight::Outline(OutlineHighlight { visible, .. }) => *visible,
            _ => panic!("init should add an outline"),
        };
        assert!(!visible(&world));
        handle_interaction(&mut world, &registry, hologram, InteractionEvent::FocusEnter).unwrap();
        assert!(visible(&world));
    }

    #[test]
    fn test_uninitialized_ignores_events() {
        let mut world = World::new();
        let registry = HologramRegistry::new();
        let hologram = world.spawn((Hologram::new(HologramKind::Flat), LocalTransform::default()));
        let changed =
            handle_interaction(&mut world, &registry, hologram, InteractionEvent::FocusEnter).unwrap();
        assert!(!changed);
        assert_eq!(state(&world, hologram), HologramState::Inactive);
    }
}
