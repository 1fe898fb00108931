use hecs::{Entity, World};
use log::{debug, error, info, warn};

use crate::{
    components::{
        boundary_box::MIN_BOX_DIMENSION, BoundaryBox, GlobalTransform, Handles, Highlight,
        Hologram, HologramState, HologramVisuals, LocalTransform, Manipulation, Menu,
        OutlineHighlight, Parent, RenderBounds, ScaleRange, TrackedMenu,
    },
    contexts::HologramRegistry,
    settings::ManipulatorSettings,
    systems::{
        gestures::gesture_end,
        interaction::set_hologram_state,
        pivot::relocate_pivot,
        update_global_transform::global_from_local,
    },
    util::{divide_scalar, Aabb},
    ManipulatorError, ManipulatorResult,
};

/// Get a hologram ready for interaction:
///
/// 1. Settings come from the entity, or from `default_settings` if it has none
/// 1. The box is computed from the [`RenderBounds`] of the hologram and its children
/// 1. The pivot moves to the box center, the hologram is resized into the configured size range,
///    then the pivot moves to the bottom of the box
/// 1. Handles, visuals and capabilities are added and the hologram starts out Inactive
/// 1. The hologram is registered, unless the settings say otherwise
///
/// Calling this on a hologram that's already initialized does nothing. On error the hologram
/// stays uninitialized and ignores interaction, so it's just displayed.
pub fn init_hologram(
    world: &mut World,
    registry: &mut HologramRegistry,
    entity: Entity,
    default_settings: Option<&ManipulatorSettings>,
) -> ManipulatorResult<()> {
    let kind = {
        let hologram = world.get::<&Hologram>(entity)?;
        if hologram.is_initialized() {
            debug!("{entity:?} is already initialized");
            return Ok(());
        }
        hologram.kind
    };

    let settings = match world.get::<&ManipulatorSettings>(entity) {
        Ok(settings) => ManipulatorSettings::clone(&settings),
        Err(_) => match default_settings {
            Some(settings) => settings.clone(),
            None => {
                error!("[HOLOGRAM] {entity:?} has no settings and there are no defaults, it will stay static");
                return Err(ManipulatorError::MissingSettings);
            }
        },
    };

    let bounds = local_bounds(world, entity)?;
    if bounds.size().abs().max_element() < MIN_BOX_DIMENSION {
        return Err(ManipulatorError::DegenerateBounds);
    }
    let content = content_of(world, entity);

    let mut boundary_box = BoundaryBox::new(kind);
    boundary_box.set_bounds(&bounds);
    world.insert(
        entity,
        (
            settings.clone(),
            boundary_box,
            Handles::new(kind),
            HologramVisuals::default(),
        ),
    )?;
    if !world.entity(entity)?.has::<GlobalTransform>() {
        world.insert_one(entity, GlobalTransform::default())?;
    }
    if !world.entity(entity)?.has::<Manipulation>() {
        world.insert_one(entity, Manipulation::default())?;
    }
    if !world.entity(entity)?.has::<Highlight>() {
        let outline = OutlineHighlight::new(settings.box_color, settings.face_highlight_color);
        world.insert_one(entity, Highlight::Outline(outline))?;
    }
    if !world.entity(entity)?.has::<Menu>() && settings.enable_controller_menu {
        world.insert_one(entity, Menu::Tracked(TrackedMenu::default()))?;
    }

    let world_from_local = global_from_local(world, entity)?;
    relocate_pivot(world, entity, world_from_local.transform_point3(bounds.center()))?;

    // The scale range is expressed as local scale, so it's derived at unit scale
    let scale_range = ScaleRange::from_max_side(&settings, bounds.size().max_element())?;
    {
        let mut local_transform = world.get::<&mut LocalTransform>(entity)?;
        let max_side = (bounds.size() * local_transform.scale.abs()).max_element();
        let clamped = max_side.clamp(settings.min_object_size, settings.max_object_size);
        if clamped != max_side {
            let factor = divide_scalar(clamped, max_side)?;
            local_transform.scale *= factor;
            info!("[HOLOGRAM] Resized {entity:?} by {factor} to fit the allowed size");
        }
    }

    let world_from_local = global_from_local(world, entity)?;
    let bottom_center =
        world_from_local.transform_point3(world.get::<&BoundaryBox>(entity)?.bottom_center());
    relocate_pivot(world, entity, bottom_center)?;

    let world_from_local = global_from_local(world, entity)?;
    let min_extent = {
        let mut boundary_box = world.get::<&mut BoundaryBox>(entity)?;
        boundary_box.update(&world_from_local);
        boundary_box.min_extent
    };

    {
        let mut hologram = world.get::<&mut Hologram>(entity)?;
        hologram.scale_range = scale_range;
        hologram.content = content;
        hologram.ui_scale = settings.ui_scale(min_extent);
        hologram.initialized = true;
    }
    set_hologram_state(world, entity, HologramState::Inactive)?;

    if settings.register_in_holograms_list {
        registry.register(entity);
        world.get::<&mut Hologram>(entity)?.registered = true;
    }

    info!("[HOLOGRAM] Initialized {entity:?} as {kind:?}");
    Ok(())
}

/// Tear a hologram down: end any gesture, unregister it and despawn it with everything under it.
pub fn destroy_hologram(
    world: &mut World,
    registry: &mut HologramRegistry,
    entity: Entity,
) -> ManipulatorResult<()> {
    if world.get::<&Hologram>(entity)?.is_initialized() {
        if let Err(e) = gesture_end(world, entity) {
            warn!("Unable to end the gesture on {entity:?} before destroying it: {e:?}");
        }
    }
    registry.unregister(entity);

    for descendant in descendants(world, entity) {
        world.despawn(descendant)?;
    }
    world.despawn(entity)?;
    info!("[HOLOGRAM] Destroyed {entity:?}");
    Ok(())
}

/// Bounds of the hologram and its direct children, in the hologram's local space.
pub fn local_bounds(world: &World, entity: Entity) -> ManipulatorResult<Aabb> {
    let own = world.get::<&RenderBounds>(entity).ok().map(|b| b.0);
    let children = world
        .query::<(&Parent, &RenderBounds, &LocalTransform)>()
        .iter()
        .filter(|(_, (parent, _, _))| parent.0 == entity)
        .map(|(_, (_, bounds, local_transform))| bounds.0.transformed(&local_transform.to_affine()))
        .collect::<Vec<_>>();

    own.into_iter()
        .chain(children)
        .reduce(|a, b| a.encapsulate(&b))
        .ok_or(ManipulatorError::MissingRenderBounds)
}

/// The first child with render bounds, in spawn order
fn content_of(world: &World, entity: Entity) -> Option<Entity> {
    world
        .query::<(&Parent, &RenderBounds)>()
        .iter()
        .filter(|(_, (parent, _))| parent.0 == entity)
        .map(|(child, _)| child)
        .min_by_key(|child| child.id())
}

fn descendants(world: &World, entity: Entity) -> Vec<Entity> {
    let mut found = Vec::new();
    let mut frontier = vec![entity];
    while let Some(current) = frontier.pop() {
        for (child, parent) in world.query::<&Parent>().iter() {
            if parent.0 == current {
                found.push(child);
                frontier.push(child);
            }
        }
    }
    found
}
