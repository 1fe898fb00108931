use glam::Vec3;
use hecs::{Entity, World};
use log::trace;

use crate::{
    components::{BoundaryBox, Gesture, Handles, Hologram, LocalTransform, ScaleGesture},
    contexts::GestureInput,
    settings::ManipulatorSettings,
    systems::{pivot::relocate_pivot, update_global_transform::global_from_local},
    ManipulatorError, ManipulatorResult,
};

/// Scaling happens around the corner opposite the handle, so that corner stays put.
pub(super) fn start(
    world: &mut World,
    entity: Entity,
    handle: usize,
    input: &GestureInput,
) -> ManipulatorResult<Gesture> {
    let opposite = world
        .get::<&Handles>(entity)?
        .scale
        .get(handle)
        .ok_or(ManipulatorError::InvalidHandle)?
        .opposite;

    let world_from_local = global_from_local(world, entity)?;
    let anchor = {
        let mut boundary_box = world.get::<&mut BoundaryBox>(entity)?;
        boundary_box.update(&world_from_local);
        *boundary_box
            .controller_points
            .get(opposite)
            .ok_or(ManipulatorError::InvalidHandle)?
    };
    relocate_pivot(world, entity, anchor)?;
    trace!("Scaling {entity:?} around {anchor}");

    Ok(Gesture::Scaling(ScaleGesture {
        handle,
        last_delta: input.cumulative_delta.z,
    }))
}

/// Push/pull along depth scales uniformly, clamped to the hologram's scale range.
pub(super) fn update(
    world: &mut World,
    entity: Entity,
    gesture: &mut ScaleGesture,
    input: &GestureInput,
) -> ManipulatorResult<bool> {
    let scale_factor = world.get::<&ManipulatorSettings>(entity)?.scale_factor;
    let scale_range = world.get::<&Hologram>(entity)?.scale_range;

    let change = (input.cumulative_delta.z - gesture.last_delta) * scale_factor;
    gesture.last_delta = input.cumulative_delta.z;

    let mut local_transform = world.get::<&mut LocalTransform>(entity)?;
    let next = scale_range.clamp(local_transform.scale.x * (1. + change));
    local_transform.scale = Vec3::splat(next);
    Ok(true)
}

pub(super) fn end(world: &mut World, entity: Entity) -> ManipulatorResult<()> {
    let world_from_local = global_from_local(world, entity)?;
    let bottom_center =
        world_from_local.transform_point3(world.get::<&BoundaryBox>(entity)?.bottom_center());
    relocate_pivot(world, entity, bottom_center)?;
    Ok(())
}
