use glam::{Quat, Vec3};
use hecs::{Entity, World};
use log::trace;

use crate::{
    components::{
        BoundaryBox, Gesture, Handles, LocalTransform, ManipulationAxis, RotateGesture,
    },
    contexts::{GestureInput, Viewer},
    settings::ManipulatorSettings,
    systems::{pivot::relocate_pivot, update_global_transform::global_from_local},
    util::project_on_plane,
    ManipulatorError, ManipulatorResult, FORWARD,
};

/// Rotations happen around the box center, so the pivot moves there for the gesture.
pub(super) fn start(
    world: &mut World,
    viewer: &Viewer,
    entity: Entity,
    handle: usize,
    input: &GestureInput,
) -> ManipulatorResult<Gesture> {
    let world_from_local = global_from_local(world, entity)?;
    let center = world_from_local.transform_point3(world.get::<&BoundaryBox>(entity)?.center());
    relocate_pivot(world, entity, center)?;

    let axis = world
        .get::<&Handles>(entity)?
        .rotate
        .get(handle)
        .ok_or(ManipulatorError::InvalidHandle)?
        .axis;
    let (_, rotation, _) = global_from_local(world, entity)?.to_scale_rotation_translation();
    let manipulation_axis = manipulation_axis(axis.world_axis(rotation), viewer);
    trace!("Rotating {entity:?} around {axis:?} with {manipulation_axis:?} hand movement");

    Ok(Gesture::Rotating(RotateGesture {
        handle,
        axis,
        manipulation_axis,
        last_delta: manipulation_axis.component(input.cumulative_delta),
        accumulated: 0.,
    }))
}

/// Accumulates hand movement and turns the hologram one increment at a time.
pub(super) fn update(
    world: &mut World,
    viewer: &Viewer,
    entity: Entity,
    gesture: &mut RotateGesture,
    input: &GestureInput,
) -> ManipulatorResult<bool> {
    let (rotate_factor, increment) = {
        let settings = world.get::<&ManipulatorSettings>(entity)?;
        (settings.rotate_factor, settings.rotation_increment)
    };

    let delta = gesture.manipulation_axis.component(input.cumulative_delta);
    gesture.accumulated += (delta - gesture.last_delta) * rotate_factor;
    gesture.last_delta = delta;

    if (gesture.accumulated / increment).abs() <= 1. {
        return Ok(true);
    }

    let position = Vec3::from(global_from_local(world, entity)?.translation);
    // Keep hand movement and rotation direction consistent on either side of the viewer
    let side = if FORWARD.dot(position - viewer.position) < 0. {
        1.
    } else {
        -1.
    };
    let angle = increment.to_radians() * gesture.accumulated.signum() * side;

    let mut local_transform = world.get::<&mut LocalTransform>(entity)?;
    let parent_axis = gesture.axis.world_axis(local_transform.rotation);
    local_transform.rotation =
        (Quat::from_axis_angle(parent_axis.normalize(), angle) * local_transform.rotation).normalize();
    gesture.accumulated = 0.;
    trace!("Rotated {entity:?} by {} degrees", angle.to_degrees());
    Ok(true)
}

pub(super) fn end(world: &mut World, entity: Entity) -> ManipulatorResult<()> {
    let world_from_local = global_from_local(world, entity)?;
    let bottom_center =
        world_from_local.transform_point3(world.get::<&BoundaryBox>(entity)?.bottom_center());
    relocate_pivot(world, entity, bottom_center)?;
    Ok(())
}

/// Horizontal hand movement turns the hologram around axes that look vertical to the viewer,
/// vertical hand movement around the rest.
fn manipulation_axis(world_axis: Vec3, viewer: &Viewer) -> ManipulationAxis {
    let projected = project_on_plane(world_axis, viewer.horizontal_forward());
    if projected.x.abs() > projected.y.abs() {
        ManipulationAxis::Y
    } else {
        ManipulationAxis::X
    }
}
