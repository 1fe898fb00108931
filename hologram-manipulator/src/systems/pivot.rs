use glam::{Quat, Vec3};
use hecs::{Entity, World};
use log::debug;

use crate::{
    components::{BoundaryBox, Hologram, LocalTransform, Parent, RenderBounds},
    systems::update_global_transform::{global_from_local, parent_from_world},
    ManipulatorResult,
};

/// Move the origin of `entity` to `new_position` (world space) without moving anything that's
/// visible: its children and its [`BoundaryBox`] are re-expressed in the new local frame so they
/// keep their world placement.
///
/// Returns `false` if the origin was already there.
pub fn relocate_pivot(
    world: &mut World,
    entity: Entity,
    new_position: Vec3,
) -> ManipulatorResult<bool> {
    let world_from_old = global_from_local(world, entity)?;
    if Vec3::from(world_from_old.translation).distance(new_position) == 0. {
        return Ok(false);
    }

    let parent_from_world = parent_from_world(world, entity)?;
    world.get::<&mut LocalTransform>(entity)?.translation =
        parent_from_world.transform_point3(new_position);

    let world_from_new = global_from_local(world, entity)?;
    let new_from_old = world_from_new.inverse() * world_from_old;

    for (_, (parent, local_transform)) in world.query_mut::<(&Parent, &mut LocalTransform)>() {
        if parent.0 == entity {
            local_transform.update_from_affine(&(new_from_old * local_transform.to_affine()));
        }
    }

    if let Ok(mut boundary_box) = world.get::<&mut BoundaryBox>(entity) {
        let center = new_from_old.transform_point3(boundary_box.center());
        boundary_box.set_center(center);
    }
    // Geometry should live on children, but bounds on the hologram itself have to follow too
    if let Ok(mut render_bounds) = world.get::<&mut RenderBounds>(entity) {
        render_bounds.0 = render_bounds.0.transformed(&new_from_old);
    }

    debug!("Moved pivot of {entity:?} to {new_position}");
    Ok(true)
}

/// World position of the hologram's content origin: where the content's author put its pivot.
/// Falls back to the hologram's own origin when it has no content child.
pub fn original_pivot(world: &World, entity: Entity) -> ManipulatorResult<Vec3> {
    let content = world.get::<&Hologram>(entity)?.content;
    let origin = match content {
        Some(content) if world.contains(content) => content,
        _ => entity,
    };
    Ok(global_from_local(world, origin)?.translation.into())
}

/// Place `entity` at a world position and rotation, whatever its parent is.
pub fn set_world_pose(
    world: &mut World,
    entity: Entity,
    position: Vec3,
    rotation: Quat,
) -> ManipulatorResult<()> {
    let parent_from_world = parent_from_world(world, entity)?;
    let (_, parent_rotation, _) = parent_from_world.to_scale_rotation_translation();
    let mut local_transform = world.get::<&mut LocalTransform>(entity)?;
    local_transform.translation = parent_from_world.transform_point3(position);
    local_transform.rotation = (parent_rotation * rotation).normalize();
    Ok(())
}
