use glam::Affine3A;
use hecs::{Entity, World};

use crate::{
    components::{GlobalTransform, LocalTransform, Parent},
    ManipulatorResult,
};

/// Update global transform system
/// Roots get their LocalTransform as is. Every entity with a Parent walks up the hierarchy,
/// composing LocalTransforms until it reaches a root.
pub fn update_global_transform_system(world: &mut World) {
    for (_, (local_transform, global_transform)) in world
        .query_mut::<(&LocalTransform, &mut GlobalTransform)>()
        .without::<&Parent>()
    {
        global_transform.0 = local_transform.to_affine();
    }

    // Views do the borrow checking once rather than per entity as in `World::get`.
    let mut parents = world.query::<&Parent>();
    let parents = parents.view();
    let mut locals = world.query::<&LocalTransform>();
    let locals = locals.view();

    // `GlobalTransform` is only borrowed here, so this can coexist with both views.
    for (_, (parent, local_transform, global_transform)) in world
        .query::<(&Parent, &LocalTransform, &mut GlobalTransform)>()
        .iter()
    {
        let mut relative = local_transform.to_affine();
        let mut ancestor = parent.0;
        while let Some(next) = parents.get(ancestor) {
            if let Some(local) = locals.get(ancestor) {
                relative = local.to_affine() * relative;
            }
            ancestor = next.0;
        }
        // `ancestor` has no parent, so it's a root
        let root = locals
            .get(ancestor)
            .map_or(Affine3A::IDENTITY, |l| l.to_affine());
        global_transform.0 = root * relative;
    }
}

/// The local to world transform of `entity`, computed from the current LocalTransforms rather
/// than the GlobalTransforms of the last frame.
pub fn global_from_local(world: &World, entity: Entity) -> ManipulatorResult<Affine3A> {
    let mut affine = world.get::<&LocalTransform>(entity)?.to_affine();
    let mut current = entity;
    while let Some(parent) = parent_of(world, current) {
        if let Ok(local) = world.get::<&LocalTransform>(parent) {
            affine = local.to_affine() * affine;
        }
        current = parent;
    }
    Ok(affine)
}

/// The transform from world space into the space `entity`'s LocalTransform is expressed in
pub fn parent_from_world(world: &World, entity: Entity) -> ManipulatorResult<Affine3A> {
    Ok(match parent_of(world, entity) {
        Some(parent) => global_from_local(world, parent)?.inverse(),
        None => Affine3A::IDENTITY,
    })
}

pub(crate) fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<&Parent>(entity).ok().map(|p| p.0)
}
