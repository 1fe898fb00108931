use glam::{Quat, Vec3};
use hecs::{Entity, World};
use log::debug;

use crate::{
    components::{
        BoundaryBox, DragGesture, Gesture, Hologram, HologramKind, Manipulation,
        SpatialSurface, TranslateRotationMode,
    },
    contexts::{GestureInput, HologramRegistry, Viewer},
    settings::ManipulatorSettings,
    snapping::{Cuboid, Snapper},
    systems::{
        pivot::{original_pivot, set_world_pose},
        update_global_transform::global_from_local,
    },
    util::{divide_scalar, look_rotation},
    ManipulatorResult, FORWARD, UP,
};

/// Remember where the hand, the grab point and the hologram are relative to the viewer, and
/// capture the snapping peers.
pub(super) fn start(
    world: &mut World,
    registry: &HologramRegistry,
    viewer: &Viewer,
    entity: Entity,
    input: &GestureInput,
) -> ManipulatorResult<Gesture> {
    let pivot = viewer.hand_pivot();
    let (_, rotation, position) = global_from_local(world, entity)?.to_scale_rotation_translation();

    let hand_direction = (input.hand_position - pivot).normalize_or_zero();
    let object_direction = (input.gaze_hit - pivot).normalize_or_zero();

    let snapper = {
        let settings = world.get::<&ManipulatorSettings>(entity)?;
        // Only registered holograms take part in snapping
        if world.get::<&Hologram>(entity)?.is_registered() {
            Snapper::begin(
                &settings,
                holographic_peers(world, registry, entity)?,
                spatial_peers(world),
            )
        } else {
            Snapper::begin(&settings, Vec::new(), Vec::new())
        }
    };

    Ok(Gesture::Dragging(Box::new(DragGesture {
        hand_ref_distance: input.hand_position.distance(pivot),
        object_ref_distance: input.gaze_hit.distance(pivot),
        gaze_angular_offset: rotation_between(
            viewer.inverse_transform_direction(hand_direction),
            viewer.inverse_transform_direction(object_direction),
        ),
        grab_offset: viewer.inverse_transform_direction(position - input.gaze_hit),
        object_ref_forward: viewer.inverse_transform_direction(rotation * FORWARD),
        object_ref_up: viewer.inverse_transform_direction(rotation * UP),
        dragging_position: input.gaze_hit,
        snapper,
    })))
}

/// Follow the hand, then nudge the hologram onto whatever it's snapping to.
pub(super) fn update(
    world: &mut World,
    viewer: &Viewer,
    entity: Entity,
    drag: &mut DragGesture,
    input: &GestureInput,
) -> ManipulatorResult<bool> {
    let (translate_factor, position_lerp_speed, rotation_lerp_speed) = {
        let settings = world.get::<&ManipulatorSettings>(entity)?;
        (
            settings.translate_factor,
            settings.position_lerp_speed,
            settings.rotation_lerp_speed,
        )
    };
    let rotation_mode = world.get::<&Manipulation>(entity)?.rotation_mode;

    let pivot = viewer.hand_pivot();
    let hand_direction =
        viewer.inverse_transform_direction((input.hand_position - pivot).normalize_or_zero());
    let target_direction = viewer
        .transform_direction((drag.gaze_angular_offset * hand_direction).normalize_or_zero());

    // Moving the hand away from the body pushes the hologram further than the hand moved
    let distance_ratio =
        divide_scalar(input.hand_position.distance(pivot), drag.hand_ref_distance).unwrap_or(1.);
    let distance_offset = if distance_ratio > 0. {
        (distance_ratio - 1.) * translate_factor
    } else {
        0.
    };
    drag.dragging_position = pivot + target_direction * (drag.object_ref_distance + distance_offset);

    let (_, rotation, position) = global_from_local(world, entity)?.to_scale_rotation_translation();
    let target_rotation = match rotation_mode {
        TranslateRotationMode::OrientTowardUser
        | TranslateRotationMode::OrientTowardUserAndKeepUpright => {
            look_rotation(position - pivot, UP)
        }
        TranslateRotationMode::LockObjectRotation => rotation,
        TranslateRotationMode::Default => look_rotation(
            viewer.transform_direction(drag.object_ref_forward),
            viewer.transform_direction(drag.object_ref_up),
        ),
    };

    let target_position = drag.dragging_position + viewer.transform_direction(drag.grab_offset);
    let position = position.lerp(target_position, position_lerp_speed);
    let mut rotation = rotation.slerp(target_rotation, rotation_lerp_speed).normalize();
    if rotation_mode == TranslateRotationMode::OrientTowardUserAndKeepUpright {
        rotation = (rotation_between((rotation * UP).normalize(), UP) * rotation).normalize();
    }
    set_world_pose(world, entity, position, rotation)?;

    let this = hologram_cuboid(world, entity)?;
    let displacement = drag.snapper.update(world, &this)?;
    if displacement != Vec3::ZERO {
        set_world_pose(world, entity, position + displacement, rotation)?;
    }
    Ok(true)
}

pub(super) fn end(
    world: &mut World,
    entity: Entity,
    drag: &mut DragGesture,
) -> ManipulatorResult<()> {
    let this = hologram_cuboid(world, entity)?;
    drag.snapper.end(world, &this)
}

/// Other registered volumetric holograms, as they are right now
fn holographic_peers(
    world: &World,
    registry: &HologramRegistry,
    entity: Entity,
) -> ManipulatorResult<Vec<Cuboid>> {
    let mut peers = Vec::new();
    for peer in registry.entities() {
        if peer == entity {
            continue;
        }
        let is_volumetric = world.get::<&Hologram>(peer).map_or(false, |h| {
            h.is_initialized() && h.kind == HologramKind::Volumetric
        });
        if is_volumetric {
            peers.push(hologram_cuboid(world, peer)?);
        }
    }
    debug!("{entity:?} has {} holographic snapping peers", peers.len());
    Ok(peers)
}

fn spatial_peers(world: &World) -> Vec<Cuboid> {
    world
        .query::<&SpatialSurface>()
        .iter()
        .filter(|(_, surface)| surface.is_snappable())
        .map(|(_, surface)| Cuboid::from_bounds(&surface.bounds))
        .collect()
}

/// The hologram's box at its current transform, pivoting on the content's origin
fn hologram_cuboid(world: &World, entity: Entity) -> ManipulatorResult<Cuboid> {
    let world_from_local = global_from_local(world, entity)?;
    let boundary_box = world.get::<&BoundaryBox>(entity)?;
    let edge_points =
        std::array::from_fn(|i| boundary_box.edge_point_position(&world_from_local, i));
    Ok(Cuboid::from_edge_points(
        edge_points,
        Some(entity),
        Some(original_pivot(world, entity)?),
    ))
}

fn rotation_between(from: Vec3, to: Vec3) -> Quat {
    match (from.try_normalize(), to.try_normalize()) {
        (Some(from), Some(to)) => Quat::from_rotation_arc(from, to),
        _ => Quat::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{HandleId, Highlight, SurfaceKind},
        settings::{SnappingMode, SnappingTarget},
        systems::gestures::{gesture_end, gesture_start, gesture_update, tests::spawn_active},
        util::Aabb,
    };
    use approx::assert_relative_eq;

    fn position(world: &World, entity: Entity) -> Vec3 {
        global_from_local(world, entity).unwrap().translation.into()
    }

    fn highlighted_face(world: &World, entity: Entity) -> Option<[Vec3; 4]> {
        match &*world.get::<&Highlight>(entity).unwrap() {
            Highlight::Outline(outline) => outline.highlighted_face(),
            _ => panic!("init should add an outline"),
        }
    }

    fn settings() -> ManipulatorSettings {
        ManipulatorSettings {
            snapping_target: SnappingTarget::Off,
            position_lerp_speed: 1.,
            rotation_lerp_speed: 1.,
            ..Default::default()
        }
    }

    #[test]
    fn test_drag_follows_hand() {
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let viewer = Viewer::default();
        let hologram = spawn_active(&mut world, &mut registry, &settings(), Vec3::NEG_Z * 2., 0.5);
        let start_position = position(&world, hologram);

        let hand = Vec3::new(0.2, -0.3, -0.5);
        let gaze = Vec3::new(0., 0., -1.75);
        let input = GestureInput::from_hand(hand, gaze);
        assert!(gesture_start(&mut world, &registry, &viewer, hologram, HandleId::Translate, &input).unwrap());

        // Hand didn't move, neither does the hologram
        gesture_update(&mut world, &viewer, hologram, &input).unwrap();
        assert_relative_eq!(position(&world, hologram), start_position, epsilon = 1e-4);

        // Swinging the arm to the right around the pivot swings the hologram with it
        let pivot = viewer.hand_pivot();
        let swing = Quat::from_rotation_y(-0.3);
        let moved = GestureInput::from_hand(pivot + swing * (hand - pivot), gaze);
        gesture_update(&mut world, &viewer, hologram, &moved).unwrap();
        let moved_position = position(&world, hologram);
        assert!(moved_position.x > start_position.x + 0.1);

        // Locked rotation by default
        assert_relative_eq!(
            global_from_local(&world, hologram)
                .unwrap()
                .to_scale_rotation_translation()
                .1,
            Quat::IDENTITY,
            epsilon = 1e-5
        );
        assert!(gesture_end(&mut world, hologram).unwrap());
    }

    #[test]
    fn test_drag_orients_toward_user() {
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let viewer = Viewer::default();
        let initial = Vec3::new(2., 0., -2.);
        let hologram = spawn_active(&mut world, &mut registry, &settings(), initial, 0.5);
        world.get::<&mut Manipulation>(hologram).unwrap().rotation_mode =
            TranslateRotationMode::OrientTowardUserAndKeepUpright;

        let hand = Vec3::new(0.3, -0.3, -0.4);
        let input = GestureInput::from_hand(hand, Vec3::new(1.75, 0., -1.75));
        gesture_start(&mut world, &registry, &viewer, hologram, HandleId::Translate, &input).unwrap();
        gesture_update(&mut world, &viewer, hologram, &input).unwrap();

        let (_, rotation, _) = global_from_local(&world, hologram)
            .unwrap()
            .to_scale_rotation_translation();
        assert_relative_eq!(rotation * UP, UP, epsilon = 1e-4);
        let to_hologram = (position(&world, hologram) - viewer.hand_pivot()).normalize();
        assert!((rotation * FORWARD).dot(to_hologram) > 0.9);
    }

    #[test]
    fn test_drag_snaps_onto_floor() {
        let mut world = World::new();
        let mut registry = HologramRegistry::new();
        let viewer = Viewer::default();
        let settings = ManipulatorSettings {
            snapping_target: SnappingTarget::SpatialOnly,
            snapping_mode: SnappingMode::PivotAndFaces,
            ..settings()
        };
        // Bottom of the hologram 2cm above the floor
        let start = Vec3::new(0., -0.73, -2.);
        let hologram = spawn_active(&mut world, &mut registry, &settings, start, 0.5);
        world.spawn((SpatialSurface {
            bounds: Aabb::new(Vec3::new(-2., -1.1, -4.), Vec3::new(2., -1., 0.)),
            kind: SurfaceKind::Floor,
        },));

        let hand = Vec3::new(0., -0.5, -0.5);
        let input = GestureInput::from_hand(hand, Vec3::new(0., -0.73, -1.75));
        gesture_start(&mut world, &registry, &viewer, hologram, HandleId::Translate, &input).unwrap();
        gesture_update(&mut world, &viewer, hologram, &input).unwrap();

        // Pulled down flush with the floor
        assert_relative_eq!(position(&world, hologram).y, -1., epsilon = 1e-3);
        assert!(highlighted_face(&world, hologram).is_some());

        gesture_end(&mut world, hologram).unwrap();
        assert!(highlighted_face(&world, hologram).is_none());
    }
}
