use hecs::{Entity, World};
use log::warn;

use crate::{
    components::{
        BoundaryBox, GroundProjection, Handles, Highlight, Highlightable, Hologram,
        HologramState, HologramVisuals, Menu, MenuController, MenuPlacement,
    },
    contexts::Viewer,
    settings::ManipulatorSettings,
    systems::{
        init_hologram::local_bounds, pivot::original_pivot,
        update_global_transform::global_from_local,
    },
    util::{index_of_closest, look_rotation, wrap_index},
    ManipulatorResult, UP,
};

/// Hologram system
/// Refreshes the box, handles, outline, menu and ground projection of every initialized hologram
/// that isn't Inactive. Run after the global transforms are up to date.
pub fn hologram_system(world: &mut World, viewer: &Viewer) {
    let holograms = world
        .query::<&Hologram>()
        .iter()
        .filter(|(_, h)| h.is_initialized() && h.state() != HologramState::Inactive)
        .map(|(e, _)| e)
        .collect::<Vec<_>>();

    for entity in holograms {
        if let Err(e) = update_hologram(world, viewer, entity) {
            warn!("Unable to update {entity:?}: {e:?}");
        }
    }
}

fn update_hologram(world: &mut World, viewer: &Viewer, entity: Entity) -> ManipulatorResult<()> {
    let world_from_local = global_from_local(world, entity)?;
    let bounds = local_bounds(world, entity)?;
    let pivot = original_pivot(world, entity)?;

    let (hologram, settings, boundary_box, handles, visuals, highlight, menu) = world
        .query_one_mut::<(
            &mut Hologram,
            &ManipulatorSettings,
            &mut BoundaryBox,
            &mut Handles,
            &mut HologramVisuals,
            Option<&mut Highlight>,
            Option<&mut Menu>,
        )>(entity)?;

    boundary_box.set_bounds(&bounds);
    boundary_box.update(&world_from_local);
    hologram.ui_scale = settings.ui_scale(boundary_box.min_extent);
    let ui_scale = hologram.ui_scale;

    handles.layout(boundary_box, ui_scale);
    visuals.outline = handles.segments(boundary_box);
    visuals.line_width = ui_scale * settings.line_width_factor;
    visuals.pivot_marker = visuals.visibility.pivot.then_some(pivot);
    if let Some(highlight) = highlight {
        highlight.place_outline(&visuals.outline, visuals.line_width);
    }

    let projection = boundary_box.projection(ui_scale);
    visuals.base = visuals.visibility.base.then_some(projection.corners);
    if visuals.visibility.menu {
        if let (Some(menu), Some(placement)) = (
            menu,
            menu_placement(&projection, viewer, ui_scale * settings.menu_scale_factor),
        ) {
            menu.place(placement);
        }
    }
    Ok(())
}

/// The menu goes on the side of the ground projection nearest the viewer, facing out.
pub fn menu_placement(
    projection: &GroundProjection,
    viewer: &Viewer,
    scale: f32,
) -> Option<MenuPlacement> {
    let midpoints = &projection.midpoints;
    let index = index_of_closest(midpoints, viewer.position)?;
    let neighbours = midpoints[wrap_index(index as isize + 1, 4)]
        + midpoints[wrap_index(index as isize - 1, 4)];
    let outward = midpoints[index] - neighbours / 2.;
    let facing = if outward.dot(viewer.forward()) < 0. {
        outward
    } else {
        -outward
    };

    Some(MenuPlacement {
        position: midpoints[index],
        rotation: look_rotation(facing, UP),
        scale,
    })
}
