use serde::{Deserialize, Serialize};

use crate::{components::Color, ManipulatorResult};

/// What a dragged hologram snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum SnappingTarget {
    /// No snapping
    #[default]
    Off,
    /// Only [`crate::components::SpatialSurface`]s
    SpatialOnly,
    /// Only other registered volumetric holograms
    HolographicOnly,
    /// Both. Spatial snapping wins when both apply.
    SpatialAndHolographic,
}

/// How a dragged hologram snaps to other holograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum SnappingMode {
    /// No snapping
    Off,
    /// Snap pivots together
    Pivot,
    /// Snap faces flush against each other
    Face,
    /// Both. Pivot snapping wins when both apply.
    #[default]
    PivotAndFaces,
}

/// Everything that can be tuned about manipulation.
///
/// Attach it to a hologram entity to override the defaults passed to
/// [`crate::ManipulatorBuilder::default_settings`]. Missing JSON fields take their default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ManipulatorSettings {
    /// Rotation is applied in steps of this many degrees
    pub rotation_increment: f32,
    /// Multiplies the rotate gesture delta
    pub rotate_factor: f32,
    /// Multiplies the scale gesture delta
    pub scale_factor: f32,
    /// Multiplies how far the hand moving away or toward the body pushes the hologram
    pub translate_factor: f32,
    /// Smallest allowed size of the hologram's largest side, in meters
    pub min_object_size: f32,
    /// Largest allowed size of the hologram's largest side, in meters
    pub max_object_size: f32,
    /// Below this size, handles stop shrinking with the hologram
    pub ui_min_hologram_size: f32,
    /// Handle size relative to the hologram
    pub ui_scaling_factor: f32,
    /// Handle size for holograms smaller than `ui_min_hologram_size`
    pub ui_minimum_scale: f32,
    /// Menu size relative to the handles
    pub menu_scale_factor: f32,
    /// Outline width relative to the handles
    pub line_width_factor: f32,
    /// How fast a dragged hologram catches up with the hand, per frame
    pub position_lerp_speed: f32,
    /// How fast a dragged hologram catches up with its target rotation, per frame
    pub rotation_lerp_speed: f32,
    /// What dragged holograms snap to
    pub snapping_target: SnappingTarget,
    /// How dragged holograms snap to other holograms
    pub snapping_mode: SnappingMode,
    /// Snapping kicks in closer than this, in meters
    pub snapping_distance: f32,
    /// Draw the ground projection of the box
    pub enable_base_drawing: bool,
    /// Draw a marker on the pivot
    pub enable_pivot_drawing: bool,
    /// Show a menu next to active holograms
    pub enable_controller_menu: bool,
    /// Add holograms to the registry. Unregistered holograms are never deactivated by others
    /// and are never snapping peers.
    pub register_in_holograms_list: bool,
    /// Outline color
    pub box_color: Color,
    /// Color of the handle being used
    pub active_controller_color: Color,
    /// Color of a face snapped flush against another
    pub face_highlight_color: Color,
    /// Outline color of holograms with snapped pivots
    pub snap_color: Color,
}

impl Default for ManipulatorSettings {
    fn default() -> Self {
        Self {
            rotation_increment: 10.,
            rotate_factor: 800.,
            scale_factor: 8.,
            translate_factor: 2.,
            min_object_size: 0.2,
            max_object_size: 3.,
            ui_min_hologram_size: 0.5,
            ui_scaling_factor: 1. / 20.,
            ui_minimum_scale: 1. / 60.,
            menu_scale_factor: 2.5,
            line_width_factor: 0.08,
            position_lerp_speed: 0.2,
            rotation_lerp_speed: 0.2,
            snapping_target: SnappingTarget::Off,
            snapping_mode: SnappingMode::PivotAndFaces,
            snapping_distance: 0.05,
            enable_base_drawing: false,
            enable_pivot_drawing: false,
            enable_controller_menu: true,
            register_in_holograms_list: true,
            box_color: Color::CYAN,
            active_controller_color: Color::YELLOW,
            face_highlight_color: Color::RED,
            snap_color: Color::ORANGE,
        }
    }
}

impl ManipulatorSettings {
    /// Parse settings from JSON. Fields that are left out keep their default value.
    pub fn from_json(json: &str) -> ManipulatorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Handle size for a hologram whose smallest relevant extent is `min_extent`.
    pub fn ui_scale(&self, min_extent: f32) -> f32 {
        if min_extent < self.ui_min_hologram_size {
            self.ui_minimum_scale
        } else {
            min_extent * self.ui_scaling_factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = ManipulatorSettings::from_json(
            r#"{ "snapping_target": "SpatialAndHolographic", "snapping_distance": 0.1 }"#,
        )
        .unwrap();
        assert_eq!(settings.snapping_target, SnappingTarget::SpatialAndHolographic);
        assert_relative_eq!(settings.snapping_distance, 0.1);
        assert_eq!(settings.snapping_mode, SnappingMode::PivotAndFaces);
        assert_relative_eq!(settings.rotation_increment, 10.);
        assert!(settings.register_in_holograms_list);

        assert!(ManipulatorSettings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_ui_scale() {
        let settings = ManipulatorSettings::default();
        assert_relative_eq!(settings.ui_scale(0.1), 1. / 60.);
        assert_relative_eq!(settings.ui_scale(2.0), 0.1);
    }
}
