use glam::Vec3;

use super::HologramState;
use crate::settings::ManipulatorSettings;

/// Which parts of the manipulation UI should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    /// The box outline
    pub boundary_box: bool,
    /// Scale and rotate handles
    pub handles: bool,
    /// The menu
    pub menu: bool,
    /// The ground projection of the box
    pub base: bool,
    /// The pivot marker
    pub pivot: bool,
}

impl Visibility {
    /// What is shown in each state
    pub fn for_state(state: HologramState, settings: &ManipulatorSettings) -> Self {
        match state {
            HologramState::Inactive => Self::default(),
            HologramState::Focused => Self {
                boundary_box: true,
                base: settings.enable_base_drawing,
                ..Default::default()
            },
            HologramState::Active => Self {
                boundary_box: true,
                handles: true,
                menu: settings.enable_controller_menu,
                base: settings.enable_base_drawing,
                pivot: settings.enable_pivot_drawing,
            },
        }
    }
}

/// Everything the host needs to draw a hologram's manipulation UI, refreshed every frame by
/// [`crate::systems::hologram_system`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HologramVisuals {
    /// What to draw
    pub visibility: Visibility,
    /// Outline segments in world space
    pub outline: Vec<(Vec3, Vec3)>,
    /// Width of the outline
    pub line_width: f32,
    /// Where to draw the pivot marker
    pub pivot_marker: Option<Vec3>,
    /// Corners of the ground projection
    pub base: Option<[Vec3; 4]>,
}
