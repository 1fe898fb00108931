use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::{settings::ManipulatorSettings, util::divide_scalar, ManipulatorResult};

/// Whether the hologram is a volume or flat content (a panel, an image, a video).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum HologramKind {
    /// 3D content. Gets 8 scale handles and 12 rotate handles.
    Volumetric,
    /// 2D content. The thinnest axis is ignored; gets 4 scale handles and 4 rotate handles.
    Flat,
}

/// How much of the manipulation UI is shown.
///
/// ```text
/// Inactive --focus enter--> Focused --click--> Active
///    ^  <---focus exit-------'                   |
///    '------disable / another hologram active----'
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum HologramState {
    /// No handles, no box
    #[default]
    Inactive,
    /// Bounding box and ground projection only
    Focused,
    /// Handles, menu and bounding box
    Active,
}

/// The range the uniform scale of a hologram is clamped to while it's being scaled.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScaleRange {
    /// Smallest allowed uniform scale
    pub min: f32,
    /// Largest allowed uniform scale
    pub max: f32,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self {
            min: 0.,
            max: f32::INFINITY,
        }
    }
}

impl ScaleRange {
    /// Derive the range from the configured object sizes and the largest side of the
    /// hologram's bounds at its current scale.
    pub fn from_max_side(settings: &ManipulatorSettings, max_side: f32) -> ManipulatorResult<Self> {
        Ok(Self {
            min: divide_scalar(settings.min_object_size, max_side)?,
            max: divide_scalar(settings.max_object_size, max_side)?,
        })
    }

    /// Clamp `scale` into the range
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.max(self.min).min(self.max)
    }
}

/// Marks an entity as a manipulable hologram.
///
/// Basic usage:
/// ```ignore
/// let entity = world.spawn((Hologram::new(HologramKind::Volumetric), LocalTransform::default()));
/// systems::init_hologram(&mut world, &mut registry, entity, Some(&settings))?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Hologram {
    /// 3D or 2D content
    pub kind: HologramKind,
    /// Range used by scale gestures. Set during initialization.
    pub scale_range: ScaleRange,
    /// Size of handle visuals, derived from the box each frame
    pub ui_scale: f32,
    /// The child holding the hologram's content. Its origin is the hologram's original pivot.
    pub content: Option<Entity>,
    pub(crate) state: HologramState,
    pub(crate) enabled: bool,
    pub(crate) initialized: bool,
    pub(crate) registered: bool,
}

impl Hologram {
    /// A hologram that still has to go through [`crate::systems::init_hologram`]
    pub fn new(kind: HologramKind) -> Self {
        Self {
            kind,
            scale_range: Default::default(),
            ui_scale: 0.,
            content: None,
            state: HologramState::Inactive,
            enabled: true,
            initialized: false,
            registered: false,
        }
    }

    /// Current interaction state
    pub fn state(&self) -> HologramState {
        self.state
    }

    /// Has initialization completed?
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Disabled holograms ignore focus and clicks until they're enabled again
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Is this hologram in the registry?
    pub fn is_registered(&self) -> bool {
        self.registered
    }
}
