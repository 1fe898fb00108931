use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::{HandleId, RotationAxis};
use crate::snapping::Snapper;

/// How a dragged hologram is rotated while it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum TranslateRotationMode {
    /// Keep the rotation it had relative to the viewer when the drag started
    Default,
    /// Don't rotate
    #[default]
    LockObjectRotation,
    /// Turn to face away from the viewer
    OrientTowardUser,
    /// Turn to face away from the viewer, but stay upright
    OrientTowardUserAndKeepUpright,
}

/// Which component of the gesture delta drives a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManipulationAxis {
    /// Horizontal hand movement
    X,
    /// Vertical hand movement
    Y,
}

impl ManipulationAxis {
    /// Pick the delta component
    pub fn component(&self, delta: Vec3) -> f32 {
        match self {
            ManipulationAxis::X => delta.x,
            ManipulationAxis::Y => delta.y,
        }
    }
}

/// State of a rotate gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateGesture {
    /// Rotate handle in use
    pub handle: usize,
    /// Local axis being rotated around
    pub axis: RotationAxis,
    /// Which hand movement drives the rotation
    pub manipulation_axis: ManipulationAxis,
    /// Delta component seen on the last update
    pub last_delta: f32,
    /// Degrees accumulated since the last increment was applied
    pub accumulated: f32,
}

/// State of a scale gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleGesture {
    /// Scale handle in use
    pub handle: usize,
    /// Depth delta seen on the last update
    pub last_delta: f32,
}

/// State of a drag. Directions are stored in the viewer's space so the hologram follows
/// the viewer's head as well as the hand.
#[derive(Debug, Clone)]
pub struct DragGesture {
    /// Distance from the hand pivot to the hand at the start
    pub hand_ref_distance: f32,
    /// Distance from the hand pivot to the grab point at the start
    pub object_ref_distance: f32,
    /// Rotation from the hand direction to the grab point direction, viewer space
    pub gaze_angular_offset: Quat,
    /// Grab point to hologram position, viewer space
    pub grab_offset: Vec3,
    /// Hologram forward at the start, viewer space
    pub object_ref_forward: Vec3,
    /// Hologram up at the start, viewer space
    pub object_ref_up: Vec3,
    /// Where the grab point is being dragged to
    pub dragging_position: Vec3,
    /// Snapping state for this drag
    pub snapper: Snapper,
}

/// The gesture in progress on a hologram.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// Nothing is happening
    #[default]
    Idle,
    /// Rotating with a rotate handle
    Rotating(RotateGesture),
    /// Scaling with a scale handle
    Scaling(ScaleGesture),
    /// Dragging the body around
    Dragging(Box<DragGesture>),
}

impl Gesture {
    /// The handle the gesture is using
    pub fn handle(&self) -> Option<HandleId> {
        match self {
            Gesture::Idle => None,
            Gesture::Rotating(r) => Some(HandleId::Rotate(r.handle)),
            Gesture::Scaling(s) => Some(HandleId::Scale(s.handle)),
            Gesture::Dragging(_) => Some(HandleId::Translate),
        }
    }

    /// Is a gesture in progress?
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

/// Per hologram gesture bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct Manipulation {
    /// The gesture in progress
    pub gesture: Gesture,
    /// How drags rotate the hologram
    pub rotation_mode: TranslateRotationMode,
}
