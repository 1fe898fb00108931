use glam::{Quat, Vec3};

use super::{BoundaryBox, HologramKind};
use crate::FORWARD;

/// Local axis a rotate handle turns the hologram around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationAxis {
    /// Pitch
    X,
    /// Yaw
    Y,
    /// Roll
    Z,
}

impl RotationAxis {
    /// The axis in world space for an object with this rotation
    pub fn world_axis(&self, rotation: Quat) -> Vec3 {
        match self {
            RotationAxis::X => rotation * Vec3::NEG_X,
            RotationAxis::Y => rotation * Vec3::Y,
            RotationAxis::Z => rotation * FORWARD,
        }
    }
}

/// Identifies one handle of a hologram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    /// Scale handle on controller point `n`
    Scale(usize),
    /// Rotate handle on outline segment `n`
    Rotate(usize),
    /// The hologram body itself, which is dragged around
    Translate,
}

/// A corner handle. Dragging it scales the hologram around the opposite corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleHandle {
    /// World position
    pub position: Vec3,
    /// Index of the controller point diagonally across the box
    pub opposite: usize,
    /// Does the handle respond to gestures?
    pub enabled: bool,
}

/// A handle on the middle of an outline segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateHandle {
    /// World position
    pub position: Vec3,
    /// Axis the hologram turns around
    pub axis: RotationAxis,
    /// The two points of the segment. Edge points for volumetric holograms, controller
    /// points for flat ones.
    pub segment: (usize, usize),
    /// Does the handle respond to gestures?
    pub enabled: bool,
}

/// Edges of a volumetric box, grouped by the axis they run along.
const VOLUMETRIC_SEGMENTS: [(usize, usize, RotationAxis); 12] = [
    (0, 1, RotationAxis::X),
    (2, 3, RotationAxis::X),
    (4, 5, RotationAxis::X),
    (6, 7, RotationAxis::X),
    (0, 2, RotationAxis::Y),
    (1, 3, RotationAxis::Y),
    (4, 6, RotationAxis::Y),
    (5, 7, RotationAxis::Y),
    (0, 4, RotationAxis::Z),
    (1, 5, RotationAxis::Z),
    (2, 6, RotationAxis::Z),
    (3, 7, RotationAxis::Z),
];

/// The interactive handles of a hologram.
#[derive(Debug, Clone, PartialEq)]
pub struct Handles {
    /// 3D or 2D layout
    pub kind: HologramKind,
    /// Corner handles, one per controller point
    pub scale: Vec<ScaleHandle>,
    /// Segment handles
    pub rotate: Vec<RotateHandle>,
    /// Can the hologram body be dragged?
    pub translate_enabled: bool,
    /// Size of each handle visual
    pub handle_scale: f32,
    /// Rotation of each handle visual
    pub handle_rotation: Quat,
    /// The handle in use, if any
    pub active: Option<HandleId>,
}

impl Handles {
    /// 8 scale + 12 rotate handles for volumetric holograms, 4 + 4 for flat ones.
    pub fn new(kind: HologramKind) -> Self {
        let (scale, rotate) = match kind {
            HologramKind::Volumetric => {
                let scale = (0..8)
                    .map(|i| ScaleHandle {
                        position: Vec3::ZERO,
                        opposite: 7 - i,
                        enabled: true,
                    })
                    .collect();
                let rotate = VOLUMETRIC_SEGMENTS
                    .iter()
                    .map(|(a, b, axis)| RotateHandle {
                        position: Vec3::ZERO,
                        axis: *axis,
                        segment: (*a, *b),
                        enabled: true,
                    })
                    .collect();
                (scale, rotate)
            }
            HologramKind::Flat => {
                let scale = (0..4)
                    .map(|i| ScaleHandle {
                        position: Vec3::ZERO,
                        opposite: (i + 2) % 4,
                        enabled: true,
                    })
                    .collect();
                let rotate = (0..4)
                    .map(|i| RotateHandle {
                        position: Vec3::ZERO,
                        axis: if i % 2 == 1 {
                            RotationAxis::X
                        } else {
                            RotationAxis::Y
                        },
                        segment: (i, (i + 1) % 4),
                        enabled: true,
                    })
                    .collect();
                (scale, rotate)
            }
        };

        Self {
            kind,
            scale,
            rotate,
            translate_enabled: true,
            handle_scale: 0.,
            handle_rotation: Quat::IDENTITY,
            active: None,
        }
    }

    /// Move every handle onto the box's current points.
    pub fn layout(&mut self, boundary_box: &BoundaryBox, ui_scale: f32) {
        for (handle, point) in self
            .scale
            .iter_mut()
            .zip(boundary_box.controller_points.iter())
        {
            handle.position = *point;
        }
        let segments = self.segments(boundary_box);
        for (handle, (start, end)) in self.rotate.iter_mut().zip(segments) {
            handle.position = (start + end) / 2.;
        }
        self.handle_scale = ui_scale;
        self.handle_rotation = boundary_box.edge_rotation;
    }

    /// World space end points of the outline segments, in rotate handle order
    pub fn segments(&self, boundary_box: &BoundaryBox) -> Vec<(Vec3, Vec3)> {
        let points: &[Vec3] = match self.kind {
            HologramKind::Volumetric => &boundary_box.edge_points,
            HologramKind::Flat => &boundary_box.controller_points,
        };
        self.rotate
            .iter()
            .filter_map(|h| Some((*points.get(h.segment.0)?, *points.get(h.segment.1)?)))
            .collect()
    }

    /// Does this hologram have the handle?
    pub fn contains(&self, id: HandleId) -> bool {
        match id {
            HandleId::Scale(i) => i < self.scale.len(),
            HandleId::Rotate(i) => i < self.rotate.len(),
            HandleId::Translate => true,
        }
    }

    /// Is the handle there and enabled?
    pub fn is_enabled(&self, id: HandleId) -> bool {
        match id {
            HandleId::Scale(i) => self.scale.get(i).map_or(false, |h| h.enabled),
            HandleId::Rotate(i) => self.rotate.get(i).map_or(false, |h| h.enabled),
            HandleId::Translate => self.translate_enabled,
        }
    }

    /// Enable or disable every handle apart from `except`
    pub fn set_enabled(&mut self, enabled: bool, except: Option<HandleId>) {
        for (i, handle) in self.scale.iter_mut().enumerate() {
            if except != Some(HandleId::Scale(i)) {
                handle.enabled = enabled;
            }
        }
        for (i, handle) in self.rotate.iter_mut().enumerate() {
            if except != Some(HandleId::Rotate(i)) {
                handle.enabled = enabled;
            }
        }
        if except != Some(HandleId::Translate) {
            self.translate_enabled = enabled;
        }
    }
}
