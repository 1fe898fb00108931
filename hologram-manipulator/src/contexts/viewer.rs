use glam::{Quat, Vec3};

use crate::{util::project_on_plane, FORWARD, UP};

/// Pose of the user's head in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Viewer {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    /// Forward with the vertical component removed. Can be zero when looking straight up or down.
    pub fn horizontal_forward(&self) -> Vec3 {
        project_on_plane(self.forward(), UP)
    }

    /// Direction from world space to viewer space
    pub fn inverse_transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.inverse() * direction
    }

    /// Direction from viewer space to world space
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }

    /// Where the arm pivots from: roughly the base of the neck, a bit below and behind the head.
    pub fn hand_pivot(&self) -> Vec3 {
        self.position + Vec3::new(0., -0.2, 0.) - self.forward() * 0.2
    }
}
