use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The component's position relative to its [`super::Parent`], or to the world if it has none.
///
/// This is the transform the manipulator mutates: gestures write to it, and so does pivot
/// relocation. [`super::GlobalTransform`] is derived from it each frame.
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct LocalTransform {
    /// The translation of the entity
    pub translation: Vec3,
    /// The rotation of the entity
    pub rotation: Quat,
    /// The non-uniform scale of the entity
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Shortcut to create a transform that only translates
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Decompose an affine into a `LocalTransform`
    pub fn from_affine(affine: &Affine3A) -> Self {
        let (scale, rotation, translation) = affine.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Convenience function to convert the [`LocalTransform`] into a [`glam::Affine3A`]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Update the translation, rotation and scale from a [`glam::Affine3A`]
    pub fn update_from_affine(&mut self, affine: &Affine3A) {
        *self = Self::from_affine(affine);
    }

    /// Transform a point from this transform's space into its parent's space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_affine_round_trip() {
        let local_transform = LocalTransform {
            translation: [1.0, 2.0, 3.0].into(),
            rotation: Quat::from_rotation_y(0.3),
            scale: [2.0, 2.0, 2.0].into(),
        };
        let affine = local_transform.to_affine();
        let round_tripped = LocalTransform::from_affine(&affine);
        assert_relative_eq!(round_tripped.translation, local_transform.translation, epsilon = 1e-5);
        assert_relative_eq!(round_tripped.rotation, local_transform.rotation, epsilon = 1e-5);
        assert_relative_eq!(round_tripped.scale, local_transform.scale, epsilon = 1e-5);

        let point = Vec3::new(0.5, -1.0, 0.25);
        assert_relative_eq!(
            local_transform.transform_point(point),
            affine.transform_point3(point),
            epsilon = 1e-5
        );
    }
}
