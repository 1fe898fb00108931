use glam::{Affine3A, Vec3};

/// World pose of a hologram or of one of its content entities, for the host to render with.
/// Written once per frame by [`crate::systems::update_global_transform_system`]; gestures work from
/// [`crate::systems::update_global_transform::global_from_local`] instead, so they never see a
/// stale pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform(pub Affine3A);

impl Default for GlobalTransform {
    fn default() -> Self {
        Self(Affine3A::IDENTITY)
    }
}

impl GlobalTransform {
    /// World position of the entity's origin, which for a hologram is its pivot
    pub fn position(&self) -> Vec3 {
        self.0.translation.into()
    }

    /// Take a point in the entity's local space to world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.0.transform_point3(point)
    }
}
