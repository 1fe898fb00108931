use glam::{Affine3A, Mat3, Quat, Vec3};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{ManipulatorError, ManipulatorResult, FORWARD};

/// An axis aligned box, described by its two extreme corners.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Aabb {
    /// The corner with the smallest coordinates
    pub min: Vec3,
    /// The corner with the largest coordinates
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners, in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from its center and its full size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The smallest box containing every point. `None` if there are no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |aabb, p| Self {
            min: aabb.min.min(p),
            max: aabb.max.max(p),
        }))
    }

    /// Center of the box
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size along each axis
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grow this box so it also contains `other`
    pub fn encapsulate(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The 8 corners, ordered by the same bit pattern as [`crate::components::BoundaryBox`]
    /// edge points: bit 0 clear means +x, bit 1 clear means +y, bit 2 clear means +z.
    pub fn corners(&self) -> [Vec3; 8] {
        let center = self.center();
        let half = self.size() * 0.5;
        std::array::from_fn(|i| center + half * corner_signs(i))
    }

    /// The box that contains this box after it's been transformed
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let corners = self.corners().map(|c| transform.transform_point3(c));
        Self::from_points(corners).unwrap_or(*self)
    }

    /// `[min x, max x, min y, max y, min z, max z]`
    pub fn limits(&self) -> [f32; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }
}

/// Signs applied to the half extents to get corner `index`.
#[inline]
pub fn corner_signs(index: usize) -> Vec3 {
    let sign = |bit: usize| if index & bit == 0 { 1.0 } else { -1.0 };
    Vec3::new(sign(1), sign(2), sign(4))
}

/// Component-wise division that refuses to divide by a zero valued axis.
pub fn divide(a: Vec3, b: Vec3) -> ManipulatorResult<Vec3> {
    if b.x == 0. || b.y == 0. || b.z == 0. {
        return Err(ManipulatorError::DivideByZero);
    }
    Ok(a / b)
}

/// Divide by a scalar, refusing zero.
pub fn divide_scalar(a: f32, b: f32) -> ManipulatorResult<f32> {
    if b == 0. {
        return Err(ManipulatorError::DivideByZero);
    }
    Ok(a / b)
}

/// The median of the three components.
pub fn mid_component(v: Vec3) -> f32 {
    let (x, y, z) = (v.x, v.y, v.z);
    if (x >= y && x <= z) || (x <= y && x >= z) {
        x
    } else if (y >= x && y <= z) || (y <= x && y >= z) {
        y
    } else {
        z
    }
}

/// Distance from `point` to the plane, positive on the side the normal points to.
#[inline]
pub fn signed_distance_plane_point(plane_normal: Vec3, plane_point: Vec3, point: Vec3) -> f32 {
    plane_normal.dot(point - plane_point)
}

/// The translation that moves `point` onto the plane along the plane's normal.
pub fn projection_vector(plane_normal: Vec3, plane_point: Vec3, point: Vec3) -> Vec3 {
    let distance = -signed_distance_plane_point(plane_normal, plane_point, point);
    set_vector_length(plane_normal, distance)
}

/// Orthogonal projection of `point` onto the plane.
pub fn project_point_on_plane(plane_normal: Vec3, plane_point: Vec3, point: Vec3) -> Vec3 {
    point + projection_vector(plane_normal, plane_point, point)
}

/// `vector` with its length set to `length`. Negative lengths flip it.
#[inline]
pub fn set_vector_length(vector: Vec3, length: f32) -> Vec3 {
    vector.normalize_or_zero() * length
}

/// Remove the component of `vector` along `normal`.
pub fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    let normal = normal.normalize_or_zero();
    vector - normal * vector.dot(normal)
}

/// The rotation that turns [`FORWARD`] to `forward` while keeping `up` as close to up as possible.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let back = -forward.normalize_or_zero();
    if back == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let right = up.cross(back).try_normalize().unwrap_or_else(|| back.any_orthonormal_vector());
    let up = back.cross(right);
    let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize();
    debug_assert!(rotation.mul_vec3(FORWARD).abs_diff_eq(-back, 1e-3));
    rotation
}

/// Index and value of the smallest `f(item)`. Ties resolve to the first item.
pub fn index_of_min_by<T>(items: &[T], f: impl Fn(&T) -> f32) -> Option<(usize, f32)> {
    items
        .iter()
        .map(f)
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}

/// Index of the smallest distance from `target`.
pub fn index_of_closest(points: &[Vec3], target: Vec3) -> Option<usize> {
    points
        .iter()
        .position_min_by(|a, b| a.distance(target).total_cmp(&b.distance(target)))
}

/// Euclidean modulo, always in `0..m`.
#[inline]
pub fn wrap_index(x: isize, m: usize) -> usize {
    x.rem_euclid(m as isize) as usize
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
