use glam::{Vec3, Vec4};
use hecs::Entity;

use crate::util::{project_point_on_plane, projection_vector};

/// Faces closer to parallel than this (as the absolute cosine between their normals) can snap.
pub const PARALLEL_THRESHOLD: f32 = 0.96;

const DEGENERATE_NORMAL_EPSILON: f32 = 1e-6;

/// One side of a [`super::Cuboid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corners in perimeter order; `corners[1]` and `corners[3]` are both adjacent to `corners[0]`
    pub corners: [Vec3; 4],
    /// Average of the corners
    pub center: Vec3,
    /// Unit normal pointing out of the cuboid
    pub normal: Vec3,
    /// Thickness of the cuboid along the normal
    pub depth: f32,
    /// The cuboid's pivot projected onto this face's plane
    pub projected_pivot: Vec3,
    /// Entity whose highlight this face belongs to. Never owns anything.
    pub owner: Option<Entity>,
    d: f32,
}

impl Face {
    pub(crate) fn new(
        corners: [Vec3; 4],
        cuboid_center: Vec3,
        pivot: Vec3,
        depth: f32,
        owner: Option<Entity>,
    ) -> Self {
        let [a, b, c, d] = corners;
        let center = (a + b + c + d) / 4.;

        // Flat cuboids have faces through their own center
        let outward = center - cuboid_center;
        let normal = if outward.length() > DEGENERATE_NORMAL_EPSILON {
            outward.normalize()
        } else {
            (a - b).cross(b - c).normalize_or_zero()
        };

        Self {
            corners,
            center,
            normal,
            depth,
            projected_pivot: project_point_on_plane(normal, center, pivot),
            owner,
            d: -normal.dot(a),
        }
    }

    /// Plane coefficients `(a, b, c, d)` of `a·x + b·y + c·z + d = 0`, with `(a, b, c)` the normal
    pub fn plane(&self) -> Vec4 {
        self.normal.extend(self.d)
    }

    /// Evaluate the plane equation at `point`
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Orthogonal projection of `point` onto this face's plane
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        project_point_on_plane(self.normal, self.center, point)
    }

    /// The translation that brings `point` onto this face's plane
    pub fn projection_vector(&self, point: Vec3) -> Vec3 {
        projection_vector(self.normal, self.center, point)
    }

    /// Is `point` inside the rectangle spanned by the two edges leaving `corners[0]`?
    /// Only meaningful for points on the plane.
    pub fn is_point_within_boundaries(&self, point: Vec3) -> bool {
        let origin = self.corners[0];
        let within = |edge_end: Vec3| {
            let edge = edge_end - origin;
            let t = point.dot(edge);
            origin.dot(edge) <= t && t <= edge_end.dot(edge)
        };
        within(self.corners[1]) && within(self.corners[3])
    }

    /// Are the faces parallel or anti-parallel, give or take ~16°?
    pub fn is_parallel(first: &Face, second: &Face) -> bool {
        first.normal.dot(second.normal).abs() > PARALLEL_THRESHOLD
    }

    /// Does any corner of `second`, projected onto `first`'s plane, land inside `first`?
    pub fn is_projection_intersected(first: &Face, second: &Face) -> bool {
        second
            .corners
            .iter()
            .any(|corner| first.is_point_within_boundaries(first.project_point(*corner)))
    }

    /// Plane to plane distance of two faces that face each other. `None` if they aren't
    /// parallel or don't overlap.
    pub fn parallel_distance(first: &Face, second: &Face) -> Option<f32> {
        if !Face::is_parallel(first, second) {
            return None;
        }
        if !Face::is_projection_intersected(first, second)
            && !Face::is_projection_intersected(second, first)
        {
            return None;
        }
        Some(first.signed_distance(second.center).abs())
    }

    /// Are the faces close enough to snap together?
    pub fn check_snapping(first: &Face, second: &Face, threshold: f32) -> bool {
        Face::snapping_distance(first, second, threshold).is_some()
    }

    /// [`Face::parallel_distance`], if it's under `threshold`
    pub fn snapping_distance(first: &Face, second: &Face, threshold: f32) -> Option<f32> {
        Face::parallel_distance(first, second).filter(|distance| *distance < threshold)
    }
}
