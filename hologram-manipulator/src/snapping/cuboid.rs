use glam::Vec3;
use hecs::{Entity, World};

use super::Face;
use crate::{
    components::{Color, Highlight, Highlightable},
    util::Aabb,
    ManipulatorError, ManipulatorResult,
};

/// Corner indices of each face, in perimeter order. Faces come in opposing pairs:
/// 0/1 are +x/-x, 2/3 are +y/-y, 4/5 are +z/-z.
pub const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 2, 6, 4],
    [1, 3, 7, 5],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [0, 1, 3, 2],
    [4, 5, 7, 6],
];

/// The best pair of faces found between two cuboids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMatch {
    /// Index of the face on the first cuboid
    pub this_face: usize,
    /// Index of the face on the second cuboid
    pub other_face: usize,
    /// Plane to plane distance
    pub distance: f32,
}

/// A snapshot of a box as 8 corners and 6 faces, used to snap boxes onto each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    /// The point pivot snapping aligns
    pub pivot: Vec3,
    /// Average of the corners
    pub center: Vec3,
    /// Corners, using the same sign bit ordering as [`crate::components::BoundaryBox`]
    pub corners: [Vec3; 8],
    /// The 6 faces, see [`FACE_CORNERS`]
    pub faces: [Face; 6],
    /// Entity with the [`Highlight`] this cuboid delegates to
    pub target: Option<Entity>,
}

impl Cuboid {
    /// Build from 8 corners ordered like [`crate::components::BoundaryBox::edge_points`].
    /// The pivot defaults to the center.
    pub fn from_edge_points(
        edge_points: [Vec3; 8],
        target: Option<Entity>,
        pivot: Option<Vec3>,
    ) -> Self {
        let center = edge_points.iter().copied().sum::<Vec3>() / 8.;
        let pivot = pivot.unwrap_or(center);

        let face_centers = FACE_CORNERS
            .map(|indices| indices.iter().map(|i| edge_points[*i]).sum::<Vec3>() / 4.);
        let faces = std::array::from_fn(|i| {
            let depth = face_centers[i].distance(face_centers[i ^ 1]);
            Face::new(
                FACE_CORNERS[i].map(|c| edge_points[c]),
                center,
                pivot,
                depth,
                target,
            )
        });

        Self {
            pivot,
            center,
            corners: edge_points,
            faces,
            target,
        }
    }

    /// Build from `[min x, max x, min y, max y, min z, max z]`
    pub fn from_extent_limits(
        limits: &[f32; 6],
        target: Option<Entity>,
        pivot: Option<Vec3>,
    ) -> Self {
        let [min_x, max_x, min_y, max_y, min_z, max_z] = *limits;
        let aabb = Aabb::new(
            Vec3::new(min_x, min_y, min_z),
            Vec3::new(max_x, max_y, max_z),
        );
        Self::from_edge_points(aabb.corners(), target, pivot)
    }

    /// Build from world space bounds with no highlight target, pivoting on the center
    pub fn from_bounds(bounds: &Aabb) -> Self {
        Self::from_edge_points(bounds.corners(), None, None)
    }

    /// Distance between the pivots
    pub fn distance(&self, other: &Cuboid) -> f32 {
        self.pivot.distance(other.pivot)
    }

    /// Search all 36 face pairs for the closest pair that can snap under `threshold`.
    /// Ties go to the first pair found.
    pub fn closest_faces(&self, other: &Cuboid, threshold: f32) -> Option<FaceMatch> {
        let mut best: Option<FaceMatch> = None;
        for (this_face, first) in self.faces.iter().enumerate() {
            for (other_face, second) in other.faces.iter().enumerate() {
                let Some(distance) = Face::snapping_distance(first, second, threshold) else {
                    continue;
                };
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(FaceMatch {
                        this_face,
                        other_face,
                        distance,
                    });
                }
            }
        }
        best
    }

    /// Show the target's highlight
    pub fn show_highlight(&self, world: &World) {
        with_highlight(world, self.target, |h| h.show_highlight());
    }

    /// Hide the target's highlight
    pub fn hide_highlight(&self, world: &World) {
        with_highlight(world, self.target, |h| h.hide_highlight());
    }

    /// Recolor the target's highlight
    pub fn change_highlight_color(&self, world: &World, color: Color) {
        with_highlight(world, self.target, |h| h.change_highlight_color(color));
    }

    /// Highlight (or stop highlighting) one of the faces on the target
    pub fn highlight_face(
        &self,
        world: &World,
        face_index: usize,
        highlight: bool,
    ) -> ManipulatorResult<()> {
        let face = self
            .faces
            .get(face_index)
            .ok_or(ManipulatorError::InvalidFace { index: face_index })?;
        with_highlight(world, self.target, |h| {
            h.highlight_face(&face.corners, highlight, face.normal)
        })
        .unwrap_or(Ok(()))
    }
}

/// Run `f` on the [`Highlight`] of `target`. Targets without one are skipped.
fn with_highlight<R>(
    world: &World,
    target: Option<Entity>,
    f: impl FnOnce(&mut Highlight) -> R,
) -> Option<R> {
    let mut highlight = world.get::<&mut Highlight>(target?).ok()?;
    Some(f(&mut *highlight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::OutlineHighlight;
    use approx::assert_relative_eq;
    use glam::{Affine3A, Quat};

    fn unit_cube(center: Vec3) -> Cuboid {
        Cuboid::from_bounds(&Aabb::from_center_size(center, Vec3::ONE))
    }

    #[test]
    fn test_faces_come_in_opposing_pairs() {
        let cuboid = unit_cube(Vec3::ZERO);
        let expected = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        for (face, normal) in cuboid.faces.iter().zip(expected) {
            assert_relative_eq!(face.normal, normal);
            assert_relative_eq!(face.center, normal * 0.5);
            assert_relative_eq!(face.depth, 1.0);
        }
    }

    #[test]
    fn test_constructors_agree() {
        let limits = [-1., 2., 0., 1., -3., -1.];
        let from_limits = Cuboid::from_extent_limits(&limits, None, None);
        let aabb = Aabb::new(Vec3::new(-1., 0., -3.), Vec3::new(2., 1., -1.));
        let from_bounds = Cuboid::from_bounds(&aabb);
        assert_eq!(from_limits, from_bounds);
        assert_relative_eq!(from_bounds.pivot, Vec3::new(0.5, 0.5, -2.));
        assert_relative_eq!(from_bounds.faces[0].depth, 3.0);
        assert_relative_eq!(from_bounds.faces[3].depth, 1.0);
        assert_relative_eq!(from_bounds.faces[5].depth, 2.0);

        let pivot = Vec3::new(0.5, 0., -2.);
        let with_pivot = Cuboid::from_extent_limits(&limits, None, Some(pivot));
        assert_eq!(with_pivot.pivot, pivot);
        // Projected onto the top face
        assert_relative_eq!(with_pivot.faces[2].projected_pivot, Vec3::new(0.5, 1., -2.));
    }

    #[test]
    fn test_parallel_distance_between_cubes() {
        let first = unit_cube(Vec3::ZERO);
        let second = unit_cube(Vec3::new(0., 0., 2.));

        // +z of the first faces -z of the second, one unit apart
        let (front, back) = (&first.faces[4], &second.faces[5]);
        assert!(Face::is_parallel(front, back));
        assert_relative_eq!(front.normal.dot(back.normal), -1.0);
        assert_relative_eq!(Face::parallel_distance(front, back).unwrap(), 1.0);

        // Rotate the second cube so its -z face points down
        let rotation = Affine3A::from_rotation_translation(
            Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
            Vec3::new(0., 0., 2.),
        );
        let rotated = Cuboid::from_edge_points(
            Aabb::from_center_size(Vec3::ZERO, Vec3::ONE)
                .corners()
                .map(|c| rotation.transform_point3(c)),
            None,
            None,
        );
        assert_relative_eq!(rotated.faces[5].normal.dot(front.normal), 0.0, epsilon = 1e-6);
        assert!(!Face::is_parallel(front, &rotated.faces[5]));
        assert_eq!(Face::parallel_distance(front, &rotated.faces[5]), None);
    }

    #[test]
    fn test_closest_faces() {
        let first = unit_cube(Vec3::ZERO);
        let touching = unit_cube(Vec3::new(1.03, 0.2, 0.));
        let found = first.closest_faces(&touching, 0.05).unwrap();
        assert_eq!(found.this_face, 0);
        assert_eq!(found.other_face, 1);
        assert_relative_eq!(found.distance, 0.03, epsilon = 1e-5);

        let far = unit_cube(Vec3::new(1.2, 0., 0.));
        assert_eq!(first.closest_faces(&far, 0.05), None);
    }

    #[test]
    fn test_highlight_goes_to_target() {
        let mut world = World::new();
        let entity = world.spawn((Highlight::Outline(OutlineHighlight::new(
            Color::CYAN,
            Color::RED,
        )),));
        let cuboid = Cuboid::from_edge_points(
            Aabb::from_center_size(Vec3::ZERO, Vec3::ONE).corners(),
            Some(entity),
            None,
        );

        cuboid.change_highlight_color(&world, Color::ORANGE);
        cuboid.hide_highlight(&world);
        cuboid.highlight_face(&world, 2, true).unwrap();
        {
            let highlight = world.get::<&Highlight>(entity).unwrap();
            let Highlight::Outline(outline) = &*highlight else {
                panic!("expected an outline");
            };
            assert_eq!(outline.color, Color::ORANGE);
            assert!(!outline.visible);
            assert_eq!(outline.highlighted_face(), Some(cuboid.faces[2].corners));
        }

        // No target, nothing to do
        let untargeted = unit_cube(Vec3::ZERO);
        untargeted.show_highlight(&world);
        assert!(untargeted.highlight_face(&world, 0, true).is_ok());
    }

    #[test]
    fn test_highlight_face_out_of_range() {
        let world = World::new();
        let cuboid = Cuboid::from_bounds(&Aabb::from_center_size(Vec3::ZERO, Vec3::ONE));
        assert!(matches!(
            cuboid.highlight_face(&world, 6, true),
            Err(ManipulatorError::InvalidFace { index: 6 })
        ));
        assert!(cuboid.highlight_face(&world, 5, false).is_ok());
    }
}
