use glam::{Affine3A, Quat, Vec3};

use super::HologramKind;
use crate::util::{corner_signs, mid_component, Aabb};

/// Smallest size of the box along any axis.
pub const MIN_BOX_DIMENSION: f32 = 1e-4;

const EDGE_EXTEND_FACTOR: f32 = 15.;
const MIN_EDGE_POINTS_SCALE: f32 = 1. / 60.;

/// The face a flat hologram's 8-point cuboid collapses to.
///
/// Named after the faces of the cuboid that touch edge point 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DominantFace {
    /// Spans the x and y edges
    Front,
    /// Spans the y and z edges
    Side,
    /// Spans the x and z edges
    Top,
}

impl DominantFace {
    /// The edge points of this face, in perimeter order
    pub fn corner_indices(&self) -> [usize; 4] {
        match self {
            DominantFace::Front => [0, 1, 3, 2],
            DominantFace::Side => [0, 2, 6, 4],
            DominantFace::Top => [0, 1, 5, 4],
        }
    }

    /// Pick the face whose two side lengths have the largest product.
    /// Ties go to the first face checked: front, then side, then top.
    pub fn select(edge_points: &[Vec3; 8]) -> Self {
        let a = edge_points[0].distance(edge_points[1]);
        let b = edge_points[0].distance(edge_points[2]);
        let c = edge_points[0].distance(edge_points[4]);
        let (front, side, top) = (a * b, b * c, a * c);

        if front >= side && front >= top {
            DominantFace::Front
        } else if side >= top {
            DominantFace::Side
        } else {
            DominantFace::Top
        }
    }
}

/// The ground rectangle under a box, used to place the menu and the base outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProjection {
    /// Corners of the rectangle: (+x,+z), (+x,-z), (-x,-z), (-x,+z)
    pub corners: [Vec3; 4],
    /// Midpoints of the rectangle's edges, `midpoints[i]` between `corners[i]` and `corners[i + 1]`
    pub midpoints: [Vec3; 4],
}

/// The box a hologram occupies, in the hologram's local space, plus the world space points
/// derived from it.
///
/// `edge_points` and `controller_points` are recomputed by [`BoundaryBox::update`] and never
/// written anywhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryBox {
    /// 3D or 2D; decides how many controller points there are
    pub kind: HologramKind,
    center: Vec3,
    size: Vec3,
    /// World position of the 8 corners, indexed by sign bits (bit 0 = x, bit 1 = y, bit 2 = z;
    /// a clear bit is the positive side)
    pub edge_points: [Vec3; 8],
    /// World rotation shared by every edge point
    pub edge_rotation: Quat,
    /// Where the scale handles go: the 8 edge points, or the 4 corners of the dominant face
    pub controller_points: Vec<Vec3>,
    /// Scale applied to edge point visuals
    pub edge_points_scale: f32,
    /// Smallest relevant world extent: the smallest axis for 3D, the second smallest for 2D
    pub min_extent: f32,
    /// The face flat holograms collapse to
    pub dominant_face: Option<DominantFace>,
}

impl BoundaryBox {
    /// An empty box. Call [`BoundaryBox::set_bounds`] then [`BoundaryBox::update`].
    pub fn new(kind: HologramKind) -> Self {
        let controller_count = match kind {
            HologramKind::Volumetric => 8,
            HologramKind::Flat => 4,
        };
        Self {
            kind,
            center: Vec3::ZERO,
            size: Vec3::splat(MIN_BOX_DIMENSION),
            edge_points: [Vec3::ZERO; 8],
            edge_rotation: Quat::IDENTITY,
            controller_points: vec![Vec3::ZERO; controller_count],
            edge_points_scale: 1.,
            min_extent: 0.,
            dominant_face: None,
        }
    }

    /// Center of the box in local space
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Move the box center, in local space
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    /// Size of the box in local space
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Set the local size. Each axis is kept at or above [`MIN_BOX_DIMENSION`].
    pub fn set_size(&mut self, size: Vec3) {
        self.size = size.abs().max(Vec3::splat(MIN_BOX_DIMENSION));
    }

    /// Set center and size from local bounds
    pub fn set_bounds(&mut self, bounds: &Aabb) {
        self.set_center(bounds.center());
        self.set_size(bounds.size());
    }

    /// Center of the bottom face, in local space
    pub fn bottom_center(&self) -> Vec3 {
        self.center - Vec3::new(0., self.size.y / 2., 0.)
    }

    /// Center of the top face, in local space
    pub fn top_center(&self) -> Vec3 {
        self.center + Vec3::new(0., self.size.y / 2., 0.)
    }

    /// Recompute every derived point from the current center and size, and the entity's
    /// local to world transform.
    pub fn update(&mut self, world_from_local: &Affine3A) {
        let (world_scale, world_rotation, _) = world_from_local.to_scale_rotation_translation();
        let world_extents = self.size * world_scale;

        self.min_extent = min_relevant_extent(self.kind, world_extents);
        self.edge_points_scale =
            (self.min_extent / EDGE_EXTEND_FACTOR).max(MIN_EDGE_POINTS_SCALE);
        self.edge_rotation = world_rotation;

        self.edge_points = std::array::from_fn(|edge_id| {
            world_from_local.transform_point3(self.local_edge_point(edge_id))
        });

        match self.kind {
            HologramKind::Volumetric => {
                self.dominant_face = None;
                self.controller_points = self.edge_points.to_vec();
            }
            HologramKind::Flat => {
                let face = DominantFace::select(&self.edge_points);
                self.dominant_face = Some(face);
                self.controller_points = face
                    .corner_indices()
                    .iter()
                    .map(|i| self.edge_points[*i])
                    .collect();
            }
        }
    }

    /// World position of one corner, straight from center, size and `world_from_local`.
    /// Doesn't touch the cached edge points.
    pub fn edge_point_position(&self, world_from_local: &Affine3A, edge_id: usize) -> Vec3 {
        world_from_local.transform_point3(self.local_edge_point(edge_id))
    }

    fn local_edge_point(&self, edge_id: usize) -> Vec3 {
        self.center + (self.size / 2.) * corner_signs(edge_id)
    }

    /// World axis aligned bounds of the edge points
    pub fn container_aabb(&self) -> Aabb {
        Aabb::from_points(self.edge_points).unwrap_or(Aabb::new(Vec3::ZERO, Vec3::ZERO))
    }

    /// World axis aligned size of the edge points
    pub fn container_size(&self) -> Vec3 {
        self.container_aabb().size()
    }

    /// `[min x, max x, min y, max y, min z, max z]` of the edge points
    pub fn container_limits(&self) -> [f32; 6] {
        self.container_aabb().limits()
    }

    /// Project the edge points onto the ground plane at their lowest y, grown by `padding`
    /// on x and z.
    pub fn projection(&self, padding: f32) -> GroundProjection {
        let Aabb { min, max } = self.container_aabb();
        let p1 = Vec3::new(max.x + padding, min.y, max.z + padding);
        let p2 = Vec3::new(max.x + padding, min.y, min.z - padding);
        let p3 = Vec3::new(min.x - padding, min.y, min.z - padding);
        let p4 = Vec3::new(min.x - padding, min.y, max.z + padding);

        GroundProjection {
            corners: [p1, p2, p3, p4],
            midpoints: [
                (p1 + p2) / 2.,
                (p2 + p3) / 2.,
                (p3 + p4) / 2.,
                (p4 + p1) / 2.,
            ],
        }
    }
}

/// The extent used to size the UI. Flat content ignores its thinnest axis and uses the
/// second smallest one instead.
pub fn min_relevant_extent(kind: HologramKind, extents: Vec3) -> f32 {
    let extents = extents.abs();
    match kind {
        HologramKind::Volumetric => extents.min_element(),
        HologramKind::Flat => mid_component(extents),
    }
}
