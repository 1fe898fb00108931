use glam::Vec3;
use hecs::World;
use log::debug;

use super::{Cuboid, Face};
use crate::{
    components::Color,
    settings::{ManipulatorSettings, SnappingMode, SnappingTarget},
    util::index_of_min_by,
    ManipulatorResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrackedFace {
    this_face: usize,
    peer: usize,
    that_face: usize,
}

/// Peers of one kind, plus what's currently tracked among them.
#[derive(Debug, Clone, Default)]
struct PeerGroup {
    cuboids: Vec<Cuboid>,
    pivot_peer: Option<usize>,
    tracked_face: Option<TrackedFace>,
    highlighted_face: Option<usize>,
}

/// Works out how far a dragged hologram should be nudged to line up with its peers.
///
/// Peers are captured once, when the drag begins. Each frame the dragged hologram's
/// current [`Cuboid`] is passed to [`Snapper::update`], which returns the displacement
/// to add to its position.
#[derive(Debug, Clone)]
pub struct Snapper {
    target: SnappingTarget,
    mode: SnappingMode,
    threshold: f32,
    default_color: Color,
    snap_color: Color,
    holographic: PeerGroup,
    spatial: PeerGroup,
    shown_face: Option<usize>,
    is_snapping: bool,
}

impl Snapper {
    /// Start tracking. `holographic` are other holograms, `spatial` are surfaces.
    pub fn begin(
        settings: &ManipulatorSettings,
        holographic: Vec<Cuboid>,
        spatial: Vec<Cuboid>,
    ) -> Self {
        let (holographic, spatial) = match settings.snapping_target {
            SnappingTarget::Off => (Vec::new(), Vec::new()),
            SnappingTarget::HolographicOnly => (holographic, Vec::new()),
            SnappingTarget::SpatialOnly => (Vec::new(), spatial),
            SnappingTarget::SpatialAndHolographic => (holographic, spatial),
        };
        debug!(
            "Snapping to {} holograms and {} surfaces",
            holographic.len(),
            spatial.len()
        );

        Self {
            target: settings.snapping_target,
            mode: settings.snapping_mode,
            threshold: settings.snapping_distance,
            default_color: settings.box_color,
            snap_color: settings.snap_color,
            holographic: PeerGroup {
                cuboids: holographic,
                ..Default::default()
            },
            spatial: PeerGroup {
                cuboids: spatial,
                ..Default::default()
            },
            shown_face: None,
            is_snapping: false,
        }
    }

    /// Did the last update snap?
    pub fn is_snapping(&self) -> bool {
        self.is_snapping
    }

    /// Compute this frame's displacement for the dragged hologram's cuboid
    pub fn update(&mut self, world: &World, this: &Cuboid) -> ManipulatorResult<Vec3> {
        self.is_snapping = false;
        let displacement = match self.target {
            SnappingTarget::Off => return Ok(Vec3::ZERO),
            SnappingTarget::HolographicOnly => self.holographic_snapping(world, this)?,
            SnappingTarget::SpatialOnly => self.spatial_snapping(world, this)?,
            SnappingTarget::SpatialAndHolographic => {
                let holographic = self.holographic_snapping(world, this)?;
                // Spatial wins when both snap
                self.spatial_snapping(world, this)?.or(holographic)
            }
        };

        if !self.is_snapping {
            this.change_highlight_color(world, self.default_color);
        }
        self.refresh_face_highlight(world, this)?;
        Ok(displacement.unwrap_or(Vec3::ZERO))
    }

    /// Drop everything that's tracked and restore colors. Safe to call more than once.
    pub fn end(&mut self, world: &World, this: &Cuboid) -> ManipulatorResult<()> {
        for group in [&mut self.holographic, &mut self.spatial] {
            if let Some(tracked) = group.tracked_face.take() {
                group.cuboids[tracked.peer].hide_highlight(world);
            }
            if let Some(peer) = group.pivot_peer.take() {
                group.cuboids[peer].change_highlight_color(world, self.default_color);
            }
            group.highlighted_face = None;
        }
        if let Some(face) = self.shown_face.take() {
            this.highlight_face(world, face, false)?;
        }
        this.change_highlight_color(world, self.default_color);
        self.is_snapping = false;
        Ok(())
    }

    fn holographic_snapping(
        &mut self,
        world: &World,
        this: &Cuboid,
    ) -> ManipulatorResult<Option<Vec3>> {
        if self.holographic.cuboids.is_empty() {
            return Ok(None);
        }
        Ok(match self.mode {
            SnappingMode::Off => None,
            SnappingMode::Pivot => self.snap_pivot(world, this),
            SnappingMode::Face => self.snap_faces(world, this, false)?,
            SnappingMode::PivotAndFaces => {
                let faces = self.snap_faces(world, this, false)?;
                // Pivot wins when both snap
                self.snap_pivot(world, this).or(faces)
            }
        })
    }

    fn spatial_snapping(&mut self, world: &World, this: &Cuboid) -> ManipulatorResult<Option<Vec3>> {
        if self.spatial.cuboids.is_empty() {
            return Ok(None);
        }
        self.snap_faces(world, this, true)
    }

    fn snap_pivot(&mut self, world: &World, this: &Cuboid) -> Option<Vec3> {
        let group = &mut self.holographic;
        let (index, distance) = match group.pivot_peer {
            Some(index) => (index, this.distance(&group.cuboids[index])),
            None => index_of_min_by(&group.cuboids, |peer| this.distance(peer))?,
        };

        if distance <= self.threshold {
            let peer = &group.cuboids[index];
            if group.pivot_peer.is_none() {
                debug!("Pivot snapped to peer {index} at {distance}");
            }
            group.pivot_peer = Some(index);
            this.change_highlight_color(world, self.snap_color);
            peer.change_highlight_color(world, self.snap_color);
            self.is_snapping = true;
            return Some(peer.pivot - this.pivot);
        }

        if let Some(previous) = group.pivot_peer.take() {
            group.cuboids[previous].change_highlight_color(world, self.default_color);
        }
        None
    }

    fn snap_faces(
        &mut self,
        world: &World,
        this: &Cuboid,
        spatial: bool,
    ) -> ManipulatorResult<Option<Vec3>> {
        let threshold = self.threshold;
        let group = if spatial {
            &mut self.spatial
        } else {
            &mut self.holographic
        };

        if group.tracked_face.is_none() {
            group.tracked_face = closest_face(this, &group.cuboids, threshold);
            if let Some(tracked) = group.tracked_face {
                debug!(
                    "Tracking face {} against face {} of peer {}",
                    tracked.this_face, tracked.that_face, tracked.peer
                );
                group.cuboids[tracked.peer].show_highlight(world);
            }
        }
        let Some(tracked) = group.tracked_face else {
            return Ok(None);
        };

        let this_face = &this.faces[tracked.this_face];
        let that_face = &group.cuboids[tracked.peer].faces[tracked.that_face];
        if !Face::check_snapping(this_face, that_face, threshold) {
            group.tracked_face = None;
            group.cuboids[tracked.peer].hide_highlight(world);
            group.highlighted_face = None;
            return Ok(None);
        }

        let displacement = if this_face.projected_pivot.distance(that_face.projected_pivot) < threshold
        {
            that_face.projected_pivot - this_face.projected_pivot
        } else {
            that_face.projection_vector(this_face.center)
        };

        group.highlighted_face = Some(tracked.this_face);
        self.is_snapping = true;
        Ok(Some(displacement))
    }

    /// The outline shows one face at a time. Spatial wins, like it does for displacement.
    fn refresh_face_highlight(&mut self, world: &World, this: &Cuboid) -> ManipulatorResult<()> {
        let face = self
            .spatial
            .highlighted_face
            .or(self.holographic.highlighted_face);
        match (face, self.shown_face) {
            (Some(face), _) => this.highlight_face(world, face, true)?,
            (None, Some(shown)) => this.highlight_face(world, shown, false)?,
            (None, None) => {}
        }
        self.shown_face = face;
        Ok(())
    }
}

fn closest_face(this: &Cuboid, peers: &[Cuboid], threshold: f32) -> Option<TrackedFace> {
    let mut best: Option<(TrackedFace, f32)> = None;
    for (peer, cuboid) in peers.iter().enumerate() {
        let Some(found) = this.closest_faces(cuboid, threshold) else {
            continue;
        };
        if best.map_or(true, |(_, distance)| found.distance < distance) {
            best = Some((
                TrackedFace {
                    this_face: found.this_face,
                    peer,
                    that_face: found.other_face,
                },
                found.distance,
            ));
        }
    }
    best.map(|(tracked, _)| tracked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{Highlight, OutlineHighlight},
        util::{init_test_logging, Aabb},
    };
    use approx::assert_relative_eq;

    fn settings(target: SnappingTarget, mode: SnappingMode, distance: f32) -> ManipulatorSettings {
        ManipulatorSettings {
            snapping_target: target,
            snapping_mode: mode,
            snapping_distance: distance,
            ..Default::default()
        }
    }

    fn cube(world: &mut World, center: Vec3, pivot: Vec3) -> Cuboid {
        let entity = world.spawn((Highlight::Outline(OutlineHighlight::new(
            Color::CYAN,
            Color::RED,
        )),));
        Cuboid::from_edge_points(
            Aabb::from_center_size(center, Vec3::splat(0.5)).corners(),
            Some(entity),
            Some(pivot),
        )
    }

    fn outline_color(world: &World, cuboid: &Cuboid) -> Color {
        let highlight = world.get::<&Highlight>(cuboid.target.unwrap()).unwrap();
        match &*highlight {
            Highlight::Outline(outline) => outline.color,
            _ => panic!("expected an outline"),
        }
    }

    #[test]
    fn test_pivot_snapping_threshold() {
        init_test_logging();
        let mut world = World::new();
        // Far apart boxes, pivots close together
        let this = cube(&mut world, Vec3::ZERO, Vec3::ZERO);
        let peer = cube(&mut world, Vec3::new(5., 0., 0.), Vec3::new(0.04, 0., 0.));

        let mut snapper = Snapper::begin(
            &settings(SnappingTarget::HolographicOnly, SnappingMode::Pivot, 0.05),
            vec![peer.clone()],
            vec![],
        );
        let displacement = snapper.update(&world, &this).unwrap();
        assert!(snapper.is_snapping());
        assert_relative_eq!(displacement, Vec3::new(0.04, 0., 0.));
        assert_eq!(outline_color(&world, &this), Color::ORANGE);
        assert_eq!(outline_color(&world, &peer), Color::ORANGE);

        snapper.end(&world, &this).unwrap();
        assert_eq!(outline_color(&world, &this), Color::CYAN);
        assert_eq!(outline_color(&world, &peer), Color::CYAN);

        let mut snapper = Snapper::begin(
            &settings(SnappingTarget::HolographicOnly, SnappingMode::Pivot, 0.03),
            vec![peer],
            vec![],
        );
        let displacement = snapper.update(&world, &this).unwrap();
        assert!(!snapper.is_snapping());
        assert_eq!(displacement, Vec3::ZERO);
    }

    #[test]
    fn test_face_snapping_brings_faces_flush() {
        init_test_logging();
        let mut world = World::new();
        // 0.5 cubes, 0.03 gap between this +x face and the peer -x face, pivots far apart
        let this = cube(&mut world, Vec3::ZERO, Vec3::new(0., -0.25, 0.));
        let peer = cube(&mut world, Vec3::new(0.53, 0.1, 0.), Vec3::new(0.53, -0.15, 0.));

        let mut snapper = Snapper::begin(
            &settings(SnappingTarget::HolographicOnly, SnappingMode::Face, 0.05),
            vec![peer.clone()],
            vec![],
        );
        let displacement = snapper.update(&world, &this).unwrap();
        assert!(snapper.is_snapping());
        assert_relative_eq!(displacement, Vec3::new(0.03, 0., 0.), epsilon = 1e-5);
        {
            let highlight = world.get::<&Highlight>(this.target.unwrap()).unwrap();
            let Highlight::Outline(outline) = &*highlight else {
                panic!("expected an outline");
            };
            assert_eq!(outline.highlighted_face(), Some(this.faces[0].corners));
        }

        // Dragged away, the face is dropped
        let moved = cube(&mut world, Vec3::new(-0.5, 0., 0.), Vec3::ZERO);
        let displacement = snapper.update(&world, &moved).unwrap();
        assert!(!snapper.is_snapping());
        assert_eq!(displacement, Vec3::ZERO);

        snapper.end(&world, &this).unwrap();
        snapper.end(&world, &this).unwrap();
    }

    #[test]
    fn test_pivot_wins_over_faces() {
        let mut world = World::new();
        let this = cube(&mut world, Vec3::ZERO, Vec3::new(0.25, 0., 0.));
        let peer = cube(&mut world, Vec3::new(0.53, 0., 0.), Vec3::new(0.27, 0., 0.));

        let mut snapper = Snapper::begin(
            &settings(SnappingTarget::HolographicOnly, SnappingMode::PivotAndFaces, 0.05),
            vec![peer],
            vec![],
        );
        let displacement = snapper.update(&world, &this).unwrap();
        assert!(snapper.is_snapping());
        assert_relative_eq!(displacement, Vec3::new(0.02, 0., 0.), epsilon = 1e-5);
    }

    #[test]
    fn test_spatial_snapping_onto_floor() {
        let mut world = World::new();
        let this = cube(&mut world, Vec3::new(0., 0.27, 0.), Vec3::new(0., 0.02, 0.));
        let floor = Cuboid::from_bounds(&Aabb::new(
            Vec3::new(-2., -0.1, -2.),
            Vec3::new(2., 0., 2.),
        ));

        let mut snapper = Snapper::begin(
            &settings(SnappingTarget::SpatialOnly, SnappingMode::PivotAndFaces, 0.05),
            vec![],
            vec![floor],
        );
        let displacement = snapper.update(&world, &this).unwrap();
        assert!(snapper.is_snapping());
        assert_relative_eq!(displacement, Vec3::new(0., -0.02, 0.), epsilon = 1e-5);
    }

    #[test]
    fn test_face_highlight_survives_losing_the_floor() {
        let mut world = World::new();
        let this = cube(&mut world, Vec3::ZERO, Vec3::new(0., -0.25, 0.));
        let peer = cube(&mut world, Vec3::new(0.53, 0., 0.), Vec3::new(0.53, -0.25, 0.));
        let floor = Cuboid::from_bounds(&Aabb::new(
            Vec3::new(-2., -0.38, -2.),
            Vec3::new(2., -0.28, 2.),
        ));
        let highlighted = |world: &World| {
            let highlight = world.get::<&Highlight>(this.target.unwrap()).unwrap();
            match &*highlight {
                Highlight::Outline(outline) => outline.highlighted_face(),
                _ => panic!("expected an outline"),
            }
        };

        let mut snapper = Snapper::begin(
            &settings(SnappingTarget::SpatialAndHolographic, SnappingMode::Face, 0.05),
            vec![peer],
            vec![floor],
        );
        snapper.update(&world, &this).unwrap();
        let bottom = this.faces.iter().position(|f| f.normal.y < -0.9).unwrap();
        assert_eq!(highlighted(&world), Some(this.faces[bottom].corners));

        // Lifted off the floor, still flush against the peer
        let lifted = Cuboid::from_edge_points(
            Aabb::from_center_size(Vec3::new(0., 0.1, 0.), Vec3::splat(0.5)).corners(),
            this.target,
            Some(Vec3::new(0., -0.15, 0.)),
        );
        snapper.update(&world, &lifted).unwrap();
        assert!(snapper.is_snapping());
        assert_eq!(highlighted(&world), Some(lifted.faces[0].corners));

        snapper.end(&world, &lifted).unwrap();
        assert_eq!(highlighted(&world), None);
    }

    #[test]
    fn test_off_never_snaps() {
        let mut world = World::new();
        let this = cube(&mut world, Vec3::ZERO, Vec3::ZERO);
        let peer = cube(&mut world, Vec3::ZERO, Vec3::ZERO);
        let mut snapper = Snapper::begin(
            &settings(SnappingTarget::Off, SnappingMode::Pivot, 0.05),
            vec![peer],
            vec![],
        );
        assert_eq!(snapper.update(&world, &this).unwrap(), Vec3::ZERO);
        assert!(!snapper.is_snapping());
    }
}
