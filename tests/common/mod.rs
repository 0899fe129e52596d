#![allow(dead_code)]

use glam::Vec2;
use sightcone::{LayerMask, ObstacleOutline, RayHit, SceneQuery};
use std::cell::RefCell;

/// Wraps a scene and records every ray cast against it with its result
pub struct RecordingScene<Q: SceneQuery> {
    pub inner: Q,
    pub rays: RefCell<Vec<(Vec2, Option<RayHit<Q::ObstacleId>>)>>,
}

impl<Q: SceneQuery> RecordingScene<Q> {
    pub fn new(inner: Q) -> Self {
        RecordingScene {
            inner,
            rays: RefCell::new(Vec::new()),
        }
    }

    pub fn hit_ids(&self) -> Vec<Q::ObstacleId> {
        self.rays
            .borrow()
            .iter()
            .filter_map(|(_, hit)| hit.as_ref().map(|h| h.obstacle))
            .collect()
    }

    pub fn clear(&self) {
        self.rays.borrow_mut().clear();
    }
}

impl<Q: SceneQuery> SceneQuery for RecordingScene<Q> {
    type ObstacleId = Q::ObstacleId;

    fn obstacles_in_radius(
        &self,
        center: Vec2,
        radius: f32,
        layers: LayerMask,
    ) -> Vec<ObstacleOutline<Self::ObstacleId>> {
        self.inner.obstacles_in_radius(center, radius, layers)
    }

    fn raycast_nearest(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit<Self::ObstacleId>> {
        let hit = self.inner.raycast_nearest(origin, direction, max_distance, layers);
        self.rays.borrow_mut().push((direction, hit));
        hit
    }
}

/// Scene whose outlines and hits are scripted up front
///
/// Rays hit the first scripted target whose direction is within `tolerance`
/// radians of the ray; the hit point sits at the target's distance.
pub struct ScriptedScene {
    pub outlines: Vec<ObstacleOutline<&'static str>>,
    pub targets: Vec<(&'static str, Vec2)>,
    pub tolerance: f32,
}

impl SceneQuery for ScriptedScene {
    type ObstacleId = &'static str;

    fn obstacles_in_radius(
        &self,
        _center: Vec2,
        _radius: f32,
        _layers: LayerMask,
    ) -> Vec<ObstacleOutline<&'static str>> {
        self.outlines.clone()
    }

    fn raycast_nearest(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        _layers: LayerMask,
    ) -> Option<RayHit<&'static str>> {
        self.targets.iter().find_map(|&(id, point)| {
            let offset = point - origin;
            let dist = offset.length();
            let aligned = direction.angle_between(offset).abs() <= self.tolerance;
            (aligned && dist <= max_distance).then(|| RayHit {
                point: origin + direction * dist,
                obstacle: id,
            })
        })
    }
}

/// Facing-relative angle of a polygon point as seen from `origin`
pub fn relative_angle_of(origin: Vec2, facing: f32, point: Vec2) -> f32 {
    let d = point - origin;
    sightcone::angle::relative_angle(d.x.atan2(d.y), facing)
}

pub fn assert_near(a: Vec2, b: Vec2, tolerance: f32) {
    assert!(
        a.distance(b) <= tolerance,
        "expected {:?} within {} of {:?} (distance {})",
        a,
        tolerance,
        b,
        a.distance(b)
    );
}
