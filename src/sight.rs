use crate::angle::{self, angle_from_up};
use crate::candidates::generate_candidates;
use crate::cone::SightCone;
use crate::config::{ConfigError, SightConfig};
use crate::raycast::cast_sight_ray;
use crate::scene::SceneQuery;
use glam::Vec2;
use log::{debug, trace};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Published result of one recalculation, in a serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SightSnapshot<Id> {
    pub position: Vec2,
    pub facing: f32,
    pub spread: f32,
    pub polygon: Vec<Vec2>,
    /// Sorted ascending
    pub seen: Vec<Id>,
}

type RecalculatedListener<Id> = Box<dyn FnMut(&[Vec2], &HashSet<Id>)>;

/// Field of view of one observer
///
/// Holds the observer pose (position, facing, spread) and the results of the
/// latest [`Sight::recalculate`]: the visibility polygon and the set of obstacles
/// struck by its rays. Both results are rebuilt from scratch on every call.
pub struct Sight<Id> {
    config: SightConfig,
    position: Vec2,
    /// Raw facing, radians clockwise from up; read back wrapped
    direction: f32,
    /// Raw spread; read back clamped to [0, 2π]
    spread: f32,
    polygon: Vec<Vec2>,
    boundary_angles: Vec<f32>,
    seen: HashSet<Id>,
    listeners: Vec<RecalculatedListener<Id>>,
}

impl<Id: Copy + Eq + Hash + fmt::Debug> Sight<Id> {
    /// Create a sight at `position` with the facing and spread from `config`
    pub fn new(config: SightConfig, position: Vec2) -> Self {
        Sight {
            direction: config.facing,
            spread: config.spread,
            config,
            position,
            polygon: Vec::new(),
            boundary_angles: Vec::new(),
            seen: HashSet::new(),
            listeners: Vec::new(),
        }
    }

    /// Like [`Sight::new`] but rejects unusable configuration
    pub fn try_new(config: SightConfig, position: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, position))
    }

    pub fn config(&self) -> &SightConfig {
        &self.config
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Facing direction wrapped into [0, 2π), clockwise from up
    pub fn facing(&self) -> f32 {
        angle::normalize(self.direction)
    }

    /// Spread clamped into [0, 2π]
    pub fn spread(&self) -> f32 {
        self.cone().spread
    }

    pub fn cone(&self) -> SightCone {
        SightCone::new(self.direction, self.spread)
    }

    pub fn set_direction(&mut self, radians_clockwise_from_up: f32) {
        self.direction = radians_clockwise_from_up;
    }

    /// Face along `dir`; a zero vector keeps the current facing
    pub fn set_direction_vector(&mut self, dir: Vec2) {
        if dir.length_squared() == 0.0 || !dir.is_finite() {
            trace!("ignoring degenerate facing vector {:?}", dir);
            return;
        }
        self.set_direction(angle_from_up(dir));
    }

    /// Face toward a world point
    pub fn set_direction_by_target(&mut self, target: Vec2) {
        self.set_direction_vector(target - self.position);
    }

    pub fn set_spread(&mut self, radians: f32) {
        self.spread = radians;
    }

    /// Polygon from the latest recalculation, clockwise
    ///
    /// Index 0 is the observer position. With a full-circle spread the last point
    /// repeats index 1 to close the loop; otherwise the fan is left open.
    pub fn polygon(&self) -> &[Vec2] {
        &self.polygon
    }

    /// Facing-relative angles of the boundary points, ascending
    /// Excludes the observer vertex and the closing duplicate
    pub fn boundary_angles(&self) -> &[f32] {
        &self.boundary_angles
    }

    /// Obstacles struck by any ray in the latest recalculation
    pub fn seen_objects(&self) -> &HashSet<Id> {
        &self.seen
    }

    pub fn has_seen(&self, id: &Id) -> bool {
        self.seen.contains(id)
    }

    /// Copy of the current pose and latest result
    pub fn snapshot(&self) -> SightSnapshot<Id>
    where
        Id: Ord,
    {
        let mut seen: Vec<Id> = self.seen.iter().copied().collect();
        seen.sort();
        SightSnapshot {
            position: self.position,
            facing: self.facing(),
            spread: self.spread(),
            polygon: self.polygon.clone(),
            seen,
        }
    }

    /// Register a callback run after every recalculation with the new polygon and seen set
    pub fn on_recalculated<F>(&mut self, listener: F)
    where
        F: FnMut(&[Vec2], &HashSet<Id>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Rebuild the visibility polygon and seen set against `scene`
    pub fn recalculate<Q>(&mut self, scene: &Q)
    where
        Q: SceneQuery<ObstacleId = Id>,
    {
        self.seen.clear();
        self.polygon.clear();
        self.boundary_angles.clear();

        let origin = self.position;
        let cone = self.cone();
        let radius = self.config.radius;
        let layers = self.config.layers;

        let outlines = scene.obstacles_in_radius(origin, radius, layers);
        let (candidates, stats) = generate_candidates(
            origin,
            &cone,
            &outlines,
            self.config.vertex_offset,
            self.config.uniform_rays,
        );

        let mut points: Vec<(Vec2, f32)> = Vec::with_capacity(candidates.len() + 2);
        for candidate in &candidates {
            let Some(ray) = cast_sight_ray(scene, origin, candidate.direction, radius, layers) else {
                trace!("skipping zero-length {:?} candidate", candidate.kind);
                continue;
            };
            if let Some(id) = ray.hit {
                self.seen.insert(id);
            }
            points.push((ray.point, candidate.relative_angle));
        }

        // stable: equal angles keep generation order
        points.sort_by(|a, b| a.1.total_cmp(&b.1));

        self.polygon.reserve(points.len() + 2);
        self.polygon.push(origin);
        self.polygon.extend(points.iter().map(|&(point, _)| point));
        self.boundary_angles.extend(points.iter().map(|&(_, angle)| angle));
        if cone.is_full_circle() {
            if let Some(&(first, _)) = points.first() {
                self.polygon.push(first);
            }
        }

        if stats.empty_obstacles > 0 {
            debug!("{} obstacle(s) reported no vertices", stats.empty_obstacles);
        }
        debug!(
            "sight at ({:.2}, {:.2}): {} obstacles, {} rays cast, {} outside cone, {} seen",
            origin.x,
            origin.y,
            outlines.len(),
            points.len(),
            stats.outside_cone,
            self.seen.len()
        );

        for listener in &mut self.listeners {
            listener(&self.polygon, &self.seen);
        }
    }
}

impl<Id: fmt::Debug> fmt::Debug for Sight<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sight")
            .field("config", &self.config)
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("spread", &self.spread)
            .field("polygon", &self.polygon)
            .field("boundary_angles", &self.boundary_angles)
            .field("seen", &self.seen)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
