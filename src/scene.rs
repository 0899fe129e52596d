use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Bit mask selecting which obstacle layers can be seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask with a single layer bit set
    pub fn layer(index: u32) -> Self {
        LayerMask(1u32.checked_shl(index).unwrap_or(0))
    }

    pub fn contains_layer(&self, index: u32) -> bool {
        self.0 & LayerMask::layer(index).0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// Boundary vertices of one obstacle, grouped per shape
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleOutline<Id> {
    pub id: Id,
    pub shapes: Vec<Vec<Vec2>>,
}

impl<Id> ObstacleOutline<Id> {
    pub fn vertex_count(&self) -> usize {
        self.shapes.iter().map(Vec::len).sum()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.shapes.iter().flatten().copied()
    }
}

/// Nearest obstacle struck by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<Id> {
    pub point: Vec2,
    pub obstacle: Id,
}

/// Scene queries the sight needs from its host
///
/// Implementations own the obstacle geometry. The sight only asks two questions
/// per recomputation: which obstacles are near, and what does a ray hit first.
pub trait SceneQuery {
    type ObstacleId: Copy + Eq + Hash + Debug;

    /// Obstacles overlapping the circle at `center` with `radius`, restricted to `layers`
    fn obstacles_in_radius(
        &self,
        center: Vec2,
        radius: f32,
        layers: LayerMask,
    ) -> Vec<ObstacleOutline<Self::ObstacleId>>;

    /// Nearest hit along `direction` (unit length) from `origin` within `max_distance`
    /// None is a miss
    fn raycast_nearest(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit<Self::ObstacleId>>;
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    type ObstacleId = T::ObstacleId;

    fn obstacles_in_radius(
        &self,
        center: Vec2,
        radius: f32,
        layers: LayerMask,
    ) -> Vec<ObstacleOutline<Self::ObstacleId>> {
        (**self).obstacles_in_radius(center, radius, layers)
    }

    fn raycast_nearest(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit<Self::ObstacleId>> {
        (**self).raycast_nearest(origin, direction, max_distance, layers)
    }
}
