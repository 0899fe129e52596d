use crate::scene::{LayerMask, ObstacleOutline, RayHit, SceneQuery};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Parallel ray/edge pairs are treated as non-intersecting below this
const PARALLEL_EPSILON: f32 = 1e-9;

/// A solid obstacle made of one or more closed polygon shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Layer index (0..32) matched against a sight's layer mask
    #[serde(default)]
    pub layer: u32,
    /// Each shape is a closed polygon given by its vertices in order
    pub shapes: Vec<Vec<Vec2>>,
}

impl Obstacle {
    pub fn new(id: u32, shapes: Vec<Vec<Vec2>>) -> Self {
        Obstacle { id, layer: 0, shapes }
    }

    /// Axis aligned rectangle centered at `center`
    pub fn rect(id: u32, center: Vec2, size: Vec2) -> Self {
        let h = size / 2.0;
        Self::new(
            id,
            vec![vec![
                center + Vec2::new(-h.x, -h.y),
                center + Vec2::new(-h.x, h.y),
                center + Vec2::new(h.x, h.y),
                center + Vec2::new(h.x, -h.y),
            ]],
        )
    }

    pub fn polygon(id: u32, vertices: Vec<Vec2>) -> Self {
        Self::new(id, vec![vertices])
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// Edges of every shape as (start, end) pairs, each shape closed back to its first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.shapes.iter().flat_map(|shape| {
            let n = shape.len();
            let count = if n >= 2 { n } else { 0 };
            (0..count).map(move |i| (shape[i], shape[(i + 1) % n]))
        })
    }

    /// Whether any shape overlaps the circle at `center` with `radius`
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.shapes.iter().any(|shape| {
            point_in_polygon(center, shape)
                || shape.iter().any(|v| v.distance_squared(center) <= radius * radius)
        }) || self
            .edges()
            .any(|(a, b)| distance_to_segment(center, a, b) <= radius)
    }

    /// Distance along the ray to the nearest edge crossing within `max_distance`
    pub fn ray_distance(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        self.edges()
            .filter_map(|(a, b)| ray_segment_distance(origin, direction, a, b))
            .filter(|&t| t <= max_distance)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// A set of polygon obstacles answering sight queries directly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonWorld {
    pub obstacles: Vec<Obstacle>,
}

impl PolygonWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_obstacles(obstacles: Vec<Obstacle>) -> Self {
        PolygonWorld { obstacles }
    }

    pub fn add(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Remove an obstacle by id, returning it if present
    pub fn remove(&mut self, id: u32) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(index))
    }

    /// One past the largest id in use, or `None` once `u32::MAX` is taken
    pub fn next_id(&self) -> Option<u32> {
        match self.obstacles.iter().map(|o| o.id).max() {
            Some(largest) => largest.checked_add(1),
            None => Some(0),
        }
    }

    /// Topmost obstacle whose shape contains `point`
    pub fn obstacle_at(&self, point: Vec2) -> Option<u32> {
        self.obstacles
            .iter()
            .rev()
            .find(|o| o.shapes.iter().any(|shape| point_in_polygon(point, shape)))
            .map(|o| o.id)
    }

    fn visible_to(layers: LayerMask) -> impl Fn(&&Obstacle) -> bool {
        move |o| layers.contains_layer(o.layer)
    }
}

impl SceneQuery for PolygonWorld {
    type ObstacleId = u32;

    fn obstacles_in_radius(
        &self,
        center: Vec2,
        radius: f32,
        layers: LayerMask,
    ) -> Vec<ObstacleOutline<u32>> {
        self.obstacles
            .iter()
            .filter(Self::visible_to(layers))
            .filter(|o| o.overlaps_circle(center, radius))
            .map(|o| ObstacleOutline {
                id: o.id,
                shapes: o.shapes.clone(),
            })
            .collect()
    }

    fn raycast_nearest(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit<u32>> {
        self.obstacles
            .iter()
            .filter(Self::visible_to(layers))
            .filter_map(|o| o.ray_distance(origin, direction, max_distance).map(|t| (t, o.id)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, id)| RayHit {
                point: origin + direction * t,
                obstacle: id,
            })
    }
}

/// Distance t >= 0 along `origin + t * direction` where it crosses segment a-b
pub fn ray_segment_distance(origin: Vec2, direction: Vec2, a: Vec2, b: Vec2) -> Option<f32> {
    let edge = b - a;
    let denom = direction.perp_dot(edge);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let w = a - origin;
    let t = w.perp_dot(edge) / denom;
    let u = w.perp_dot(direction) / denom;
    if t >= 0.0 && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// Shortest distance from `p` to segment a-b
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Even-odd point in polygon test
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_segment_distance() {
        let t = ray_segment_distance(Vec2::ZERO, Vec2::Y, Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.0));
        assert_eq!(t, Some(2.0));

        // behind the origin
        assert!(ray_segment_distance(Vec2::ZERO, -Vec2::Y, Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.0)).is_none());
        // parallel
        assert!(ray_segment_distance(Vec2::ZERO, Vec2::X, Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.0)).is_none());
        // misses the end of the segment
        assert!(ray_segment_distance(Vec2::ZERO, Vec2::Y, Vec2::new(1.0, 2.0), Vec2::new(3.0, 2.0)).is_none());
    }

    #[test]
    fn test_point_in_polygon() {
        let square = Obstacle::rect(0, Vec2::ZERO, Vec2::splat(2.0));
        assert!(point_in_polygon(Vec2::ZERO, &square.shapes[0]));
        assert!(!point_in_polygon(Vec2::new(2.0, 0.0), &square.shapes[0]));
        assert!(!point_in_polygon(Vec2::ZERO, &[Vec2::ZERO, Vec2::X]));
    }

    #[test]
    fn test_overlaps_circle() {
        let square = Obstacle::rect(0, Vec2::new(0.0, 3.0), Vec2::ONE);
        assert!(square.overlaps_circle(Vec2::ZERO, 2.6));
        assert!(!square.overlaps_circle(Vec2::ZERO, 2.4));
        // circle entirely inside the shape
        let big = Obstacle::rect(1, Vec2::ZERO, Vec2::splat(10.0));
        assert!(big.overlaps_circle(Vec2::ZERO, 1.0));
    }

    #[test]
    fn test_raycast_nearest_picks_closest() {
        let world = PolygonWorld::with_obstacles(vec![
            Obstacle::rect(1, Vec2::new(0.0, 5.0), Vec2::ONE),
            Obstacle::rect(2, Vec2::new(0.0, 3.0), Vec2::ONE),
        ]);
        let hit = world.raycast_nearest(Vec2::ZERO, Vec2::Y, 10.0, LayerMask::ALL).unwrap();
        assert_eq!(hit.obstacle, 2);
        assert!((hit.point - Vec2::new(0.0, 2.5)).length() < 1e-5);

        assert!(world.raycast_nearest(Vec2::ZERO, Vec2::Y, 2.0, LayerMask::ALL).is_none());
    }

    #[test]
    fn test_layers_filter_queries() {
        let world = PolygonWorld::with_obstacles(vec![
            Obstacle::rect(1, Vec2::new(0.0, 3.0), Vec2::ONE).with_layer(2),
        ]);
        assert!(world.raycast_nearest(Vec2::ZERO, Vec2::Y, 10.0, LayerMask::layer(1)).is_none());
        assert!(world.obstacles_in_radius(Vec2::ZERO, 10.0, LayerMask::layer(1)).is_empty());
        assert_eq!(world.obstacles_in_radius(Vec2::ZERO, 10.0, LayerMask::layer(2)).len(), 1);
    }

    #[test]
    fn test_add_remove() {
        let mut world = PolygonWorld::new();
        assert_eq!(world.next_id(), Some(0));
        world.add(Obstacle::rect(0, Vec2::ZERO, Vec2::ONE));
        world.add(Obstacle::rect(1, Vec2::new(3.0, 0.0), Vec2::ONE));
        assert_eq!(world.next_id(), Some(2));
        assert_eq!(world.obstacle_at(Vec2::new(3.1, 0.2)), Some(1));
        assert_eq!(world.remove(0).map(|o| o.id), Some(0));
        assert!(world.remove(0).is_none());
        assert_eq!(world.obstacles.len(), 1);
    }

    #[test]
    fn test_next_id_exhausted() {
        let mut world = PolygonWorld::with_obstacles(vec![Obstacle::rect(u32::MAX, Vec2::ZERO, Vec2::ONE)]);
        assert_eq!(world.next_id(), None);
        world.remove(u32::MAX);
        world.add(Obstacle::rect(7, Vec2::ZERO, Vec2::ONE));
        assert_eq!(world.next_id(), Some(8));
    }

    #[test]
    fn test_degenerate_shapes_have_no_edges() {
        let o = Obstacle::new(0, vec![vec![], vec![Vec2::ONE]]);
        assert_eq!(o.edges().count(), 0);
        assert!(o.ray_distance(Vec2::ZERO, Vec2::X, 5.0).is_none());
    }
}
