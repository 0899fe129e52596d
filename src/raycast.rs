use crate::scene::{LayerMask, SceneQuery};
use glam::Vec2;

/// Outcome of one sight ray: where it stopped and what it struck, if anything
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightRay<Id> {
    pub point: Vec2,
    pub hit: Option<Id>,
}

/// Cast one sight ray from `origin` along `direction`
///
/// The direction is normalized before querying the scene. A miss ends at
/// `origin + dir * radius`. Returns None for zero-length or non-finite directions,
/// which have no defined heading.
pub fn cast_sight_ray<Q: SceneQuery>(
    scene: &Q,
    origin: Vec2,
    direction: Vec2,
    radius: f32,
    layers: LayerMask,
) -> Option<SightRay<Q::ObstacleId>> {
    let dir = direction.try_normalize()?;

    let ray = match scene.raycast_nearest(origin, dir, radius, layers) {
        Some(hit) => SightRay {
            point: hit.point,
            hit: Some(hit.obstacle),
        },
        None => SightRay {
            point: origin + dir * radius,
            hit: None,
        },
    };
    Some(ray)
}
