pub mod angle;
pub mod candidates;
pub mod cone;
pub mod config;
pub mod logging;
pub mod mesh;
pub mod raycast;
pub mod scene;
pub mod scene_file;
pub mod sight;
pub mod waypoints;
pub mod world;

pub use cone::SightCone;
pub use config::{Config, ConfigError, SightConfig};
pub use scene::{LayerMask, ObstacleOutline, RayHit, SceneQuery};
pub use sight::Sight;
pub use world::{Obstacle, PolygonWorld};
