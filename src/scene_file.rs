use crate::world::{Obstacle, PolygonWorld};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneFileError {
    #[error("failed to access scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Initial observer pose stored with a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverStart {
    pub position: Vec2,
    #[serde(default)]
    pub facing: f32,
    #[serde(default = "full_spread")]
    pub spread: f32,
}

fn full_spread() -> f32 {
    std::f32::consts::TAU
}

/// Obstacles, an optional observer start and a waypoint loop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub waypoints: Vec<Vec2>,
    #[serde(default)]
    pub observer: Option<ObserverStart>,
}

impl SceneFile {
    pub fn from_world(world: &PolygonWorld, waypoints: &[Vec2], observer: Option<ObserverStart>) -> Self {
        SceneFile {
            obstacles: world.obstacles.clone(),
            waypoints: waypoints.to_vec(),
            observer,
        }
    }

    pub fn to_world(&self) -> PolygonWorld {
        PolygonWorld::with_obstacles(self.obstacles.clone())
    }

    pub fn to_json(&self) -> Result<String, SceneFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SceneFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SceneFileError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SceneFileError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SceneFileError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SceneFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Walled room with a few pillars and a patrol loop, used when no scene file exists
    pub fn demo() -> Self {
        let mut obstacles = vec![
            Obstacle::rect(0, Vec2::new(0.0, 7.5), Vec2::new(16.0, 1.0)),
            Obstacle::rect(1, Vec2::new(0.0, -7.5), Vec2::new(16.0, 1.0)),
            Obstacle::rect(2, Vec2::new(-7.5, 0.0), Vec2::new(1.0, 14.0)),
            Obstacle::rect(3, Vec2::new(7.5, 0.0), Vec2::new(1.0, 14.0)),
        ];
        let pillars = [
            Vec2::new(-3.0, 3.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(-3.0, -3.0),
            Vec2::new(3.0, -3.0),
            Vec2::new(0.0, 0.0),
        ];
        for (i, &center) in pillars.iter().enumerate() {
            obstacles.push(Obstacle::rect(4 + i as u32, center, Vec2::splat(1.0)));
        }
        obstacles.push(Obstacle::polygon(
            9,
            vec![Vec2::new(5.0, -1.0), Vec2::new(6.0, 0.5), Vec2::new(4.5, 1.0)],
        ));

        SceneFile {
            obstacles,
            waypoints: vec![
                Vec2::new(-5.0, 5.0),
                Vec2::new(5.0, 5.0),
                Vec2::new(5.0, -5.0),
                Vec2::new(-5.0, -5.0),
            ],
            observer: None,
        }
    }
}
