use glam::Vec2;
use sightcone::mesh::SightMesh;
use sightcone::scene_file::{ObserverStart, SceneFile, SceneFileError};
use sightcone::waypoints::WaypointFollower;
use sightcone::{Config, Sight};
use std::fs;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sightcone_{}_{}", std::process::id(), name))
}

#[test]
fn saved_scene_reproduces_the_same_sight() {
    let scene = SceneFile::demo();
    let world = scene.to_world();
    let observer = ObserverStart {
        position: Vec2::new(-5.0, 5.0),
        facing: 2.3,
        spread: 1.5,
    };
    let saved = SceneFile::from_world(&world, &scene.waypoints, Some(observer));

    let path = temp_path("scene.json");
    saved.save_to_file(&path).unwrap();
    let loaded = SceneFile::load_from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(loaded, saved);

    let mut original = Sight::new(Config::default().sight, observer.position);
    let mut restored = Sight::new(Config::default().sight, loaded.observer.unwrap().position);
    for sight in [&mut original, &mut restored] {
        sight.set_direction(observer.facing);
        sight.set_spread(observer.spread);
    }
    original.recalculate(&world);
    restored.recalculate(&loaded.to_world());

    assert_eq!(original.polygon(), restored.polygon());
    assert_eq!(original.seen_objects(), restored.seen_objects());
}

#[test]
fn missing_scene_file_is_an_io_error() {
    let err = SceneFile::load_from_file(temp_path("missing.json")).unwrap_err();
    assert!(matches!(err, SceneFileError::Io { .. }));
}

#[test]
fn patrol_through_demo_room_keeps_invariants() {
    let scene = SceneFile::demo();
    let world = scene.to_world();
    let mut follower = WaypointFollower::new(scene.waypoints.clone(), 2.0, 4.0);
    let mut sight = Sight::new(Config::default().sight, follower.position);
    sight.set_spread(2.0);

    for frame in 0..120 {
        let moved = follower.update(1.0 / 30.0);
        sight.set_position(follower.position);
        sight.set_direction_vector(moved);
        sight.recalculate(&world);

        let polygon = sight.polygon();
        assert_eq!(polygon[0], follower.position, "frame {}", frame);
        assert!(sight.boundary_angles().windows(2).all(|w| w[0] <= w[1]));

        let mesh = SightMesh::from_polygon(polygon);
        assert_eq!(mesh.triangle_count(), polygon.len() - 2);
    }
}
