/// Runs one sight recalculation against a scene file and prints the result as JSON
///
/// Sight tunables come from config.toml when present.

use glam::Vec2;
use sightcone::scene_file::SceneFile;
use sightcone::{logging, Config, Sight};
use std::env;
use std::process;

fn parse_f32(arg: Option<&String>, name: &str) -> Result<Option<f32>, String> {
    match arg {
        None => Ok(None),
        Some(s) => s
            .parse::<f32>()
            .map(Some)
            .map_err(|e| format!("invalid {} '{}': {}", name, s, e)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <scene.json> [x y [facing [spread]]]", args[0]);
        eprintln!("Angles are radians clockwise from up; spread defaults to the scene or a full circle");
        process::exit(1);
    }

    let config = Config::load();
    logging::init(&config.logging)?;

    let scene = SceneFile::load_from_file(&args[1])?;
    let world = scene.to_world();

    let start = scene.observer;
    let x = parse_f32(args.get(2), "x")?;
    let y = parse_f32(args.get(3), "y")?;
    let position = match (x, y) {
        (Some(x), Some(y)) => Vec2::new(x, y),
        _ => start.map(|s| s.position).unwrap_or(Vec2::new(config.observer.x, config.observer.y)),
    };

    let mut sight = Sight::try_new(config.sight, position)?;
    if let Some(start) = start {
        sight.set_direction(start.facing);
        sight.set_spread(start.spread);
    }
    if let Some(facing) = parse_f32(args.get(4), "facing")? {
        sight.set_direction(facing);
    }
    if let Some(spread) = parse_f32(args.get(5), "spread")? {
        sight.set_spread(spread);
    }

    sight.recalculate(&world);

    println!("{}", serde_json::to_string_pretty(&sight.snapshot())?);
    Ok(())
}
