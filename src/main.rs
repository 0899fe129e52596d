use arboard::Clipboard;
use glam::Vec2;
use log::{error, info, warn};
use macroquad::prelude::{
    clear_background, draw_circle, draw_line, draw_text, draw_triangle, get_frame_time, get_time,
    is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position, next_frame,
    screen_height, screen_width, vec2, Color, Conf, KeyCode, MouseButton, BLUE, WHITE,
};
use sightcone::config::{Config, VisualConfig};
use sightcone::mesh::SightMesh;
use sightcone::scene_file::{ObserverStart, SceneFile};
use sightcone::waypoints::{SpreadOscillator, WaypointFollower};
use sightcone::{logging, Obstacle, PolygonWorld, Sight};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

const SEEN_COLOR: Color = Color::new(0.9, 0.25, 0.25, 1.0);
const UNSEEN_COLOR: Color = Color::new(0.3, 0.8, 0.35, 1.0);
const SIGHT_COLOR: Color = Color::new(1.0, 0.95, 0.6, 0.35);
const WAYPOINT_COLOR: Color = Color::new(0.5, 0.5, 0.9, 0.8);

/// Visualization state
struct DemoState {
    world: PolygonWorld,
    sight: Sight<u32>,
    /// Refreshed by the sight's recalculation listener
    mesh: Rc<RefCell<SightMesh>>,
    follower: WaypointFollower,
    oscillator: SpreadOscillator,
    scene_path: String,
    visual: VisualConfig,
    paused: bool,
}

impl DemoState {
    fn new(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let scene = if Path::new(&config.scene.path).exists() {
            let scene = SceneFile::load_from_file(&config.scene.path)?;
            info!("Loaded scene from {}", config.scene.path);
            scene
        } else {
            info!("No scene at {}, using the built-in demo room", config.scene.path);
            SceneFile::demo()
        };

        let start = scene
            .observer
            .map(|s| s.position)
            .or_else(|| scene.waypoints.first().copied())
            .unwrap_or(Vec2::new(config.observer.x, config.observer.y));

        let mut sight = Sight::try_new(config.sight, start)?;
        if let Some(observer) = scene.observer {
            sight.set_direction(observer.facing);
            sight.set_spread(observer.spread);
        }

        let mesh = Rc::new(RefCell::new(SightMesh::default()));
        let sink = Rc::clone(&mesh);
        sight.on_recalculated(move |polygon, _| {
            *sink.borrow_mut() = SightMesh::from_polygon(polygon);
        });

        let mut follower = WaypointFollower::new(
            scene.waypoints.clone(),
            config.motion.speed,
            config.motion.lerp_speed,
        );
        follower.position = start;

        Ok(DemoState {
            world: scene.to_world(),
            sight,
            mesh,
            follower,
            oscillator: SpreadOscillator::new(
                config.motion.min_spread,
                config.motion.max_spread,
                config.motion.spread_period,
            ),
            scene_path: config.scene.path,
            visual: config.visual,
            paused: scene.waypoints.is_empty(),
        })
    }

    fn world_to_screen(&self, p: Vec2) -> macroquad::math::Vec2 {
        let ppu = self.visual.pixels_per_unit;
        vec2(screen_width() / 2.0 + p.x * ppu, screen_height() / 2.0 - p.y * ppu)
    }

    fn screen_to_world(&self, x: f32, y: f32) -> Vec2 {
        let ppu = self.visual.pixels_per_unit;
        Vec2::new((x - screen_width() / 2.0) / ppu, (screen_height() / 2.0 - y) / ppu)
    }

    fn handle_input(&mut self) {
        if is_key_pressed(KeyCode::Space) {
            self.paused = !self.paused;
        }
        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            self.save_scene();
        }

        let (mouse_x, mouse_y) = mouse_position();
        let mouse = self.screen_to_world(mouse_x, mouse_y);

        // Left drag while paused: look at the cursor
        if self.paused && is_mouse_button_down(MouseButton::Left) {
            self.sight.set_direction_by_target(mouse);
        }
        // Right click: remove the obstacle under the cursor or drop a new block
        if is_mouse_button_pressed(MouseButton::Right) {
            match self.world.obstacle_at(mouse) {
                Some(id) => {
                    self.world.remove(id);
                }
                None => match self.world.next_id() {
                    Some(id) => self.world.add(Obstacle::rect(id, mouse, Vec2::ONE)),
                    None => warn!("No obstacle ids left, block not added"),
                },
            }
        }
    }

    fn update(&mut self, delta_time: f32, time: f32) {
        if !self.paused {
            let moved = self.follower.update(delta_time);
            self.sight.set_position(self.follower.position);
            self.sight.set_direction_vector(moved);
            self.sight.set_spread(self.oscillator.spread_at(time));
        }
        self.sight.recalculate(&self.world);
    }

    fn copy_to_clipboard(&self) {
        let json = match serde_json::to_string_pretty(&self.sight.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize sight: {}", e);
                return;
            }
        };
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&json) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Sight polygon copied to clipboard");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn save_scene(&self) {
        let observer = ObserverStart {
            position: self.sight.position(),
            facing: self.sight.facing(),
            spread: self.sight.spread(),
        };
        let scene = SceneFile::from_world(&self.world, &self.follower.waypoints, Some(observer));
        match scene.save_to_file(&self.scene_path) {
            Ok(()) => info!("Scene saved to {}", self.scene_path),
            Err(e) => error!("{}", e),
        }
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(
            self.visual.background_r,
            self.visual.background_g,
            self.visual.background_b,
            255,
        ));

        for [a, b, c] in self.mesh.borrow().triangles() {
            draw_triangle(
                self.world_to_screen(a),
                self.world_to_screen(b),
                self.world_to_screen(c),
                SIGHT_COLOR,
            );
        }

        for obstacle in &self.world.obstacles {
            let color = if self.sight.has_seen(&obstacle.id) {
                SEEN_COLOR
            } else {
                UNSEEN_COLOR
            };
            for (a, b) in obstacle.edges() {
                let a = self.world_to_screen(a);
                let b = self.world_to_screen(b);
                draw_line(a.x, a.y, b.x, b.y, 2.0, color);
            }
        }

        if self.visual.show_vertices {
            for &p in self.sight.polygon() {
                let s = self.world_to_screen(p);
                draw_circle(s.x, s.y, 2.0, WHITE);
            }
        }

        if self.visual.show_waypoints {
            for &w in &self.follower.waypoints {
                let s = self.world_to_screen(w);
                draw_circle(s.x, s.y, 4.0, WAYPOINT_COLOR);
            }
        }

        let observer = self.world_to_screen(self.sight.position());
        draw_circle(observer.x, observer.y, 6.0, BLUE);

        let info = format!(
            "Facing: {:.2} rad  Spread: {:.2} rad\nPolygon points: {}  Seen: {}\nSpace: pause  Left drag (paused): aim\nRight click: add/remove block  C: copy  S: save  Esc: quit",
            self.sight.facing(),
            self.sight.spread(),
            self.sight.polygon().len(),
            self.sight.seen_objects().len()
        );
        for (i, line) in info.lines().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 20.0, WHITE);
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: Config::load().visual.window_title,
        window_width: 800,
        window_height: 700,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let mut state = match DemoState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    loop {
        state.handle_input();

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.update(get_frame_time(), get_time() as f32);
        state.draw();

        next_frame().await
    }
}
