use glam::Vec2;
use std::f32::consts::TAU;

/// Moves an observer around a closed loop of waypoints
///
/// The path target advances at `speed` units per second along the current
/// section; the actual position eases toward it by `lerp_speed * dt` each step,
/// which rounds off the corners.
#[derive(Clone, Debug)]
pub struct WaypointFollower {
    pub waypoints: Vec<Vec2>,
    /// Path speed in world units per second
    pub speed: f32,
    /// Fraction of the remaining gap closed per second
    pub lerp_speed: f32,
    pub position: Vec2,
    last_waypoint: usize,
    /// Progress along the current section, 0..1
    section_t: f32,
}

impl WaypointFollower {
    /// Start at the first waypoint (or the origin when there are none)
    pub fn new(waypoints: Vec<Vec2>, speed: f32, lerp_speed: f32) -> Self {
        let position = waypoints.first().copied().unwrap_or(Vec2::ZERO);
        WaypointFollower {
            waypoints,
            speed,
            lerp_speed,
            position,
            last_waypoint: 0,
            section_t: 0.0,
        }
    }

    fn waypoint(&self, index: usize) -> Vec2 {
        self.waypoints[index % self.waypoints.len()]
    }

    /// Index of the waypoint the current section starts from
    pub fn current_section(&self) -> usize {
        if self.waypoints.is_empty() {
            0
        } else {
            self.last_waypoint % self.waypoints.len()
        }
    }

    /// Point on the path the follower is currently easing toward
    pub fn path_target(&self) -> Vec2 {
        match self.waypoints.len() {
            0 => self.position,
            1 => self.waypoints[0],
            _ => {
                let from = self.waypoint(self.last_waypoint);
                let to = self.waypoint(self.last_waypoint + 1);
                from.lerp(to, self.section_t)
            }
        }
    }

    fn advance_path(&mut self, delta_time: f32) {
        if self.waypoints.len() < 2 {
            return;
        }
        self.last_waypoint %= self.waypoints.len();

        let from = self.waypoint(self.last_waypoint);
        let to = self.waypoint(self.last_waypoint + 1);
        let section_length = from.distance(to);
        if section_length <= f32::EPSILON {
            // coincident waypoints: skip straight to the next section
            self.last_waypoint += 1;
            self.section_t = 0.0;
            return;
        }

        let step = delta_time * self.speed / section_length;
        if !step.is_finite() {
            return;
        }
        self.section_t += step;
        if self.section_t > 1.0 {
            // whole sections passed; an exact integer lands on the section end
            let whole = self.section_t.ceil() - 1.0;
            let len = self.waypoints.len();
            let skipped = whole.rem_euclid(len as f32) as usize;
            self.last_waypoint = (self.last_waypoint + skipped) % len;
            self.section_t = (self.section_t - whole).clamp(0.0, 1.0);
        }
    }

    /// Step the follower (call once per frame)
    /// Returns the movement made this step, suitable for steering a sight
    pub fn update(&mut self, delta_time: f32) -> Vec2 {
        self.advance_path(delta_time);

        let previous = self.position;
        let blend = (delta_time * self.lerp_speed).clamp(0.0, 1.0);
        self.position = self.position.lerp(self.path_target(), blend);
        self.position - previous
    }
}

/// Spread that swings between `min` and `max` on a sine wave
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadOscillator {
    pub min: f32,
    pub max: f32,
    /// Seconds per full swing
    pub period: f32,
}

impl SpreadOscillator {
    pub fn new(min: f32, max: f32, period: f32) -> Self {
        SpreadOscillator { min, max, period }
    }

    /// Spread at `time` seconds; a non-positive period holds at `min`
    pub fn spread_at(&self, time: f32) -> f32 {
        if self.period <= 0.0 {
            return self.min;
        }
        let t = ((TAU * time / self.period).sin() + 1.0) / 2.0;
        self.min + (self.max - self.min) * t
    }
}
