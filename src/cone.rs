use crate::angle;
use glam::Vec2;
use std::f32::consts::TAU;

/// Sight cone centered on the facing direction
/// Angles are radians clockwise from up; the cone covers `facing ± spread / 2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightCone {
    /// Facing direction, wrapped into [0, 2π)
    pub facing: f32,
    /// Full aperture, clamped into [0, 2π]
    pub spread: f32,
}

impl SightCone {
    /// Create a cone, wrapping the facing and clamping the spread
    pub fn new(facing: f32, spread: f32) -> Self {
        SightCone {
            facing: angle::normalize(facing),
            spread: clamp_spread(spread),
        }
    }

    /// A cone that sees every direction
    pub fn full_circle(facing: f32) -> Self {
        Self::new(facing, TAU)
    }

    pub fn half_spread(&self) -> f32 {
        self.spread / 2.0
    }

    pub fn is_full_circle(&self) -> bool {
        self.spread >= TAU
    }

    /// Whether a facing-relative angle falls inside the cone (edges inclusive)
    pub fn contains_relative(&self, relative: f32) -> bool {
        if self.is_full_circle() {
            return true;
        }
        let half = self.half_spread();
        angle::is_between(relative, -half, half)
    }

    /// Facing-relative angle of an absolute direction
    pub fn relative_angle_of(&self, dir: Vec2) -> f32 {
        angle::relative_angle(angle::angle_from_up(dir), self.facing)
    }

    /// The two boundary rays as (absolute angle, relative angle), left edge first
    /// None when the cone is a full circle
    pub fn edges(&self) -> Option<[(f32, f32); 2]> {
        if self.is_full_circle() {
            return None;
        }
        let half = self.half_spread();
        Some([(self.facing - half, -half), (self.facing + half, half)])
    }
}

/// NaN spreads collapse to 0
fn clamp_spread(spread: f32) -> f32 {
    if spread.is_nan() {
        0.0
    } else {
        spread.clamp(0.0, TAU)
    }
}
