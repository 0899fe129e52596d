use crate::angle::direction_from_angle;
use crate::cone::SightCone;
use crate::scene::ObstacleOutline;
use glam::Vec2;
use std::f32::consts::TAU;

/// Which probe family a candidate direction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Aimed at (or just beside) an obstacle vertex
    Silhouette,
    /// Evenly spaced around the full circle
    Uniform,
    /// Along one of the two cone boundaries
    ConeEdge,
}

/// A direction to probe, with its facing-relative angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Not necessarily unit length
    pub direction: Vec2,
    pub relative_angle: f32,
    pub kind: CandidateKind,
}

/// Bookkeeping from one generation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateStats {
    /// Silhouette vertices coinciding with the observer
    pub degenerate_vertices: usize,
    /// Obstacles that reported no vertices at all
    pub empty_obstacles: usize,
    /// Candidates dropped by the cone filter
    pub outside_cone: usize,
}

/// Collects candidate directions for one recomputation, dropping anything outside the cone
pub struct CandidateGenerator<'a> {
    origin: Vec2,
    cone: &'a SightCone,
    candidates: Vec<Candidate>,
    stats: CandidateStats,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(origin: Vec2, cone: &'a SightCone) -> Self {
        CandidateGenerator {
            origin,
            cone,
            candidates: Vec::new(),
            stats: CandidateStats::default(),
        }
    }

    fn push(&mut self, direction: Vec2, relative_angle: f32, kind: CandidateKind) {
        if !self.cone.contains_relative(relative_angle) {
            self.stats.outside_cone += 1;
            return;
        }
        self.candidates.push(Candidate {
            direction,
            relative_angle,
            kind,
        });
    }

    /// Three rays per obstacle vertex: offset left, exact, offset right
    ///
    /// The offset rays straddle the vertex so a corner that is grazed exactly still
    /// produces one ray that hits the obstacle and one that passes it.
    pub fn add_silhouettes<Id>(&mut self, outlines: &[ObstacleOutline<Id>], offset: f32) {
        for outline in outlines {
            if outline.vertex_count() == 0 {
                self.stats.empty_obstacles += 1;
                continue;
            }

            for vertex in outline.vertices() {
                let to_vertex = vertex - self.origin;
                let Some(dir) = to_vertex.try_normalize() else {
                    self.stats.degenerate_vertices += 1;
                    continue;
                };
                let perpendicular = Vec2::new(dir.y, -dir.x);
                let shift = perpendicular * offset;

                for direction in [to_vertex + shift, to_vertex, to_vertex - shift] {
                    let relative = self.cone.relative_angle_of(direction);
                    self.push(direction, relative, CandidateKind::Silhouette);
                }
            }
        }
    }

    /// `count` rays at 2π·i/count clockwise from up
    pub fn add_uniform(&mut self, count: usize) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let direction = direction_from_angle(angle);
            let relative = crate::angle::relative_angle(angle, self.cone.facing);
            self.push(direction, relative, CandidateKind::Uniform);
        }
    }

    /// The two cone boundary rays; nothing for a full circle
    pub fn add_cone_edges(&mut self) {
        let Some(edges) = self.cone.edges() else {
            return;
        };
        for (absolute, relative) in edges {
            self.push(direction_from_angle(absolute), relative, CandidateKind::ConeEdge);
        }
    }

    pub fn finish(self) -> (Vec<Candidate>, CandidateStats) {
        (self.candidates, self.stats)
    }
}

/// Every candidate for one recomputation: silhouettes, then uniform rays, then cone edges
pub fn generate_candidates<Id>(
    origin: Vec2,
    cone: &SightCone,
    outlines: &[ObstacleOutline<Id>],
    vertex_offset: f32,
    uniform_rays: usize,
) -> (Vec<Candidate>, CandidateStats) {
    let mut generator = CandidateGenerator::new(origin, cone);
    generator.add_silhouettes(outlines, vertex_offset);
    generator.add_uniform(uniform_rays);
    generator.add_cone_edges();
    generator.finish()
}
