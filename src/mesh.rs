use glam::Vec2;

/// Triangle fan over a sight polygon, rooted at vertex 0 (the observer)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SightMesh {
    pub vertices: Vec<Vec2>,
    /// Index triples, three per triangle
    pub indices: Vec<u32>,
}

impl SightMesh {
    /// Build the fan from a clockwise polygon whose first point is the observer
    ///
    /// Produces `n - 2` triangles for `n` points: (i + 1, i, 0) for i in 1..n-1.
    /// Fewer than three points give an empty mesh.
    pub fn from_polygon(polygon: &[Vec2]) -> Self {
        let n = polygon.len();
        let mut indices = Vec::with_capacity(n.saturating_sub(2) * 3);
        for face in 1..n.saturating_sub(1) {
            indices.push((face + 1) as u32);
            indices.push(face as u32);
            indices.push(0);
        }
        SightMesh {
            vertices: polygon.to_vec(),
            indices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Total covered area; overlapping fan triangles are counted once each
    pub fn area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| ((b - a).perp_dot(c - a) / 2.0).abs())
            .sum()
    }
}
