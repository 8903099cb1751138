/// Static figure topology: vertex lists, edge lists and the torus sampler
use nalgebra::Point3;
use std::f64::consts::{FRAC_PI_2, TAU};


/// A point in local model space
pub type Vertex = Point3<f64>;

/// An unordered pair of vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge(pub usize, pub usize);

/// A wireframe shape built once and never mutated afterwards
#[derive(Debug, Clone)]
pub struct WireShape {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl WireShape {
    // Built-in topologies are generated with in-range indices.
    fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        debug_assert!(edges
            .iter()
            .all(|e| e.0 < vertices.len() && e.1 < vertices.len()));
        Self { vertices, edges }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Axis-aligned cube centred on the origin with corners at `±half`
    pub fn cube(half: f64) -> Self {
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];
        let edges = [
            (0, 1), (1, 2), (2, 3), (3, 0),
            (4, 5), (5, 6), (6, 7), (7, 4),
            (0, 4), (1, 5), (2, 6), (3, 7),
        ]
        .iter()
        .map(|&(a, b)| Edge(a, b))
        .collect();

        Self::new(vertices, edges)
    }

    /// Quad-mesh torus: a tube of radius `tube` swept around a ring of radius `ring`.
    ///
    /// Vertex `(i, j)` sits at ring step `i` and tube step `j`; every vertex is
    /// joined to its next neighbour along the tube and along the ring, with
    /// wraparound on both, so the mesh has `2 * ring_steps * tube_steps` edges.
    pub fn torus(ring: f64, tube: f64, ring_steps: usize, tube_steps: usize) -> Self {
        let mut vertices = Vec::with_capacity(ring_steps * tube_steps);
        let mut edges = Vec::with_capacity(2 * ring_steps * tube_steps);

        for i in 0..ring_steps {
            let theta = TAU * i as f64 / ring_steps as f64;
            for j in 0..tube_steps {
                let phi = TAU * j as f64 / tube_steps as f64;
                let radius = ring + tube * phi.cos();
                vertices.push(Point3::new(
                    radius * theta.cos(),
                    radius * theta.sin(),
                    tube * phi.sin(),
                ));
            }
        }

        for i in 0..ring_steps {
            for j in 0..tube_steps {
                let current = i * tube_steps + j;
                let next_tube = i * tube_steps + (j + 1) % tube_steps;
                let next_ring = ((i + 1) % ring_steps) * tube_steps + j;
                edges.push(Edge(current, next_tube));
                edges.push(Edge(current, next_ring));
            }
        }

        Self::new(vertices, edges)
    }

    /// Two rounded-rectangle faces joined by rungs, with a small
    /// triangular prism floating between them.
    pub fn bridge() -> Self {
        const WIDTH: f64 = 2.0;
        const HEIGHT: f64 = 1.2;
        const HALF_DEPTH: f64 = 0.2;
        const RADIUS: f64 = 0.3;
        const CORNER_SEGMENTS: usize = 10;
        const CORNERS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut vertices = Vec::new();
        let mut edges = Vec::new();

        for z in [-HALF_DEPTH, HALF_DEPTH] {
            for (corner, (sx, sy)) in CORNERS.iter().enumerate() {
                let cx = sx * (WIDTH / 2.0 - RADIUS);
                let cy = sy * (HEIGHT / 2.0 - RADIUS);
                let start = corner as f64 * FRAC_PI_2;
                for step in 0..=CORNER_SEGMENTS {
                    let theta = start + step as f64 * FRAC_PI_2 / CORNER_SEGMENTS as f64;
                    vertices.push(Point3::new(
                        cx + RADIUS * theta.cos(),
                        cy + RADIUS * theta.sin(),
                        z,
                    ));
                }
            }
        }

        let per_face = 4 * (CORNER_SEGMENTS + 1);
        for i in 0..per_face {
            let next = (i + 1) % per_face;
            edges.push(Edge(i, next));
            edges.push(Edge(i + per_face, next + per_face));
            edges.push(Edge(i, i + per_face));
        }

        let prism_start = vertices.len();
        for z in [0.01, 0.05] {
            vertices.push(Point3::new(-0.4, -0.3, z));
            vertices.push(Point3::new(0.5, 0.0, z));
            vertices.push(Point3::new(-0.4, 0.3, z));
        }
        let prism_edges = [
            (0, 1), (1, 2), (2, 0),
            (3, 4), (4, 5), (5, 3),
            (0, 3), (1, 4), (2, 5),
        ];
        edges.extend(
            prism_edges
                .iter()
                .map(|&(a, b)| Edge(prism_start + a, prism_start + b)),
        );

        Self::new(vertices, edges)
    }
}

/// Parametric torus re-sampled on every frame instead of stored as a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusSampler {
    /// Radius of the tube
    pub tube_radius: f64,
    /// Distance from the torus centre to the tube centre
    pub ring_radius: f64,
    /// Angular step around the tube cross-section
    pub theta_step: f64,
    /// Angular step around the ring
    pub phi_step: f64,
}

impl TorusSampler {
    pub fn new(tube_radius: f64, ring_radius: f64, theta_step: f64, phi_step: f64) -> Self {
        Self {
            tube_radius,
            ring_radius,
            theta_step,
            phi_step,
        }
    }

    /// Every sample point, `theta` in the outer loop and `phi` in the inner
    pub fn points(&self) -> impl Iterator<Item = Vertex> + '_ {
        steps(self.theta_step).flat_map(move |theta| {
            let (sin_theta, cos_theta) = theta.sin_cos();
            let radius = self.ring_radius + self.tube_radius * cos_theta;
            let z = self.tube_radius * sin_theta;
            steps(self.phi_step).map(move |phi| {
                let (sin_phi, cos_phi) = phi.sin_cos();
                Point3::new(radius * cos_phi, radius * sin_phi, z)
            })
        })
    }

    pub fn sample_count(&self) -> usize {
        steps(self.theta_step).count() * steps(self.phi_step).count()
    }
}

impl Default for TorusSampler {
    fn default() -> Self {
        Self::new(100.0, 200.0, 0.07, 0.02)
    }
}

/// Accumulated angles `0, step, 2*step, ...` strictly below a full turn
fn steps(step: f64) -> impl Iterator<Item = f64> {
    let step = if step > 0.0 { step } else { TAU };
    std::iter::successors(Some(0.0_f64), move |angle| Some(angle + step))
        .take_while(|angle| *angle < TAU)
}
