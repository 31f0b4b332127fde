// src/generator.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::geometry::{Bounds, Contour, Point2};

/// Distance kept between generated vertices and the client rectangle's edges.
pub const MARGIN: u32 = 10;

pub struct PolygonGenerator {
    rng: StdRng,
}

impl PolygonGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn random_polygon(&mut self, bounds: Bounds, vertex_count: usize) -> Contour {
        random_polygon(&mut self.rng, bounds, vertex_count)
    }
}

/// Scatters `vertex_count` integer vertices over `bounds`, keeping `MARGIN`
/// pixels clear on every side. The result is generally self-intersecting.
pub fn random_polygon(rng: &mut impl Rng, bounds: Bounds, vertex_count: usize) -> Contour {
    let span_x = bounds.width.saturating_sub(2 * MARGIN).max(1);
    let span_y = bounds.height.saturating_sub(2 * MARGIN).max(1);

    let mut points = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        let x = rng.gen_range(0..span_x) + MARGIN;
        let y = rng.gen_range(0..span_y) + MARGIN;
        points.push(Point2::new(x as f64, y as f64));
    }
    points
}
