//! Seeded random rings and candidate scatters (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic fixtures for selection tests, benches and demos. A draw is
//!   fully determined by its `ReplayToken`, so failing cases can be replayed.
//!
//! Model
//! - Start from `n` equally spaced angles around a center, add bounded angular
//!   and radial jitter, and keep the angular order. The result is a simple
//!   (non-self-intersecting) ring; with `n >= 4` it also contains the center.
//! - Candidates are drawn uniformly from a `BBox`.

use super::ring::Ring;
use super::types::{BBox, LatLng, ShapeError};
use crate::select::Candidate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter ring sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii = `base_radius_deg * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Base radius in degrees.
    pub base_radius_deg: f64,
    pub random_phase: bool,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius_deg: 0.05,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }

    /// Token for the next draw in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }
}

/// Draw a simple ring around `center`. Fails only for a non-finite center.
pub fn draw_ring_radial(
    center: LatLng,
    cfg: RadialCfg,
    tok: ReplayToken,
) -> Result<Ring, ShapeError> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius_deg.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    // |jitter| < Δ/2 keeps consecutive angles strictly increasing.
    let vertices: Vec<LatLng> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u) * r0;
            LatLng::new(center.lat + th.sin() * r, center.lng + th.cos() * r)
        })
        .collect();
    Ring::new(vertices)
}

/// Scatter `count` candidates uniformly over `area`, ids `0..count`.
pub fn scatter_candidates(area: BBox, count: usize, tok: ReplayToken) -> Vec<Candidate<u64>> {
    let mut rng = tok.to_std_rng();
    (0..count as u64)
        .map(|id| {
            let lat = area.min.x + rng.gen::<f64>() * (area.max.x - area.min.x);
            let lng = area.min.y + rng.gen::<f64>() * (area.max.y - area.min.y);
            Candidate::new(id, LatLng::new(lat, lng))
        })
        .collect()
}
