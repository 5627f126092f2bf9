//! Driver-supplied simulation types
//!
//! The engine reads these every tick but never owns them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// One link of the creature's body, head-first order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Position in grid-cell units (may carry interpolated fractions)
    pub pos: Vec2,
    /// Presentation only
    #[serde(default)]
    pub rotation: f32,
    /// Presentation only
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl Segment {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y))
    }
}

impl From<Vec2> for Segment {
    fn from(pos: Vec2) -> Self {
        Self::new(pos)
    }
}

/// Build a body from plain `(x, y)` pairs
pub fn segments_from(points: &[(f32, f32)]) -> Vec<Segment> {
    points.iter().map(|&(x, y)| Segment::at(x, y)).collect()
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
