//! Spawn context and spawn-time parameters.
//!
//! All randomness in the simulator flows through one [`SpawnContext`], so a
//! seeded context reproduces a whole run.

use crate::visuals::Palette;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Ranges sampled when a particle is created or respawned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Initial velocity per axis is sampled from `[-velocity, velocity)`.
    pub velocity: f32,
    /// Radius range `[min, max)`.
    pub radius: (f32, f32),
    /// Per-step life decay range `[min, max)`.
    pub decay: (f32, f32),
    /// Inward speed range `[0, respawn_speed)` for edge respawns.
    pub respawn_speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            velocity: 0.6,
            radius: (2.0, 5.0),
            decay: (0.0005, 0.0015),
            respawn_speed: 1.2,
        }
    }
}

/// Random source plus sampling helpers.
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(7);
/// let pos = ctx.random_in_rect(Vec2::splat(3.0), Vec2::new(797.0, 597.0));
/// let vel = ctx.random_velocity(0.6);
/// ```
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from the clock, different each program execution.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Context with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random f32 in `[-magnitude, magnitude)`.
    #[inline]
    pub fn jitter(&mut self, magnitude: f32) -> f32 {
        self.random_range(-magnitude, magnitude)
    }

    /// `true` with the given probability.
    #[inline]
    pub fn chance(&mut self, probability: f32) -> bool {
        self.random() < probability
    }

    /// Random usize in `[0, n)`. `n` must be non-zero.
    #[inline]
    pub fn random_index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    // ========== Shape helpers ==========

    /// Random point inside the axis-aligned rectangle `[min, max]`.
    ///
    /// A degenerate axis (`max < min`) collapses to its midpoint.
    pub fn random_in_rect(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(self.axis(min.x, max.x), self.axis(min.y, max.y))
    }

    /// Velocity with each component in `[-spread, spread)`.
    pub fn random_velocity(&mut self, spread: f32) -> Vec2 {
        Vec2::new(self.jitter(spread), self.jitter(spread))
    }

    /// One of the palette's particle colors, uniformly.
    pub fn random_color(&mut self, palette: &Palette) -> Vec3 {
        let i = self.random_index(palette.colors.len());
        palette.colors[i]
    }

    fn axis(&mut self, min: f32, max: f32) -> f32 {
        if max < min {
            (min + max) * 0.5
        } else {
            self.random_range(min, max)
        }
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}
