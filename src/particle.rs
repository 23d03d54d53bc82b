//! The particle record.
//!
//! Particles are plain data. All behavior lives in free functions in
//! [`rules`](crate::rules) and [`lifecycle`](crate::lifecycle) that run over
//! the simulator's `Vec<Particle>` arena, so a frame touches one contiguous
//! slice and allocates nothing.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One simulated point mass.
///
/// `#[repr(C)]` and [`Pod`] so a host can upload the whole store with
/// [`Simulation::as_bytes`](crate::Simulation::as_bytes). Layout is ten
/// tightly packed `f32`s (40 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Velocity in pixels per frame.
    pub velocity: Vec2,
    /// Drawn radius, also the wall collision margin.
    pub radius: f32,
    /// Remaining life in (0.0, 1.0].
    pub life: f32,
    /// Life lost per step.
    pub decay: f32,
    /// Fill color (RGB, 0.0-1.0).
    pub color: Vec3,
}

impl Particle {
    /// Whether the particle has used up its life.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }

    /// Current speed.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Distance to another particle's centre.
    #[inline]
    pub fn distance(&self, other: &Particle) -> f32 {
        self.position.distance(other.position)
    }
}
