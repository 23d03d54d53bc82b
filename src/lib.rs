//! # pfield - Particle Field
//!
//! An ambient 2D particle background: a few dozen drifting dots that bounce
//! off the edges of the page, fade out over time, rain back in from a random
//! edge, and draw faint lines to their near neighbours.
//!
//! The crate owns only the simulation. The host (a browser canvas through
//! wasm, a native window, an image exporter) implements [`Surface`] and
//! calls [`Simulation::step`] once per frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pfield::prelude::*;
//!
//! let mut sim = Simulation::new();
//! sim.initialize(800, 600, false);   // 32 particles
//!
//! let mut canvas = RasterSurface::new(800, 600);
//! for _ in 0..120 {
//!     sim.step(&mut canvas);
//! }
//! canvas.save_png("frame.png")?;
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! [`Particle`] is a plain `#[repr(C)]` record: position, velocity, radius,
//! life, decay and color. The simulator keeps them in a `Vec` whose length
//! is fixed at [`Simulation::initialize`]: `min(65, floor(w * h / 15000))`.
//!
//! ### Rules
//!
//! Physics is an ordered list of [`Rule`]s run on every particle each frame:
//!
//! | Rule | Effect |
//! |------|--------|
//! | [`Rule::Gravity`] | `vy += g` |
//! | [`Rule::Integrate`] | `position += velocity` |
//! | [`Rule::Damping`] | `velocity *= factor` |
//! | [`Rule::BounceWalls`] | inelastic bounce, clamp, tangential kick |
//! | [`Rule::Agitate`] | rare random nudge |
//! | [`Rule::Age`] | `life -= decay` |
//!
//! ### Lifecycle
//!
//! A particle whose life reaches zero is [respawned](lifecycle::respawn) in
//! place on a random edge, moving inward. Nothing is ever removed.
//!
//! ### Themes
//!
//! [`Simulation::apply_theme`] swaps between the light and dark [`Palette`].
//! Only new respawns and connection lines change color; motion is untouched.

pub mod config;
pub mod connections;
mod error;
pub mod lifecycle;
mod particle;
pub mod raster;
pub mod rules;
mod simulation;
pub mod spawn;
pub mod surface;
pub mod visuals;

pub use bytemuck;
pub use config::FieldConfig;
pub use connections::{Connection, ConnectionStyle};
pub use error::FieldError;
pub use glam::{Vec2, Vec3};
pub use lifecycle::Edge;
pub use particle::Particle;
pub use raster::RasterSurface;
pub use rules::Rule;
pub use simulation::Simulation;
pub use spawn::{SpawnConfig, SpawnContext};
pub use surface::{DrawCommand, FillStyle, LineCap, RecordingSurface, StrokeStyle, Surface};
pub use visuals::{Palette, Theme, VisualConfig};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::connections::ConnectionStyle;
    pub use crate::error::FieldError;
    pub use crate::particle::Particle;
    pub use crate::raster::RasterSurface;
    pub use crate::rules::Rule;
    pub use crate::simulation::Simulation;
    pub use crate::surface::{FillStyle, LineCap, RecordingSurface, StrokeStyle, Surface};
    pub use crate::visuals::{Palette, Theme};
    pub use crate::{Vec2, Vec3};
}
