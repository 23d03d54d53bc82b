//! The particle field simulator.

use crate::config::FieldConfig;
use crate::connections::render_connections;
use crate::lifecycle::{particle_count, respawn, spawn_interior};
use crate::particle::Particle;
use crate::rules::{apply_rules, clamp_axis};
use crate::spawn::SpawnContext;
use crate::surface::{FillStyle, Surface};
use crate::visuals::Theme;
use glam::Vec2;
use tracing::{debug, trace};

/// A particle field bound to one drawing surface.
///
/// The host drives it: [`initialize`](Self::initialize) once, then
/// [`step`](Self::step) from its per-frame callback, with
/// [`resize`](Self::resize) and [`apply_theme`](Self::apply_theme) called
/// between frames as events arrive. Nothing here blocks or spawns threads.
///
/// ```ignore
/// let mut sim = Simulation::new().with_seed(7);
/// sim.initialize(800, 600, false);
/// loop {
///     sim.step(&mut canvas);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: FieldConfig,
    particles: Vec<Particle>,
    bounds: Vec2,
    theme: Theme,
    ctx: SpawnContext,
    frame: u64,
}

impl Simulation {
    /// Create an empty simulator with the default config.
    pub fn new() -> Self {
        Self::with_config(FieldConfig::default())
    }

    /// Create an empty simulator with `config`.
    pub fn with_config(config: FieldConfig) -> Self {
        let ctx = match config.seed {
            Some(seed) => SpawnContext::seeded(seed),
            None => SpawnContext::new(),
        };
        Self {
            config,
            particles: Vec::new(),
            bounds: Vec2::ZERO,
            theme: Theme::Light,
            ctx,
            frame: 0,
        }
    }

    /// Reseed the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self.ctx = SpawnContext::seeded(seed);
        self
    }

    /// Size the surface, pick the theme, and fill the store.
    ///
    /// The particle count is `min(max_particles, floor(w * h / area_per_particle))`
    /// and stays fixed until the next call. Non-positive dimensions give an
    /// empty store.
    pub fn initialize(&mut self, width: i32, height: i32, is_dark: bool) {
        self.bounds = dims(width, height);
        self.theme = Theme::from_dark(is_dark);
        self.frame = 0;

        let count = particle_count(
            self.bounds.x,
            self.bounds.y,
            self.config.area_per_particle,
            self.config.max_particles,
        );
        let palette = *self.config.palette(self.theme);
        let spawn = self.config.spawn;
        let bounds = self.bounds;
        let ctx = &mut self.ctx;
        self.particles = (0..count)
            .map(|_| spawn_interior(bounds, &palette, &spawn, ctx))
            .collect();

        debug!(
            width = self.bounds.x,
            height = self.bounds.y,
            dark = is_dark,
            count,
            "particle field initialized"
        );
    }

    /// Advance one frame and redraw.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.update();
        self.draw(surface);
    }

    /// Advance physics and lifecycle by one frame without drawing.
    ///
    /// Returns how many particles were respawned.
    pub fn update(&mut self) -> usize {
        let Self {
            config,
            particles,
            bounds,
            theme,
            ctx,
            frame,
        } = self;
        let palette = config.palette(*theme);

        let mut respawned = 0;
        for (i, p) in particles.iter_mut().enumerate() {
            apply_rules(&config.rules, p, *bounds, ctx);
            if p.is_expired() {
                let edge = respawn(p, *bounds, palette, &config.spawn, ctx);
                trace!(index = i, ?edge, "particle respawned");
                respawned += 1;
            }
        }

        *frame += 1;
        respawned
    }

    /// Clear the surface and draw connections, then particles on top.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_rect(0.0, 0.0, self.bounds.x, self.bounds.y);

        let palette = self.config.palette(self.theme);
        render_connections(
            &self.particles,
            surface,
            &self.config.connections,
            palette.accent,
        );

        let blur = self.config.visuals.blur_for(self.theme);
        for p in &self.particles {
            let style = FillStyle {
                color: p.color,
                alpha: self.config.visuals.alpha_for_life(p.life),
                shadow_color: p.color,
                shadow_blur: blur,
            };
            surface.fill_circle(p.position, p.radius, &style);
        }
    }

    /// Switch palette. Particle motion, life and existing colors are untouched;
    /// only future respawns and connection lines pick up the new theme.
    pub fn apply_theme(&mut self, is_dark: bool) {
        let theme = Theme::from_dark(is_dark);
        if theme != self.theme {
            debug!(?theme, "theme changed");
        }
        self.theme = theme;
    }

    /// Record new surface dimensions.
    ///
    /// The store keeps its size. Positions are pulled back inside the new
    /// bounds right away so no particle is ever observed out of range.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.bounds = dims(width, height);
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.position.x = clamp_axis(p.position.x, p.radius, bounds.x);
            p.position.y = clamp_axis(p.position.y, p.radius, bounds.y);
        }
        debug!(width = bounds.x, height = bounds.y, "particle field resized");
    }

    // ========== Accessors ==========

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of the store. A slice, so the count can't change.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Raw bytes of the store, for uploading to a GPU buffer or JS typed array.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn width(&self) -> f32 {
        self.bounds.x
    }

    pub fn height(&self) -> f32 {
        self.bounds.y
    }

    /// Frames advanced since the last [`initialize`](Self::initialize).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

fn dims(width: i32, height: i32) -> Vec2 {
    Vec2::new(width.max(0) as f32, height.max(0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn test_count_from_area() {
        let mut sim = Simulation::new().with_seed(1);
        sim.initialize(800, 600, false);
        assert_eq!(sim.len(), 32);

        sim.initialize(1920, 1080, true);
        assert_eq!(sim.len(), 65);
    }

    #[test]
    fn test_degenerate_dims_are_inert() {
        let mut sim = Simulation::new().with_seed(1);
        sim.initialize(-10, 600, false);
        assert!(sim.is_empty());
        assert_eq!(sim.width(), 0.0);

        let mut surface = RecordingSurface::new();
        sim.step(&mut surface);
        assert_eq!(surface.commands().len(), 1);
        assert!(matches!(surface.commands()[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_draw_order() {
        let mut sim = Simulation::new().with_seed(3);
        sim.initialize(400, 400, false);
        let mut surface = RecordingSurface::new();
        sim.draw(&mut surface);

        let cmds = surface.commands();
        assert!(matches!(cmds[0], DrawCommand::Clear { .. }));
        let first_circle = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Circle { .. }))
            .unwrap();
        assert!(cmds[first_circle..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Circle { .. })));
        assert_eq!(cmds.len() - first_circle, sim.len());
    }

    #[test]
    fn test_glow_follows_theme() {
        let mut sim = Simulation::new().with_seed(3);
        sim.initialize(400, 400, false);
        let mut surface = RecordingSurface::new();
        sim.draw(&mut surface);
        assert!(surface.circles().all(|(_, _, s)| s.shadow_blur == 0.0));

        sim.apply_theme(true);
        let mut surface = RecordingSurface::new();
        sim.draw(&mut surface);
        assert!(surface.circles().all(|(_, _, s)| s.shadow_blur == 15.0));
    }

    #[test]
    fn test_frame_counter() {
        let mut sim = Simulation::new().with_seed(3);
        sim.initialize(400, 400, false);
        sim.update();
        sim.update();
        assert_eq!(sim.frame(), 2);
        sim.initialize(400, 400, false);
        assert_eq!(sim.frame(), 0);
    }

    #[test]
    fn test_as_bytes_len() {
        let mut sim = Simulation::new().with_seed(3);
        sim.initialize(800, 600, false);
        assert_eq!(sim.as_bytes().len(), sim.len() * std::mem::size_of::<Particle>());
    }
}
