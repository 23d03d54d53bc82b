//! Particle lifecycle: creation, death, and edge respawn.
//!
//! Every particle loses a little life each step (see [`Rule::Age`]). When
//! life runs out the slot is not freed; [`respawn`] overwrites it in place
//! with a fresh particle entering from a random screen edge. The store's
//! length therefore never changes after [`Simulation::initialize`].
//!
//! ```text
//!            Top: vy in [0, speed)
//!        +-------------------------+
//!  Left  |                         |  Right
//!  vx in |       interior          |  vx in
//! [0, s) |   (initial spawn only)  | [-s, 0)
//!        +-------------------------+
//!           Bottom: vy in [-speed, 0)
//! ```
//!
//! [`Rule::Age`]: crate::Rule::Age
//! [`Simulation::initialize`]: crate::Simulation::initialize

use crate::particle::Particle;
use crate::rules::clamp_axis;
use crate::spawn::{SpawnConfig, SpawnContext};
use crate::visuals::Palette;
use glam::Vec2;

/// One side of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Uniformly chosen edge.
    pub fn random(ctx: &mut SpawnContext) -> Self {
        Self::ALL[ctx.random_index(Self::ALL.len())]
    }

    /// Unit vector pointing from this edge into the surface (Y down).
    pub fn inward(&self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Right => Vec2::NEG_X,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
        }
    }

    /// Distance from `point` to this edge of a `bounds`-sized surface.
    pub fn distance(&self, point: Vec2, bounds: Vec2) -> f32 {
        match self {
            Edge::Top => point.y,
            Edge::Right => bounds.x - point.x,
            Edge::Bottom => bounds.y - point.y,
            Edge::Left => point.x,
        }
    }

    fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

/// Slack for `W - r` style coordinates that don't round-trip exactly.
const EDGE_EPSILON: f32 = 1e-3;

/// Edges a particle is touching: those no more than its radius away.
pub fn touching_edges(p: &Particle, bounds: Vec2) -> Vec<Edge> {
    Edge::ALL
        .into_iter()
        .filter(|e| e.distance(p.position, bounds) <= p.radius + EDGE_EPSILON)
        .collect()
}

/// Number of particles for a surface: one per `area_per_particle` square
/// pixels, capped at `max`. Degenerate surfaces get none.
pub fn particle_count(width: f32, height: f32, area_per_particle: f32, max: usize) -> usize {
    if width <= 0.0 || height <= 0.0 || area_per_particle <= 0.0 {
        return 0;
    }
    let n = (f64::from(width) * f64::from(height) / f64::from(area_per_particle)).floor();
    (n as usize).min(max)
}

/// A brand-new particle somewhere inside the surface.
pub fn spawn_interior(
    bounds: Vec2,
    palette: &Palette,
    spawn: &SpawnConfig,
    ctx: &mut SpawnContext,
) -> Particle {
    let radius = ctx.random_range(spawn.radius.0, spawn.radius.1);
    let margin = Vec2::splat(radius);
    Particle {
        position: ctx.random_in_rect(margin, bounds - margin),
        velocity: ctx.random_velocity(spawn.velocity),
        radius,
        life: 1.0,
        decay: ctx.random_range(spawn.decay.0, spawn.decay.1),
        color: ctx.random_color(palette),
    }
}

/// Overwrite an expired particle with one entering from a random edge.
///
/// The new position sits exactly `radius` inside the chosen edge, so it is
/// in bounds and touches that edge only. Its velocity points inward along
/// the edge normal with a random tangential drift. Life, radius and color
/// are reset; `decay` is kept.
///
/// Returns the edge used.
pub fn respawn(
    p: &mut Particle,
    bounds: Vec2,
    palette: &Palette,
    spawn: &SpawnConfig,
    ctx: &mut SpawnContext,
) -> Edge {
    let edge = Edge::random(ctx);

    p.radius = ctx.random_range(spawn.radius.0, spawn.radius.1);
    p.life = 1.0;
    p.color = ctx.random_color(palette);

    let r = p.radius;
    let normal_speed = ctx.random_range(0.0, spawn.respawn_speed);
    let tangent_speed = ctx.jitter(spawn.velocity);

    // Keep the tangential coordinate off the neighbouring edges.
    let (along, across_extent) = if edge.is_horizontal() {
        (bounds.x, bounds.y)
    } else {
        (bounds.y, bounds.x)
    };
    let tangent = if along - 2.0 * r >= 2.0 * r {
        ctx.random_range(2.0 * r, along - 2.0 * r)
    } else {
        clamp_axis(along * 0.5, r, along)
    };
    let across = match edge {
        Edge::Top | Edge::Left => clamp_axis(r, r, across_extent),
        Edge::Bottom | Edge::Right => clamp_axis(across_extent - r, r, across_extent),
    };

    let inward = edge.inward() * normal_speed;
    if edge.is_horizontal() {
        p.position = Vec2::new(tangent, across);
        p.velocity = Vec2::new(tangent_speed, inward.y);
    } else {
        p.position = Vec2::new(across, tangent);
        p.velocity = Vec2::new(inward.x, tangent_speed);
    }

    edge
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;

    #[test]
    fn test_particle_count_scenarios() {
        assert_eq!(particle_count(800.0, 600.0, 15000.0, 65), 32);
        assert_eq!(particle_count(1920.0, 1080.0, 15000.0, 65), 65);
        assert_eq!(particle_count(100.0, 100.0, 15000.0, 65), 0);
        assert_eq!(particle_count(0.0, 600.0, 15000.0, 65), 0);
        assert_eq!(particle_count(-5.0, 600.0, 15000.0, 65), 0);
    }

    #[test]
    fn test_spawn_interior_in_bounds() {
        let mut ctx = SpawnContext::seeded(8);
        let bounds = Vec2::new(800.0, 600.0);
        let spawn = SpawnConfig::default();
        let palette = Palette::light();
        for _ in 0..500 {
            let p = spawn_interior(bounds, &palette, &spawn, &mut ctx);
            assert!(p.position.x >= p.radius && p.position.x <= bounds.x - p.radius);
            assert!(p.position.y >= p.radius && p.position.y <= bounds.y - p.radius);
            assert!((2.0..5.0).contains(&p.radius));
            assert!((0.0005..0.0015).contains(&p.decay));
            assert!(p.velocity.x.abs() <= 0.6 && p.velocity.y.abs() <= 0.6);
            assert_eq!(p.life, 1.0);
            assert!(palette.colors.contains(&p.color));
        }
    }

    #[test]
    fn test_respawn_touches_exactly_one_edge() {
        let mut ctx = SpawnContext::seeded(21);
        let bounds = Vec2::new(800.0, 600.0);
        let spawn = SpawnConfig::default();
        let palette = Palette::dark();
        for _ in 0..1000 {
            let mut p = Particle {
                decay: 0.001,
                ..Particle::zeroed()
            };
            let edge = respawn(&mut p, bounds, &palette, &spawn, &mut ctx);
            assert_eq!(touching_edges(&p, bounds), vec![edge]);
            assert_eq!(p.life, 1.0);
            assert_eq!(p.decay, 0.001);
            assert!(palette.colors.contains(&p.color));
        }
    }

    #[test]
    fn test_respawn_velocity_points_inward() {
        let mut ctx = SpawnContext::seeded(2);
        let bounds = Vec2::new(800.0, 600.0);
        let spawn = SpawnConfig::default();
        for _ in 0..1000 {
            let mut p = Particle::zeroed();
            let edge = respawn(&mut p, bounds, &Palette::light(), &spawn, &mut ctx);
            let normal = p.velocity.dot(edge.inward());
            assert!((0.0..1.2).contains(&normal));
            let tangential = p.velocity.perp_dot(edge.inward()).abs();
            assert!(tangential <= 0.6);
        }
    }

    #[test]
    fn test_respawn_uses_every_edge() {
        let mut ctx = SpawnContext::seeded(13);
        let bounds = Vec2::new(800.0, 600.0);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let mut p = Particle::zeroed();
            seen.insert(respawn(
                &mut p,
                bounds,
                &Palette::light(),
                &SpawnConfig::default(),
                &mut ctx,
            ));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_respawn_tiny_surface_stays_finite() {
        let mut ctx = SpawnContext::seeded(1);
        let mut p = Particle::zeroed();
        respawn(
            &mut p,
            Vec2::new(4.0, 4.0),
            &Palette::light(),
            &SpawnConfig::default(),
            &mut ctx,
        );
        assert!(p.position.is_finite());
        assert_eq!(p.position, Vec2::new(2.0, 2.0));
    }
}
