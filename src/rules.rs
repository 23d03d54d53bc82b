//! Particle physics rules.
//!
//! Rules define how particles move each frame. They are applied in order,
//! once per particle per step, by [`apply_rules`]. Unlike a typical
//! integrator, position is not advanced implicitly: [`Rule::Integrate`] sits
//! in the list at the point where the move happens, so forces before it
//! affect this frame's motion and rules after it see the new position.
//!
//! # Rule Categories
//!
//! - **Forces**: Gravity, Agitate
//! - **Motion**: Integrate, Damping
//! - **Boundaries**: BounceWalls
//! - **Lifecycle**: Age
//!
//! The background uses [`Rule::standard`]; custom lists can be supplied
//! through [`FieldConfig::rules`](crate::FieldConfig).

use crate::particle::Particle;
use crate::spawn::SpawnContext;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One per-particle physics operation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// Constant downward acceleration, added to `velocity.y` every step.
    ///
    /// Screen space: positive Y points down.
    Gravity(f32),

    /// Move by one frame of velocity: `position += velocity`.
    Integrate,

    /// Multiply velocity by this factor every step.
    ///
    /// ```ignore
    /// Rule::Damping(0.999) // Barely noticeable, bounds long-run speed
    /// ```
    Damping(f32),

    /// Inelastic bounce off the surface edges.
    ///
    /// A particle within `radius` of the left/right edge has `velocity.x`
    /// multiplied by `-restitution`, its x clamped back inside, and a random
    /// kick in `[-jitter, jitter)` added to `velocity.y`. Top/bottom mirror
    /// this with the axes swapped. Horizontal is checked first.
    BounceWalls {
        /// Fraction of normal speed kept after the bounce.
        restitution: f32,
        /// Magnitude of the tangential kick.
        jitter: f32,
    },

    /// Occasional random nudge so the field never settles into a loop.
    ///
    /// With probability `chance` per step, both velocity components get an
    /// independent kick in `[-strength, strength)`.
    Agitate {
        /// Probability per particle per step.
        chance: f32,
        /// Kick magnitude.
        strength: f32,
    },

    /// Subtract the particle's `decay` from its `life`.
    Age,
}

impl Rule {
    /// The background's rule list, in order.
    pub fn standard() -> Vec<Rule> {
        vec![
            Rule::Gravity(0.0003),
            Rule::Integrate,
            Rule::Damping(0.999),
            Rule::BounceWalls {
                restitution: 0.8,
                jitter: 0.25,
            },
            Rule::Agitate {
                chance: 0.01,
                strength: 0.15,
            },
            Rule::Age,
        ]
    }

    /// Apply this rule to one particle inside a `bounds.x` by `bounds.y` surface.
    pub fn apply(&self, p: &mut Particle, bounds: Vec2, ctx: &mut SpawnContext) {
        match *self {
            Rule::Gravity(g) => {
                p.velocity.y += g;
            }

            Rule::Integrate => {
                p.position += p.velocity;
            }

            Rule::Damping(factor) => {
                p.velocity *= factor;
            }

            Rule::BounceWalls {
                restitution,
                jitter,
            } => {
                let r = p.radius;
                if p.position.x <= r || p.position.x >= bounds.x - r {
                    p.velocity.x *= -restitution;
                    p.position.x = clamp_axis(p.position.x, r, bounds.x);
                    p.velocity.y += ctx.jitter(jitter);
                }
                if p.position.y <= r || p.position.y >= bounds.y - r {
                    p.velocity.y *= -restitution;
                    p.position.y = clamp_axis(p.position.y, r, bounds.y);
                    p.velocity.x += ctx.jitter(jitter);
                }
            }

            Rule::Agitate { chance, strength } => {
                if ctx.chance(chance) {
                    p.velocity.x += ctx.jitter(strength);
                    p.velocity.y += ctx.jitter(strength);
                }
            }

            Rule::Age => {
                p.life -= p.decay;
            }
        }
    }
}

/// Run every rule, in order, on one particle.
pub fn apply_rules(rules: &[Rule], p: &mut Particle, bounds: Vec2, ctx: &mut SpawnContext) {
    for rule in rules {
        rule.apply(p, bounds, ctx);
    }
}

/// Clamp a coordinate into `[margin, extent - margin]`.
///
/// When the surface is narrower than twice the margin there is no valid
/// interval, so the coordinate snaps to the centre of the axis.
#[inline]
pub fn clamp_axis(value: f32, margin: f32, extent: f32) -> f32 {
    let hi = extent - margin;
    if hi < margin {
        extent * 0.5
    } else {
        value.clamp(margin, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;

    fn particle_at(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            radius: 3.0,
            life: 1.0,
            decay: 0.001,
            ..Particle::zeroed()
        }
    }

    #[test]
    fn test_gravity_adds_to_vy() {
        let mut p = particle_at(100.0, 100.0, 0.0, 0.0);
        let mut ctx = SpawnContext::seeded(0);
        Rule::Gravity(0.0003).apply(&mut p, Vec2::new(800.0, 600.0), &mut ctx);
        assert!((p.velocity.y - 0.0003).abs() < 1e-9);
        assert_eq!(p.velocity.x, 0.0);
    }

    #[test]
    fn test_integrate_then_damp() {
        let mut p = particle_at(100.0, 100.0, 1.0, -2.0);
        let mut ctx = SpawnContext::seeded(0);
        let bounds = Vec2::new(800.0, 600.0);
        Rule::Integrate.apply(&mut p, bounds, &mut ctx);
        Rule::Damping(0.999).apply(&mut p, bounds, &mut ctx);
        assert_eq!(p.position, Vec2::new(101.0, 98.0));
        assert!((p.velocity.x - 0.999).abs() < 1e-6);
        assert!((p.velocity.y + 1.998).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_left_wall() {
        let mut p = particle_at(1.0, 300.0, -0.5, 0.0);
        let mut ctx = SpawnContext::seeded(0);
        Rule::BounceWalls {
            restitution: 0.8,
            jitter: 0.25,
        }
        .apply(&mut p, Vec2::new(800.0, 600.0), &mut ctx);

        assert!((p.velocity.x - 0.4).abs() < 1e-6);
        assert_eq!(p.position.x, 3.0);
        assert!(p.velocity.y.abs() <= 0.25);
    }

    #[test]
    fn test_bounce_bottom_wall_kicks_x() {
        let mut p = particle_at(400.0, 599.0, 0.0, 1.0);
        let mut ctx = SpawnContext::seeded(4);
        Rule::BounceWalls {
            restitution: 0.8,
            jitter: 0.25,
        }
        .apply(&mut p, Vec2::new(800.0, 600.0), &mut ctx);

        assert!(p.velocity.y < 0.0);
        assert_eq!(p.position.y, 597.0);
        assert!(p.velocity.x.abs() <= 0.25);
    }

    #[test]
    fn test_no_bounce_in_interior() {
        let mut p = particle_at(400.0, 300.0, 0.5, 0.5);
        let mut ctx = SpawnContext::seeded(0);
        Rule::BounceWalls {
            restitution: 0.8,
            jitter: 0.25,
        }
        .apply(&mut p, Vec2::new(800.0, 600.0), &mut ctx);
        assert_eq!(p.velocity, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_agitate_bounded() {
        let mut ctx = SpawnContext::seeded(11);
        for _ in 0..200 {
            let mut p = particle_at(400.0, 300.0, 0.0, 0.0);
            Rule::Agitate {
                chance: 1.0,
                strength: 0.15,
            }
            .apply(&mut p, Vec2::new(800.0, 600.0), &mut ctx);
            assert!(p.velocity.x.abs() <= 0.15);
            assert!(p.velocity.y.abs() <= 0.15);
        }
    }

    #[test]
    fn test_age_subtracts_decay() {
        let mut p = particle_at(400.0, 300.0, 0.0, 0.0);
        let mut ctx = SpawnContext::seeded(0);
        Rule::Age.apply(&mut p, Vec2::new(800.0, 600.0), &mut ctx);
        assert!((p.life - 0.999).abs() < 1e-6);
    }

    #[test]
    fn test_standard_order() {
        let rules = Rule::standard();
        assert_eq!(rules.len(), 6);
        assert_eq!(rules[0], Rule::Gravity(0.0003));
        assert_eq!(rules[1], Rule::Integrate);
        assert_eq!(rules[2], Rule::Damping(0.999));
        assert!(matches!(rules[3], Rule::BounceWalls { .. }));
        assert!(matches!(rules[4], Rule::Agitate { .. }));
        assert_eq!(rules[5], Rule::Age);
    }

    #[test]
    fn test_clamp_axis_degenerate() {
        assert_eq!(clamp_axis(10.0, 3.0, 4.0), 2.0);
        assert_eq!(clamp_axis(-5.0, 3.0, 100.0), 3.0);
        assert_eq!(clamp_axis(150.0, 3.0, 100.0), 97.0);
    }
}
