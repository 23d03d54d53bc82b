//! Connection rendering between nearby particles.
//!
//! Draws a line between every pair of particles closer than a fixed radius.
//! Lines fade linearly with distance and all share the theme's accent color.
//!
//! The pair search is brute force. The store is capped at a few dozen
//! particles, so an O(n²) pass per frame is cheaper than building a spatial
//! grid for it.

use crate::particle::Particle;
use crate::surface::{LineCap, StrokeStyle, Surface};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Parameters for connection lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
    /// Pairs closer than this (strictly) are connected.
    pub radius: f32,
    /// Opacity of a line between two coincident particles.
    pub max_opacity: f32,
    /// Stroke width in pixels.
    pub line_width: f32,
    /// Stroke cap style.
    pub cap: LineCap,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            radius: 80.0,
            max_opacity: 0.4,
            line_width: 0.8,
            cap: LineCap::Round,
        }
    }
}

/// A pair of connected particles, `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

/// Line opacity for two particles `distance` apart.
///
/// `(1 - d / radius) * max_opacity` inside the radius, zero outside.
#[inline]
pub fn connection_opacity(distance: f32, style: &ConnectionStyle) -> f32 {
    if style.radius <= 0.0 || distance >= style.radius {
        return 0.0;
    }
    (1.0 - distance / style.radius) * style.max_opacity
}

/// Every unordered pair closer than `radius`, in `(a, b)` lexicographic order.
pub fn connections(particles: &[Particle], radius: f32) -> impl Iterator<Item = Connection> + '_ {
    particles.iter().enumerate().flat_map(move |(a, pa)| {
        particles[a + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, pb)| {
                let distance = pa.distance(pb);
                (distance < radius).then_some(Connection {
                    a,
                    b: a + 1 + offset,
                    distance,
                })
            })
    })
}

/// Stroke every connection onto `surface` in `color`.
///
/// Returns the number of lines drawn.
pub fn render_connections<S: Surface + ?Sized>(
    particles: &[Particle],
    surface: &mut S,
    style: &ConnectionStyle,
    color: Vec3,
) -> usize {
    let mut drawn = 0;
    for c in connections(particles, style.radius) {
        let stroke = StrokeStyle {
            color,
            alpha: connection_opacity(c.distance, style),
            width: style.line_width,
            cap: style.cap,
        };
        surface.stroke_line(particles[c.a].position, particles[c.b].position, &stroke);
        drawn += 1;
    }
    drawn
}
