//! Drawing surface abstraction.
//!
//! The simulator never owns a canvas. The host hands it something that
//! implements [`Surface`] once per frame, and the simulator issues three
//! kinds of calls against it: clear a rectangle, fill a circle, stroke a
//! line. Each call carries its own style so implementations don't need to
//! track any "current state" the way a 2D canvas context does.
//!
//! Two implementations ship with the crate:
//!
//! | Type | Use |
//! |------|-----|
//! | [`RecordingSurface`] | Records [`DrawCommand`]s, for tests or batching hosts |
//! | [`RasterSurface`](crate::raster::RasterSurface) | Software rasterizer over an RGBA image |
//!
//! # Example
//!
//! ```ignore
//! let mut surface = RecordingSurface::new();
//! sim.step(&mut surface);
//! for cmd in surface.commands() {
//!     // forward to the host's canvas
//! }
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Line cap style for stroked lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    /// Line ends exactly at its endpoints.
    Butt,
    /// Line ends with a half-circle of diameter `width`.
    #[default]
    Round,
    /// Line ends with a half-square extending `width / 2` past the endpoints.
    Square,
}

/// Style for a filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    /// Fill color (RGB, 0.0-1.0).
    pub color: Vec3,
    /// Fill opacity (0.0-1.0).
    pub alpha: f32,
    /// Glow color (RGB, 0.0-1.0).
    pub shadow_color: Vec3,
    /// Glow radius in pixels (0 = no glow).
    pub shadow_blur: f32,
}

/// Style for a stroked line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color (RGB, 0.0-1.0).
    pub color: Vec3,
    /// Stroke opacity (0.0-1.0).
    pub alpha: f32,
    /// Line width in pixels.
    pub width: f32,
    /// Cap style at both ends.
    pub cap: LineCap,
}

/// A 2D drawing target provided by the host.
pub trait Surface {
    /// Clear an axis-aligned rectangle to transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, style: &FillStyle);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &StrokeStyle);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// See [`Surface::clear_rect`].
    Clear {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// See [`Surface::fill_circle`].
    Circle {
        center: Vec2,
        radius: f32,
        style: FillStyle,
    },
    /// See [`Surface::stroke_line`].
    Line {
        from: Vec2,
        to: Vec2,
        style: StrokeStyle,
    },
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded since the last [`take`](Self::take).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Iterate over recorded line commands.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, &StrokeStyle)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, style } => Some((*from, *to, style)),
            _ => None,
        })
    }

    /// Iterate over recorded circle commands.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, &FillStyle)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                style,
            } => Some((*center, *radius, style)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, style: &FillStyle) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            style: *style,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_keeps_order() {
        let mut surface = RecordingSurface::new();
        surface.clear_rect(0.0, 0.0, 10.0, 10.0);
        surface.stroke_line(
            Vec2::ZERO,
            Vec2::ONE,
            &StrokeStyle {
                color: Vec3::ONE,
                alpha: 0.5,
                width: 1.0,
                cap: LineCap::Round,
            },
        );
        surface.fill_circle(
            Vec2::new(5.0, 5.0),
            2.0,
            &FillStyle {
                color: Vec3::ONE,
                alpha: 1.0,
                shadow_color: Vec3::ZERO,
                shadow_blur: 0.0,
            },
        );

        let cmds = surface.commands();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(cmds[0], DrawCommand::Clear { .. }));
        assert!(matches!(cmds[1], DrawCommand::Line { .. }));
        assert!(matches!(cmds[2], DrawCommand::Circle { .. }));
        assert_eq!(surface.lines().count(), 1);
        assert_eq!(surface.circles().count(), 1);
    }

    #[test]
    fn test_take_drains() {
        let mut surface = RecordingSurface::new();
        surface.clear_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(surface.take().len(), 1);
        assert!(surface.commands().is_empty());
    }
}
