//! Theme palettes and particle drawing style.
//!
//! Visuals are kept separate from the physics: switching theme swaps the
//! palette the simulator samples from, but never touches particle motion.
//!
//! # Usage
//!
//! ```ignore
//! let mut config = FieldConfig::default();
//! config.visuals.glow(20.0).alpha(0.2, 0.6);
//! config.dark = Palette::new(
//!     [Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE],
//!     Vec3::ONE,
//! );
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Light or dark page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Map the host's "is dark" flag to a theme.
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// Color set for one theme.
///
/// Particles pick one of the four `colors` when they spawn. Connection
/// lines always use the single `accent` color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Particle fill colors (RGB, 0.0-1.0).
    pub colors: [Vec3; 4],
    /// Connection line color (RGB, 0.0-1.0).
    pub accent: Vec3,
}

impl Palette {
    pub fn new(colors: [Vec3; 4], accent: Vec3) -> Self {
        Self { colors, accent }
    }

    /// Default palette for the light theme.
    pub fn light() -> Self {
        Self {
            colors: [
                Vec3::new(0.388, 0.400, 0.945), // Indigo
                Vec3::new(0.545, 0.361, 0.965), // Violet
                Vec3::new(0.055, 0.647, 0.914), // Sky blue
                Vec3::new(0.925, 0.282, 0.600), // Pink
            ],
            accent: Vec3::new(0.388, 0.400, 0.945),
        }
    }

    /// Default palette for the dark theme.
    pub fn dark() -> Self {
        Self {
            colors: [
                Vec3::new(0.133, 0.827, 0.933), // Cyan
                Vec3::new(0.910, 0.475, 0.976), // Fuchsia
                Vec3::new(0.290, 0.871, 0.502), // Neon green
                Vec3::new(0.980, 0.800, 0.082), // Amber
            ],
            accent: Vec3::new(0.404, 0.910, 0.976),
        }
    }

    /// Color at `index`, wrapping around the four entries.
    #[inline]
    pub fn color(&self, index: usize) -> Vec3 {
        self.colors[index % self.colors.len()]
    }
}

/// How particles themselves are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Opacity of a particle at the very end of its life.
    pub base_alpha: f32,
    /// Extra opacity scaled by remaining life (`alpha = base + life * scale`).
    pub life_alpha: f32,
    /// Glow blur radius in the dark theme. The light theme draws no glow.
    pub glow_blur: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            base_alpha: 0.3,
            life_alpha: 0.5,
            glow_blur: 15.0,
        }
    }
}

impl VisualConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opacity curve over a particle's life.
    pub fn alpha(&mut self, base: f32, life_scale: f32) -> &mut Self {
        self.base_alpha = base;
        self.life_alpha = life_scale;
        self
    }

    /// Set the dark-theme glow radius.
    pub fn glow(&mut self, blur: f32) -> &mut Self {
        self.glow_blur = blur;
        self
    }

    /// Fill opacity for a particle with the given remaining life.
    #[inline]
    pub fn alpha_for_life(&self, life: f32) -> f32 {
        (self.base_alpha + self.life_alpha * life.clamp(0.0, 1.0)).clamp(0.0, 1.0)
    }

    /// Glow radius for the given theme.
    #[inline]
    pub fn blur_for(&self, theme: Theme) -> f32 {
        match theme {
            Theme::Dark => self.glow_blur,
            Theme::Light => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_dark() {
        assert_eq!(Theme::from_dark(true), Theme::Dark);
        assert_eq!(Theme::from_dark(false), Theme::Light);
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::Light.is_dark());
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Palette::light(), Palette::dark());
        assert_ne!(Palette::light().accent, Palette::dark().accent);
    }

    #[test]
    fn test_palette_color_wraps() {
        let p = Palette::light();
        assert_eq!(p.color(0), p.color(4));
        assert_eq!(p.color(3), p.colors[3]);
    }

    #[test]
    fn test_alpha_for_life() {
        let v = VisualConfig::default();
        assert!((v.alpha_for_life(1.0) - 0.8).abs() < 1e-6);
        assert!((v.alpha_for_life(0.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_glow_only_in_dark() {
        let v = VisualConfig::default();
        assert_eq!(v.blur_for(Theme::Light), 0.0);
        assert_eq!(v.blur_for(Theme::Dark), 15.0);
    }
}
