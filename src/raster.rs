//! Software rasterizer surface.
//!
//! [`RasterSurface`] implements [`Surface`] on top of an [`RgbaImage`] so the
//! field can be rendered without a browser or GPU, e.g. for the `pfield`
//! frame exporter or for eyeballing a config change.
//!
//! Shapes are anti-aliased with a one-pixel coverage ramp and composited
//! with straight-alpha source-over. Glow is approximated as a quadratic
//! falloff ring outside the circle, which is close enough to a canvas
//! `shadowBlur` for previews.

use crate::error::FieldError;
use crate::surface::{FillStyle, LineCap, StrokeStyle, Surface};
use glam::{Vec2, Vec3};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// An in-memory RGBA canvas.
pub struct RasterSurface {
    image: RgbaImage,
    background: Rgba<u8>,
}

impl RasterSurface {
    /// Transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            background: Rgba([0, 0, 0, 0]),
        }
    }

    /// Set the color `clear_rect` fills with (RGB, 0.0-1.0, opaque).
    pub fn with_background(mut self, color: Vec3) -> Self {
        let [r, g, b] = to_bytes(color);
        self.background = Rgba([r, g, b, 255]);
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Write the current frame as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), FieldError> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Pixel range covering `[min, max]`, clipped to the image.
    fn pixel_span(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(w);
        let y1 = max.y.ceil().min(h);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn blend(&mut self, x: u32, y: u32, color: Vec3, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let da = dst.0[3] as f32 / 255.0;
        let sa = alpha.min(1.0);
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        let dc = Vec3::new(dst.0[0] as f32, dst.0[1] as f32, dst.0[2] as f32) / 255.0;
        let oc = (color * sa + dc * da * (1.0 - sa)) / out_a;
        let [r, g, b] = to_bytes(oc);
        *dst = Rgba([r, g, b, (out_a * 255.0).round() as u8]);
    }
}

impl Surface for RasterSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let Some((x0, y0, x1, y1)) =
            self.pixel_span(Vec2::new(x, y), Vec2::new(x + width, y + height))
        else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px, py, self.background);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, style: &FillStyle) {
        let reach = radius + style.shadow_blur.max(0.0) + 1.0;
        let Some((x0, y0, x1, y1)) =
            self.pixel_span(center - Vec2::splat(reach), center + Vec2::splat(reach))
        else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let d = (Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - center).length();
                if style.shadow_blur > 0.0 && d > radius {
                    let t = 1.0 - (d - radius) / style.shadow_blur;
                    if t > 0.0 {
                        self.blend(px, py, style.shadow_color, style.alpha * 0.5 * t * t);
                    }
                }
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                self.blend(px, py, style.color, style.alpha * coverage);
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &StrokeStyle) {
        let half = style.width * 0.5;
        let pad = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) =
            self.pixel_span(from.min(to) - pad, from.max(to) + pad)
        else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let Some(d) = segment_distance(p, from, to, half, style.cap) else {
                    continue;
                };
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                self.blend(px, py, style.color, style.alpha * coverage);
            }
        }
    }
}

/// Distance from `p` to the stroked segment's centre line, or `None` when
/// `p` lies past an end that the cap style doesn't cover.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2, half: f32, cap: LineCap) -> Option<f32> {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return match cap {
            LineCap::Butt => None,
            _ => Some((p - a).length()),
        };
    }

    let t = (p - a).dot(ab) / len_sq;
    let len = len_sq.sqrt();
    let along = t * len;
    match cap {
        LineCap::Round => {
            let t = t.clamp(0.0, 1.0);
            Some((p - (a + ab * t)).length())
        }
        LineCap::Butt if !(0.0..=len).contains(&along) => None,
        LineCap::Square if along < -half || along > len + half => None,
        _ => Some((p - (a + ab * t)).length()),
    }
}

fn to_bytes(c: Vec3) -> [u8; 3] {
    let c = c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}
