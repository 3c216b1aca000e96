//! Software RGBA8 rasterizer for hosts without a canvas.

use bytemuck::{Pod, Zeroable};

use super::surface::{DrawSurface, Gradient};
use crate::core::Viewport;
use crate::math::{Color, Vector2};

/// One RGBA8 pixel, straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Pixel {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Pixel {
    /// Fully transparent pixel.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };
}

/// In-memory surface rasterizing with anti-aliased coverage and
/// source-over blending.
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelSurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an `image` buffer for encoding.
    #[cfg(feature = "image")]
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Blend `color` into the pixel at `(x, y)` scaled by `coverage`.
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let src_a = (color.a * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }

        let dst = &mut self.pixels[(y as u64 * self.width as u64 + x as u64) as usize];
        let dst_a = dst.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mix = |s: f32, d: u8| {
            let d = d as f32 / 255.0;
            let c = (s.clamp(0.0, 1.0) * src_a + d * dst_a * (1.0 - src_a)) / out_a;
            (c * 255.0).round().clamp(0.0, 255.0) as u8
        };

        *dst = Pixel {
            r: mix(color.r, dst.r),
            g: mix(color.g, dst.g),
            b: mix(color.b, dst.b),
            a: (out_a * 255.0).round() as u8,
        };
    }

    /// Visit pixel centers inside `[min, max]`, clipped to the surface.
    fn for_each_in(&mut self, min: Vector2, max: Vector2, mut shade: impl FnMut(&mut Self, i64, i64, Vector2)) {
        let x0 = (min.x.floor() as i64).max(0);
        let y0 = (min.y.floor() as i64).max(0);
        let x1 = (max.x.ceil() as i64).min(self.width as i64 - 1);
        let y1 = (max.y.ceil() as i64).min(self.height as i64 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Vector2::new(x as f32 + 0.5, y as f32 + 0.5);
                shade(self, x, y, center);
            }
        }
    }
}

/// Coverage of a pixel whose center lies `distance` from a shape edge at `extent`.
#[inline]
fn coverage(distance: f32, extent: f32) -> f32 {
    (extent + 0.5 - distance).clamp(0.0, 1.0)
}

impl DrawSurface for PixelSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width;
        self.height = viewport.height;
        self.pixels.clear();
        self.pixels
            .resize(viewport.width as usize * viewport.height as usize, Pixel::TRANSPARENT);
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::TRANSPARENT);
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2, color: Color, width: f32) {
        let half = width * 0.5;
        let pad = Vector2::new(half + 1.0, half + 1.0);
        let min = Vector2::new(from.x.min(to.x), from.y.min(to.y)) - pad;
        let max = Vector2::new(from.x.max(to.x), from.y.max(to.y)) + pad;

        self.for_each_in(min, max, |s, x, y, center| {
            let cov = coverage(center.distance_to_segment(&from, &to), half);
            if cov > 0.0 {
                s.blend(x, y, color, cov);
            }
        });
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        let pad = Vector2::new(radius + 1.0, radius + 1.0);
        self.for_each_in(center - pad, center + pad, |s, x, y, p| {
            let cov = coverage(p.distance_to(&center), radius);
            if cov > 0.0 {
                s.blend(x, y, color, cov);
            }
        });
    }

    fn fill_radial_gradient(&mut self, center: Vector2, radius: f32, gradient: &Gradient) {
        if radius <= 0.0 {
            return;
        }
        let pad = Vector2::new(radius + 1.0, radius + 1.0);
        self.for_each_in(center - pad, center + pad, |s, x, y, p| {
            let distance = p.distance_to(&center);
            let cov = coverage(distance, radius);
            if cov > 0.0 {
                s.blend(x, y, gradient.sample(distance / radius), cov);
            }
        });
    }
}
