//! Paints a particle field onto a `DrawSurface`.

use super::surface::{DrawSurface, Gradient};
use crate::math::Color;
use crate::particles::{FieldConfig, ParticleField};

/// Counts for one painted frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Links stroked.
    pub links: usize,
    /// Particles drawn.
    pub particles: usize,
}

/// Visual style for links and particles, taken from a `FieldConfig`.
pub struct FieldPainter {
    link_color: Color,
    link_width: f32,
    glow: Gradient,
    glow_radius: f32,
    disc_color: Color,
    disc_radius: f32,
    core_color: Color,
    core_radius: f32,
}

impl FieldPainter {
    /// Build a painter from the style parts of a configuration.
    pub fn new(config: &FieldConfig) -> Self {
        let palette = &config.palette;
        Self {
            link_color: palette.link,
            link_width: config.link_width,
            glow: Gradient::new()
                .with_stop(0.0, palette.glow_inner)
                .with_stop(0.5, palette.glow_mid)
                .with_stop(1.0, palette.glow_outer),
            glow_radius: config.glow_radius,
            disc_color: palette.disc,
            disc_radius: config.disc_radius,
            core_color: palette.core,
            core_radius: config.core_radius,
        }
    }

    /// The glow gradient used for every particle.
    pub fn glow(&self) -> &Gradient {
        &self.glow
    }

    /// Clear the surface and draw one frame: links first, then each
    /// particle as glow, disc and core.
    pub fn paint<S: DrawSurface + ?Sized>(&self, field: &mut ParticleField, surface: &mut S) -> FrameStats {
        surface.clear();

        field.update_links();
        let particles = field.particles();
        for link in field.links() {
            surface.stroke_line(
                particles[link.a].position,
                particles[link.b].position,
                self.link_color.with_alpha(link.alpha),
                self.link_width,
            );
        }

        for particle in particles {
            surface.fill_radial_gradient(particle.position, self.glow_radius, &self.glow);
            surface.fill_circle(particle.position, self.disc_radius, self.disc_color);
            surface.fill_circle(particle.position, self.core_radius, self.core_color);
        }

        FrameStats {
            links: field.links().len(),
            particles: particles.len(),
        }
    }
}
