// Renderer draws one frame of the field onto any 2D surface: proximity edges
// first, then the particles on top of them.

use crate::color::Color;
use crate::particle::{Bounds, Particle};
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub const DEFAULT_CONNECTION_RADIUS: f64 = 120.0;
/// Edge alpha for two coincident particles.
pub const MAX_CONNECTION_ALPHA: f64 = 0.1;
pub const PARTICLE_COLOR: u32 = 0x9333eaff;
const LINE_WIDTH: f64 = 1.0;

/// Immediate-mode drawing primitives needed by the renderer.
pub trait Surface {
    type Error;

    fn clear(&mut self, bounds: Bounds) -> Result<(), Self::Error>;
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;
    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, bounds: Bounds) -> Result<(), JsValue> {
        self.clear_rect(0.0, 0.0, bounds.width, bounds.height);
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.begin_path();
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.set_stroke_style_str(&color.to_css_rgba(alpha));
        self.set_line_width(width);
        self.stroke();
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.set_fill_style_str(&color.to_css_rgba(alpha));
        self.fill();
        Ok(())
    }
}

/// Edge alpha fades linearly from `MAX_CONNECTION_ALPHA` at zero distance
/// to zero at `radius`.
pub fn connection_alpha(distance: f64, radius: f64) -> f64 {
    MAX_CONNECTION_ALPHA * (1.0 - distance / radius)
}

/// Every unordered pair `(i, j)` with `i < j` closer than `radius`, along
/// with their distance. Quadratic in the particle count.
pub fn connections<'a>(
    particles: &'a [Particle],
    radius: f64,
) -> impl Iterator<Item = (usize, usize, f64)> + 'a {
    particles.iter().enumerate().flat_map(move |(i, a)| {
        particles[i + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, b)| {
                let distance = vecmath::vec2_len(vecmath::vec2_sub(a.pos, b.pos));
                if distance < radius {
                    Some((i, i + 1 + offset, distance))
                } else {
                    None
                }
            })
    })
}

#[derive(Copy, Clone, Debug)]
pub struct Renderer {
    pub connection_radius: f64,
    pub color: Color,
}

impl Renderer {
    pub fn new(connection_radius: f64, color: Color) -> Renderer {
        Renderer {
            connection_radius,
            color,
        }
    }

    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        bounds: Bounds,
        particles: &[Particle],
    ) -> Result<(), S::Error> {
        surface.clear(bounds)?;

        for (i, j, distance) in connections(particles, self.connection_radius) {
            surface.stroke_line(
                particles[i].pos,
                particles[j].pos,
                LINE_WIDTH,
                self.color,
                connection_alpha(distance, self.connection_radius),
            )?;
        }

        for p in particles {
            surface.fill_circle(p.pos, p.size(), self.color, p.opacity())?;
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(DEFAULT_CONNECTION_RADIUS, Color::from_u32(PARTICLE_COLOR))
    }
}
