// Simple particle struct to keep track of individual position and velocity.
// Size and opacity are picked once at spawn and only read afterwards.

use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    size: f64,
    opacity: f64,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, size: f64, opacity: f64) -> Particle {
        Particle {
            pos,
            vel,
            size,
            opacity,
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    #[cfg(test)]
    pub fn is_finite(&self) -> bool {
        self.pos.iter().chain(self.vel.iter()).all(|v| v.is_finite())
            && self.size.is_finite()
            && self.opacity.is_finite()
    }
}

/// Canvas extent in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Bounds {
        Bounds { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[cfg(test)]
    pub fn contains(&self, pos: Vector2<f64>) -> bool {
        pos[0] >= 0.0 && pos[0] <= self.width && pos[1] >= 0.0 && pos[1] <= self.height
    }
}
