// Field manager: sizes the particle population to the canvas area and
// respawns it from scratch whenever the canvas changes size.

use crate::particle::{Bounds, Particle};
use rand::Rng;

/// Canvas area, in square pixels, that holds one particle at density 1.
pub const AREA_PER_PARTICLE: f64 = 10000.0;

const MIN_SIZE: f64 = 1.0;
const MAX_SIZE: f64 = 3.0;
const MIN_OPACITY: f64 = 0.2;
const MAX_OPACITY: f64 = 0.7;

pub fn particle_count(bounds: Bounds, density: f64) -> usize {
    if !density.is_finite() || density <= 0.0 {
        return 0;
    }
    let count = (bounds.area() / (AREA_PER_PARTICLE / density)).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> ParticleField {
        ParticleField {
            particles: Vec::new(),
        }
    }

    /// Discards every particle and spawns a fresh population for `bounds`.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: Bounds,
        density: f64,
        speed: f64,
    ) {
        let num_particles = particle_count(bounds, density);
        self.particles.clear();
        self.particles.reserve(num_particles);
        for _ in 0..num_particles {
            let pos_x = rng.gen::<f64>() * bounds.width;
            let pos_y = rng.gen::<f64>() * bounds.height;
            let vel_x = (rng.gen::<f64>() - 0.5) * speed;
            let vel_y = (rng.gen::<f64>() - 0.5) * speed;
            let size = rng.gen::<f64>() * (MAX_SIZE - MIN_SIZE) + MIN_SIZE;
            let opacity = rng.gen::<f64>() * (MAX_OPACITY - MIN_OPACITY) + MIN_OPACITY;
            self.particles
                .push(Particle::new([pos_x, pos_y], [vel_x, vel_y], size, opacity));
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn count_follows_area_over_density() {
        assert_eq!(particle_count(Bounds::new(1000.0, 800.0), 0.8), 64);
        assert_eq!(particle_count(Bounds::new(1920.0, 1080.0), 0.8), 165);
        assert_eq!(particle_count(Bounds::new(100.0, 100.0), 1.0), 1);
        assert_eq!(particle_count(Bounds::new(99.0, 100.0), 1.0), 0);
    }

    #[test]
    fn count_is_zero_for_degenerate_input() {
        assert_eq!(particle_count(Bounds::new(0.0, 800.0), 0.8), 0);
        assert_eq!(particle_count(Bounds::new(1000.0, 800.0), 0.0), 0);
        assert_eq!(particle_count(Bounds::new(1000.0, 800.0), -2.0), 0);
        assert_eq!(particle_count(Bounds::new(1000.0, 800.0), f64::NAN), 0);
    }

    #[test]
    fn populate_draws_attributes_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Bounds::new(1000.0, 800.0);
        let speed = 0.5;
        let mut field = ParticleField::new();
        field.populate(&mut rng, bounds, 0.8, speed);

        assert_eq!(field.len(), 64);
        for p in field.particles() {
            assert!(bounds.contains(p.pos));
            assert!(p.vel[0].abs() <= 0.5 * speed);
            assert!(p.vel[1].abs() <= 0.5 * speed);
            assert!(p.size() >= 1.0 && p.size() < 3.0);
            assert!(p.opacity() >= 0.2 && p.opacity() < 0.7);
        }
    }

    #[test]
    fn populate_replaces_previous_population() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ParticleField::new();
        field.populate(&mut rng, Bounds::new(1000.0, 800.0), 0.8, 0.5);
        assert_eq!(field.len(), 64);

        field.populate(&mut rng, Bounds::new(500.0, 400.0), 0.8, 0.5);
        assert_eq!(field.len(), 16);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.pos[0] <= 500.0 && p.pos[1] <= 400.0));

        field.populate(&mut rng, Bounds::new(0.0, 0.0), 0.8, 0.5);
        assert!(field.is_empty());
    }

    #[test]
    fn zero_speed_spawns_particles_at_rest() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::new();
        field.populate(&mut rng, Bounds::new(640.0, 480.0), 1.0, 0.0);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.vel[0] == 0.0 && p.vel[1] == 0.0));
    }
}
