// Per-frame kinematics. Velocities are in pixels per frame, so there is no
// delta time: one call advances exactly one display refresh.

use crate::particle::{Bounds, Particle};
use vecmath::Vector2;

/// Pointer distance below which particles are pulled towards it.
pub const ATTRACTION_RADIUS: f64 = 150.0;
pub const ATTRACTION_STRENGTH: f64 = 0.1;
pub const DAMPING: f64 = 0.99;

pub fn step(particles: &mut [Particle], bounds: Bounds, pointer: Vector2<f64>, interactive: bool) {
    for particle in particles.iter_mut() {
        particle.pos = vecmath::vec2_add(particle.pos, particle.vel);

        if interactive {
            attract(particle, pointer);
        }

        // Axes reflect independently, a corner hit flips both.
        if particle.pos[0] < 0.0 || particle.pos[0] > bounds.width {
            particle.vel[0] *= -1.0;
        }
        if particle.pos[1] < 0.0 || particle.pos[1] > bounds.height {
            particle.vel[1] *= -1.0;
        }

        particle.pos[0] = particle.pos[0].max(0.0).min(bounds.width);
        particle.pos[1] = particle.pos[1].max(0.0).min(bounds.height);

        particle.vel = vecmath::vec2_scale(particle.vel, DAMPING);
    }
}

fn attract(particle: &mut Particle, pointer: Vector2<f64>) {
    let to_pointer = vecmath::vec2_sub(pointer, particle.pos);
    let distance = vecmath::vec2_len(to_pointer);
    // A zero distance has no direction and would poison the particle with NaN.
    if distance <= 0.0 || distance >= ATTRACTION_RADIUS {
        return;
    }
    let force = (ATTRACTION_RADIUS - distance) / ATTRACTION_RADIUS;
    particle.vel[0] += (to_pointer[0] / distance) * force * ATTRACTION_STRENGTH;
    particle.vel[1] += (to_pointer[1] / distance) * force * ATTRACTION_STRENGTH;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ParticleField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FAR_AWAY: Vector2<f64> = [-10_000.0, -10_000.0];

    fn particle(pos: Vector2<f64>, vel: Vector2<f64>) -> Particle {
        Particle::new(pos, vel, 2.0, 0.5)
    }

    #[test]
    fn integrates_then_damps() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut particles = [particle([50.0, 50.0], [1.0, -2.0])];
        step(&mut particles, bounds, FAR_AWAY, false);

        assert_eq!(particles[0].pos, [51.0, 48.0]);
        assert_eq!(particles[0].vel, [0.99, -1.98]);
    }

    #[test]
    fn particle_at_rest_stays_at_rest() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut particles = [particle([40.0, 60.0], [0.0, 0.0])];
        for _ in 0..1000 {
            step(&mut particles, bounds, [40.0, 60.0], false);
        }
        assert_eq!(particles[0].pos, [40.0, 60.0]);
        assert_eq!(particles[0].vel, [0.0, 0.0]);
    }

    #[test]
    fn reflects_and_clamps_past_right_edge() {
        let bounds = Bounds::new(200.0, 100.0);
        let mut particles = [particle([201.0, 50.0], [0.3, 0.0])];
        step(&mut particles, bounds, FAR_AWAY, false);

        assert!(particles[0].vel[0] < 0.0);
        assert_eq!(particles[0].pos[0], 200.0);
    }

    #[test]
    fn reflects_both_axes_in_one_step() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut particles = [particle([0.5, 0.5], [-1.0, -1.0])];
        step(&mut particles, bounds, FAR_AWAY, false);

        assert!(particles[0].vel[0] > 0.0);
        assert!(particles[0].vel[1] > 0.0);
        assert_eq!(particles[0].pos, [0.0, 0.0]);
    }

    #[test]
    fn pointer_on_particle_does_not_produce_nan() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut particles = [particle([50.0, 50.0], [0.0, 0.0])];
        step(&mut particles, bounds, [50.0, 50.0], true);

        assert!(particles[0].is_finite());
        assert_eq!(particles[0].vel, [0.0, 0.0]);
    }

    #[test]
    fn pointer_pulls_nearby_particle() {
        let bounds = Bounds::new(500.0, 500.0);
        let mut particles = [particle([100.0, 100.0], [0.0, 0.0])];
        step(&mut particles, bounds, [175.0, 100.0], true);

        // distance 75 gives half strength along +x
        let expected = 1.0 * 0.5 * ATTRACTION_STRENGTH * DAMPING;
        assert!((particles[0].vel[0] - expected).abs() < 1e-12);
        assert_eq!(particles[0].vel[1], 0.0);
    }

    #[test]
    fn pointer_outside_radius_or_disabled_has_no_effect() {
        let bounds = Bounds::new(500.0, 500.0);
        let mut far = [particle([100.0, 100.0], [0.0, 0.0])];
        step(&mut far, bounds, [100.0, 250.0], true);
        assert_eq!(far[0].vel, [0.0, 0.0]);

        let mut disabled = [particle([100.0, 100.0], [0.0, 0.0])];
        step(&mut disabled, bounds, [110.0, 100.0], false);
        assert_eq!(disabled[0].vel, [0.0, 0.0]);
    }

    #[test]
    fn positions_stay_in_bounds_over_many_steps() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = Bounds::new(640.0, 360.0);
        let mut field = ParticleField::new();
        field.populate(&mut rng, bounds, 2.0, 25.0);
        assert!(!field.is_empty());

        for frame in 0..500 {
            let pointer = [(frame * 7 % 640) as f64, (frame * 3 % 360) as f64];
            step(field.particles_mut(), bounds, pointer, true);
            for p in field.particles() {
                assert!(bounds.contains(p.pos), "{:?} escaped {:?}", p.pos, bounds);
                assert!(p.is_finite());
            }
        }
    }

    #[test]
    fn step_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(300.0, 300.0);
        let mut field = ParticleField::new();
        field.populate(&mut rng, bounds, 3.0, 1.0);

        let mut a = field.clone();
        let mut b = field;
        for _ in 0..50 {
            step(a.particles_mut(), bounds, [150.0, 150.0], true);
            step(b.particles_mut(), bounds, [150.0, 150.0], true);
        }
        assert_eq!(a.particles(), b.particles());
    }
}
