// Owned simulation state for one mounted background, and the shared handle
// that DOM callbacks use to reach it.

use crate::config::BackgroundConfig;
use crate::field::ParticleField;
use crate::particle::{Bounds, Particle};
use crate::renderer::{Renderer, Surface};
use crate::simulation;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use vecmath::Vector2;

pub struct Scene {
    config: BackgroundConfig,
    bounds: Bounds,
    field: ParticleField,
    pointer: Vector2<f64>,
    renderer: Renderer,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: BackgroundConfig, rng: StdRng) -> Scene {
        Scene {
            config,
            bounds: Bounds::new(0.0, 0.0),
            field: ParticleField::new(),
            pointer: [0.0, 0.0],
            renderer: Renderer::default(),
            rng,
        }
    }

    /// Adopts the new canvas size and respawns the whole field for it.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = Bounds::new(width, height);
        self.field.populate(
            &mut self.rng,
            self.bounds,
            self.config.density,
            self.config.speed,
        );
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.config.interactive {
            self.pointer = [x, y];
        }
    }

    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        simulation::step(
            self.field.particles_mut(),
            self.bounds,
            self.pointer,
            self.config.interactive,
        );
        self.renderer
            .render(surface, self.bounds, self.field.particles())
    }

    pub fn config(&self) -> BackgroundConfig {
        self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pointer(&self) -> Vector2<f64> {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }
}

/// Shared, single-threaded handle to a scene. Once deactivated the scene is
/// dropped and every method turns into a no-op that reports `false`.
#[derive(Clone, Default)]
pub struct SharedScene {
    inner: Rc<RefCell<Option<Scene>>>,
}

impl SharedScene {
    pub fn new(scene: Scene) -> SharedScene {
        SharedScene {
            inner: Rc::new(RefCell::new(Some(scene))),
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().is_some()
    }

    /// Destroys the scene, returning it if it was still alive.
    pub fn deactivate(&self) -> Option<Scene> {
        self.inner.borrow_mut().take()
    }

    pub fn resize(&self, width: f64, height: f64) -> bool {
        self.with_scene(|scene| scene.resize(width, height)).is_some()
    }

    pub fn pointer_moved(&self, x: f64, y: f64) -> bool {
        self.with_scene(|scene| scene.pointer_moved(x, y)).is_some()
    }

    /// Runs one frame. `Ok(false)` means the scene is gone and the caller
    /// must not schedule another frame. A failed frame deactivates the scene.
    pub fn tick<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<bool, S::Error> {
        match self.with_scene(|scene| scene.tick(surface)) {
            Some(Ok(())) => Ok(true),
            Some(Err(err)) => {
                self.deactivate();
                Err(err)
            }
            None => Ok(false),
        }
    }

    pub fn particle_count(&self) -> usize {
        self.inner
            .borrow()
            .as_ref()
            .map_or(0, |scene| scene.particles().len())
    }

    pub fn with_scene<T, F: FnOnce(&mut Scene) -> T>(&self, f: F) -> Option<T> {
        self.inner.borrow_mut().as_mut().map(f)
    }
}
