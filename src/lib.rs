mod color;
mod config;
mod field;
mod lifecycle;
mod particle;
mod renderer;
mod scene;
mod simulation;
mod utils;

use lifecycle::Mounted;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement};

pub use color::Color;
pub use config::BackgroundConfig;
pub use field::{particle_count, ParticleField};
pub use particle::{Bounds, Particle};
pub use renderer::{connection_alpha, connections, Renderer, Surface};
pub use scene::{Scene, SharedScene};
pub use simulation::step;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

/// Animated particle field drawn into a full-viewport canvas behind the
/// page content.
///
/// Mount failures (no 2D context, invalid config) are logged and leave the
/// background inert instead of throwing.
#[wasm_bindgen]
pub struct ParticleBackground {
    canvas: HtmlCanvasElement,
    config: BackgroundConfig,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: BackgroundConfig) -> ParticleBackground {
        let mut background = ParticleBackground {
            canvas,
            config,
            mounted: None,
        };
        background.activate();
        background
    }

    /// Creates the canvas as the first child of `<body>` and mounts on it.
    pub fn fullscreen(config: BackgroundConfig) -> Result<ParticleBackground, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or("no document")?;
        let body = document.body().ok_or("document has no body")?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_attribute("aria-hidden", "true")?;
        body.insert_before(&canvas, body.first_child().as_ref())?;
        Ok(ParticleBackground::new(canvas, config))
    }

    /// Tears the current activation down and mounts again with `config`.
    pub fn reconfigure(&mut self, config: BackgroundConfig) {
        self.deactivate();
        self.config = config;
        self.activate();
    }

    pub fn deactivate(&mut self) {
        if self.mounted.take().is_some() {
            console::log_1(&"particle background deactivated".into());
        }
    }

    pub fn is_active(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(false, |mounted| mounted.scene().is_active())
    }

    pub fn particle_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |mounted| mounted.scene().particle_count())
    }

    pub fn config(&self) -> BackgroundConfig {
        self.config
    }

    pub fn canvas(&self) -> HtmlCanvasElement {
        self.canvas.clone()
    }
}

impl ParticleBackground {
    fn activate(&mut self) {
        match Mounted::setup(&self.canvas, self.config) {
            Ok(mounted) => self.mounted = Some(mounted),
            Err(err) => {
                console::warn_2(&"particle background disabled:".into(), &err);
            }
        }
    }
}
