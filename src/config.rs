use wasm_bindgen::prelude::*;

/// Mount-time settings. Changing any of them requires a remount, see
/// `ParticleBackground::reconfigure`.
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackgroundConfig {
    /// Scales particle count per unit area.
    pub density: f64,
    /// Scales the initial random velocity.
    pub speed: f64,
    /// Enables pointer attraction and the pointer listener.
    pub interactive: bool,
}

impl BackgroundConfig {
    pub const DEFAULT_DENSITY: f64 = 0.8;
    pub const DEFAULT_SPEED: f64 = 0.5;

    pub fn validate(&self) -> Result<(), String> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(format!("density must be a positive number, got {}", self.density));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(format!("speed must be zero or positive, got {}", self.speed));
        }
        Ok(())
    }
}

#[wasm_bindgen]
impl BackgroundConfig {
    #[wasm_bindgen(constructor)]
    pub fn new(density: f64, speed: f64, interactive: bool) -> BackgroundConfig {
        BackgroundConfig {
            density,
            speed,
            interactive,
        }
    }

    pub fn defaults() -> BackgroundConfig {
        BackgroundConfig::default()
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            density: BackgroundConfig::DEFAULT_DENSITY,
            speed: BackgroundConfig::DEFAULT_SPEED,
            interactive: true,
        }
    }
}
