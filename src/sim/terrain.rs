//! Undulating ground line shared by the player and the enemies.

use crate::config::GameConfig;

/// Sine-wave ground whose phase scrolls with time.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    pub base_margin: f64,
    pub amplitude: f64,
    pub frequency: f64,
    /// Accumulated scroll; only ever grows.
    pub offset: f64,
}

impl Terrain {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            base_margin: cfg.ground_base_margin,
            amplitude: cfg.ground_amplitude,
            frequency: cfg.ground_frequency,
            offset: 0.0,
        }
    }

    /// Ground y at horizontal position `x` for a canvas `canvas_height` tall.
    pub fn ground_height(&self, x: f64, canvas_height: f64) -> f64 {
        ground_height(
            x,
            self.offset,
            canvas_height,
            self.base_margin,
            self.amplitude,
            self.frequency,
        )
    }

    pub fn scroll(&mut self, distance: f64) {
        self.offset += distance;
    }
}

/// `canvas_height - base_margin - amplitude * sin((x + offset) * frequency)`.
pub fn ground_height(
    x: f64,
    offset: f64,
    canvas_height: f64,
    base_margin: f64,
    amplitude: f64,
    frequency: f64,
) -> f64 {
    canvas_height - base_margin - amplitude * ((x + offset) * frequency).sin()
}
