use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::neighbors::Topology;
use std::time::Duration;

// --- Layout constants (screen units) ---
pub const DEFAULT_TILE_SIZE: u32 = 20;
pub const CTRL_PANEL_WIDTH: u32 = 400;
pub const OFFSET_X: u32 = 5;
pub const OFFSET_Y: u32 = 5;
pub const MIN_FIELD_WIDTH: u32 = 800;
pub const MIN_FIELD_HEIGHT: u32 = 600;

// --- Pacing ---
pub const DEFAULT_BASE_SIMULATION_DELAY_MS: u64 = 1000;
pub const MIN_SPEED_MULTIPLIER: u32 = 1;
pub const MAX_SPEED_MULTIPLIER: u32 = 200;

/// Size of the display the field has to fit on. Bounds the largest accepted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayBounds {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl DisplayBounds {
    pub fn max_field_width(&self) -> u32 {
        self.width.saturating_sub(CTRL_PANEL_WIDTH + OFFSET_X * 2)
    }

    pub fn max_field_height(&self) -> u32 {
        self.height.saturating_sub(OFFSET_Y * 2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Field width in screen units
    pub field_width: u32,
    /// Field height in screen units
    pub field_height: u32,
    pub tile_size: u32,
    pub topology: Topology,
    /// Generations per base delay
    pub speed_multiplier: u32,
    pub base_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: MIN_FIELD_WIDTH,
            field_height: MIN_FIELD_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            topology: Topology::Bounded,
            speed_multiplier: MIN_SPEED_MULTIPLIER,
            base_delay_ms: DEFAULT_BASE_SIMULATION_DELAY_MS,
        }
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<u32> {
    if value < min || value > max {
        return Err(Error::Config {
            name,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(value)
}

impl GameConfig {
    pub fn check_field_width(&self, display: &DisplayBounds) -> Result<u32> {
        check_range(
            "field width",
            self.field_width,
            MIN_FIELD_WIDTH,
            display.max_field_width(),
        )
    }

    pub fn check_field_height(&self, display: &DisplayBounds) -> Result<u32> {
        check_range(
            "field height",
            self.field_height,
            MIN_FIELD_HEIGHT,
            display.max_field_height(),
        )
    }

    pub fn check_speed_multiplier(&self) -> Result<u32> {
        check_range(
            "speed multiplier",
            self.speed_multiplier,
            MIN_SPEED_MULTIPLIER,
            MAX_SPEED_MULTIPLIER,
        )
    }

    pub fn check_tile_size(&self) -> Result<u32> {
        check_range(
            "tile size",
            self.tile_size,
            1,
            MIN_FIELD_WIDTH.min(MIN_FIELD_HEIGHT),
        )
    }

    /// Reject the configuration if any value is out of range.
    pub fn validate(&self, display: &DisplayBounds) -> Result<()> {
        self.check_field_width(display)?;
        self.check_field_height(display)?;
        self.check_tile_size()?;
        self.check_speed_multiplier()?;
        Ok(())
    }

    /// Replace every out-of-range value with its default, warning about each one.
    pub fn with_fallbacks(self, display: &DisplayBounds) -> Self {
        let defaults = GameConfig::default();
        let mut config = self;

        if let Err(e) = config.check_field_width(display) {
            log::warn!("{}. Set default value {}!", e, defaults.field_width);
            config.field_width = defaults.field_width;
        }
        if let Err(e) = config.check_field_height(display) {
            log::warn!("{}. Set default value {}!", e, defaults.field_height);
            config.field_height = defaults.field_height;
        }
        if let Err(e) = config.check_tile_size() {
            log::warn!("{}. Set default value {}!", e, defaults.tile_size);
            config.tile_size = defaults.tile_size;
        }
        if let Err(e) = config.check_speed_multiplier() {
            log::warn!("{}. Set default value {}!", e, defaults.speed_multiplier);
            config.speed_multiplier = defaults.speed_multiplier;
        }

        config
    }

    /// Delay between two generations.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms / self.speed_multiplier.max(1) as u64)
    }

    /// Screen position of the field's top-left cell, right of the control panel.
    pub fn field_origin(&self) -> [i32; 2] {
        [(CTRL_PANEL_WIDTH + OFFSET_X) as i32, OFFSET_Y as i32]
    }

    /// Build the engine this configuration describes.
    pub fn build_engine(&self) -> Result<Engine> {
        Engine::with_origin(
            self.field_width,
            self.field_height,
            self.tile_size,
            self.topology,
            self.field_origin(),
        )
    }
}
