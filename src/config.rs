//! Board configuration
//!
//! Loaded from JSON so tuning (board size, seed, special-tile placement)
//! lives outside the binary. Goal and bonus placement is fractional, not a
//! literal cell index, so any board size resolves to sensible positions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A size-relative board position, each axis in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub fx: f32,
    pub fy: f32,
}

impl Placement {
    pub const fn new(fx: f32, fy: f32) -> Self {
        Self { fx, fy }
    }

    /// Resolve to a cell index on a `width` x `height` board
    ///
    /// Cell 0 is the reserved player start; a placement landing there is
    /// shifted to the next cell.
    pub fn resolve(&self, width: u32, height: u32) -> u32 {
        let x = (self.fx.clamp(0.0, 1.0) * (width - 1) as f32).round() as u32;
        let y = (self.fy.clamp(0.0, 1.0) * (height - 1) as f32).round() as u32;
        let index = y * width + x;
        if index == 0 { 1 } else { index }
    }
}

/// Full board tuning, serde-loadable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    /// Layout seed; the same seed reproduces the same board
    pub seed: u64,
    /// Goal tile placement (size-relative)
    pub goal_at: Placement,
    /// Bonus tile placement (size-relative)
    pub bonus_at: Placement,
    /// Preserve the original hole rule that tested the cell behind the
    /// direction of travel instead of the destination cell
    pub legacy_hole_rule: bool,
    /// Score threshold shown by the HUD
    pub total_points_threshold: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: DEFAULT_SEED,
            goal_at: Placement::new(1.0, 1.0),
            bonus_at: Placement::new(0.5, 0.5),
            legacy_hole_rule: false,
            total_points_threshold: DEFAULT_POINTS_THRESHOLD,
        }
    }
}

impl BoardConfig {
    /// Load a config from a JSON file, clamping degenerate sizes
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config.sanitized())
    }

    /// Clamp board dimensions to something playable
    pub fn sanitized(mut self) -> Self {
        if self.width < 2 || self.height < 2 {
            log::warn!(
                "board size {}x{} too small, clamping to 2x2 minimum",
                self.width,
                self.height
            );
            self.width = self.width.max(2);
            self.height = self.height.max(2);
        }
        self
    }

    pub fn cell_count(&self) -> u32 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_resolves_corners() {
        let far = Placement::new(1.0, 1.0);
        assert_eq!(far.resolve(8, 8), 63);

        let center = Placement::new(0.5, 0.5);
        // Rounds to (4, 4) on an 8x8 board
        assert_eq!(center.resolve(8, 8), 36);
    }

    #[test]
    fn test_placement_never_lands_on_start_cell() {
        let origin = Placement::new(0.0, 0.0);
        assert_eq!(origin.resolve(8, 8), 1);
    }

    #[test]
    fn test_placement_clamps_out_of_range_fractions() {
        let wild = Placement::new(7.0, -3.0);
        assert_eq!(wild.resolve(8, 8), 7);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = BoardConfig {
            width: 12,
            height: 6,
            legacy_hole_rule: true,
            ..BoardConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: BoardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BoardConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.width, DEFAULT_BOARD_WIDTH);
        assert!(!config.legacy_hole_rule);
    }

    #[test]
    fn test_sanitize_clamps_degenerate_size() {
        let config = BoardConfig {
            width: 1,
            height: 0,
            ..BoardConfig::default()
        }
        .sanitized();
        assert_eq!((config.width, config.height), (2, 2));
    }
}
