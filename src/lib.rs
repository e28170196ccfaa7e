//! Star Slide - a tile-board sliding puzzle core
//!
//! Core modules:
//! - `assets`: binary mesh blob parsing and the name -> mesh-range index
//! - `config`: board configuration (size, seed, special-tile placement)
//! - `sim`: deterministic board simulation (layout, slides, scoring, roll)
//! - `input`: raw key events -> per-frame tick input
//! - `view`: read-only frame data for a renderer

pub mod assets;
pub mod config;
pub mod input;
pub mod sim;
pub mod view;

pub use assets::{AssetIndex, MeshRef, MeshSet};
pub use config::BoardConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; at most one slide resolves per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default board dimensions
    pub const DEFAULT_BOARD_WIDTH: u32 = 8;
    pub const DEFAULT_BOARD_HEIGHT: u32 = 8;

    /// Default layout seed
    pub const DEFAULT_SEED: u64 = 0xbead_1234;

    /// Roll rotation rate (radians per second of held roll key)
    pub const ROLL_RATE: f32 = 1.0;

    /// Display threshold for the score HUD
    pub const DEFAULT_POINTS_THRESHOLD: i32 = 5;
}
