//! Deterministic board simulation
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Seeded RNG only (layout generation)
//! - At most one slide resolves per tick
//! - No rendering or platform dependencies

pub mod board;
pub mod state;
pub mod tick;

pub use board::{Board, TileKind, TileSets};
pub use state::{Cursor, GameState, ScoreState};
pub use tick::{SlideDir, TickInput, tick};
