//! Game state: board, cursor, scores, and per-cell rotations

use glam::Quat;

use super::board::Board;
use crate::config::BoardConfig;

/// Cursor cell position; always inside the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: u32,
    pub y: u32,
}

/// Score counters, mutated only by slide resolution
///
/// Unbounded in both directions; holes can drive `star_points` negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreState {
    pub star_points: i32,
    pub hole_points: i32,
    pub total_points_threshold: i32,
}

/// Complete simulation state
///
/// Owned by the single simulation thread; the renderer reads it between
/// updates through [`crate::view::FrameView`] and never mutates it.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: BoardConfig,
    pub board: Board,
    pub cursor: Cursor,
    pub score: ScoreState,
    /// Cosmetic per-cell rotation, accumulated by held roll keys
    pub rotations: Vec<Quat>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh state with a generated layout
    ///
    /// Degenerate board sizes are clamped so the stored config always
    /// matches the generated board.
    pub fn new(config: BoardConfig) -> Self {
        let config = config.sanitized();
        let board = Board::generate(&config);
        let cell_count = board.cell_count() as usize;
        Self {
            cursor: Cursor::default(),
            score: ScoreState {
                total_points_threshold: config.total_points_threshold,
                ..ScoreState::default()
            },
            rotations: vec![Quat::IDENTITY; cell_count],
            time_ticks: 0,
            board,
            config,
        }
    }

    /// Full reinitialization: layout regenerated from the same config,
    /// cursor back to the start cell, scores zeroed, rotations cleared
    pub fn reset(&mut self) {
        log::info!("resetting board");
        *self = Self::new(self.config.clone());
    }
}
