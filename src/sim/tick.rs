//! Slide resolution and roll accumulation
//!
//! One call to [`tick`] consumes one frame's worth of intents: at most one
//! slide, an optional reset, and the held roll flags. Slide resolution is
//! total; no input sequence can produce an unhandled tile kind or an
//! out-of-bounds cursor.

use glam::{Quat, Vec3};

use super::state::GameState;
use crate::consts::ROLL_RATE;

/// A single-cell movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDir {
    Left,
    Right,
    Up,
    Down,
}

impl SlideDir {
    /// Cell delta for one step in this direction (up is +y)
    #[inline]
    fn delta(self) -> (i64, i64) {
        match self {
            SlideDir::Left => (-1, 0),
            SlideDir::Right => (1, 0),
            SlideDir::Up => (0, 1),
            SlideDir::Down => (0, -1),
        }
    }

    /// Reflector deflection on the perpendicular axis: up/left deflect one
    /// way, down/right the other
    #[inline]
    fn deflection(self) -> (i64, i64) {
        match self {
            SlideDir::Up => (1, 0),
            SlideDir::Down => (-1, 0),
            SlideDir::Left => (0, 1),
            SlideDir::Right => (0, -1),
        }
    }
}

/// Input intents for a single tick
///
/// Produced once per frame by the input translator and consumed exactly
/// once here; there are no shared mutable flags to clear.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// At most one slide attempt per tick
    pub slide: Option<SlideDir>,
    /// Full state reinitialization
    pub reset: bool,
    /// Held roll keys (cosmetic rotation only)
    pub roll_left: bool,
    pub roll_right: bool,
    pub roll_up: bool,
    pub roll_down: bool,
}

/// Advance the simulation by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.reset {
        // Reset consumes the whole frame; any queued slide is dropped
        state.reset();
        return;
    }

    state.time_ticks += 1;

    if let Some(dir) = input.slide {
        resolve_slide(state, dir);
    }

    apply_roll(state, input, dt);
}

/// Resolve one slide attempt: bounds check, then membership tests against
/// the target cell in fixed priority order (wall, starpoint, hole,
/// reflector, default). First match wins.
fn resolve_slide(state: &mut GameState, dir: SlideDir) {
    let board = &state.board;
    let (dx, dy) = dir.delta();
    let tx = state.cursor.x as i64 + dx;
    let ty = state.cursor.y as i64 + dy;
    if tx < 0 || tx >= board.width() as i64 || ty < 0 || ty >= board.height() as i64 {
        log::debug!("slide {dir:?} blocked at board edge");
        return;
    }
    let (tx, ty) = (tx as u32, ty as u32);
    let target = board.index_of(tx, ty);

    // The original tested the cell behind the direction of travel for holes
    // instead of the destination; the corrected symmetric rule is the
    // default, the legacy rule stays available via config.
    let hole_probe = if state.config.legacy_hole_rule {
        let bx = state.cursor.x as i64 - dx;
        let by = state.cursor.y as i64 - dy;
        if bx >= 0 && bx < board.width() as i64 && by >= 0 && by < board.height() as i64 {
            Some(board.index_of(bx as u32, by as u32))
        } else {
            None
        }
    } else {
        Some(target)
    };

    let sets = board.sets();
    if sets.walls.contains(&target) {
        log::debug!("slide {dir:?} hit wall at cell {target}");
    } else if sets.starpoints.contains(&target) {
        state.cursor.x = tx;
        state.cursor.y = ty;
        state.score.star_points += 1;
        log::debug!(
            "collected starpoint at cell {target}, star_points={}",
            state.score.star_points
        );
    } else if hole_probe.is_some_and(|probe| sets.holes.contains(&probe)) {
        state.cursor.x = tx;
        state.cursor.y = ty;
        state.score.star_points -= 1;
        state.score.hole_points += 1;
        log::debug!(
            "fell in hole, star_points={} hole_points={}",
            state.score.star_points,
            state.score.hole_points
        );
    } else if sets.reflectors.contains(&target) {
        // Reflectors redirect the slide diagonally; the extra offset clamps
        // at the board edge rather than pushing the cursor out of bounds
        let (lx, ly) = dir.deflection();
        let fx = (tx as i64 + lx).clamp(0, board.width() as i64 - 1) as u32;
        let fy = (ty as i64 + ly).clamp(0, board.height() as i64 - 1) as u32;
        state.cursor.x = fx;
        state.cursor.y = fy;
        log::debug!("reflector at cell {target} deflected cursor to ({fx}, {fy})");
    } else {
        // Floor, goal, bonus, player start: plain move, no score change
        state.cursor.x = tx;
        state.cursor.y = ty;
    }
}

/// Rotate every cell in the cursor's row and column by the held roll keys
///
/// The cursor's own cell is rotated only in the row pass so it is not
/// applied twice. Rotations renormalize each update to counter drift.
fn apply_roll(state: &mut GameState, input: &TickInput, dt: f32) {
    let amt = dt * ROLL_RATE;
    let mut dr = Quat::IDENTITY;
    if input.roll_left {
        dr = Quat::from_axis_angle(Vec3::Y, amt) * dr;
    }
    if input.roll_right {
        dr = Quat::from_axis_angle(Vec3::Y, -amt) * dr;
    }
    if input.roll_up {
        dr = Quat::from_axis_angle(Vec3::X, amt) * dr;
    }
    if input.roll_down {
        dr = Quat::from_axis_angle(Vec3::X, -amt) * dr;
    }
    if dr == Quat::IDENTITY {
        return;
    }

    let width = state.board.width();
    let height = state.board.height();
    for x in 0..width {
        let r = &mut state.rotations[(state.cursor.y * width + x) as usize];
        *r = (dr * *r).normalize();
    }
    for y in 0..height {
        if y != state.cursor.y {
            let r = &mut state.rotations[(y * width + state.cursor.x) as usize];
            *r = (dr * *r).normalize();
        }
    }
}
