//! Static board layout generation
//!
//! The cell array (one `TileKind` per cell) is the source of truth; the
//! per-kind index sets are a derived acceleration structure for the O(1)
//! membership tests slide resolution performs.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::BoardConfig;

/// The immutable category of a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Floor,
    Wall,
    Starpoint,
    Hole,
    Reflector,
    Goal,
    Bonus,
    PlayerStart,
}

/// Candidate kinds for randomized cells, equally weighted
const RANDOM_KINDS: [TileKind; 5] = [
    TileKind::Wall,
    TileKind::Starpoint,
    TileKind::Floor,
    TileKind::Reflector,
    TileKind::Hole,
];

/// Derived per-kind cell index sets for the four special kinds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileSets {
    pub walls: HashSet<u32>,
    pub starpoints: HashSet<u32>,
    pub holes: HashSet<u32>,
    pub reflectors: HashSet<u32>,
}

impl TileSets {
    fn from_kinds(kinds: &[TileKind]) -> Self {
        let mut sets = Self::default();
        for (i, kind) in kinds.iter().enumerate() {
            let i = i as u32;
            match kind {
                TileKind::Wall => {
                    sets.walls.insert(i);
                }
                TileKind::Starpoint => {
                    sets.starpoints.insert(i);
                }
                TileKind::Hole => {
                    sets.holes.insert(i);
                }
                TileKind::Reflector => {
                    sets.reflectors.insert(i);
                }
                _ => {}
            }
        }
        sets
    }
}

/// A generated board: tile kinds plus derived index sets
///
/// Immutable after generation; no tile ever changes kind during play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    kinds: Vec<TileKind>,
    sets: TileSets,
    goal_index: u32,
    bonus_index: u32,
}

impl Board {
    /// Generate the layout for a config; same config, same board
    ///
    /// Degenerate sizes are clamped, so generation is total over any config.
    pub fn generate(config: &BoardConfig) -> Self {
        let config = config.clone().sanitized();
        let (width, height) = (config.width, config.height);
        let cell_count = width * height;

        let goal_index = config.goal_at.resolve(width, height);
        let mut bonus_index = config.bonus_at.resolve(width, height);
        if bonus_index == goal_index {
            bonus_index = if bonus_index + 1 < cell_count {
                bonus_index + 1
            } else {
                1
            };
        }

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let mut kinds = Vec::with_capacity(cell_count as usize);
        for i in 0..cell_count {
            let kind = if i == 0 {
                TileKind::PlayerStart
            } else if i == goal_index {
                TileKind::Goal
            } else if i == bonus_index {
                TileKind::Bonus
            } else {
                RANDOM_KINDS[rng.random_range(0..RANDOM_KINDS.len())]
            };
            kinds.push(kind);
        }

        let sets = TileSets::from_kinds(&kinds);
        log::info!(
            "generated {}x{} board (seed {:#x}): {} walls, {} starpoints, {} holes, {} reflectors",
            width,
            height,
            config.seed,
            sets.walls.len(),
            sets.starpoints.len(),
            sets.holes.len(),
            sets.reflectors.len()
        );

        Self {
            width,
            height,
            kinds,
            sets,
            goal_index,
            bonus_index,
        }
    }

    /// Build a board from explicit tile kinds (scripted layouts and tests)
    pub fn from_kinds(width: u32, height: u32, kinds: Vec<TileKind>) -> Self {
        debug_assert_eq!(kinds.len(), (width * height) as usize);
        let sets = TileSets::from_kinds(&kinds);
        let goal_index = kinds
            .iter()
            .position(|k| *k == TileKind::Goal)
            .unwrap_or(0) as u32;
        let bonus_index = kinds
            .iter()
            .position(|k| *k == TileKind::Bonus)
            .unwrap_or(0) as u32;
        Self {
            width,
            height,
            kinds,
            sets,
            goal_index,
            bonus_index,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> u32 {
        self.width * self.height
    }

    /// Linear index of the cell at (x, y)
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> u32 {
        y * self.width + x
    }

    pub fn kind_at(&self, index: u32) -> TileKind {
        self.kinds[index as usize]
    }

    pub fn kinds(&self) -> &[TileKind] {
        &self.kinds
    }

    pub fn sets(&self) -> &TileSets {
        &self.sets
    }

    pub fn goal_index(&self) -> u32 {
        self.goal_index
    }

    pub fn bonus_index(&self) -> u32 {
        self.bonus_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_config_reproduces_identical_layout() {
        let config = BoardConfig::default();
        let a = Board::generate(&config);
        let b = Board::generate(&config);
        assert_eq!(a.kinds(), b.kinds());
        assert_eq!(a.sets(), b.sets());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = Board::generate(&BoardConfig::default());
        let b = Board::generate(&BoardConfig {
            seed: 0x1234_5678,
            ..BoardConfig::default()
        });
        // Astronomically unlikely to collide on 60+ random cells
        assert_ne!(a.kinds(), b.kinds());
    }

    #[test]
    fn test_cell_zero_is_player_start() {
        let board = Board::generate(&BoardConfig::default());
        assert_eq!(board.kind_at(0), TileKind::PlayerStart);
        let sets = board.sets();
        assert!(!sets.walls.contains(&0));
        assert!(!sets.starpoints.contains(&0));
        assert!(!sets.holes.contains(&0));
        assert!(!sets.reflectors.contains(&0));
    }

    #[test]
    fn test_goal_and_bonus_follow_placement() {
        let board = Board::generate(&BoardConfig::default());
        assert_eq!(board.kind_at(board.goal_index()), TileKind::Goal);
        assert_eq!(board.kind_at(board.bonus_index()), TileKind::Bonus);
        assert_eq!(board.goal_index(), 63);
        assert_eq!(board.bonus_index(), 36);
    }

    #[test]
    fn test_placement_scales_with_board_size() {
        let config = BoardConfig {
            width: 16,
            height: 4,
            ..BoardConfig::default()
        };
        let board = Board::generate(&config);
        // Goal still lands in the far corner regardless of dimensions
        assert_eq!(board.goal_index(), board.cell_count() - 1);
    }

    #[test]
    fn test_colliding_goal_and_bonus_are_separated() {
        let config = BoardConfig {
            goal_at: crate::config::Placement::new(0.5, 0.5),
            bonus_at: crate::config::Placement::new(0.5, 0.5),
            ..BoardConfig::default()
        };
        let board = Board::generate(&config);
        assert_ne!(board.goal_index(), board.bonus_index());
        assert_eq!(board.kind_at(board.bonus_index()), TileKind::Bonus);
    }

    #[test]
    fn test_degenerate_config_is_clamped() {
        // A zero-sized config must not underflow placement resolution
        let board = Board::generate(&BoardConfig {
            width: 0,
            height: 0,
            ..BoardConfig::default()
        });
        assert_eq!((board.width(), board.height()), (2, 2));
        assert_eq!(board.kind_at(0), TileKind::PlayerStart);
    }

    #[test]
    fn test_sets_mirror_kinds() {
        let board = Board::generate(&BoardConfig::default());
        for i in 0..board.cell_count() {
            let sets = board.sets();
            let expected = match board.kind_at(i) {
                TileKind::Wall => sets.walls.contains(&i),
                TileKind::Starpoint => sets.starpoints.contains(&i),
                TileKind::Hole => sets.holes.contains(&i),
                TileKind::Reflector => sets.reflectors.contains(&i),
                _ => {
                    !sets.walls.contains(&i)
                        && !sets.starpoints.contains(&i)
                        && !sets.holes.contains(&i)
                        && !sets.reflectors.contains(&i)
                }
            };
            assert!(expected, "cell {i} disagrees with its index set");
        }
    }
}
