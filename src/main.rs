//! Star Slide entry point - headless board driver
//!
//! Loads the mesh blob, generates the board, then plays moves read from
//! stdin (`left`, `right`, `up`, `down`, `roll-left` .., `reset`, `quit`),
//! printing the board and score counters after every frame. Exercises the
//! full pipeline without a GPU attached.

use std::io::BufRead;

use star_slide::assets::{AssetIndex, MeshSet};
use star_slide::config::BoardConfig;
use star_slide::consts::SIM_DT;
use star_slide::input::{GameKey, InputTranslator};
use star_slide::sim::{GameState, TileKind, tick};
use star_slide::view::FrameView;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let blob_path = args.next().unwrap_or_else(|| "meshes.blob".to_owned());
    let config = match args.next() {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };

    let index = AssetIndex::load(&blob_path)?;
    let meshes = MeshSet::resolve(&index)?;
    log::info!("mesh blob '{blob_path}' resolved all required meshes");

    let mut state = GameState::new(config);
    let mut input = InputTranslator::new();
    print_board(&state);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command == "quit" {
            break;
        }
        let Some(key) = key_for(command) else {
            eprintln!("unknown command '{command}' (left right up down roll-<dir> reset quit)");
            continue;
        };

        input.key_event(key, true, false);
        let frame = input.take_frame_input();
        tick(&mut state, &frame, SIM_DT);
        // Command mode has no key-up events; release immediately
        input.key_event(key, false, false);

        let view = FrameView::build(&state, &meshes);
        print_board(&state);
        println!(
            "stars: {}  holes: {}  (threshold {})",
            view.star_points, view.hole_points, view.total_points_threshold
        );
    }
    Ok(())
}

fn key_for(command: &str) -> Option<GameKey> {
    match command {
        "left" => Some(GameKey::SlideLeft),
        "right" => Some(GameKey::SlideRight),
        "up" => Some(GameKey::SlideUp),
        "down" => Some(GameKey::SlideDown),
        "roll-left" => Some(GameKey::RollLeft),
        "roll-right" => Some(GameKey::RollRight),
        "roll-up" => Some(GameKey::RollUp),
        "roll-down" => Some(GameKey::RollDown),
        "reset" => Some(GameKey::Reset),
        _ => None,
    }
}

fn tile_char(kind: TileKind) -> char {
    match kind {
        TileKind::Floor | TileKind::PlayerStart => '.',
        TileKind::Wall => '#',
        TileKind::Starpoint => '*',
        TileKind::Hole => 'O',
        TileKind::Reflector => '/',
        TileKind::Goal => 'G',
        TileKind::Bonus => 'o',
    }
}

/// Print the board with row y at the top (up is +y), cursor as `@`
fn print_board(state: &GameState) {
    let board = &state.board;
    for y in (0..board.height()).rev() {
        let mut row = String::with_capacity(board.width() as usize * 2);
        for x in 0..board.width() {
            let c = if x == state.cursor.x && y == state.cursor.y {
                '@'
            } else {
                tile_char(board.kind_at(board.index_of(x, y)))
            };
            row.push(c);
            row.push(' ');
        }
        println!("{row}");
    }
}
