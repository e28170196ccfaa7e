//! Read-only frame data for a renderer
//!
//! The simulation owns all state; a renderer gets a flat list of
//! GPU-uploadable instances (model matrix + mesh range) plus the HUD
//! counters, rebuilt between update and draw each frame.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::assets::{MeshRef, MeshSet};
use crate::sim::{GameState, TileKind};

/// One drawable instance, fit for direct upload to an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TileInstance {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    pub mesh_first: u32,
    pub mesh_count: u32,
    pub _pad: [u32; 2],
}

impl TileInstance {
    fn new(model: Mat4, mesh: MeshRef) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            mesh_first: mesh.first,
            mesh_count: mesh.count,
            _pad: [0; 2],
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameView {
    pub board_width: u32,
    pub board_height: u32,
    /// Floor underlays, then tiles, then the player (draw in order)
    pub instances: Vec<TileInstance>,
    pub cursor_x: u32,
    pub cursor_y: u32,
    pub star_points: i32,
    pub hole_points: i32,
    pub total_points_threshold: i32,
}

/// Mesh handle for a tile kind
fn mesh_for(meshes: &MeshSet, kind: TileKind) -> MeshRef {
    match kind {
        TileKind::Floor | TileKind::PlayerStart => meshes.floor,
        TileKind::Wall => meshes.wall,
        TileKind::Starpoint => meshes.starpoint,
        TileKind::Hole => meshes.hole,
        TileKind::Reflector => meshes.reflector,
        TileKind::Goal => meshes.goal,
        TileKind::Bonus => meshes.bonus,
    }
}

/// Board-to-clip transform: scales the board to fit a [-aspect, aspect] x
/// [-1, 1] box with the board center at the origin
pub fn world_to_clip(board_width: u32, board_height: u32, aspect: f32) -> Mat4 {
    let scale = f32::min(
        2.0 * aspect / board_width as f32,
        2.0 / board_height as f32,
    );
    let center_x = 0.5 * board_width as f32;
    let center_y = 0.5 * board_height as f32;
    Mat4::from_cols_array(&[
        scale / aspect,
        0.0,
        0.0,
        0.0,
        0.0,
        scale,
        0.0,
        0.0,
        0.0,
        0.0,
        -1.0,
        0.0,
        -(scale / aspect) * center_x,
        -scale * center_y,
        0.0,
        1.0,
    ])
}

impl FrameView {
    /// Snapshot the current state into draw-ready instances
    pub fn build(state: &GameState, meshes: &MeshSet) -> Self {
        let board = &state.board;
        let (width, height) = (board.width(), board.height());
        let cell_count = board.cell_count() as usize;
        let mut instances = Vec::with_capacity(cell_count * 2 + 1);

        // Floor underlay beneath every cell
        for y in 0..height {
            for x in 0..width {
                let pos = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, -0.5);
                instances.push(TileInstance::new(Mat4::from_translation(pos), meshes.floor));
            }
        }

        // The tile itself, composed with its accumulated roll rotation
        for y in 0..height {
            for x in 0..width {
                let index = board.index_of(x, y);
                let rotation = state.rotations[index as usize];
                let pos = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                instances.push(TileInstance::new(
                    Mat4::from_rotation_translation(rotation, pos),
                    mesh_for(meshes, board.kind_at(index)),
                ));
            }
        }

        // Player marker on the cursor cell
        let pos = Vec3::new(
            state.cursor.x as f32 + 0.5,
            state.cursor.y as f32 + 0.5,
            0.0,
        );
        instances.push(TileInstance::new(Mat4::from_translation(pos), meshes.player));

        Self {
            board_width: width,
            board_height: height,
            instances,
            cursor_x: state.cursor.x,
            cursor_y: state.cursor.y,
            star_points: state.score.star_points,
            hole_points: state.score.hole_points,
            total_points_threshold: state.score.total_points_threshold,
        }
    }
}
