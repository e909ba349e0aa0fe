pub mod board_metrics;
mod eval;
mod material;
mod position;

pub use eval::flip_eval_perspective;
pub use material::{
    cap_eval_by_material, game_phase, has_insufficient_material, majors, material_index, minors,
    non_pawn_material, side_has_insufficient_material, LIGHT_SQUARES,
};
pub use position::Position;
