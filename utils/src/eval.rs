use cozy_chess::{Board, Color};

/// Converts between White's perspective and the side to move's perspective.
/// The conversion is its own inverse.
#[inline(always)]
pub fn flip_eval_perspective(board: &Board, score: i32) -> i32 {
    match board.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}
