use cozy_chess::{BitBoard, Board, Color, Piece};
use utils::Position;

// Shared state for one evaluation; cached queries live on `Position`.
pub struct EvalContext<'a> {
    pub position: &'a Position<'a>,
    pub phase: f32,
    pub inv_phase: f32,
}

impl<'a> EvalContext<'a> {
    #[inline(always)]
    pub fn new(position: &'a Position<'a>, phase: f32) -> Self {
        Self {
            position,
            phase,
            inv_phase: 1.0 - phase,
        }
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        self.position.board
    }

    #[inline(always)]
    pub fn pieces(&self, color: Color, piece: Piece) -> BitBoard {
        self.position.board.colored_pieces(color, piece)
    }

    /// Scales a middlegame-only term by phase.
    #[inline(always)]
    pub fn mg(&self, score: i16) -> i16 {
        (score as f32 * self.phase).round() as i16
    }
}
