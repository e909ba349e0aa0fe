use super::context::EvalContext;
use cozy_chess::{BitBoard, Color, Piece};

/// Pawn scores indexed by color, White first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PawnScores {
    pub structure: [i16; 2],
    pub passed: [i16; 2],
}

// Single-entry cache keyed on both pawn bitboards and the phase, which scales
// the central pawn bonus.
pub struct PawnCache {
    white_pawns: BitBoard,
    black_pawns: BitBoard,
    phase: f32,
    scores: Option<PawnScores>,
}

impl PawnCache {
    pub fn new() -> Self {
        Self {
            white_pawns: BitBoard::EMPTY,
            black_pawns: BitBoard::EMPTY,
            phase: 0.0,
            scores: None,
        }
    }

    pub fn get(&self, ctx: &EvalContext) -> Option<PawnScores> {
        let white_pawns = ctx.pieces(Color::White, Piece::Pawn);
        let black_pawns = ctx.pieces(Color::Black, Piece::Pawn);

        if white_pawns == self.white_pawns
            && black_pawns == self.black_pawns
            && ctx.phase == self.phase
        {
            self.scores
        } else {
            None
        }
    }

    pub fn set(&mut self, ctx: &EvalContext, scores: PawnScores) {
        self.white_pawns = ctx.pieces(Color::White, Piece::Pawn);
        self.black_pawns = ctx.pieces(Color::Black, Piece::Pawn);
        self.phase = ctx.phase;
        self.scores = Some(scores);
    }

    pub fn clear(&mut self) {
        self.scores = None;
    }
}
