use cozy_chess::{Board, Color, Piece};

const PIECES: usize = 5;

/// Middlegame and endgame piece values, blended by game phase.
///
/// <https://www.chessprogramming.org/Tapered_Eval>
#[derive(Debug, Clone, Copy)]
pub struct PieceValues {
    mg: [f32; PIECES],
    eg: [f32; PIECES],
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            mg: [98.0, 325.0, 335.0, 510.0, 975.0],
            eg: [113.0, 340.0, 350.0, 560.0, 1020.0],
        }
    }
}

impl PieceValues {
    pub fn new(mg: [f32; PIECES], eg: [f32; PIECES]) -> Self {
        Self { mg, eg }
    }

    /// Value of `piece` at `phase` (1.0 = opening, 0.0 = endgame). Kings are worth nothing.
    #[inline(always)]
    pub fn get(&self, piece: Piece, phase: f32) -> i16 {
        if piece == Piece::King {
            return 0;
        }
        let idx = piece as usize;
        (self.mg[idx] * phase + self.eg[idx] * (1.0 - phase)).round() as i16
    }

    /// Material of one side at `phase`.
    pub fn side_material(&self, board: &Board, color: Color, phase: f32) -> i16 {
        Piece::ALL
            .iter()
            .map(|&piece| self.get(piece, phase) * board.colored_pieces(color, piece).len() as i16)
            .sum()
    }
}
