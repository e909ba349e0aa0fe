use std::cell::OnceCell;

use cozy_chess::{BitBoard, Board, Color, Piece, Rank};

use crate::board_metrics::BoardMetrics;
use crate::material::{material_index, non_pawn_material};

/// Weighted attacks on the king ring at which a king counts as in danger.
const KING_DANGER_PRESSURE: u8 = 3;

/// Read-only view of a board with lazily computed, cached queries.
///
/// Cheap to construct; expensive facts (attack maps, legal move count) are
/// computed on first use and reused for the lifetime of the view.
pub struct Position<'a> {
    pub board: &'a Board,
    metrics: OnceCell<BoardMetrics>,
    legal_moves: OnceCell<usize>,
}

impl<'a> Position<'a> {
    #[inline(always)]
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            metrics: OnceCell::new(),
            legal_moves: OnceCell::new(),
        }
    }

    #[inline(always)]
    fn metrics(&self) -> &BoardMetrics {
        self.metrics.get_or_init(|| BoardMetrics::new(self.board))
    }

    /// Half-moves played since the start of the game.
    pub fn ply(&self) -> i32 {
        let fullmove = i32::from(self.board.fullmove_number()).max(1);
        let black_to_move = (self.board.side_to_move() == Color::Black) as i32;
        2 * (fullmove - 1) + black_to_move
    }

    pub fn piece_count(&self, piece: Piece) -> u32 {
        self.board.pieces(piece).len()
    }

    /// P + 3N + 3B + 5R + 9Q over both sides.
    pub fn material(&self) -> i32 {
        material_index(self.board)
    }

    pub fn non_pawn_material(&self, color: Color) -> i32 {
        non_pawn_material(self.board, color)
    }

    /// Legal moves for the side to move.
    pub fn legal_move_count(&self) -> usize {
        *self.legal_moves.get_or_init(|| {
            let mut count = 0;
            self.board.generate_moves(|moves| {
                count += moves.len();
                false
            });
            count
        })
    }

    /// The king of `color` is in check or its surrounding squares are under
    /// sustained enemy attack.
    pub fn king_in_danger(&self, color: Color) -> bool {
        if color == self.board.side_to_move() && !self.board.checkers().is_empty() {
            return true;
        }
        self.metrics().king_pressure[color as usize] >= KING_DANGER_PRESSURE
    }

    /// Some pawn stands on its seventh rank.
    pub fn pawn_near_promotion(&self) -> bool {
        Color::ALL.iter().any(|&color| {
            let seventh = Rank::Seventh.relative_to(color).bitboard();
            !(self.board.colored_pieces(color, Piece::Pawn) & seventh).is_empty()
        })
    }

    #[inline(always)]
    pub fn space_for(&self, color: Color) -> i16 {
        self.metrics().space[color as usize]
    }

    #[inline(always)]
    pub fn threats_for(&self, color: Color) -> BitBoard {
        self.metrics().threats[color as usize]
    }

    #[inline(always)]
    pub fn support_for(&self, color: Color) -> BitBoard {
        self.metrics().support[color as usize]
    }
}
