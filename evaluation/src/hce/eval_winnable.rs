use cozy_chess::{Board, Color, Piece};
use utils::LIGHT_SQUARES;

#[derive(Clone, Copy)]
struct Counts {
    pawns: u32,
    knights: u32,
    bishops: u32,
    rooks: u32,
    queens: u32,
}

impl Counts {
    fn of(board: &Board, color: Color) -> Self {
        let count = |piece| board.colored_pieces(color, piece).len();
        Self {
            pawns: count(Piece::Pawn),
            knights: count(Piece::Knight),
            bishops: count(Piece::Bishop),
            rooks: count(Piece::Rook),
            queens: count(Piece::Queen),
        }
    }

    fn minors(&self) -> u32 {
        self.knights + self.bishops
    }

    fn majors(&self) -> u32 {
        self.rooks + self.queens
    }

    fn is_bare(&self) -> bool {
        self.pawns + self.minors() + self.majors() == 0
    }
}

/// Multiplier in `(0, 1]` that pulls drawish endgames toward zero.
pub(super) fn scale_factor(board: &Board, phase: f32) -> f32 {
    // Endgames only; middlegames are left alone
    if phase >= 0.25 {
        return 1.0;
    }

    let w = Counts::of(board, Color::White);
    let b = Counts::of(board, Color::Black);
    let no_pawns = w.pawns + b.pawns == 0;
    let no_queens = w.queens + b.queens == 0;

    let mut scale = 1.0f32;

    // Opposite-coloured bishops with nothing else
    if w.bishops == 1 && b.bishops == 1 && w.knights + b.knights == 0 && w.majors() + b.majors() == 0 {
        let white_light = !(board.colored_pieces(Color::White, Piece::Bishop) & LIGHT_SQUARES).is_empty();
        let black_light = !(board.colored_pieces(Color::Black, Piece::Bishop) & LIGHT_SQUARES).is_empty();
        if white_light != black_light {
            let pawn_diff = w.pawns.abs_diff(b.pawns) as f32;
            scale = scale.min((0.55 + 0.05 * pawn_diff).min(0.9));
        }
    }

    for (strong, weak) in [(w, b), (b, w)] {
        // Two knights cannot force mate against a bare king
        if strong.knights == 2 && strong.bishops + strong.majors() + strong.pawns == 0 && weak.is_bare() {
            scale = scale.min(0.1);
        }
        // Lone minor against a bare king
        if no_pawns && strong.majors() == 0 && strong.minors() == 1 && weak.is_bare() {
            scale = scale.min(0.2);
        }
        // Rook and minor against rook
        if no_pawns
            && no_queens
            && strong.rooks == 1
            && strong.minors() == 1
            && weak.rooks == 1
            && weak.minors() == 0
        {
            scale = scale.min(0.8);
        }
    }

    // Rook against a minor
    if no_pawns && no_queens && w.rooks + b.rooks == 1 && w.minors() + b.minors() == 1 {
        scale = scale.min(0.75);
    }

    scale
}
