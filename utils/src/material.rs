use cozy_chess::{BitBoard, Board, Color, Piece};

pub const LIGHT_SQUARES: BitBoard = BitBoard(0x55AA_55AA_55AA_55AA);

/// Coarse piece values used for the material index (pawn = 1).
const INDEX_WEIGHTS: [i32; Piece::NUM] = [1, 3, 3, 5, 9, 0];

/// Centipawn values used for non-pawn material.
const NON_PAWN_VALUES: [i32; Piece::NUM] = [0, 320, 330, 500, 900, 0];

/// Material index over both sides: P + 3N + 3B + 5R + 9Q.
///
/// The starting position scores 78. Win-probability and gating code clamp
/// this into `[17, 78]`.
pub fn material_index(board: &Board) -> i32 {
    Piece::ALL
        .iter()
        .map(|&piece| INDEX_WEIGHTS[piece as usize] * board.pieces(piece).len() as i32)
        .sum()
}

/// Non-pawn material of one side in centipawns.
pub fn non_pawn_material(board: &Board, color: Color) -> i32 {
    [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .iter()
        .map(|&piece| {
            NON_PAWN_VALUES[piece as usize] * board.colored_pieces(color, piece).len() as i32
        })
        .sum()
}

/// Knights and bishops of one side.
pub fn minors(board: &Board, color: Color) -> BitBoard {
    board.colored_pieces(color, Piece::Knight) | board.colored_pieces(color, Piece::Bishop)
}

/// Rooks and queens of one side.
pub fn majors(board: &Board, color: Color) -> BitBoard {
    board.colored_pieces(color, Piece::Rook) | board.colored_pieces(color, Piece::Queen)
}

/// A side with a lone king, or king plus a single minor, can never mate.
pub fn side_has_insufficient_material(board: &Board, color: Color) -> bool {
    let can_mate_alone = board.colored_pieces(color, Piece::Pawn)
        | majors(board, color);
    can_mate_alone.is_empty() && minors(board, color).len() <= 1
}

/// Dead draws: K v K, K+minor v K, and K+B v K+B with same-colored bishops.
pub fn has_insufficient_material(board: &Board) -> bool {
    let white_minors = minors(board, Color::White);
    let black_minors = minors(board, Color::Black);

    if !side_has_insufficient_material(board, Color::White)
        || !side_has_insufficient_material(board, Color::Black)
    {
        return false;
    }

    if white_minors.is_empty() || black_minors.is_empty() {
        return true;
    }

    let bishops = board.pieces(Piece::Bishop);
    if (white_minors & bishops).is_empty() || (black_minors & bishops).is_empty() {
        // K+N v K+N and K+N v K+B are not forced draws
        return false;
    }

    let white_light = !(white_minors & LIGHT_SQUARES).is_empty();
    let black_light = !(black_minors & LIGHT_SQUARES).is_empty();
    white_light == black_light
}

/// Clamp a White-perspective score so a side that cannot mate is never "winning".
pub fn cap_eval_by_material(board: &Board, score: i16) -> i16 {
    let mut capped = score;
    if side_has_insufficient_material(board, Color::White) {
        capped = capped.min(0);
    }
    if side_has_insufficient_material(board, Color::Black) {
        capped = capped.max(0);
    }
    capped
}

/// Game phase from 1.0 (all pieces) down to 0.0 (pawns and kings only).
///
/// Weights N=1, B=1, R=2, Q=4, capped at 24.
pub fn game_phase(board: &Board) -> f32 {
    let score = board.pieces(Piece::Knight).len()
        + board.pieces(Piece::Bishop).len()
        + 2 * board.pieces(Piece::Rook).len()
        + 4 * board.pieces(Piece::Queen).len();

    score.min(24) as f32 / 24.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn start_position_material() {
        let start = Board::default();
        assert_eq!(material_index(&start), 78);
        assert_eq!(non_pawn_material(&start, Color::White), 2 * 320 + 2 * 330 + 2 * 500 + 900);
        assert_eq!(
            non_pawn_material(&start, Color::White),
            non_pawn_material(&start, Color::Black)
        );
    }

    #[test]
    fn bare_kings_have_no_material() {
        let kings = board("k7/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(material_index(&kings), 0);
        assert!(has_insufficient_material(&kings));
    }

    #[test]
    fn single_minor_is_insufficient() {
        assert!(has_insufficient_material(&board("k7/8/8/8/8/8/8/KN6 w - - 0 1")));
        assert!(has_insufficient_material(&board("kb6/8/8/8/8/8/8/K7 w - - 0 1")));
    }

    #[test]
    fn two_knights_or_a_pawn_are_sufficient() {
        assert!(!has_insufficient_material(&board("k7/8/8/8/8/8/8/KNN5 w - - 0 1")));
        assert!(!has_insufficient_material(&board("k7/p7/8/8/8/8/8/K7 w - - 0 1")));
        assert!(!has_insufficient_material(&board("k7/8/8/8/8/8/8/KR6 w - - 0 1")));
    }

    #[test]
    fn same_colored_bishops_are_a_draw() {
        // b1 and c8 are both light squares
        assert!(has_insufficient_material(&board("k1b5/8/8/8/8/8/8/KB6 w - - 0 1")));
        // b1 light, b8 dark
        assert!(!has_insufficient_material(&board("kb6/8/8/8/8/8/8/KB6 w - - 0 1")));
    }

    #[test]
    fn cap_respects_the_side_that_cannot_mate() {
        let kb_vs_kp = board("k7/p7/8/8/8/8/8/KB6 w - - 0 1");
        assert_eq!(cap_eval_by_material(&kb_vs_kp, 250), 0);
        assert_eq!(cap_eval_by_material(&kb_vs_kp, -250), -250);
    }

    #[test]
    fn game_phase_bounds() {
        assert!((game_phase(&Board::default()) - 1.0).abs() < 0.01);
        assert!(game_phase(&board("k7/8/8/8/8/8/8/KR6 w - - 0 1")) < 0.2);
    }
}
