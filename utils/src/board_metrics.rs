use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves,
    BitBoard, Board, Color, Piece,
};

/// Attack-derived facts about a board, computed in one pass per color.
#[derive(Clone, Copy, Debug)]
pub struct BoardMetrics {
    // Squares controlled that are not occupied by our own pieces
    pub space: [i16; Color::NUM],

    // Our valuable pieces attacked by a cheaper enemy piece
    pub threats: [BitBoard; Color::NUM],

    // Our pieces defended by our own pieces
    pub support: [BitBoard; Color::NUM],

    // Weighted enemy attacks on the squares around our king
    pub king_pressure: [u8; Color::NUM],
}

impl BoardMetrics {
    pub fn new(board: &Board) -> Self {
        let white = compute(board, Color::White);
        let black = compute(board, Color::Black);

        let white_support = white.attacks & board.colors(Color::White);
        let black_support = black.attacks & board.colors(Color::Black);

        Self {
            space: [white.space, black.space],
            // Threats are recorded against the side that owns the attacked pieces
            threats: [black.threats, white.threats],
            support: [white_support, black_support],
            king_pressure: [black.king_pressure, white.king_pressure],
        }
    }
}

struct SideAttacks {
    space: i16,
    attacks: BitBoard,
    threats: BitBoard,
    king_pressure: u8,
}

const QUEEN_PRESSURE: u8 = 2;
const PIECE_PRESSURE: u8 = 1;

/// Walks every piece of `color` once, collecting attacks, space, threats on
/// enemy pieces and pressure on the enemy king ring.
fn compute(board: &Board, color: Color) -> SideAttacks {
    let occupied = board.occupied();
    let mine = board.colors(color);
    let enemy = !color;

    let enemy_knights_bishops =
        board.colored_pieces(enemy, Piece::Knight) | board.colored_pieces(enemy, Piece::Bishop);
    let enemy_majors =
        board.colored_pieces(enemy, Piece::Rook) | board.colored_pieces(enemy, Piece::Queen);
    let enemy_non_pawns = enemy_knights_bishops | enemy_majors;
    let enemy_queens = board.colored_pieces(enemy, Piece::Queen);

    let enemy_king = board.king(enemy);
    let king_ring = get_king_moves(enemy_king) | enemy_king.bitboard();

    let mut side = SideAttacks {
        space: 0,
        attacks: BitBoard::EMPTY,
        threats: BitBoard::EMPTY,
        king_pressure: 0,
    };

    let mut record = |squares: BitBoard, victims: BitBoard, weight: u8| {
        side.space += (squares & !mine).len() as i16;
        side.attacks |= squares;
        side.threats |= squares & victims;
        if !(squares & king_ring).is_empty() {
            side.king_pressure = side.king_pressure.saturating_add(weight);
        }
    };

    for sq in board.colored_pieces(color, Piece::Pawn) {
        // Pawns threaten any non-pawn piece
        record(get_pawn_attacks(sq, color), enemy_non_pawns, PIECE_PRESSURE);
    }
    for sq in board.colored_pieces(color, Piece::Knight) {
        record(get_knight_moves(sq), enemy_majors, PIECE_PRESSURE);
    }
    for sq in board.colored_pieces(color, Piece::Bishop) {
        record(get_bishop_moves(sq, occupied), enemy_majors, PIECE_PRESSURE);
    }
    for sq in board.colored_pieces(color, Piece::Rook) {
        record(get_rook_moves(sq, occupied), enemy_queens, PIECE_PRESSURE);
    }
    for sq in board.colored_pieces(color, Piece::Queen) {
        let squares = get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied);
        record(squares, BitBoard::EMPTY, QUEEN_PRESSURE);
    }

    side
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_symmetric() {
        let metrics = BoardMetrics::new(&Board::default());
        assert_eq!(metrics.space[0], metrics.space[1]);
        assert_eq!(metrics.king_pressure, [0, 0]);
        assert!(metrics.threats[0].is_empty());
        assert!(metrics.threats[1].is_empty());
    }

    #[test]
    fn queen_next_to_king_counts_double() {
        // Black queen on e2 touches the white king ring
        let board: Board = "4k3/8/8/8/8/8/4q3/4K3 w - - 0 1".parse().unwrap();
        let metrics = BoardMetrics::new(&board);
        assert_eq!(metrics.king_pressure[Color::White as usize], QUEEN_PRESSURE);
        assert_eq!(metrics.king_pressure[Color::Black as usize], 0);
    }

    #[test]
    fn pawn_attacking_knight_is_a_threat() {
        // White pawn on d4 attacks the black knight on e5
        let board: Board = "4k3/8/8/4n3/3P4/8/8/4K3 w - - 0 1".parse().unwrap();
        let metrics = BoardMetrics::new(&board);
        let e5 = "e5".parse().unwrap();
        assert!(metrics.threats[Color::Black as usize].has(e5));
    }
}
