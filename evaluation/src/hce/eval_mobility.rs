use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::{get_bishop_moves, get_knight_moves, get_rook_moves, BitBoard, Color, Piece};

/// Pseudo-legal squares reachable by each piece, excluding own-occupied ones.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    let board = ctx.board();
    let occupied = board.occupied();
    let targets = !board.colors(color);

    let count = |squares: BitBoard| (squares & targets).len() as i16;

    let mut cp = 0i16;
    for sq in ctx.pieces(color, Piece::Knight) {
        // Knights lose value as the board empties out
        cp += ctx.mg(config.knight_mobility_multiplier * count(get_knight_moves(sq)));
    }
    for sq in ctx.pieces(color, Piece::Bishop) {
        cp += config.bishop_mobility_multiplier * count(get_bishop_moves(sq, occupied));
    }
    for sq in ctx.pieces(color, Piece::Rook) {
        cp += config.rook_mobility_multiplier * count(get_rook_moves(sq, occupied));
    }
    for sq in ctx.pieces(color, Piece::Queen) {
        let moves = get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied);
        cp += ctx.mg(config.queen_mobility_multiplier * count(moves));
    }
    cp
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Board;
    use utils::Position;

    #[test]
    fn start_position_is_symmetric() {
        let board = Board::default();
        let position = Position::new(&board);
        let ctx = EvalContext::new(&position, 1.0);
        let config = HCEConfig::default();
        let white = evaluate(&ctx, Color::White, &config);
        assert_eq!(white, evaluate(&ctx, Color::Black, &config));
        // Only the knights can move: two squares each
        assert_eq!(white, 4 * config.knight_mobility_multiplier);
    }

    #[test]
    fn centralized_knight_is_more_mobile() {
        let config = HCEConfig::default();
        let score = |fen: &str| {
            let board: Board = fen.parse().unwrap();
            let position = Position::new(&board);
            let ctx = EvalContext::new(&position, 1.0);
            evaluate(&ctx, Color::White, &config)
        };
        assert!(score("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1") > score("4k3/8/8/8/8/8/8/N3K3 w - - 0 1"));
    }
}
