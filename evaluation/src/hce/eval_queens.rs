use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::{Color, Piece, Rank, Square};

/// Minor pieces still at home that make an early queen sortie premature.
const UNDEVELOPED_MINORS: u32 = 2;

/// Penalizes a queen that left home while the minors are still undeveloped.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    if ctx.phase <= 0.5 {
        return 0;
    }
    let queens = ctx.pieces(color, Piece::Queen);
    if queens.is_empty() || queens.has(Square::D1.relative_to(color)) {
        return 0;
    }

    let back_rank = Rank::First.relative_to(color).bitboard();
    let home_minors =
        (ctx.pieces(color, Piece::Knight) | ctx.pieces(color, Piece::Bishop)) & back_rank;
    if home_minors.len() >= UNDEVELOPED_MINORS {
        -ctx.mg(config.early_queen_penalty)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Board;
    use utils::Position;

    #[test]
    fn early_queen_sortie() {
        let board: Board = "rnb1kbnr/pppp1ppp/8/4p3/4P2q/8/PPPP1PPP/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        let position = Position::new(&board);
        let ctx = EvalContext::new(&position, 1.0);
        let config = HCEConfig::default();
        assert_eq!(evaluate(&ctx, Color::Black, &config), -config.early_queen_penalty);
        assert_eq!(evaluate(&ctx, Color::White, &config), 0);
    }
}
