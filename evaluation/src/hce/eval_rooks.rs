use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::{Color, Piece, Rank};

#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    let rooks = ctx.pieces(color, Piece::Rook);
    if rooks.is_empty() {
        return 0;
    }

    let our_pawns = ctx.pieces(color, Piece::Pawn);
    let their_pawns = ctx.pieces(!color, Piece::Pawn);
    let seventh = Rank::Seventh.relative_to(color);

    let mut cp = 0i16;
    for sq in rooks {
        let file = sq.file().bitboard();

        cp += match (
            (our_pawns & file).is_empty(),
            (their_pawns & file).is_empty(),
        ) {
            (true, true) => config.rook_open_file_bonus,
            (true, false) => config.rook_semi_open_file_bonus,
            _ => 0,
        };

        if sq.rank() == seventh {
            cp += config.rook_seventh_rank_bonus;
        }
    }
    cp
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Board;
    use utils::Position;

    fn rook_score(fen: &str, color: Color) -> i16 {
        let board: Board = fen.parse().unwrap();
        let position = Position::new(&board);
        let ctx = EvalContext::new(&position, 1.0);
        evaluate(&ctx, color, &HCEConfig::default())
    }

    #[test]
    fn open_and_semi_open_files() {
        let config = HCEConfig::default();
        assert_eq!(
            rook_score("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", Color::White),
            config.rook_open_file_bonus
        );
        assert_eq!(
            rook_score("4k3/p7/8/8/8/8/8/R3K3 w - - 0 1", Color::White),
            config.rook_semi_open_file_bonus
        );
        assert_eq!(rook_score("4k3/p7/8/8/8/8/P7/R3K3 w - - 0 1", Color::White), 0);
    }

    #[test]
    fn rook_on_the_seventh() {
        let config = HCEConfig::default();
        assert_eq!(
            rook_score("4k3/8/8/8/8/8/r7/4K3 w - - 0 1", Color::Black),
            config.rook_open_file_bonus + config.rook_seventh_rank_bonus
        );
    }
}
