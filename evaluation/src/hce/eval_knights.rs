use super::eval_pawns::PASSED_PAWN_MASKS;
use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::{get_pawn_attacks, Color, Piece, Rank};

/// Knight outposts: ranks four to six, defended by a pawn and out of reach of
/// enemy pawns.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    let knights = ctx.pieces(color, Piece::Knight);
    if knights.is_empty() {
        return 0;
    }

    let my_pawns = ctx.pieces(color, Piece::Pawn);
    let enemy_pawns = ctx.pieces(!color, Piece::Pawn);
    let outpost_ranks = Rank::Fourth.relative_to(color).bitboard()
        | Rank::Fifth.relative_to(color).bitboard()
        | Rank::Sixth.relative_to(color).bitboard();

    let mut cp = 0i16;
    for sq in knights & outpost_ranks {
        // Squares our pawns would defend `sq` from
        let defended = !(get_pawn_attacks(sq, !color) & my_pawns).is_empty();
        let attackers = PASSED_PAWN_MASKS[color as usize][sq as usize] & sq.file().adjacent();
        if defended && (attackers & enemy_pawns).is_empty() {
            cp += config.knight_outpost_bonus;
        }
    }
    cp
}
