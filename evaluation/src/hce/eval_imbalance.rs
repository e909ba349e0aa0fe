use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::{Color, Piece};

#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    if ctx.pieces(color, Piece::Bishop).len() >= 2 {
        config.bishop_pair_bonus
    } else {
        0
    }
}
