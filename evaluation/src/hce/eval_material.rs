use cozy_chess::Color;

use crate::hce::context::EvalContext;
use crate::piece_values::PieceValues;

#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, piece_values: &PieceValues) -> i16 {
    piece_values.side_material(ctx.board(), color, ctx.phase)
}
