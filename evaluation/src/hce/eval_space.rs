use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::Color;

/// Squares we control that are not occupied by our own pieces.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    config.space_multiplier * ctx.position.space_for(color)
}
