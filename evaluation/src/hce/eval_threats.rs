use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::Color;
use utils::{majors, minors};

/// Enemy pieces attacked by cheaper pieces of ours, plus pieces we keep defended.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    let board = ctx.board();
    let threats = ctx.position.threats_for(!color).len() as i16;

    let support = ctx.position.support_for(color);
    let supported_minors = (support & minors(board, color)).len() as i16;
    let supported_majors = (support & majors(board, color)).len() as i16;

    config.threats_multiplier * threats
        + config.supported_minor_bonus * supported_minors
        + config.supported_major_bonus * supported_majors
}
