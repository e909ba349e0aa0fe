use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::{Color, Piece};
use utils::LIGHT_SQUARES;

/// Own pawns beyond this many on a bishop's colour make it "bad".
const TOLERATED_SAME_COLOR_PAWNS: u32 = 2;

/// Bad bishop: hemmed in by our own pawns on its square colour.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    let bishops = ctx.pieces(color, Piece::Bishop);
    if bishops.is_empty() {
        return 0;
    }

    let my_pawns = ctx.pieces(color, Piece::Pawn);
    let light_pawns = (my_pawns & LIGHT_SQUARES).len();
    let dark_pawns = my_pawns.len() - light_pawns;

    let mut cp = 0i16;
    for sq in bishops {
        let same_color = if LIGHT_SQUARES.has(sq) {
            light_pawns
        } else {
            dark_pawns
        };
        let excess = same_color.saturating_sub(TOLERATED_SAME_COLOR_PAWNS) as i16;
        cp -= config.bad_bishop_penalty * excess;
    }
    cp
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Board;
    use utils::Position;

    #[test]
    fn pawns_on_bishop_color_hurt() {
        let board: Board = "4k3/8/8/8/2P1P3/1P1P4/8/4KB2 w - - 0 1".parse().unwrap();
        let position = Position::new(&board);
        let ctx = EvalContext::new(&position, 1.0);
        let config = HCEConfig::default();
        // Bishop on f1 with b3, d3, c4 and e4 all on light squares
        assert_eq!(evaluate(&ctx, Color::White, &config), -2 * config.bad_bishop_penalty);
    }
}
