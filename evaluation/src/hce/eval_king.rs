use super::HCEConfig;
use crate::hce::context::EvalContext;
use cozy_chess::{
    get_bishop_moves, get_knight_moves, get_pawn_attacks, get_rook_moves, BitBoard, Color, Piece,
    Rank, Square,
};

// Shelter and exposure dominate the middlegame; activity takes over in the endgame.
#[inline(always)]
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    let king = ctx.board().king(color);
    let mut cp = 0i16;
    cp += pawn_shield(ctx, color, king, config);
    cp += file_exposure(ctx, color, king, config);
    cp += ring_pressure(ctx, color, king, config);
    cp += central_king(ctx, color, king, config);
    cp += endgame_activity(ctx, king, config);
    cp
}

// Our pawns in the king's three-file window, one and two ranks ahead of the back rank.
#[inline(always)]
fn pawn_shield(ctx: &EvalContext, color: Color, king: Square, config: &HCEConfig) -> i16 {
    let pawns = ctx.pieces(color, Piece::Pawn) & files_window(king);
    let near = (pawns & Rank::Second.relative_to(color).bitboard()).len() as i16;
    let far = (pawns & Rank::Third.relative_to(color).bitboard()).len() as i16;
    ctx.mg(near * config.king_shield_r1_bonus + far * config.king_shield_r2_bonus)
}

#[inline(always)]
fn file_exposure(ctx: &EvalContext, color: Color, king: Square, config: &HCEConfig) -> i16 {
    let window = files_window(king);
    let ours = (ctx.pieces(color, Piece::Pawn) & window).len();
    let theirs = (ctx.pieces(!color, Piece::Pawn) & window).len();
    let penalty = match (ours, theirs) {
        (0, 0) => config.king_open_file_penalty,
        (0, _) => config.king_semi_open_file_penalty,
        (1, _) => config.king_thin_cover_penalty,
        _ => 0,
    };
    -ctx.mg(penalty)
}

// Enemy attacks into a radius-two zone around the king, weighted by attacker.
#[inline(always)]
fn ring_pressure(ctx: &EvalContext, color: Color, king: Square, config: &HCEConfig) -> i16 {
    let enemy = !color;
    let occupied = ctx.board().occupied();
    let zone = KING_ZONES[king as usize];

    let hits = |attacks: BitBoard, weight: i16| weight * (attacks & zone).len() as i16;

    let mut pressure = 0i16;
    for sq in ctx.pieces(enemy, Piece::Knight) {
        pressure += hits(get_knight_moves(sq), config.king_pressure_knight);
    }
    for sq in ctx.pieces(enemy, Piece::Bishop) {
        pressure += hits(get_bishop_moves(sq, occupied), config.king_pressure_bishop);
    }
    for sq in ctx.pieces(enemy, Piece::Rook) {
        pressure += hits(get_rook_moves(sq, occupied), config.king_pressure_rook);
    }
    for sq in ctx.pieces(enemy, Piece::Queen) {
        let attacks = get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied);
        pressure += hits(attacks, config.king_pressure_queen);
    }
    for sq in ctx.pieces(enemy, Piece::Pawn) {
        pressure += hits(get_pawn_attacks(sq, enemy), config.king_pressure_pawn);
    }

    -ctx.mg(pressure)
}

// A king still on the c-f files of its first two ranks once the middlegame starts.
#[inline(always)]
fn central_king(ctx: &EvalContext, color: Color, king: Square, config: &HCEConfig) -> i16 {
    if ctx.phase <= 0.5 {
        return 0;
    }
    let file = king.file() as usize;
    let rank = king.rank().relative_to(color) as usize;
    if (2..=5).contains(&file) && rank <= 1 {
        -((config.king_central_penalty as f32 * ctx.phase) as i16)
    } else {
        0
    }
}

// Reward proximity to the four centre squares once the board has thinned out.
#[inline(always)]
fn endgame_activity(ctx: &EvalContext, king: Square, config: &HCEConfig) -> i16 {
    if ctx.phase >= 0.4 {
        return 0;
    }
    let file = king.file() as i16;
    let rank = king.rank() as i16;
    let centre_distance = (file - 3).abs().min((file - 4).abs()) + (rank - 3).abs().min((rank - 4).abs());
    ((config.king_activity_bonus - centre_distance) as f32 * 2.0 * ctx.inv_phase).round() as i16
}

#[inline(always)]
fn files_window(king: Square) -> BitBoard {
    let file = king.file();
    file.bitboard() | file.adjacent()
}

const KING_ZONE_RADIUS: i8 = 2;
const KING_ZONES: [BitBoard; 64] = {
    let mut zones = [BitBoard::EMPTY; 64];
    let mut i = 0;
    while i < 64 {
        let king_file = (i % 8) as i8;
        let king_rank = (i / 8) as i8;

        let mut mask = 0u64;
        let mut dr = -KING_ZONE_RADIUS;
        while dr <= KING_ZONE_RADIUS {
            let mut df = -KING_ZONE_RADIUS;
            while df <= KING_ZONE_RADIUS {
                let f = king_file + df;
                let r = king_rank + dr;
                if f >= 0 && f < 8 && r >= 0 && r < 8 {
                    mask |= 1u64 << (r * 8 + f) as u64;
                }
                df += 1;
            }
            dr += 1;
        }
        zones[i] = BitBoard(mask);
        i += 1;
    }
    zones
};
