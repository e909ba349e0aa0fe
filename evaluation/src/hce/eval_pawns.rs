use super::HCEConfig;
use crate::hce::context::EvalContext;
use arrayvec::ArrayVec;
use cozy_chess::{get_pawn_attacks, BitBoard, Color, File, Piece, Rank, Square};

/// Doubled, isolated, backward and central pawns.
pub(super) fn structure(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    let my_pawns = ctx.pieces(color, Piece::Pawn);
    if my_pawns.is_empty() {
        return 0;
    }
    let enemy_pawns = ctx.pieces(!color, Piece::Pawn);

    let mut score = 0i16;

    for file in File::ALL {
        let count = (my_pawns & file.bitboard()).len();
        if count == 0 {
            continue;
        }

        match count {
            1 => {}
            2 => score -= config.doubled_pawn_penalty,
            _ => score -= config.tripled_pawn_penalty,
        }

        if (my_pawns & file.adjacent()).is_empty() {
            score -= config.isolated_pawn_penalty;
        }
    }

    for sq in my_pawns {
        if is_backward_pawn(sq, color, my_pawns, enemy_pawns) {
            score -= config.backward_pawn_penalty;
            if (enemy_pawns & sq.file().bitboard()).is_empty() {
                score -= config.backward_pawn_half_open_penalty;
            }
        }
    }

    // Pawns on both central files; mostly an opening concern
    if !(my_pawns & File::D.bitboard()).is_empty() && !(my_pawns & File::E.bitboard()).is_empty() {
        score += ctx.mg(config.center_pawn_bonus);
    }

    score
}

/// Passed pawns, with diminishing returns for each additional one.
pub(super) fn passed(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i16 {
    let my_pawns = ctx.pieces(color, Piece::Pawn);
    if my_pawns.is_empty() {
        return 0;
    }
    let enemy_pawns = ctx.pieces(!color, Piece::Pawn);

    let mut bonuses = ArrayVec::<i16, 8>::new();
    for sq in my_pawns {
        if !(enemy_pawns & PASSED_PAWN_MASKS[color as usize][sq as usize]).is_empty() {
            continue;
        }
        let steps = sq.rank().relative_to(color) as i16 - 1;
        if steps > 0 {
            let bonus = config.passed_pawn_linear * steps + config.passed_pawn_quadratic * steps * steps;
            let _ = bonuses.try_push(bonus);
        }
    }

    bonuses.sort_unstable_by(|a, b| b.cmp(a));
    bonuses
        .iter()
        .enumerate()
        .map(|(idx, bonus)| bonus / (idx as i16 + 1))
        .sum()
}

// https://www.chessprogramming.org/Backward_Pawn
// No friendly pawn on an adjacent file is level with or behind it, and an enemy
// pawn controls its stop square.
fn is_backward_pawn(sq: Square, color: Color, my_pawns: BitBoard, enemy_pawns: BitBoard) -> bool {
    let neighbours = my_pawns & sq.file().adjacent();
    if neighbours.is_empty() {
        // Isolated, handled separately
        return false;
    }

    let rank = sq.rank().relative_to(color) as usize;
    let supported = neighbours
        .into_iter()
        .any(|pawn| pawn.rank().relative_to(color) as usize <= rank);
    if supported || rank >= 7 {
        return false;
    }

    let stop_rank = Rank::index(rank + 1).relative_to(color);
    let stop = Square::new(sq.file(), stop_rank);
    !(get_pawn_attacks(stop, color) & enemy_pawns).is_empty()
}

/// Pre-computed passed-pawn masks: [color][square].
pub const PASSED_PAWN_MASKS: [[BitBoard; 64]; 2] = {
    let mut table = [[BitBoard::EMPTY; 64]; 2];
    let mut idx = 0;
    while idx < 64 {
        let file = (idx % 8) as i8;
        let rank = (idx / 8) as i8;
        table[Color::White as usize][idx] = BitBoard(front_span(rank, file, 1));
        table[Color::Black as usize][idx] = BitBoard(front_span(rank, file, -1));
        idx += 1;
    }
    table
};

/// Squares on the pawn's file and both neighbours, strictly ahead of it.
const fn front_span(mut rank: i8, file: i8, step: i8) -> u64 {
    let mut mask = 0u64;
    rank += step;
    while rank >= 0 && rank < 8 {
        let mut f = file - 1;
        while f <= file + 1 {
            if f >= 0 && f < 8 {
                mask |= 1u64 << ((rank as u64) * 8 + f as u64);
            }
            f += 1;
        }
        rank += step;
    }
    mask
}
