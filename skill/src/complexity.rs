use cozy_chess::Color;
use utils::Position;

use crate::bands::MIN_RATING;

/// More legal moves than this counts as a rich position.
pub const COMPLEX_MOVE_COUNT: usize = 30;

/// Combined non-pawn material (centipawns) above which the board counts as full.
pub const HIGH_MATERIAL: i32 = 850;

/// Signals that must hold at once for a position to count as complex.
const COMPLEX_SIGNALS: usize = 2;

const RATING_SPAN: f64 = 1870.0;
const OPENING_PLIES: f64 = 40.0;
const MIN_FACTOR: f64 = 0.3;

/// A position is complex when at least two of the four signals hold.
pub fn is_complex_position(
    move_count: usize,
    high_material: bool,
    king_danger: bool,
    pawn_near_promotion: bool,
) -> bool {
    let signals = [
        move_count > COMPLEX_MOVE_COUNT,
        high_material,
        king_danger,
        pawn_near_promotion,
    ];
    signals.iter().filter(|&&signal| signal).count() >= COMPLEX_SIGNALS
}

pub fn is_complex(position: &Position) -> bool {
    let material =
        position.non_pawn_material(Color::White) + position.non_pawn_material(Color::Black);
    let king_danger =
        position.king_in_danger(Color::White) || position.king_in_danger(Color::Black);

    is_complex_position(
        position.legal_move_count(),
        material > HIGH_MATERIAL,
        king_danger,
        position.pawn_near_promotion(),
    )
}

/// Damping factor for the gate: halved for quiet positions, shrinking with
/// rating and with the number of plies played.
pub fn adjusted_complexity_factor(rating: i32, position: &Position) -> f64 {
    let complexity = if is_complex(position) { 1.0 } else { 0.5 };
    let rating_factor = (1.0 - (rating - MIN_RATING) as f64 / RATING_SPAN).clamp(MIN_FACTOR, 1.0);
    let opening_factor = (1.0 - position.ply() as f64 / OPENING_PLIES).clamp(MIN_FACTOR, 1.0);
    complexity * rating_factor * opening_factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Board;

    #[test]
    fn needs_two_signals() {
        assert!(!is_complex_position(10, false, false, false));
        assert!(!is_complex_position(45, false, false, false));
        assert!(!is_complex_position(30, true, false, false));
        assert!(is_complex_position(31, true, false, false));
        assert!(is_complex_position(5, false, true, true));
        assert!(is_complex_position(40, true, true, true));
    }

    #[test]
    fn start_position_is_quiet() {
        // 20 moves and full material: only one signal
        let board = Board::default();
        assert!(!is_complex(&Position::new(&board)));
    }

    #[test]
    fn open_middlegame_with_many_moves_is_complex() {
        let board: Board = "r1bq1rk1/ppp2ppp/2np1n2/2b1p3/2B1P3/2NP1N2/PPP2PPP/R1BQ1RK1 w - - 0 7"
            .parse()
            .unwrap();
        let position = Position::new(&board);
        assert!(position.legal_move_count() > COMPLEX_MOVE_COUNT);
        assert!(is_complex(&position));
    }

    #[test]
    fn factor_bounds() {
        let board = Board::default();
        let position = Position::new(&board);
        // Quiet start position at the lowest rating: 0.5 * 1.0 * 1.0
        assert!((adjusted_complexity_factor(MIN_RATING, &position) - 0.5).abs() < 1e-12);
        // Top rating bottoms out the rating factor
        assert!((adjusted_complexity_factor(3190, &position) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn late_plies_bottom_out() {
        let board: Board = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 60".parse().unwrap();
        let position = Position::new(&board);
        let factor = adjusted_complexity_factor(MIN_RATING, &position);
        assert!((factor - 0.5 * MIN_FACTOR).abs() < 1e-12);
    }
}
