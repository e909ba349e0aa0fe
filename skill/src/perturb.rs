use evaluation::WinProbability;
use rand::Rng;
use utils::Position;

use crate::bands::Tier;
use crate::coefficient::{dynamic_phase_limit, error_coefficient, logistic};
use crate::complexity::is_complex;
use crate::thresholds::ThresholdTable;

/// Error growth in complex positions.
pub const COMPLEX_POSITION_MULTIPLIER: f64 = 1.2;

/// Below this rating a blunder is more likely to flatter the position.
pub const IMPROVE_RATING_CUTOFF: i32 = 1600;
/// Percent chance that the error improves the evaluation, below and above the cutoff.
pub const WEAK_IMPROVE_CHANCE: i32 = 15;
pub const IMPROVE_CHANCE: i32 = 5;

/// Width of the sigmoid that fades the error out across a tier.
const PROGRESS_TRANSITION: f64 = 50.0;

/// Uniform integer in `[lo, hi]`; a degenerate range yields `lo`.
#[inline]
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Unsigned error size for this rating and position, in centipawns.
pub fn error_magnitude<R: Rng + ?Sized>(rating: i32, position: &Position, rng: &mut R) -> i32 {
    let tier = Tier::classify(rating);

    let (min_error, max_error) = tier.error_range();
    let (elo_min, elo_max) = tier.error_interval();
    let progress =
        logistic((rating as f64 - (elo_min + elo_max) as f64 / 2.0) / PROGRESS_TRANSITION);
    let coefficient = error_coefficient(rating) * (1.0 - progress);

    let mut magnitude = sample_range(
        rng,
        (min_error as f64 * coefficient) as i32,
        (max_error as f64 * coefficient) as i32,
    );

    if is_complex(position) {
        magnitude = (magnitude as f64 * COMPLEX_POSITION_MULTIPLIER) as i32;
    }

    let ply = position.ply();
    if ply < dynamic_phase_limit(rating, true) {
        magnitude += sample_range(rng, -magnitude / 3, magnitude / 3);
    } else if ply <= dynamic_phase_limit(rating, false) {
        magnitude += sample_range(rng, -magnitude / 4, magnitude / 4);
    } else {
        magnitude -= sample_range(rng, -magnitude / 3, magnitude / 3);
        magnitude = (magnitude as f64 * tier.endgame_factor()) as i32;
    }

    magnitude
}

/// Applies a rating-sized error to `base` (side to move's perspective) and
/// keeps the result within one zone of the bucket it lands in.
pub fn handicap_value<M, R>(
    base: i32,
    rating: i32,
    position: &Position,
    model: &M,
    table: &ThresholdTable,
    rng: &mut R,
) -> i32
where
    M: WinProbability + ?Sized,
    R: Rng + ?Sized,
{
    let magnitude = error_magnitude(rating, position, rng);

    let improve_chance = if rating < IMPROVE_RATING_CUTOFF {
        WEAK_IMPROVE_CHANCE
    } else {
        IMPROVE_CHANCE
    };
    let improves = sample_range(rng, 0, 99) < improve_chance;

    let value = if improves {
        base + magnitude
    } else {
        base - magnitude
    };

    let wp = model.win_probability(value, position);
    table.clamp(value, wp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::{MAX_RATING, MIN_RATING};
    use crate::thresholds::ThresholdEntry;
    use cozy_chess::Board;
    use evaluation::WdlModel;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const OPENING: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
    const ENDGAME: &str = "8/5k2/8/3p4/3P4/8/5K2/8 w - - 0 50";

    fn mean_magnitude(rating: i32, fen: &str) -> f64 {
        let board: Board = fen.parse().unwrap();
        let position = Position::new(&board);
        let mut rng = SmallRng::seed_from_u64(11);
        let total: i64 = (0..2000)
            .map(|_| error_magnitude(rating, &position, &mut rng) as i64)
            .sum();
        total as f64 / 2000.0
    }

    #[test]
    fn degenerate_range_is_deterministic() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(sample_range(&mut rng, 5, 5), 5);
        assert_eq!(sample_range(&mut rng, 9, 3), 9);
        for _ in 0..100 {
            let v = sample_range(&mut rng, -3, 3);
            assert!((-3..=3).contains(&v));
        }
    }

    #[test]
    fn magnitude_is_never_negative() {
        let mut rng = SmallRng::seed_from_u64(3);
        for fen in [OPENING, ENDGAME] {
            let board: Board = fen.parse().unwrap();
            let position = Position::new(&board);
            for rating in [MIN_RATING, 1500, 1800, 2100, 2300, 2700, MAX_RATING] {
                for _ in 0..50 {
                    assert!(error_magnitude(rating, &position, &mut rng) >= 0);
                }
            }
        }
    }

    #[test]
    fn weaker_ratings_err_more() {
        assert!(mean_magnitude(MIN_RATING, OPENING) > mean_magnitude(1800, OPENING));
        assert!(mean_magnitude(1800, OPENING) > mean_magnitude(2700, OPENING));
    }

    #[test]
    fn endgames_amplify_the_error() {
        assert!(mean_magnitude(MIN_RATING, ENDGAME) > mean_magnitude(MIN_RATING, OPENING));
    }

    #[test]
    fn output_respects_the_entry() {
        let board: Board = OPENING.parse().unwrap();
        let position = Position::new(&board);
        let table = ThresholdTable::uniform(ThresholdEntry {
            min_value: -60,
            max_value: 60,
        });
        let model = WdlModel::new();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..500 {
            let value = handicap_value(0, MIN_RATING, &position, &model, &table, &mut rng);
            assert!((-60..=60).contains(&value));
        }
    }

    #[test]
    fn mostly_worsens_the_evaluation() {
        let board: Board = OPENING.parse().unwrap();
        let position = Position::new(&board);
        let model = WdlModel::new();
        let table = ThresholdTable::empty();
        let mut rng = SmallRng::seed_from_u64(9);
        let worse = (0..2000)
            .filter(|_| handicap_value(0, MIN_RATING, &position, &model, &table, &mut rng) < 0)
            .count();
        // 85% of the errors go against the side to move
        assert!(worse > 1500, "worse {worse}");
    }
}
