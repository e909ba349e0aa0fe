use rand::Rng;
use utils::Position;

use crate::bands::Tier;
use crate::coefficient::logistic;
use crate::complexity::adjusted_complexity_factor;
use crate::thresholds::{MAX_MATERIAL, MIN_MATERIAL};

/// Width of the sigmoid that slides the threshold across a tier.
const GATE_TRANSITION: f64 = 50.0;

/// Decides whether this position gets perturbed at all.
///
/// The chance starts near the tier's base threshold and slides toward its
/// minimum as the rating climbs through the tier; complex, early or
/// material-rich positions lower it further, never below the minimum.
pub fn should_perturb<R: Rng + ?Sized>(rating: i32, position: &Position, rng: &mut R) -> bool {
    let tier = Tier::classify(rating);
    if rating == tier.ceiling() {
        return false;
    }

    let (base, minimum) = tier.thresholds();
    let t = logistic((rating as f64 - tier.gate_midpoint()) / GATE_TRANSITION);
    let sliding = (base as f64 * (1.0 - t) + minimum as f64 * t) as i32;

    let complexity_adjustment = (adjusted_complexity_factor(rating, position) * 10.0) as i32;
    let material = position.material().clamp(MIN_MATERIAL, MAX_MATERIAL);
    let material_adjustment = (material - MIN_MATERIAL) / 6;

    let threshold = minimum.max(sliding - complexity_adjustment - material_adjustment);
    rng.gen_range(0..=100) < threshold
}
