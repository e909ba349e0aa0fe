use crate::bands::EloBand;

/// Widens every band's decay relative to its nominal scale.
const SCALE_STRETCH: f64 = 1.2;

/// Standard logistic, rising from 0 to 1.
#[inline]
pub(crate) fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// The band's own falling sigmoid, 0.5 at the band floor.
#[inline]
fn band_decay(rating: i32, band: EloBand) -> f64 {
    let x = (rating - band.floor()) as f64 / (band.coefficient_scale() * SCALE_STRETCH);
    logistic(-x)
}

/// How much of the tier's error range a rating receives, in `(0, 1]`.
///
/// Each band decays along its own sigmoid. Bands after the first are anchored to
/// the value reached at their floor, so the curve is continuous and never rises
/// with rating.
pub fn error_coefficient(rating: i32) -> f64 {
    let band = EloBand::classify(rating);
    let decay = band_decay(rating, band);
    if band.is_first() {
        return decay;
    }
    // band_decay is 0.5 at the floor; doubling it there reproduces the anchor
    error_coefficient(band.floor()) * 2.0 * decay
}

/// Ply at which the opening (or the middlegame) ends for a given rating,
/// growing in steps of 200 points and clamped to `[10, 75]`.
pub fn dynamic_phase_limit(rating: i32, is_opening: bool) -> i32 {
    let steps = (rating - 1400) / 200;
    let limit = if is_opening {
        10 + steps * 5
    } else {
        30 + steps * 10
    };
    limit.clamp(10, 75)
}
