// Evaluation interfaces shared by the analyzer and the skill crate.
//
// The skill crate only needs a win-probability model, so it depends on the
// trait here rather than on a concrete evaluator.

use utils::Position;

/// Hand-crafted evaluation interface.
pub trait HCE: Send {
    /// Evaluate position from White's perspective. Positive = White advantage.
    fn evaluate(&mut self, position: &Position, phase: f32) -> i16;
}

/// Maps a centipawn value to a win-probability bucket in `0..=100`.
///
/// Values are from the perspective of the side to move. `material` is the
/// P + 3N + 3B + 5R + 9Q index; implementations clamp it as they see fit.
pub trait WinProbability: Send + Sync {
    fn win_probability_by_material(&self, value: i32, material: i32) -> u8;

    fn win_probability(&self, value: i32, position: &Position) -> u8 {
        self.win_probability_by_material(value, position.material())
    }
}
