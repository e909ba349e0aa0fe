//! Rating-calibrated evaluation noise.
//!
//! [`Handicap`] turns an objective evaluation into one a player of a given
//! rating might plausibly hold: a gate decides whether to err at all, the error
//! size follows the rating band, game phase and position complexity, and a
//! precomputed threshold table keeps the result within one Shashin zone of
//! where it landed.
//!
//! Randomness is always supplied by the caller, so each worker can own a
//! seeded generator and share one `Handicap` by reference.

pub mod bands;
pub mod coefficient;
pub mod complexity;
mod config;
pub mod gate;
pub mod perturb;
pub mod thresholds;

use std::sync::Arc;

use evaluation::{WdlModel, WinProbability};
use rand::Rng;
use utils::Position;

pub use bands::{EloBand, Tier, MAX_RATING, MIN_RATING};
pub use complexity::{adjusted_complexity_factor, is_complex, is_complex_position};
pub use config::{SkillConfig, SkillOptions};
pub use thresholds::{ThresholdEntry, ThresholdTable};

pub struct Handicap<M: WinProbability = WdlModel> {
    config: SkillConfig,
    model: M,
    table: Arc<ThresholdTable>,
}

impl<M: WinProbability> Handicap<M> {
    /// Resolves the options and builds the threshold table for `model`.
    pub fn new(options: &SkillOptions, model: M) -> Self {
        let table = Arc::new(ThresholdTable::build(&model));
        Self::with_table(options, model, table)
    }

    /// Reuses a table built earlier for the same model.
    pub fn with_table(options: &SkillOptions, model: M, table: Arc<ThresholdTable>) -> Self {
        let config = SkillConfig::from_options(options);
        log::debug!("Skill configuration: {:?}", config);
        Self {
            config,
            model,
            table,
        }
    }

    /// Swaps in a new configuration. The table does not depend on the rating
    /// and is kept.
    pub fn reconfigure(&mut self, options: &SkillOptions) {
        self.config = SkillConfig::from_options(options);
        log::debug!("Skill configuration: {:?}", self.config);
    }

    pub fn config(&self) -> SkillConfig {
        self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn table(&self) -> &Arc<ThresholdTable> {
        &self.table
    }

    /// `base` is from the side to move's perspective. Returned unchanged at
    /// full strength or when the gate declines.
    pub fn perturbed_value<R: Rng + ?Sized>(
        &self,
        position: &Position,
        base: i32,
        rng: &mut R,
    ) -> i32 {
        if !self.config.limit_strength() {
            return base;
        }

        let rating = self.config.rating();
        if !gate::should_perturb(rating, position, rng) {
            return base;
        }

        perturb::handicap_value(base, rating, position, &self.model, &self.table, rng)
    }
}
