use evaluation::EvalToggles;

use crate::bands::{ADVANCED_MAX, BEGINNER_MAX, INTERMEDIATE_MAX, MAX_RATING, MIN_RATING};

/// Raw option values as the front end received them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillOptions {
    pub limit_strength: bool,
    pub elo: i32,
    pub simulate_blunders: bool,
    pub handicapped_depth: bool,
}

impl Default for SkillOptions {
    fn default() -> Self {
        Self {
            limit_strength: false,
            elo: MIN_RATING,
            simulate_blunders: false,
            handicapped_depth: false,
        }
    }
}

/// Resolved skill settings. Immutable once built; replace it wholesale to
/// change strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillConfig {
    limit_strength: bool,
    rating: i32,
    pawn_structure: bool,
    winnable: bool,
    imbalances: bool,
    simulate_blunders: bool,
    handicapped_depth: bool,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self::from_options(&SkillOptions::default())
    }
}

impl SkillConfig {
    /// Without a strength limit the rating is pinned to `MAX_RATING` and every
    /// evaluation term stays on. With one, terms switch on as the rating
    /// passes each band.
    pub fn from_options(options: &SkillOptions) -> Self {
        let limit = options.limit_strength;
        let rating = if limit {
            options.elo.clamp(MIN_RATING, MAX_RATING)
        } else {
            MAX_RATING
        };

        Self {
            limit_strength: limit,
            rating,
            pawn_structure: !limit || rating > BEGINNER_MAX,
            winnable: !limit || rating > INTERMEDIATE_MAX,
            imbalances: !limit || rating > ADVANCED_MAX,
            simulate_blunders: limit && options.simulate_blunders,
            handicapped_depth: options.handicapped_depth,
        }
    }

    pub fn limit_strength(&self) -> bool {
        self.limit_strength
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn pawn_structure(&self) -> bool {
        self.pawn_structure
    }

    pub fn winnable(&self) -> bool {
        self.winnable
    }

    pub fn imbalances(&self) -> bool {
        self.imbalances
    }

    pub fn simulate_blunders(&self) -> bool {
        self.simulate_blunders
    }

    pub fn handicapped_depth(&self) -> bool {
        self.handicapped_depth
    }

    pub fn eval_toggles(&self) -> EvalToggles {
        EvalToggles {
            pawn_structure: self.pawn_structure,
            winnable: self.winnable,
            imbalances: self.imbalances,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limited(elo: i32) -> SkillConfig {
        SkillConfig::from_options(&SkillOptions {
            limit_strength: true,
            elo,
            simulate_blunders: true,
            handicapped_depth: false,
        })
    }

    #[test]
    fn unlimited_means_full_strength() {
        let config = SkillConfig::from_options(&SkillOptions {
            limit_strength: false,
            elo: 1500,
            simulate_blunders: true,
            handicapped_depth: true,
        });
        assert_eq!(config.rating(), MAX_RATING);
        assert_eq!(config.eval_toggles(), EvalToggles::default());
        assert!(!config.simulate_blunders());
        assert!(config.handicapped_depth());
    }

    #[test]
    fn terms_unlock_with_rating() {
        let beginner = limited(1500);
        assert!(!beginner.pawn_structure() && !beginner.winnable() && !beginner.imbalances());

        let intermediate = limited(2000);
        assert!(intermediate.pawn_structure() && !intermediate.winnable());

        let advanced = limited(2200);
        assert!(advanced.winnable() && !advanced.imbalances());

        let expert = limited(2400);
        assert_eq!(expert.eval_toggles(), EvalToggles::default());
        assert!(expert.simulate_blunders());
    }

    #[test]
    fn boundaries_stay_locked() {
        assert!(!limited(BEGINNER_MAX).pawn_structure());
        assert!(!limited(INTERMEDIATE_MAX).winnable());
        assert!(!limited(ADVANCED_MAX).imbalances());
    }

    #[test]
    fn rating_is_clamped() {
        assert_eq!(limited(100).rating(), MIN_RATING);
        assert_eq!(limited(9000).rating(), MAX_RATING);
    }
}
