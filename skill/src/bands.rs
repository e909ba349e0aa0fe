//! Rating bands and the tier tables derived from them.
//!
//! Both tables are ordered `(inclusive ceiling, label)` pairs searched with a
//! binary search, so every rating (even out of range) lands in exactly one entry.

pub const MIN_RATING: i32 = 1320;
pub const MAX_RATING: i32 = 3190;

pub const ABSOLUTE_BEGINNER_MAX: i32 = 1400;
pub const BEGINNER_MAX: i32 = 1999;
pub const INTERMEDIATE_MAX: i32 = 2199;
pub const ADVANCED_MAX: i32 = 2399;

/// Five-way split used by the error coefficient curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EloBand {
    AbsoluteBeginner,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

const BAND_CEILINGS: [(i32, EloBand); 5] = [
    (ABSOLUTE_BEGINNER_MAX, EloBand::AbsoluteBeginner),
    (BEGINNER_MAX, EloBand::Beginner),
    (INTERMEDIATE_MAX, EloBand::Intermediate),
    (ADVANCED_MAX, EloBand::Advanced),
    (MAX_RATING, EloBand::Expert),
];

/// Four-way split used by the gate and the error magnitudes. The absolute
/// beginner band folds into `Beginner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

const TIER_CEILINGS: [(i32, Tier); 4] = [
    (BEGINNER_MAX, Tier::Beginner),
    (INTERMEDIATE_MAX, Tier::Intermediate),
    (ADVANCED_MAX, Tier::Advanced),
    (MAX_RATING, Tier::Expert),
];

#[inline]
fn lookup<T: Copy, const N: usize>(table: &[(i32, T); N], rating: i32) -> T {
    let idx = table.partition_point(|&(ceiling, _)| ceiling < rating);
    table[idx.min(N - 1)].1
}

impl EloBand {
    pub fn classify(rating: i32) -> Self {
        lookup(&BAND_CEILINGS, rating)
    }

    /// Exclusive lower boundary, except the first band which starts at `MIN_RATING`.
    pub fn floor(self) -> i32 {
        match self {
            EloBand::AbsoluteBeginner => MIN_RATING,
            EloBand::Beginner => ABSOLUTE_BEGINNER_MAX,
            EloBand::Intermediate => BEGINNER_MAX,
            EloBand::Advanced => INTERMEDIATE_MAX,
            EloBand::Expert => ADVANCED_MAX,
        }
    }

    pub fn ceiling(self) -> i32 {
        match self {
            EloBand::AbsoluteBeginner => ABSOLUTE_BEGINNER_MAX,
            EloBand::Beginner => BEGINNER_MAX,
            EloBand::Intermediate => INTERMEDIATE_MAX,
            EloBand::Advanced => ADVANCED_MAX,
            EloBand::Expert => MAX_RATING,
        }
    }

    /// Width of the band's logistic decay.
    pub fn coefficient_scale(self) -> f64 {
        match self {
            EloBand::AbsoluteBeginner => 100.0,
            EloBand::Beginner => 150.0,
            EloBand::Intermediate => 200.0,
            EloBand::Advanced => 250.0,
            EloBand::Expert => 300.0,
        }
    }

    pub fn is_first(self) -> bool {
        self == EloBand::AbsoluteBeginner
    }
}

impl Tier {
    pub fn classify(rating: i32) -> Self {
        lookup(&TIER_CEILINGS, rating)
    }

    /// Inclusive range `[floor, ceiling]` the gate interpolates over.
    pub fn floor(self) -> i32 {
        match self {
            Tier::Beginner => MIN_RATING,
            Tier::Intermediate => BEGINNER_MAX + 1,
            Tier::Advanced => INTERMEDIATE_MAX + 1,
            Tier::Expert => ADVANCED_MAX + 1,
        }
    }

    pub fn ceiling(self) -> i32 {
        match self {
            Tier::Beginner => BEGINNER_MAX,
            Tier::Intermediate => INTERMEDIATE_MAX,
            Tier::Advanced => ADVANCED_MAX,
            Tier::Expert => MAX_RATING,
        }
    }

    pub fn gate_midpoint(self) -> f64 {
        (self.floor() + self.ceiling()) as f64 / 2.0
    }

    /// Gate thresholds in percent: `(base, minimum)`.
    pub fn thresholds(self) -> (i32, i32) {
        match self {
            Tier::Beginner => (99, 90),
            Tier::Intermediate => (98, 85),
            Tier::Advanced => (95, 75),
            Tier::Expert => (75, 55),
        }
    }

    /// Error magnitude bounds in centipawns before the coefficient is applied.
    pub fn error_range(self) -> (i32, i32) {
        match self {
            Tier::Beginner => (1500, 3000),
            Tier::Intermediate => (800, 2000),
            Tier::Advanced => (1000, 2300),
            Tier::Expert => (250, 500),
        }
    }

    /// Rating interval over which the error fades out. Unlike the gate range,
    /// consecutive intervals share their boundary.
    pub fn error_interval(self) -> (i32, i32) {
        match self {
            Tier::Beginner => (MIN_RATING, BEGINNER_MAX),
            Tier::Intermediate => (BEGINNER_MAX, INTERMEDIATE_MAX),
            Tier::Advanced => (INTERMEDIATE_MAX, ADVANCED_MAX),
            Tier::Expert => (ADVANCED_MAX, MAX_RATING),
        }
    }

    pub fn endgame_factor(self) -> f64 {
        match self {
            Tier::Beginner => 4.0,
            Tier::Intermediate => 3.2,
            Tier::Advanced => 2.3,
            Tier::Expert => 1.5,
        }
    }
}
