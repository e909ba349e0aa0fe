use std::fmt;

use crate::traits::WinProbability;

pub const MAX_WIN_PROBABILITY: u8 = 100;

const MIN_MATERIAL: i32 = 17;
const MAX_MATERIAL: i32 = 78;

/// Material index the polynomial coefficients are normalized to.
const MATERIAL_NORM: f64 = 58.0;

// Logistic fit of game outcomes against centipawn score, parameterized by
// material. a(m) is the score at which win and draw are equally likely,
// b(m) the spread.
const AS: [f64; 4] = [-72.49, 189.89, -154.68, 195.27];
const BS: [f64; 4] = [29.97, -43.76, 22.06, 24.82];

/// Win/draw/loss per mille for a given score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wdl {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Wdl {
    /// Expected score in percent, rounded into a bucket.
    pub fn win_probability(&self) -> u8 {
        let expected = (self.win as f64 + self.draw as f64 / 2.0) / 10.0;
        expected.round().clamp(0.0, MAX_WIN_PROBABILITY as f64) as u8
    }
}

/// Material-aware win/draw/loss model.
#[derive(Debug, Clone, Copy, Default)]
pub struct WdlModel;

impl WdlModel {
    pub fn new() -> Self {
        Self
    }

    fn params(material: i32) -> (f64, f64) {
        let m = material.clamp(MIN_MATERIAL, MAX_MATERIAL) as f64 / MATERIAL_NORM;
        let a = ((AS[0] * m + AS[1]) * m + AS[2]) * m + AS[3];
        let b = ((BS[0] * m + BS[1]) * m + BS[2]) * m + BS[3];
        (a, b)
    }

    fn win_rate(value: i32, a: f64, b: f64) -> i32 {
        (1000.0 / (1.0 + ((a - value as f64) / b).exp())).round() as i32
    }

    pub fn wdl(&self, value: i32, material: i32) -> Wdl {
        let (a, b) = Self::params(material);
        let win = Self::win_rate(value, a, b);
        let loss = Self::win_rate(-value, a, b);
        Wdl {
            win,
            draw: 1000 - win - loss,
            loss,
        }
    }
}

impl WinProbability for WdlModel {
    #[inline]
    fn win_probability_by_material(&self, value: i32, material: i32) -> u8 {
        self.wdl(value, material).win_probability()
    }
}

/// Shashin zones over the win-probability scale, from the side to move's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Zone {
    HighPetrosian,
    HighMiddlePetrosian,
    MiddlePetrosian,
    MiddleLowPetrosian,
    LowPetrosian,
    CapablancaPetrosian,
    Capablanca,
    CapablancaTal,
    LowTal,
    MiddleLowTal,
    MiddleTal,
    HighMiddleTal,
    HighTal,
}

/// Inclusive upper bucket of each zone, ascending.
const ZONE_CEILINGS: [(u8, Zone); 13] = [
    (5, Zone::HighPetrosian),
    (10, Zone::HighMiddlePetrosian),
    (15, Zone::MiddlePetrosian),
    (20, Zone::MiddleLowPetrosian),
    (24, Zone::LowPetrosian),
    (49, Zone::CapablancaPetrosian),
    (50, Zone::Capablanca),
    (75, Zone::CapablancaTal),
    (79, Zone::LowTal),
    (84, Zone::MiddleLowTal),
    (89, Zone::MiddleTal),
    (94, Zone::HighMiddleTal),
    (MAX_WIN_PROBABILITY, Zone::HighTal),
];

impl Zone {
    pub fn from_win_probability(wp: u8) -> Self {
        let idx = ZONE_CEILINGS.partition_point(|&(ceiling, _)| ceiling < wp);
        ZONE_CEILINGS
            .get(idx)
            .map_or(Zone::HighTal, |&(_, zone)| zone)
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::HighPetrosian => "High Petrosian (Losing position)",
            Zone::HighMiddlePetrosian => "High-Middle Petrosian (Decisive disadvantage)",
            Zone::MiddlePetrosian => "Middle Petrosian (Clear disadvantage)",
            Zone::MiddleLowPetrosian => "Middle-Low Petrosian (Significant disadvantage)",
            Zone::LowPetrosian => "Low Petrosian (Slight disadvantage)",
            Zone::CapablancaPetrosian => {
                "Chaos: Capablanca-Petrosian (Balanced with opponent pressure)"
            }
            Zone::Capablanca => "Capablanca (Equal position)",
            Zone::CapablancaTal => "Chaos: Capablanca-Tal (Initiative)",
            Zone::LowTal => "Low Tal (Slight advantage)",
            Zone::MiddleLowTal => "Middle-Low Tal (Growing advantage)",
            Zone::MiddleTal => "Middle Tal (Clear advantage)",
            Zone::HighMiddleTal => "High-Middle Tal (Dominant position)",
            Zone::HighTal => "High Tal (Winning position)",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
