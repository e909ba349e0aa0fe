use std::fs;
use std::io;
use std::path::Path;

use ahash::AHashMap;

pub const MAX_WEIGHT: u8 = 100;

/// Evaluation term groups that an avatar can reweight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarTerm {
    Material,
    Imbalance,
    PawnStructure,
    Knight,
    Bishop,
    Rook,
    Queen,
    Mobility,
    KingSafety,
    Threats,
    PassedPawns,
    Space,
    Winnable,
}

impl AvatarTerm {
    pub const NUM: usize = 13;

    pub const ALL: [AvatarTerm; Self::NUM] = [
        AvatarTerm::Material,
        AvatarTerm::Imbalance,
        AvatarTerm::PawnStructure,
        AvatarTerm::Knight,
        AvatarTerm::Bishop,
        AvatarTerm::Rook,
        AvatarTerm::Queen,
        AvatarTerm::Mobility,
        AvatarTerm::KingSafety,
        AvatarTerm::Threats,
        AvatarTerm::PassedPawns,
        AvatarTerm::Space,
        AvatarTerm::Winnable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AvatarTerm::Material => "Material",
            AvatarTerm::Imbalance => "Imbalance",
            AvatarTerm::PawnStructure => "PawnStructure",
            AvatarTerm::Knight => "Knight",
            AvatarTerm::Bishop => "Bishop",
            AvatarTerm::Rook => "Rook",
            AvatarTerm::Queen => "Queen",
            AvatarTerm::Mobility => "Mobility",
            AvatarTerm::KingSafety => "KingSafety",
            AvatarTerm::Threats => "Threats",
            AvatarTerm::PassedPawns => "PassedPawns",
            AvatarTerm::Space => "Space",
            AvatarTerm::Winnable => "Winnable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Middlegame,
    Endgame,
}

/// Percentage weights per term for middlegame and endgame, 100 = unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarWeights {
    mg: [u8; AvatarTerm::NUM],
    eg: [u8; AvatarTerm::NUM],
}

impl Default for AvatarWeights {
    fn default() -> Self {
        Self {
            mg: [MAX_WEIGHT; AvatarTerm::NUM],
            eg: [MAX_WEIGHT; AvatarTerm::NUM],
        }
    }
}

impl AvatarWeights {
    pub fn mg(&self, term: AvatarTerm) -> u8 {
        self.mg[term as usize]
    }

    pub fn eg(&self, term: AvatarTerm) -> u8 {
        self.eg[term as usize]
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Weight of `term` at `phase` as a fraction, 1.0 = unchanged.
    #[inline(always)]
    pub fn factor(&self, term: AvatarTerm, phase: f32) -> f32 {
        let idx = term as usize;
        (self.mg[idx] as f32 * phase + self.eg[idx] as f32 * (1.0 - phase)) / MAX_WEIGHT as f32
    }

    #[inline(always)]
    pub fn scale(&self, term: AvatarTerm, score: i16, phase: f32) -> i16 {
        let idx = term as usize;
        if self.mg[idx] == MAX_WEIGHT && self.eg[idx] == MAX_WEIGHT {
            return score;
        }
        (score as f32 * self.factor(term, phase)).round() as i16
    }

    /// Reads weights from `path`; terms missing from the file keep their defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Loads the avatar named by a UCI option, falling back to defaults when the
    /// name is empty or the file cannot be read.
    pub fn from_option(file_name: &str) -> Self {
        if file_name.trim().is_empty() {
            log::debug!("Avatar file name is empty, using default weights");
            return Self::default();
        }

        match Self::load(Path::new(file_name)) {
            Ok(weights) => {
                log::info!("Avatar file {} loaded", file_name);
                weights
            }
            Err(e) => {
                log::warn!("Unable to open avatar file {}: {}", file_name, e);
                Self::default()
            }
        }
    }

    /// Parses `Name(mg)=N` / `Name(eg)=N` lines. Blank lines and `#` comments are
    /// ignored, names are case-insensitive and values must be within `0..=100`.
    pub fn parse(contents: &str) -> Self {
        let keys = Self::keys();
        let mut weights = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());

            let weight = match value.parse::<i32>() {
                Ok(v) if (0..=MAX_WEIGHT as i32).contains(&v) => v as u8,
                Ok(_) => {
                    log::warn!("Avatar option '{}' has a value out of range: {}", name, value);
                    continue;
                }
                Err(_) => {
                    log::warn!("Avatar option '{}' contains an invalid number: {}", name, value);
                    continue;
                }
            };

            match keys.get(&name.to_ascii_lowercase()) {
                Some(&(term, Stage::Middlegame)) => weights.mg[term as usize] = weight,
                Some(&(term, Stage::Endgame)) => weights.eg[term as usize] = weight,
                None => log::warn!("Unknown avatar option '{}'", name),
            }
        }

        weights
    }

    fn keys() -> AHashMap<String, (AvatarTerm, Stage)> {
        let mut keys = AHashMap::with_capacity(AvatarTerm::NUM * 2);
        for term in AvatarTerm::ALL {
            let name = term.name().to_ascii_lowercase();
            keys.insert(format!("{}(mg)", name), (term, Stage::Middlegame));
            keys.insert(format!("{}(eg)", name), (term, Stage::Endgame));
        }
        keys
    }
}
