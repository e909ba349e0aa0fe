use crate::avatar::{AvatarTerm, AvatarWeights};

/// One evaluation term split by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermTrace {
    pub term: AvatarTerm,
    pub white: i16,
    pub black: i16,
    /// White minus Black after the avatar weight.
    pub weighted: i16,
    pub mg_weight: u8,
    pub eg_weight: u8,
    pub enabled: bool,
}

/// Per-term breakdown of a static evaluation, from White's perspective.
///
/// The weighted terms plus `tempo` plus `material_cap` always add up to
/// `total`. The winnable row has no sides: its weighted value is the change
/// made by the winnable scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalTrace {
    pub terms: [TermTrace; AvatarTerm::NUM],
    pub phase: f32,
    pub tempo: i16,
    pub winnable_scale: f32,
    pub material_cap: i16,
    pub total: i16,
}

impl EvalTrace {
    pub(super) fn new(weights: &AvatarWeights, phase: f32) -> Self {
        let terms = AvatarTerm::ALL.map(|term| TermTrace {
            term,
            white: 0,
            black: 0,
            weighted: 0,
            mg_weight: weights.mg(term),
            eg_weight: weights.eg(term),
            enabled: false,
        });

        Self {
            terms,
            phase,
            tempo: 0,
            winnable_scale: 1.0,
            material_cap: 0,
            total: 0,
        }
    }

    pub fn term(&self, term: AvatarTerm) -> &TermTrace {
        &self.terms[term as usize]
    }

    pub(super) fn term_mut(&mut self, term: AvatarTerm) -> &mut TermTrace {
        &mut self.terms[term as usize]
    }

    /// Stores both sides of `term` and their weighted difference.
    pub(super) fn record(
        &mut self,
        term: AvatarTerm,
        [white, black]: [i16; 2],
        weights: &AvatarWeights,
    ) {
        let phase = self.phase;
        let row = self.term_mut(term);
        row.white = white;
        row.black = black;
        row.weighted = weights.scale(term, white - black, phase);
        row.enabled = true;
    }

    /// Sum of the weighted term rows.
    pub fn terms_sum(&self) -> i16 {
        self.terms.iter().map(|row| row.weighted).sum()
    }
}
