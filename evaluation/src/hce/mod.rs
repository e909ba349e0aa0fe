mod config;
mod context;
mod eval_bishops;
mod eval_imbalance;
mod eval_king;
mod eval_knights;
mod eval_material;
mod eval_mobility;
mod eval_pawns;
mod eval_queens;
mod eval_rooks;
mod eval_space;
mod eval_threats;
mod eval_winnable;
mod pawn_cache;
mod trace;

pub use config::{EvalToggles, HCEConfig};
use context::EvalContext;
use pawn_cache::{PawnCache, PawnScores};
pub use trace::{EvalTrace, TermTrace};

use crate::avatar::{AvatarTerm, AvatarWeights};
use crate::piece_values::PieceValues;
use crate::traits::HCE;
use cozy_chess::Color;
use utils::{cap_eval_by_material, Position};

/// A term evaluated for White and for Black.
#[inline(always)]
fn per_side(term: impl Fn(Color) -> i16) -> [i16; 2] {
    [term(Color::White), term(Color::Black)]
}

pub struct Evaluator {
    piece_values: PieceValues,
    config: HCEConfig,
    toggles: EvalToggles,
    weights: AvatarWeights,
    pawn_cache: PawnCache,
}

impl Evaluator {
    pub fn new(piece_values: PieceValues, config: HCEConfig) -> Self {
        Self {
            piece_values,
            config,
            toggles: EvalToggles::default(),
            weights: AvatarWeights::default(),
            pawn_cache: PawnCache::new(),
        }
    }

    pub fn toggles(&self) -> EvalToggles {
        self.toggles
    }

    pub fn set_toggles(&mut self, toggles: EvalToggles) {
        self.toggles = toggles;
    }

    pub fn weights(&self) -> &AvatarWeights {
        &self.weights
    }

    pub fn set_weights(&mut self, weights: AvatarWeights) {
        self.weights = weights;
    }

    pub fn new_game(&mut self) {
        self.pawn_cache.clear();
    }

    /// Evaluates `position` from White's perspective, keeping every term.
    pub fn trace(&mut self, position: &Position, phase: f32) -> EvalTrace {
        let ctx = EvalContext::new(position, phase);
        let board = position.board;
        let config = self.config;
        let weights = self.weights;

        let mut trace = EvalTrace::new(&weights, phase);

        trace.record(
            AvatarTerm::Material,
            per_side(|c| eval_material::evaluate(&ctx, c, &self.piece_values)),
            &weights,
        );

        if self.toggles.pawn_structure {
            let pawns = self.pawn_scores(&ctx);
            trace.record(AvatarTerm::PawnStructure, pawns.structure, &weights);
            trace.record(AvatarTerm::PassedPawns, pawns.passed, &weights);
        }

        if self.toggles.imbalances {
            trace.record(
                AvatarTerm::Imbalance,
                per_side(|c| eval_imbalance::evaluate(&ctx, c, &config)),
                &weights,
            );
        }

        trace.record(
            AvatarTerm::Knight,
            per_side(|c| eval_knights::evaluate(&ctx, c, &config)),
            &weights,
        );
        trace.record(
            AvatarTerm::Bishop,
            per_side(|c| eval_bishops::evaluate(&ctx, c, &config)),
            &weights,
        );
        trace.record(
            AvatarTerm::Rook,
            per_side(|c| eval_rooks::evaluate(&ctx, c, &config)),
            &weights,
        );
        trace.record(
            AvatarTerm::Queen,
            per_side(|c| eval_queens::evaluate(&ctx, c, &config)),
            &weights,
        );
        trace.record(
            AvatarTerm::Mobility,
            per_side(|c| eval_mobility::evaluate(&ctx, c, &config)),
            &weights,
        );
        trace.record(
            AvatarTerm::KingSafety,
            per_side(|c| eval_king::evaluate(&ctx, c, &config)),
            &weights,
        );
        trace.record(
            AvatarTerm::Threats,
            per_side(|c| eval_threats::evaluate(&ctx, c, &config)),
            &weights,
        );
        trace.record(
            AvatarTerm::Space,
            per_side(|c| eval_space::evaluate(&ctx, c, &config)),
            &weights,
        );

        // Tempo bonus
        trace.tempo = if board.side_to_move() == Color::White {
            config.tempo_bonus
        } else {
            -config.tempo_bonus
        };

        let unscaled = trace.terms_sum() + trace.tempo;
        let mut cp = unscaled;

        if self.toggles.winnable {
            // A zero weight disables the scaling, full weight applies it as is
            let scale = eval_winnable::scale_factor(board, phase);
            let strength = weights.factor(AvatarTerm::Winnable, phase);
            let effective = 1.0 - (1.0 - scale) * strength;
            cp = (cp as f32 * effective).round() as i16;

            trace.winnable_scale = effective;
            let row = trace.term_mut(AvatarTerm::Winnable);
            row.weighted = cp - unscaled;
            row.enabled = true;
        }

        trace.total = cap_eval_by_material(board, cp);
        trace.material_cap = trace.total - cp;
        trace
    }

    fn pawn_scores(&mut self, ctx: &EvalContext) -> PawnScores {
        if let Some(scores) = self.pawn_cache.get(ctx) {
            return scores;
        }
        let scores = PawnScores {
            structure: per_side(|c| eval_pawns::structure(ctx, c, &self.config)),
            passed: per_side(|c| eval_pawns::passed(ctx, c, &self.config)),
        };
        self.pawn_cache.set(ctx, scores);
        scores
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(PieceValues::default(), HCEConfig::default())
    }
}

impl HCE for Evaluator {
    fn evaluate(&mut self, position: &Position, phase: f32) -> i16 {
        self.trace(position, phase).total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Board;
    use utils::game_phase;

    fn eval_with(evaluator: &mut Evaluator, fen: &str) -> i16 {
        let board: Board = fen.parse().unwrap();
        let position = Position::new(&board);
        evaluator.evaluate(&position, game_phase(&board))
    }

    #[test]
    fn start_position_is_tempo_only() {
        let mut evaluator = Evaluator::default();
        let tempo = HCEConfig::default().tempo_bonus;
        assert_eq!(
            eval_with(&mut evaluator, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            tempo
        );
        assert_eq!(
            eval_with(&mut evaluator, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"),
            -tempo
        );
    }

    #[test]
    fn extra_queen_is_winning() {
        let mut evaluator = Evaluator::default();
        let score = eval_with(&mut evaluator, "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(score > 800);
    }

    #[test]
    fn lone_minor_cannot_be_winning() {
        let mut evaluator = Evaluator::default();
        assert!(eval_with(&mut evaluator, "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1") <= 0);
    }

    #[test]
    fn disabling_imbalances_drops_bishop_pair() {
        // White keeps the bishop pair, Black has bishop and knight
        let fen = "2b1kn2/pppppppp/8/8/8/8/PPPPPPPP/2B1KB2 w - - 0 1";

        let mut with_pair = Evaluator::default();
        let mut without_pair = Evaluator::default();
        without_pair.set_toggles(EvalToggles {
            imbalances: false,
            ..EvalToggles::default()
        });

        let diff = eval_with(&mut with_pair, fen) - eval_with(&mut without_pair, fen);
        assert_eq!(diff, HCEConfig::default().bishop_pair_bonus);
    }

    #[test]
    fn avatar_weights_scale_terms() {
        let fen = "4k3/8/8/1P6/8/8/8/4K3 w - - 0 1";
        let mut plain = Evaluator::default();
        let mut ignores_passers = Evaluator::default();
        ignores_passers.set_weights(AvatarWeights::parse("PassedPawns(mg)=0\nPassedPawns(eg)=0\n"));
        assert!(eval_with(&mut plain, fen) > eval_with(&mut ignores_passers, fen));
    }

    #[test]
    fn pawn_cache_is_consistent() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut evaluator = Evaluator::default();
        let first = eval_with(&mut evaluator, fen);
        let second = eval_with(&mut evaluator, fen);
        assert_eq!(first, second);
    }

    #[test]
    fn pawn_cache_tracks_phase() {
        // Same pawns, queens traded
        let with_queens = "rnbqkbnr/ppp2ppp/8/3pp3/3PP3/8/PPP2PPP/RNBQKBNR w KQkq - 0 3";
        let without = "rnb1kbnr/ppp2ppp/8/3pp3/3PP3/8/PPP2PPP/RNB1KBNR w KQkq - 0 5";

        let mut warm = Evaluator::default();
        eval_with(&mut warm, with_queens);
        let mut cold = Evaluator::default();
        assert_eq!(eval_with(&mut warm, without), eval_with(&mut cold, without));
    }

    fn trace_of(evaluator: &mut Evaluator, fen: &str) -> EvalTrace {
        let board: Board = fen.parse().unwrap();
        let position = Position::new(&board);
        evaluator.trace(&position, game_phase(&board))
    }

    #[test]
    fn trace_rows_add_up_to_the_total() {
        let fens = [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "4k3/8/8/1P6/8/8/8/4K3 b - - 0 1",
            // White cannot mate, so the cap applies
            "k7/p7/8/8/8/8/8/KB6 w - - 0 1",
        ];
        let mut evaluator = Evaluator::default();
        for fen in fens {
            let trace = trace_of(&mut evaluator, fen);
            assert_eq!(
                trace.terms_sum() + trace.tempo + trace.material_cap,
                trace.total,
                "{fen}"
            );
            assert_eq!(trace.total, eval_with(&mut evaluator, fen), "{fen}");
        }
    }

    #[test]
    fn trace_splits_material_by_side() {
        let mut evaluator = Evaluator::default();
        let trace = trace_of(
            &mut evaluator,
            "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        );
        let material = trace.term(AvatarTerm::Material);
        assert!(material.enabled);
        assert!(material.white > material.black);
        assert_eq!(material.weighted, material.white - material.black);
        assert_eq!((material.mg_weight, material.eg_weight), (100, 100));
    }

    #[test]
    fn toggled_off_terms_are_marked() {
        let mut evaluator = Evaluator::default();
        evaluator.set_toggles(EvalToggles {
            pawn_structure: false,
            winnable: false,
            imbalances: false,
        });
        let trace = trace_of(&mut evaluator, "4k3/8/8/1P6/8/8/8/4K3 w - - 0 1");

        for term in [
            AvatarTerm::PawnStructure,
            AvatarTerm::PassedPawns,
            AvatarTerm::Imbalance,
            AvatarTerm::Winnable,
        ] {
            let row = trace.term(term);
            assert!(!row.enabled, "{}", term.name());
            assert_eq!(row.weighted, 0);
        }
        assert_eq!(trace.winnable_scale, 1.0);
        assert!(trace.term(AvatarTerm::Space).enabled);
    }
}
