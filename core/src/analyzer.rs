//! Static evaluation followed by rating-calibrated perturbation.

use std::fmt;

use cozy_chess::{util::display_uci_move, Board, Color, Move, Piece};
use evaluation::{
    AvatarTerm, AvatarWeights, EvalToggles, EvalTrace, Evaluator, TermTrace, WdlModel,
    WinProbability, Zone,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use skill::{is_complex, Handicap, SkillConfig};
use utils::{flip_eval_perspective, game_phase, has_insufficient_material, Position};

use crate::config::EngineConfig;

/// A value from the side to move's perspective with its win probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub value: i32,
    pub win_probability: u8,
    pub zone: Zone,
}

impl Assessment {
    fn new(value: i32, position: &Position, model: &impl WinProbability) -> Self {
        let win_probability = model.win_probability(value, position);
        Self {
            value,
            win_probability,
            zone: Zone::from_win_probability(win_probability),
        }
    }
}

/// Coarse stage of the game from the pieces left and the moves played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStage {
    Opening,
    TransitionToMiddlegame,
    Middlegame,
    TransitionToEndgame,
    Endgame,
}

impl GameStage {
    const UNIT_WEIGHTS: [(Piece, f32); 6] = [
        (Piece::King, 3.0),
        (Piece::Queen, 9.9),
        (Piece::Rook, 5.5),
        (Piece::Bishop, 3.5),
        (Piece::Knight, 3.1),
        (Piece::Pawn, 1.0),
    ];

    pub fn of(board: &Board) -> Self {
        let ply = (board.fullmove_number().saturating_sub(1) as u32) * 2
            + (board.side_to_move() == Color::Black) as u32;
        if ply == 0 {
            return GameStage::Opening;
        }

        let units = board.occupied().len() as f32;
        let weighted: f32 = Self::UNIT_WEIGHTS
            .iter()
            .map(|&(piece, weight)| board.pieces(piece).len() as f32 * weight)
            .sum();
        let index = units * weighted / (3.0 * ply as f32);

        if index < 5.0 {
            GameStage::Endgame
        } else if index < 10.0 {
            GameStage::TransitionToEndgame
        } else if index < 40.0 {
            GameStage::Middlegame
        } else if index < 50.0 {
            GameStage::TransitionToMiddlegame
        } else {
            GameStage::Opening
        }
    }
}

impl fmt::Display for GameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStage::Opening => "opening",
            GameStage::TransitionToMiddlegame => "transition to middlegame",
            GameStage::Middlegame => "middlegame",
            GameStage::TransitionToEndgame => "transition to endgame",
            GameStage::Endgame => "endgame",
        })
    }
}

/// A legal move with the static assessment of the position it leads to,
/// from the mover's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAssessment {
    pub uci: String,
    pub value: i32,
    pub win_probability: u8,
}

#[derive(Debug, Clone)]
pub struct Report {
    /// White's perspective, as the evaluator returns it.
    pub static_eval: i16,
    pub trace: EvalTrace,
    pub stage: GameStage,
    pub dead_draw: bool,
    pub custom_avatar: bool,
    pub objective: Assessment,
    pub perturbed: Option<Assessment>,
    pub complex: bool,
    pub toggles: EvalToggles,
    pub skill: SkillConfig,
    /// Best first: by win probability, then by value.
    pub moves: Vec<MoveAssessment>,
}

impl Report {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "static eval {} cp (white), phase {:.2}, {}",
                self.static_eval, self.trace.phase, self.stage
            ),
            format!(
                "side to move {} cp, win probability {}%, {}",
                self.objective.value, self.objective.win_probability, self.objective.zone
            ),
            format!(
                "complexity {}",
                if self.complex { "complex" } else { "simple" }
            ),
        ];

        if let Some(perturbed) = self.perturbed {
            lines.push(format!(
                "handicapped at {}: {} cp, win probability {}%, {}",
                self.skill.rating(),
                perturbed.value,
                perturbed.win_probability,
                perturbed.zone
            ));
        }

        lines.push(format!(
            "terms pawn structure {}, winnable {}, imbalances {}",
            on_off(self.toggles.pawn_structure),
            on_off(self.toggles.winnable),
            on_off(self.toggles.imbalances)
        ));
        lines.push(format!(
            "avatar {}",
            if self.custom_avatar { "custom weights" } else { "default weights" }
        ));
        if self.dead_draw {
            lines.push("draw by insufficient material".to_string());
        }

        lines.push(format!(
            "{:<14}{:>7}{:>7}{:>7}{:>5}{:>5}",
            "term", "white", "black", "total", "mg%", "eg%"
        ));
        lines.extend(self.trace.terms.iter().map(|row| self.term_line(row)));
        lines.push(format!("{:<28}{:>7}", "Tempo", self.trace.tempo));
        lines.push(format!("{:<28}{:>7}", "MaterialCap", self.trace.material_cap));
        lines.push(format!("{:<28}{:>7}", "Total", self.trace.total));

        lines.extend(self.move_lines());
        lines
    }

    fn term_line(&self, row: &TermTrace) -> String {
        let name = row.term.name();
        if !row.enabled {
            return format!(
                "{:<14}{:>7}{:>7}{:>7}{:>5}{:>5}",
                name, "-", "-", "off", row.mg_weight, row.eg_weight
            );
        }
        if row.term == AvatarTerm::Winnable {
            return format!(
                "{:<28}{:>7}{:>5}{:>5} scale {:.2}",
                name, row.weighted, row.mg_weight, row.eg_weight, self.trace.winnable_scale
            );
        }
        format!(
            "{:<14}{:>7}{:>7}{:>7}{:>5}{:>5}",
            name, row.white, row.black, row.weighted, row.mg_weight, row.eg_weight
        )
    }

    fn move_lines(&self) -> Vec<String> {
        let Some(best) = self.moves.first() else {
            return vec!["no legal moves".to_string()];
        };

        let listed: Vec<String> = self
            .moves
            .iter()
            .map(|m| format!("{}({}%/{})", m.uci, m.win_probability, m.value))
            .collect();
        vec![
            format!("moves {}", listed.join(", ")),
            format!(
                "best move {} (win probability {}%, {} cp)",
                best.uci, best.win_probability, best.value
            ),
        ]
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

pub struct Analyzer {
    evaluator: Evaluator,
    handicap: Handicap,
    avatar_file: String,
    rng: SmallRng,
}

impl Analyzer {
    pub fn new(config: &EngineConfig) -> Self {
        let handicap = Handicap::new(&config.skill_options(), WdlModel::new());

        let mut evaluator = Evaluator::default();
        evaluator.set_toggles(handicap.config().eval_toggles());
        evaluator.set_weights(AvatarWeights::from_option(&config.avatar_file.value));

        Self {
            evaluator,
            handicap,
            avatar_file: config.avatar_file.value.clone(),
            rng: SmallRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Applies changed options. The threshold table is kept; avatar weights
    /// are reloaded only when the file name changed.
    pub fn configure(&mut self, config: &EngineConfig) {
        self.handicap.reconfigure(&config.skill_options());
        self.evaluator
            .set_toggles(self.handicap.config().eval_toggles());

        if config.avatar_file.value != self.avatar_file {
            self.avatar_file = config.avatar_file.value.clone();
            self.evaluator
                .set_weights(AvatarWeights::from_option(&self.avatar_file));
        }
    }

    pub fn new_game(&mut self) {
        self.evaluator.new_game();
    }

    pub fn evaluate(&mut self, board: &Board) -> Report {
        let position = Position::new(board);
        let trace = self.evaluator.trace(&position, game_phase(board));
        let static_eval = trace.total;
        let value = flip_eval_perspective(board, static_eval as i32);

        let model = self.handicap.model();
        let objective = Assessment::new(value, &position, model);

        let skill = self.handicap.config();
        let perturbed = skill.simulate_blunders().then(|| {
            let handicapped = self
                .handicap
                .perturbed_value(&position, value, &mut self.rng);
            Assessment::new(handicapped, &position, self.handicap.model())
        });

        Report {
            static_eval,
            trace,
            stage: GameStage::of(board),
            dead_draw: has_insufficient_material(board),
            custom_avatar: !self.evaluator.weights().is_default(),
            objective,
            perturbed,
            complex: is_complex(&position),
            toggles: self.evaluator.toggles(),
            skill,
            moves: self.assess_moves(board),
        }
    }

    /// Statically assesses every legal move, best first.
    fn assess_moves(&mut self, board: &Board) -> Vec<MoveAssessment> {
        let mut legal: Vec<Move> = Vec::new();
        board.generate_moves(|moves| {
            legal.extend(moves);
            false
        });

        let mut assessed: Vec<MoveAssessment> = legal
            .into_iter()
            .map(|mv| {
                let mut child = board.clone();
                child.play_unchecked(mv);
                let position = Position::new(&child);
                let after = self.evaluator.trace(&position, game_phase(&child)).total;
                let value = -flip_eval_perspective(&child, after as i32);

                MoveAssessment {
                    uci: display_uci_move(board, mv).to_string(),
                    value,
                    win_probability: self.handicap.model().win_probability(value, &position),
                }
            })
            .collect();

        assessed.sort_by(|a, b| {
            b.win_probability
                .cmp(&a.win_probability)
                .then(b.value.cmp(&a.value))
        });
        assessed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIDDLEGAME: &str = "r4rk1/pp3ppp/2n5/3p4/3P4/2N5/PP3PPP/R4RK1 b - - 0 20";

    fn configured(options: &[(&str, &str)]) -> EngineConfig {
        let mut config = EngineConfig::default();
        for (name, value) in options {
            config.update_from_uci(name, value).unwrap();
        }
        config
    }

    #[test]
    fn full_strength_reports_no_perturbation() {
        let mut analyzer = Analyzer::new(&EngineConfig::default()).with_seed(1);
        let board = Board::default();
        let report = analyzer.evaluate(&board);

        assert!(report.perturbed.is_none());
        assert_eq!(report.toggles, EvalToggles::default());
        assert_eq!(report.objective.value, report.static_eval as i32);
    }

    #[test]
    fn value_is_side_relative() {
        let mut analyzer = Analyzer::new(&EngineConfig::default()).with_seed(1);
        let board: Board = MIDDLEGAME.parse().unwrap();
        let report = analyzer.evaluate(&board);
        assert_eq!(report.objective.value, -(report.static_eval as i32));
    }

    #[test]
    fn limit_strength_alone_only_switches_terms() {
        let config = configured(&[("UCI_LimitStrength", "true"), ("UCI_Elo", "1500")]);
        let mut analyzer = Analyzer::new(&config).with_seed(2);
        let board: Board = MIDDLEGAME.parse().unwrap();
        let report = analyzer.evaluate(&board);

        assert!(report.perturbed.is_none());
        assert!(!report.toggles.pawn_structure);
        assert!(!report.toggles.imbalances);
    }

    #[test]
    fn simulated_blunders_perturb_weak_play() {
        let config = configured(&[
            ("UCI_LimitStrength", "true"),
            ("UCI_Elo", "1320"),
            ("Simulate Human Blunders", "true"),
        ]);
        let mut analyzer = Analyzer::new(&config).with_seed(3);
        let board: Board = MIDDLEGAME.parse().unwrap();

        let changed = (0..200)
            .filter(|_| {
                let report = analyzer.evaluate(&board);
                let perturbed = report.perturbed.unwrap();
                perturbed.value != report.objective.value
            })
            .count();
        assert!(changed > 100, "changed {changed}");
    }

    #[test]
    fn configure_follows_the_options() {
        let mut analyzer = Analyzer::new(&EngineConfig::default()).with_seed(4);
        analyzer.configure(&configured(&[("UCI_LimitStrength", "true"), ("UCI_Elo", "2300")]));

        let report = analyzer.evaluate(&Board::default());
        assert_eq!(report.skill.rating(), 2300);
        assert!(report.toggles.winnable && !report.toggles.imbalances);
    }

    #[test]
    fn report_lists_the_handicap() {
        let config = configured(&[
            ("UCI_LimitStrength", "true"),
            ("Simulate Human Blunders", "true"),
        ]);
        let mut analyzer = Analyzer::new(&config).with_seed(5);
        let lines = analyzer.evaluate(&Board::default()).lines();
        assert_eq!(lines[3].split(':').next(), Some("handicapped at 1320"));
        assert!(lines.iter().any(|line| line == "avatar default weights"));
    }

    #[test]
    fn trace_terms_sum_to_static_eval() {
        let mut analyzer = Analyzer::new(&EngineConfig::default()).with_seed(6);
        for fen in [MIDDLEGAME, "4k3/8/8/1P6/8/8/8/4K3 w - - 0 40"] {
            let board: Board = fen.parse().unwrap();
            let report = analyzer.evaluate(&board);
            let trace = &report.trace;
            assert_eq!(
                trace.terms_sum() + trace.tempo + trace.material_cap,
                report.static_eval,
                "{fen}"
            );
        }
    }

    #[test]
    fn report_prints_a_row_per_term() {
        let config = configured(&[("UCI_LimitStrength", "true"), ("UCI_Elo", "1500")]);
        let mut analyzer = Analyzer::new(&config).with_seed(7);
        let report = analyzer.evaluate(&MIDDLEGAME.parse().unwrap());
        let lines = report.lines();
        assert!(!report.trace.term(AvatarTerm::PawnStructure).enabled);

        for term in AvatarTerm::ALL {
            let row = lines
                .iter()
                .find(|line| line.split_whitespace().next() == Some(term.name()))
                .unwrap();
            assert_eq!(row.contains("off"), !report.trace.term(term).enabled, "{row}");
        }
        assert!(lines.iter().any(|line| line.starts_with("Total")));
    }

    #[test]
    fn game_stage_follows_material_and_moves() {
        assert_eq!(GameStage::of(&Board::default()), GameStage::Opening);
        let late: Board = "4k3/8/8/1P6/8/8/8/4K3 w - - 0 40".parse().unwrap();
        assert_eq!(GameStage::of(&late), GameStage::Endgame);
        let middlegame: Board = MIDDLEGAME.parse().unwrap();
        assert_eq!(GameStage::of(&middlegame), GameStage::TransitionToEndgame);
    }

    #[test]
    fn dead_draws_are_flagged() {
        let mut analyzer = Analyzer::new(&EngineConfig::default()).with_seed(8);
        let board: Board = "k1b5/8/8/8/8/8/8/KB6 w - - 0 1".parse().unwrap();
        let report = analyzer.evaluate(&board);
        assert!(report.dead_draw);
        assert!(report.lines().iter().any(|line| line == "draw by insufficient material"));

        assert!(!analyzer.evaluate(&Board::default()).dead_draw);
    }

    #[test]
    fn legal_moves_are_sorted_best_first() {
        let mut analyzer = Analyzer::new(&EngineConfig::default()).with_seed(9);
        let report = analyzer.evaluate(&Board::default());
        assert_eq!(report.moves.len(), 20);
        for pair in report.moves.windows(2) {
            assert!(
                (pair[0].win_probability, pair[0].value) >= (pair[1].win_probability, pair[1].value)
            );
        }

        // Black hangs the queen; taking it tops the list
        let board: Board = "rnb1kbnr/pppp1ppp/8/4p3/4P2q/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
            .parse()
            .unwrap();
        let report = analyzer.evaluate(&board);
        assert_eq!(report.moves[0].uci, "f3h4");
        assert!(report.lines().iter().any(|line| line.starts_with("best move f3h4")));
    }

    #[test]
    fn checkmate_has_no_moves() {
        let mut analyzer = Analyzer::new(&EngineConfig::default()).with_seed(10);
        let mated: Board = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        let report = analyzer.evaluate(&mated);
        assert!(report.moves.is_empty());
        assert_eq!(report.lines().last().map(String::as_str), Some("no legal moves"));
    }
}
