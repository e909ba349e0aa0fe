//! Offline sampler: how often, and by how much, each rating perturbs the
//! evaluation of one position.

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use cozy_chess::Board;
use evaluation::{Evaluator, WdlModel, HCE};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use skill::{Handicap, SkillOptions, ThresholdTable};
use utils::{flip_eval_perspective, game_phase, Position};

use crate::args::SampleArgs;

const DEFAULT_FEN: &str = "r4rk1/pp3ppp/2n5/3p4/3P4/2N5/PP3PPP/R4RK1 w - - 0 20";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    samples: u64,
    applied: u64,
    abs_error: u64,
}

impl Tally {
    fn record(&mut self, base: i32, value: i32) {
        self.samples += 1;
        if value != base {
            self.applied += 1;
            self.abs_error += value.abs_diff(base) as u64;
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            samples: self.samples + other.samples,
            applied: self.applied + other.applied,
            abs_error: self.abs_error + other.abs_error,
        }
    }

    fn application_rate(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.applied as f64 / self.samples as f64
    }

    /// Over all samples, unperturbed ones counting as zero.
    fn mean_abs_error(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.abs_error as f64 / self.samples as f64
    }
}

pub fn run(args: &SampleArgs) -> Result<(), Box<dyn Error>> {
    let fen = args.fen.as_deref().unwrap_or(DEFAULT_FEN);
    let board: Board = fen
        .parse()
        .map_err(|e| format!("Invalid FEN {:?}: {:?}", fen, e))?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let base = objective_value(&board);
    println!("Position: {}", fen);
    println!("Objective value: {} cp (side to move), seed {}\n", base, seed);

    let model = WdlModel::new();
    let table = Arc::new(ThresholdTable::build(&model));

    let bar = ProgressBar::new(args.ratings.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {pos}/{len} [{wide_bar:.cyan/blue}] {elapsed_precise} | {msg}")?,
    );

    let start = Instant::now();
    let mut results = Vec::with_capacity(args.ratings.len());
    for &rating in &args.ratings {
        bar.set_message(format!("elo {}", rating));

        let options = SkillOptions {
            limit_strength: true,
            elo: rating,
            simulate_blunders: true,
            handicapped_depth: false,
        };
        let handicap = Handicap::with_table(&options, model, Arc::clone(&table));
        let tally = sample_rating(&handicap, &board, base, args.samples, seed);

        info!(
            "elo {}: {} of {} perturbed, mean |error| {:.1}",
            rating,
            tally.applied,
            tally.samples,
            tally.mean_abs_error()
        );
        results.push((handicap.config().rating(), tally));
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("{:>6} {:>9} {:>12}", "elo", "applied", "mean |err|");
    for (rating, tally) in &results {
        println!(
            "{:>6} {:>8.1}% {:>12.1}",
            rating,
            tally.application_rate() * 100.0,
            tally.mean_abs_error()
        );
    }
    println!("\nSampled in {:.2?}", start.elapsed());

    Ok(())
}

/// Full-strength static evaluation from the side to move's perspective.
fn objective_value(board: &Board) -> i32 {
    let position = Position::new(board);
    let mut evaluator = Evaluator::default();
    let score = evaluator.evaluate(&position, game_phase(board));
    flip_eval_perspective(board, score as i32)
}

/// Splits `samples` calls across the rayon pool. Each worker seeds its own
/// generator with `seed ^ worker`, so a run is reproducible for a fixed seed
/// and thread count.
fn sample_rating(
    handicap: &Handicap,
    board: &Board,
    base: i32,
    samples: usize,
    seed: u64,
) -> Tally {
    let workers = rayon::current_num_threads().clamp(1, samples.max(1));

    (0..workers)
        .into_par_iter()
        .map(|worker| {
            let share = samples / workers + usize::from(worker < samples % workers);
            let position = Position::new(board);
            let mut rng = SmallRng::seed_from_u64(seed ^ worker as u64);

            let mut tally = Tally::default();
            for _ in 0..share {
                let value = handicap.perturbed_value(&position, base, &mut rng);
                tally.record(base, value);
            }
            tally
        })
        .reduce(Tally::default, Tally::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill::{MAX_RATING, MIN_RATING};

    fn handicap(elo: i32) -> Handicap {
        let options = SkillOptions {
            limit_strength: true,
            elo,
            simulate_blunders: true,
            handicapped_depth: false,
        };
        Handicap::with_table(&options, WdlModel::new(), Arc::new(ThresholdTable::empty()))
    }

    #[test]
    fn every_sample_is_counted() {
        let board: Board = DEFAULT_FEN.parse().unwrap();
        let tally = sample_rating(&handicap(1700), &board, 20, 1001, 9);
        assert_eq!(tally.samples, 1001);
        assert!(tally.applied <= tally.samples);
    }

    #[test]
    fn same_seed_same_tally() {
        let board: Board = DEFAULT_FEN.parse().unwrap();
        let handicap = handicap(1900);
        assert_eq!(
            sample_rating(&handicap, &board, 0, 2000, 42),
            sample_rating(&handicap, &board, 0, 2000, 42)
        );
    }

    #[test]
    fn weakest_rating_errs_most() {
        let board: Board = DEFAULT_FEN.parse().unwrap();
        let weak = sample_rating(&handicap(MIN_RATING), &board, 0, 4000, 1);
        let strong = sample_rating(&handicap(MAX_RATING), &board, 0, 4000, 1);

        assert!(weak.application_rate() > 0.8);
        assert_eq!(strong.applied, 0);
        assert!(weak.mean_abs_error() > strong.mean_abs_error());
    }

    #[test]
    fn empty_tally_reports_zero() {
        let tally = Tally::default();
        assert_eq!(tally.application_rate(), 0.0);
        assert_eq!(tally.mean_abs_error(), 0.0);
    }
}
