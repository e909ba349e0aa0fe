use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "Mentor")]
#[command(author = "Mentor developers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Log UCI communication to a file for debugging.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Measure how often and how far evaluations are perturbed per rating.
    Sample(SampleArgs),
}

#[derive(ClapArgs, Debug)]
pub struct SampleArgs {
    /// Ratings to sample, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = [1320, 1700, 2100, 2500, 3190])]
    pub ratings: Vec<i32>,

    /// Perturbation calls per rating.
    #[arg(long, default_value_t = 10_000)]
    pub samples: usize,

    /// Position to sample; defaults to a quiet middlegame.
    #[arg(long)]
    pub fen: Option<String>,

    /// Base seed; each worker mixes in its index.
    #[arg(long)]
    pub seed: Option<u64>,
}
