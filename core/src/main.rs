mod analyzer;
mod app;
mod args;
mod config;
mod sample;

use app::Mentor;
use args::{Args, Command};
use clap::Parser;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use std::error::Error;
use std::fs::File;

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    match &args.command {
        Some(Command::Sample(sample_args)) => sample::run(sample_args),
        None => Mentor::new().run(),
    }
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(log_file)?,
        )?;
    }

    Ok(args)
}
