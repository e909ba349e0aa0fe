//! UCI application - reads commands, keeps the current position and answers
//! `eval` requests through the analyzer.

use std::io::BufRead;
use std::sync::mpsc::Sender;

use cozy_chess::Board;
use log::{debug, LevelFilter};
use uci::{Decoder, UciConnection, UciInput, UciOutput};

use crate::analyzer::Analyzer;
use crate::config::EngineConfig;

const ENGINE_NAME: &str = "Mentor";
const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
const ENGINE_AUTHOR: &str = "Mentor developers";

pub struct Mentor {
    config: EngineConfig,
    analyzer: Analyzer,
    board: Board,
    connection: UciConnection,
    output: Sender<UciOutput>,
}

impl Mentor {
    pub fn new() -> Self {
        let connection = UciConnection::new();
        let output = connection.output_sender();

        let config = EngineConfig::default();
        let analyzer = Analyzer::new(&config);

        Self {
            config,
            analyzer,
            board: Board::default(),
            connection,
            output,
        }
    }

    /// Runs the UCI protocol loop until quit or end of input.
    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.send_greeting();

        let decoder = Decoder::new();
        let stdin = std::io::stdin();

        for line in stdin.lock().lines() {
            let line = line?;
            debug!("Input: {:?}", line.trim());

            let input = decoder.decode(line.trim());
            if !self.handle(input) {
                break;
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Handles a single UCI input. Returns false if we should quit.
    fn handle(&mut self, input: UciInput) -> bool {
        match input {
            UciInput::Uci => {
                let _ = self.output.send(UciOutput::IdName(format!(
                    "{} {}",
                    ENGINE_NAME, ENGINE_VERSION
                )));
                let _ = self
                    .output
                    .send(UciOutput::IdAuthor(ENGINE_AUTHOR.to_string()));
                let _ = self.config.to_uci(&self.output);
                let _ = self.output.send(UciOutput::UciOk);
            }
            UciInput::IsReady => {
                let _ = self.output.send(UciOutput::ReadyOk);
            }
            UciInput::Debug(on) => {
                log::set_max_level(if on {
                    LevelFilter::Debug
                } else {
                    LevelFilter::Info
                });
            }
            UciInput::SetOption { name, value } => {
                if let Err(e) = self.config.update_from_uci(&name, &value) {
                    debug!("Option setting failed: {}", e);
                } else {
                    debug!("Set option '{}' to '{}'", name, value);
                    self.analyzer.configure(&self.config);
                }
            }
            UciInput::UciNewGame => {
                self.board = Board::default();
                self.analyzer.new_game();
            }
            UciInput::Position(board) => {
                self.board = *board;
            }
            UciInput::Eval => {
                let report = self.analyzer.evaluate(&self.board);
                for line in report.lines() {
                    let _ = self.output.send(UciOutput::Info(line));
                }
            }
            UciInput::Quit => return false,
            UciInput::Unknown(line) => debug!("Unknown command: {}", line),
        }
        true
    }

    fn send_greeting(&self) {
        let _ = self.output.send(UciOutput::Raw(format!(
            "{} {} by {}",
            ENGINE_NAME, ENGINE_VERSION, ENGINE_AUTHOR
        )));
    }

    fn shutdown(self) {
        drop(self.output);
        self.connection.close();
    }
}
