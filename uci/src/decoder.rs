use std::str::FromStr;

use cozy_chess::{util::parse_uci_move, Board};
use log::warn;

use super::commands::UciInput;

pub struct Decoder;

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &str) -> UciInput {
        match input {
            "uci" => UciInput::Uci,
            "isready" => UciInput::IsReady,
            "ucinewgame" => UciInput::UciNewGame,
            "eval" => UciInput::Eval,

            _ if input.starts_with("debug") => UciInput::Debug(input.ends_with(" on")),
            _ if input.starts_with("position") => self.decode_position(input),
            _ if input.starts_with("setoption") => self.decode_setoption(input),
            _ if input.starts_with("quit") => UciInput::Quit,

            _ => UciInput::Unknown(input.to_string()),
        }
    }

    fn decode_position(&self, input: &str) -> UciInput {
        let (setup, moves) = match input.split_once(" moves") {
            Some((setup, moves)) => (setup, moves),
            None => (input, ""),
        };

        let mut board = match setup.split_once("fen") {
            Some((_, fen)) => match Board::from_str(fen.trim()) {
                Ok(board) => board,
                Err(e) => {
                    warn!("Rejected FEN {:?}: {:?}", fen.trim(), e);
                    return UciInput::Unknown(input.to_string());
                }
            },
            None => Board::default(),
        };

        for mv_str in moves.split_whitespace() {
            match parse_uci_move(&board, mv_str) {
                Ok(mv) if board.is_legal(mv) => board.play_unchecked(mv),
                _ => {
                    warn!("Illegal move {:?}, ignoring the rest of the line", mv_str);
                    break;
                }
            }
        }

        UciInput::Position(Box::new(board))
    }

    fn decode_setoption(&self, input: &str) -> UciInput {
        // setoption name <name> [value <value>]
        let Some(rest) = input.strip_prefix("setoption name ") else {
            // Empty name is rejected by the option table
            return UciInput::SetOption {
                name: String::new(),
                value: String::new(),
            };
        };

        let (name, value) = match rest.split_once(" value ") {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (rest.trim(), ""),
        };

        UciInput::SetOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
