use cozy_chess::Board;

#[derive(Debug)]
pub enum UciInput {
    Uci,
    IsReady,
    Debug(bool),

    UciNewGame,
    Position(Box<Board>),

    // Non-standard: report the static and perturbed evaluation of the
    // current position.
    Eval,

    Quit,
    SetOption {
        name: String,
        value: String,
    },
    Unknown(String),
}

#[derive(Debug)]
pub enum UciOutput {
    IdName(String),
    IdAuthor(String),
    UciOk,
    ReadyOk,
    /// Free-form text for the GUI, sent as `info string`.
    Info(String),
    Option(String),
    Raw(String),
}
