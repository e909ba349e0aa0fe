pub mod avatar;
pub mod hce;
mod piece_values;
mod traits;
pub mod wdl;

pub use avatar::{AvatarTerm, AvatarWeights};
pub use hce::{EvalTrace, EvalToggles, Evaluator, HCEConfig, TermTrace};
pub use piece_values::PieceValues;
pub use traits::{WinProbability, HCE};
pub use wdl::{WdlModel, Zone};
