//! Interactive questionnaire over the terminal

pub mod input;
pub mod session;

pub use input::{LineSource, ReedlineSource};
pub use session::{InteractiveError, InteractiveOutcome, InteractiveSession};
