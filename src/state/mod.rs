//! Application state module

mod app_state;
pub mod events;
mod forms;

pub use app_state::*;
pub use events::{AppEvent, SubmitOutcome};
pub use forms::*;
