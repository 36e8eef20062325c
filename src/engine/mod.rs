pub mod engine;
pub mod state;


pub use engine::{SearchEngine, SearchOutcome};
pub use state::{Phase, ViewState};
