//! Application layer containing the question use cases and shared state.

pub mod service;
pub mod state;

pub use service::QuestionService;
pub use state::AppState;
