pub mod dto;
pub mod extract;
pub mod goals;
pub mod middleware;
pub mod notes;
pub mod rest;
pub mod state;
pub mod stats;
pub mod study_logs;
pub mod subjects;
pub mod users;

// Re-export the router builder so the binary and the tests share one wiring.
pub use rest::{router, ApiDoc};
pub use state::AppState;
