//! HTTP request handlers.

pub mod health;
pub mod metrics;
pub mod token_handler;

pub use health::health_check;
pub use metrics::metrics_handler;
pub use token_handler::{issue_token_json, issue_token_query, AppState};
