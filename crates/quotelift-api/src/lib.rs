//! quotelift-api - REST backend for saved QuoteLift favorites
//!
//! Four routes under `/api/quotes` over a libSQL table, plus `/healthz`.

pub mod config;
pub mod db;
pub mod error;
pub mod routes;

pub use config::AppConfig;
pub use routes::{app_router, AppState};
