//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → server.rs (axum setup, middleware)
//!     → handlers.rs (validate input shape)
//!     → [aggregator reads | orchestrator submits + confirms + decodes]
//!     → handlers.rs (serialize result, or error.rs maps the failure)
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use server::{build_router, AppState, HttpServer};
