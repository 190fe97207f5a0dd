//! # logrelay-actix
//!
//! Request-logging middleware for Actix-Web that forwards one flat record per
//! request to a remote structured-logging collector over TCP.
//!
//! Two wrappers, both stateless views over one shared collector connection:
//!
//! - **Request logger**: times every request and emits `{method, path,
//!   status, latency_ms, client_ip, user_agent, response_size}` (plus an
//!   `error` description when the downstream produced one) under the
//!   configured tag.
//! - **Panic logger**: watches for 500 responses and emits a reduced record
//!   under `<tag>.panic`, attaching the error description and a stack-trace
//!   snapshot when an error value is present.
//!
//! Logging is strictly side-effect-only: the response the caller sees is
//! exactly what the wrapped handlers produced, and a failed transmission is
//! reported through `tracing` and swallowed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use actix_web::{web, App, HttpResponse, HttpServer};
//! use logrelay_actix::{Logger, LoggerConfig};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let logger = Logger::new(LoggerConfig::new("127.0.0.1", 24224, "web"))
//!         .await
//!         .expect("collector unreachable");
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .wrap(logger.request_logger())
//!             .wrap(logger.panic_logger())
//!             .service(web::resource("/").to(|| async {
//!                 HttpResponse::Ok().body("Hello!")
//!             }))
//!     })
//!     .bind("0.0.0.0:8080")?
//!     .run()
//!     .await
//! }
//! ```
//!
//! ## Configuration
//!
//! [`LoggerConfig::from_env`] reads:
//!
//! - `LOGRELAY_ENABLED`: "true"/"1"/"yes" to enable (default: disabled)
//! - `LOGRELAY_HOST` / `LOGRELAY_PORT`: collector address (default
//!   `127.0.0.1:24224`)
//! - `LOGRELAY_TAG`: base tag for emitted records (default `app`)
//!
//! Constructing a [`Logger`] from a disabled configuration fails with
//! [`RelayError::Disabled`] before any network activity, so an application
//! can decide at startup whether to wrap its routes at all.
//!
//! ## Architecture
//!
//! - `middleware`: the two Actix middleware variants over one interception core
//! - `client`: the shared TCP connection and the `post(tag, record)` capability
//! - `record`: the flat attribute map sent per request
//! - `config`: explicit and environment-based configuration
//! - `error`: construction-time and per-request error types
//! - `utils`: client IP, user agent, and stack-trace helpers

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod record;
pub mod utils;

// Re-export main components for easy access
pub use client::CollectorClient;
pub use config::LoggerConfig;
pub use error::RelayError;
pub use middleware::{Logger, PanicLogger, RequestLogger};
pub use record::Record;

/// Convenience prelude for importing common types
pub mod prelude {
    pub use crate::config::LoggerConfig;
    pub use crate::error::RelayError;
    pub use crate::middleware::{Logger, PanicLogger, RequestLogger};
    pub use crate::record::Record;
}
