//! climatch Server - HTTP REST API for climate-scenario provider matching
//!
//! Exposes the matcher and the coverage recommender over HTTP:
//!
//! - **Matching**: rank catalog providers against a free-text data request
//! - **Parsing**: inspect how a request is read into a structured query
//! - **Recommendations**: rank (provider, model) pairs by stored coverage
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/v1/match` - Rank providers for `{"query": "..."}`
//! - `POST /api/v1/parse` - Parse `{"query": "..."}` without scoring
//! - `POST /api/v1/recommend` - Coverage-based recommendations
//! - `GET /api/v1/catalog` - Loaded provider catalog
//! - `GET /api/v1/metadata` - Server metadata
//!
//! Errors use `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
