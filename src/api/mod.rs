//! API Module
//!
//! HTTP handlers and routing for the page cache REST API.
//!
//! # Endpoints
//! - `GET /page?key=...` - Look a page up through the gated cache
//! - `GET /stats` - Get lookup statistics and filter parameters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
