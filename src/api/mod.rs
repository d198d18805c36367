//! API Module
//!
//! HTTP handlers and routing for the avatar server.
//!
//! # Endpoints
//! - `GET /avatar/:name` - Render an initials avatar
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
