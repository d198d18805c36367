//! API Handlers
//!
//! HTTP request handlers for each avatar server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::avatar::InitialsAvatar;
use crate::config::Config;
use crate::error::Result;
use crate::models::{AvatarQuery, HealthResponse, StatsResponse};

/// Browser cache lifetime for served avatars
const CACHE_CONTROL: &str = "max-age=600";

/// Application state shared across all handlers.
///
/// The avatar service is internally synchronized, so it is shared through a
/// plain `Arc` without an outer lock.
#[derive(Clone)]
pub struct AppState {
    /// Avatar renderer and its cache
    pub avatar: Arc<InitialsAvatar>,
    /// Side length used when a request does not specify one
    pub default_size: u32,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(avatar: InitialsAvatar, default_size: u32) -> Self {
        Self {
            avatar: Arc::new(avatar),
            default_size,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            InitialsAvatar::from_config(config),
            config.default_avatar_size,
        )
    }
}

/// Handler for GET /avatar/:name
///
/// Returns the encoded avatar image for the given name.
pub async fn avatar_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<AvatarQuery>,
) -> Result<Response> {
    let (size, encoding) = query.resolve(state.default_size)?;
    let bytes = state.avatar.draw_to_bytes(&name, size, encoding)?;

    Ok((
        [
            (header::CONTENT_TYPE, encoding.content_type()),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        bytes,
    )
        .into_response())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.avatar.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
