//! Read-only control plane over the channel directory and membership.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChannelList {
    pub channels: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChannelMembers {
    pub channel: String,
    pub members: Vec<String>,
    pub count: usize,
}

/// GET /api/v1/channels - Every channel ever joined, sorted.
pub async fn list_channels(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ChannelList>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let channels = state.controller.registry().list_channels().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(ChannelList { channels }, request_id, elapsed)
        .with_link("self", "/api/v1/channels");

    Ok(Json(resp))
}

/// GET /api/v1/channels/{name}/members - Connection ids currently in a channel.
pub async fn list_members(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<ChannelMembers>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let members = state.controller.registry().list_members(&name).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let self_link = format!("/api/v1/channels/{name}/members");
    let resp = ApiResponse::success(
        ChannelMembers {
            count: members.len(),
            channel: name,
            members,
        },
        request_id,
        elapsed,
    )
    .with_link("self", &self_link)
    .with_link("channels", "/api/v1/channels");

    Ok(Json(resp))
}
