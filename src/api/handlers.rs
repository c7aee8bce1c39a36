//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Local;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    countdown::TimerState,
    render::{paint, Frame, SvgSurface},
    state::AppState,
    storage::{export_file_name, is_valid_profile_name, ExportFormat, Session},
};
use super::responses::{ApiResponse, HealthResponse, ProfilesResponse, StatusResponse};

/// Largest frame edge served by `/render.svg`
const MAX_FRAME: u32 = 4096;

/// Turn a command result into a response
fn command_response(
    name: &str,
    result: Result<(bool, TimerState), String>,
    applied_msg: &str,
    ignored_msg: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok((true, timer)) => {
            info!("{} endpoint called - {}", name, applied_msg);
            Ok(Json(ApiResponse::applied(applied_msg.to_string(), timer)))
        }
        Ok((false, timer)) => {
            info!("{} endpoint called - {}", name, ignored_msg);
            Ok(Json(ApiResponse::ignored(ignored_msg.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    command_response(
        "Start",
        state.start(),
        "Countdown started",
        "Countdown already running or no time left",
    )
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    command_response(
        "Stop",
        state.stop(),
        "Countdown stopped",
        "Countdown is not running",
    )
}

/// Handle POST /reset - Stop and rewind to the full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    command_response("Reset", state.reset(), "Countdown reset", "Countdown not reset")
}

/// Handle POST /preset/:minutes - Select a preset duration
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Path(minutes): Path<u32>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if !state.presets.contains(minutes) {
        warn!("Rejected unknown preset: {} minutes", minutes);
        return Err(StatusCode::BAD_REQUEST);
    }

    command_response(
        "Preset",
        state.select_preset(minutes),
        &format!("Preset set to {} minutes", minutes),
        "Presets cannot change while the countdown is running",
    )
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let profile = match state.get_profiles() {
        Ok((current, _)) => current,
        Err(e) => {
            error!("Failed to get profiles: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: timer.into(),
        clock: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        profile,
        presets: state.presets.as_slice().to_vec(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /presets - List preset durations
pub async fn presets_handler(State(state): State<Arc<AppState>>) -> Json<Vec<u32>> {
    Json(state.presets.as_slice().to_vec())
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Handle GET /render.svg - Draw the progress ring
pub async fn render_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let width = query.width.unwrap_or(state.settings.window_width).min(MAX_FRAME);
    let height = query.height.unwrap_or(state.settings.window_height).min(MAX_FRAME);
    let (width, height) = (f64::from(width), f64::from(height));

    let mut surface = SvgSurface::new(width, height);
    paint(
        &mut surface,
        Frame::new(width, height),
        timer.fraction(),
        timer.remaining_seconds,
    );

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], surface.finish()))
}

/// Handle GET /sessions - Sessions of the active profile
pub async fn sessions_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Session>>, StatusCode> {
    state.get_sessions().map(Json).map_err(|e| {
        error!("Failed to get sessions: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /export/:format - Download sessions as CSV or JSON
pub async fn export_handler(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let format = match format.as_str() {
        "csv" => ExportFormat::Csv,
        "json" => ExportFormat::Json,
        other => {
            warn!("Rejected unknown export format: {}", other);
            return Err(StatusCode::NOT_FOUND);
        }
    };

    let sessions = match state.get_sessions() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get sessions: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let file_name = export_file_name(format, Local::now().date_naive());
    info!("Exporting {} sessions as {}", sessions.len(), file_name);

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        format.render(&sessions),
    ))
}

/// Handle GET /profiles - List profiles
pub async fn profiles_handler(State(state): State<Arc<AppState>>) -> Result<Json<ProfilesResponse>, StatusCode> {
    match state.get_profiles() {
        Ok((current, profiles)) => Ok(Json(ProfilesResponse { current, profiles })),
        Err(e) => {
            error!("Failed to list profiles: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /profiles/:name - Switch the active profile
pub async fn switch_profile_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ProfilesResponse>, StatusCode> {
    if !is_valid_profile_name(&name) {
        warn!("Rejected invalid profile name: {:?}", name);
        return Err(StatusCode::BAD_REQUEST);
    }

    if let Err(e) = state.switch_profile(&name) {
        error!("Failed to switch profile: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    profiles_handler(State(state)).await
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
