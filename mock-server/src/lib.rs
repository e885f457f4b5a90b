//! In-process stand-in for the LFSWorld pubstat API.
//!
//! Mirrors the parts of the real service the client depends on, including
//! its habit of answering HTTP 200 with a plain-text message when the
//! identity key is wrong.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Identity key accepted when none is configured.
pub const DEFAULT_IDK: &str = "test-idk";

/// Body LFSWorld sends (with status 200) for a missing or wrong key.
pub const IDK_REQUIRED: &str = "Identification is required";

#[derive(Debug, Clone)]
pub struct MockState {
    pub idk: String,
}

pub type SharedState = Arc<MockState>;

/// Query string of `get_stat2.php`.
#[derive(Debug, Default, Deserialize)]
pub struct StatQuery {
    pub action: Option<String>,
    pub idk: Option<String>,
    pub version: Option<String>,
    pub s: Option<String>,
    pub racer: Option<String>,
    pub track: Option<String>,
    pub car: Option<String>,
}

pub fn app() -> Router {
    app_with_idk(DEFAULT_IDK)
}

pub fn app_with_idk(idk: impl Into<String>) -> Router {
    let state: SharedState = Arc::new(MockState { idk: idk.into() });
    Router::new()
        .route("/pubstat/get_stat2.php", get(get_stat))
        .route("/highlight_countries/{file}", get(highlights))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_idk(listener: TcpListener, idk: impl Into<String>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_idk(idk)).await
}

async fn get_stat(State(state): State<SharedState>, Query(query): Query<StatQuery>) -> Response {
    if query.idk.as_deref() != Some(state.idk.as_str()) {
        tracing::debug!(action = ?query.action, "rejecting identity key");
        return (StatusCode::OK, IDK_REQUIRED).into_response();
    }

    let action = query.action.as_deref().unwrap_or_default();
    match payload(action, &query) {
        Some(body) => Json(body).into_response(),
        None => {
            tracing::debug!(action, "unknown action");
            (StatusCode::OK, String::new()).into_response()
        }
    }
}

/// Canned payload for an action, `None` if the action is unknown.
pub fn payload(action: &str, query: &StatQuery) -> Option<Value> {
    let racer = query.racer.as_deref().unwrap_or_default();
    let track = query.track.as_deref().unwrap_or_default();
    let car = query.car.as_deref().unwrap_or_default();

    let body = match action {
        "hosts" => json!([{
            "hostname": "^1Demo ^7Server",
            "tmlt": "BL1",
            "cars": "XFG+XRG",
            "nrofracers": 2,
            "racers": ["Victor", "Eric"]
        }]),
        "teams" => json!([{ "team": "Demo Racing", "tag": "DR", "country": "Netherlands" }]),
        "hl" => json!([{ "id_hl": 1, "track": "000", "car": "XFG", "laptime": 89340, "racer": racer }]),
        "ch" => json!([{ "racername": "Victor", "track": track, "car": car, "laptime": 88120 }]),
        "wr" => json!([{ "id_wr": 7, "track": track, "car": car, "laptime": 86450, "racername": "Eric" }]),
        "pb" => json!([{ "track": "000", "car": "XFG", "laptime": 89340, "lapcount": 212, "racer": racer }]),
        "fuel" => json!([{ "track": "000", "car": "XFG", "fuel": 0.98, "racer": racer }]),
        "pst" => json!({ "racer": racer, "online": 1, "hostname": "^1Demo ^7Server", "track": "BL1" }),
        "hl_log" => json!([{ "id_hl": 1, "racer": "Victor", "time": 1_700_000_000 }]),
        "counters" => json!({ "hosts": 1, "racers": 2, "laps": 1024 }),
        _ => return None,
    };
    Some(body)
}

async fn highlights(Path(file): Path<String>) -> Response {
    // The client appends its query to the path without a `?`.
    let file = file.split('&').next().unwrap_or_default();
    let country = file
        .strip_prefix("highlights_")
        .and_then(|rest| rest.strip_suffix(".txt"));

    match country {
        Some(country) if !country.is_empty() => (
            [(header::CONTENT_TYPE, "text/plain")],
            format!(
                "<b>Victor</b> won on BL1 ({country})\n<b>Eric</b> set a world record on AS3 ({country})\n"
            ),
        )
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
