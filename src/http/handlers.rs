//! HTTP request handlers

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::text::TextView;
use crate::models::{CloudStatus, DiscordStatus, SteamProfile, ValorantProfile, Workstation};
use crate::record::RecordReader;
use crate::registry::Readers;
use crate::workstation::WorkstationHandler;

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    readers: Readers,
    workstation: Arc<WorkstationHandler>,
}

impl AppState {
    pub fn new(readers: Readers, workstation: WorkstationHandler) -> Self {
        Self {
            readers,
            workstation: Arc::new(workstation),
        }
    }
}

fn json_of<T: Serialize + Clone>(reader: &RecordReader<T>) -> Json<T> {
    Json(reader.read())
}

fn text_of<T: TextView + Clone>(reader: &RecordReader<T>) -> String {
    reader.read().render_text()
}

/// Health check endpoint
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "statusboard"
    }))
}

pub async fn steam(State(state): State<AppState>) -> Json<SteamProfile> {
    json_of(&state.readers.steam)
}

pub async fn steam_text(State(state): State<AppState>) -> String {
    text_of(&state.readers.steam)
}

pub async fn cloud(State(state): State<AppState>) -> Json<CloudStatus> {
    json_of(&state.readers.cloud)
}

pub async fn cloud_text(State(state): State<AppState>) -> String {
    text_of(&state.readers.cloud)
}

pub async fn valorant(State(state): State<AppState>) -> Json<ValorantProfile> {
    json_of(&state.readers.valorant)
}

pub async fn valorant_text(State(state): State<AppState>) -> String {
    text_of(&state.readers.valorant)
}

pub async fn discord(State(state): State<AppState>) -> Json<DiscordStatus> {
    json_of(&state.readers.discord)
}

pub async fn discord_text(State(state): State<AppState>) -> String {
    text_of(&state.readers.discord)
}

pub async fn workstation(State(state): State<AppState>) -> Json<Workstation> {
    json_of(&state.readers.workstation)
}

pub async fn workstation_text(State(state): State<AppState>) -> String {
    text_of(&state.readers.workstation)
}

/// `POST /workstation`: body becomes the new status
///
/// A rejected push answers 401 with an empty body.
pub async fn push_workstation(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let credential = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    match state.workstation.push(credential, &body) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => {
            tracing::warn!("Rejected workstation push: {}", e);
            StatusCode::UNAUTHORIZED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::server::router;
    use super::*;
    use crate::record::RecordWriter;
    use crate::registry::registry;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app(key: &str) -> (axum::Router, RecordWriter<SteamProfile>) {
        let (writers, readers) = registry();
        let handler = WorkstationHandler::new(key.to_string(), writers.workstation);
        (router(AppState::new(readers, handler)), writers.steam)
    }

    async fn get(app: &axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post(app: &axum::Router, key: Option<&str>, body: &str) -> (StatusCode, String) {
        let mut request = Request::post("/workstation");
        if let Some(key) = key {
            request = request.header(AUTHORIZATION, key);
        }
        let response = app
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _steam) = app("k");
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("statusboard"));
    }

    #[tokio::test]
    async fn test_zero_snapshots() {
        let (app, _steam) = app("k");

        let (status, body) = get(&app, "/cloud").await;
        assert_eq!(status, StatusCode::OK);
        let cloud: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(cloud["is_down"], false);

        let (_, body) = get(&app, "/workstation").await;
        let workstation: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(workstation["status"], "");
        assert!(workstation["lastUpdate"].is_null());

        let (_, body) = get(&app, "/discord.text").await;
        assert_eq!(body, "Currently offline\nLast Update: ");
    }

    #[tokio::test]
    async fn test_reads_reflect_writer_updates() {
        let (app, steam) = app("k");
        steam.update(SteamProfile {
            persona_state: "Busy".to_string(),
            persona_name: "ezri".to_string(),
            ..Default::default()
        });

        let (_, body) = get(&app, "/steam").await;
        let steam: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(steam["persona_state"], "Busy");
        assert_eq!(steam["persona_name"], "ezri");

        let (_, body) = get(&app, "/steam.text").await;
        assert!(body.starts_with("Status: Busy\n"));
    }

    #[tokio::test]
    async fn test_push_workstation() {
        let (app, _steam) = app("ide-key");

        let (status, body) = post(&app, Some("ide-key"), "deploying").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (_, body) = get(&app, "/workstation.text").await;
        assert!(body.starts_with("deploying\nLast Update: "));
    }

    #[tokio::test]
    async fn test_push_workstation_rejected() {
        let (app, _steam) = app("ide-key");
        post(&app, Some("ide-key"), "first").await;

        let (status, body) = post(&app, Some("wrong"), "second").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.is_empty());

        let (status, _) = post(&app, None, "second").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, body) = get(&app, "/workstation").await;
        let workstation: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(workstation["status"], "first");
    }
}
