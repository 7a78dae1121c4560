//! Mock upstream collaborators shared by the integration tests

#![allow(dead_code)]

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;

pub const VALORANT_KEY: &str = "HDEV-test-key";

pub const STEAM_BODY: &str = r#"{"response":{"players":[{
    "personastate": 1,
    "personaname": "ezri",
    "profileurl": "https://steamcommunity.com/id/ezri/",
    "avatarfull": "https://avatars.example/full.jpg",
    "lastlogoff": 1700000000,
    "gameextrainfo": "Portal 2",
    "gameid": "620"
}]}}"#;

pub const UPDOWN_BODY: &str = r#"[
    {"url":"https://a.example","down":false,"down_since":null},
    {"url":"https://b.example","down":true,"down_since":"2024-03-01T10:00:00Z"},
    {"url":"https://c.example","down":true,"down_since":"2024-02-01T10:00:00Z"}
]"#;

pub const VALORANT_BODY: &str = r#"{"status":200,"data":{
    "name":"ezri","tag":"0001",
    "current_data":{"currenttier":18,"currenttierpatched":"Diamond 1","elo":1542},
    "highest_rank":{"tier":21,"patched_tier":"Ascendant 1","season":"e7a3"}
}}"#;

/// Upstream that answers 503 until switched available
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    available: Arc<AtomicBool>,
}

impl MockUpstream {
    pub async fn start(available: bool) -> Self {
        let flag = Arc::new(AtomicBool::new(available));
        let app = Router::new()
            .route("/steam", get(steam))
            .route("/updown", get(updown))
            .route("/valorant", get(valorant))
            .route("/garbage", get(garbage))
            .with_state(flag.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            available: flag,
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

fn respond(flag: &AtomicBool, body: &'static str) -> axum::response::Response {
    if flag.load(Ordering::SeqCst) {
        (StatusCode::OK, body).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response()
    }
}

async fn steam(State(flag): State<Arc<AtomicBool>>) -> axum::response::Response {
    respond(&flag, STEAM_BODY)
}

async fn updown(State(flag): State<Arc<AtomicBool>>) -> axum::response::Response {
    respond(&flag, UPDOWN_BODY)
}

async fn valorant(
    State(flag): State<Arc<AtomicBool>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == VALORANT_KEY);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing key").into_response();
    }
    respond(&flag, VALORANT_BODY)
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

/// Blocking ureq call moved off the runtime, returns status and body
pub async fn http_request(
    method: &'static str,
    url: String,
    authorization: Option<&'static str>,
    body: Option<&'static str>,
) -> (u16, String) {
    tokio::task::spawn_blocking(move || {
        let mut request = ureq::request(method, &url).timeout(Duration::from_secs(5));
        if let Some(key) = authorization {
            request = request.set("Authorization", key);
        }
        let result = match body {
            Some(body) => request.send_string(body),
            None => request.call(),
        };
        match result {
            Ok(response) => {
                let status = response.status();
                (status, response.into_string().unwrap())
            }
            Err(ureq::Error::Status(code, response)) => (code, response.into_string().unwrap()),
            Err(e) => panic!("request to {} failed: {}", url, e),
        }
    })
    .await
    .unwrap()
}

pub async fn http_get(url: String) -> (u16, String) {
    http_request("GET", url, None, None).await
}

pub async fn get_json(url: String) -> serde_json::Value {
    let (status, body) = http_get(url).await;
    assert_eq!(status, 200);
    serde_json::from_str(&body).unwrap()
}

/// GET that reports transport failures instead of panicking
pub async fn try_http_get(url: String) -> Result<(u16, String), String> {
    tokio::task::spawn_blocking(move || {
        match ureq::get(&url).timeout(Duration::from_secs(2)).call() {
            Ok(response) => {
                let status = response.status();
                Ok((status, response.into_string().unwrap_or_default()))
            }
            Err(ureq::Error::Status(code, response)) => {
                Ok((code, response.into_string().unwrap_or_default()))
            }
            Err(e) => Err(e.to_string()),
        }
    })
    .await
    .unwrap()
}
