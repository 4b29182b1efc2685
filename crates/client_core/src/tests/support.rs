//! In-process board backend for tests.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::{Activity, Catalog},
    error::ApiErrorBody,
    protocol::{MessageResponse, ParticipantQuery},
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeenRequest {
    pub action: &'static str,
    pub activity: String,
    pub email: String,
}

#[derive(Default)]
struct MockState {
    catalog: Catalog,
    catalog_fetches: usize,
    fail_catalog: bool,
    signup_override: Option<(StatusCode, String)>,
    seen: Vec<SeenRequest>,
}

#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    inner: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn with_catalog(catalog: Catalog) -> Self {
        let backend = Self::default();
        backend
            .inner
            .try_lock()
            .expect("fresh backend lock")
            .catalog = catalog;
        backend
    }

    pub async fn catalog_fetches(&self) -> usize {
        self.inner.lock().await.catalog_fetches
    }

    pub async fn participants(&self, activity: &str) -> Vec<String> {
        self.inner
            .lock()
            .await
            .catalog
            .get(activity)
            .map(|activity| activity.participants.clone())
            .unwrap_or_default()
    }

    pub async fn seen(&self) -> Vec<SeenRequest> {
        self.inner.lock().await.seen.clone()
    }

    pub async fn set_fail_catalog(&self, fail: bool) {
        self.inner.lock().await.fail_catalog = fail;
    }

    /// Answers every signup with this raw status and body.
    pub async fn override_signup(&self, status: StatusCode, body: impl Into<String>) {
        self.inner.lock().await.signup_override = Some((status, body.into()));
    }
}

pub(crate) fn activity(max_participants: i64, participants: &[&str]) -> Activity {
    Activity {
        description: "d".into(),
        schedule: "s".into(),
        max_participants,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

pub(crate) fn catalog(entries: Vec<(&str, Activity)>) -> Catalog {
    entries
        .into_iter()
        .map(|(name, activity)| (name.to_string(), activity))
        .collect()
}

fn rejection(status: StatusCode, detail: &str) -> Response {
    (status, Json(ApiErrorBody::new(detail))).into_response()
}

async fn list_activities(State(backend): State<MockBackend>) -> Response {
    let mut state = backend.inner.lock().await;
    state.catalog_fetches += 1;
    if state.fail_catalog {
        return rejection(StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable");
    }
    Json(state.catalog.clone()).into_response()
}

async fn signup(
    State(backend): State<MockBackend>,
    Path(name): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> Response {
    let mut state = backend.inner.lock().await;
    state.seen.push(SeenRequest {
        action: "signup",
        activity: name.clone(),
        email: query.email.clone(),
    });
    if let Some((status, body)) = state.signup_override.clone() {
        return (status, body).into_response();
    }
    let mut catalog = state.catalog.clone();
    let Some(activity) = catalog.get(&name).cloned() else {
        return rejection(StatusCode::NOT_FOUND, "Activity not found");
    };
    if activity.participants.contains(&query.email) {
        return rejection(
            StatusCode::BAD_REQUEST,
            "Student already signed up for this activity",
        );
    }
    if activity.spots_left() <= 0 {
        return rejection(StatusCode::BAD_REQUEST, "Activity full");
    }
    let mut updated = activity;
    updated.participants.push(query.email.clone());
    catalog.insert(name.clone(), updated);
    state.catalog = catalog;
    Json(MessageResponse::new(format!(
        "Signed up {} for {name}",
        query.email
    )))
    .into_response()
}

async fn unregister(
    State(backend): State<MockBackend>,
    Path(name): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> Response {
    let mut state = backend.inner.lock().await;
    state.seen.push(SeenRequest {
        action: "unregister",
        activity: name.clone(),
        email: query.email.clone(),
    });
    let mut catalog = state.catalog.clone();
    let Some(mut activity) = catalog.get(&name).cloned() else {
        return rejection(StatusCode::NOT_FOUND, "Activity not found");
    };
    let before = activity.participants.len();
    activity.participants.retain(|p| *p != query.email);
    if activity.participants.len() == before {
        return rejection(
            StatusCode::NOT_FOUND,
            "Student is not signed up for this activity",
        );
    }
    catalog.insert(name.clone(), activity);
    state.catalog = catalog;
    Json(MessageResponse::new(format!(
        "Unregistered {} from {name}",
        query.email
    )))
    .into_response()
}

pub(crate) async fn spawn_board_server(backend: MockBackend) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/:name/signup", post(signup))
        .route("/activities/:name/unregister", post(unregister))
        .with_state(backend);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

/// A URL on which nothing is listening.
pub(crate) async fn unreachable_server_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
