use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{Map, Value};
use shared::{
    domain::Catalog,
    error::ApiErrorBody,
    protocol::{MessageResponse, ParticipantAction},
};
use tracing::debug;
use url::Url;

pub mod board;
pub mod error;
pub mod events;
pub mod render;
pub mod surface;

pub use board::ActivityBoard;
pub use error::BoardError;
pub use events::{ActionOutcome, BoardEvent, MessageKind, UiMessage};
pub use surface::{ActivitiesArea, BoardSurface, HtmlSurface, SignupForm};

/// Server answer to a signup request that produced a readable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupReply {
    Accepted(MessageResponse),
    Rejected { status: u16, detail: Option<String> },
}

#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Catalog, BoardError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<SignupReply, BoardError>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<(), BoardError>;
}

pub struct HttpBoardApi {
    http: Client,
    base_url: Url,
}

impl HttpBoardApi {
    pub fn new(server_url: &str) -> Result<Self, BoardError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, BoardError> {
        let base_url = Url::parse(server_url)?;
        if base_url.cannot_be_a_base() {
            return Err(BoardError::BaseUrl(server_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    /// Server root every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn catalog_url(&self) -> Result<Url, BoardError> {
        self.endpoint(&["activities"])
    }

    /// `{base}/activities/{activity}/{action}?email={email}` with the activity
    /// percent-encoded as a single path segment and the email form-encoded.
    pub fn participant_url(
        &self,
        activity: &str,
        action: ParticipantAction,
        email: &str,
    ) -> Result<Url, BoardError> {
        let mut url = self.endpoint(&["activities", activity, action.path_segment()])?;
        url.query_pairs_mut().append_pair("email", email);
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BoardError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| BoardError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn read_body(res: Response) -> Result<(StatusCode, Vec<u8>), BoardError> {
    let status = res.status();
    let body = res.bytes().await?;
    Ok((status, body.to_vec()))
}

/// Parsed JSON, or an empty object when the body is not JSON.
fn best_effort_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new()))
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn fetch_catalog(&self) -> Result<Catalog, BoardError> {
        let url = self.catalog_url()?;
        debug!(%url, "fetching activity catalog");
        let (status, body) = read_body(self.http.get(url).send().await?).await?;
        if !status.is_success() {
            return Err(BoardError::Status {
                status: status.as_u16(),
                body: best_effort_json(&body),
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<SignupReply, BoardError> {
        let url = self.participant_url(activity, ParticipantAction::Signup, email)?;
        debug!(%url, "submitting signup");
        let (status, body) = read_body(self.http.post(url).send().await?).await?;
        if status.is_success() {
            return Ok(SignupReply::Accepted(serde_json::from_slice(&body)?));
        }
        // Any JSON value counts as readable; only non-JSON bodies fail.
        let error: Value = serde_json::from_slice(&body)?;
        Ok(SignupReply::Rejected {
            status: status.as_u16(),
            detail: error_detail(&error),
        })
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<(), BoardError> {
        let url = self.participant_url(activity, ParticipantAction::Unregister, email)?;
        debug!(%url, "submitting unregister");
        let (status, body) = read_body(self.http.post(url).send().await?).await?;
        if status.is_success() {
            return Ok(());
        }
        Err(BoardError::Status {
            status: status.as_u16(),
            body: best_effort_json(&body),
        })
    }
}

/// Best-effort `detail` text out of an error body, for diagnostics.
pub fn error_detail(body: &Value) -> Option<String> {
    serde_json::from_value::<ApiErrorBody>(body.clone())
        .ok()
        .and_then(|error| error.detail_text())
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
