//! The activity board controller: loads the catalog, handles signup and
//! removal, and keeps the surface in step with the latest fetch.

use std::{sync::Arc, time::Duration};

use shared::domain::Catalog;
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use crate::{
    error_detail,
    events::{ActionOutcome, BoardEvent, UiMessage},
    render::{self, LOAD_FAILURE_TEXT},
    surface::BoardSurface,
    BoardApi, BoardError, SignupReply,
};

pub const DEFAULT_MESSAGE_HIDE_AFTER: Duration = Duration::from_secs(5);
pub const SIGNUP_FALLBACK_ERROR: &str = "An error occurred";
pub const SIGNUP_NETWORK_ERROR: &str = "Failed to sign up. Please try again.";

pub struct ActivityBoard<S: BoardSurface> {
    api: Arc<dyn BoardApi>,
    surface: Arc<Mutex<S>>,
    catalog: RwLock<Catalog>,
    message_hide_after: Duration,
}

impl<S: BoardSurface> ActivityBoard<S> {
    pub fn new(api: Arc<dyn BoardApi>, surface: S) -> Arc<Self> {
        Self::with_message_hide_after(api, surface, DEFAULT_MESSAGE_HIDE_AFTER)
    }

    pub fn with_message_hide_after(
        api: Arc<dyn BoardApi>,
        surface: S,
        message_hide_after: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            surface: Arc::new(Mutex::new(surface)),
            catalog: RwLock::new(Catalog::new()),
            message_hide_after,
        })
    }

    pub fn surface(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.surface)
    }

    /// Catalog from the last successful load.
    pub async fn catalog(&self) -> Catalog {
        self.catalog.read().await.clone()
    }

    /// Runs the handler bound to `event` as its own task.
    pub fn dispatch(self: &Arc<Self>, event: BoardEvent) -> JoinHandle<ActionOutcome> {
        debug!(event = event.name(), "dispatching board event");
        let board = Arc::clone(self);
        tokio::spawn(async move {
            match event {
                BoardEvent::PageLoaded => board.load_catalog().await,
                BoardEvent::SignupSubmitted => board.submit_signup().await,
                BoardEvent::RemoveClicked {
                    activity,
                    participant,
                } => board.remove_participant(&activity, &participant).await,
            }
        })
    }

    pub async fn load_catalog(&self) -> ActionOutcome {
        let catalog = match self.api.fetch_catalog().await {
            Ok(catalog) => catalog,
            Err(err) => {
                error!("error fetching activities: {err}");
                self.surface
                    .lock()
                    .await
                    .show_load_failure(LOAD_FAILURE_TEXT);
                return ActionOutcome::Failed;
            }
        };

        let cards = render::cards_from_catalog(&catalog);
        let names = catalog.names().map(str::to_owned).collect();
        info!(activities = catalog.len(), "activity catalog loaded");
        // Snapshot and surface always come from the same fetch.
        let mut surface = self.surface.lock().await;
        surface.show_catalog(cards);
        surface.set_activity_options(names);
        *self.catalog.write().await = catalog;
        ActionOutcome::Applied
    }

    pub async fn submit_signup(&self) -> ActionOutcome {
        let form = self.surface.lock().await.signup_form();

        let (message, outcome) = match self.api.signup(&form.activity, &form.email).await {
            Ok(SignupReply::Accepted(body)) => {
                info!(activity = %form.activity, "participant signed up");
                (UiMessage::success(body.message), ActionOutcome::Applied)
            }
            Ok(SignupReply::Rejected { status, detail }) => {
                warn!(status, activity = %form.activity, "signup rejected");
                let text = detail.unwrap_or_else(|| SIGNUP_FALLBACK_ERROR.to_string());
                (UiMessage::error(text), ActionOutcome::Failed)
            }
            Err(err) => {
                error!(activity = %form.activity, "error signing up: {err}");
                (UiMessage::error(SIGNUP_NETWORK_ERROR), ActionOutcome::Failed)
            }
        };

        {
            let mut surface = self.surface.lock().await;
            surface.show_message(message);
            if outcome.is_applied() {
                surface.reset_form();
            }
        }
        self.schedule_message_hide();

        if outcome.is_applied() {
            self.load_catalog().await;
        }
        outcome
    }

    pub async fn remove_participant(&self, activity: &str, participant: &str) -> ActionOutcome {
        self.surface
            .lock()
            .await
            .set_remove_enabled(activity, participant, false);

        match self.api.unregister(activity, participant).await {
            Ok(()) => {
                info!(activity, participant, "participant unregistered");
                self.load_catalog().await;
                ActionOutcome::Applied
            }
            Err(err) => {
                // Diagnostics only; the row stays and its control comes back.
                match &err {
                    BoardError::Status { status, body } => {
                        let detail = error_detail(body).unwrap_or_default();
                        error!(
                            activity,
                            participant,
                            status,
                            detail = %detail,
                            "failed to unregister: {body}"
                        )
                    }
                    other => error!(activity, participant, "error unregistering: {other}"),
                }
                self.surface
                    .lock()
                    .await
                    .set_remove_enabled(activity, participant, true);
                ActionOutcome::Failed
            }
        }
    }

    /// Hides the message area after the configured delay. Earlier timers are
    /// not cancelled, so each one hides whatever message is showing when it fires.
    fn schedule_message_hide(&self) {
        let surface = Arc::clone(&self.surface);
        let delay = self.message_hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            surface.lock().await.hide_message();
        });
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
