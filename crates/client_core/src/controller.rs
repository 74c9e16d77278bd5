//! Collection controller: owns the in-memory collection and reconciles it with gateway results.

use std::sync::Arc;

use shared::domain::{Videogame, VideogameId};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{ControllerError, OperationContext},
    gateway::VideogameGateway,
    reducer::{reduce, SyncAction},
    state::{CollectionState, FormBuffer, SyncStatus},
};

struct ControllerInner {
    state: CollectionState,
    /// Token of the most recently issued load; older completions are dropped.
    latest_load: u64,
}

/// Drives the gateway for user actions.
///
/// The state lock is never held across a gateway call, so overlapping
/// operations run concurrently and complete in arrival order.
pub struct CollectionController {
    gateway: Arc<dyn VideogameGateway>,
    inner: Mutex<ControllerInner>,
}

impl CollectionController {
    pub fn new(gateway: Arc<dyn VideogameGateway>) -> Self {
        Self {
            gateway,
            inner: Mutex::new(ControllerInner {
                state: CollectionState::default(),
                latest_load: 0,
            }),
        }
    }

    pub async fn snapshot(&self) -> CollectionState {
        self.inner.lock().await.state.clone()
    }

    pub async fn status(&self) -> SyncStatus {
        self.inner.lock().await.state.status
    }

    pub async fn form(&self) -> FormBuffer {
        self.inner.lock().await.state.form.clone()
    }

    pub async fn set_form_title(&self, title: impl Into<String>) {
        self.dispatch(SyncAction::FormTitleChanged(title.into())).await;
    }

    pub async fn set_form_genre(&self, genre: impl Into<String>) {
        self.dispatch(SyncAction::FormGenreChanged(genre.into())).await;
    }

    pub async fn set_form_year(&self, year: i32) {
        self.dispatch(SyncAction::FormYearChanged(year)).await;
    }

    async fn dispatch(&self, action: SyncAction) {
        let mut guard = self.inner.lock().await;
        reduce(&mut guard.state, action);
    }

    /// Full fetch of the collection. Returns the number of records received.
    pub async fn load(&self) -> Result<usize, ControllerError> {
        let token = {
            let mut guard = self.inner.lock().await;
            guard.latest_load += 1;
            reduce(&mut guard.state, SyncAction::LoadStarted);
            guard.latest_load
        };

        let result = self.gateway.list().await;

        let mut guard = self.inner.lock().await;
        if token != guard.latest_load {
            debug!(
                token,
                latest = guard.latest_load,
                "discarding result of superseded load"
            );
            return result
                .map(|games| games.len())
                .map_err(|err| ControllerError::gateway(OperationContext::Load, err));
        }

        match result {
            Ok(games) => {
                let count = games.len();
                info!(count, "videogames loaded");
                reduce(&mut guard.state, SyncAction::LoadSucceeded(games));
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "failed to load videogames");
                reduce(&mut guard.state, SyncAction::LoadFailed);
                Err(ControllerError::gateway(OperationContext::Load, err))
            }
        }
    }

    /// Submits the form buffer, then reloads the whole collection.
    ///
    /// On failure the form buffer is left untouched so the user can retry.
    pub async fn create(&self) -> Result<Videogame, ControllerError> {
        let draft = self.inner.lock().await.state.form.to_draft()?;

        let created = match self.gateway.create(&draft).await {
            Ok(created) => created,
            Err(err) => {
                warn!(error = %err, title = %draft.title, "failed to create videogame");
                return Err(ControllerError::gateway(OperationContext::Create, err));
            }
        };

        info!(id = ?created.id, title = %created.title, "videogame created");
        self.dispatch(SyncAction::CreateSucceeded).await;
        // A failed reload is reported through the status, the create itself succeeded.
        let _ = self.load().await;
        Ok(created)
    }

    /// Flips `completed` locally, then confirms it with the server.
    ///
    /// The collection shows the flipped value while the update is in flight
    /// and is rolled back if the gateway reports a failure.
    pub async fn toggle_complete(&self, record: &Videogame) -> Result<(), ControllerError> {
        let optimistic = record.with_completion_toggled();
        let previous = {
            let mut guard = self.inner.lock().await;
            let previous = record
                .id
                .and_then(|id| guard.state.find(id).cloned())
                .unwrap_or_else(|| record.clone());
            reduce(
                &mut guard.state,
                SyncAction::ToggleApplied(optimistic.clone()),
            );
            previous
        };

        match self.gateway.update(&optimistic).await {
            Ok(_) => {
                debug!(id = ?optimistic.id, completed = optimistic.completed, "toggle confirmed");
                Ok(())
            }
            Err(err) => {
                warn!(id = ?optimistic.id, error = %err, "toggle rejected, rolling back");
                self.dispatch(SyncAction::ToggleReverted {
                    optimistic,
                    previous,
                })
                .await;
                Err(ControllerError::gateway(OperationContext::Update, err))
            }
        }
    }

    /// Deletes a record. Confirmation is the caller's responsibility.
    pub async fn delete(&self, id: VideogameId) -> Result<(), ControllerError> {
        match self.gateway.delete(id).await {
            Ok(()) => {
                info!(%id, "videogame deleted");
                self.dispatch(SyncAction::Deleted(id)).await;
                Ok(())
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to delete videogame");
                Err(ControllerError::gateway(OperationContext::Delete, err))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
