//! State container owned by the collection controller.

use chrono::Datelike;
use shared::domain::{Videogame, VideogameDraft, VideogameId};

use crate::error::ControllerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Loading,
    Empty,
    ConnectionError,
    Quiescent,
}

impl SyncStatus {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Loading => "Loading data from the backend...",
            Self::Empty => "No games found. Add one!",
            Self::ConnectionError => "Connection error: is the backend running?",
            Self::Quiescent => "",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ConnectionError)
    }
}

/// Draft being typed by the user, not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBuffer {
    pub title: String,
    pub genre: String,
    pub year: i32,
}

impl Default for FormBuffer {
    fn default() -> Self {
        Self {
            title: String::new(),
            genre: String::new(),
            year: chrono::Local::now().year(),
        }
    }
}

impl FormBuffer {
    pub fn to_draft(&self) -> Result<VideogameDraft, ControllerError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ControllerError::InvalidDraft("title must not be empty"));
        }
        let genre = self.genre.trim();
        if genre.is_empty() {
            return Err(ControllerError::InvalidDraft("genre must not be empty"));
        }
        Ok(VideogameDraft::new(title, genre, self.year))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionState {
    pub games: Vec<Videogame>,
    pub status: SyncStatus,
    pub form: FormBuffer,
}

impl CollectionState {
    pub fn find(&self, id: VideogameId) -> Option<&Videogame> {
        self.games.iter().find(|game| game.id == Some(id))
    }

    pub fn status_message(&self) -> &'static str {
        self.status.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_loading_with_empty_collection() {
        let state = CollectionState::default();
        assert_eq!(state.status, SyncStatus::Loading);
        assert!(state.games.is_empty());
        assert_eq!(state.form.year, chrono::Local::now().year());
    }

    #[test]
    fn quiescent_status_has_no_message() {
        assert_eq!(SyncStatus::Quiescent.message(), "");
        assert!(SyncStatus::ConnectionError.is_error());
        assert!(!SyncStatus::Empty.is_error());
    }

    #[test]
    fn form_requires_title_and_genre() {
        let mut form = FormBuffer {
            title: "  ".into(),
            genre: "RPG".into(),
            year: 1995,
        };
        assert_eq!(
            form.to_draft(),
            Err(ControllerError::InvalidDraft("title must not be empty"))
        );

        form.title = "Chrono Trigger".into();
        form.genre.clear();
        assert_eq!(
            form.to_draft(),
            Err(ControllerError::InvalidDraft("genre must not be empty"))
        );
    }

    #[test]
    fn form_draft_is_trimmed_and_not_completed() {
        let form = FormBuffer {
            title: " Celeste ".into(),
            genre: "Platformer".into(),
            year: 2018,
        };
        let draft = form.to_draft().expect("valid draft");
        assert_eq!(draft, VideogameDraft::new("Celeste", "Platformer", 2018));
        assert!(!draft.completed);
    }
}
