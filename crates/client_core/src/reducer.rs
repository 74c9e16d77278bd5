//! State transitions applied by the controller after each gateway outcome.

use shared::domain::{Videogame, VideogameId};

use crate::state::{CollectionState, FormBuffer, SyncStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    LoadStarted,
    LoadSucceeded(Vec<Videogame>),
    LoadFailed,
    CreateSucceeded,
    /// Optimistic write of a toggled record, before the server confirms it.
    ToggleApplied(Videogame),
    /// Undo of a failed toggle. Only applies while the entry still holds `optimistic`.
    ToggleReverted {
        optimistic: Videogame,
        previous: Videogame,
    },
    Deleted(VideogameId),
    FormTitleChanged(String),
    FormGenreChanged(String),
    FormYearChanged(i32),
}

pub fn reduce(state: &mut CollectionState, action: SyncAction) {
    match action {
        SyncAction::LoadStarted => state.status = SyncStatus::Loading,
        SyncAction::LoadSucceeded(games) => {
            state.status = if games.is_empty() {
                SyncStatus::Empty
            } else {
                SyncStatus::Quiescent
            };
            state.games = games;
        }
        SyncAction::LoadFailed => state.status = SyncStatus::ConnectionError,
        SyncAction::CreateSucceeded => state.form = FormBuffer::default(),
        SyncAction::ToggleApplied(updated) => {
            if let Some(entry) = state
                .games
                .iter_mut()
                .find(|game| game.id.is_some() && game.id == updated.id)
            {
                *entry = updated;
            }
        }
        SyncAction::ToggleReverted {
            optimistic,
            previous,
        } => {
            if let Some(entry) = state.games.iter_mut().find(|game| **game == optimistic) {
                *entry = previous;
            }
        }
        SyncAction::Deleted(id) => state.games.retain(|game| game.id != Some(id)),
        SyncAction::FormTitleChanged(title) => state.form.title = title,
        SyncAction::FormGenreChanged(genre) => state.form.genre = genre,
        SyncAction::FormYearChanged(year) => state.form.year = year,
    }
}
