//! Single-user detail view state.
use tracing::error;

use crate::error::RemoteError;
use crate::model::UserRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(UserRecord),
    NotFound,
    /// The fetch failed; it was logged and nothing else is shown.
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub id: u64,
    pub state: DetailState,
}

impl DetailView {
    pub fn open(id: u64) -> Self {
        Self {
            id,
            state: DetailState::Loading,
        }
    }

    /// Apply a fetch result. Results for another id are discarded and
    /// `false` is returned.
    pub fn apply(&mut self, id: u64, result: Result<Option<UserRecord>, RemoteError>) -> bool {
        if id != self.id {
            return false;
        }
        self.state = match result {
            Ok(Some(user)) => DetailState::Loaded(user),
            Ok(None) => DetailState::NotFound,
            Err(err) => {
                error!(id, error = %err, "Failed to fetch user details");
                DetailState::Failed
            }
        };
        true
    }
}
