//! Remote requests issued by the UI and their outcomes.
//!
//! The UI thread queues [`Request`]s; the event loop runs each on the tokio
//! runtime and sends the [`Outcome`] back over a channel, where it is applied
//! with [`AppState::apply_outcome`](crate::app::AppState::apply_outcome).
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{Instrument, debug, info_span, warn};

use crate::api::ApiClient;
use crate::error::RemoteError;
use crate::model::UserRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    LoadUsers,
    LoadUser(u64),
    Create(UserRecord),
    Update(UserRecord),
    Delete(u64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    UsersLoaded(Result<Vec<UserRecord>, RemoteError>),
    UserLoaded {
        id: u64,
        result: Result<Option<UserRecord>, RemoteError>,
    },
    Created(Result<UserRecord, RemoteError>),
    Updated {
        submitted: UserRecord,
        result: Result<(), RemoteError>,
    },
    Deleted {
        id: u64,
        result: Result<(), RemoteError>,
    },
}

/// Run one request against the API.
pub async fn execute(client: &ApiClient, request: Request) -> Outcome {
    match request {
        Request::LoadUsers => Outcome::UsersLoaded(client.list_users().await),
        Request::LoadUser(id) => Outcome::UserLoaded {
            id,
            result: client.get_user(id).await,
        },
        Request::Create(record) => Outcome::Created(client.create_user(&record).await),
        Request::Update(record) => {
            let result = client.update_user(&record).await;
            Outcome::Updated {
                submitted: record,
                result,
            }
        }
        Request::Delete(id) => Outcome::Deleted {
            id,
            result: client.delete_user(id).await,
        },
    }
}

/// Spawn `request` on the runtime; the outcome is sent to `tx`.
pub fn spawn(handle: &Handle, client: ApiClient, request: Request, tx: UnboundedSender<Outcome>) {
    debug!(?request, "dispatching request");
    let span = info_span!("remote", request = request_name(&request));
    handle.spawn(
        async move {
            let outcome = execute(&client, request).await;
            if tx.send(outcome).is_err() {
                warn!("UI closed before the response arrived");
            }
        }
        .instrument(span),
    );
}

fn request_name(request: &Request) -> &'static str {
    match request {
        Request::LoadUsers => "load_users",
        Request::LoadUser(_) => "load_user",
        Request::Create(_) => "create",
        Request::Update(_) => "update",
        Request::Delete(_) => "delete",
    }
}
