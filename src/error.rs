use std::fmt::{Display, Formatter};

/// Result type for application plumbing (terminal, config files, startup).
pub type Result<T> = anyhow::Result<T>;

/// The remote call a [`RemoteError`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Operation::ListUsers => "list users",
            Operation::GetUser => "get user",
            Operation::CreateUser => "create user",
            Operation::UpdateUser => "update user",
            Operation::DeleteUser => "delete user",
        };
        f.write_str(s)
    }
}

/// A remote operation failed.
///
/// Transport errors, non-success statuses and undecodable bodies all end up
/// here; callers only ever need to know that the call did not succeed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {reason}")]
pub struct RemoteError {
    pub operation: Operation,
    pub reason: String,
}

impl RemoteError {
    pub fn new(operation: Operation, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }

    pub fn from_reqwest(operation: Operation, err: reqwest::Error) -> Self {
        Self::new(operation, err.to_string())
    }
}
