//! Errors surfaced by the session layer to the collaborator that hosts it.
//! Never sent to remote clients.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game session {0} not found")]
    GameNotFound(Uuid),

    #[error("game session mailbox closed")]
    MailboxClosed,
}

impl From<actix::MailboxError> for SessionError {
    fn from(_: actix::MailboxError) -> Self {
        SessionError::MailboxClosed
    }
}
