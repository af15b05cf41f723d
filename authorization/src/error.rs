use crate::broker::ERR_AUTHORIZATION_CANCELED;
use crate::broker::ERR_AUTHORIZATION_DENIED;
use crate::broker::ERR_AUTHORIZATION_INTERACTION_NOT_ALLOWED;
use crate::broker::OsStatus;

/// Why an authorization could not be obtained.
///
/// Callers generally treat every variant the same way; the variants exist so
/// the underlying `OSStatus` can still be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("failed to create an authorization context (OSStatus {status})")]
    ContextCreation { status: OsStatus },

    #[error("authorization was canceled by the user")]
    Canceled,

    #[error("authorization was denied")]
    Denied,

    #[error("authorization needs user interaction, which is not available")]
    InteractionNotAllowed,

    #[error("authorization broker failed (OSStatus {status})")]
    Broker { status: OsStatus },
}

impl AuthorizationError {
    /// Classify a failed `AuthorizationCopyRights` status.
    pub(crate) fn from_copy_rights_status(status: OsStatus) -> Self {
        match status {
            ERR_AUTHORIZATION_CANCELED => Self::Canceled,
            ERR_AUTHORIZATION_DENIED => Self::Denied,
            ERR_AUTHORIZATION_INTERACTION_NOT_ALLOWED => Self::InteractionNotAllowed,
            status => Self::Broker { status },
        }
    }

    /// The platform status code behind this error.
    pub fn status(self) -> OsStatus {
        match self {
            Self::ContextCreation { status } | Self::Broker { status } => status,
            Self::Canceled => ERR_AUTHORIZATION_CANCELED,
            Self::Denied => ERR_AUTHORIZATION_DENIED,
            Self::InteractionNotAllowed => ERR_AUTHORIZATION_INTERACTION_NOT_ALLOWED,
        }
    }
}
