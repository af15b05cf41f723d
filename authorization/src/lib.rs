//! Operator authorization for running privileged commands.
//!
//! [`acquire`] asks the platform security broker for the right to execute
//! privileged operations and returns an [`Authorization`] that frees the
//! broker context exactly once. On macOS the broker is Authorization Services;
//! on other platforms [`PlatformBroker`] always fails.

use std::ffi::OsStr;

mod acquire;
mod broker;
mod error;
#[cfg(target_os = "macos")]
mod macos;
mod token;
#[cfg(not(target_os = "macos"))]
mod unsupported;

pub use acquire::acquire;
pub use broker::AuthorizationBroker;
pub use broker::AuthorizationFlags;
pub use broker::ENVIRONMENT_PROMPT;
pub use broker::ERR_AUTHORIZATION_CANCELED;
pub use broker::ERR_AUTHORIZATION_DENIED;
pub use broker::ERR_AUTHORIZATION_INTERACTION_NOT_ALLOWED;
pub use broker::ERR_AUTHORIZATION_INTERNAL;
pub use broker::ERR_AUTHORIZATION_SUCCESS;
pub use broker::EXECUTE_RIGHT;
pub use broker::OsStatus;
pub use broker::RightsRequest;
pub use error::AuthorizationError;
#[cfg(target_os = "macos")]
pub use macos::AuthorizationRef;
#[cfg(target_os = "macos")]
pub use macos::SecurityAuthorizationRef;
#[cfg(target_os = "macos")]
pub use macos::SecurityBroker;
pub use token::Authorization;
#[cfg(not(target_os = "macos"))]
pub use unsupported::UnsupportedBroker;

#[cfg(target_os = "macos")]
pub type PlatformBroker = SecurityBroker;
#[cfg(not(target_os = "macos"))]
pub type PlatformBroker = UnsupportedBroker;

/// [`acquire`] with the current platform's broker.
pub fn acquire_platform(
    prompt: Option<&OsStr>,
) -> Result<Authorization<PlatformBroker>, AuthorizationError> {
    acquire(PlatformBroker::default(), prompt)
}
