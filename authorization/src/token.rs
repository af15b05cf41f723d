use std::fmt;

use tracing::debug;
use tracing::warn;

use crate::broker::AuthorizationBroker;

/// A granted authorization.
///
/// The value owns the broker's context: it cannot be cloned, it is lent to
/// consumers by reference, and the context is freed exactly once, either by
/// [`Authorization::release`] or when the value is dropped.
pub struct Authorization<B: AuthorizationBroker> {
    broker: B,
    handle: B::Handle,
}

impl<B: AuthorizationBroker> Authorization<B> {
    pub(crate) fn new(broker: B, handle: B::Handle) -> Self {
        Self { broker, handle }
    }

    pub(crate) fn broker(&self) -> &B {
        &self.broker
    }

    /// The raw context, for handing to the platform's execution primitive.
    pub fn handle(&self) -> &B::Handle {
        &self.handle
    }

    /// Free the authorization context now.
    pub fn release(self) {
        drop(self);
    }
}

impl<B: AuthorizationBroker> Drop for Authorization<B> {
    fn drop(&mut self) {
        match self.broker.free(&self.handle) {
            Ok(()) => debug!("released authorization"),
            Err(status) => warn!(status, "Failed to release authorization"),
        }
    }
}

impl<B: AuthorizationBroker> fmt::Debug for Authorization<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorization").finish_non_exhaustive()
    }
}
