use tracing::warn;

use crate::AuthorizationBroker;
use crate::ERR_AUTHORIZATION_INTERNAL;
use crate::OsStatus;
use crate::RightsRequest;

/// Broker for platforms without Authorization Services. Never grants anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBroker;

impl AuthorizationBroker for UnsupportedBroker {
    type Handle = ();

    fn create(&self) -> Result<(), OsStatus> {
        warn!("Authorization Services are only available on macOS");
        Err(ERR_AUTHORIZATION_INTERNAL)
    }

    fn copy_rights(&self, _handle: &(), _request: &RightsRequest<'_>) -> Result<(), OsStatus> {
        Err(ERR_AUTHORIZATION_INTERNAL)
    }

    fn free(&self, _handle: &()) -> Result<(), OsStatus> {
        Ok(())
    }
}
