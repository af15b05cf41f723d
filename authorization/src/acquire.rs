use std::ffi::OsStr;

use tracing::debug;

use crate::Authorization;
use crate::AuthorizationBroker;
use crate::AuthorizationError;
use crate::RightsRequest;

/// Obtain the right to execute privileged operations from `broker`.
///
/// This may put up a modal authentication dialog and block until the user
/// answers it. `prompt` is shown in that dialog when it is non-empty; its
/// bytes are handed to the broker as they are, without any UTF-8 check.
///
/// Every failure is reported as an [`AuthorizationError`]; a context that was
/// created before the failure is freed before returning.
pub fn acquire<B>(
    broker: B,
    prompt: Option<&OsStr>,
) -> Result<Authorization<B>, AuthorizationError>
where
    B: AuthorizationBroker,
{
    let handle = broker
        .create()
        .map_err(|status| AuthorizationError::ContextCreation { status })?;

    // The context is owned from here on, so early returns free it.
    let authorization = Authorization::new(broker, handle);

    let request = RightsRequest::execute(prompt.map(OsStr::as_encoded_bytes));
    debug!(
        right = ?request.right,
        flags = request.flags.bits(),
        custom_prompt = request.prompt.is_some(),
        "requesting authorization"
    );
    authorization
        .broker()
        .copy_rights(authorization.handle(), &request)
        .map_err(AuthorizationError::from_copy_rights_status)?;

    Ok(authorization)
}
