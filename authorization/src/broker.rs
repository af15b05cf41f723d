use std::ffi::CStr;

use bitflags::bitflags;

/// Status code returned by Authorization Services (`OSStatus`).
pub type OsStatus = i32;

pub const ERR_AUTHORIZATION_SUCCESS: OsStatus = 0;
pub const ERR_AUTHORIZATION_DENIED: OsStatus = -60005;
pub const ERR_AUTHORIZATION_CANCELED: OsStatus = -60006;
pub const ERR_AUTHORIZATION_INTERACTION_NOT_ALLOWED: OsStatus = -60007;
pub const ERR_AUTHORIZATION_INTERNAL: OsStatus = -60008;

/// `kAuthorizationRightExecute`: permission to run tools as root.
pub const EXECUTE_RIGHT: &CStr = c"system.privilege.admin";

/// `kAuthorizationEnvironmentPrompt`: extra text for the authorization dialog.
pub const ENVIRONMENT_PROMPT: &CStr = c"prompt";

bitflags! {
    /// Mirrors `AuthorizationFlags` from `Security/Authorization.h`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AuthorizationFlags: u32 {
        const INTERACTION_ALLOWED = 1 << 0;
        const EXTEND_RIGHTS = 1 << 1;
        const PARTIAL_RIGHTS = 1 << 2;
        const DESTROY_RIGHTS = 1 << 3;
        const PRE_AUTHORIZE = 1 << 4;
        const NO_DATA = 1 << 20;
    }
}

impl AuthorizationFlags {
    /// `kAuthorizationFlagDefaults`.
    pub const DEFAULTS: Self = Self::empty();
}

/// A request to grant a single right, optionally with a custom prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RightsRequest<'a> {
    pub right: &'static CStr,
    pub flags: AuthorizationFlags,
    /// Raw prompt bytes, passed by length. Never `Some(b"")`; an empty prompt
    /// means the platform default.
    pub prompt: Option<&'a [u8]>,
}

impl<'a> RightsRequest<'a> {
    /// Ask for the execute right, allowing the user to be prompted and
    /// validating the grant right away instead of at execution time.
    pub fn execute(prompt: Option<&'a [u8]>) -> Self {
        Self {
            right: EXECUTE_RIGHT,
            flags: AuthorizationFlags::INTERACTION_ALLOWED
                | AuthorizationFlags::EXTEND_RIGHTS
                | AuthorizationFlags::PRE_AUTHORIZE,
            prompt: prompt.filter(|prompt| !prompt.is_empty()),
        }
    }
}

/// The platform security broker.
///
/// Implementations talk to the OS (Security.framework on macOS); tests provide
/// in-memory brokers. `Handle` is the raw authorization context, which is
/// owned by an [`crate::Authorization`] once created.
pub trait AuthorizationBroker {
    type Handle;

    /// Create an empty authorization context.
    fn create(&self) -> Result<Self::Handle, OsStatus>;

    /// Grant the requested rights on `handle`. May block on user interaction.
    fn copy_rights(
        &self,
        handle: &Self::Handle,
        request: &RightsRequest<'_>,
    ) -> Result<(), OsStatus>;

    /// Release `handle`. Called exactly once per created handle.
    fn free(&self, handle: &Self::Handle) -> Result<(), OsStatus>;
}
