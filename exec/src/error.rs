use std::ffi::CStr;
use std::io;

use privileged_authorization::OsStatus;

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("argument contains an interior NUL byte: {argument:?}")]
    InvalidArgument { argument: String },

    /// The platform no longer exports the privileged-execution primitive.
    #[error("{} is not available on this system", .symbol.to_string_lossy())]
    EntryPointUnavailable { symbol: &'static CStr },

    #[error("privileged launch of {program} failed (OSStatus {status})")]
    Launch { program: String, status: OsStatus },

    /// Reported by launchers built on `std::process`, such as test doubles
    /// that run the command unprivileged.
    #[error("failed to spawn {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}
