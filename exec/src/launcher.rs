use std::ffi::CStr;
use std::io;
use std::io::Read;

use crate::CommandSpec;
use crate::ExecError;

/// Name of the legacy Authorization Services entry point used on macOS.
pub const EXECUTE_WITH_PRIVILEGES_SYMBOL: &CStr = c"AuthorizationExecuteWithPrivileges";

/// Starts a command with elevated privileges.
pub trait PrivilegedLauncher {
    /// Proof of authorization, borrowed for the duration of the launch.
    type Authorization;
    type Process: ElevatedProcess;

    fn launch(
        &self,
        authorization: &Self::Authorization,
        command: &CommandSpec,
    ) -> Result<Self::Process, ExecError>;
}

/// A running elevated process.
pub trait ElevatedProcess {
    /// Combined stdout and stderr of the process. Dropping it closes it.
    type Output: Read;

    /// Hand out the output channel. Returns `None` once it has been taken, or
    /// if the platform did not provide one.
    fn take_output(&mut self) -> Option<Self::Output>;

    /// Block until the process terminates. The exit status is not reported.
    fn wait(self) -> io::Result<()>;
}
