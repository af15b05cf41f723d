use std::ffi::c_char;
use std::ffi::c_int;
use std::io;
use std::io::ErrorKind;
use std::io::Read;
use std::ptr;
use std::ptr::NonNull;

use privileged_authorization::Authorization;
use privileged_authorization::AuthorizationFlags;
use privileged_authorization::AuthorizationRef;
use privileged_authorization::ERR_AUTHORIZATION_SUCCESS;
use privileged_authorization::OsStatus;
use privileged_authorization::SecurityBroker;
use tracing::debug;

use crate::CommandSpec;
use crate::EXECUTE_WITH_PRIVILEGES_SYMBOL;
use crate::ElevatedProcess;
use crate::ExecError;
use crate::PrivilegedLauncher;
use crate::SymbolProbe;
use crate::lookup_default;

type AuthorizationExecuteWithPrivilegesFn = unsafe extern "C" fn(
    authorization: AuthorizationRef,
    path_to_tool: *const c_char,
    options: u32,
    arguments: *const *const c_char,
    communications_pipe: *mut *mut libc::FILE,
) -> OsStatus;

// Deprecated since 10.7 and absent from the SDK headers, so it is bound at
// runtime; a missing symbol becomes `EntryPointUnavailable`.
static EXECUTE_WITH_PRIVILEGES: SymbolProbe<AuthorizationExecuteWithPrivilegesFn> =
    SymbolProbe::new(EXECUTE_WITH_PRIVILEGES_SYMBOL);

fn execute_with_privileges() -> Option<AuthorizationExecuteWithPrivilegesFn> {
    EXECUTE_WITH_PRIVILEGES.get_or_resolve(|name| {
        let symbol = lookup_default(name)?;
        // SAFETY: every macOS release that exports this symbol gives it this signature.
        Some(unsafe {
            std::mem::transmute::<*mut libc::c_void, AuthorizationExecuteWithPrivilegesFn>(
                symbol.as_ptr(),
            )
        })
    })
}

/// Launches tools as root through `AuthorizationExecuteWithPrivileges`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecurityLauncher;

impl PrivilegedLauncher for SecurityLauncher {
    type Authorization = Authorization<SecurityBroker>;
    type Process = SecurityProcess;

    fn launch(
        &self,
        authorization: &Self::Authorization,
        command: &CommandSpec,
    ) -> Result<SecurityProcess, ExecError> {
        let Some(execute) = execute_with_privileges() else {
            return Err(ExecError::EntryPointUnavailable {
                symbol: EXECUTE_WITH_PRIVILEGES.name(),
            });
        };

        let argv = command.argv();
        let mut pipe: *mut libc::FILE = ptr::null_mut();
        let status = unsafe {
            // SAFETY: the authorization is live for the duration of the borrow,
            // `argv` is NULL-terminated and outlives the call, and `pipe` is a
            // valid out-pointer.
            execute(
                authorization.handle().as_raw(),
                command.program().as_ptr(),
                AuthorizationFlags::DEFAULTS.bits(),
                argv.as_ptr(),
                &mut pipe,
            )
        };
        if status != ERR_AUTHORIZATION_SUCCESS {
            return Err(ExecError::Launch {
                program: command.program_lossy().into_owned(),
                status,
            });
        }

        Ok(SecurityProcess {
            output: NonNull::new(pipe).map(CommunicationsPipe::new),
        })
    }
}

/// The tool started by [`SecurityLauncher`]. Its pid is not exposed by the
/// platform, so it is reaped with `wait(2)`.
#[derive(Debug)]
pub struct SecurityProcess {
    output: Option<CommunicationsPipe>,
}

impl ElevatedProcess for SecurityProcess {
    type Output = CommunicationsPipe;

    fn take_output(&mut self) -> Option<CommunicationsPipe> {
        self.output.take()
    }

    fn wait(self) -> io::Result<()> {
        drop(self.output);
        let mut status: c_int = 0;
        loop {
            // SAFETY: `status` is a valid out-pointer.
            let pid = unsafe { libc::wait(&mut status) };
            if pid != -1 {
                debug!(pid, "reaped privileged process");
                return Ok(());
            }
            let err = io::Error::last_os_error();
            if err.kind() != ErrorKind::Interrupted {
                return Err(err);
            }
        }
    }
}

/// The `FILE *` handed back by the platform, read through its descriptor and
/// closed with `fclose` on drop.
#[derive(Debug)]
pub struct CommunicationsPipe {
    file: NonNull<libc::FILE>,
    fd: c_int,
}

impl CommunicationsPipe {
    fn new(file: NonNull<libc::FILE>) -> Self {
        // SAFETY: `file` is an open stream returned by the platform.
        let fd = unsafe { libc::fileno(file.as_ptr()) };
        Self { file, fd }
    }
}

impl Read for CommunicationsPipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe {
            // SAFETY: `buf` is valid for `buf.len()` bytes; the stream has not
            // been read through stdio, so its buffer holds nothing.
            libc::read(self.fd, buf.as_mut_ptr().cast(), buf.len())
        };
        usize::try_from(n).map_err(|_| io::Error::last_os_error())
    }
}

impl Drop for CommunicationsPipe {
    fn drop(&mut self) {
        // SAFETY: the stream is still open and is closed only here.
        if unsafe { libc::fclose(self.file.as_ptr()) } != 0 {
            debug!(error = %io::Error::last_os_error(), "failed to close privileged output");
        }
    }
}
