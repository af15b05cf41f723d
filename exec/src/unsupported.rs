use std::fmt;
use std::io;
use std::marker::PhantomData;

use privileged_authorization::Authorization;
use privileged_authorization::UnsupportedBroker;
use tracing::debug;

use crate::CommandSpec;
use crate::EXECUTE_WITH_PRIVILEGES_SYMBOL;
use crate::ElevatedProcess;
use crate::ExecError;
use crate::PrivilegedLauncher;

/// Launcher for platforms without Authorization Services.
///
/// Every launch fails with [`ExecError::EntryPointUnavailable`], whatever
/// authorization `A` it is handed.
pub struct UnsupportedLauncher<A = Authorization<UnsupportedBroker>> {
    _authorization: PhantomData<fn(&A)>,
}

impl<A> Default for UnsupportedLauncher<A> {
    fn default() -> Self {
        Self {
            _authorization: PhantomData,
        }
    }
}

impl<A> fmt::Debug for UnsupportedLauncher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UnsupportedLauncher")
    }
}

/// Never constructed.
#[derive(Debug)]
pub enum NoProcess {}

impl<A> PrivilegedLauncher for UnsupportedLauncher<A> {
    type Authorization = A;
    type Process = NoProcess;

    fn launch(&self, _authorization: &A, command: &CommandSpec) -> Result<NoProcess, ExecError> {
        debug!(program = %command.program_lossy(), "privileged execution is unsupported here");
        Err(ExecError::EntryPointUnavailable {
            symbol: EXECUTE_WITH_PRIVILEGES_SYMBOL,
        })
    }
}

impl ElevatedProcess for NoProcess {
    type Output = io::Empty;

    fn take_output(&mut self) -> Option<io::Empty> {
        match *self {}
    }

    fn wait(self) -> io::Result<()> {
        match self {}
    }
}
