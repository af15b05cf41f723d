//! Unprivileged stand-ins for the platform broker and launcher.
//!
//! `LocalLauncher` starts the tool the way `AuthorizationExecuteWithPrivileges`
//! does (the tool path is the program, the argument vector follows it) but as
//! the current user, with stdout and stderr sharing one pipe.

use std::cell::Cell;
use std::cell::RefCell;
use std::ffi::OsStr;
use std::io;
use std::io::PipeReader;
use std::os::unix::ffi::OsStrExt;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;
use std::rc::Rc;

use privileged_authorization::Authorization;
use privileged_authorization::AuthorizationBroker;
use privileged_authorization::OsStatus;
use privileged_authorization::RightsRequest;
use privileged_authorization::acquire;
use privileged_exec::CommandSpec;
use privileged_exec::ElevatedProcess;
use privileged_exec::ExecError;
use privileged_exec::PrivilegedLauncher;

/// Grants every request and counts live contexts.
#[derive(Debug, Clone, Default)]
pub struct GrantingBroker {
    pub live: Rc<Cell<usize>>,
    pub freed: Rc<Cell<usize>>,
}

impl AuthorizationBroker for GrantingBroker {
    type Handle = ();

    fn create(&self) -> Result<(), OsStatus> {
        self.live.set(self.live.get() + 1);
        Ok(())
    }

    fn copy_rights(&self, _handle: &(), _request: &RightsRequest<'_>) -> Result<(), OsStatus> {
        Ok(())
    }

    fn free(&self, _handle: &()) -> Result<(), OsStatus> {
        self.live.set(self.live.get() - 1);
        self.freed.set(self.freed.get() + 1);
        Ok(())
    }
}

pub fn granted() -> (Authorization<GrantingBroker>, GrantingBroker) {
    let broker = GrantingBroker::default();
    let authorization = acquire(broker.clone(), None).expect("granting broker never fails");
    (authorization, broker)
}

#[derive(Debug, Default)]
pub struct LocalLauncher {
    pub launches: RefCell<Vec<(String, Vec<String>)>>,
    live: Rc<Cell<usize>>,
    /// Live authorization contexts observed at launch time.
    pub live_at_launch: Cell<Option<usize>>,
}

impl LocalLauncher {
    pub fn watching(broker: &GrantingBroker) -> Self {
        Self {
            live: Rc::clone(&broker.live),
            ..Default::default()
        }
    }
}

impl PrivilegedLauncher for LocalLauncher {
    type Authorization = Authorization<GrantingBroker>;
    type Process = LocalProcess;

    fn launch(
        &self,
        _authorization: &Self::Authorization,
        command: &CommandSpec,
    ) -> Result<LocalProcess, ExecError> {
        self.live_at_launch.set(Some(self.live.get()));
        self.launches.borrow_mut().push((
            command.program_lossy().into_owned(),
            command
                .args()
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        ));

        let spawn_error = |source: io::Error| ExecError::Spawn {
            program: command.program_lossy().into_owned(),
            source,
        };
        let (reader, writer) = io::pipe().map_err(spawn_error)?;
        // The command (and with it our copies of the write end) is dropped
        // right after spawning, so the reader sees EOF when the tool exits.
        let child = Command::new(OsStr::from_bytes(command.program().to_bytes()))
            .args(
                command
                    .args()
                    .iter()
                    .map(|arg| OsStr::from_bytes(arg.to_bytes())),
            )
            .stdin(Stdio::null())
            .stdout(writer.try_clone().map_err(spawn_error)?)
            .stderr(writer)
            .spawn()
            .map_err(spawn_error)?;

        Ok(LocalProcess {
            output: Some(reader),
            child,
        })
    }
}

pub struct LocalProcess {
    output: Option<PipeReader>,
    child: Child,
}

impl ElevatedProcess for LocalProcess {
    type Output = PipeReader;

    fn take_output(&mut self) -> Option<PipeReader> {
        self.output.take()
    }

    fn wait(mut self) -> io::Result<()> {
        drop(self.output.take());
        self.child.wait().map(drop)
    }
}
