use std::io::Write;

use tracing::debug;

use crate::CommandSpec;
use crate::ElevatedProcess;
use crate::ExecError;
use crate::PrivilegedLauncher;
use crate::pump;

/// Run `command` with elevated privileges and stream its combined output to
/// `stdout`.
///
/// Success means the command was started: its output has been drained, the
/// channel closed and the process reaped. The command's own exit status is
/// ignored, since the tool being run may legitimately fail on this machine.
pub fn run<L, W>(
    launcher: &L,
    authorization: &L::Authorization,
    command: &CommandSpec,
    stdout: &mut W,
) -> Result<(), ExecError>
where
    L: PrivilegedLauncher,
    W: Write + ?Sized,
{
    debug!(
        program = %command.program_lossy(),
        args = command.args().len(),
        "launching privileged command"
    );
    let mut process = launcher.launch(authorization, command)?;

    if let Some(output) = process.take_output() {
        let forwarded = pump::drain(output, stdout);
        debug!(bytes = forwarded, "privileged output closed");
    }

    // Reap only after the channel is closed, so the child is never left a zombie.
    if let Err(err) = process.wait() {
        debug!(error = %err, "failed to reap privileged process");
    }
    Ok(())
}

/// Run a shell command line under `/bin/sh -c` with elevated privileges.
///
/// `command` is not escaped; the caller is responsible for its contents.
pub fn run_shell<L, W>(
    launcher: &L,
    authorization: &L::Authorization,
    command: &str,
    stdout: &mut W,
) -> Result<(), ExecError>
where
    L: PrivilegedLauncher,
    W: Write + ?Sized,
{
    run(launcher, authorization, &CommandSpec::shell(command)?, stdout)
}
