//! Command-line front end for running one command with administrator rights.

use std::ffi::OsString;
use std::io;
use std::io::Write;

use clap::Parser;
use privileged_authorization::Authorization;
use privileged_authorization::AuthorizationBroker;
use privileged_authorization::PlatformBroker;
use privileged_authorization::acquire;
use privileged_exec::CommandSpec;
use privileged_exec::ExecError;
use privileged_exec::PlatformLauncher;
use privileged_exec::PrivilegedLauncher;
use privileged_exec::run;
use tracing::debug;

/// Printed to stderr when the operator does not grant administrator rights.
pub const AUTHORIZATION_FAILED: &str = "Authorization failed.";

/// Run a command with administrator rights after asking the operator.
///
/// The command's combined stdout and stderr are copied to stdout. The exit
/// code is 0 when the command was started, whatever its own exit status.
#[derive(Debug, Parser)]
#[command(name = "privileged", version)]
pub struct Cli {
    /// Text shown in the authorization dialog. Taken as raw bytes, so it does
    /// not have to be UTF-8.
    #[arg(long, env = "AUTH_PROMPT", value_name = "TEXT")]
    pub prompt: Option<OsString>,

    /// Run COMMAND through `/bin/sh -c` instead of executing a tool directly.
    #[arg(
        short = 'c',
        long = "shell",
        value_name = "COMMAND",
        conflicts_with = "command"
    )]
    pub shell: Option<String>,

    /// Absolute path of the tool followed by its arguments.
    #[arg(value_name = "COMMAND", trailing_var_arg = true)]
    pub command: Vec<OsString>,
}

impl Cli {
    /// The command to run, or `None` when nothing was requested.
    pub fn command_spec(&self) -> Result<Option<CommandSpec>, ExecError> {
        match &self.shell {
            Some(shell) => CommandSpec::shell(shell).map(Some),
            None => CommandSpec::from_invocation(&self.command),
        }
    }
}

/// Run `cli` with the current platform's broker and launcher, returning the
/// process exit code.
///
/// Only an authorization failure is reported on stderr. Every other failure
/// is logged at `debug` and surfaces as exit code 1.
pub fn run_main(cli: &Cli) -> i32 {
    run_with(
        cli,
        PlatformBroker::default(),
        &PlatformLauncher::default(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

pub fn run_with<B, L>(
    cli: &Cli,
    broker: B,
    launcher: &L,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32
where
    B: AuthorizationBroker,
    L: PrivilegedLauncher<Authorization = Authorization<B>>,
{
    let command = match cli.command_spec() {
        Ok(Some(command)) => command,
        Ok(None) => return 0,
        Err(err) => {
            debug!("{err}");
            return 1;
        }
    };

    let authorization = match acquire(broker, cli.prompt.as_deref()) {
        Ok(authorization) => authorization,
        Err(err) => {
            debug!(status = err.status(), "{err}");
            if let Err(err) = writeln!(stderr, "{AUTHORIZATION_FAILED}") {
                debug!(error = %err, "failed to report authorization failure");
            }
            return 1;
        }
    };

    if let Err(err) = echo_command_line(stdout, &command) {
        debug!(error = %err, "failed to echo command line");
    }

    let exit_code = match run(launcher, &authorization, &command, stdout) {
        Ok(()) => 0,
        Err(err) => {
            debug!("{err}");
            1
        }
    };
    authorization.release();
    exit_code
}

fn echo_command_line(stdout: &mut dyn Write, command: &CommandSpec) -> io::Result<()> {
    writeln!(stdout)?;
    for arg in command.args() {
        write!(stdout, " {}", arg.to_string_lossy())?;
    }
    writeln!(stdout)?;
    stdout.flush()
}
