use std::borrow::Cow;
use std::ffi::CStr;
use std::ffi::CString;
use std::ffi::OsStr;
use std::ffi::c_char;
use std::os::unix::ffi::OsStrExt;
use std::ptr;

use crate::ExecError;

/// Shell used by [`CommandSpec::shell`].
pub const SHELL_PATH: &str = "/bin/sh";

/// A tool path plus the argument vector handed to the privileged-execution
/// primitive.
///
/// The arguments are passed through verbatim: nothing is inserted, reordered
/// or escaped, and there is no upper bound on their number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: CString,
    args: Vec<CString>,
}

impl CommandSpec {
    pub fn new<P, I, S>(program: P, args: I) -> Result<Self, ExecError>
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Ok(Self {
            program: to_cstring(program.as_ref())?,
            args: args
                .into_iter()
                .map(|arg| to_cstring(arg.as_ref()))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Build a command from invocation arguments such as `["/usr/bin/id", "-u"]`.
    ///
    /// The first element names the tool and the whole list, tool included,
    /// becomes the argument vector. Returns `None` for an empty list.
    pub fn from_invocation<I, S>(invocation: I) -> Result<Option<Self>, ExecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = invocation
            .into_iter()
            .map(|arg| to_cstring(arg.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(args.first().cloned().map(|program| Self { program, args }))
    }

    /// `/bin/sh -c <command>`. The command string is not escaped, so pipes and
    /// redirections run as one unit under the elevated shell.
    pub fn shell(command: &str) -> Result<Self, ExecError> {
        Self::new(SHELL_PATH, ["-c", command])
    }

    pub fn program(&self) -> &CStr {
        &self.program
    }

    pub fn args(&self) -> &[CString] {
        &self.args
    }

    /// NULL-terminated `argv` borrowing from `self`.
    pub fn argv(&self) -> Vec<*const c_char> {
        self.args
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect()
    }

    pub fn program_lossy(&self) -> Cow<'_, str> {
        self.program.to_string_lossy()
    }

    /// Arguments joined with spaces, for display only.
    pub fn args_lossy(&self) -> String {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn to_cstring(value: &OsStr) -> Result<CString, ExecError> {
    CString::new(value.as_bytes()).map_err(|_| ExecError::InvalidArgument {
        argument: value.to_string_lossy().into_owned(),
    })
}
