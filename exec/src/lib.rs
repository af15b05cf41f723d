//! Run a single command with elevated privileges and relay its output.
//!
//! [`run`] launches a [`CommandSpec`] through a [`PrivilegedLauncher`], copies
//! the combined output to the caller's writer in 1 KiB chunks, closes the
//! channel and reaps the process. On macOS [`PlatformLauncher`] uses the
//! legacy `AuthorizationExecuteWithPrivileges`, which is looked up at runtime
//! because Apple may remove it; elsewhere it always fails.
//!
//! Unix only.

mod command;
mod error;
mod executor;
mod launcher;
#[cfg(target_os = "macos")]
mod macos;
pub mod pump;
mod symbol;
#[cfg(not(target_os = "macos"))]
mod unsupported;

pub use command::CommandSpec;
pub use command::SHELL_PATH;
pub use error::ExecError;
pub use executor::run;
pub use executor::run_shell;
pub use launcher::EXECUTE_WITH_PRIVILEGES_SYMBOL;
pub use launcher::ElevatedProcess;
pub use launcher::PrivilegedLauncher;
#[cfg(target_os = "macos")]
pub use macos::CommunicationsPipe;
#[cfg(target_os = "macos")]
pub use macos::SecurityLauncher;
#[cfg(target_os = "macos")]
pub use macos::SecurityProcess;
pub use symbol::SymbolProbe;
pub use symbol::lookup_default;
#[cfg(not(target_os = "macos"))]
pub use unsupported::NoProcess;
#[cfg(not(target_os = "macos"))]
pub use unsupported::UnsupportedLauncher;

#[cfg(target_os = "macos")]
pub type PlatformLauncher = SecurityLauncher;
#[cfg(not(target_os = "macos"))]
pub type PlatformLauncher = UnsupportedLauncher;
