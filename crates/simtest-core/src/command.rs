//! Synchronous subprocess execution.
//!
//! Everything this tool does to the outside world goes through the [`Runner`]
//! trait: one narrow surface (program, argument vector, capture flag) that the
//! orchestrator, inventory reader, and artifact inspector all share, and that
//! tests replace with a scripted mock.
//!
//! A non-zero exit status is always an error here; no caller in this crate
//! retries or recovers from a failed subprocess.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{Error, Result};

/// Executes external programs on behalf of the rest of the crate.
pub trait Runner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// When `capture_stdout` is true the child's standard output is collected
    /// and returned; otherwise it passes through to the invoking terminal and
    /// the returned buffer is empty. Standard error always passes through.
    ///
    /// # Errors
    ///
    /// - [`Error::Launch`] if the program cannot be spawned
    /// - [`Error::CommandFailed`] if it exits with a non-zero status
    fn run_with_capture(&self, program: &Path, args: &[&str], capture_stdout: bool)
        -> Result<Vec<u8>>;

    /// Run a command whose output the caller doesn't need.
    fn run(&self, program: &Path, args: &[&str]) -> Result<()> {
        self.run_with_capture(program, args, false).map(|_| ())
    }

    /// Run a command and collect its standard output.
    fn output(&self, program: &Path, args: &[&str]) -> Result<Vec<u8>> {
        self.run_with_capture(program, args, true)
    }
}

/// The real [`Runner`], backed by [`std::process::Command`].
///
/// The child is deliberately left in the caller's process group (the default
/// for `std::process::Command` on unix). The build path shells out to `sudo`,
/// and its password prompt only works while the child shares our controlling
/// terminal session.
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run_with_capture(&self, program: &Path, args: &[&str], capture_stdout: bool)
        -> Result<Vec<u8>>
    {
        info!("  Executing: {} {}", program.display(), args.join(" "));

        let mut command = Command::new(program);
        command.args(args);
        if capture_stdout {
            command.stdout(Stdio::piped());
        }

        let mut child = command.spawn().map_err(|source| Error::Launch {
            command: program.display().to_string(),
            source,
        })?;

        // Drain the pipe before waiting, or a chatty child deadlocks.
        let mut stdout = Vec::new();
        if let Some(mut pipe) = child.stdout.take() {
            pipe.read_to_end(&mut stdout)?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(Error::CommandFailed {
                command: program.display().to_string(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn captures_stdout() {
        let out = SystemRunner
            .output(&PathBuf::from("/bin/echo"), &["hello"])
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&out).trim(), "hello");
    }

    #[test]
    fn passthrough_returns_empty_buffer() {
        let out = SystemRunner
            .run_with_capture(&PathBuf::from("/bin/echo"), &["hello"], false)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn nonzero_exit_is_fatal() {
        let err = SystemRunner
            .run(&PathBuf::from("/bin/sh"), &["-c", "exit 3"])
            .unwrap_err();
        match err {
            Error::CommandFailed { code, .. } => assert_eq!(code, 3),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_launch_error() {
        let err = SystemRunner
            .run(&PathBuf::from("/nonexistent/definitely-not-a-tool"), &[])
            .unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
    }
}
