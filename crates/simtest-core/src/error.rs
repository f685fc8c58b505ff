//! Error type shared across the crate.
//!
//! Every failure in this tool is fatal for the current run: the CLI prints
//! the message and exits non-zero. The variants exist so each failure site
//! can attach enough context for the user to self-remediate, not for
//! programmatic recovery.

use std::io;

use thiserror::Error;

/// Errors that can occur while orchestrating a simulator test run.
#[derive(Error, Debug)]
pub enum Error {
    /// Contradictory or missing command-line parameters.
    #[error("{0}")]
    Usage(String),

    /// An external command exited with a non-zero status.
    #[error("{command} failed with error code {code}")]
    CommandFailed { command: String, code: i32 },

    /// An external command could not be spawned at all.
    #[error("failed to launch {command}: {source}")]
    Launch { command: String, source: io::Error },

    /// Failed to parse JSON output from the device-listing tool.
    #[error("failed to parse simctl device list: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An I/O error occurred (staging copy, directory walk).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No device in the inventory matched the request.
    #[error("{0}")]
    NoMatchingDevice(String),

    /// Walked up to the filesystem root without finding the project marker.
    #[error("could not locate a directory containing {0}")]
    ProjectDirectoryNotFound(String),

    /// The device-listing tool reported a platform string we don't know.
    #[error("don't know what OS corresponds to simulator runtime {identifier} (platform {platform})")]
    UnknownRuntimePlatform { identifier: String, platform: String },

    /// The introspection tool reported a platform tag we don't know.
    #[error("unknown library platform: {0}")]
    UnknownLibraryPlatform(String),

    /// The introspection tool's output didn't have the expected shape.
    #[error("{0}")]
    LibraryInfo(String),
}

pub type Result<T> = std::result::Result<T, Error>;
