//! Library introspection via `dyld_info`.
//!
//! `dyld_info -arch <arch> -platform <path>` prints a table whose final line
//! starts with a platform tag and the minimum OS version the library was
//! built for. That pair decides which simulator runtime can host the tests.

use std::path::Path;

use crate::command::Runner;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::{LibPlatform, Os};

/// Target platform and minimum OS version recovered from a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibInfo {
    pub os: Os,
    pub version: String,
}

/// Inspect the library at `path` for the given CPU architecture.
pub fn lib_info(
    runner: &dyn Runner,
    config: &Config,
    path: &Path,
    arch: &str,
) -> Result<LibInfo> {
    let path = path.display().to_string();
    let output = runner.output(&config.dyld_info, &["-arch", arch, "-platform", &path])?;
    parse_lib_info(&output)
}

/// Parse raw `dyld_info -platform` output.
///
/// Exposed separately from [`lib_info`] so tests can exercise the parsing
/// without spawning anything.
///
/// # Errors
///
/// [`Error::LibraryInfo`] if the output is not UTF-8, has no lines, or the
/// last line has fewer than two tokens; [`Error::UnknownLibraryPlatform`] if
/// the platform tag is outside the simulator vocabulary.
pub fn parse_lib_info(output: &[u8]) -> Result<LibInfo> {
    let text = std::str::from_utf8(output)
        .map_err(|_| Error::LibraryInfo("dyld_info output was not valid UTF-8".to_string()))?;

    let last_line = text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| Error::LibraryInfo("dyld_info output was empty".to_string()))?;

    let tokens: Vec<&str> = last_line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(Error::LibraryInfo(format!(
            "dyld_info's last line wasn't formatted like we expected: {last_line}"
        )));
    }

    let platform = LibPlatform::parse(tokens[0])
        .ok_or_else(|| Error::UnknownLibraryPlatform(tokens[0].to_string()))?;

    Ok(LibInfo {
        os: platform.os(),
        version: tokens[1].to_string(),
    })
}
