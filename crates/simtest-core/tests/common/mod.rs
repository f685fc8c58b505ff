//! Shared test helpers for simtest-core integration tests.
//!
//! Provides a scripted [`Runner`] that records every command the
//! orchestrator issues and answers the two commands whose output the
//! workflow consumes (`simctl list -j` and `dyld_info`).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use simtest_core::command::Runner;
use simtest_core::error::Result;

/// One recorded subprocess invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub capture: bool,
}

impl RecordedCall {
    /// File name of the invoked program, for terse assertions.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// A [`Runner`] that never spawns anything.
pub struct ScriptedRunner {
    calls: Mutex<Vec<RecordedCall>>,
    device_list: Vec<u8>,
    dyld_info: Vec<u8>,
}

impl ScriptedRunner {
    pub fn new(device_list: impl Into<Vec<u8>>, dyld_info: impl Into<Vec<u8>>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            device_list: device_list.into(),
            dyld_info: dyld_info.into(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The recorded calls whose program file name matches `name`.
    pub fn calls_to(&self, name: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.program_name() == name)
            .collect()
    }
}

impl Runner for ScriptedRunner {
    fn run_with_capture(&self, program: &Path, args: &[&str], capture_stdout: bool)
        -> Result<Vec<u8>>
    {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_path_buf(),
            args: args.iter().map(|a| a.to_string()).collect(),
            capture: capture_stdout,
        });

        let name = program.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name == "xcrun" && args.first() == Some(&"simctl") && args.get(1) == Some(&"list") {
            return Ok(self.device_list.clone());
        }
        if name == "dyld_info" {
            return Ok(self.dyld_info.clone());
        }
        Ok(Vec::new())
    }
}

/// A `simctl list -j` document with one iOS 15.0 device in the given state
/// and one iOS 9.0 device that only an explicit hint can reach.
pub fn device_list(state: &str) -> String {
    format!(
        r#"{{
            "devices": {{
                "com.apple.CoreSimulator.SimRuntime.iOS-15-0": [
                    {{
                        "udid": "UDID-NEW-15",
                        "name": "iPhone 14",
                        "state": "{state}"
                    }}
                ],
                "com.apple.CoreSimulator.SimRuntime.iOS-9-0": [
                    {{
                        "udid": "UDID-OLD-9",
                        "name": "iPhone X",
                        "state": "Shutdown"
                    }}
                ]
            }},
            "runtimes": [
                {{
                    "identifier": "com.apple.CoreSimulator.SimRuntime.iOS-15-0",
                    "platform": "iOS",
                    "version": "15.0"
                }},
                {{
                    "identifier": "com.apple.CoreSimulator.SimRuntime.iOS-9-0",
                    "platform": "iOS",
                    "version": "9.0"
                }}
            ]
        }}"#
    )
}

/// `dyld_info -platform` output for an iOS simulator library, minOS 15.0.
pub const DYLD_INFO_IOS_15: &str = " platform     minOS      sdk\n iOS-sim 15.0 18.0\n";
