//! Simulator inventory from `xcrun simctl list -j`.
//!
//! The listing tool reports devices grouped under runtime identifiers, with
//! the runtimes themselves described in a separate list. This module joins
//! the two so every [`Device`] carries its [`Runtime`] inline. Devices whose
//! runtime identifier has no entry in the runtime list are dropped; stale
//! entries are normal after an Xcode upgrade and are not worth failing over.

use std::collections::HashMap;

use serde::Deserialize;

use crate::command::Runner;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::Os;

/// Device state reported by `simctl` for a running simulator.
pub const BOOTED_STATE: &str = "Booted";

/// A simulator runtime: a named, versioned OS image.
#[derive(Debug, Clone, Deserialize)]
pub struct Runtime {
    pub identifier: String,
    pub platform: String,
    pub version: String,
}

impl Runtime {
    /// The OS family this runtime provides.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownRuntimePlatform`] if `simctl` reports a platform
    /// string outside the iOS/tvOS/watchOS vocabulary.
    pub fn os(&self) -> Result<Os> {
        Os::from_runtime_platform(&self.platform).ok_or_else(|| Error::UnknownRuntimePlatform {
            identifier: self.identifier.clone(),
            platform: self.platform.clone(),
        })
    }
}

/// One simulator device, joined to the runtime it runs.
#[derive(Debug, Clone)]
pub struct Device {
    pub udid: String,
    pub name: String,
    pub state: String,
    pub runtime: Runtime,
}

impl Device {
    pub fn is_booted(&self) -> bool {
        self.state == BOOTED_STATE
    }
}

#[derive(Debug, Deserialize)]
struct RawDevice {
    udid: String,
    name: String,
    state: String,
}

#[derive(Debug, Deserialize)]
struct SimctlList {
    devices: HashMap<String, Vec<RawDevice>>,
    runtimes: Vec<Runtime>,
}

/// Read-only snapshot of the simulators installed on this machine.
#[derive(Debug, Clone)]
pub struct Inventory {
    /// All devices with a resolvable runtime, sorted by udid.
    pub devices: Vec<Device>,
}

impl Inventory {
    /// Query `simctl list -j` and decode the result.
    pub fn load(runner: &dyn Runner, config: &Config) -> Result<Inventory> {
        let data = runner.output(&config.xcrun, &["simctl", "list", "-j"])?;
        Self::from_json(&data)
    }

    /// Decode a raw `simctl list -j` document.
    ///
    /// Exposed separately from [`Inventory::load`] so tests can feed canned
    /// JSON without spawning anything.
    ///
    /// # Errors
    ///
    /// [`Error::JsonParse`] if the document is malformed or missing the
    /// `devices`/`runtimes` keys.
    pub fn from_json(data: &[u8]) -> Result<Inventory> {
        let list: SimctlList = serde_json::from_slice(data)?;

        let mut devices = Vec::new();
        for (runtime_id, raw_devices) in list.devices {
            let Some(runtime) = list.runtimes.iter().find(|r| r.identifier == runtime_id)
            else {
                continue;
            };
            for raw in raw_devices {
                devices.push(Device {
                    udid: raw.udid,
                    name: raw.name,
                    state: raw.state,
                    runtime: runtime.clone(),
                });
            }
        }

        // The devices map iterates in hash order; sort so "first match"
        // means the same device on every run.
        devices.sort_by(|a, b| a.udid.cmp(&b.udid));

        Ok(Inventory { devices })
    }

    /// Boot a device. Fire-and-forget: success of the `simctl boot` exit
    /// status is trusted, the device state is not re-read.
    pub fn boot(runner: &dyn Runner, config: &Config, udid: &str) -> Result<()> {
        runner.output(&config.xcrun, &["simctl", "boot", udid]).map(|_| ())
    }
}
