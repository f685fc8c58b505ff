//! Device selection.
//!
//! Two ways in: an explicit udid/name hint from the user, or an
//! (OS family, version) target inferred from the library under test. Either
//! way exactly one device comes out, or the run dies with a message telling
//! the user how to list or install what's missing.
//!
//! Versions are compared component-wise as numbers. `simctl` happily reports
//! "9.0" and "10.0" side by side, and a lexicographic sort would put 10
//! first.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::inventory::{Device, Inventory};
use crate::platform::Os;

/// Compare two dotted version strings numerically, component by component.
///
/// Missing components count as zero, so `"15"` equals `"15.0"`. Components
/// that fail to parse as numbers also count as zero.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let component = |s: &str, i: usize| {
        s.split('.')
            .nth(i)
            .and_then(|c| c.parse::<u64>().ok())
            .unwrap_or(0)
    };
    let len = a.split('.').count().max(b.split('.').count());
    for i in 0..len {
        match component(a, i).cmp(&component(b, i)) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

/// Select a device by udid or display name.
///
/// When the hint matches several devices (the same device name usually
/// exists under every installed runtime), the one on the numerically
/// greatest runtime version wins; ties go to the smallest udid so repeated
/// runs pick the same device.
pub fn by_hint<'a>(inventory: &'a Inventory, hint: &str) -> Result<&'a Device> {
    let matching: Vec<&Device> = inventory
        .devices
        .iter()
        .filter(|d| d.udid == hint || d.name == hint)
        .collect();

    let Some(first) = matching.first() else {
        return Err(Error::NoMatchingDevice(format!(
            "can't find device with name/udid '{hint}' - run 'xcrun simctl list devices' \
             and find a suitable device in the list"
        )));
    };

    let mut best = *first;
    for &device in &matching[1..] {
        match compare_versions(&device.runtime.version, &best.runtime.version) {
            Ordering::Greater => best = device,
            Ordering::Equal if device.udid < best.udid => best = device,
            _ => {}
        }
    }
    Ok(best)
}

/// Select the first device whose runtime matches an (OS family, version)
/// target exactly.
///
/// A runtime with an unrecognized platform string anywhere in the inventory
/// is a fatal configuration error, not something to skip over.
pub fn by_target<'a>(inventory: &'a Inventory, os: Os, version: &str) -> Result<&'a Device> {
    let mut matching = Vec::new();
    for device in &inventory.devices {
        if device.runtime.os()? == os
            && compare_versions(&device.runtime.version, version) == Ordering::Equal
        {
            matching.push(device);
        }
    }

    matching.first().copied().ok_or_else(|| {
        Error::NoMatchingDevice(format!(
            "can't find device matching: {} {version} - run 'xcrun simctl list devices' \
             to see what's installed and select a specific device with --device-id, or \
             install an appropriate simulator runtime with 'xcrun simctl runtime add <build>'",
            os.tag()
        ))
    })
}
