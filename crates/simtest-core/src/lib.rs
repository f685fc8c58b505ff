//! # simtest-core
//!
//! Core library for running objc4 library tests in the iOS Simulator.
//!
//! Given a built root (or instructions to build one), this crate figures out
//! which simulator device can host the library's tests, gets that device
//! running, and invokes the external test harness against it.
//!
//! ## Modules
//!
//! - [`command`] - Synchronous subprocess execution behind the [`command::Runner`] trait
//! - [`config`] - Fixed tool paths and project conventions
//! - [`inventory`] - Device/runtime inventory from `xcrun simctl list -j`
//! - [`matcher`] - Device selection by hint or by (OS, version) target
//! - [`dylib`] - Library platform/version introspection via `dyld_info`
//! - [`orchestrator`] - The sequenced end-to-end workflow
//! - [`platform`] - OS family and simulator platform vocabularies
//!
//! ## External Dependencies
//!
//! The real workflow shells out to `xcrun simctl`, `dyld_info`, optionally
//! `sudo buildit`, and the objc4 `test/test.pl` harness. All of them are
//! reached through [`command::Runner`], so everything above that trait is
//! testable without a Mac toolchain.

pub mod command;
pub mod config;
pub mod dylib;
pub mod error;
pub mod inventory;
pub mod matcher;
pub mod orchestrator;
pub mod platform;

pub use error::{Error, Result};
