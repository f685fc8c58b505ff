//! Fixed paths and names used by the orchestrator.
//!
//! These are conventions of the objc4 project and the Apple toolchain, not
//! user-tunable settings. They live in one struct so tests can redirect each
//! one independently; production code always uses [`Config::default`].

use std::path::PathBuf;

const XCRUN: &str = "/usr/bin/xcrun";
const DYLD_INFO: &str = "/usr/bin/dyld_info";
const SUDO: &str = "/usr/bin/sudo";
const BUILDIT: &str = "/usr/local/bin/buildit";
const BUILDIT_PROJECT: &str = "objc4_Sim";
const BUILT_ROOT: &str = "/tmp/objc4_Sim_objc4.roots/BuildRecords/objc4_Sim_install/Root";
const PROJECT_MARKER: &str = "objc.xcodeproj";
const LIBRARY_SUBPATH: &str = "usr/lib/libobjc.A.dylib";
const TEST_SCRIPT_SUBPATH: &str = "test/test.pl";
const NFS_MARKER: &str = "SWE";
const NFS_STAGING_ROOT: &str = "/tmp/objc4-nfs-root";

/// Tool locations and project conventions for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to `xcrun`, used to reach `simctl`.
    pub xcrun: PathBuf,
    /// Path to the Mach-O introspection tool.
    pub dyld_info: PathBuf,
    /// Path to `sudo`, used to elevate the build.
    pub sudo: PathBuf,
    /// Path to the `buildit` build tool.
    pub buildit: PathBuf,
    /// Project name passed to `buildit -project`.
    pub buildit_project: String,
    /// Where `buildit` leaves the installed root.
    pub built_root: PathBuf,
    /// Directory entry that identifies the project directory.
    pub project_marker: String,
    /// Location of the library under test, relative to the root.
    pub library_subpath: PathBuf,
    /// Location of the test harness, relative to the project directory.
    pub test_script_subpath: PathBuf,
    /// Path component marking a root that lives on an NFS mount.
    pub nfs_marker: String,
    /// Local staging location for roots copied off NFS.
    pub nfs_staging_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            xcrun: PathBuf::from(XCRUN),
            dyld_info: PathBuf::from(DYLD_INFO),
            sudo: PathBuf::from(SUDO),
            buildit: PathBuf::from(BUILDIT),
            buildit_project: BUILDIT_PROJECT.to_string(),
            built_root: PathBuf::from(BUILT_ROOT),
            project_marker: PROJECT_MARKER.to_string(),
            library_subpath: PathBuf::from(LIBRARY_SUBPATH),
            test_script_subpath: PathBuf::from(TEST_SCRIPT_SUBPATH),
            nfs_marker: NFS_MARKER.to_string(),
            nfs_staging_root: PathBuf::from(NFS_STAGING_ROOT),
        }
    }
}
