//! The end-to-end test workflow.
//!
//! One pass per invocation, strictly sequenced: validate parameters, resolve
//! the project directory, resolve (possibly build) the root, inspect the
//! library, pick a device, boot it if needed, hand off to the test harness.
//! Any failure aborts the run; nothing is retried and nothing already done
//! (a finished build, a booted device) is rolled back.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nix::unistd::Uid;
use tracing::{info, warn};

use crate::command::Runner;
use crate::config::Config;
use crate::dylib;
use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::matcher;
use crate::platform::HOST_ARCH;

/// Parameters for one test run, as collected by the CLI.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Explicit device udid or name; inferred from the library if absent.
    pub device_id: Option<String>,
    /// Explicit project directory; located by walking up from the invoking
    /// executable if absent.
    pub project_directory: Option<PathBuf>,
    /// Build the root from source with buildit, using this release train.
    pub buildit_train: Option<String>,
    /// Use a pre-built root at this path.
    pub root: Option<PathBuf>,
}

/// Where the root comes from; settled before any subprocess runs.
enum RootSource<'a> {
    Build { train: &'a str },
    Prebuilt { root: &'a Path },
}

fn validate(request: &RunRequest) -> Result<RootSource<'_>> {
    match (&request.buildit_train, &request.root) {
        (Some(train), None) => Ok(RootSource::Build { train }),
        (None, Some(root)) => Ok(RootSource::Prebuilt { root }),
        _ => Err(Error::Usage(
            "must specify exactly one of --buildit-train and --root".to_string(),
        )),
    }
}

/// Drives the whole workflow against a [`Runner`].
pub struct Orchestrator {
    config: Config,
    runner: Arc<dyn Runner>,
}

impl Orchestrator {
    pub fn new(runner: Arc<dyn Runner>) -> Self {
        Self::with_config(Config::default(), runner)
    }

    pub fn with_config(config: Config, runner: Arc<dyn Runner>) -> Self {
        Self { config, runner }
    }

    /// Run the full workflow. The harness's exit status is the last thing
    /// checked, so success here means the test suite passed.
    pub fn run(&self, request: &RunRequest) -> Result<()> {
        let source = validate(request)?;

        if matches!(source, RootSource::Build { .. }) && !Uid::effective().is_root() {
            warn!("not running as root; buildit will attempt to sudo, be ready to authenticate");
        }

        let project_directory = match &request.project_directory {
            Some(dir) => dir.clone(),
            None => {
                let argv0 = std::env::args().next().unwrap_or_default();
                find_project_directory(Path::new(&argv0), &self.config.project_marker)?
            }
        };

        let root = match source {
            RootSource::Build { train } => self.build_root(train, &project_directory)?,
            RootSource::Prebuilt { root } => self.stage_root(root)?,
        };

        let library = root.join(&self.config.library_subpath);
        let lib_info =
            dylib::lib_info(self.runner.as_ref(), &self.config, &library, HOST_ARCH)?;

        let inventory = Inventory::load(self.runner.as_ref(), &self.config)?;
        let device = match &request.device_id {
            Some(hint) => matcher::by_hint(&inventory, hint)?,
            None => matcher::by_target(&inventory, lib_info.os, &lib_info.version)?,
        };
        info!(
            "found device {} {} ({} {})",
            device.name, device.udid, device.runtime.platform, device.runtime.version
        );

        if !device.is_booted() {
            info!("device not booted, booting it now");
            Inventory::boot(self.runner.as_ref(), &self.config, &device.udid)?;
        }

        info!("running tests");
        let script = project_directory.join(&self.config.test_script_subpath);
        let root_arg = format!("ROOT={}", root.display());
        let os_arg = format!("OS={}", lib_info.os.simulator_tag());
        let device_arg = format!("DEVICE={}", device.udid);
        let arch_arg = format!("ARCH={HOST_ARCH}");
        self.runner.run(
            &script,
            &[
                root_arg.as_str(),
                os_arg.as_str(),
                device_arg.as_str(),
                arch_arg.as_str(),
            ],
        )
    }

    /// Build the root from source with buildit, elevated through sudo.
    fn build_root(&self, train: &str, project_directory: &Path) -> Result<PathBuf> {
        info!("building objc4 with buildit");
        let buildit = self.config.buildit.display().to_string();
        let project_directory = project_directory.display().to_string();
        self.runner.run(
            &self.config.sudo,
            &[
                buildit.as_str(),
                "-release",
                train,
                "-project",
                self.config.buildit_project.as_str(),
                project_directory.as_str(),
            ],
        )?;
        Ok(self.config.built_root.clone())
    }

    /// Use a pre-built root, copying it to local disk first if it lives on
    /// an NFS mount. Running tests straight off NFS is slow and flaky.
    fn stage_root(&self, root: &Path) -> Result<PathBuf> {
        let marker = OsStr::new(self.config.nfs_marker.as_str());
        if !root.components().any(|c| c.as_os_str() == marker) {
            return Ok(root.to_path_buf());
        }

        let staging = &self.config.nfs_staging_root;
        info!("NFS root detected, copying to {}", staging.display());
        if staging.exists() {
            fs::remove_dir_all(staging)?;
        }
        copy_dir_recursive(root, staging)?;
        Ok(staging.clone())
    }
}

/// Walk upward from the invoking executable's path until a directory
/// containing `marker` is found.
pub fn find_project_directory(start: &Path, marker: &str) -> Result<PathBuf> {
    let mut dir = start.to_path_buf();
    while dir.pop() {
        if dir.join(marker).exists() {
            return Ok(dir);
        }
    }
    Err(Error::ProjectDirectoryNotFound(marker.to_string()))
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if path.is_dir() {
            copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_project_directory_above_executable() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("objc4");
        let nested = project.join("build").join("tools");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(project.join("objc.xcodeproj")).unwrap();

        let found =
            find_project_directory(&nested.join("simtest"), "objc.xcodeproj").unwrap();
        assert_eq!(found, project);
    }

    #[test]
    fn missing_marker_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_project_directory(&dir.path().join("simtest"), "objc.xcodeproj")
            .unwrap_err();
        assert!(matches!(err, Error::ProjectDirectoryNotFound(_)));
    }

    #[test]
    fn validate_rejects_both_sources() {
        let request = RunRequest {
            buildit_train: Some("Train".to_string()),
            root: Some(PathBuf::from("/roots/r1")),
            ..Default::default()
        };
        assert!(matches!(validate(&request), Err(Error::Usage(_))));
    }

    #[test]
    fn validate_rejects_neither_source() {
        assert!(matches!(validate(&RunRequest::default()), Err(Error::Usage(_))));
    }

    #[test]
    fn copy_dir_recursive_copies_nested_tree() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("usr/lib")).unwrap();
        fs::write(src.path().join("usr/lib/libobjc.A.dylib"), b"dylib").unwrap();

        let target = dst.path().join("root");
        copy_dir_recursive(src.path(), &target).unwrap();
        assert_eq!(
            fs::read(target.join("usr/lib/libobjc.A.dylib")).unwrap(),
            b"dylib"
        );
    }
}
