//! Run objc4 library tests in the iOS Simulator.
//!
//! Figures out which simulator device matches the libobjc build under test,
//! boots it if necessary, and hands off to the objc4 test harness.
//!
//! # Usage
//!
//! ```bash
//! # Test a root that buildit already produced
//! simtest --root /tmp/objc4_Sim_objc4.roots/BuildRecords/objc4_Sim_install/Root
//!
//! # Build from source first (buildit will sudo)
//! simtest --buildit-train StarTrain
//!
//! # Pin a specific simulator instead of inferring one from the library
//! simtest --root /path/to/root --device-id "iPhone 14"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simtest_core::command::{Runner, SystemRunner};
use simtest_core::orchestrator::{Orchestrator, RunRequest};
use tracing_subscriber::EnvFilter;

/// Run objc4 tests in the simulator.
#[derive(Parser)]
#[command(name = "simtest")]
#[command(about = "Run objc4 tests in the simulator")]
#[command(version)]
struct Cli {
    /// UDID or name of device (from `xcrun simctl list devices`)
    #[arg(long)]
    device_id: Option<String>,

    /// Directory containing objc.xcodeproj (located automatically if omitted)
    #[arg(long)]
    project_directory: Option<PathBuf>,

    /// Build the project with buildit using the specified train
    #[arg(long)]
    buildit_train: Option<String>,

    /// Test the libobjc in the specified root
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let request = RunRequest {
        device_id: cli.device_id,
        project_directory: cli.project_directory,
        buildit_train: cli.buildit_train,
        root: cli.root,
    };

    let runner: Arc<dyn Runner> = Arc::new(SystemRunner);
    match Orchestrator::new(runner).run(&request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
