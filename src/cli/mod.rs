//! Command line interface for desktop_update_metadata.
//!
//! Parses arguments, runs the pipeline once and reports the outcome.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::Result;
use crate::pipeline;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args)
}

/// Execute the pipeline for already-parsed arguments.
///
/// Argument validation failures return exit code 1 without running anything.
/// Pipeline failures are returned as errors for the caller to report.
pub fn execute(args: &Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = OutputManager::new(false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let runtime = RuntimeConfig::from(args);
    let config = args.pipeline_config();
    log::debug!("Pipeline configuration: {:?}", config);

    let summary = pipeline::run(&config, args.env_sink().as_ref(), &runtime)?;

    runtime.output().section("Finished");
    runtime.output().success(&format!(
        "Published {} {} metadata ({} feed files)",
        summary.version.version(),
        summary.version.channel(),
        summary.feeds.len()
    ));
    Ok(0)
}
