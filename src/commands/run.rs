//! Run command - execute the full gate against a project root.

use anyhow::Result;
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::debug;

use crate::artifacts::{ArtifactSet, ProjectRoot};
use crate::checks;
use crate::report::GateReport;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, one line per check
    Text,
    /// Machine-readable report for CI integration
    Json,
}

/// Run the gate. Returns `Ok(true)` iff the aggregate verdict is Pass.
///
/// Rendering goes to stdout; the caller maps the returned flag to an exit
/// status. The only error path is an unresolvable project root.
pub fn execute(root: PathBuf, package: &str, format: OutputFormat, quiet: bool) -> Result<bool> {
    let report = run_gate(root, package)?;

    match format {
        OutputFormat::Text => print!("{}", report.render_text(quiet)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.render_json())?),
    }

    Ok(report.passed())
}

/// Resolve artifacts, build the registry, and evaluate every check.
///
/// Stateless: each invocation re-derives its verdict from the current
/// artifact contents.
pub fn run_gate(root: PathBuf, package: &str) -> Result<GateReport> {
    let root = ProjectRoot::new(root)?;
    debug!(root = %root.path().display(), package, "running gate");

    let artifacts = ArtifactSet::resolve(&root, package);
    let registry = checks::registry(package);
    Ok(checks::run_all(&registry, &artifacts))
}
