//! The check registry and the gate aggregator.
//!
//! A check is a named closure over the resolved artifact set. The aggregator
//! runs every registered check in order, never aborts early, and collects
//! one result per check into a [`GateReport`]. Checks map their own internal
//! failures to [`Verdict::Error`]; nothing escapes a check boundary.

pub mod buildconfig;
pub mod metadata;
pub mod sources;
pub mod structure;
pub mod workflow;

use tracing::debug;

use crate::artifacts::{ArtifactHandle, ArtifactSet};
use crate::report::{CheckResult, GateReport, Verdict};

/// One independent verification, bound to the artifacts it needs.
pub struct Check {
    pub id: String,
    pub description: String,
    run: Box<dyn Fn(&ArtifactSet) -> Verdict>,
}

impl Check {
    pub fn new<F>(id: impl Into<String>, description: impl Into<String>, run: F) -> Self
    where
        F: Fn(&ArtifactSet) -> Verdict + 'static,
    {
        Self {
            id: id.into(),
            description: description.into(),
            run: Box::new(run),
        }
    }

    pub fn run(&self, artifacts: &ArtifactSet) -> Verdict {
        (self.run)(artifacts)
    }
}

/// Build the full check registry in report order.
///
/// `package` is the expected Python package name, used by the metadata
/// checker for the exact-name comparison.
pub fn registry(package: &str) -> Vec<Check> {
    let mut checks = Vec::new();
    checks.extend(structure::checks());
    checks.extend(metadata::checks(package));
    checks.extend(buildconfig::checks());
    checks.extend(workflow::checks());
    checks.extend(sources::checks());
    checks
}

/// Run every check against the artifact set and collect the report.
///
/// No early abort: a failing check never prevents the remaining checks from
/// being evaluated, so the report always contains one result per check.
pub fn run_all(checks: &[Check], artifacts: &ArtifactSet) -> GateReport {
    let mut results = Vec::with_capacity(checks.len());

    for check in checks {
        let verdict = check.run(artifacts);
        debug!(id = %check.id, verdict = verdict.label(), "check evaluated");
        results.push(CheckResult::new(check.id.clone(), verdict));
    }

    GateReport::new(results)
}

/// Read an artifact's text, mapping read failure to an `Error` verdict.
///
/// Shared by the textual checkers: a check that cannot read its artifact
/// could not be evaluated, which is distinct from a violated invariant.
pub(crate) fn read_artifact(handle: &ArtifactHandle) -> Result<String, Verdict> {
    handle
        .read_text()
        .map_err(|err| Verdict::Error(format!("{err:#}")))
}
