//! CI workflow checks.
//!
//! The workflow is validated as a dependency-graph declaration, not
//! executed: the gate confirms a test job exists, downstream jobs declare
//! dependencies instead of running unconditionally, and the expected
//! triggers are present. Like the build-config checks these are textual.

use crate::artifacts::ArtifactSet;
use crate::checks::{read_artifact, Check};
use crate::report::Verdict;

/// Pass iff a recognizable test-job definition is present.
pub fn require_test_job(text: &str) -> Verdict {
    if text.contains("test:") || text.contains("Test") {
        Verdict::Pass
    } else {
        Verdict::Fail("workflow defines no test job to gate downstream stages".to_string())
    }
}

/// Pass iff at least one job declares an explicit dependency on another.
pub fn require_dependency_declaration(text: &str) -> Verdict {
    if text.contains("needs:") {
        Verdict::Pass
    } else {
        Verdict::Fail("no job declares a `needs:` dependency; stages would run ungated".to_string())
    }
}

/// Pass iff the named trigger condition is declared.
pub fn require_trigger(text: &str, trigger: &str) -> Verdict {
    if text.contains(&format!("{trigger}:")) {
        Verdict::Pass
    } else {
        Verdict::Fail(format!("workflow does not trigger on `{trigger}`"))
    }
}

pub fn checks() -> Vec<Check> {
    fn workflow_check(
        id: &str,
        description: &str,
        check: impl Fn(&str) -> Verdict + 'static,
    ) -> Check {
        Check::new(
            format!("workflow.{id}"),
            description,
            move |artifacts: &ArtifactSet| match read_artifact(&artifacts.ci_workflow) {
                Ok(text) => check(&text),
                Err(verdict) => verdict,
            },
        )
    }

    vec![
        workflow_check("test-job", "ci.yml defines a test job", require_test_job),
        workflow_check(
            "job-dependencies",
            "ci.yml gates downstream jobs with needs:",
            require_dependency_declaration,
        ),
        workflow_check("push-trigger", "ci.yml triggers on push", |text| {
            require_trigger(text, "push")
        }),
        workflow_check(
            "pull-request-trigger",
            "ci.yml triggers on pull requests",
            |text| require_trigger(text, "pull_request"),
        ),
    ]
}
