//! Per-check isolation when individual artifacts are missing or wrong

use buildgate::commands::run::run_gate;
use buildgate::report::{GateReport, Verdict};

use crate::helpers::{overwrite, remove, valid_project, PACKAGE};

fn verdict_of<'r>(report: &'r GateReport, id: &str) -> &'r Verdict {
    &report
        .results
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("check {id} missing from report"))
        .verdict
}

#[test]
fn missing_workflow_fails_structurally_and_errors_workflow_checks() {
    let project = valid_project();
    remove(project.path(), ".github/workflows/ci.yml");

    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();

    assert!(!report.passed());
    assert!(matches!(
        verdict_of(&report, "structure.ci-workflow"),
        Verdict::Fail(_)
    ));
    for id in [
        "workflow.test-job",
        "workflow.job-dependencies",
        "workflow.push-trigger",
        "workflow.pull-request-trigger",
    ] {
        assert!(
            matches!(verdict_of(&report, id), Verdict::Error(_)),
            "{id} should be Error without a workflow file"
        );
    }

    // Unrelated checkers still report their own verdicts.
    assert_eq!(*verdict_of(&report, "metadata.package-name"), Verdict::Pass);
    assert_eq!(*verdict_of(&report, "buildconfig.cuda-disabled"), Verdict::Pass);
    assert_eq!(*verdict_of(&report, "sources.python-syntax"), Verdict::Pass);
}

#[test]
fn single_failure_still_yields_a_complete_report() {
    let project = valid_project();
    remove(project.path(), "CMakeLists.txt");

    let intact = run_gate(valid_project().path().to_path_buf(), PACKAGE).unwrap();
    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();

    assert_eq!(report.results.len(), intact.results.len());
    assert_eq!(report.failed_count(), 1);
    assert!(!report.passed());
}

#[test]
fn wrong_package_name_is_a_metadata_failure() {
    let project = valid_project();
    overwrite(
        project.path(),
        "pyproject.toml",
        "[project]\nname = \"renamed\"\nversion = \"0.1.0\"\nrequires-python = \">=3.9\"\n\n[build-system]\nrequires = [\"setuptools\"]\n",
    );

    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();
    match verdict_of(&report, "metadata.package-name") {
        Verdict::Fail(msg) => assert!(msg.contains("renamed")),
        other => panic!("expected Fail, got {other:?}"),
    }
    // Only the name check is affected; the version checks still pass.
    assert_eq!(*verdict_of(&report, "metadata.version-shape"), Verdict::Pass);
}

#[test]
fn unparseable_manifest_errors_all_metadata_checks() {
    let project = valid_project();
    overwrite(project.path(), "pyproject.toml", "project = {{{ nope");

    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();

    let metadata: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.id.starts_with("metadata."))
        .collect();
    assert_eq!(metadata.len(), 6);
    assert!(metadata
        .iter()
        .all(|r| matches!(r.verdict, Verdict::Error(_))));
    // The file still exists, so the structural check passes.
    assert_eq!(
        *verdict_of(&report, "structure.packaging-manifest"),
        Verdict::Pass
    );
}

#[test]
fn malformed_python_source_fails_the_syntax_check_only() {
    let project = valid_project();
    overwrite(
        project.path(),
        "python/mlc_llm/broken.py",
        "def broken(:\n    pass\n",
    );

    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();

    match verdict_of(&report, "sources.python-syntax") {
        Verdict::Fail(msg) => assert!(msg.contains("broken.py")),
        other => panic!("expected Fail, got {other:?}"),
    }
    assert_eq!(*verdict_of(&report, "sources.init-nonempty"), Verdict::Pass);
    assert_eq!(report.failed_count(), 1);
}

#[test]
fn entrypoint_without_modes_fails_both_mode_checks() {
    let project = valid_project();
    overwrite(
        project.path(),
        "docker/build-entrypoint.sh",
        "#!/bin/bash\nconda activate build-env\nexec \"$@\"\n",
    );

    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();

    assert!(matches!(
        verdict_of(&report, "buildconfig.build-mode"),
        Verdict::Fail(_)
    ));
    assert!(matches!(
        verdict_of(&report, "buildconfig.validate-mode"),
        Verdict::Fail(_)
    ));
    assert_eq!(
        *verdict_of(&report, "buildconfig.entrypoint-shebang"),
        Verdict::Pass
    );
}

#[test]
fn empty_tree_reports_everything_without_aborting() {
    let empty = tempfile::TempDir::new().unwrap();
    let report = run_gate(empty.path().to_path_buf(), PACKAGE).unwrap();

    let intact = run_gate(valid_project().path().to_path_buf(), PACKAGE).unwrap();
    assert_eq!(report.results.len(), intact.results.len());
    assert!(!report.passed());
    assert!(report.failed_count() > 0);
    assert!(report.error_count() > 0);
}
