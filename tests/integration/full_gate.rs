//! Full-gate behavior on a healthy project tree

use buildgate::checks;
use buildgate::commands::run::run_gate;
use buildgate::report::Verdict;

use crate::helpers::{valid_project, PACKAGE};

#[test]
fn valid_project_passes_every_check() {
    let project = valid_project();
    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();

    let failures: Vec<_> = report
        .results
        .iter()
        .filter(|r| !r.verdict.is_pass())
        .collect();
    assert!(failures.is_empty(), "unexpected failures: {failures:?}");
    assert!(report.passed());
}

#[test]
fn report_covers_the_whole_registry() {
    let project = valid_project();
    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();

    assert_eq!(report.results.len(), checks::registry(PACKAGE).len());
}

#[test]
fn gate_is_idempotent_on_unmodified_tree() {
    let project = valid_project();

    let first = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();
    let second = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();

    assert_eq!(first, second);
    // Byte-identical machine-readable reports too.
    assert_eq!(
        serde_json::to_string(&first.render_json()).unwrap(),
        serde_json::to_string(&second.render_json()).unwrap()
    );
}

#[test]
fn json_report_carries_counts_and_ordered_results() {
    let project = valid_project();
    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();
    let json = report.render_json();

    assert_eq!(json["passed"], true);
    assert_eq!(
        json["counts"]["passed"].as_u64().unwrap() as usize,
        report.results.len()
    );
    assert_eq!(json["counts"]["failed"], 0);
    assert_eq!(json["results"][0]["id"], "structure.build-manifest");
}

#[test]
fn nonexistent_root_is_the_only_fatal_error() {
    let err = run_gate("/nonexistent/buildgate-project".into(), PACKAGE).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn loose_version_suffixes_are_accepted() {
    let project = valid_project();
    crate::helpers::overwrite(
        project.path(),
        "pyproject.toml",
        "[project]\nname = \"mlc_llm\"\nversion = \"1.2.bogus\"\nrequires-python = \">=3.9\"\n\n[build-system]\nrequires = [\"setuptools\"]\n",
    );

    let report = run_gate(project.path().to_path_buf(), PACKAGE).unwrap();
    let shape = report
        .results
        .iter()
        .find(|r| r.id == "metadata.version-shape")
        .unwrap();
    assert_eq!(shape.verdict, Verdict::Pass);
}
