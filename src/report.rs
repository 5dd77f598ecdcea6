//! Check results and the aggregate gate report.

use colored::Colorize;
use serde::Serialize;

/// Outcome of a single check.
///
/// `Fail` means an invariant was violated; `Error` means the check could not
/// be evaluated at all (for example its artifact was unreadable). Both flip
/// the aggregate verdict, but the report keeps them distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message")]
pub enum Verdict {
    Pass,
    Fail(String),
    Error(String),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail(_) => "FAIL",
            Verdict::Error(_) => "ERROR",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(msg) | Verdict::Error(msg) => Some(msg),
        }
    }
}

/// One check's verdict, tagged with the originating check id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub id: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl CheckResult {
    pub fn new(id: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            id: id.into(),
            verdict,
        }
    }
}

/// Ordered collection of results plus the aggregate verdict.
///
/// Immutable once produced; the caller decides what to do with it (render,
/// pick an exit code). The report itself never writes files or exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateReport {
    pub results: Vec<CheckResult>,
}

impl GateReport {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    /// Aggregate verdict: Pass iff every result is Pass.
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.verdict.is_pass())
    }

    pub fn passed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.verdict.is_pass())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.verdict, Verdict::Fail(_)))
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.verdict, Verdict::Error(_)))
            .count()
    }

    /// Human-readable rendering: one line per check, then a summary.
    ///
    /// Every verdict is printed, not just failures, so a maintainer sees the
    /// full health snapshot in one pass. With `quiet` only the summary line
    /// is produced.
    pub fn render_text(&self, quiet: bool) -> String {
        let mut out = String::new();

        if !quiet {
            for result in &self.results {
                let label = match &result.verdict {
                    Verdict::Pass => " PASS".green().bold(),
                    Verdict::Fail(_) => " FAIL".red().bold(),
                    Verdict::Error(_) => "ERROR".yellow().bold(),
                };
                match result.verdict.message() {
                    Some(msg) => out.push_str(&format!("{label}  {}: {msg}\n", result.id)),
                    None => out.push_str(&format!("{label}  {}\n", result.id)),
                }
            }
            out.push('\n');
        }

        let summary = format!(
            "{} passed, {} failed, {} errors",
            self.passed_count(),
            self.failed_count(),
            self.error_count()
        );
        if self.passed() {
            out.push_str(&format!("{} {summary}\n", "Gate passed:".green().bold()));
        } else {
            out.push_str(&format!("{} {summary}\n", "Gate failed:".red().bold()));
        }

        out
    }

    /// Every non-passing result, in report order.
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.results
            .iter()
            .filter(|r| !r.verdict.is_pass())
            .collect()
    }

    /// Machine-readable rendering for CI integration.
    pub fn render_json(&self) -> serde_json::Value {
        serde_json::json!({
            "passed": self.passed(),
            "counts": {
                "passed": self.passed_count(),
                "failed": self.failed_count(),
                "errors": self.error_count(),
            },
            "results": self.results,
            "failures": self.failures(),
        })
    }
}
