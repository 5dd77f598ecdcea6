//! Package source sanity checks.
//!
//! Every `.py` file under the package tree must parse under the Python
//! grammar. Parsing is syntax-only (no execution, no import resolution) and
//! a malformed file never stops the walk: all diagnostics are collected
//! before the verdict is produced.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use rustpython_parser::{parse, Mode};

use crate::artifacts::ArtifactSet;
use crate::checks::{read_artifact, Check};
use crate::report::Verdict;

/// A syntax error attributed to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub path: PathBuf,
    pub message: String,
}

/// Syntax-only parse of one Python source unit.
///
/// Pure function: source text in, success or a diagnostic message out.
pub fn parse_python(source: &str, path: &str) -> Result<(), String> {
    match parse(source, Mode::Module, path) {
        Ok(_) => Ok(()),
        Err(err) => Err(err.to_string()),
    }
}

/// Recursively collect every `.py` file under `dir`.
fn collect_py_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_py_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "py") {
            out.push(path);
        }
    }
    Ok(())
}

/// Parse the whole tree, collecting every diagnostic before returning.
pub fn scan_tree(dir: &Path) -> Result<Vec<SyntaxDiagnostic>> {
    let mut files = Vec::new();
    collect_py_files(dir, &mut files)?;
    // Directory iteration order is platform-dependent; sort for stable reports.
    files.sort();

    let mut diagnostics = Vec::new();
    for path in files {
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                diagnostics.push(SyntaxDiagnostic {
                    path,
                    message: format!("unreadable: {err}"),
                });
                continue;
            }
        };
        if let Err(message) = parse_python(&source, &path.to_string_lossy()) {
            diagnostics.push(SyntaxDiagnostic { path, message });
        }
    }
    Ok(diagnostics)
}

fn syntax_verdict(artifacts: &ArtifactSet) -> Verdict {
    let dir = &artifacts.package_dir.path;
    if !dir.is_dir() {
        return Verdict::Error(format!(
            "package source tree not found at {}",
            dir.display()
        ));
    }

    let diagnostics = match scan_tree(dir) {
        Ok(diagnostics) => diagnostics,
        Err(err) => return Verdict::Error(format!("{err:#}")),
    };

    if diagnostics.is_empty() {
        return Verdict::Pass;
    }

    let mut msg = format!("{} file(s) with syntax errors:", diagnostics.len());
    for diag in diagnostics.iter().take(8) {
        msg.push_str(&format!(" {} ({})", diag.path.display(), diag.message));
    }
    if diagnostics.len() > 8 {
        msg.push_str(&format!(" ... ({} total)", diagnostics.len()));
    }
    Verdict::Fail(msg)
}

fn init_verdict(artifacts: &ArtifactSet) -> Verdict {
    match read_artifact(&artifacts.package_init) {
        Ok(text) if text.is_empty() => Verdict::Fail(format!(
            "{} is empty; the package exposes nothing",
            artifacts.package_init.path.display()
        )),
        Ok(_) => Verdict::Pass,
        Err(verdict) => verdict,
    }
}

pub fn checks() -> Vec<Check> {
    vec![
        Check::new(
            "sources.init-nonempty",
            "package __init__.py has content",
            init_verdict,
        ),
        Check::new(
            "sources.python-syntax",
            "every package source file parses",
            syntax_verdict,
        ),
    ]
}
