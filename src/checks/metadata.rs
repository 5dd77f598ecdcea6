//! Packaging metadata checks over `pyproject.toml`.
//!
//! The manifest is parsed at most once per gate run; every metadata check
//! validates the same snapshot. If parsing fails, each dependent check
//! reports `Error` (could not be evaluated) rather than `Fail`.

use std::cell::OnceCell;
use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::artifacts::ArtifactSet;
use crate::checks::Check;
use crate::report::Verdict;

/// Accessor failure on the loosely-typed manifest.
///
/// Distinguishing "not there" from "there but the wrong shape" keeps check
/// messages precise; neither silently falls back to a default.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("field `{0}` not found")]
    NotFound(String),
    #[error("field `{path}` has the wrong type (expected {expected})")]
    WrongType { path: String, expected: &'static str },
}

/// A parsed packaging manifest with dotted-path typed accessors.
#[derive(Debug, Clone)]
pub struct Manifest(toml::Value);

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<toml::Value>(text).map(Self)
    }

    fn lookup(&self, path: &str) -> Result<&toml::Value, MetadataError> {
        let mut current = &self.0;
        let mut walked: Vec<&str> = Vec::new();
        for key in path.split('.') {
            let table = current.as_table().ok_or_else(|| MetadataError::WrongType {
                path: walked.join("."),
                expected: "table",
            })?;
            current = table.get(key).ok_or_else(|| {
                let mut missing = walked.clone();
                missing.push(key);
                MetadataError::NotFound(missing.join("."))
            })?;
            walked.push(key);
        }
        Ok(current)
    }

    pub fn get_str(&self, path: &str) -> Result<&str, MetadataError> {
        self.lookup(path)?
            .as_str()
            .ok_or_else(|| MetadataError::WrongType {
                path: path.to_string(),
                expected: "string",
            })
    }

    pub fn get_table(&self, path: &str) -> Result<&toml::value::Table, MetadataError> {
        self.lookup(path)?
            .as_table()
            .ok_or_else(|| MetadataError::WrongType {
                path: path.to_string(),
                expected: "table",
            })
    }
}

/// Pass iff the dotted field path exists.
pub fn require_section(manifest: &Manifest, path: &str) -> Verdict {
    match manifest.lookup(path) {
        Ok(_) => Verdict::Pass,
        Err(err) => Verdict::Fail(format!("pyproject.toml: {err}")),
    }
}

/// Exact-match comparison for fixed identifiers.
pub fn require_field_equals(manifest: &Manifest, path: &str, expected: &str) -> Verdict {
    match manifest.get_str(path) {
        Ok(value) if value == expected => Verdict::Pass,
        Ok(value) => Verdict::Fail(format!(
            "pyproject.toml: `{path}` is \"{value}\", expected \"{expected}\""
        )),
        Err(err) => Verdict::Fail(format!("pyproject.toml: {err}")),
    }
}

/// Pass iff the field value contains at least one ASCII digit.
pub fn require_version_digit(manifest: &Manifest, path: &str) -> Verdict {
    match manifest.get_str(path) {
        Ok(value) if value.chars().any(|c| c.is_ascii_digit()) => Verdict::Pass,
        Ok(value) => Verdict::Fail(format!(
            "pyproject.toml: `{path}` is \"{value}\", which contains no digit"
        )),
        Err(err) => Verdict::Fail(format!("pyproject.toml: {err}")),
    }
}

/// Pass iff the field value starts `major.minor`.
///
/// Deliberately loose: the end of the string is not anchored, so pre-release
/// and build-metadata suffixes (even odd ones like `1.2.bogus`) are accepted.
/// A bare major version is not.
pub fn require_version_shape(manifest: &Manifest, path: &str) -> Verdict {
    static VERSION_SHAPE: OnceLock<Regex> = OnceLock::new();
    let pattern =
        VERSION_SHAPE.get_or_init(|| Regex::new(r"^\d+\.\d+").expect("version pattern is valid"));

    match manifest.get_str(path) {
        Ok(value) if pattern.is_match(value) => Verdict::Pass,
        Ok(value) => Verdict::Fail(format!(
            "pyproject.toml: `{path}` is \"{value}\", expected a major.minor prefix"
        )),
        Err(err) => Verdict::Fail(format!("pyproject.toml: {err}")),
    }
}

type ManifestCell = Rc<OnceCell<Result<Manifest, String>>>;

/// Load the shared manifest snapshot, parsing on first use.
fn snapshot<'c>(cell: &'c ManifestCell, artifacts: &ArtifactSet) -> Result<&'c Manifest, Verdict> {
    let slot = cell.get_or_init(|| {
        let text = artifacts
            .packaging_manifest
            .read_text()
            .map_err(|err| format!("{err:#}"))?;
        Manifest::parse(&text).map_err(|err| format!("pyproject.toml could not be parsed: {err}"))
    });
    slot.as_ref().map_err(|msg| Verdict::Error(msg.clone()))
}

/// Bind a validation closure to the shared manifest snapshot.
fn with_manifest(
    id: &str,
    description: &str,
    cell: ManifestCell,
    validate: Box<dyn Fn(&Manifest) -> Verdict>,
) -> Check {
    let id = format!("metadata.{id}");
    Check::new(id, description, move |artifacts: &ArtifactSet| {
        match snapshot(&cell, artifacts) {
            Ok(manifest) => validate(manifest),
            Err(verdict) => verdict,
        }
    })
}

/// The metadata check family, all validating one parse-once snapshot.
pub fn checks(package: &str) -> Vec<Check> {
    let cell: ManifestCell = Rc::new(OnceCell::new());
    let expected_name = package.to_string();

    vec![
        with_manifest(
            "project-section",
            "pyproject.toml has a [project] section",
            Rc::clone(&cell),
            Box::new(|m| require_section(m, "project")),
        ),
        with_manifest(
            "package-name",
            "project.name matches the expected package",
            Rc::clone(&cell),
            Box::new(move |m| require_field_equals(m, "project.name", &expected_name)),
        ),
        with_manifest(
            "version-digit",
            "project.version contains a digit",
            Rc::clone(&cell),
            Box::new(|m| require_version_digit(m, "project.version")),
        ),
        with_manifest(
            "version-shape",
            "project.version starts major.minor",
            Rc::clone(&cell),
            Box::new(|m| require_version_shape(m, "project.version")),
        ),
        with_manifest(
            "requires-python",
            "project.requires-python is declared",
            Rc::clone(&cell),
            Box::new(|m| require_section(m, "project.requires-python")),
        ),
        with_manifest(
            "build-system",
            "build-system.requires is declared",
            Rc::clone(&cell),
            Box::new(|m| require_section(m, "build-system.requires")),
        ),
    ]
}
