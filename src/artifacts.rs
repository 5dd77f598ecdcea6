//! Project root resolution and the artifact registry.
//!
//! The registry maps logical artifact names to paths under the project root.
//! It is the only place that knows the expected project layout; checkers
//! receive resolved handles and never construct paths themselves. Resolution
//! does not touch the filesystem beyond joining paths — existence is the
//! structural checker's concern.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// What kind of filesystem entry an artifact is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    File,
    Dir,
}

impl ArtifactKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ArtifactKind::File => "file",
            ArtifactKind::Dir => "directory",
        }
    }
}

/// A resolved artifact: logical name, absolute path, expected kind.
#[derive(Debug, Clone)]
pub struct ArtifactHandle {
    pub name: &'static str,
    pub path: PathBuf,
    pub kind: ArtifactKind,
}

impl ArtifactHandle {
    fn new(name: &'static str, path: PathBuf, kind: ArtifactKind) -> Self {
        Self { name, path, kind }
    }

    /// Read the artifact as UTF-8 text.
    pub fn read_text(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {} ({})", self.name, self.path.display()))
    }

    /// Whether the path exists and matches the expected kind.
    pub fn exists_as_expected(&self) -> bool {
        match self.kind {
            ArtifactKind::File => self.path.is_file(),
            ArtifactKind::Dir => self.path.is_dir(),
        }
    }
}

/// The validated project root anchoring all artifact resolution.
///
/// Constructing one is the only fatal operation in a gate run: if the root
/// does not exist no artifact can be resolved, so there is nothing to report.
#[derive(Debug, Clone)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("Project root does not exist: {}", path.display());
        }
        if !path.is_dir() {
            bail!("Project root is not a directory: {}", path.display());
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize project root: {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        self.path.join(rel)
    }
}

/// The fixed registry of artifacts the gate inspects, resolved once per run.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub build_manifest: ArtifactHandle,
    pub git_modules: ArtifactHandle,
    pub package_dir: ArtifactHandle,
    pub package_init: ArtifactHandle,
    pub packaging_manifest: ArtifactHandle,
    pub dockerfile: ArtifactHandle,
    pub entrypoint: ArtifactHandle,
    pub cmake_config: ArtifactHandle,
    pub ci_workflow: ArtifactHandle,
    pub composite_action: ArtifactHandle,
}

impl ArtifactSet {
    /// Resolve every logical artifact name against the root.
    ///
    /// `package` is the expected Python package name; it determines where
    /// the package source tree and its entry point are looked up.
    pub fn resolve(root: &ProjectRoot, package: &str) -> Self {
        let pkg_dir = root.join("python").join(package);
        Self {
            build_manifest: ArtifactHandle::new(
                "build-manifest",
                root.join("CMakeLists.txt"),
                ArtifactKind::File,
            ),
            git_modules: ArtifactHandle::new(
                "git-modules",
                root.join(".gitmodules"),
                ArtifactKind::File,
            ),
            package_init: ArtifactHandle::new(
                "package-init",
                pkg_dir.join("__init__.py"),
                ArtifactKind::File,
            ),
            package_dir: ArtifactHandle::new("package-dir", pkg_dir, ArtifactKind::Dir),
            packaging_manifest: ArtifactHandle::new(
                "packaging-manifest",
                root.join("pyproject.toml"),
                ArtifactKind::File,
            ),
            dockerfile: ArtifactHandle::new(
                "dockerfile",
                root.join("docker").join("Dockerfile"),
                ArtifactKind::File,
            ),
            entrypoint: ArtifactHandle::new(
                "entrypoint",
                root.join("docker").join("build-entrypoint.sh"),
                ArtifactKind::File,
            ),
            cmake_config: ArtifactHandle::new(
                "cmake-config",
                root.join("docker").join("config.cmake"),
                ArtifactKind::File,
            ),
            ci_workflow: ArtifactHandle::new(
                "ci-workflow",
                root.join(".github").join("workflows").join("ci.yml"),
                ArtifactKind::File,
            ),
            composite_action: ArtifactHandle::new(
                "composite-action",
                root.join(".github")
                    .join("actions")
                    .join("setup-build-env")
                    .join("action.yml"),
                ArtifactKind::File,
            ),
        }
    }

    /// All handles in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactHandle> {
        [
            &self.build_manifest,
            &self.git_modules,
            &self.package_dir,
            &self.package_init,
            &self.packaging_manifest,
            &self.dockerfile,
            &self.entrypoint,
            &self.cmake_config,
            &self.ci_workflow,
            &self.composite_action,
        ]
        .into_iter()
    }
}
