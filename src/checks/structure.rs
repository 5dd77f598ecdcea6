//! Structural checks: presence and basic shape of required files and
//! directories, plus required substrings inside manifest-like files.

use crate::artifacts::{ArtifactHandle, ArtifactKind, ArtifactSet};
use crate::checks::{read_artifact, Check};
use crate::report::Verdict;

/// Path declared for the TVM submodule inside `.gitmodules`.
const TVM_SUBMODULE_PATH: &str = "3rdparty/tvm";

/// Pass iff the handle's path exists and is a regular file.
pub fn require_file(handle: &ArtifactHandle) -> Verdict {
    require_kind(handle, ArtifactKind::File)
}

/// Pass iff the handle's path exists and is a directory.
pub fn require_dir(handle: &ArtifactHandle) -> Verdict {
    require_kind(handle, ArtifactKind::Dir)
}

fn require_kind(handle: &ArtifactHandle, kind: ArtifactKind) -> Verdict {
    let exists = match kind {
        ArtifactKind::File => handle.path.is_file(),
        ArtifactKind::Dir => handle.path.is_dir(),
    };
    if exists {
        Verdict::Pass
    } else {
        Verdict::Fail(format!(
            "required {} {} not found at {}",
            kind.describe(),
            handle.name,
            handle.path.display()
        ))
    }
}

/// Pass iff the artifact's text content contains `needle`.
pub fn require_substring(handle: &ArtifactHandle, needle: &str) -> Verdict {
    let text = match read_artifact(handle) {
        Ok(text) => text,
        Err(verdict) => return verdict,
    };
    if text.contains(needle) {
        Verdict::Pass
    } else {
        Verdict::Fail(format!(
            "`{needle}` not declared in {} ({})",
            handle.name,
            handle.path.display()
        ))
    }
}

/// One existence check per registry artifact, plus the submodule declaration.
pub fn checks() -> Vec<Check> {
    let mut checks = Vec::new();

    // Each artifact gets its own independent existence check so one missing
    // file never masks another.
    type Accessor = for<'a> fn(&'a ArtifactSet) -> &'a ArtifactHandle;
    let entries: [(&str, Accessor); 10] = [
        ("build-manifest", |a| &a.build_manifest),
        ("git-modules", |a| &a.git_modules),
        ("package-dir", |a| &a.package_dir),
        ("package-init", |a| &a.package_init),
        ("packaging-manifest", |a| &a.packaging_manifest),
        ("dockerfile", |a| &a.dockerfile),
        ("entrypoint", |a| &a.entrypoint),
        ("cmake-config", |a| &a.cmake_config),
        ("ci-workflow", |a| &a.ci_workflow),
        ("composite-action", |a| &a.composite_action),
    ];
    for (name, accessor) in entries {
        checks.push(Check::new(
            format!("structure.{name}"),
            format!("artifact `{name}` exists with the expected kind"),
            move |artifacts: &ArtifactSet| {
                let handle = accessor(artifacts);
                match handle.kind {
                    ArtifactKind::File => require_file(handle),
                    ArtifactKind::Dir => require_dir(handle),
                }
            },
        ));
    }

    checks.push(Check::new(
        "structure.tvm-submodule",
        "TVM is declared as a git submodule",
        |artifacts: &ArtifactSet| require_substring(&artifacts.git_modules, TVM_SUBMODULE_PATH),
    ));

    checks
}
