//! Build and container configuration checks.
//!
//! These are shallow textual checks by design: the gate looks for literal
//! declarations instead of parsing CMake or shell, so it stays sub-second
//! and never depends on the build toolchain it is gating.

use crate::artifacts::ArtifactSet;
use crate::checks::{read_artifact, Check};
use crate::report::Verdict;

/// Pass iff `token` appears verbatim in the config text.
pub fn require_declaration(text: &str, token: &str, artifact: &str) -> Verdict {
    if text.contains(token) {
        Verdict::Pass
    } else {
        Verdict::Fail(format!("`{token}` not declared in {artifact}"))
    }
}

/// Pass iff the text starts with an interpreter directive.
pub fn require_shebang(text: &str, artifact: &str) -> Verdict {
    if text.starts_with("#!/") {
        Verdict::Pass
    } else {
        Verdict::Fail(format!("{artifact} is missing a shebang line"))
    }
}

/// Pass iff a shell-case label for the named operational mode is present.
pub fn require_mode_label(text: &str, mode: &str, artifact: &str) -> Verdict {
    if text.contains(&format!("{mode})")) {
        Verdict::Pass
    } else {
        Verdict::Fail(format!(
            "{artifact} does not dispatch on the `{mode}` mode"
        ))
    }
}

pub fn checks() -> Vec<Check> {
    fn cmake_check(
        id: &str,
        description: &str,
        check: impl Fn(&str) -> Verdict + 'static,
    ) -> Check {
        Check::new(
            format!("buildconfig.{id}"),
            description,
            move |artifacts: &ArtifactSet| match read_artifact(&artifacts.cmake_config) {
                Ok(text) => check(&text),
                Err(verdict) => verdict,
            },
        )
    }

    fn entrypoint_check(
        id: &str,
        description: &str,
        check: impl Fn(&str) -> Verdict + 'static,
    ) -> Check {
        Check::new(
            format!("buildconfig.{id}"),
            description,
            move |artifacts: &ArtifactSet| match read_artifact(&artifacts.entrypoint) {
                Ok(text) => check(&text),
                Err(verdict) => verdict,
            },
        )
    }

    vec![
        cmake_check(
            "tvm-source-dir",
            "config.cmake declares TVM_SOURCE_DIR",
            |text| require_declaration(text, "TVM_SOURCE_DIR", "config.cmake"),
        ),
        // CI builds must not require CUDA hardware.
        cmake_check(
            "cuda-disabled",
            "config.cmake disables CUDA for CI",
            |text| require_declaration(text, "set(USE_CUDA OFF)", "config.cmake"),
        ),
        entrypoint_check(
            "entrypoint-shebang",
            "build-entrypoint.sh has a shebang",
            |text| require_shebang(text, "build-entrypoint.sh"),
        ),
        entrypoint_check(
            "conda-activate",
            "build-entrypoint.sh activates its conda environment",
            |text| require_declaration(text, "conda activate", "build-entrypoint.sh"),
        ),
        entrypoint_check(
            "build-mode",
            "build-entrypoint.sh supports the build mode",
            |text| require_mode_label(text, "build", "build-entrypoint.sh"),
        ),
        entrypoint_check(
            "validate-mode",
            "build-entrypoint.sh supports the validate mode",
            |text| require_mode_label(text, "validate", "build-entrypoint.sh"),
        ),
    ]
}
