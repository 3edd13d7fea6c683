//! Release planning and execution
//!
//! A release run is split into a pure planning step and an execution step:
//! planning resolves everything a run will do (version, stamp, module path,
//! one output path per target), execution invokes the compiler. The split
//! lets the CLI show a plan without touching the toolchain.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::checksum;
use crate::error::ReleaseError;
use crate::gobuild::GoCompiler;
use crate::identity::{self, ModulePath};
use crate::manifest::ProjectManifest;
use crate::platform::Target;
use crate::stamp::BuildStamp;

/// Name of the checksum manifest inside the output directory.
pub const CHECKSUM_FILE: &str = "checksums.txt";

/// Inputs of a release run, fully specified by the caller.
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
  /// Path to the project manifest.
  pub manifest_path: PathBuf,
  /// Directory artifacts are written to.
  pub out_dir: PathBuf,
  /// Ordered platform targets, one compiler invocation each.
  pub targets: Vec<Target>,
  /// Module path resolution strategy.
  pub module_path: ModulePath,
  /// Binary base name override; defaults to the module path's final segment.
  pub binary_name: Option<String>,
  /// Whether to write the checksum manifest after building.
  pub checksums: bool,
}

/// One planned compiler invocation.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedArtifact {
  pub target: Target,
  pub output: PathBuf,
}

/// Fully resolved description of a release run.
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
  pub module_path: String,
  pub binary_name: String,
  pub stamp: BuildStamp,
  pub ldflags: String,
  pub out_dir: PathBuf,
  pub artifacts: Vec<PlannedArtifact>,
  /// Path of the checksum manifest, when the step is enabled.
  pub checksum_manifest: Option<PathBuf>,
}

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ReleaseReport {
  /// Artifacts built, in target order.
  pub built: Vec<PathBuf>,
  /// Checksum manifest path, when one was written.
  pub checksum_manifest: Option<PathBuf>,
}

/// Compute the plan for a release run.
///
/// Reads the project manifest and resolves the module path against `cwd`.
/// Both `cwd` and `today` are read once by the caller and threaded in, so
/// the plan is a pure function of its inputs.
pub fn compute_plan(request: &ReleaseRequest, cwd: &Path, today: NaiveDate) -> Result<ReleasePlan, ReleaseError> {
  let manifest = ProjectManifest::load(&request.manifest_path)?;
  let module_path = request.module_path.resolve(cwd)?;
  let binary_name = request
    .binary_name
    .clone()
    .unwrap_or_else(|| identity::binary_name(&module_path));

  let stamp = BuildStamp::new(manifest.version(), today);
  let ldflags = stamp.ldflags(&module_path);

  let artifacts = request
    .targets
    .iter()
    .map(|&target| PlannedArtifact {
      target,
      output: request.out_dir.join(target.artifact_name(&binary_name)),
    })
    .collect();

  Ok(ReleasePlan {
    module_path,
    binary_name,
    stamp,
    ldflags,
    out_dir: request.out_dir.clone(),
    artifacts,
    checksum_manifest: request.checksums.then(|| request.out_dir.join(CHECKSUM_FILE)),
  })
}

/// Execute a computed plan: build every target in order, then write the
/// checksum manifest when enabled.
///
/// `progress` is called before each compiler invocation. The first failure
/// aborts the run; remaining targets are not built and no checksum manifest
/// is written unless every build succeeded.
pub async fn execute_plan<F>(plan: &ReleasePlan, go: &GoCompiler, mut progress: F) -> Result<ReleaseReport, ReleaseError>
where
  F: FnMut(&PlannedArtifact),
{
  tokio::fs::create_dir_all(&plan.out_dir).await?;

  let mut built = Vec::with_capacity(plan.artifacts.len());
  for artifact in &plan.artifacts {
    progress(artifact);
    go.build(artifact.target, &plan.ldflags, &artifact.output).await?;
    built.push(artifact.output.clone());
  }

  let checksum_manifest = match &plan.checksum_manifest {
    Some(path) => {
      checksum::write_manifest(&built, path)?;
      Some(path.clone())
    }
    None => None,
  };

  info!(artifacts = built.len(), "release build complete");

  Ok(ReleaseReport {
    built,
    checksum_manifest,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::{Arch, Os, default_targets};
  use std::fs;
  use tempfile::TempDir;

  fn request(temp: &TempDir, targets: Vec<Target>, checksums: bool) -> ReleaseRequest {
    let manifest_path = temp.path().join("baldrick-broth.yaml");
    fs::write(&manifest_path, "model:\n  project:\n    version: 1.4.0\n").unwrap();

    ReleaseRequest {
      manifest_path,
      out_dir: temp.path().join("build"),
      targets,
      module_path: ModulePath::Explicit("github.com/flarebyte/clingy-code-detective".to_string()),
      binary_name: Some("clingy".to_string()),
      checksums,
    }
  }

  fn june_third() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
  }

  #[test]
  fn test_plan_for_single_target() {
    let temp = TempDir::new().unwrap();
    let request = request(&temp, vec![Target::new(Os::Linux, Arch::Amd64)], false);

    let plan = compute_plan(&request, temp.path(), june_third()).unwrap();

    assert_eq!(plan.binary_name, "clingy");
    assert_eq!(plan.artifacts.len(), 1);
    assert_eq!(plan.artifacts[0].output, temp.path().join("build").join("clingy-linux-amd64"));
    assert!(plan.ldflags.contains("Version=1.4.0"));
    assert!(plan.ldflags.contains("Date=3-June-2025"));
    assert!(plan.checksum_manifest.is_none());
  }

  #[test]
  fn test_plan_output_paths_are_distinct() {
    let temp = TempDir::new().unwrap();
    let request = request(&temp, default_targets(), false);

    let plan = compute_plan(&request, temp.path(), june_third()).unwrap();

    assert_eq!(plan.artifacts.len(), 3);
    for (i, artifact) in plan.artifacts.iter().enumerate() {
      for other in &plan.artifacts[i + 1..] {
        assert_ne!(artifact.output, other.output);
      }
    }
  }

  #[test]
  fn test_plan_binary_name_defaults_to_module_base() {
    let temp = TempDir::new().unwrap();
    let mut request = request(&temp, default_targets(), false);
    request.binary_name = None;

    let plan = compute_plan(&request, temp.path(), june_third()).unwrap();

    assert_eq!(plan.binary_name, "clingy-code-detective");
  }

  #[test]
  fn test_plan_with_checksums_names_manifest() {
    let temp = TempDir::new().unwrap();
    let request = request(&temp, default_targets(), true);

    let plan = compute_plan(&request, temp.path(), june_third()).unwrap();

    assert_eq!(plan.checksum_manifest, Some(temp.path().join("build").join("checksums.txt")));
  }

  #[test]
  fn test_plan_fails_without_manifest() {
    let temp = TempDir::new().unwrap();
    let mut request = request(&temp, default_targets(), false);
    request.manifest_path = temp.path().join("nope.yaml");

    assert!(matches!(
      compute_plan(&request, temp.path(), june_third()),
      Err(ReleaseError::ManifestRead { .. })
    ));
  }

  #[cfg(unix)]
  fn fake_compiler(dir: &Path, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-go");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  #[cfg(unix)]
  const WRITING_COMPILER: &str = r#"#!/bin/sh
out=""
while [ "$#" -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
  esac
  shift
done
printf '%s/%s\n' "$GOOS" "$GOARCH" > "$out"
"#;

  #[cfg(unix)]
  #[tokio::test]
  async fn test_execute_builds_every_target_then_checksums() {
    let temp = TempDir::new().unwrap();
    let request = request(&temp, default_targets(), true);
    let plan = compute_plan(&request, temp.path(), june_third()).unwrap();
    let go = GoCompiler::new(fake_compiler(temp.path(), WRITING_COMPILER));

    let mut invocations = Vec::new();
    let report = execute_plan(&plan, &go, |artifact| invocations.push(artifact.target))
      .await
      .unwrap();

    assert_eq!(invocations.len(), 3);
    assert_eq!(report.built.len(), 3);
    for artifact in &report.built {
      assert!(artifact.exists());
    }

    let manifest = fs::read_to_string(report.checksum_manifest.unwrap()).unwrap();
    assert_eq!(manifest.lines().count(), 3);
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn test_execute_failure_skips_remaining_targets_and_checksums() {
    let temp = TempDir::new().unwrap();
    let request = request(&temp, default_targets(), true);
    let plan = compute_plan(&request, temp.path(), june_third()).unwrap();
    let go = GoCompiler::new(fake_compiler(temp.path(), "#!/bin/sh\necho 'boom' >&2\nexit 1\n"));

    let mut invocations = 0;
    let err = execute_plan(&plan, &go, |_| invocations += 1).await.unwrap_err();

    assert!(matches!(err, ReleaseError::CompilerFailed { .. }));
    assert_eq!(invocations, 1);
    assert!(!temp.path().join("build").join("checksums.txt").exists());
  }
}
