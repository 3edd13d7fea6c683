//! Project manifest loading
//!
//! The manifest is the project description file checked into the Go
//! repository being built (`baldrick-broth.yaml` by convention). The only
//! field this tool reads is `model.project.version`; everything else in the
//! file is ignored, and the version string is passed through verbatim.

use std::path::Path;

use serde::Deserialize;

use crate::error::ReleaseError;

/// The subset of the project manifest that drives a release build.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectManifest {
  pub model: Model,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Model {
  pub project: Project,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
  /// Semantic-version-like string, opaque to this tool.
  pub version: String,
}

impl ProjectManifest {
  /// Load a manifest from a YAML file.
  ///
  /// A missing file, malformed YAML, or a missing `model.project.version`
  /// field all fail with an error naming the path.
  pub fn load(path: &Path) -> Result<Self, ReleaseError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReleaseError::ManifestRead {
      path: path.display().to_string(),
      source: e,
    })?;

    serde_yaml::from_str(&content).map_err(|e| ReleaseError::ManifestParse {
      path: path.display().to_string(),
      message: e.to_string(),
    })
  }

  /// The project version, exactly as written in the manifest.
  pub fn version(&self) -> &str {
    &self.model.project.version
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;
  use tempfile::NamedTempFile;

  fn write_manifest(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
  }

  #[test]
  fn load_extracts_version() {
    let file = write_manifest(
      r#"
model:
  project:
    title: Clingy code detective
    version: 1.4.0
workflows:
  test:
    title: Test the project
"#,
    );

    let manifest = ProjectManifest::load(file.path()).unwrap();
    assert_eq!(manifest.version(), "1.4.0");
  }

  #[test]
  fn version_is_passed_through_verbatim() {
    let file = write_manifest("model:\n  project:\n    version: 2.0.0-rc.1+build.5\n");

    let manifest = ProjectManifest::load(file.path()).unwrap();
    assert_eq!(manifest.version(), "2.0.0-rc.1+build.5");
  }

  #[test]
  fn missing_file_names_the_path() {
    let err = ProjectManifest::load(Path::new("does-not-exist.yaml")).unwrap_err();

    match err {
      ReleaseError::ManifestRead { path, .. } => assert_eq!(path, "does-not-exist.yaml"),
      other => panic!("expected ManifestRead, got {:?}", other),
    }
  }

  #[test]
  fn missing_version_field_names_the_field() {
    let file = write_manifest("model:\n  project:\n    title: No version here\n");

    let err = ProjectManifest::load(file.path()).unwrap_err();
    match err {
      ReleaseError::ManifestParse { message, .. } => assert!(message.contains("version")),
      other => panic!("expected ManifestParse, got {:?}", other),
    }
  }

  #[test]
  fn malformed_yaml_fails() {
    let file = write_manifest("model: [unclosed\n");

    assert!(matches!(
      ProjectManifest::load(file.path()),
      Err(ReleaseError::ManifestParse { .. })
    ));
  }
}
