//! Error types for relbuild-core

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while planning or executing a release build.
///
/// Every variant is fatal: a release run has no retry or partial-success
/// path, so the first error aborts the whole run.
#[derive(Debug, Error)]
pub enum ReleaseError {
  /// The project manifest could not be read.
  #[error("failed to read project manifest {path}: {source}")]
  ManifestRead {
    path: String,
    #[source]
    source: std::io::Error,
  },

  /// The project manifest is not valid YAML or lacks the version field.
  #[error("invalid project manifest {path}: {message}")]
  ManifestParse { path: String, message: String },

  /// A platform target string could not be parsed.
  #[error("invalid platform target {input:?}: expected <os>/<arch> such as linux/amd64")]
  InvalidTarget { input: String },

  /// The module path could not be derived.
  #[error("cannot derive module path: {0}")]
  Identity(String),

  /// The compiler could not be started at all.
  #[error("failed to run {program}: {source}")]
  CompilerSpawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The compiler exited with a non-zero status.
  #[error("{program} build failed for {target} with exit code {code:?}")]
  CompilerFailed {
    program: String,
    target: String,
    code: Option<i32>,
    /// Captured diagnostics, passed through to the user untouched.
    stderr: String,
  },

  /// An artifact was missing when the checksum manifest was written.
  #[error("artifact missing at checksum time: {}", .0.display())]
  ArtifactMissing(PathBuf),

  /// I/O error: output directory creation or manifest write.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
