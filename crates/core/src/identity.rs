//! Project identity resolution
//!
//! The module path identifies the Go project being built; the stamped
//! symbols live under its `internal/cli` package. The path is either given
//! verbatim or derived from an organization prefix and the working
//! directory's base name. The two strategies are mutually exclusive and
//! chosen explicitly, never guessed.

use std::path::Path;

use crate::error::ReleaseError;

/// Strategy for resolving the Go module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModulePath {
  /// Use the given module path verbatim.
  Explicit(String),
  /// Join an organization prefix with the working directory's base name.
  OrgPrefix(String),
}

impl ModulePath {
  /// Resolve to a concrete module path.
  ///
  /// `cwd` is captured once at the start of a run and threaded in, so the
  /// result does not depend on when resolution happens.
  pub fn resolve(&self, cwd: &Path) -> Result<String, ReleaseError> {
    match self {
      ModulePath::Explicit(path) => Ok(path.clone()),
      ModulePath::OrgPrefix(org) => {
        let base = cwd.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
          ReleaseError::Identity(format!("working directory {} has no base name", cwd.display()))
        })?;
        Ok(format!("{}/{}", org.trim_end_matches('/'), base))
      }
    }
  }
}

/// Default binary base name for a module path: its final segment.
pub(crate) fn binary_name(module_path: &str) -> String {
  module_path
    .rsplit('/')
    .next()
    .filter(|segment| !segment.is_empty())
    .unwrap_or(module_path)
    .to_string()
}
