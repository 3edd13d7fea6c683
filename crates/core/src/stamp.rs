//! Version and build-date stamping
//!
//! Release binaries carry their version and build date in two symbols of
//! the project's `internal/cli` package, injected at link time with Go's
//! `-X` flags.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Format a date the way release builds are stamped: day-of-month numeral,
/// full English month name, four-digit year, joined with hyphens.
///
/// `2025-06-03` becomes `3-June-2025`.
pub fn format_build_date(date: NaiveDate) -> String {
  // %B is locale-independent in chrono, so the month name is always English.
  format!("{}-{}-{}", date.day(), date.format("%B"), date.year())
}

/// The version and date pair embedded into every artifact of a run.
///
/// Constructed once per run from the manifest version and the current
/// date, then shared by all compiler invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStamp {
  pub version: String,
  pub date: String,
}

impl BuildStamp {
  /// Create a stamp for a version and a build date.
  pub fn new(version: impl Into<String>, date: NaiveDate) -> Self {
    Self {
      version: version.into(),
      date: format_build_date(date),
    }
  }

  /// Linker flags defining the `Version` and `Date` symbols in the
  /// project's internal CLI package.
  pub fn ldflags(&self, module_path: &str) -> String {
    format!(
      "-X {module}/internal/cli.Version={version} -X {module}/internal/cli.Date={date}",
      module = module_path,
      version = self.version,
      date = self.date,
    )
  }
}
