//! Cross-compilation platform targets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReleaseError;

/// Target operating system, in GOOS spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Linux,
  Darwin,
  Windows,
}

impl Os {
  /// Returns the OS name as passed to the compiler via `GOOS`.
  pub const fn as_str(&self) -> &'static str {
    match self {
      Os::Linux => "linux",
      Os::Darwin => "darwin",
      Os::Windows => "windows",
    }
  }

  /// Human-readable OS name used in progress labels.
  pub const fn display_name(&self) -> &'static str {
    match self {
      Os::Linux => "Linux",
      Os::Darwin => "macOS",
      Os::Windows => "Windows",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Target CPU architecture, in GOARCH spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
  Amd64,
  Arm64,
}

impl Arch {
  /// Returns the architecture name as passed to the compiler via `GOARCH`.
  pub const fn as_str(&self) -> &'static str {
    match self {
      Arch::Amd64 => "amd64",
      Arch::Arm64 => "arm64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A cross-compilation target: an (operating system, architecture) pair.
///
/// Targets are written `<os>/<arch>` on the command line (e.g.
/// `linux/amd64`) and drive one compiler invocation each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
  pub os: Os,
  pub arch: Arch,
}

impl Target {
  /// Create a new target.
  pub const fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Deterministic artifact file name for a binary base name,
  /// `<name>-<os>-<arch>`.
  pub fn artifact_name(&self, name: &str) -> String {
    format!("{}-{}-{}", name, self.os, self.arch)
  }

  /// Display label shown while building, e.g. `macOS (Apple Silicon)`.
  pub fn label(&self) -> String {
    match (self.os, self.arch) {
      (Os::Darwin, Arch::Amd64) => "macOS (Intel)".to_string(),
      (Os::Darwin, Arch::Arm64) => "macOS (Apple Silicon)".to_string(),
      (os, arch) => format!("{} ({})", os.display_name(), arch),
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.os, self.arch)
  }
}

impl FromStr for Target {
  type Err = ReleaseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || ReleaseError::InvalidTarget { input: s.to_string() };

    let Some((os, arch)) = s.split_once('/') else {
      return Err(invalid());
    };

    let os = match os {
      "linux" => Os::Linux,
      "darwin" => Os::Darwin,
      "windows" => Os::Windows,
      _ => return Err(invalid()),
    };

    let arch = match arch {
      "amd64" => Arch::Amd64,
      "arm64" => Arch::Arm64,
      _ => return Err(invalid()),
    };

    Ok(Target::new(os, arch))
  }
}

/// The default target list: Linux on amd64 plus both macOS architectures.
pub fn default_targets() -> Vec<Target> {
  vec![
    Target::new(Os::Linux, Arch::Amd64),
    Target::new(Os::Darwin, Arch::Amd64),
    Target::new(Os::Darwin, Arch::Arm64),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_target_parse() {
    let target: Target = "linux/amd64".parse().unwrap();
    assert_eq!(target, Target::new(Os::Linux, Arch::Amd64));

    let target: Target = "windows/arm64".parse().unwrap();
    assert_eq!(target, Target::new(Os::Windows, Arch::Arm64));
  }

  #[test]
  fn test_target_parse_rejects_bad_input() {
    for input in ["linux", "linux-amd64", "plan9/amd64", "linux/mips", ""] {
      let err = input.parse::<Target>().unwrap_err();
      match err {
        ReleaseError::InvalidTarget { input: got } => assert_eq!(got, input),
        other => panic!("expected InvalidTarget, got {:?}", other),
      }
    }
  }

  #[test]
  fn test_target_display_round_trips() {
    for target in default_targets() {
      let parsed: Target = target.to_string().parse().unwrap();
      assert_eq!(parsed, target);
    }
  }

  #[test]
  fn test_artifact_name() {
    let target = Target::new(Os::Darwin, Arch::Arm64);
    assert_eq!(target.artifact_name("clingy"), "clingy-darwin-arm64");
  }

  #[test]
  fn test_labels() {
    assert_eq!(Target::new(Os::Linux, Arch::Amd64).label(), "Linux (amd64)");
    assert_eq!(Target::new(Os::Darwin, Arch::Amd64).label(), "macOS (Intel)");
    assert_eq!(Target::new(Os::Darwin, Arch::Arm64).label(), "macOS (Apple Silicon)");
    assert_eq!(Target::new(Os::Windows, Arch::Arm64).label(), "Windows (arm64)");
  }

  #[test]
  fn test_default_targets_are_distinct() {
    let targets = default_targets();
    let names: Vec<String> = targets.iter().map(|t| t.artifact_name("x")).collect();

    for (i, name) in names.iter().enumerate() {
      assert!(!names[i + 1..].contains(name));
    }
  }
}
