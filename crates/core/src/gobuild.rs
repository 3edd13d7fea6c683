//! Go compiler invocation
//!
//! Each platform target gets one `go build` invocation, with `GOOS` and
//! `GOARCH` selecting the target and `-ldflags` stamping the binary.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::ReleaseError;
use crate::platform::Target;

/// Handle on the external Go toolchain.
#[derive(Debug, Clone)]
pub struct GoCompiler {
  program: PathBuf,
}

impl GoCompiler {
  /// Use the given program as the compiler (normally `go` on PATH).
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
    }
  }

  /// Cross-compile one target, writing the binary to `output`.
  ///
  /// The child inherits the parent environment; only `GOOS` and `GOARCH`
  /// are overridden, since the toolchain needs its own HOME, GOPATH and
  /// PATH to operate. A non-zero exit fails with the compiler's stderr
  /// captured verbatim.
  pub async fn build(&self, target: Target, ldflags: &str, output: &Path) -> Result<(), ReleaseError> {
    info!(target = %target, output = %output.display(), "invoking go build");

    let mut command = Command::new(&self.program);
    command
      .arg("build")
      .arg("-o")
      .arg(output)
      .arg("-ldflags")
      .arg(ldflags)
      .env("GOOS", target.os.as_str())
      .env("GOARCH", target.arch.as_str());

    debug!(program = %self.program.display(), ldflags = %ldflags, "spawning compiler");

    let out = command.output().await.map_err(|e| ReleaseError::CompilerSpawn {
      program: self.program.display().to_string(),
      source: e,
    })?;

    if !out.status.success() {
      let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
      debug!(stderr = %stderr, "compiler stderr");

      return Err(ReleaseError::CompilerFailed {
        program: self.program.display().to_string(),
        target: target.to_string(),
        code: out.status.code(),
        stderr,
      });
    }

    Ok(())
  }
}
