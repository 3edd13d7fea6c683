//! relbuild-core: release build planning and execution
//!
//! This crate turns a project manifest, an ordered platform target list and
//! a build date into stamped cross-compiled binaries, plus an optional
//! checksum manifest over the produced artifacts.

mod checksum;
mod error;
mod gobuild;
mod identity;
mod manifest;
mod platform;
mod release;
mod stamp;

pub use checksum::{hash_file, render_manifest, write_manifest};
pub use error::ReleaseError;
pub use gobuild::GoCompiler;
pub use identity::ModulePath;
pub use manifest::ProjectManifest;
pub use platform::{Arch, Os, Target, default_targets};
pub use release::{
  CHECKSUM_FILE, PlannedArtifact, ReleasePlan, ReleaseReport, ReleaseRequest, compute_plan, execute_plan,
};
pub use stamp::{BuildStamp, format_build_date};

/// Result type for release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;
