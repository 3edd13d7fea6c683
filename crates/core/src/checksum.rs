//! Checksum manifest generation
//!
//! After a successful run, every artifact can be hashed into a single
//! manifest file with one `<hash>  <path>` line per artifact, the layout
//! `sha256sum` emits.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::ReleaseError;

/// Hash a file's contents.
///
/// Returns the full 64-character lowercase hex SHA-256 of the file.
pub fn hash_file(path: &Path) -> Result<String, ReleaseError> {
  let mut file = match fs::File::open(path) {
    Ok(file) => file,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      return Err(ReleaseError::ArtifactMissing(path.to_path_buf()));
    }
    Err(e) => return Err(ReleaseError::Io(e)),
  };

  let mut hasher = Sha256::new();
  let mut buffer = [0u8; 8192];

  loop {
    let bytes_read = file.read(&mut buffer)?;
    if bytes_read == 0 {
      break;
    }
    hasher.update(&buffer[..bytes_read]);
  }

  Ok(format!("{:x}", hasher.finalize()))
}

/// Render the checksum manifest for a set of artifacts, in input order.
///
/// Fails if any artifact is missing; a partial manifest is never produced.
pub fn render_manifest(artifacts: &[PathBuf]) -> Result<String, ReleaseError> {
  let mut manifest = String::new();

  for artifact in artifacts {
    let hash = hash_file(artifact)?;
    manifest.push_str(&hash);
    manifest.push_str("  ");
    manifest.push_str(&artifact.display().to_string());
    manifest.push('\n');
  }

  Ok(manifest)
}

/// Hash every artifact and write the manifest file in one shot.
pub fn write_manifest(artifacts: &[PathBuf], manifest_path: &Path) -> Result<(), ReleaseError> {
  let manifest = render_manifest(artifacts)?;
  fs::write(manifest_path, manifest)?;

  debug!(path = %manifest_path.display(), artifacts = artifacts.len(), "checksum manifest written");

  Ok(())
}
