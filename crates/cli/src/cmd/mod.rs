mod build;
mod plan;

pub use build::cmd_build;
pub use plan::cmd_plan;

use anyhow::Result;
use relbuild_core::{ModulePath, ReleaseError, ReleaseRequest, Target, default_targets};

use crate::ReleaseArgs;

/// Convert parsed CLI options into a release request.
fn release_request(args: &ReleaseArgs) -> Result<ReleaseRequest> {
  let targets = if args.targets.is_empty() {
    default_targets()
  } else {
    args
      .targets
      .iter()
      .map(|t| t.parse::<Target>())
      .collect::<Result<Vec<_>, ReleaseError>>()?
  };

  // --module-path wins; otherwise the path is derived from --org and the
  // working directory name.
  let module_path = match &args.module_path {
    Some(path) => ModulePath::Explicit(path.clone()),
    None => ModulePath::OrgPrefix(args.org.clone()),
  };

  Ok(ReleaseRequest {
    manifest_path: args.config.clone(),
    out_dir: args.out_dir.clone(),
    targets,
    module_path,
    binary_name: args.name.clone(),
    checksums: args.checksums,
  })
}
