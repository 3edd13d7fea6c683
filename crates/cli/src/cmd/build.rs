//! Implementation of the `relbuild build` command.
//!
//! Computes the release plan, builds every target in order, and writes the
//! checksum manifest when enabled. The first compiler failure aborts the
//! run with the compiler's diagnostics passed through untouched.

use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use relbuild_core::{GoCompiler, ReleaseError, compute_plan, execute_plan};

use crate::ReleaseArgs;
use crate::output::{format_duration, print_error, print_info, print_stat, print_success};

pub fn cmd_build(args: &ReleaseArgs, verbose: bool) -> Result<()> {
  let request = super::release_request(args)?;

  // Read once, up front: the plan must not depend on re-queried state.
  let cwd = env::current_dir().context("Failed to determine working directory")?;
  let today = Local::now().date_naive();

  let plan = compute_plan(&request, &cwd, today)?;

  if verbose {
    print_stat("Module path", &plan.module_path);
    print_stat("Version", &plan.stamp.version);
    print_stat("Date", &plan.stamp.date);
    print_stat("Ldflags", &plan.ldflags);
    println!();
  }

  let go = GoCompiler::new(&args.go);
  let started = Instant::now();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt.block_on(execute_plan(&plan, &go, |artifact| {
    print_info(&artifact.target.label());
  }));

  let report = match result {
    Ok(report) => report,
    Err(e) => {
      if let ReleaseError::CompilerFailed { stderr, .. } = &e {
        // The compiler's own diagnostics, verbatim.
        eprint!("{}", stderr);
      }
      print_error(&e.to_string());
      std::process::exit(1);
    }
  };

  info!(out_dir = %plan.out_dir.display(), artifacts = report.built.len(), "artifacts written");

  println!();
  print_success(&format!(
    "Built {} artifact(s) in {}",
    report.built.len(),
    format_duration(started.elapsed())
  ));

  if let Some(manifest) = &report.checksum_manifest {
    print_stat("Checksums", &manifest.display().to_string());
  }

  Ok(())
}
