//! Implementation of the `relbuild plan` command.
//!
//! Computes and prints the release plan without invoking the compiler:
//! version, build date, module path, linker flags, and one output path per
//! configured target.

use std::env;

use anyhow::{Context, Result};
use chrono::Local;

use relbuild_core::compute_plan;

use crate::ReleaseArgs;
use crate::output::{print_json, print_stat, symbols};

pub fn cmd_plan(args: &ReleaseArgs, json: bool) -> Result<()> {
  let request = super::release_request(args)?;

  let cwd = env::current_dir().context("Failed to determine working directory")?;
  let today = Local::now().date_naive();

  let plan = compute_plan(&request, &cwd, today)?;

  if json {
    return print_json(&plan);
  }

  println!("Release plan for {}", plan.module_path);
  print_stat("Version", &plan.stamp.version);
  print_stat("Date", &plan.stamp.date);
  print_stat("Binary", &plan.binary_name);
  print_stat("Ldflags", &plan.ldflags);

  println!();
  println!("Artifacts: {}", plan.artifacts.len());
  for artifact in &plan.artifacts {
    println!(
      "  {} {} ({})",
      symbols::INFO,
      artifact.output.display(),
      artifact.target.label()
    );
  }

  println!();
  match &plan.checksum_manifest {
    Some(path) => println!("Checksums: {}", path.display()),
    None => println!("Checksums: disabled"),
  }

  Ok(())
}
