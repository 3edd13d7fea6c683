//! relbuild: cross-compiling release builder for Go CLI projects
//!
//! Reads the project version from the manifest, stamps it together with the
//! build date into each binary via linker flags, and builds one binary per
//! configured platform target.

mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Cross-compile stamped release binaries for every configured platform
#[derive(Parser)]
#[command(name = "relbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build release binaries for every configured target
  Build(ReleaseArgs),

  /// Show what a release run would do without invoking the compiler
  Plan {
    #[command(flatten)]
    args: ReleaseArgs,

    /// Emit the plan as JSON
    #[arg(long)]
    json: bool,
  },
}

/// Options shared by `build` and `plan`.
#[derive(Args)]
struct ReleaseArgs {
  /// Path to the project manifest
  #[arg(long, default_value = "baldrick-broth.yaml")]
  config: PathBuf,

  /// Directory to write artifacts to
  #[arg(long, default_value = "build")]
  out_dir: PathBuf,

  /// Platform target as <os>/<arch>; repeat for more targets
  /// [default: linux/amd64 darwin/amd64 darwin/arm64]
  #[arg(short = 't', long = "target", value_name = "OS/ARCH")]
  targets: Vec<String>,

  /// Explicit Go module path (otherwise derived from --org and the working
  /// directory name)
  #[arg(long)]
  module_path: Option<String>,

  /// Organization prefix joined with the working directory name
  #[arg(long, default_value = "github.com/flarebyte")]
  org: String,

  /// Binary base name (defaults to the module path's final segment)
  #[arg(long)]
  name: Option<String>,

  /// Write <out-dir>/checksums.txt after building
  #[arg(long)]
  checksums: bool,

  /// Go compiler to invoke
  #[arg(long, default_value = "go")]
  go: PathBuf,
}

fn main() -> Result<()> {
  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Build(args) => cmd::cmd_build(&args, cli.verbose),
    Commands::Plan { args, json } => cmd::cmd_plan(&args, json),
  }
}
