//! zapfs: sobrescribe el espacio libre de un sistema de archivos con un patrón fijo.

mod args;
mod logging;
mod reporter;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use thiserror::Error;
use tracing::{debug, info};

use zapfs_config::{ConfigError, TomlConfigBackend, ZapfsPaths};
use zapfs_core::CoreError;
use zapfs_core::domain::ScrubConfig;
use zapfs_core::domain::units::bytes_to_gb;
use zapfs_core::services::{RunSummary, ScrubService};
use zapfs_fs::{FsScrubTarget, OsFreeSpace, ScrubSettings};

use crate::args::Args;
use crate::reporter::ConsoleReporter;

#[derive(Debug, Error)]
enum AppError {
  #[error("{0}")]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Core(#[from] CoreError),
}

fn main() -> ExitCode {
  let args = match Args::try_parse() {
    Ok(args) => args,
    Err(e) => {
      // Ayuda y versión salen por stdout con código 0; el resto es un error de uso.
      let code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
      let _ = e.print();
      return code;
    }
  };

  logging::init(args.verbose);

  let Some(temp_dir) = args.temp_dir.clone() else {
    let _ = Args::command().print_help();
    println!();
    return ExitCode::SUCCESS;
  };

  match run(&args, temp_dir) {
    Ok(summary) => {
      info!(passes = summary.passes_completed, bytes_per_pass = summary.bytes_per_pass, "done");
      ExitCode::SUCCESS
    }
    Err(e) => {
      report_error(&e);
      ExitCode::FAILURE
    }
  }
}

fn run(args: &Args, temp_dir: PathBuf) -> Result<RunSummary, AppError> {
  let settings = load_settings(args)?;

  let cfg = ScrubConfig::new(
    temp_dir,
    args.buffer_size_mb.unwrap_or(settings.buffer_size_mb),
    args.buffer_count.unwrap_or(settings.buffer_count),
    args.passes.unwrap_or(settings.passes),
    args.pattern.clone().unwrap_or(settings.pattern),
    args.test_run,
  )?;
  debug!(?cfg, "validated configuration");

  let service = ScrubService::new(OsFreeSpace, FsScrubTarget, ConsoleReporter);
  Ok(service.run(&cfg)?)
}

/// Flags > `[scrub]` de zapfs.toml > valores por defecto.
fn load_settings(args: &Args) -> Result<ScrubSettings, ConfigError> {
  let paths = match &args.config {
    Some(file) => ZapfsPaths::from_file(file),
    None => match ZapfsPaths::detect() {
      Ok(paths) => paths,
      Err(ConfigError::Directories) => {
        debug!("no home directory, using built-in defaults");
        return Ok(ScrubSettings::default());
      }
      Err(e) => return Err(e),
    },
  };

  debug!(file = %paths.config_file().display(), "loading settings");
  ScrubSettings::load_from(&TomlConfigBackend::new(paths))
}

fn report_error(err: &AppError) {
  match err {
    AppError::Core(CoreError::InsufficientSpace { available, .. }) => {
      eprintln!("*** Not enough free space in temp directory file system ({:.2} GB).", bytes_to_gb(*available));
      eprintln!("*** Modify one or more numeric parameters and try again.");
    }
    AppError::Core(CoreError::Pass { pass, source, .. }) => {
      eprintln!("Error during pass {pass}, err: {source}");
    }
    other => eprintln!("*** {other}"),
  }
}
