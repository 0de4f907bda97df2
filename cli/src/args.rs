use std::path::PathBuf;

use clap::{ArgAction, Parser};
use zapfs_core::domain::Pattern;

const AFTER_HELP: &str = "\
Examples:
  zapfs -t TEMPDIR
      Do a test run using the specified temp directory.

  zapfs [-b=N] [-c=N] [-n=N] TEMPDIR
      Scrub the free space of the file system holding TEMPDIR.

Defaults for -b, -c, -n and -p can also be set in the [scrub] section of zapfs.toml.";

/// Zap the free space of a file system. Fill it with a secure byte pattern.
#[derive(Parser, Debug)]
#[command(name = "zapfs", version, about, after_help = AFTER_HELP)]
pub struct Args {
  /// Size of each buffer to write to a temp file (in MB) [default: 10]
  #[arg(short = 'b', value_name = "N")]
  pub buffer_size_mb: Option<u64>,

  /// Count of buffers to write in each pass (>0) [default: 1000]
  #[arg(short = 'c', value_name = "N")]
  pub buffer_count: Option<u64>,

  /// Number of file system free space passes (>0) [default: 5]
  #[arg(short = 'n', value_name = "N")]
  pub passes: Option<u64>,

  /// Test run: check the directory only, skip the free space check and the passes
  #[arg(short = 't')]
  pub test_run: bool,

  /// Fill pattern in hex, e.g. aa55 or 0xAA,0x55 [default: aa55]
  #[arg(short = 'p', long = "pattern", value_name = "HEX")]
  pub pattern: Option<Pattern>,

  /// Path to configuration file
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Increase log verbosity on stderr (-v, -vv)
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,

  /// Directory in which to create the temporary files
  #[arg(value_name = "TEMPDIR")]
  pub temp_dir: Option<PathBuf>,
}
