use zapfs_core::domain::ScrubConfig;
use zapfs_core::domain::units::bytes_to_gb;
use zapfs_core::ports::ProgressReporter;

/// Imprime el progreso en stdout. Los errores van a stderr desde `main`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
  fn start(&self, cfg: &ScrubConfig) {
    if cfg.is_test_run() {
      println!("Begin, test run");
    } else {
      println!(
        "Begin, temp directory: {}, Buffer count: {}, Buffer size: {} MB, temp file size: {:.2} GB, #passes: {}",
        cfg.target_dir().display(),
        cfg.buffer_count(),
        cfg.buffer_size_mb(),
        bytes_to_gb(cfg.pass_bytes()),
        cfg.passes()
      );
    }
  }

  fn free_space(&self, available_bytes: u64) {
    println!("Filesystem free space: {:.2} GB", bytes_to_gb(available_bytes));
  }

  fn pass(&self, pass: u64, total: u64) {
    println!("Pass {pass} of {total}...");
  }

  fn finish(&self) {
    println!("End.");
  }
}
