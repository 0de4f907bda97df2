use crate::domain::ScrubConfig;

// El binario implementa esto para imprimir el progreso en stdout.
pub trait ProgressReporter {
  fn start(&self, cfg: &ScrubConfig);
  fn free_space(&self, available_bytes: u64);
  fn pass(&self, pass: u64, total: u64);
  fn finish(&self);
}
