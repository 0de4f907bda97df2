use tracing::{debug, info};

use crate::domain::ScrubConfig;
use crate::errors::CoreError;
use crate::ports::{FreeSpaceProbe, ProgressReporter, ScrubTarget};

/// Resultado de una ejecución completa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
  pub passes_completed: u64,
  pub bytes_per_pass: u64,
  /// Lectura del pre-flight; `None` en modo prueba.
  pub free_bytes: Option<u64>,
}

/// Orquesta una ejecución: pre-flight, comprobaciones del directorio y pasadas.
///
/// Todo es secuencial. Las pasadas nunca se solapan: cada una asume acceso
/// casi exclusivo al espacio libre medido.
pub struct ScrubService<P, T, R>
where
  P: FreeSpaceProbe,
  T: ScrubTarget,
  R: ProgressReporter,
{
  probe: P,
  target: T,
  reporter: R,
}

impl<P, T, R> ScrubService<P, T, R>
where
  P: FreeSpaceProbe,
  T: ScrubTarget,
  R: ProgressReporter,
{
  pub fn new(probe: P, target: T, reporter: R) -> Self {
    Self { probe, target, reporter }
  }

  /// Ejecuta la máquina de estados
  /// `PreflightCheck → DirectoryCheck → WritabilityCheck → Pass(1..n) → Done`.
  ///
  /// La validación ya ocurrió al construir `cfg`. El pre-flight es una sola
  /// muestra del espacio libre; no se vuelve a medir entre pasadas.
  pub fn run(&self, cfg: &ScrubConfig) -> Result<RunSummary, CoreError> {
    let dir = cfg.target_dir();
    self.reporter.start(cfg);

    // 1) Pre-flight (se omite en modo prueba)
    let free_bytes = if cfg.is_test_run() {
      None
    } else {
      let available = self.probe.available_bytes(dir)?;
      self.reporter.free_space(available);
      debug!(available, required = cfg.pass_bytes(), "pre-flight free space sample");

      if available < cfg.pass_bytes() {
        return Err(CoreError::InsufficientSpace { available, required: cfg.pass_bytes() });
      }
      Some(available)
    };

    // 2) Directorio existente y escribible
    self.target.check_directory(dir)?;
    self.target.check_writable(dir, cfg.pattern())?;

    if cfg.is_test_run() {
      info!(dir = %dir.display(), "test run finished, scrub passes skipped");
      self.reporter.finish();
      return Ok(RunSummary { passes_completed: 0, bytes_per_pass: cfg.pass_bytes(), free_bytes });
    }

    // 3) Pasadas; la primera que falla aborta todo
    let total = cfg.passes();
    for pass in 1..=total {
      self.reporter.pass(pass, total);
      info!(pass, total, bytes = cfg.pass_bytes(), "starting scrub pass");

      self
        .target
        .scrub_once(dir, cfg.buffer_count(), cfg.buffer_size(), cfg.pattern())
        .map_err(|e| CoreError::Pass { pass, total, source: Box::new(e) })?;
    }

    self.reporter.finish();
    Ok(RunSummary { passes_completed: total, bytes_per_pass: cfg.pass_bytes(), free_bytes })
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::path::Path;

  use super::*;
  use crate::domain::Pattern;
  use crate::errors::Stage;

  struct FixedProbe(Result<u64, ()>);

  impl FreeSpaceProbe for FixedProbe {
    fn available_bytes(&self, path: &Path) -> Result<u64, CoreError> {
      self.0.map_err(|_| CoreError::Probe {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
      })
    }
  }

  #[derive(Default)]
  struct FakeTarget {
    calls: RefCell<Vec<String>>,
    missing_dir: bool,
    read_only: bool,
    fail_on_pass: Option<usize>,
  }

  impl ScrubTarget for &FakeTarget {
    fn check_directory(&self, _dir: &Path) -> Result<(), CoreError> {
      self.calls.borrow_mut().push("dir".into());
      if self.missing_dir {
        return Err(CoreError::Directory { path: "/missing".into(), reason: "not found".into() });
      }
      Ok(())
    }

    fn check_writable(&self, _dir: &Path, _pattern: &Pattern) -> Result<(), CoreError> {
      self.calls.borrow_mut().push("writable".into());
      if self.read_only {
        return Err(CoreError::Directory { path: "/ro".into(), reason: "read-only".into() });
      }
      Ok(())
    }

    fn scrub_once(
      &self,
      _dir: &Path,
      buffer_count: u64,
      buffer_size: usize,
      _pattern: &Pattern,
    ) -> Result<(), CoreError> {
      let n = self.calls.borrow().iter().filter(|c| c.starts_with("scrub")).count() + 1;
      self.calls.borrow_mut().push(format!("scrub {buffer_count}x{buffer_size}"));
      if self.fail_on_pass == Some(n) {
        return Err(CoreError::io(Stage::Write, std::io::Error::other("no space left on device")));
      }
      Ok(())
    }
  }

  #[derive(Default)]
  struct RecordingReporter {
    lines: RefCell<Vec<String>>,
  }

  impl ProgressReporter for &RecordingReporter {
    fn start(&self, cfg: &ScrubConfig) {
      self.lines.borrow_mut().push(format!("start test_run={}", cfg.is_test_run()));
    }

    fn free_space(&self, available_bytes: u64) {
      self.lines.borrow_mut().push(format!("free {available_bytes}"));
    }

    fn pass(&self, pass: u64, total: u64) {
      self.lines.borrow_mut().push(format!("pass {pass}/{total}"));
    }

    fn finish(&self) {
      self.lines.borrow_mut().push("end".into());
    }
  }

  fn config(buffer_size: u64, buffer_count: u64, passes: u64, test_run: bool) -> ScrubConfig {
    ScrubConfig::with_buffer_bytes("/scratch", buffer_size, buffer_count, passes, Pattern::default(), test_run)
      .unwrap()
  }

  #[test]
  fn runs_every_pass_when_space_is_sufficient() {
    let target = FakeTarget::default();
    let reporter = RecordingReporter::default();
    let service = ScrubService::new(FixedProbe(Ok(1 << 30)), &target, &reporter);

    let summary = service.run(&config(1_048_576, 10, 2, false)).unwrap();

    assert_eq!(summary.passes_completed, 2);
    assert_eq!(summary.bytes_per_pass, 10 * 1_048_576);
    assert_eq!(summary.free_bytes, Some(1 << 30));
    assert_eq!(*target.calls.borrow(), ["dir", "writable", "scrub 10x1048576", "scrub 10x1048576"]);
    assert_eq!(
      *reporter.lines.borrow(),
      ["start test_run=false", "free 1073741824", "pass 1/2", "pass 2/2", "end"]
    );
  }

  #[test]
  fn insufficient_space_aborts_before_touching_the_disk() {
    let target = FakeTarget::default();
    let reporter = RecordingReporter::default();
    let service = ScrubService::new(FixedProbe(Ok(5 * 1_048_576)), &target, &reporter);

    let err = service.run(&config(10 * 1_048_576, 1, 1, false)).unwrap_err();

    assert!(matches!(
      err,
      CoreError::InsufficientSpace { available, required } if available == 5 * 1_048_576 && required == 10 * 1_048_576
    ));
    assert!(target.calls.borrow().is_empty());
    assert!(!reporter.lines.borrow().contains(&"end".to_string()));
  }

  #[test]
  fn free_space_equal_to_pass_size_is_enough() {
    let target = FakeTarget::default();
    let reporter = RecordingReporter::default();
    let service = ScrubService::new(FixedProbe(Ok(4096)), &target, &reporter);

    assert!(service.run(&config(1024, 4, 1, false)).is_ok());
  }

  #[test]
  fn probe_failure_is_surfaced() {
    let target = FakeTarget::default();
    let reporter = RecordingReporter::default();
    let service = ScrubService::new(FixedProbe(Err(())), &target, &reporter);

    let err = service.run(&config(1024, 1, 1, false)).unwrap_err();

    assert!(matches!(err, CoreError::Probe { .. }));
    assert!(target.calls.borrow().is_empty());
  }

  #[test]
  fn test_run_skips_preflight_and_passes() {
    let target = FakeTarget::default();
    let reporter = RecordingReporter::default();
    // Un probe que fallaría demuestra que el pre-flight no se ejecuta.
    let service = ScrubService::new(FixedProbe(Err(())), &target, &reporter);

    let summary = service.run(&config(1024, 1000, 5, true)).unwrap();

    assert_eq!(summary.passes_completed, 0);
    assert_eq!(summary.free_bytes, None);
    assert_eq!(*target.calls.borrow(), ["dir", "writable"]);
    assert_eq!(*reporter.lines.borrow(), ["start test_run=true", "end"]);
  }

  #[test]
  fn missing_directory_stops_before_writability_check() {
    let target = FakeTarget { missing_dir: true, ..Default::default() };
    let reporter = RecordingReporter::default();
    let service = ScrubService::new(FixedProbe(Ok(u64::MAX)), &target, &reporter);

    let err = service.run(&config(1024, 1, 1, false)).unwrap_err();

    assert!(matches!(err, CoreError::Directory { .. }));
    assert_eq!(*target.calls.borrow(), ["dir"]);
  }

  #[test]
  fn unwritable_directory_runs_no_pass() {
    let target = FakeTarget { read_only: true, ..Default::default() };
    let reporter = RecordingReporter::default();
    let service = ScrubService::new(FixedProbe(Ok(u64::MAX)), &target, &reporter);

    let err = service.run(&config(1024, 1, 3, false)).unwrap_err();

    assert!(matches!(err, CoreError::Directory { .. }));
    assert_eq!(*target.calls.borrow(), ["dir", "writable"]);
  }

  #[test]
  fn failing_pass_aborts_remaining_passes() {
    let target = FakeTarget { fail_on_pass: Some(2), ..Default::default() };
    let reporter = RecordingReporter::default();
    let service = ScrubService::new(FixedProbe(Ok(u64::MAX)), &target, &reporter);

    let err = service.run(&config(1024, 1, 4, false)).unwrap_err();

    match &err {
      CoreError::Pass { pass, total, .. } => assert_eq!((*pass, *total), (2, 4)),
      other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.stage(), Some(Stage::Write));
    assert_eq!(target.calls.borrow().iter().filter(|c| c.starts_with("scrub")).count(), 2);
    assert!(!reporter.lines.borrow().contains(&"end".to_string()));
  }
}
