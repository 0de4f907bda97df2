use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zapfs_core::domain::{Pattern, fill_pattern};
use zapfs_core::ports::ScrubTarget;
use zapfs_core::{CoreError, Stage};

/// Prefijo reconocible de los temporales de cada pasada (`zapfs_XXXXXX.tmp`).
pub const TEMP_PREFIX: &str = "zapfs_";
pub const TEMP_SUFFIX: &str = ".tmp";
/// Archivo de prueba de la comprobación de escritura.
pub const DUMMY_FILE_NAME: &str = "zapfs_dummy.bin";

/// Una pasada: crea un temporal único en `temp_dir`, escribe `buffer_count`
/// veces un buffer de `buffer_size` bytes lleno con `pattern`, sincroniza y
/// borra el archivo.
///
/// El borrado se intenta en todas las salidas (éxito, fallo de escritura o de
/// sync) y sus errores solo se registran: el error original nunca se pisa.
pub fn scrub_once(temp_dir: &Path, buffer_count: u64, buffer_size: usize, pattern: &[u8]) -> Result<(), CoreError> {
  if pattern.is_empty() {
    return Err(CoreError::Config("scrub_once: empty fill pattern".into()));
  }

  let temp = create_scrub_file(temp_dir)?;
  debug!(path = %temp.path().display(), buffer_count, buffer_size, "created scrub file");

  // Un solo buffer, llenado una vez y reutilizado en cada escritura.
  let mut buffer = vec![0u8; buffer_size];
  fill_pattern(&mut buffer, pattern)?;

  run_and_remove(temp, |file| write_and_sync(file, &buffer, buffer_count))
}

/// Creación atómica con sufijo aleatorio; `NamedTempFile` borra en Drop.
fn create_scrub_file(temp_dir: &Path) -> Result<NamedTempFile, CoreError> {
  tempfile::Builder::new()
    .prefix(TEMP_PREFIX)
    .suffix(TEMP_SUFFIX)
    .tempfile_in(temp_dir)
    .map_err(|e| CoreError::io(Stage::Create, e))
}

/// Ejecuta `work` sobre el temporal y lo borra pase lo que pase.
fn run_and_remove<F>(mut temp: NamedTempFile, work: F) -> Result<(), CoreError>
where
  F: FnOnce(&mut File) -> Result<(), CoreError>,
{
  let result = work(temp.as_file_mut());

  let path = temp.path().to_path_buf();
  if let Err(e) = temp.close() {
    warn!(path = %path.display(), error = %e, "could not remove scrub file");
  }

  result
}

fn write_and_sync(file: &mut File, buffer: &[u8], buffer_count: u64) -> Result<(), CoreError> {
  for _ in 0..buffer_count {
    file.write_all(buffer).map_err(|e| CoreError::io(Stage::Write, e))?;
  }
  file.sync_all().map_err(|e| CoreError::io(Stage::Sync, e))
}

pub fn check_directory(dir: &Path) -> Result<(), CoreError> {
  let meta = fs::metadata(dir)
    .map_err(|e| CoreError::Directory { path: dir.to_path_buf(), reason: e.to_string() })?;

  if !meta.is_dir() {
    return Err(CoreError::Directory { path: dir.to_path_buf(), reason: "not a directory".into() });
  }
  Ok(())
}

/// Crea `zapfs_dummy.bin`, le escribe el patrón y lo borra.
pub fn check_writable(dir: &Path, pattern: &Pattern) -> Result<(), CoreError> {
  let dummy_path = dir.join(DUMMY_FILE_NAME);

  let mut dummy = File::create(&dummy_path).map_err(|e| CoreError::Directory {
    path: dir.to_path_buf(),
    reason: format!("create {} failed: {e}", dummy_path.display()),
  })?;
  let written = dummy.write_all(pattern.as_bytes());
  drop(dummy);

  if let Err(e) = fs::remove_file(&dummy_path) {
    warn!(path = %dummy_path.display(), error = %e, "could not remove writability marker");
  }

  written.map_err(|e| CoreError::Directory {
    path: dir.to_path_buf(),
    reason: format!("write {} failed: {e}", dummy_path.display()),
  })
}

/// `ScrubTarget` sobre el sistema de archivos local.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScrubTarget;

impl ScrubTarget for FsScrubTarget {
  fn check_directory(&self, dir: &Path) -> Result<(), CoreError> {
    check_directory(dir)
  }

  fn check_writable(&self, dir: &Path, pattern: &Pattern) -> Result<(), CoreError> {
    check_writable(dir, pattern)
  }

  fn scrub_once(&self, dir: &Path, buffer_count: u64, buffer_size: usize, pattern: &Pattern) -> Result<(), CoreError> {
    scrub_once(dir, buffer_count, buffer_size, pattern.as_bytes())
  }
}
