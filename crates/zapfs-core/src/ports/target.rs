use std::path::Path;

use crate::domain::Pattern;
use crate::errors::CoreError;

/// Port del directorio donde se escriben los archivos temporales.
///
/// La implementación real vive en `zapfs-fs`; el servicio solo ve estas tres
/// operaciones bloqueantes.
pub trait ScrubTarget {
  /// El path debe existir y ser un directorio.
  fn check_directory(&self, dir: &Path) -> Result<(), CoreError>;

  /// Crea, escribe una marca del tamaño del patrón y borra un archivo de prueba.
  fn check_writable(&self, dir: &Path, pattern: &Pattern) -> Result<(), CoreError>;

  /// Una pasada completa: crear temporal, escribir `buffer_count` buffers,
  /// sincronizar y borrar. El borrado se intenta siempre.
  fn scrub_once(
    &self,
    dir: &Path,
    buffer_count: u64,
    buffer_size: usize,
    pattern: &Pattern,
  ) -> Result<(), CoreError>;
}
