use std::path::Path;

use crate::errors::CoreError;

/// Consulta del espacio disponible en el sistema de archivos que contiene `path`.
///
/// Devuelve los bytes utilizables por un escritor sin privilegios (no la
/// capacidad total): el valor respeta las reservas y cuotas que reporte el SO.
/// Es una foto del momento; nadie la vuelve a validar después.
pub trait FreeSpaceProbe {
  fn available_bytes(&self, path: &Path) -> Result<u64, CoreError>;
}
