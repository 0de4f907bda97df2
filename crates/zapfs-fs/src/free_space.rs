use std::io;
use std::path::Path;

use tracing::trace;
use zapfs_core::CoreError;
use zapfs_core::ports::FreeSpaceProbe;

/// Bytes disponibles para el usuario actual en el sistema de archivos de `path`.
///
/// En Unix es `f_bavail × f_frsize` de `statvfs`, que ya excluye los bloques
/// reservados para root.
#[cfg(unix)]
pub fn available_bytes(path: &Path) -> io::Result<u64> {
  use nix::sys::statvfs::statvfs;

  let stat = statvfs(path).map_err(io::Error::from)?;
  let blocks = stat.blocks_available() as u64;
  let block_size = stat.fragment_size() as u64;
  trace!(blocks, block_size, "statvfs");

  Ok(blocks.saturating_mul(block_size))
}

/// En Windows es el "free bytes available to caller" de `GetDiskFreeSpaceExW`,
/// que respeta las cuotas del usuario.
#[cfg(windows)]
pub fn available_bytes(path: &Path) -> io::Result<u64> {
  use std::os::windows::ffi::OsStrExt;
  use windows::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;
  use windows::core::PCWSTR;

  let wide: Vec<u16> = path.as_os_str().encode_wide().chain(std::iter::once(0)).collect();
  let mut avail: u64 = 0;

  // SAFETY: `wide` termina en NUL y vive hasta el final de la llamada.
  unsafe { GetDiskFreeSpaceExW(PCWSTR(wide.as_ptr()), Some(&mut avail as *mut u64), None, None) }
    .map_err(io::Error::from)?;
  trace!(avail, "GetDiskFreeSpaceExW");

  Ok(avail)
}

#[cfg(not(any(unix, windows)))]
pub fn available_bytes(_path: &Path) -> io::Result<u64> {
  Err(io::Error::new(io::ErrorKind::Unsupported, "free space query not supported on this platform"))
}

/// `FreeSpaceProbe` respaldado por la llamada nativa del SO.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFreeSpace;

impl FreeSpaceProbe for OsFreeSpace {
  fn available_bytes(&self, path: &Path) -> Result<u64, CoreError> {
    available_bytes(path).map_err(|source| CoreError::Probe { path: path.to_path_buf(), source })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn reports_space_for_existing_directory() {
    let tmp = tempdir().unwrap();
    // Cualquier volumen donde se pudo crear un tempdir tiene algo de espacio.
    assert!(available_bytes(tmp.path()).unwrap() > 0);
  }

  #[test]
  fn missing_path_is_a_probe_error() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");

    let err = OsFreeSpace.available_bytes(&missing).unwrap_err();
    match err {
      CoreError::Probe { path, .. } => assert_eq!(path, missing),
      other => panic!("unexpected error: {other:?}"),
    }
  }
}
