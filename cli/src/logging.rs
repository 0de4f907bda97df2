use tracing_subscriber::EnvFilter;

/// Instala el subscriber global sobre stderr; stdout queda para el progreso.
///
/// `RUST_LOG` tiene prioridad sobre `-v`.
pub fn init(verbosity: u8) {
  let default_level = match verbosity {
    0 => "warn",
    1 => "info",
    _ => "debug",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  // Falla solo si ya hay un subscriber instalado; en ese caso se conserva.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(verbosity > 1)
    .try_init();
}
