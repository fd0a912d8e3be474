use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Name of the environment variable holding the log filter directives
const FILTER_VAR: &str = "FRUITSNAKE_LOG";

/// Send log events to the end of the file at `path`.  The terminal belongs to
/// the game, so nothing is ever logged to stderr.
pub(crate) fn init(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_env(FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
