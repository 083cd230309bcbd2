//! Helpers shared by the CLI commands.

use flowmodoro_core::{Database, KvStore, MemoryStore};
use tracing_subscriber::EnvFilter;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Open the on-disk store, or a throwaway in-memory one.
pub fn open_store(ephemeral: bool) -> CliResult<Box<dyn KvStore>> {
    if ephemeral {
        return Ok(Box::new(MemoryStore::new()));
    }
    Ok(Box::new(Database::open()?))
}

/// Log to stderr so stdout stays clean for status lines and JSON.
/// `RUST_LOG` overrides the default `warn` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Convert a 1-based index typed by the user.
pub fn zero_based(index: usize) -> Option<usize> {
    index.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_based_rejects_zero() {
        assert_eq!(zero_based(0), None);
        assert_eq!(zero_based(1), Some(0));
    }
}
