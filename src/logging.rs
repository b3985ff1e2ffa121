//! Opt-in diagnostics for programs embedding the client.
//!
//! The library only emits `tracing` events; nothing is printed unless the
//! host installs a subscriber, for example with [`init_tracing`].

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber. `RUST_LOG` takes precedence over
/// `default_directive` (e.g. `"charsession=debug"`).
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    default_directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialization_fails() {
        // The first call may fail if another test already installed one.
        let _ = init_tracing("charsession=debug");
        assert!(init_tracing("charsession=debug").is_err());
    }
}
