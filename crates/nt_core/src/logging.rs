use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global fmt subscriber once. `RUST_LOG` wins over `default_directive`.
pub fn init_logging(default_directive: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        // a subscriber installed elsewhere between the check and here is fine
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

/// Default directive for a verbosity count from the command line.
pub fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "info,nt_sources=debug,nt_web=debug",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging("warn");
        init_logging("debug");
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_directive_for_verbosity() {
        assert_eq!(directive_for(0), "info");
        assert_eq!(directive_for(5), "debug");
    }
}
