// crates/orders/src/telemetry.rs
//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Parse a filter directive, falling back to `info` when it is malformed.
pub fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter {directive:?} ({e}), using \"info\"");
        EnvFilter::new("info")
    })
}

/// Install the global fmt subscriber. Call once, from the binary.
pub fn init(directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_directive_is_kept() {
        let filter = env_filter("warn,async_orders_server=debug");
        assert!(filter.to_string().contains("async_orders_server=debug"));
    }

    #[test]
    fn test_malformed_directive_falls_back() {
        assert!(EnvFilter::try_new("async_orders_server=bogus").is_err());
        let filter = env_filter("async_orders_server=bogus");
        assert_eq!(filter.to_string(), "info");
    }
}
