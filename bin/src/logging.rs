//! Logging setup.
//!
//! Library crates emit `tracing` events; the binary decides where they go.
//! Output is written to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Library modules capped at `warn` unless `RUST_LOG` says otherwise.
pub(crate) const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

/// Filter directives for a base level plus noise suppression.
pub(crate) fn directives(log_level: &str) -> String {
    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push(',');
        directives.push_str(module);
        directives.push_str("=warn");
    }
    directives
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. `log_format` is `json` for
/// structured output; anything else selects the human-readable format.
pub(crate) fn init_logging(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(log_level)));
    let subscriber = tracing_subscriber::registry().with(filter);

    if log_format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(std::io::stderr);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(true)
            .with_writer(std::io::stderr);
        let _ = subscriber.with(fmt_layer).try_init();
    }

    tracing::debug!(log_level, log_format, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_cap_noisy_modules() {
        let directives = directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("reqwest=warn"));
        assert_eq!(directives.matches("=warn").count(), NOISY_MODULES.len());
        assert!(directives.parse::<EnvFilter>().is_ok());
    }
}
