use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "operation_name");
/// // Or with additional fields:
/// trace_time!(start, "operation_name", components = count);
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Crates whose events pass the filter
const TARGETS: [&str; 2] = ["typegraph", "typegraph_core"];

/// Initialize structured logging based on CLI arguments
///
/// `TYPEGRAPH_LOG`, then `RUST_LOG`, override the level chosen on the
/// command line. Events go to stderr so stdout stays machine-readable.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env("TYPEGRAPH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, log_level)));
    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);
        registry.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(false);
        registry.with(layer).try_init()?;
    }
    Ok(())
}

/// Filter directive for the command-line flags
///
/// A bare level applies to both crates; anything containing `=` is used as is.
fn filter_directive(verbose: bool, log_level: Option<&str>) -> String {
    let level = match log_level {
        Some(level) if level.contains('=') => return level.to_string(),
        Some(level) => level,
        None if verbose => "debug",
        None => "warn",
    };
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_defaults() {
        assert_eq!(
            filter_directive(false, None),
            "typegraph=warn,typegraph_core=warn"
        );
        assert_eq!(
            filter_directive(true, None),
            "typegraph=debug,typegraph_core=debug"
        );
    }

    #[test]
    fn test_filter_directive_level_wins_over_verbose() {
        assert_eq!(
            filter_directive(true, Some("trace")),
            "typegraph=trace,typegraph_core=trace"
        );
        assert_eq!(
            filter_directive(false, Some("typegraph_core=debug")),
            "typegraph_core=debug"
        );
    }

    #[test]
    fn test_trace_time_macro_compiles() {
        let start = std::time::Instant::now();
        trace_time!(start, "noop");
        trace_time!(start, "noop_with_fields", count = 3);
    }
}
