use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, Result};

/// Maps the registry's numeric log levels onto a tracing filter directive.
/// Anything else is passed through as a directive.
pub fn level_directive(level: Option<&str>) -> String {
    match level.map(str::trim) {
        None | Some("") => "info".to_string(),
        Some("0") => "error".to_string(),
        Some("1") => "info".to_string(),
        Some("2") => "debug".to_string(),
        Some(other) => other.to_ascii_lowercase(),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init(level: Option<&str>, file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(level)));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
                .try_init()
        }
        None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    installed.map_err(|e| AppError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::level_directive;

    #[test]
    fn numeric_levels_map_to_directives() {
        assert_eq!(level_directive(Some("0")), "error");
        assert_eq!(level_directive(Some("1")), "info");
        assert_eq!(level_directive(Some("2")), "debug");
        assert_eq!(level_directive(None), "info");
        assert_eq!(level_directive(Some("WARN")), "warn");
        assert_eq!(level_directive(Some("registry_harness=trace")), "registry_harness=trace");
    }
}
