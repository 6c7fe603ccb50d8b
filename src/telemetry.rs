//! Logging initialization.
//!
//! Logs go to stderr so they never mix with command output on stdout.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for this crate when `RUST_LOG` is unset
    pub default_level: Level,
    /// Whether to include the target (module path)
    pub include_target: bool,
    /// Whether to use ANSI colors
    pub ansi_colors: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            include_target: false,
            ansi_colors: true,
        }
    }
}

impl LogConfig {
    /// Config for `-v` repeated `verbosity` times.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let default_level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            default_level,
            include_target: verbosity >= 2,
            ..Self::default()
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn directive(&self) -> String {
        format!("git_ssb={}", self.default_level.as_str().to_lowercase())
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directive()))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.default_level, Level::WARN);
        assert_eq!(config.directive(), "git_ssb=warn");
    }

    #[test]
    fn test_from_verbosity() {
        assert_eq!(LogConfig::from_verbosity(1).default_level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(2).directive(), "git_ssb=debug");
        assert!(LogConfig::from_verbosity(2).include_target);
        assert_eq!(LogConfig::from_verbosity(9).default_level, Level::TRACE);
    }
}
