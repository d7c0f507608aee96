//! Utilities: logging setup (level derived from -v / -q, `RUST_LOG` override).
//!
//! Log records go to stderr; stdout is reserved for command output.

use log::LevelFilter;

/// Logging helpers.
pub mod logging {
    use super::*;

    pub fn derive_level(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::Error;
        }
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install the global logger. `RUST_LOG`, when set, takes precedence over
    /// `level`. Calling this more than once is harmless.
    pub fn init_logging(level: LevelFilter) {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(level)
            .target(env_logger::Target::Stderr)
            .format_timestamp_millis();
        if let Ok(spec) = std::env::var("RUST_LOG")
            && !spec.trim().is_empty()
        {
            builder.parse_filters(&spec);
        }
        let _ = builder.try_init();
    }
}

pub use logging::{derive_level, init_logging};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_flags() {
        assert_eq!(derive_level(0, false), LevelFilter::Warn);
        assert_eq!(derive_level(1, false), LevelFilter::Debug);
        assert_eq!(derive_level(5, false), LevelFilter::Trace);
        assert_eq!(derive_level(2, true), LevelFilter::Error);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LevelFilter::Warn);
        init_logging(LevelFilter::Debug);
    }
}
