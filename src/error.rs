//! Error types for the clock face core and its configuration layer.
//!
//! The core errors are defensive: a correct time source only ever yields
//! in-range fields, so hitting one of them means a caller bug. They are
//! returned rather than clamped so the bug surfaces.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which field of a time-of-day value was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeComponent {
    Hours,
    Minutes,
    Seconds,
}

impl fmt::Display for TimeComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeComponent::Hours => "hours",
            TimeComponent::Minutes => "minutes",
            TimeComponent::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("invalid digit {digit} (expected 0-9)")]
    InvalidDigit { digit: u32 },
    #[error("invalid {component} value {value} (expected 0-{max})")]
    InvalidTimeComponent {
        component: TimeComponent,
        value: u32,
        max: u32,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
