//! Configuration error types.
//!
//! The simulation itself never fails; only loading a run configuration can.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The settings file is not valid JSON for [`crate::Settings`].
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The settings could not be encoded as JSON for saving.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A value parsed but is outside the range the simulation accepts.
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "settings file {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse settings {}: {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(f, "failed to serialize settings {}: {source}", path.display())
            }
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } | Self::Serialize { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<u8>("not json").unwrap_err()
    }

    #[test]
    fn test_read_and_write_failures_read_differently() {
        let parse = SettingsError::Parse {
            path: PathBuf::from("run.json"),
            source: json_error(),
        };
        let serialize = SettingsError::Serialize {
            path: PathBuf::from("run.json"),
            source: json_error(),
        };
        assert!(parse.to_string().starts_with("failed to parse settings run.json"));
        assert!(
            serialize
                .to_string()
                .starts_with("failed to serialize settings run.json")
        );
        assert!(std::error::Error::source(&serialize).is_some());
    }
}
