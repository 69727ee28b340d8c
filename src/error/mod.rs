// Error types for the audioset batching engine
//
// This module defines custom error types for configuration and data-shape
// problems. Structural errors are detected at construction time, before any
// batch stream is handed to the caller; per-batch errors travel through the
// iterator items as `Result` values.

mod config;
mod data;

pub use config::ConfigError;
pub use data::DataError;

use std::fmt;

/// Umbrella error for engine construction and test-corpus loading
///
/// Constructors can fail for either configuration or data-shape reasons,
/// so they return this enum; leaf components return the specific family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Config(ConfigError),
    Data(DataError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(err) => write!(f, "configuration error: {}", err),
            EngineError::Data(err) => write!(f, "data error: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(err) => Some(err),
            EngineError::Data(err) => Some(err),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

impl From<DataError> for EngineError {
    fn from(err: DataError) -> Self {
        EngineError::Data(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_wraps_both_families() {
        let config: EngineError = ConfigError::BatchSizeZero.into();
        assert!(matches!(config, EngineError::Config(_)));

        let data: EngineError = DataError::EmptyChunk { begin: 3, end: 3 }.into();
        assert!(matches!(data, EngineError::Data(_)));
    }

    #[test]
    fn test_engine_error_display_prefixes_family() {
        let err: EngineError = ConfigError::BatchSizeZero.into();
        assert!(err.to_string().starts_with("configuration error:"));
    }

    #[test]
    fn test_error_propagation() {
        fn may_fail() -> Result<(), EngineError> {
            Err(ConfigError::TestDataNotLoaded.into())
        }

        fn caller() -> Result<(), EngineError> {
            may_fail()?;
            Ok(())
        }

        assert!(caller().is_err());
    }
}
