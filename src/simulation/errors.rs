use bevy::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrowdNavError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize TOML: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // Scenario-related errors
    #[error("Scenario file not found at path: {path}")]
    ScenarioFileNotFound { path: PathBuf },

    #[error("Scenario validation failed: {reason}")]
    ScenarioValidationFailed { reason: String },

    #[error("Agent {index} starts inside an obstacle at {position:?}")]
    BlockedSpawnPosition { index: usize, position: Vec2 },

    // Command line errors
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl From<validator::ValidationErrors> for CrowdNavError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CrowdNavError::ScenarioValidationFailed {
            reason: errors.to_string(),
        }
    }
}

/// Result type alias for all fallible operations
pub type CrowdNavResult<T> = Result<T, CrowdNavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crowdnav_error_display() {
        let err = CrowdNavError::BlockedSpawnPosition {
            index: 2,
            position: Vec2::new(10.0, 20.0),
        };
        assert!(err.to_string().contains("starts inside an obstacle"));

        let err = CrowdNavError::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Failed to get config directory");

        let err = CrowdNavError::ScenarioFileNotFound {
            path: PathBuf::from("missing.toml"),
        };
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_toml_errors_convert() {
        let parse: Result<toml::Value, _> = toml::from_str("not = [valid");
        let err: CrowdNavError = parse.unwrap_err().into();
        assert!(matches!(err, CrowdNavError::DeserializationFailed(_)));
    }
}
