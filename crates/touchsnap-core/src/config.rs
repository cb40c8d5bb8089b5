//! Snap options ("snap" namespace of the host's option store).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Option loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid tolerance {name}: {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Snap toggles and tolerances.
///
/// Tolerances are lengths in display millimetres; the snapper converts them
/// to model units through the host on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapOptions {
    /// Master switch for the shape scan. Axis alignment to the previous
    /// point still runs when this is off.
    pub snap_enabled: bool,
    pub snap_handle: bool,
    pub snap_near: bool,
    pub snap_perp: bool,
    /// Accept perpendicular feet outside the edge segment.
    pub perp_out: bool,
    pub snap_cross: bool,
    pub snap_grid: bool,
    /// Point-snap tolerance.
    pub snap_point_tol: f64,
    /// Per-axis alignment tolerance.
    pub snap_x_tol: f64,
    /// Nearest-boundary tolerance.
    pub snap_near_tol: f64,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            snap_handle: true,
            snap_near: true,
            snap_perp: true,
            perp_out: false,
            snap_cross: true,
            snap_grid: true,
            snap_point_tol: 4.0,
            snap_x_tol: 1.0,
            snap_near_tol: 3.0,
        }
    }
}

impl SnapOptions {
    /// Parse and validate options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load and validate options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every tolerance is a positive finite length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("snapPointTol", self.snap_point_tol),
            ("snapXTol", self.snap_x_tol),
            ("snapNearTol", self.snap_near_tol),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = SnapOptions::default();
        assert!(options.snap_enabled);
        assert!(!options.perp_out);
        assert!((options.snap_point_tol - 4.0).abs() < f64::EPSILON);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = SnapOptions::from_json_str(r#"{"snapGrid": false, "snapXTol": 2.5}"#).unwrap();
        assert!(!options.snap_grid);
        assert!(options.snap_handle);
        assert!((options.snap_x_tol - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_tolerance() {
        let err = SnapOptions::from_json_str(r#"{"snapNearTol": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTolerance { name: "snapNearTol", .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = SnapOptions::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"perpOut": true}}"#).unwrap();
        let options = SnapOptions::load(file.path()).unwrap();
        assert!(options.perp_out);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SnapOptions::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let json = serde_json::to_string(&SnapOptions::default()).unwrap();
        assert!(json.contains("\"snapPointTol\""));
        assert!(json.contains("\"perpOut\""));
    }
}
