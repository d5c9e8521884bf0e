//! # Configuration
//!
//! Literal fields can be overridden at startup without touching the descriptor
//! tables. The overrides are read from the `BEAN_RECIPE_OVERRIDES` environment
//! variable as JSON, keyed by bean name and then by field name:
//!
//! ```bash
//! BEAN_RECIPE_OVERRIDES='{"settings": {"port": "9090"}}' cargo run
//! ```

use crate::error::AppError;
use bean_framework::LiteralOverrides;
use std::env::{self, VarError};
use tracing::{debug, info, warn};

/// The environment variable holding the JSON overrides.
pub const OVERRIDES_VAR: &str = "BEAN_RECIPE_OVERRIDES";

/// Reads the overrides from [`OVERRIDES_VAR`].
///
/// An unset or blank variable yields none. A value that is not UTF-8 is logged
/// and ignored.
pub fn load_overrides() -> Result<LiteralOverrides, AppError> {
    overrides_from(env::var(OVERRIDES_VAR))
}

fn overrides_from(value: Result<String, VarError>) -> Result<LiteralOverrides, AppError> {
    match value {
        Ok(raw) => parse_overrides(&raw),
        Err(VarError::NotPresent) => {
            debug!(var = OVERRIDES_VAR, "No overrides set");
            Ok(LiteralOverrides::default())
        }
        Err(VarError::NotUnicode(_)) => {
            warn!(var = OVERRIDES_VAR, "Overrides are not valid UTF-8, ignoring them");
            Ok(LiteralOverrides::default())
        }
    }
}

pub fn parse_overrides(raw: &str) -> Result<LiteralOverrides, AppError> {
    if raw.trim().is_empty() {
        return Ok(LiteralOverrides::default());
    }
    let overrides: LiteralOverrides =
        serde_json::from_str(raw).map_err(|source| AppError::Overrides {
            var: OVERRIDES_VAR,
            source,
        })?;
    info!(var = OVERRIDES_VAR, count = overrides.len(), "Loaded literal overrides");
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_means_no_overrides() {
        assert!(parse_overrides("").unwrap().is_empty());
        assert!(parse_overrides("   ").unwrap().is_empty());
    }

    #[test]
    fn overrides_are_keyed_by_bean_and_field() {
        let overrides = parse_overrides(r#"{"settings": {"port": "9090"}}"#).unwrap();
        assert_eq!(overrides.get("settings", "port"), Some("9090"));
        assert_eq!(overrides.get("settings", "verbose"), None);
    }

    #[test]
    fn unset_or_non_unicode_variable_means_no_overrides() {
        assert!(overrides_from(Err(VarError::NotPresent)).unwrap().is_empty());
        let invalid = std::ffi::OsString::from("settings");
        assert!(overrides_from(Err(VarError::NotUnicode(invalid))).unwrap().is_empty());
        let set = overrides_from(Ok(r#"{"settings": {"port": "1"}}"#.to_owned())).unwrap();
        assert_eq!(set.get("settings", "port"), Some("1"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = parse_overrides("{not json").unwrap_err();
        assert!(matches!(error, AppError::Overrides { var: OVERRIDES_VAR, .. }));
    }
}
