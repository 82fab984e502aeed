//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use pulseboard_core::error::{PulseError, Result};

pub use schema::{AnalyticsSection, AppConfig, ServerSection};

/// Default config path when none is given on the command line.
pub const DEFAULT_PATH: &str = "pulseboard.yaml";

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PulseError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| PulseError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path`, falling back to built-in defaults only when the default
/// path does not exist. An explicit path that is missing is an error.
pub fn load_or_default(path: Option<&str>) -> Result<AppConfig> {
    match path {
        Some(p) => load_from_file(p),
        None => match fs::read_to_string(DEFAULT_PATH) {
            Ok(s) => load_from_str(&s),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = DEFAULT_PATH, "config file not found, using defaults");
                Ok(AppConfig::default())
            }
            Err(e) => Err(PulseError::Internal(format!(
                "read config failed ({DEFAULT_PATH}): {e}"
            ))),
        },
    }
}
