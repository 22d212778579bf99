//! Timing configuration loaded from a JSON file.
//!
//! Every field is optional; missing ones keep their defaults.
//!
//! ```json
//! { "das_ms": 150, "arr_ms": 20 }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use crate::types::GameConfig;

/// Longest interval accepted for any timer.
pub const MAX_INTERVAL_MS: u32 = 60_000;

/// Parse and validate a config document.
pub fn parse_config(text: &str) -> Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(text).context("invalid config JSON")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path`, or return the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in config {}", path.display()))
}

pub fn validate(config: &GameConfig) -> Result<()> {
    ensure!(config.drop_interval_ms > 0, "drop_interval_ms must be positive");
    ensure!(
        config.soft_drop_interval_ms > 0,
        "soft_drop_interval_ms must be positive"
    );
    for (name, value) in [
        ("drop_interval_ms", config.drop_interval_ms),
        ("lock_delay_ms", config.lock_delay_ms),
        ("das_ms", config.das_ms),
        ("arr_ms", config.arr_ms),
        ("soft_drop_interval_ms", config.soft_drop_interval_ms),
    ] {
        ensure!(
            value <= MAX_INTERVAL_MS,
            "{name} = {value} exceeds {MAX_INTERVAL_MS}ms"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(parse_config("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = parse_config(r#"{ "das_ms": 150, "arr_ms": 0 }"#).unwrap();
        assert_eq!(config.das_ms, 150);
        assert_eq!(config.arr_ms, 0);
        assert_eq!(config.lock_delay_ms, GameConfig::default().lock_delay_ms);
    }

    #[test]
    fn rejects_zero_gravity_interval() {
        let err = parse_config(r#"{ "drop_interval_ms": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("drop_interval_ms"));
    }

    #[test]
    fn rejects_huge_values() {
        assert!(parse_config(r#"{ "lock_delay_ms": 600000 }"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_config("{ das_ms: 1 ").is_err());
        assert!(parse_config(r#"{ "das_ms": -5 }"#).is_err());
    }

    #[test]
    fn missing_path_means_defaults() {
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
        assert!(load_config(Some(Path::new("/nonexistent/blockfall.json"))).is_err());
    }
}
