use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Configuration for the diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Wall-clock budget for a single diff. `None` searches until the
    /// script is minimal; once the budget is spent the engine falls back
    /// to coarse delete/insert pairs.
    pub timeout: Option<Duration>,
    /// Whether large inputs are first diffed line by line.
    pub check_lines: bool,
    /// Both texts must be longer than this many chars for line mode.
    pub line_mode_threshold: usize,
    /// Cost of an empty edit operation in terms of edit characters, used
    /// by efficiency cleanup.
    pub edit_cost: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            check_lines: true,
            line_mode_threshold: 100,
            edit_cost: 4,
        }
    }
}

impl DiffConfig {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every diff by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Never take the line-mode path.
    pub fn without_line_mode(mut self) -> Self {
        self.check_lines = false;
        self
    }

    /// Set the cost used by efficiency cleanup.
    pub fn with_edit_cost(mut self, edit_cost: usize) -> Self {
        self.edit_cost = edit_cost;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> DiffResult<()> {
        if self.edit_cost == 0 {
            return Err(DiffError::InvalidConfig(
                "edit_cost must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> DiffResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DiffError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// The instant a diff must finish by, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A deadline that never expires.
    pub const fn never() -> Self {
        Self(None)
    }

    /// A deadline `timeout` from now, or none for `None`.
    pub fn after(timeout: Option<Duration>) -> Self {
        Self(timeout.and_then(|t| Instant::now().checked_add(t)))
    }

    /// Returns `true` once the deadline has passed.
    pub fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DiffConfig::default();
        assert_eq!(config.timeout, None);
        assert!(config.check_lines);
        assert_eq!(config.line_mode_threshold, 100);
        assert_eq!(config.edit_cost, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders_override_fields() {
        let config = DiffConfig::new()
            .with_timeout(Duration::from_millis(250))
            .without_line_mode()
            .with_edit_cost(6);
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
        assert!(!config.check_lines);
        assert_eq!(config.edit_cost, 6);
    }

    #[test]
    fn zero_edit_cost_is_rejected() {
        let err = DiffConfig::new().with_edit_cost(0).validate().unwrap_err();
        assert!(matches!(err, DiffError::InvalidConfig(_)));
    }

    #[test]
    fn json_round_trip() {
        let config = DiffConfig::new().with_timeout(Duration::from_secs(1));
        let json = serde_json::to_string(&config).unwrap();
        let back = DiffConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn json_missing_fields_use_defaults() {
        let config = DiffConfig::from_json(r#"{"edit_cost": 8}"#).unwrap();
        assert_eq!(config.edit_cost, 8);
        assert!(config.check_lines);
        assert_eq!(config.line_mode_threshold, 100);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = DiffConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, DiffError::Serialization(_)));
        let err = DiffConfig::from_json(r#"{"edit_cost": 0}"#).unwrap_err();
        assert!(matches!(err, DiffError::InvalidConfig(_)));
    }

    #[test]
    fn deadlines() {
        assert!(!Deadline::never().expired());
        assert!(!Deadline::after(None).expired());
        assert!(Deadline::after(Some(Duration::ZERO)).expired());
        assert!(!Deadline::after(Some(Duration::from_secs(3600))).expired());
    }
}
