use seam_types::Edit;

use crate::cleanup;
use crate::config::{Deadline, DiffConfig};
use crate::engine::Engine;
use crate::error::DiffResult;

/// Computes edit scripts between texts under a [`DiffConfig`].
///
/// A `Differ` holds no state beyond its configuration and can be shared
/// freely between threads.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    config: DiffConfig,
}

impl Differ {
    /// A differ with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A differ with a validated configuration.
    pub fn with_config(config: DiffConfig) -> DiffResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compute the edit script turning `left` into `right`.
    ///
    /// The script reproduces `left` from its `Equal` and `Delete` edits
    /// and `right` from its `Equal` and `Insert` edits. No two neighbouring
    /// edits share an operation and no edit is empty, except that two
    /// identical texts always produce exactly one `Equal` edit, even when
    /// both are empty.
    pub fn diff(&self, left: &str, right: &str) -> Vec<Edit> {
        if left == right {
            return vec![Edit::equal(left)];
        }
        let deadline = Deadline::after(self.config.timeout);
        Engine::new(&self.config, deadline).run(left, right, self.config.check_lines)
    }

    /// Apply [`cleanup::cleanup_semantic`] to a script.
    pub fn cleanup_semantic(&self, edits: &mut Vec<Edit>) {
        cleanup::cleanup_semantic(edits);
    }

    /// Apply [`cleanup::cleanup_efficiency`] with the configured edit cost.
    pub fn cleanup_efficiency(&self, edits: &mut Vec<Edit>) {
        cleanup::cleanup_efficiency(edits, self.config.edit_cost);
    }
}
