//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default execution-step ceiling.
pub const DEFAULT_MAX_EXECUTION_STEPS: u32 = 100;

/// Tunables for [`crate::Engine`]. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Node dispatches allowed per run before the run is reported as an
    /// infinite loop. Independent of a level's `maxSteps`, which counts
    /// actions only.
    pub max_execution_steps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_execution_steps: DEFAULT_MAX_EXECUTION_STEPS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_execution_steps == 0 {
            return Err(ConfigError::ZeroExecutionCeiling);
        }
        Ok(())
    }
}
