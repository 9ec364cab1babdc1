//! Top-level configuration objects handed to the engine, and the
//! configuration-schema version handshake.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::agent::AgentConfig;
use crate::error::{Result, SettingsError};

/// Configuration-schema version this crate builds.
///
/// The engine reports the schema version it consumes; callers compare the
/// two with [`check_schema_version`] once at startup, before resolving.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Compare an engine-reported configuration-schema version against
/// [`CONFIG_SCHEMA_VERSION`].
///
/// # Errors
///
/// Returns [`SettingsError::SchemaVersionMismatch`] when the versions
/// differ.
pub fn check_schema_version(reported: u32) -> Result<()> {
    if reported == CONFIG_SCHEMA_VERSION {
        Ok(())
    } else {
        Err(SettingsError::SchemaVersionMismatch {
            reported,
            expected: CONFIG_SCHEMA_VERSION,
        })
    }
}

/// Engine-level simulator configuration.
///
/// Optional fields were absent from the input settings; the engine keeps
/// its own default for those.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulatorConfig {
    /// Scene identifier (path or dataset key).
    pub scene_id: String,
    /// Scene-dataset configuration path.
    pub scene_dataset_config_file: Option<String>,
    /// Physics configuration path.
    pub physics_config_file: Option<String>,
    /// Light setup identifier.
    pub scene_light_setup: Option<String>,
    /// Physics toggle.
    pub enable_physics: Option<bool>,
    /// Frustum-culling toggle.
    pub frustum_culling: bool,
    /// GPU device index. Always 0.
    pub gpu_device_id: u32,
}

/// The complete configuration consumed by the engine constructor: one
/// simulator config plus the agents (exactly one, for this resolver).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Configuration {
    /// Simulator-level configuration.
    pub simulator: SimulatorConfig,
    /// Per-agent configurations.
    pub agents: Vec<AgentConfig>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn matching_schema_version_passes() {
        assert!(check_schema_version(CONFIG_SCHEMA_VERSION).is_ok());
    }

    #[test]
    fn mismatched_schema_version_fails() {
        let result = check_schema_version(CONFIG_SCHEMA_VERSION + 1);
        assert!(matches!(
            result,
            Err(SettingsError::SchemaVersionMismatch {
                reported,
                expected: CONFIG_SCHEMA_VERSION,
            }) if reported == CONFIG_SCHEMA_VERSION + 1
        ));
    }
}
