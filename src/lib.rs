//! Settings resolver for an embodied 3-D simulation engine.
//!
//! This crate translates a flat set of user-facing simulation settings
//! (scene path, frame size, per-sensor options) into the structured
//! configuration objects the engine constructor consumes. It performs no
//! simulation, rendering, physics, or I/O itself; the output is plain
//! descriptor values handed to the engine by ownership.
//!
//! # Resolution
//!
//! [`resolve`] merges each sensor entry with the [`SensorDefaults`]
//! template (explicit values win, field by field), derives the channel
//! count from the sensor type, picks the projection model from the sensor
//! uuid (`"fisheye"` / `"equirect"` substrings, camera otherwise), and
//! assembles one agent carrying every sensor plus the fixed
//! `move_forward` / `turn_left` / `turn_right` action table.
//!
//! # Example
//!
//! ```
//! use sim_settings::{resolve, SensorSettings, SimSettings};
//!
//! let settings = SimSettings::new("data/apartment_0.glb")
//!     .with_resolution(480, 640)
//!     .with_sensor("fisheye_sensor", SensorSettings::default());
//!
//! let config = resolve(&settings).expect("settings are valid");
//! assert_eq!(config.agents.len(), 1);
//! // The stock color_sensor plus the fisheye.
//! assert_eq!(config.agents[0].sensor_specifications.len(), 2);
//! ```
//!
//! # Engine compatibility
//!
//! The engine reports the configuration-schema version it consumes; run
//! [`check_schema_version`] once at startup before resolving. A mismatch
//! is a distinct [`SettingsError::SchemaVersionMismatch`] error rather
//! than a missing-field failure deep inside the engine.
//!
//! # Errors
//!
//! Resolution either succeeds or fails synchronously with a
//! [`SettingsError`] value; there are no retries, no partial outputs and
//! no logging on the error path. `tracing` warnings are emitted only for
//! accepted-but-suspicious input, such as lens settings on a sensor whose
//! uuid does not select the fisheye model.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod agent;
mod config;
mod error;
mod resolver;
mod sensor;
mod settings;

pub use agent::{
    default_action_space, ActuationSpec, AgentConfig, MOVE_FORWARD_AMOUNT, TURN_AMOUNT_DEG,
};
pub use config::{check_schema_version, Configuration, SimulatorConfig, CONFIG_SCHEMA_VERSION};
pub use error::{Result, SettingsError};
pub use resolver::resolve;
pub use sensor::{
    DoubleSphereParams, ProjectionModel, Resolution, SensorSpec, SensorSubType, SensorType,
};
pub use settings::{EffectiveSensorSettings, SensorDefaults, SensorSettings, SimSettings};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    /// End-to-end: a realistic three-sensor rig resolved in one call.
    #[test]
    fn three_sensor_rig() {
        let settings = SimSettings::new("data/apartment_0.glb")
            .with_resolution(720, 1280)
            .with_sensor(
                "depth_sensor",
                SensorSettings::default().with_sensor_type(SensorType::Depth),
            )
            .with_sensor("equirect_sensor", SensorSettings::default());

        let config = resolve(&settings).expect("resolve");

        assert_eq!(config.simulator.scene_id, "data/apartment_0.glb");
        assert_eq!(config.agents.len(), 1);

        let agent = &config.agents[0];
        assert_eq!(agent.sensor_specifications.len(), 3);
        assert_eq!(agent.action_space.len(), 3);

        for spec in &agent.sensor_specifications {
            assert_eq!(spec.resolution, Resolution::new(720, 1280));
        }
    }

    #[test]
    fn startup_version_handshake() {
        check_schema_version(CONFIG_SCHEMA_VERSION).expect("matching version");
        assert!(matches!(
            check_schema_version(99),
            Err(SettingsError::SchemaVersionMismatch { reported: 99, .. })
        ));
    }

    /// Settings documents parsed from a config file resolve the same as
    /// settings built in code.
    #[cfg(feature = "serde")]
    #[test]
    fn settings_from_json_document() {
        let doc = r#"
            {
                "scene": "data/office_2.glb",
                "height": 480,
                "width": 640,
                "enable_physics": true,
                "sensors": {
                    "color_sensor": { "hfov": 75.0 },
                    "fisheye_sensor": { "alpha": 0.6 }
                }
            }
        "#;

        let settings: SimSettings = serde_json::from_str(doc).expect("deserialize");
        let config = resolve(&settings).expect("resolve");

        assert_eq!(config.simulator.enable_physics, Some(true));

        let specs = &config.agents[0].sensor_specifications;
        assert_eq!(specs.len(), 2);

        let color = specs.iter().find(|s| s.uuid == "color_sensor").expect("color");
        assert_eq!(color.projection.hfov(), Some(75.0));

        let fisheye = specs.iter().find(|s| s.uuid == "fisheye_sensor").expect("fisheye");
        let params = fisheye.projection.double_sphere().expect("double sphere");
        assert!((params.alpha - 0.6).abs() < 1e-12);
    }
}
