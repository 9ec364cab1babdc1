//! User-facing settings types and their default tables.
//!
//! Settings are an explicit, enumerated set of recognized options. Keys the
//! resolver does not know are a deserialization error, not a silent no-op,
//! so a typo in a settings file surfaces immediately.

use std::collections::BTreeMap;

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sensor::{SensorSubType, SensorType};

/// Top-level simulation settings.
///
/// `Default` mirrors the stock settings table: a 640×480 frame, one color
/// sensor with empty options, and no scene selected. `scene` is the only
/// field resolution requires; the four engine-path fields are copied into
/// the configuration only when set, so `None` means "leave the engine
/// default".
///
/// # Example
///
/// ```
/// use sim_settings::SimSettings;
///
/// let settings = SimSettings::new("data/apartment_0.glb");
/// assert_eq!(settings.width, 640);
/// assert_eq!(settings.sensors.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimSettings {
    /// Scene identifier handed to the engine. Required by [`resolve`].
    ///
    /// [`resolve`]: crate::resolve
    pub scene: Option<String>,
    /// Scene-dataset configuration path; copied only when set.
    pub scene_dataset_config_file: Option<String>,
    /// Physics configuration path; copied only when set.
    pub physics_config_file: Option<String>,
    /// Light setup identifier; copied only when set.
    pub scene_light_setup: Option<String>,
    /// Physics toggle; copied only when set.
    pub enable_physics: Option<bool>,
    /// Frustum-culling toggle; `false` when unset.
    pub frustum_culling: Option<bool>,
    /// Frame width in pixels, shared by every sensor.
    pub width: u32,
    /// Frame height in pixels, shared by every sensor.
    pub height: u32,
    /// Index of the agent the embedding application drives. Not consumed
    /// by the resolver.
    pub default_agent: u32,
    /// Random seed for the embedding application. Not consumed by the
    /// resolver.
    pub seed: u32,
    /// Per-sensor option overrides, keyed by sensor uuid.
    pub sensors: BTreeMap<String, SensorSettings>,
}

impl Default for SimSettings {
    fn default() -> Self {
        let mut sensors = BTreeMap::new();
        sensors.insert("color_sensor".to_string(), SensorSettings::default());
        Self {
            scene: None,
            scene_dataset_config_file: Some("default".to_string()),
            physics_config_file: Some("data/default.physics_config.json".to_string()),
            scene_light_setup: None,
            enable_physics: None,
            frustum_culling: None,
            width: 640,
            height: 480,
            default_agent: 0,
            seed: 1,
            sensors,
        }
    }
}

impl SimSettings {
    /// Default settings with the given scene selected.
    #[must_use]
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: Some(scene.into()),
            ..Self::default()
        }
    }

    /// Set the shared frame size.
    #[must_use]
    pub fn with_resolution(mut self, height: u32, width: u32) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Add or replace one sensor entry.
    #[must_use]
    pub fn with_sensor(mut self, uuid: impl Into<String>, sensor: SensorSettings) -> Self {
        self.sensors.insert(uuid.into(), sensor);
        self
    }

    /// Remove every sensor entry.
    ///
    /// The default table ships a `color_sensor`; call this first when
    /// building a settings value from scratch.
    #[must_use]
    pub fn without_sensors(mut self) -> Self {
        self.sensors.clear();
        self
    }
}

/// Per-sensor option overrides.
///
/// Every field is optional; unset fields fall back to [`SensorDefaults`]
/// during resolution, independently for every sensor entry. The lens
/// fields (`xi`, `alpha`, `focal_length`, `principal_point_offset`) are
/// consumed only by fisheye sensors.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SensorSettings {
    /// Horizontal field of view in degrees.
    pub hfov: Option<f64>,
    /// Position offset from the agent body, in meters.
    pub position: Option<Vector3<f64>>,
    /// Orientation as rotation angles about the agent axes, in radians.
    pub orientation: Option<Vector3<f64>>,
    /// What the sensor observes.
    pub sensor_type: Option<SensorType>,
    /// Camera projection subtype.
    pub sensor_subtype: Option<SensorSubType>,
    /// Double-sphere xi override.
    pub xi: Option<f64>,
    /// Double-sphere alpha override.
    pub alpha: Option<f64>,
    /// Focal length override, `[fx, fy]` in pixels.
    pub focal_length: Option<[f64; 2]>,
    /// Principal point offset override in pixels.
    pub principal_point_offset: Option<[f64; 2]>,
}

impl SensorSettings {
    /// Set the horizontal field of view.
    #[must_use]
    pub fn with_hfov(mut self, hfov: f64) -> Self {
        self.hfov = Some(hfov);
        self
    }

    /// Set the position offset.
    #[must_use]
    pub fn with_position(mut self, position: Vector3<f64>) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Vector3<f64>) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set the sensor type.
    #[must_use]
    pub fn with_sensor_type(mut self, sensor_type: SensorType) -> Self {
        self.sensor_type = Some(sensor_type);
        self
    }

    /// Set the camera projection subtype.
    #[must_use]
    pub fn with_sensor_subtype(mut self, subtype: SensorSubType) -> Self {
        self.sensor_subtype = Some(subtype);
        self
    }

    /// Merge these overrides over the default template.
    ///
    /// Every common field comes out concrete; the fisheye lens overrides
    /// stay optional because their fallback lives in
    /// [`DoubleSphereParams::default`](crate::DoubleSphereParams::default).
    #[must_use]
    pub fn merged(&self, defaults: &SensorDefaults) -> EffectiveSensorSettings {
        EffectiveSensorSettings {
            hfov: self.hfov.unwrap_or(defaults.hfov),
            position: self.position.unwrap_or(defaults.position),
            orientation: self.orientation.unwrap_or(defaults.orientation),
            sensor_type: self.sensor_type.unwrap_or(defaults.sensor_type),
            sensor_subtype: self.sensor_subtype.unwrap_or(defaults.sensor_subtype),
            xi: self.xi,
            alpha: self.alpha,
            focal_length: self.focal_length,
            principal_point_offset: self.principal_point_offset,
        }
    }
}

/// Process-wide default sensor template.
///
/// The fallback layer of the per-sensor merge: eye height of 1.5 m, level
/// orientation, 90° field of view, color pinhole camera.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorDefaults {
    /// Horizontal field of view in degrees.
    pub hfov: f64,
    /// Position offset from the agent body, in meters.
    pub position: Vector3<f64>,
    /// Orientation as rotation angles about the agent axes, in radians.
    pub orientation: Vector3<f64>,
    /// What the sensor observes.
    pub sensor_type: SensorType,
    /// Camera projection subtype.
    pub sensor_subtype: SensorSubType,
}

impl Default for SensorDefaults {
    fn default() -> Self {
        Self {
            hfov: 90.0,
            position: Vector3::new(0.0, 1.5, 0.0),
            orientation: Vector3::zeros(),
            sensor_type: SensorType::Color,
            sensor_subtype: SensorSubType::Pinhole,
        }
    }
}

/// One sensor's settings after the merge with [`SensorDefaults`].
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSensorSettings {
    /// Horizontal field of view in degrees.
    pub hfov: f64,
    /// Position offset from the agent body, in meters.
    pub position: Vector3<f64>,
    /// Orientation as rotation angles about the agent axes, in radians.
    pub orientation: Vector3<f64>,
    /// What the sensor observes.
    pub sensor_type: SensorType,
    /// Camera projection subtype.
    pub sensor_subtype: SensorSubType,
    /// Double-sphere xi override, if any.
    pub xi: Option<f64>,
    /// Double-sphere alpha override, if any.
    pub alpha: Option<f64>,
    /// Focal length override, if any.
    pub focal_length: Option<[f64; 2]>,
    /// Principal point offset override, if any.
    pub principal_point_offset: Option<[f64; 2]>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_table_matches_stock_settings() {
        let settings = SimSettings::default();
        assert!(settings.scene.is_none());
        assert_eq!(settings.scene_dataset_config_file.as_deref(), Some("default"));
        assert_eq!(
            settings.physics_config_file.as_deref(),
            Some("data/default.physics_config.json")
        );
        assert_eq!((settings.width, settings.height), (640, 480));
        assert_eq!(settings.seed, 1);
        assert_eq!(settings.default_agent, 0);
        assert!(settings.sensors.contains_key("color_sensor"));
    }

    #[test]
    fn empty_overrides_take_every_default() {
        let effective = SensorSettings::default().merged(&SensorDefaults::default());
        assert_relative_eq!(effective.hfov, 90.0);
        assert_relative_eq!(effective.position.y, 1.5);
        assert_relative_eq!(effective.orientation.norm(), 0.0);
        assert_eq!(effective.sensor_type, SensorType::Color);
        assert_eq!(effective.sensor_subtype, SensorSubType::Pinhole);
        assert!(effective.xi.is_none());
        assert!(effective.alpha.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let overrides = SensorSettings::default()
            .with_hfov(75.0)
            .with_sensor_type(SensorType::Depth)
            .with_position(Vector3::new(0.0, 0.8, -0.1));

        let effective = overrides.merged(&SensorDefaults::default());
        assert_relative_eq!(effective.hfov, 75.0);
        assert_eq!(effective.sensor_type, SensorType::Depth);
        assert_relative_eq!(effective.position.z, -0.1);
        // Untouched fields still fall back.
        assert_eq!(effective.sensor_subtype, SensorSubType::Pinhole);
        assert_relative_eq!(effective.orientation.norm(), 0.0);
    }

    #[test]
    fn merge_is_independent_per_sensor() {
        let defaults = SensorDefaults::default();
        let wide = SensorSettings::default().with_hfov(120.0).merged(&defaults);
        let stock = SensorSettings::default().merged(&defaults);
        assert_relative_eq!(wide.hfov, 120.0);
        assert_relative_eq!(stock.hfov, 90.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_key_is_rejected() {
        let err = serde_json::from_str::<SimSettings>(r#"{"scene": "x", "widht": 320}"#);
        assert!(err.is_err());

        let err = serde_json::from_str::<SensorSettings>(r#"{"hfvo": 75.0}"#);
        assert!(err.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_document_fills_in_defaults() {
        let settings: SimSettings =
            serde_json::from_str(r#"{"scene": "data/apartment_0.glb", "width": 320}"#)
                .expect("deserialize");
        assert_eq!(settings.scene.as_deref(), Some("data/apartment_0.glb"));
        assert_eq!(settings.width, 320);
        assert_eq!(settings.height, 480);
        assert!(settings.sensors.contains_key("color_sensor"));
    }
}
