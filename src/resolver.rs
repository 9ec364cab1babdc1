//! Settings resolution: the translation from [`SimSettings`] to the
//! engine [`Configuration`].

use nalgebra::Vector3;

use crate::agent::AgentConfig;
use crate::config::{Configuration, SimulatorConfig};
use crate::error::{Result, SettingsError};
use crate::sensor::{DoubleSphereParams, ProjectionModel, Resolution, SensorSpec};
use crate::settings::{EffectiveSensorSettings, SensorDefaults, SensorSettings, SimSettings};

/// Resolve user-facing settings into the configuration objects consumed by
/// the engine constructor.
///
/// Pure and deterministic: the same input always produces the same output,
/// and nothing is read or written besides the argument. Always produces
/// exactly one agent.
///
/// Sensor kind is inferred from the sensor uuid: a uuid containing
/// `"fisheye"` produces a fisheye spec, one containing `"equirect"` an
/// equirectangular spec, anything else a camera spec. There is no typed
/// "shape" field; the substring is the contract.
///
/// # Errors
///
/// - [`SettingsError::MissingField`] when `scene` is unset.
/// - [`SettingsError::InvalidSetting`] when the shared frame size is zero.
/// - [`SettingsError::InvalidSensorSetting`] when a per-sensor value is
///   outside its domain after defaulting.
pub fn resolve(settings: &SimSettings) -> Result<Configuration> {
    if settings.width == 0 {
        return Err(SettingsError::invalid_setting("width", "must be nonzero"));
    }
    if settings.height == 0 {
        return Err(SettingsError::invalid_setting("height", "must be nonzero"));
    }

    let scene_id = settings
        .scene
        .clone()
        .ok_or(SettingsError::MissingField("scene"))?;

    let simulator = SimulatorConfig {
        scene_id,
        scene_dataset_config_file: settings.scene_dataset_config_file.clone(),
        physics_config_file: settings.physics_config_file.clone(),
        scene_light_setup: settings.scene_light_setup.clone(),
        enable_physics: settings.enable_physics,
        frustum_culling: settings.frustum_culling.unwrap_or(false),
        // The engine supports device selection, but this resolver always
        // targets the first GPU.
        gpu_device_id: 0,
    };

    let resolution = Resolution::new(settings.height, settings.width);
    let defaults = SensorDefaults::default();

    let mut sensor_specifications = Vec::with_capacity(settings.sensors.len());
    for (uuid, overrides) in &settings.sensors {
        sensor_specifications.push(resolve_sensor(uuid, overrides, &defaults, resolution)?);
    }

    Ok(Configuration {
        simulator,
        agents: vec![AgentConfig::new(sensor_specifications)],
    })
}

/// Build one sensor spec from its overrides merged over the defaults.
fn resolve_sensor(
    uuid: &str,
    overrides: &SensorSettings,
    defaults: &SensorDefaults,
    resolution: Resolution,
) -> Result<SensorSpec> {
    let effective = overrides.merged(defaults);

    check_finite_vec(uuid, "position", &effective.position)?;
    check_finite_vec(uuid, "orientation", &effective.orientation)?;

    let is_fisheye = uuid.contains("fisheye");
    let is_equirect = uuid.contains("equirect");
    if is_fisheye && is_equirect {
        tracing::warn!(
            "sensor '{uuid}' matches both the fisheye and equirect naming conventions; \
             building a fisheye spec"
        );
    }

    let projection = if is_fisheye {
        warn_ignored_hfov(uuid, overrides, "fisheye");
        ProjectionModel::Fisheye(resolve_double_sphere(uuid, &effective)?)
    } else if is_equirect {
        warn_ignored_hfov(uuid, overrides, "equirectangular");
        warn_ignored_lens(uuid, overrides);
        ProjectionModel::Equirectangular
    } else {
        warn_ignored_lens(uuid, overrides);
        if !effective.hfov.is_finite() || effective.hfov <= 0.0 || effective.hfov >= 180.0 {
            return Err(SettingsError::invalid_sensor_setting(
                uuid,
                "hfov",
                format!("must be in (0, 180) degrees, got {}", effective.hfov),
            ));
        }
        ProjectionModel::Camera {
            hfov: effective.hfov,
            subtype: effective.sensor_subtype,
        }
    };

    Ok(SensorSpec {
        uuid: uuid.to_string(),
        sensor_type: effective.sensor_type,
        resolution,
        position: effective.position,
        orientation: effective.orientation,
        channels: effective.sensor_type.channels(),
        projection,
    })
}

/// Apply caller lens overrides on top of the stock double-sphere
/// constants.
fn resolve_double_sphere(
    uuid: &str,
    effective: &EffectiveSensorSettings,
) -> Result<DoubleSphereParams> {
    let mut params = DoubleSphereParams::default();

    if let Some(xi) = effective.xi {
        if !xi.is_finite() {
            return Err(SettingsError::invalid_sensor_setting(
                uuid,
                "xi",
                "must be finite",
            ));
        }
        params.xi = xi;
    }
    if let Some(alpha) = effective.alpha {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(SettingsError::invalid_sensor_setting(
                uuid,
                "alpha",
                format!("must be in [0, 1], got {alpha}"),
            ));
        }
        params.alpha = alpha;
    }
    if let Some(focal_length) = effective.focal_length {
        if focal_length.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(SettingsError::invalid_sensor_setting(
                uuid,
                "focal_length",
                format!("components must be positive and finite, got {focal_length:?}"),
            ));
        }
        params.focal_length = focal_length;
    }
    if let Some(offset) = effective.principal_point_offset {
        if offset.iter().any(|c| !c.is_finite()) {
            return Err(SettingsError::invalid_sensor_setting(
                uuid,
                "principal_point_offset",
                "components must be finite",
            ));
        }
        params.principal_point_offset = Some(offset);
    }

    Ok(params)
}

fn check_finite_vec(uuid: &str, field: &'static str, value: &Vector3<f64>) -> Result<()> {
    if value.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SettingsError::invalid_sensor_setting(
            uuid,
            field,
            "components must be finite",
        ))
    }
}

fn warn_ignored_hfov(uuid: &str, overrides: &SensorSettings, kind: &str) {
    if overrides.hfov.is_some() {
        tracing::warn!("sensor '{uuid}': hfov is ignored by {kind} sensors");
    }
}

fn warn_ignored_lens(uuid: &str, overrides: &SensorSettings) {
    if overrides.xi.is_some()
        || overrides.alpha.is_some()
        || overrides.focal_length.is_some()
        || overrides.principal_point_offset.is_some()
    {
        tracing::warn!(
            "sensor '{uuid}': double-sphere lens settings are only used by fisheye sensors"
        );
    }
}
