//! Output sensor descriptor types.
//!
//! A [`SensorSpec`] fully specifies one virtual camera's placement and
//! imaging parameters. Specs are plain values: the engine consumes them by
//! ownership and this crate never reads them back.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a sensor observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorType {
    /// RGBA color observations.
    #[default]
    Color,
    /// Per-pixel depth observations.
    Depth,
    /// Per-pixel semantic-id observations.
    Semantic,
}

impl SensorType {
    /// Number of image channels the engine produces for this sensor type.
    ///
    /// Color observations are RGBA; everything else is single-channel.
    #[must_use]
    pub const fn channels(self) -> u32 {
        match self {
            Self::Color => 4,
            Self::Depth | Self::Semantic => 1,
        }
    }
}

/// Camera projection subtype for non-wide-angle sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorSubType {
    /// Perspective pinhole projection.
    #[default]
    Pinhole,
    /// Orthographic projection.
    Orthographic,
}

/// Image frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resolution {
    /// Frame height in pixels.
    pub height: u32,
    /// Frame width in pixels.
    pub width: u32,
}

impl Resolution {
    /// Create a resolution from height and width.
    #[must_use]
    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Total number of pixels in one frame.
    #[must_use]
    pub fn pixel_count(self) -> u64 {
        u64::from(self.height) * u64::from(self.width)
    }
}

/// Double-sphere lens parameters for fisheye sensors.
///
/// Two-parameter (xi, alpha) approximate projection model for wide-angle
/// lenses. Defaults match the "GoPro" lens fit from Table 3 of Usenko,
/// Demmel and Cremers, *The Double Sphere Camera Model* (3DV 2018).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoubleSphereParams {
    /// First projection parameter (sphere offset).
    pub xi: f64,
    /// Second projection parameter, in `[0, 1]`.
    pub alpha: f64,
    /// Focal length in pixels, `[fx, fy]`.
    pub focal_length: [f64; 2],
    /// Principal point offset in pixels; `None` means the image center.
    pub principal_point_offset: Option<[f64; 2]>,
}

impl Default for DoubleSphereParams {
    fn default() -> Self {
        Self {
            xi: -0.27,
            alpha: 0.57,
            focal_length: [364.84, 364.86],
            principal_point_offset: None,
        }
    }
}

/// Projection model of one sensor, with its kind-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProjectionModel {
    /// Standard camera projection.
    Camera {
        /// Horizontal field of view in degrees.
        hfov: f64,
        /// Pinhole or orthographic projection.
        subtype: SensorSubType,
    },
    /// Wide-angle fisheye lens (double-sphere model).
    Fisheye(DoubleSphereParams),
    /// Full-panorama equirectangular projection.
    Equirectangular,
}

impl ProjectionModel {
    /// Horizontal field of view, if this projection has one.
    #[must_use]
    pub fn hfov(&self) -> Option<f64> {
        match self {
            Self::Camera { hfov, .. } => Some(*hfov),
            Self::Fisheye(_) | Self::Equirectangular => None,
        }
    }

    /// Double-sphere lens parameters, if this is a fisheye projection.
    #[must_use]
    pub fn double_sphere(&self) -> Option<&DoubleSphereParams> {
        match self {
            Self::Fisheye(params) => Some(params),
            Self::Camera { .. } | Self::Equirectangular => None,
        }
    }
}

/// Fully resolved descriptor for one sensor attached to an agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSpec {
    /// Unique sensor identifier.
    pub uuid: String,
    /// What the sensor observes.
    pub sensor_type: SensorType,
    /// Frame size, shared by every sensor of one agent.
    pub resolution: Resolution,
    /// Position offset from the agent body, in meters.
    pub position: Vector3<f64>,
    /// Orientation as rotation angles about the agent axes, in radians.
    pub orientation: Vector3<f64>,
    /// Number of image channels (derived from the sensor type).
    pub channels: u32,
    /// Projection model and its kind-specific parameters.
    pub projection: ProjectionModel,
}

impl SensorSpec {
    /// Whether this spec uses the fisheye projection.
    #[must_use]
    pub fn is_fisheye(&self) -> bool {
        matches!(self.projection, ProjectionModel::Fisheye(_))
    }

    /// Whether this spec uses the equirectangular projection.
    #[must_use]
    pub fn is_equirectangular(&self) -> bool {
        matches!(self.projection, ProjectionModel::Equirectangular)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn channels_by_sensor_type() {
        assert_eq!(SensorType::Color.channels(), 4);
        assert_eq!(SensorType::Depth.channels(), 1);
        assert_eq!(SensorType::Semantic.channels(), 1);
    }

    #[test]
    fn resolution_pixel_count() {
        assert_eq!(Resolution::new(480, 640).pixel_count(), 480 * 640);
    }

    #[test]
    fn double_sphere_defaults() {
        use approx::assert_relative_eq;

        let params = DoubleSphereParams::default();
        assert_relative_eq!(params.xi, -0.27);
        assert_relative_eq!(params.alpha, 0.57);
        assert_relative_eq!(params.focal_length[0], 364.84);
        assert_relative_eq!(params.focal_length[1], 364.86);
        assert!(params.principal_point_offset.is_none());
    }

    #[test]
    fn projection_accessors() {
        let camera = ProjectionModel::Camera {
            hfov: 90.0,
            subtype: SensorSubType::Pinhole,
        };
        assert_eq!(camera.hfov(), Some(90.0));
        assert!(camera.double_sphere().is_none());

        let fisheye = ProjectionModel::Fisheye(DoubleSphereParams::default());
        assert!(fisheye.hfov().is_none());
        assert!(fisheye.double_sphere().is_some());

        assert!(ProjectionModel::Equirectangular.hfov().is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn spec_serialization_round_trip() {
        let spec = SensorSpec {
            uuid: "color_sensor".to_string(),
            sensor_type: SensorType::Color,
            resolution: Resolution::new(480, 640),
            position: Vector3::new(0.0, 1.5, 0.0),
            orientation: Vector3::zeros(),
            channels: 4,
            projection: ProjectionModel::Camera {
                hfov: 90.0,
                subtype: SensorSubType::Pinhole,
            },
        };

        let json = serde_json::to_string(&spec).expect("serialize");
        let back: SensorSpec = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, spec);
    }
}
