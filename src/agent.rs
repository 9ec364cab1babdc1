//! Agent configuration: attached sensors plus the action vocabulary.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sensor::SensorSpec;

/// Translation amount of the `move_forward` action, in meters.
pub const MOVE_FORWARD_AMOUNT: f64 = 0.25;

/// Rotation amount of the `turn_left` / `turn_right` actions, in degrees.
pub const TURN_AMOUNT_DEG: f64 = 10.0;

/// Actuation parameters of one agent action.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActuationSpec {
    /// Movement amount in meters, or turn angle in degrees, depending on
    /// the action.
    pub amount: f64,
}

impl ActuationSpec {
    /// Create an actuation spec with the given amount.
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self { amount }
    }
}

/// The fixed action table every resolved agent carries.
///
/// Not derived from settings: `move_forward` (0.25 m), `turn_left` and
/// `turn_right` (10° each).
#[must_use]
pub fn default_action_space() -> BTreeMap<String, ActuationSpec> {
    BTreeMap::from([
        (
            "move_forward".to_string(),
            ActuationSpec::new(MOVE_FORWARD_AMOUNT),
        ),
        ("turn_left".to_string(), ActuationSpec::new(TURN_AMOUNT_DEG)),
        ("turn_right".to_string(), ActuationSpec::new(TURN_AMOUNT_DEG)),
    ])
}

/// Configuration of one simulated agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentConfig {
    /// Sensors attached to the agent, in output order.
    pub sensor_specifications: Vec<SensorSpec>,
    /// Action name to actuation parameters.
    pub action_space: BTreeMap<String, ActuationSpec>,
}

impl AgentConfig {
    /// Create an agent carrying the given sensors and the fixed action
    /// table.
    #[must_use]
    pub fn new(sensor_specifications: Vec<SensorSpec>) -> Self {
        Self {
            sensor_specifications,
            action_space: default_action_space(),
        }
    }
}
