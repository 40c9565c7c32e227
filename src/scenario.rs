//! Scenario files for the headless runner.
//!
//! A scenario is a JSON document describing one platform and the passengers
//! around it:
//!
//! ```json
//! {
//!   "platform": { "waypoints": [[0, 0], [4, 0]], "speed": 2, "wait_time": 0.5 },
//!   "start": [0, 0],
//!   "half_extents": [1, 0.25],
//!   "passengers": [{ "position": [0, 0.75], "half_extents": [0.25, 0.5] }]
//! }
//! ```

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::collision::CollisionLayers;
use crate::components::{PassengerCollider, PassengerMotor, PlatformCollider, PlatformSettings};
use crate::config::PlatformConfig;
use crate::DEFAULT_PASSENGER_LAYER;

/// Reasons a scenario cannot be loaded.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid scenario document.
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A passenger placed in a scenario.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassengerSpec {
    /// Centre of the passenger's collider.
    pub position: [f32; 2],
    /// Half the collider's width and height.
    pub half_extents: [f32; 2],
    /// Layers the passenger occupies.
    #[serde(default = "default_passenger_layers")]
    pub layers: CollisionLayers,
    /// Whether the passenger can be moved at all.
    #[serde(default = "default_has_motor")]
    pub has_motor: bool,
}

const fn default_passenger_layers() -> CollisionLayers {
    CollisionLayers(DEFAULT_PASSENGER_LAYER)
}

const fn default_has_motor() -> bool {
    true
}

/// One platform and its passengers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// The platform's configuration.
    pub platform: PlatformConfig,
    /// The platform's starting centre.
    #[serde(default)]
    pub start: [f32; 2],
    /// Half the platform collider's width and height.
    pub half_extents: [f32; 2],
    /// Passengers to spawn.
    #[serde(default)]
    pub passengers: Vec<PassengerSpec>,
}

/// Entities created by [`Scenario::spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEntities {
    /// The platform.
    pub platform: Entity,
    /// Passengers in the order they were declared.
    pub passengers: Vec<Entity>,
}

impl Scenario {
    /// Parses a scenario from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] for malformed documents.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] when the file cannot be read and
    /// [`ScenarioError::Parse`] when it is malformed.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Spawns the platform and its passengers into `world`.
    ///
    /// The platform is only validated once [`ShuttlePlugin`] runs; an invalid
    /// configuration still spawns and is flagged then.
    ///
    /// [`ShuttlePlugin`]: crate::ShuttlePlugin
    pub fn spawn(&self, world: &mut World) -> ScenarioEntities {
        let platform = world
            .spawn((
                Name::new("Platform"),
                PlatformSettings(self.platform.clone()),
                PlatformCollider {
                    half_extents: Vec2::from_array(self.half_extents),
                },
                Transform::from_translation(Vec2::from_array(self.start).extend(0.0)),
            ))
            .id();

        let passengers = self
            .passengers
            .iter()
            .enumerate()
            .map(|(index, body)| {
                let mut passenger = world.spawn((
                    Name::new(format!("Passenger {index}")),
                    PassengerCollider {
                        half_extents: Vec2::from_array(body.half_extents),
                        layers: body.layers,
                    },
                    Transform::from_translation(Vec2::from_array(body.position).extend(0.0)),
                ));
                if body.has_motor {
                    passenger.insert(PassengerMotor::default());
                }
                passenger.id()
            })
            .collect();

        ScenarioEntities {
            platform,
            passengers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIDE: &str = r#"{
        "platform": { "waypoints": [[0, 0], [4, 0]], "speed": 2 },
        "half_extents": [1, 0.25],
        "passengers": [
            { "position": [0, 0.75], "half_extents": [0.25, 0.5] },
            { "position": [3, 0], "half_extents": [0.25, 0.25], "has_motor": false, "layers": 4 }
        ]
    }"#;

    #[test]
    fn parses_passengers_with_defaults() {
        let scenario = Scenario::from_json_str(RIDE).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(scenario.start, [0.0, 0.0]);
        assert_eq!(scenario.passengers.len(), 2);
        let rider = &scenario.passengers[0];
        assert!(rider.has_motor);
        assert_eq!(rider.layers, CollisionLayers(DEFAULT_PASSENGER_LAYER));
        assert_eq!(scenario.passengers[1].layers, CollisionLayers(4));
    }

    #[test]
    fn spawn_creates_every_entity() {
        let scenario = Scenario::from_json_str(RIDE).unwrap_or_else(|e| panic!("{e}"));
        let mut world = World::new();
        let spawned = scenario.spawn(&mut world);
        assert_eq!(spawned.passengers.len(), 2);
        assert!(world.get::<PlatformSettings>(spawned.platform).is_some());
        let motors: Vec<bool> = spawned
            .passengers
            .iter()
            .map(|passenger| world.get::<PassengerMotor>(*passenger).is_some())
            .collect();
        assert_eq!(motors, vec![true, false]);
    }

    #[test]
    fn malformed_documents_are_reported() {
        let result = Scenario::from_json_str(r#"{ "platform": {} }"#);
        assert!(matches!(result, Err(ScenarioError::Parse(_))));
    }
}
