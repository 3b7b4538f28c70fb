/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::StrategyKind;
use crate::shared::Floor;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub building: BuildingConfig,
    pub elevator: ElevatorConfig,
    pub dispatcher: DispatcherConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BuildingConfig {
    pub min_floor: Floor,
    pub max_floor: Floor,
}

/**
 * Settings shared by every car in the building.
 *
 * `travel_time` is the simulated time per floor and `door_open_time` the
 * time a car holds at a stop, both in milliseconds. `start_floors` places
 * car `i` at `start_floors[i]`; cars without an entry start at the lowest floor.
 */
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ElevatorConfig {
    pub count: u8,
    pub capacity: u32,
    pub travel_time: u64,
    pub door_open_time: u64,
    pub start_floors: Vec<Floor>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DispatcherConfig {
    pub strategy: StrategyKind,
    pub same_direction_bonus: i64,
    pub opposite_direction_penalty: i64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            min_floor: 0,
            max_floor: 9,
        }
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            count: 3,
            capacity: 8,
            travel_time: 200,
            door_open_time: 500,
            start_floors: Vec::new(),
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        DispatcherConfig {
            strategy: StrategyKind::Nearest,
            same_direction_bonus: 2,
            opposite_direction_penalty: 5,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.building.min_floor, self.building.max_floor);
        if min > max {
            return Err(ConfigError::Invalid(format!(
                "min_floor {} is above max_floor {}",
                min, max
            )));
        }
        if self.elevator.count == 0 {
            return Err(ConfigError::Invalid("the building needs at least one elevator".into()));
        }
        if self.elevator.capacity == 0 {
            return Err(ConfigError::Invalid("elevator capacity must be positive".into()));
        }
        if self.dispatcher.same_direction_bonus < 0 || self.dispatcher.opposite_direction_penalty < 0 {
            return Err(ConfigError::Invalid("scoring bonus and penalty must not be negative".into()));
        }
        Ok(())
    }

    /// Starting floor of the car at roster position `index`.
    pub fn start_floor(&self, index: usize) -> Floor {
        self.elevator
            .start_floors
            .get(index)
            .copied()
            .unwrap_or(self.building.min_floor)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        // Arrange
        let input = r#"
            [building]
            min_floor = -2
            max_floor = 12

            [elevator]
            count = 2
            capacity = 4
            travel_time = 0
            door_open_time = 0
            start_floors = [-2, 12]

            [dispatcher]
            strategy = "round_robin"
            same_direction_bonus = 1
            opposite_direction_penalty = 3
        "#;

        // Act
        let config = parse_config(input).unwrap();

        // Assert
        assert_eq!(config.building.min_floor, -2);
        assert_eq!(config.building.max_floor, 12);
        assert_eq!(config.elevator.count, 2);
        assert_eq!(config.dispatcher.strategy, StrategyKind::RoundRobin);
        assert_eq!(config.start_floor(1), 12);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[building]\nmax_floor = 4\n").unwrap();

        assert_eq!(config.building.min_floor, 0);
        assert_eq!(config.elevator.count, 3);
        assert_eq!(config.dispatcher.strategy, StrategyKind::Nearest);
        // No start_floors entry means the lowest floor
        assert_eq!(config.start_floor(2), 0);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let result = parse_config("[building]\nmin_floor = 5\nmax_floor = 1\n");

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = parse_config("[building\nmin_floor = ");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
