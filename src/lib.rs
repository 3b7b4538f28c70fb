//! Elevator dispatch and scheduling engine
//!
//! Assigns hall calls to cars, runs every car on its own worker thread
//! through a SCAN ordering of its stops, and reports status.

pub mod building;
pub mod config;
pub mod dispatcher;
pub mod elevator;
pub mod shared;

pub use building::Building;
pub use config::{load_config, Config, ConfigError};
pub use dispatcher::{AssignmentStrategy, Dispatcher, Nearest, RoundRobin, StrategyKind};
pub use shared::{CarId, CarState, CarStatus, CompletedStop, Direction, DispatchError, Floor, SystemStatus};
