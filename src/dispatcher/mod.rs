pub mod dispatcher;
pub mod strategy;

pub use dispatcher::Dispatcher;
pub use strategy::{AssignmentStrategy, Nearest, RoundRobin, StrategyKind};
