use thiserror::Error;

use super::structs::{CarId, Direction, Floor};

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("floor {floor} is outside the served range {min}..={max}")]
    InvalidFloor { floor: Floor, min: Floor, max: Floor },

    #[error("hall calls must be up or down, got {0}")]
    InvalidDirection(Direction),

    #[error("no elevator available for floor {floor} going {direction}")]
    NoCarAvailable { floor: Floor, direction: Direction },

    #[error("elevator {0} not found")]
    CarNotFound(CarId),

    #[error("elevator {car} cannot carry {load} (capacity {capacity})")]
    OverCapacity { car: CarId, load: u32, capacity: u32 },
}
