/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type CarId = u8;
pub type Floor = i32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Idle,
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`, `None` when they are the same floor.
    pub fn between(from: Floor, to: Floor) -> Option<Direction> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less => Some(Direction::Down),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn opposite(&self) -> Direction {
        match *self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::Idle => write!(f, "idle"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarState {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "stopped")]
    Stopped,
    #[serde(rename = "maintenance")]
    Maintenance,
}

impl fmt::Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CarState::Idle => write!(f, "idle"),
            CarState::Moving => write!(f, "moving"),
            CarState::Stopped => write!(f, "stopped"),
            CarState::Maintenance => write!(f, "maintenance"),
        }
    }
}

/**
 * Point-in-time snapshot of a single car.
 *
 * Taken under the car's lock, so the floor, direction and state always
 * belong to the same moment. Strategies score cars from these snapshots.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarStatus {
    pub id: CarId,
    pub floor: Floor,
    pub direction: Direction,
    pub state: CarState,
    pub occupancy: u32,
    pub capacity: u32,
    #[serde(rename = "pendingStops")]
    pub pending_stops: Vec<Floor>,
    pub target: Option<Floor>,
}

impl CarStatus {
    pub fn is_available(&self) -> bool {
        self.state != CarState::Maintenance && self.occupancy < self.capacity
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stops = self
            .pending_stops
            .iter()
            .map(|floor| floor.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        write!(
            f,
            "Elevator {}: floor {:>3} | {:<4} | {:<11} | load {}/{} | stops [{}]",
            self.id,
            self.floor,
            self.direction,
            self.state,
            self.occupancy,
            self.capacity,
            stops
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SystemStatus {
    pub cars: Vec<CarStatus>,
}

impl SystemStatus {
    /// True when no car is travelling, settling, or holding queued stops.
    pub fn all_idle(&self) -> bool {
        self.cars.iter().all(|car| {
            car.pending_stops.is_empty()
                && car.target.is_none()
                && (car.state == CarState::Idle || car.state == CarState::Maintenance)
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for car in self.cars.iter() {
            writeln!(f, "{}", car)?;
        }
        Ok(())
    }
}

/// Emitted by a car's worker each time it settles at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedStop {
    pub car: CarId,
    pub floor: Floor,
}
