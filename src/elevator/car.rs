/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::error::Result;
use crate::shared::{CarId, CarState, CarStatus, Direction, DispatchError, Floor};

/**
 * State of one elevator car.
 *
 * The car owns everything the run loop mutates and the SCAN ordering used to
 * pick its next stop. It does no waiting itself; the worker in `fsm.rs` drives
 * it through `next_stop`, `step_toward` and `arrive`.
 *
 * # Fields
 * - `id`:              Roster id, fixed at creation.
 * - `min_floor`:       Lowest floor this car serves.
 * - `max_floor`:       Highest floor this car serves.
 * - `floor`:           Current floor, updated one floor at a time while moving.
 * - `direction`:       Current or most recent direction of travel.
 * - `state`:           What the car is doing right now.
 * - `pending_stops`:   Distinct floors not yet served. Order is computed on demand.
 * - `target`:          Stop the worker is travelling to, already out of `pending_stops`.
 * - `occupancy`:       Current load.
 * - `capacity`:        Maximum load.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    id: CarId,
    min_floor: Floor,
    max_floor: Floor,
    floor: Floor,
    direction: Direction,
    state: CarState,
    pending_stops: BTreeSet<Floor>,
    target: Option<Floor>,
    occupancy: u32,
    capacity: u32,
}

impl Car {
    pub fn new(id: CarId, min_floor: Floor, max_floor: Floor, start_floor: Floor, capacity: u32) -> Result<Car> {
        if start_floor < min_floor || start_floor > max_floor {
            return Err(DispatchError::InvalidFloor {
                floor: start_floor,
                min: min_floor,
                max: max_floor,
            });
        }

        Ok(Car {
            id,
            min_floor,
            max_floor,
            floor: start_floor,
            direction: Direction::Idle,
            state: CarState::Idle,
            pending_stops: BTreeSet::new(),
            target: None,
            occupancy: 0,
            capacity,
        })
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn serves(&self, floor: Floor) -> bool {
        floor >= self.min_floor && floor <= self.max_floor
    }

    pub fn range(&self) -> (Floor, Floor) {
        (self.min_floor, self.max_floor)
    }

    pub fn has_pending_stops(&self) -> bool {
        !self.pending_stops.is_empty()
    }

    pub fn in_maintenance(&self) -> bool {
        self.state == CarState::Maintenance
    }

    pub fn is_available(&self) -> bool {
        self.state != CarState::Maintenance && self.occupancy < self.capacity
    }

    /// Queue a floor. Returns false when it was already queued.
    pub fn add_stop(&mut self, floor: Floor) -> bool {
        self.pending_stops.insert(floor)
    }

    /**
     * Order in which the pending stops would be served from here.
     *
     * Floors at or above the car come out ascending, floors below come out
     * descending. A car heading down serves the lower group first, otherwise
     * the upper group goes first.
     */
    pub fn scan_order(&self) -> Vec<Floor> {
        let above = self.pending_stops.range(self.floor..).copied();
        let below = self.pending_stops.range(..self.floor).rev().copied();

        match self.direction {
            Direction::Down => below.chain(above).collect(),
            Direction::Up | Direction::Idle => above.chain(below).collect(),
        }
    }

    /**
     * Take the next stop in SCAN order and start travelling to it.
     *
     * Removes the floor from the queue, points the car at it and marks it
     * moving. A stop at the current floor leaves the direction unchanged.
     */
    pub fn next_stop(&mut self) -> Option<Floor> {
        let target = *self.scan_order().first()?;
        self.pending_stops.remove(&target);

        if let Some(direction) = Direction::between(self.floor, target) {
            self.direction = direction;
        }
        self.state = CarState::Moving;
        self.target = Some(target);
        Some(target)
    }

    /// Advance one floor toward `target`. Returns true once the car is there.
    pub fn step_toward(&mut self, target: Floor) -> bool {
        match Direction::between(self.floor, target) {
            Some(Direction::Up) => self.floor += 1,
            Some(Direction::Down) => self.floor -= 1,
            _ => {}
        }
        self.floor == target
    }

    pub fn arrive(&mut self) {
        self.state = CarState::Stopped;
        self.target = None;
    }

    /// Queue drained; the car rests until the next wake.
    pub fn settle_idle(&mut self) {
        self.state = CarState::Idle;
        self.direction = Direction::Idle;
    }

    /// Halt where the car is and put the interrupted stop back in the queue.
    pub fn interrupt(&mut self, target: Floor) {
        self.pending_stops.insert(target);
        self.target = None;
    }

    pub fn enter_maintenance(&mut self) {
        self.state = CarState::Maintenance;
    }

    /**
     * Leave maintenance. Returns true when queued stops are waiting to be served.
     *
     * A car whose worker has not yet halted is still on its way to `target`
     * and goes straight back to moving.
     */
    pub fn exit_maintenance(&mut self) -> bool {
        if self.state == CarState::Maintenance {
            if self.target.is_some() {
                self.state = CarState::Moving;
            } else {
                self.state = CarState::Idle;
                if self.pending_stops.is_empty() {
                    self.direction = Direction::Idle;
                }
            }
        }
        self.has_pending_stops()
    }

    pub fn set_occupancy(&mut self, load: u32) -> Result<()> {
        if load > self.capacity {
            return Err(DispatchError::OverCapacity {
                car: self.id,
                load,
                capacity: self.capacity,
            });
        }
        self.occupancy = load;
        Ok(())
    }

    pub fn status(&self) -> CarStatus {
        CarStatus {
            id: self.id,
            floor: self.floor,
            direction: self.direction,
            state: self.state,
            occupancy: self.occupancy,
            capacity: self.capacity,
            pending_stops: self.pending_stops.iter().copied().collect(),
            target: self.target,
        }
    }
}

/// Lock a car, recovering the state if a worker panicked while holding it.
pub fn lock_car(car: &Mutex<Car>) -> MutexGuard<'_, Car> {
    car.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
impl Car {
    pub fn test_place(&mut self, floor: Floor, direction: Direction, state: CarState) {
        self.floor = floor;
        self.direction = direction;
        self.state = state;
    }
}
