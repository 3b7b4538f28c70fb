/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::dispatcher::strategy::AssignmentStrategy;
use crate::elevator::{Car, ElevatorHandle};
use crate::shared::error::Result;
use crate::shared::{CarId, CarStatus, CompletedStop, Direction, DispatchError, Floor, SystemStatus};

/**
 * Routes hall calls and car calls to the cars of one building.
 *
 * The roster is built once from configuration and never changes; each car
 * runs on its own worker thread. The active strategy sits behind its own lock,
 * held only while a car is being chosen. Car movement never runs under a
 * dispatcher lock.
 *
 * A rejected request leaves every car untouched.
 */
pub struct Dispatcher {
    roster: Vec<ElevatorHandle>,
    strategy: Mutex<Box<dyn AssignmentStrategy>>,
    min_floor: Floor,
    max_floor: Floor,
}

impl Dispatcher {
    pub fn new(config: &Config, strategy: Box<dyn AssignmentStrategy>) -> std::io::Result<Dispatcher> {
        Dispatcher::build(config, strategy, None)
    }

    /// Like `new`, but every car reports the stops it settles at on `completed_tx`.
    pub fn with_completed_stops(
        config: &Config,
        strategy: Box<dyn AssignmentStrategy>,
        completed_tx: cbc::Sender<CompletedStop>,
    ) -> std::io::Result<Dispatcher> {
        Dispatcher::build(config, strategy, Some(completed_tx))
    }

    fn build(
        config: &Config,
        strategy: Box<dyn AssignmentStrategy>,
        completed_tx: Option<cbc::Sender<CompletedStop>>,
    ) -> std::io::Result<Dispatcher> {
        let (min_floor, max_floor) = (config.building.min_floor, config.building.max_floor);
        let travel_time = Duration::from_millis(config.elevator.travel_time);
        let door_open_time = Duration::from_millis(config.elevator.door_open_time);

        let mut roster = Vec::with_capacity(config.elevator.count as usize);
        for index in 0..config.elevator.count {
            let car = Car::new(
                index + 1,
                min_floor,
                max_floor,
                config.start_floor(index as usize),
                config.elevator.capacity,
            )
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
            roster.push(ElevatorHandle::spawn(
                car,
                travel_time,
                door_open_time,
                completed_tx.clone(),
            )?);
        }

        info!(
            "Dispatcher started with {} elevators serving floors {}..={} ({} strategy)",
            roster.len(),
            min_floor,
            max_floor,
            strategy.name()
        );

        Ok(Dispatcher {
            roster,
            strategy: Mutex::new(strategy),
            min_floor,
            max_floor,
        })
    }

    /**
     * Assign a hall call to a car.
     *
     * Returns the id of the car that will serve the call. Fails with
     * `InvalidFloor` outside the building and `NoCarAvailable` when every car
     * is full or in maintenance.
     */
    pub fn handle_external_request(&self, floor: Floor, direction: Direction) -> Result<CarId> {
        if floor < self.min_floor || floor > self.max_floor {
            warn!("Rejected hall call at floor {}: outside the building", floor);
            return Err(DispatchError::InvalidFloor {
                floor,
                min: self.min_floor,
                max: self.max_floor,
            });
        }

        let assigned = {
            let mut strategy = self.lock_strategy();
            let mut snapshot = self.get_status().cars;
            self.assign(&mut **strategy, &mut snapshot, floor, direction)
        };

        let (elevator, added) = match assigned {
            Some(assigned) => assigned,
            None => {
                warn!("No elevator available for floor {} going {}", floor, direction);
                return Err(DispatchError::NoCarAvailable { floor, direction });
            }
        };
        elevator.wake();

        info!(
            "Hall call at floor {} going {} assigned to elevator {}",
            floor,
            direction,
            elevator.id()
        );
        if !added {
            debug!("Floor {} already queued for elevator {}", floor, elevator.id());
        }
        Ok(elevator.id())
    }

    /**
     * Pick a car from `snapshot` and queue `floor` on it.
     *
     * The choice is confirmed under the car's own lock. A car that went into
     * maintenance or filled up since the snapshot is refreshed in the snapshot
     * and the strategy asked again, at most once per car.
     */
    fn assign(
        &self,
        strategy: &mut dyn AssignmentStrategy,
        snapshot: &mut [CarStatus],
        floor: Floor,
        direction: Direction,
    ) -> Option<(&ElevatorHandle, bool)> {
        for _ in 0..self.roster.len() {
            let index = strategy.select(snapshot, floor, direction)?;
            let elevator = self.roster.get(index)?;

            let mut car = elevator.lock();
            if car.is_available() {
                return Some((elevator, car.add_stop(floor)));
            }
            debug!("Elevator {} became unavailable, choosing again", elevator.id());
            snapshot[index] = car.status();
        }
        None
    }

    /// Queue a floor selected from inside a car.
    pub fn handle_internal_request(&self, car_id: CarId, floor: Floor) -> Result<()> {
        let elevator = self.find(car_id)?;
        {
            let mut car = elevator.lock();
            if !car.serves(floor) {
                let (min, max) = car.range();
                warn!("Rejected car call to floor {} in elevator {}", floor, car_id);
                return Err(DispatchError::InvalidFloor { floor, min, max });
            }
            car.add_stop(floor);
        }
        elevator.wake();

        info!("Car call to floor {} in elevator {}", floor, car_id);
        Ok(())
    }

    pub fn get_status(&self) -> SystemStatus {
        SystemStatus {
            cars: self
                .roster
                .iter()
                .map(|elevator| elevator.lock().status())
                .collect(),
        }
    }

    /// Swap the assignment policy. Stops already queued are not reassigned.
    pub fn set_strategy(&self, strategy: Box<dyn AssignmentStrategy>) {
        let mut active = self.lock_strategy();
        info!("Assignment strategy changed from {} to {}", active.name(), strategy.name());
        *active = strategy;
    }

    pub fn strategy_name(&self) -> &'static str {
        self.lock_strategy().name()
    }

    /**
     * Put a car in or out of maintenance.
     *
     * Entering keeps the queue and halts the car at its current floor.
     * Leaving returns the car to service and resumes any queued stops.
     */
    pub fn set_maintenance(&self, car_id: CarId, enabled: bool) -> Result<()> {
        let elevator = self.find(car_id)?;
        let resume = {
            let mut car = elevator.lock();
            if enabled {
                car.enter_maintenance();
                false
            } else {
                car.exit_maintenance()
            }
        };

        if enabled {
            info!("Elevator {} entered maintenance", car_id);
        } else {
            info!("Elevator {} back in service", car_id);
        }
        if resume {
            elevator.wake();
        }
        Ok(())
    }

    pub fn set_occupancy(&self, car_id: CarId, load: u32) -> Result<()> {
        let elevator = self.find(car_id)?;
        let result = elevator.lock().set_occupancy(load);
        if let Err(e) = &result {
            warn!("{}", e);
        }
        result
    }

    /// Stop every car worker and wait for them to exit.
    pub fn shutdown(&mut self) {
        for elevator in self.roster.iter_mut() {
            elevator.stop();
        }
        debug!("Dispatcher shut down");
    }

    fn find(&self, car_id: CarId) -> Result<&ElevatorHandle> {
        self.roster
            .iter()
            .find(|elevator| elevator.id() == car_id)
            .ok_or_else(|| {
                warn!("Elevator {} not found", car_id);
                DispatchError::CarNotFound(car_id)
            })
    }

    fn lock_strategy(&self) -> MutexGuard<'_, Box<dyn AssignmentStrategy>> {
        self.strategy
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
