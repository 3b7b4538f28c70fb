/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::warn;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::shared::error::Result;
use crate::shared::{CarId, CompletedStop, Direction, DispatchError, Floor, SystemStatus};

/**
 * Entry point for callers outside the engine.
 *
 * Checks floors against the building's range before anything reaches the
 * dispatcher, so an out-of-range floor is refused rather than clamped.
 */
pub struct Building {
    dispatcher: Dispatcher,
    min_floor: Floor,
    max_floor: Floor,
}

impl Building {
    pub fn new(config: &Config) -> std::io::Result<Building> {
        let strategy = config.dispatcher.strategy.build(&config.dispatcher);
        Ok(Building {
            dispatcher: Dispatcher::new(config, strategy)?,
            min_floor: config.building.min_floor,
            max_floor: config.building.max_floor,
        })
    }

    pub fn with_completed_stops(
        config: &Config,
        completed_tx: cbc::Sender<CompletedStop>,
    ) -> std::io::Result<Building> {
        let strategy = config.dispatcher.strategy.build(&config.dispatcher);
        Ok(Building {
            dispatcher: Dispatcher::with_completed_stops(config, strategy, completed_tx)?,
            min_floor: config.building.min_floor,
            max_floor: config.building.max_floor,
        })
    }

    /// Hall call from `floor`. Returns the car sent to answer it.
    pub fn call_elevator(&self, floor: Floor, direction: Direction) -> Result<CarId> {
        self.check_floor(floor)?;
        if direction == Direction::Idle {
            warn!("Rejected hall call at floor {} without a direction", floor);
            return Err(DispatchError::InvalidDirection(direction));
        }
        self.dispatcher.handle_external_request(floor, direction)
    }

    /// Car call from inside car `car_id`.
    pub fn select_floor(&self, car_id: CarId, floor: Floor) -> Result<()> {
        self.check_floor(floor)?;
        self.dispatcher.handle_internal_request(car_id, floor)
    }

    pub fn get_status(&self) -> SystemStatus {
        self.dispatcher.get_status()
    }

    pub fn shutdown(&mut self) {
        self.dispatcher.shutdown();
    }

    fn check_floor(&self, floor: Floor) -> Result<()> {
        if floor < self.min_floor || floor > self.max_floor {
            warn!("Rejected floor {}: building serves {}..={}", floor, self.min_floor, self.max_floor);
            return Err(DispatchError::InvalidFloor {
                floor,
                min: self.min_floor,
                max: self.max_floor,
            });
        }
        Ok(())
    }
}
