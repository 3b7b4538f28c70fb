use crate::elevator::car::{lock_car, Car};
use crate::shared::{CarId, CompletedStop, Floor};
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/**
 * Runs the SCAN loop for one car.
 *
 * One `ElevatorFSM` lives on its own thread per car. It sleeps until it is
 * woken, then serves the car's pending stops one at a time until the queue
 * drains or the car enters maintenance, and goes back to sleep. The car's
 * lock is only held for the short state updates between delays, so status
 * queries and new stops never wait on travel.
 *
 * # Fields
 * - `car`:             Shared car state, also read by the dispatcher.
 * - `wake_rx`:         Signals that a stop was queued or maintenance was cleared.
 * - `terminate_rx`:    Stops the worker, also while it is travelling.
 * - `completed_tx`:    Optional sink for every stop the car settles at.
 * - `travel_time`:     Simulated time per floor.
 * - `door_open_time`:  Simulated time a car holds at a stop.
 */

enum Event {
    Wake,
    Terminate,
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Arrived,
    Drained,
    Paused,
    Terminated,
}

pub struct ElevatorFSM {
    id: CarId,
    car: Arc<Mutex<Car>>,

    // Control channels
    wake_rx: cbc::Receiver<()>,
    terminate_rx: cbc::Receiver<()>,
    completed_tx: Option<cbc::Sender<CompletedStop>>,

    // Timing
    travel_time: Duration,
    door_open_time: Duration,
}

impl ElevatorFSM {
    pub fn new(
        car: Arc<Mutex<Car>>,
        wake_rx: cbc::Receiver<()>,
        terminate_rx: cbc::Receiver<()>,
        completed_tx: Option<cbc::Sender<CompletedStop>>,
        travel_time: Duration,
        door_open_time: Duration,
    ) -> ElevatorFSM {
        let id = lock_car(&car).id();
        ElevatorFSM {
            id,
            car,
            wake_rx,
            terminate_rx,
            completed_tx,
            travel_time,
            door_open_time,
        }
    }

    pub fn run(self) {
        // Serve anything queued before the thread started
        if self.serve_pending() == Outcome::Terminated {
            return;
        }

        loop {
            match self.wait_for_event() {
                Event::Wake => {
                    if self.serve_pending() == Outcome::Terminated {
                        break;
                    }
                }
                Event::Terminate => break,
            }
        }
        debug!("Elevator {} worker stopped", self.id);
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.wake_rx) -> msg => {
                match msg {
                    Ok(()) => Event::Wake,
                    Err(_) => Event::Terminate,
                }
            }
            recv(self.terminate_rx) -> _ => Event::Terminate,
        }
    }

    fn serve_pending(&self) -> Outcome {
        loop {
            let target = {
                let mut car = lock_car(&self.car);
                if car.in_maintenance() {
                    return Outcome::Paused;
                }
                match car.next_stop() {
                    Some(target) => {
                        debug!(
                            "Elevator {} leaving floor {} for {} ({})",
                            self.id,
                            car.floor(),
                            target,
                            car.direction()
                        );
                        target
                    }
                    None => {
                        car.settle_idle();
                        return Outcome::Drained;
                    }
                }
            };

            match self.travel(target) {
                Outcome::Arrived => {}
                outcome => return outcome,
            }

            // Doors open
            if !self.pause(self.door_open_time) {
                return Outcome::Terminated;
            }
        }
    }

    // Moves the car one floor per `travel_time` and settles it at `target`.
    fn travel(&self, target: Floor) -> Outcome {
        loop {
            {
                let mut car = lock_car(&self.car);
                if car.in_maintenance() {
                    warn!(
                        "Elevator {} halted at floor {} for maintenance, floor {} stays queued",
                        self.id,
                        car.floor(),
                        target
                    );
                    car.interrupt(target);
                    return Outcome::Paused;
                }
                if car.floor() == target {
                    car.arrive();
                    break;
                }
            }

            if !self.pause(self.travel_time) {
                return Outcome::Terminated;
            }

            let mut car = lock_car(&self.car);
            if car.in_maintenance() {
                continue;
            }
            car.step_toward(target);
        }

        info!("Elevator {} stopped at floor {}", self.id, target);
        if let Some(completed_tx) = &self.completed_tx {
            let _ = completed_tx.send(CompletedStop {
                car: self.id,
                floor: target,
            });
        }
        Outcome::Arrived
    }

    // Sleeps for `duration`. Returns false if the worker was told to stop.
    fn pause(&self, duration: Duration) -> bool {
        cbc::select! {
            recv(self.terminate_rx) -> _ => false,
            default(duration) => true,
        }
    }
}
