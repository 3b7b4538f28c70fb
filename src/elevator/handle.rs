/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::error;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{Builder, JoinHandle};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::car::{lock_car, Car};
use crate::elevator::fsm::ElevatorFSM;
use crate::shared::{CarId, CompletedStop};

/**
 * Owner's side of a running car.
 *
 * Holds the shared car state together with the channels that drive its
 * worker thread. Dropping the handle stops and joins the worker.
 */
pub struct ElevatorHandle {
    id: CarId,
    car: Arc<Mutex<Car>>,
    wake_tx: cbc::Sender<()>,
    terminate_tx: cbc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl ElevatorHandle {
    pub fn spawn(
        car: Car,
        travel_time: Duration,
        door_open_time: Duration,
        completed_tx: Option<cbc::Sender<CompletedStop>>,
    ) -> std::io::Result<ElevatorHandle> {
        let id = car.id();
        let car = Arc::new(Mutex::new(car));

        // A single slot is enough, pending wakes collapse into one
        let (wake_tx, wake_rx) = cbc::bounded::<()>(1);
        let (terminate_tx, terminate_rx) = cbc::bounded::<()>(1);

        let elevator_fsm = ElevatorFSM::new(
            car.clone(),
            wake_rx,
            terminate_rx,
            completed_tx,
            travel_time,
            door_open_time,
        );

        let elevator_fsm_thread = Builder::new().name(format!("car-{}", id));
        let thread = elevator_fsm_thread.spawn(move || elevator_fsm.run())?;

        Ok(ElevatorHandle {
            id,
            car,
            wake_tx,
            terminate_tx,
            thread: Some(thread),
        })
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn lock(&self) -> MutexGuard<'_, Car> {
        lock_car(&self.car)
    }

    /// Nudge the worker. A wake already waiting in the channel covers this one.
    pub fn wake(&self) {
        let _ = self.wake_tx.try_send(());
    }

    pub fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.terminate_tx.try_send(());
            if thread.join().is_err() {
                error!("Elevator {} worker panicked", self.id);
            }
        }
    }
}

impl Drop for ElevatorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
