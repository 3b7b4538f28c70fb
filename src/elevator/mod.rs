pub mod car;
pub mod car_tests;
pub mod fsm;
pub mod handle;

pub use car::Car;
pub use fsm::ElevatorFSM;
pub use handle::ElevatorHandle;
