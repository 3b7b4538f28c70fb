pub mod error;
pub mod structs;

pub use error::DispatchError;
pub use structs::CarId;
pub use structs::CarState;
pub use structs::CarStatus;
pub use structs::CompletedStop;
pub use structs::Direction;
pub use structs::Floor;
pub use structs::SystemStatus;
