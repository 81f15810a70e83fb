pub mod api;
pub mod macros;
pub mod monitor;
pub mod movement;

pub use api::{ApiClient, ApiError};
pub use monitor::{DemoEntry, MovementEntry, Obstacle, ObstacleEntry, Operation};
pub use movement::{CommandId, MovementRecord, MovementRequest, Speed};

/// Control socket of the running dashboard.
pub const SOCKET_PATH: &str = "/tmp/carriot.sock";
