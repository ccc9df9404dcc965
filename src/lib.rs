pub mod error;
pub mod fleet;
pub mod framelog;
pub mod geo;
pub mod locate;
pub mod notify;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod select;
pub mod session;
pub mod traffic;

pub use error::TrackingError;
pub use scenario::{Scenario, ScenarioLoader};
pub use session::{Session, SessionBuilder, TickerHandle};
