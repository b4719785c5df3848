pub mod carousel;
pub mod command;
pub mod config;
pub mod events;
pub mod replay;
pub mod session;
pub mod snapshot;

pub use carousel::{Photo, PhotoCarousel};
pub use command::Command;
pub use config::{ConfigError, PlannerConfig};
pub use events::PlannerEvent;
pub use replay::{ReplayReport, replay};
pub use session::{DestinationInput, Overlays, Planner};
pub use snapshot::PlannerSnapshot;
