pub mod ai_planner;
pub mod destination;
pub mod graph;
pub mod path;
pub mod preferences;
pub mod recommendation;

pub use ai_planner::*;
pub use destination::*;
pub use graph::*;
pub use path::*;
pub use preferences::*;
pub use recommendation::*;
