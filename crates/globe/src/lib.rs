pub mod camera;
pub mod locations;
pub mod marker_drag;
pub mod markers;
pub mod pointer;
pub mod selection;

pub use camera::*;
pub use locations::*;
pub use marker_drag::*;
pub use markers::*;
pub use pointer::*;
pub use selection::*;
