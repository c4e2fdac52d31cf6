//! Sky view state, azimuthal projections, and the input reducer that drives
//! the viewer's orientation from drag, zoom, and device-orientation events.

pub mod controller;
pub mod pointer;
pub mod projection;
pub mod view_state;

pub use controller::{RotationSource, SourceChange, ViewController, ViewInput, ViewSettings};
pub use pointer::{PointerState, WheelDelta};
pub use projection::{ProjectionMode, Viewport, angular_distance_from_center, project, rotate};
pub use view_state::{Rotation, ViewState, wrap_degrees};
