//! Frame-driven facade over the ephemeris, view, and targeting crates.
//!
//! A host queues [`EngineInput`]s as they arrive and calls
//! [`SkyEngine::frame`] once per animation frame. Every queued input is
//! applied to the view before anything is projected, so all output of a
//! frame shares one orientation.

mod engine;
mod frame;
mod settings;

pub use engine::{EngineInput, SkyEngine};
pub use frame::{FrameOutput, LineSegment, PickedStar, ProjectedBody, ProjectedStar};
pub use settings::EngineSettings;
