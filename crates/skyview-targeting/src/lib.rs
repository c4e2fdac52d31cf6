//! Click picking and the scavenger-hunt targeting pipeline: resolve a target
//! each frame, classify where it lands relative to the viewport, and drive the
//! debounced lock-on state machine.

pub mod hunt;
pub mod lock;
pub mod picking;
pub mod target;
pub mod visibility;

pub use hunt::{Hunt, HuntFrame, TargetingSettings};
pub use lock::{LockEvent, LockOn, LockState};
pub use picking::{Pick, PickSettings, pick_nearest, pick_star};
pub use target::{ParseTargetError, TargetId};
pub use visibility::{EdgeIndicator, Visibility, classify, screen_bearing_deg};
