//! Debounced lock-on state machine.
//!
//! `Unlocked -> Locking -> Locked`. A target near the viewport center moves
//! the machine toward `Locked`; leaving the lock radius moves it back toward
//! `Unlocked`. Either change must hold for the full dwell time before it is
//! confirmed, and only confirmed changes produce a [`LockEvent`]. Losing
//! on-screen visibility resets to `Unlocked` immediately.

use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    #[default]
    Unlocked,
    /// Near the center, dwell timer running.
    Locking,
    Locked,
}

/// A confirmed lock transition. Only `Locked` and `Unlocked` are reported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub state: LockState,
    pub target_id: String,
}

/// Lock-on tracker for one target.
#[derive(Clone, Debug)]
pub struct LockOn {
    target_id: String,
    lock_radius_px: f64,
    dwell: Duration,
    state: LockState,
    /// Time the pending change has held, if one is pending.
    pending: Option<Duration>,
}

impl LockOn {
    pub fn new(target_id: impl Into<String>, lock_radius_px: f64, dwell: Duration) -> Self {
        Self {
            target_id: target_id.into(),
            lock_radius_px,
            dwell,
            state: LockState::Unlocked,
            pending: None,
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Whether a dwell timer is running.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feeds one frame. `on_screen` is the target's on-screen point, or
    /// `None` when it is off-screen or occluded. `dt` is the time since the
    /// previous frame.
    pub fn update(&mut self, on_screen: Option<DVec2>, center: DVec2, dt: Duration) -> Option<LockEvent> {
        let Some(point) = on_screen else {
            return self.reset();
        };
        let near = point.distance(center) < self.lock_radius_px;

        match (self.state, near) {
            (LockState::Unlocked, true) => {
                self.state = LockState::Locking;
                self.pending = Some(Duration::ZERO);
                debug!(target_id = %self.target_id, "lock dwell started");
                self.finish_dwell_if_zero()
            }
            (LockState::Unlocked, false) => None,
            (LockState::Locking, true) => {
                let held = self.pending.unwrap_or_default() + dt;
                self.pending = Some(held);
                if held >= self.dwell {
                    self.confirm(LockState::Locked)
                } else {
                    None
                }
            }
            (LockState::Locking, false) => {
                self.state = LockState::Unlocked;
                self.pending = None;
                debug!(target_id = %self.target_id, "lock dwell abandoned");
                None
            }
            (LockState::Locked, true) => {
                self.pending = None;
                None
            }
            (LockState::Locked, false) => match self.pending {
                None => {
                    self.pending = Some(Duration::ZERO);
                    self.finish_dwell_if_zero()
                }
                Some(held) => {
                    let held = held + dt;
                    self.pending = Some(held);
                    if held >= self.dwell {
                        self.confirm(LockState::Unlocked)
                    } else {
                        None
                    }
                }
            },
        }
    }

    /// Drops any running dwell timer. A lock in progress falls back to
    /// `Unlocked` without an event; a confirmed lock stays locked.
    pub fn cancel_pending(&mut self) {
        if self.state == LockState::Locking {
            self.state = LockState::Unlocked;
        }
        if self.pending.take().is_some() {
            debug!(target_id = %self.target_id, "lock dwell cancelled");
        }
    }

    /// Immediately returns to `Unlocked`. Reports an event only when a
    /// confirmed lock is lost.
    pub fn reset(&mut self) -> Option<LockEvent> {
        self.pending = None;
        let was = std::mem::replace(&mut self.state, LockState::Unlocked);
        (was == LockState::Locked).then(|| self.event(LockState::Unlocked))
    }

    fn finish_dwell_if_zero(&mut self) -> Option<LockEvent> {
        if !self.dwell.is_zero() {
            return None;
        }
        match self.state {
            LockState::Locking => self.confirm(LockState::Locked),
            LockState::Locked => self.confirm(LockState::Unlocked),
            LockState::Unlocked => None,
        }
    }

    fn confirm(&mut self, state: LockState) -> Option<LockEvent> {
        self.state = state;
        self.pending = None;
        Some(self.event(state))
    }

    fn event(&self, state: LockState) -> LockEvent {
        info!(target_id = %self.target_id, ?state, "lock state confirmed");
        LockEvent {
            state,
            target_id: self.target_id.clone(),
        }
    }
}
