//! A scavenger-hunt session: one target, resolved and classified every frame,
//! feeding the lock-on tracker.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyview_catalog::Catalog;
use skyview_view::{ViewState, Viewport};
use tracing::info;

use crate::lock::{LockEvent, LockOn, LockState};
use crate::target::TargetId;
use crate::visibility::{Visibility, classify};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetingSettings {
    /// Distance from the viewport center that counts as "on target".
    pub lock_radius_px: f64,
    /// How long a lock change must hold before it is confirmed.
    pub dwell: Duration,
    /// Inset of the off-screen arrow from the viewport edge.
    pub edge_margin_px: f64,
}

impl Default for TargetingSettings {
    fn default() -> Self {
        Self {
            lock_radius_px: 40.0,
            dwell: Duration::from_secs(1),
            edge_margin_px: 24.0,
        }
    }
}

/// Per-frame result of a hunt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HuntFrame {
    pub target: TargetId,
    /// `None` when the target does not resolve (unknown star name).
    pub visibility: Option<Visibility>,
    pub state: LockState,
    pub event: Option<LockEvent>,
}

#[derive(Clone, Debug)]
pub struct Hunt {
    target: TargetId,
    lock: LockOn,
    edge_margin_px: f64,
}

impl Hunt {
    pub fn new(target: TargetId, settings: &TargetingSettings) -> Self {
        info!(target_id = %target, "hunt started");
        let lock = LockOn::new(target.to_string(), settings.lock_radius_px, settings.dwell);
        Self {
            target,
            lock,
            edge_margin_px: settings.edge_margin_px,
        }
    }

    pub fn target(&self) -> &TargetId {
        &self.target
    }

    pub fn state(&self) -> LockState {
        self.lock.state()
    }

    /// Resolves, classifies and advances the lock for one frame. The view
    /// must already reflect every input of this frame.
    pub fn update(
        &mut self,
        catalog: &Catalog,
        time: DateTime<Utc>,
        view: &ViewState,
        viewport: &Viewport,
        dt: Duration,
    ) -> HuntFrame {
        let visibility = self
            .target
            .resolve(catalog, time)
            .map(|eq| classify(&eq, view, viewport, self.edge_margin_px));
        let on_screen = match visibility {
            Some(Visibility::OnScreen { point }) => Some(point),
            _ => None,
        };
        let event = self.lock.update(on_screen, viewport.center(), dt);
        HuntFrame {
            target: self.target.clone(),
            visibility,
            state: self.lock.state(),
            event,
        }
    }

    /// Clears the dwell timer, e.g. when the rotation source changes.
    pub fn cancel_pending(&mut self) {
        self.lock.cancel_pending();
    }

    /// Ends the hunt. Reports an unlock if the target was locked.
    pub fn stop(mut self) -> Option<LockEvent> {
        info!(target_id = %self.target, "hunt stopped");
        self.lock.reset()
    }
}
