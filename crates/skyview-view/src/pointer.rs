//! Frame-coherent pointer tracker.
//!
//! [`PointerState`] accumulates raw host pointer events during a frame and
//! turns them into [`ViewInput`]s for the controller: one-finger or mouse
//! drags, two-finger pinch zoom, wheel zoom, and taps.

use glam::DVec2;

use crate::controller::ViewInput;

/// Pointer travel beyond which a press no longer counts as a click.
pub const CLICK_SLOP_PX: f64 = 6.0;

/// Wheel movement as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelDelta {
    /// Line units; positive zooms in.
    Lines(f64),
    /// Pixel units; normalized at roughly 40 px per line.
    Pixels(f64),
}

impl WheelDelta {
    fn lines(self) -> f64 {
        match self {
            WheelDelta::Lines(l) => l,
            WheelDelta::Pixels(p) => p / 40.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ActivePointer {
    id: u64,
    position: DVec2,
}

/// Frame-coherent pointer state.
///
/// # Usage
///
/// 1. Forward host events via the `on_*` methods.
/// 2. Drain [`take_inputs`](Self::take_inputs) and
///    [`take_click`](Self::take_click) once per frame.
/// 3. Call [`clear_transients`](Self::clear_transients) at end of frame.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    active: Vec<ActivePointer>,
    press_origin: Option<DVec2>,
    travel: f64,
    multi_touch: bool,
    inputs: Vec<ViewInput>,
    click: Option<DVec2>,
}

impl PointerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Event handlers ──────────────────────────────────────────────

    pub fn on_pointer_down(&mut self, id: u64, position: DVec2) {
        if self.active.iter().any(|p| p.id == id) {
            return;
        }
        self.active.push(ActivePointer { id, position });
        match self.active.len() {
            1 => {
                self.press_origin = Some(position);
                self.travel = 0.0;
                self.multi_touch = false;
                self.inputs.push(ViewInput::PointerDown);
            }
            _ => {
                // A second finger turns the gesture into a pinch.
                if !self.multi_touch {
                    self.multi_touch = true;
                    self.inputs.push(ViewInput::PointerUp);
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, id: u64, position: DVec2) {
        let Some(index) = self.active.iter().position(|p| p.id == id) else {
            return;
        };
        let before = self.pinch_span();
        let previous = self.active[index].position;
        self.active[index].position = position;

        if self.multi_touch {
            if let (Some(before), Some(after)) = (before, self.pinch_span()) {
                if before > f64::EPSILON && after > f64::EPSILON {
                    self.push_zoom(after / before);
                }
            }
            return;
        }

        let delta = position - previous;
        if let Some(origin) = self.press_origin {
            self.travel = self.travel.max(origin.distance(position));
        }
        self.push_drag(delta);
    }

    pub fn on_pointer_up(&mut self, id: u64) {
        let Some(index) = self.active.iter().position(|p| p.id == id) else {
            return;
        };
        let released = self.active.remove(index);
        if !self.active.is_empty() {
            return;
        }
        if !self.multi_touch {
            self.inputs.push(ViewInput::PointerUp);
            if self.travel <= CLICK_SLOP_PX {
                self.click = Some(released.position);
            }
        }
        self.press_origin = None;
        self.multi_touch = false;
    }

    /// Drops every pointer, e.g. when the host loses focus.
    pub fn on_cancel(&mut self) {
        if !self.active.is_empty() && !self.multi_touch {
            self.inputs.push(ViewInput::PointerUp);
        }
        self.active.clear();
        self.press_origin = None;
        self.multi_touch = false;
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) {
        let lines = delta.lines();
        if lines == 0.0 {
            return;
        }
        if let Some(ViewInput::Wheel { lines: acc }) = self.inputs.last_mut() {
            *acc += lines;
        } else {
            self.inputs.push(ViewInput::Wheel { lines });
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Number of pointers currently pressed.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Inputs gathered since the last call, with consecutive drags and
    /// zooms coalesced.
    pub fn take_inputs(&mut self) -> Vec<ViewInput> {
        std::mem::take(&mut self.inputs)
    }

    /// Release position of a press that never moved past the click slop.
    pub fn take_click(&mut self) -> Option<DVec2> {
        self.click.take()
    }

    pub fn clear_transients(&mut self) {
        self.inputs.clear();
        self.click = None;
    }

    // ── Internals ───────────────────────────────────────────────────

    fn pinch_span(&self) -> Option<f64> {
        match self.active.as_slice() {
            [a, b, ..] => Some(a.position.distance(b.position)),
            _ => None,
        }
    }

    fn push_drag(&mut self, delta: DVec2) {
        if delta == DVec2::ZERO {
            return;
        }
        if let Some(ViewInput::PointerDrag { dx, dy }) = self.inputs.last_mut() {
            *dx += delta.x;
            *dy += delta.y;
        } else {
            self.inputs.push(ViewInput::PointerDrag {
                dx: delta.x,
                dy: delta.y,
            });
        }
    }

    fn push_zoom(&mut self, factor: f64) {
        if let Some(ViewInput::Zoom { factor: acc }) = self.inputs.last_mut() {
            *acc *= factor;
        } else {
            self.inputs.push(ViewInput::Zoom { factor });
        }
    }
}
