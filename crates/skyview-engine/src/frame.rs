//! Serializable per-frame output handed back to the host.

use chrono::{DateTime, Utc};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use skyview_ephemeris::{BodyKind, Equatorial};
use skyview_targeting::{HuntFrame, LockEvent};
use skyview_view::{RotationSource, ViewState};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedStar {
    /// Catalog index.
    pub index: usize,
    pub id: u32,
    /// Display name for the configured language.
    pub name: String,
    pub magnitude: f64,
    pub point: DVec2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedBody {
    pub kind: BodyKind,
    pub equatorial: Equatorial,
    /// `None` beyond the clip angle.
    pub point: Option<DVec2>,
}

/// A constellation segment whose endpoints both project.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: DVec2,
    pub to: DVec2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickedStar {
    pub index: usize,
    pub id: u32,
    pub name: String,
    pub click: DVec2,
    pub point: DVec2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub time: DateTime<Utc>,
    pub view: ViewState,
    pub source: RotationSource,
    /// Stars that project, in catalog order.
    pub stars: Vec<ProjectedStar>,
    pub bodies: Vec<ProjectedBody>,
    pub lines: Vec<LineSegment>,
    /// Result of each click this frame, `None` for clicks on empty sky.
    pub picks: Vec<Option<PickedStar>>,
    pub hunt: Option<HuntFrame>,
    /// Confirmed lock transitions, including those from a hunt ending.
    pub events: Vec<LockEvent>,
}
