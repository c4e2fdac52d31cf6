use std::time::Duration;

use chrono::{DateTime, Utc};
use glam::DVec2;
use skyview_catalog::{Catalog, Lang};
use skyview_ephemeris::{BodyKind, Equatorial, ObserverLocation};
use skyview_targeting::{Hunt, LockEvent, TargetId, pick_nearest};
use skyview_view::{RotationSource, SourceChange, ViewController, ViewInput, ViewState, Viewport, project};
use tracing::debug;

use crate::frame::{FrameOutput, LineSegment, PickedStar, ProjectedBody, ProjectedStar};
use crate::settings::EngineSettings;

/// Host events, queued until the next [`SkyEngine::frame`].
#[derive(Clone, Debug, PartialEq)]
pub enum EngineInput {
    View(ViewInput),
    /// Resolve the star under this screen point once the view is updated.
    Click(DVec2),
    Resize(Viewport),
    SetLang(Lang),
}

impl From<ViewInput> for EngineInput {
    fn from(input: ViewInput) -> Self {
        EngineInput::View(input)
    }
}

/// Owns the catalog, view controller, and hunt session.
pub struct SkyEngine {
    catalog: Catalog,
    controller: ViewController,
    settings: EngineSettings,
    time: DateTime<Utc>,
    location: ObserverLocation,
    hunt: Option<Hunt>,
    queue: Vec<EngineInput>,
    events: Vec<LockEvent>,
}

impl SkyEngine {
    pub fn new(
        catalog: Catalog,
        settings: EngineSettings,
        time: DateTime<Utc>,
        location: ObserverLocation,
    ) -> Self {
        let mut controller = ViewController::new(settings.initial_view(), settings.view);
        controller.apply(ViewInput::SetSensorMode(settings.sensor_mode));
        controller.sync_to_observer(time, location);
        Self {
            catalog,
            controller,
            settings,
            time,
            location,
            hunt: None,
            queue: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn viewport(&self) -> &Viewport {
        &self.settings.viewport
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn location(&self) -> ObserverLocation {
        self.location
    }

    pub fn hunt(&self) -> Option<&Hunt> {
        self.hunt.as_ref()
    }

    /// Queues an input for the next frame.
    pub fn push(&mut self, input: impl Into<EngineInput>) {
        self.queue.push(input.into());
    }

    /// Queues a new observation time and place.
    pub fn observe(&mut self, time: DateTime<Utc>, location: ObserverLocation) {
        self.push(ViewInput::Observe { time, location });
    }

    /// Starts hunting `target`, ending any hunt already running.
    pub fn start_hunt(&mut self, target: TargetId) {
        self.stop_hunt();
        self.hunt = Some(Hunt::new(target, &self.settings.targeting));
    }

    /// Ends the current hunt. A confirmed lock is reported as an unlock in
    /// the next frame.
    pub fn stop_hunt(&mut self) {
        if let Some(hunt) = self.hunt.take()
            && let Some(event) = hunt.stop()
        {
            self.events.push(event);
        }
    }

    /// Runs one frame: applies every queued input, then projects.
    pub fn frame(&mut self, dt: Duration) -> FrameOutput {
        let clicks = self.apply_queue();

        let view = *self.controller.state();
        let viewport = self.settings.viewport;
        let lang = self.settings.lang;

        let star_points: Vec<Option<DVec2>> = self
            .catalog
            .stars()
            .iter()
            .map(|star| {
                let eq = Equatorial::new(star.ra_hours, star.dec_deg);
                project(eq.longitude_deg(), eq.latitude_deg(), &view, &viewport)
            })
            .collect();

        let stars: Vec<ProjectedStar> = self
            .catalog
            .stars()
            .iter()
            .zip(&star_points)
            .enumerate()
            .filter_map(|(index, (star, point))| {
                point.map(|point| ProjectedStar {
                    index,
                    id: star.id,
                    name: star.display_name(lang).to_string(),
                    magnitude: star.magnitude,
                    point,
                })
            })
            .collect();

        let lines = self
            .catalog
            .lines()
            .iter()
            .filter_map(|line| {
                let from = star_points.get(line.from).copied().flatten()?;
                let to = star_points.get(line.to).copied().flatten()?;
                Some(LineSegment { from, to })
            })
            .collect();

        let bodies = BodyKind::ALL
            .iter()
            .map(|&kind| {
                let equatorial = kind.position(self.time);
                ProjectedBody {
                    kind,
                    equatorial,
                    point: project(
                        equatorial.longitude_deg(),
                        equatorial.latitude_deg(),
                        &view,
                        &viewport,
                    ),
                }
            })
            .collect();

        let picks = clicks
            .into_iter()
            .map(|click| {
                let candidates = stars.iter().map(|s| (s.index, s.point, s.magnitude));
                pick_nearest(candidates, click, &self.settings.picking).and_then(|pick| {
                    let star = self.catalog.star(pick.index)?;
                    debug!(star = %star.name, x = click.x, y = click.y, "star picked");
                    Some(PickedStar {
                        index: pick.index,
                        id: star.id,
                        name: star.display_name(lang).to_string(),
                        click,
                        point: pick.point,
                    })
                })
            })
            .collect();

        let hunt = self
            .hunt
            .as_mut()
            .map(|hunt| hunt.update(&self.catalog, self.time, &view, &viewport, dt));
        if let Some(event) = hunt.as_ref().and_then(|h| h.event.clone()) {
            self.events.push(event);
        }

        FrameOutput {
            time: self.time,
            view,
            source: self.controller.source(),
            stars,
            bodies,
            lines,
            picks,
            hunt,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Applies the queue in arrival order and returns the clicks to resolve.
    fn apply_queue(&mut self) -> Vec<DVec2> {
        let mut clicks = Vec::new();
        for input in std::mem::take(&mut self.queue) {
            match input {
                EngineInput::View(view_input) => {
                    if let ViewInput::Observe { time, location } = view_input {
                        self.time = time;
                        self.location = location;
                    }
                    let Some(change) = self.controller.apply(view_input) else {
                        continue;
                    };
                    if let Some(hunt) = self.hunt.as_mut() {
                        hunt.cancel_pending();
                    }
                    // Leaving sensor mode hands rotation back to the clock.
                    if change
                        == (SourceChange {
                            from: RotationSource::Sensor,
                            to: RotationSource::Observer,
                        })
                    {
                        self.controller.sync_to_observer(self.time, self.location);
                    }
                }
                EngineInput::Click(point) => clicks.push(point),
                EngineInput::Resize(viewport) => self.settings.viewport = viewport,
                EngineInput::SetLang(lang) => self.settings.lang = lang,
            }
        }
        clicks
    }
}
