use crate::{
    animation::reveal::Reveal,
    animation::style::TrackSet,
    effects::tilt::CardTilt,
    effects::typewriter::Typewriter,
    foundation::core::{Point, ScrollObservation},
    foundation::error::MotionResult,
    foundation::rng::{RandomSource, Rng64},
    nav::bubble::BubbleIndicator,
    nav::header::HeaderTracker,
    nav::tracker::NavTracker,
    runtime::hub::ScrollHub,
    runtime::scheduler::Scheduler,
    scatter::choreographer::ScatterChoreographer,
    scroll::geometry::GeometrySource,
    scroll::sampler::ProgressSampler,
    scroll::viewport::InViewTracker,
    stage::config::{PageConfig, RevealBinding},
    stage::frame::{
        FrameOutput, HeaderFrame, HostEvent, NavFrame, RevealFrame, SectionFrame, TiltFrame,
        TypewriterFrame,
    },
};

#[derive(Debug)]
struct Section {
    id: String,
    sampler: ProgressSampler,
    tracks: TrackSet,
}

#[derive(Debug)]
struct RevealState {
    target: String,
    reveals: Vec<Reveal>,
    view: InViewTracker,
    triggered_ms: Option<f64>,
}

impl RevealState {
    fn new(binding: &RevealBinding) -> Self {
        Self {
            target: binding.target.clone(),
            reveals: binding.reveals(),
            view: InViewTracker::new(binding.in_view),
            triggered_ms: None,
        }
    }
}

#[derive(Debug)]
struct Navigation {
    tracker: NavTracker,
    bubble: BubbleIndicator,
}

impl Navigation {
    fn retarget(&mut self, scheduler: &Scheduler) {
        let item = self
            .tracker
            .current_target()
            .map(|s| self.tracker.config().item_id(&s.id));
        self.bubble.retarget(item.as_deref(), scheduler);
    }
}

/// Runtime owner of one page: scheduler, scroll hub, random source and every component.
///
/// The host feeds [`HostEvent`]s through [`handle`](Self::handle) and reads computed styles
/// back with [`snapshot`](Self::snapshot).
pub struct Stage {
    scheduler: Scheduler,
    hub: ScrollHub,
    rng: Box<dyn RandomSource>,
    progress: Option<ProgressSampler>,
    sections: Vec<Section>,
    nav: Option<Navigation>,
    header: Option<HeaderTracker>,
    scatter: Option<ScatterChoreographer>,
    reveals: Vec<RevealState>,
    typewriter: Option<Typewriter>,
    tilts: Vec<CardTilt>,
    latest: Option<ScrollObservation>,
    mounted: bool,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("now_ms", &self.scheduler.now_ms())
            .field("sections", &self.sections.len())
            .field("mounted", &self.mounted)
            .field("latest", &self.latest)
            .finish_non_exhaustive()
    }
}

impl Stage {
    pub fn new(config: PageConfig, rng: Box<dyn RandomSource>) -> MotionResult<Self> {
        config.validate()?;

        let progress = config.progress.map(ProgressSampler::new).transpose()?;
        let sections = config
            .sections
            .into_iter()
            .map(|s| {
                Ok(Section {
                    sampler: ProgressSampler::new(s.window)?,
                    id: s.id,
                    tracks: s.tracks,
                })
            })
            .collect::<MotionResult<Vec<_>>>()?;
        let nav = match config.nav {
            Some(nav) => {
                let bubble = BubbleIndicator::new(nav.group.clone());
                Some(Navigation {
                    tracker: NavTracker::new(nav)?,
                    bubble,
                })
            }
            None => None,
        };
        let header = config.header.map(HeaderTracker::new).transpose()?;
        let scatter = config.scatter.map(ScatterChoreographer::new).transpose()?;
        let reveals = config.reveals.iter().map(RevealState::new).collect();
        let typewriter = config.typewriter.map(Typewriter::new).transpose()?;
        let tilts = config.tilt.as_ref().map(|t| t.cards()).unwrap_or_default();

        Ok(Self {
            scheduler: Scheduler::new(),
            hub: ScrollHub::new(),
            rng,
            progress,
            sections,
            nav,
            header,
            scatter,
            reveals,
            typewriter,
            tilts,
            latest: None,
            mounted: false,
        })
    }

    /// Seeded from `config.seed`, or from system entropy when absent.
    pub fn from_config(config: PageConfig) -> MotionResult<Self> {
        let rng = match config.seed {
            Some(seed) => Rng64::new(seed),
            None => Rng64::from_entropy()?,
        };
        Self::new(config, Box::new(rng))
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn hub(&self) -> &ScrollHub {
        &self.hub
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn latest(&self) -> Option<ScrollObservation> {
        self.latest
    }

    pub fn scatter(&self) -> Option<&ScatterChoreographer> {
        self.scatter.as_ref()
    }

    /// Apply one host event.
    #[tracing::instrument(level = "debug", skip(self, geometry))]
    pub fn handle(&mut self, event: &HostEvent, geometry: &dyn GeometrySource) {
        match event {
            HostEvent::Scroll(obs) => self.on_scroll(*obs, geometry),
            HostEvent::PointerEnter { item } => {
                if let Some(nav) = &mut self.nav
                    && nav.tracker.hover_enter(item)
                    && self.mounted
                {
                    nav.retarget(&self.scheduler);
                }
            }
            HostEvent::PointerLeave { item } => {
                if let Some(nav) = &mut self.nav
                    && nav.tracker.hover_leave(item)
                    && self.mounted
                {
                    nav.retarget(&self.scheduler);
                }
                if let Some(tilt) = self.tilts.iter_mut().find(|t| t.target() == item) {
                    tilt.pointer_leave();
                }
            }
            HostEvent::PointerMove { item, x, y } => {
                if self.mounted
                    && let Some(tilt) = self.tilts.iter_mut().find(|t| t.target() == item)
                {
                    tilt.pointer_move(Point::new(*x, *y), geometry);
                }
            }
            HostEvent::Paint => {
                let fired = self.scheduler.paint();
                if let Some(nav) = &mut self.nav {
                    nav.bubble.on_paint(&fired, geometry);
                }
            }
            HostEvent::Tick { now_ms } => self.on_tick(*now_ms),
            HostEvent::Mount => self.mount(geometry),
            HostEvent::Unmount => self.unmount(),
        }
    }

    fn on_scroll(&mut self, obs: ScrollObservation, geometry: &dyn GeometrySource) {
        if let Err(e) = obs.validate() {
            tracing::warn!(error = %e, "ignoring scroll observation");
            return;
        }
        self.latest = Some(obs);
        self.hub.publish(&obs);

        if let Some(nav) = &mut self.nav {
            nav.tracker.refresh_offsets(geometry);
            nav.tracker.on_scroll(obs.raw_offset);
            if self.mounted {
                nav.retarget(&self.scheduler);
            }
        }
        if let Some(header) = &mut self.header {
            header.on_scroll(obs.raw_offset);
        }

        let now = self.scheduler.now_ms();
        for state in &mut self.reveals {
            if state.view.update(&obs, geometry.rect(&state.target)) {
                state.triggered_ms = state.view.is_in_view().then_some(now);
                tracing::debug!(
                    reveal = state.target.as_str(),
                    in_view = state.view.is_in_view(),
                    "reveal trigger changed"
                );
            }
        }

        if self.mounted
            && let Some(tw) = &mut self.typewriter
        {
            tw.observe(&obs, geometry, &self.scheduler);
        }
    }

    fn on_tick(&mut self, now_ms: f64) {
        let fired = self.scheduler.advance_to(now_ms);
        let now = self.scheduler.now_ms();

        if let Some(scatter) = &mut self.scatter
            && scatter.on_timers(&fired, self.rng.as_mut(), &self.hub, now)
            && let Some(obs) = self.latest
        {
            // Bring the fresh subscription up to date with the current position.
            self.hub.publish(&obs);
        }
        if let Some(tw) = &mut self.typewriter {
            tw.on_timers(&fired, &self.scheduler);
        }
        if let Some(scatter) = &mut self.scatter {
            scatter.advance(now);
        }
        for tilt in &mut self.tilts {
            tilt.advance(now);
        }
    }

    fn mount(&mut self, geometry: &dyn GeometrySource) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::debug!("stage mounted");
        if let Some(scatter) = &mut self.scatter {
            scatter.mount(&self.scheduler);
        }
        if let Some(nav) = &mut self.nav {
            nav.retarget(&self.scheduler);
        }
        // Elements already on screen at mount start without waiting for a scroll.
        if let Some(tw) = &mut self.typewriter
            && let Some(obs) = self.latest
        {
            tw.observe(&obs, geometry, &self.scheduler);
        }
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        tracing::debug!("stage unmounted");
        if let Some(scatter) = &mut self.scatter {
            scatter.unmount();
        }
        if let Some(nav) = &mut self.nav {
            nav.bubble.teardown();
        }
        if let Some(tw) = &mut self.typewriter {
            tw.teardown();
        }
        for tilt in &mut self.tilts {
            tilt.reset();
        }
    }

    /// Compute every output for the current state.
    pub fn snapshot(&self, geometry: &dyn GeometrySource) -> FrameOutput {
        let now = self.scheduler.now_ms();
        let sample = |sampler: &ProgressSampler| {
            self.latest
                .map_or(0.0, |obs| sampler.sample(&obs, geometry))
        };

        let sections = self
            .sections
            .iter()
            .map(|s| {
                let progress = sample(&s.sampler);
                SectionFrame {
                    id: s.id.clone(),
                    progress,
                    style: s.tracks.evaluate(progress),
                }
            })
            .collect();

        let nav = self.nav.as_ref().map(|nav| NavFrame {
            active: nav.tracker.active().map(|s| s.id.clone()),
            hovered: nav.tracker.hovered().map(|s| s.id.clone()),
            bubble: nav.bubble.position(),
        });

        let header = self.header.as_ref().map(|h| HeaderFrame {
            hidden: h.is_hidden(),
            at_top: h.is_at_top(),
            style: h.style(),
        });

        let reveals = self
            .reveals
            .iter()
            .map(|state| {
                let elapsed_s = state.triggered_ms.map(|t| (now - t) / 1000.0);
                RevealFrame {
                    target: state.target.clone(),
                    in_view: state.view.is_in_view(),
                    styles: state.reveals.iter().map(|r| r.sample(elapsed_s)).collect(),
                }
            })
            .collect();

        let typewriter = self.typewriter.as_ref().map(|tw| TypewriterFrame {
            snippet: tw.snippet_index(),
            text: tw.text().to_owned(),
            cursor_visible: tw.cursor_visible(),
            phase: tw.phase(),
        });

        let tilts = self
            .tilts
            .iter()
            .map(|tilt| {
                let (rotate_x_deg, rotate_y_deg) = tilt.rotation();
                TiltFrame {
                    target: tilt.target().to_owned(),
                    rotate_x_deg,
                    rotate_y_deg,
                }
            })
            .collect();

        FrameOutput {
            now_ms: now,
            scroll: self.latest,
            page_progress: self.progress.as_ref().map_or(0.0, sample),
            sections,
            nav,
            header,
            glyphs: self
                .scatter
                .as_ref()
                .map(ScatterChoreographer::styles)
                .unwrap_or_default(),
            reveals,
            typewriter,
            tilts,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/driver.rs"]
mod tests;
