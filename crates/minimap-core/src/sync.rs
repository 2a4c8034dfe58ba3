//! The scroll-synchronized minimap component.
//!
//! Ties the geometry engine to a primary container and a minimap surface.
//! Every event re-measures both through their traits, so the component
//! never works from stale sizes; the only state it carries between events
//! is the last geometry (needed for the inverse mapping and for painting)
//! and the drag session.

use tracing::{debug, trace};

use crate::config::MinimapConfig;
use crate::geometry::{
    self, ContainerMetrics, MinimapMetrics, Regime, SliderGeometry, SliderState,
};
use crate::interaction::{press_outcome, DragSession, PointerEvent, PressOutcome};
use crate::observe::{Listeners, Topic};

/// The primary scrollable view
pub trait ScrollContainer {
    /// Fresh snapshot of the container's scroll state
    fn metrics(&self) -> ContainerMetrics;

    /// Scroll the container. Implementations clamp and round as their
    /// coordinate system requires.
    fn set_scroll_top(&mut self, scroll_top: f64);
}

/// The element the minimap is drawn into
pub trait MinimapSurface {
    /// Position of the minimap's top edge in pointer coordinates
    fn top(&self) -> f64;

    /// Height of the visible minimap viewport
    fn map_height(&self) -> f64;

    /// Height of the unscaled mini-content proxy
    fn mini_content_height(&self) -> f64;

    fn metrics(&self) -> MinimapMetrics {
        MinimapMetrics::new(self.map_height(), self.mini_content_height())
    }
}

/// Everything the host can deliver to the component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncEvent {
    ContainerScroll,
    ContainerResize,
    MinimapResize,
    ContentChange,
    Pointer(PointerEvent),
}

impl SyncEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SyncEvent::ContainerScroll => Topic::ContainerScroll,
            SyncEvent::ContainerResize => Topic::ContainerResize,
            SyncEvent::MinimapResize => Topic::MinimapResize,
            SyncEvent::ContentChange => Topic::ContentChange,
            SyncEvent::Pointer(PointerEvent::Down { .. }) => Topic::PointerDown,
            SyncEvent::Pointer(PointerEvent::Move { .. }) => Topic::PointerMove,
            SyncEvent::Pointer(PointerEvent::Up) => Topic::PointerUp,
        }
    }
}

/// Minimap kept in sync with a scrollable container.
///
/// Without an attached container every operation is a no-op.
#[derive(Debug)]
pub struct ScrollSyncMinimap<C, S> {
    min_slider_height: f64,
    surface: S,
    container: Option<C>,
    geometry: Option<SliderGeometry>,
    drag: Option<DragSession>,
    listeners: Listeners,
    initial_sync_pending: bool,
}

impl<C, S> ScrollSyncMinimap<C, S>
where
    C: ScrollContainer,
    S: MinimapSurface,
{
    pub fn new(config: &MinimapConfig, surface: S) -> Self {
        Self::with_min_slider_height(surface, config.min_slider_height)
    }

    pub fn with_min_slider_height(surface: S, min_slider_height: f64) -> Self {
        Self {
            min_slider_height,
            surface,
            container: None,
            geometry: None,
            drag: None,
            listeners: Listeners::new(),
            initial_sync_pending: false,
        }
    }

    /// Attach a container, replacing (and returning) any previous one.
    ///
    /// Geometry is established by the next [`Self::on_frame`].
    pub fn attach(&mut self, container: C) -> Option<C> {
        let previous = self.detach();
        self.container = Some(container);
        self.listeners.register_all(&Topic::ATTACHED);
        self.initial_sync_pending = true;
        debug!("minimap attached to container");
        previous
    }

    /// Detach the container, ending any drag and dropping every listener
    pub fn detach(&mut self) -> Option<C> {
        if self.drag.take().is_some() {
            debug!("drag session ended by detach");
        }
        self.listeners.clear();
        self.initial_sync_pending = false;
        let container = self.container.take();
        if container.is_some() {
            debug!("minimap detached from container");
        }
        container
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.container.is_some()
    }

    /// Call once per frame after layout. Runs the initial synchronization
    /// until it succeeds (sizes may still be zero on the very first frame).
    pub fn on_frame(&mut self) {
        if self.initial_sync_pending && self.sync() {
            self.initial_sync_pending = false;
            trace!("initial minimap sync done");
        }
    }

    /// Deliver a host event. Returns `true` if the event was acted on.
    pub fn handle(&mut self, event: SyncEvent) -> bool {
        if !self.listeners.is_registered(event.topic()) {
            trace!(?event, "no listener registered, event dropped");
            return false;
        }

        match event {
            SyncEvent::ContainerScroll
            | SyncEvent::ContainerResize
            | SyncEvent::MinimapResize
            | SyncEvent::ContentChange => self.sync(),
            SyncEvent::Pointer(PointerEvent::Down { y }) => self.pointer_down(y),
            SyncEvent::Pointer(PointerEvent::Move { y }) => self.pointer_move(y),
            SyncEvent::Pointer(PointerEvent::Up) => self.pointer_up(),
        }
    }

    /// Re-measure and recompute. Returns `false` if nothing was updated,
    /// in which case the previous geometry is kept.
    pub fn sync(&mut self) -> bool {
        let Some(container) = self.container.as_ref() else {
            return false;
        };

        let metrics = container.metrics().clamped();
        let minimap = self.surface.metrics();
        let Some(next) = geometry::compute(&metrics, &minimap, self.min_slider_height) else {
            trace!(?minimap, "minimap unmeasured, keeping previous geometry");
            return false;
        };

        if self.geometry.map(|g| g.regime) != Some(next.regime) {
            debug!(regime = ?next.regime, ?minimap, "minimap regime changed");
        }
        trace!(
            slider_top = next.slider.top,
            slider_height = next.slider.height,
            translate_y = next.translate_y,
            "minimap synced"
        );
        self.geometry = Some(next);
        true
    }

    /// Jump the container to the position under `pointer_y`.
    ///
    /// Returns the scroll position that was requested.
    pub fn teleport(&mut self, pointer_y: f64) -> Option<f64> {
        if self.geometry.is_none() {
            self.sync();
        }
        let translate_y = self.geometry?.translate_y;
        let click_y = pointer_y - self.surface.top();
        let minimap = self.surface.metrics();
        let percent = geometry::pointer_percent(click_y, &minimap, translate_y)?;
        trace!(click_y, percent, "teleport");
        self.scroll_to_percent(percent)
    }

    /// Write `percent` of the scroll range to the container and re-sync
    fn scroll_to_percent(&mut self, percent: f64) -> Option<f64> {
        let container = self.container.as_mut()?;
        let target = percent * container.metrics().max_scroll_top();
        container.set_scroll_top(target);

        // The scroll write is itself a scroll event
        self.sync();
        Some(target)
    }

    fn pointer_down(&mut self, pointer_y: f64) -> bool {
        if !self.is_attached() {
            return false;
        }
        if self.geometry.is_none() {
            self.sync();
        }

        let click_y = pointer_y - self.surface.top();
        let translate_y = self.translate_y();
        let outcome = press_outcome(click_y, self.geometry.as_ref().map(|g| &g.slider));
        if outcome == PressOutcome::Teleport {
            self.teleport(pointer_y);
        }

        let session = DragSession {
            grabbed_slider: outcome == PressOutcome::Grab,
            grab_offset: click_y - self.slider().top,
            translate_y,
        };
        self.drag = Some(session);
        self.listeners.register_all(&Topic::DRAG);
        debug!(?outcome, click_y, grab_offset = session.grab_offset, "drag session started");
        true
    }

    fn pointer_move(&mut self, pointer_y: f64) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        let Some(geometry) = self.geometry else {
            return false;
        };

        let click_y = pointer_y - self.surface.top();
        let minimap = self.surface.metrics();
        let Some(percent) = session.target_percent(click_y, &geometry, &minimap) else {
            return false;
        };
        trace!(click_y, percent, "drag");
        self.scroll_to_percent(percent).is_some()
    }

    fn pointer_up(&mut self) -> bool {
        self.listeners.deregister_all(&Topic::DRAG);
        match self.drag.take() {
            Some(session) => {
                debug!(grabbed_slider = session.grabbed_slider, "drag session ended");
                true
            }
            None => false,
        }
    }

    /// Last computed geometry, if layout has happened
    pub fn geometry(&self) -> Option<&SliderGeometry> {
        self.geometry.as_ref()
    }

    /// Slider overlay state; zero-sized before the first successful sync
    pub fn slider(&self) -> SliderState {
        self.geometry.map(|g| g.slider).unwrap_or_default()
    }

    /// Offset applied to the mini-content proxy
    pub fn translate_y(&self) -> f64 {
        self.geometry.map(|g| g.translate_y).unwrap_or(0.0)
    }

    /// Maximum slider travel in the active regime
    pub fn track_max(&self) -> f64 {
        self.geometry.map(|g| g.track_max).unwrap_or(0.0)
    }

    pub fn regime(&self) -> Option<Regime> {
        self.geometry.map(|g| g.regime)
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Whether the host should currently route events for `topic`
    pub fn listens_to(&self, topic: Topic) -> bool {
        self.listeners.is_registered(topic)
    }

    pub fn min_slider_height(&self) -> f64 {
        self.min_slider_height
    }

    pub fn set_min_slider_height(&mut self, min_slider_height: f64) {
        self.min_slider_height = min_slider_height;
        self.sync();
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    /// Mutable access to the container. Callers that scroll or resize it
    /// must follow up with the matching [`SyncEvent`].
    pub fn container_mut(&mut self) -> Option<&mut C> {
        self.container.as_mut()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface. Callers that resize it must follow
    /// up with [`SyncEvent::MinimapResize`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
