//! Minimap geometry: slider size and position, mini-content offset, and the
//! inverse mapping from a pointer position back to a scroll position.
//!
//! Everything here is a pure function of the measured sizes. Three
//! coordinate spaces are involved:
//!
//! - content space: `scroll_top` of the primary container
//! - minimap viewport space: slider position, pointer position
//! - mini-content space: positions inside the (possibly taller) proxy,
//!   offset from the viewport by `translate_y`
//!
//! Which mapping applies depends on [`Regime`].

use serde::{Deserialize, Serialize};

/// Default lower bound for the slider height
pub const MIN_SLIDER_HEIGHT: f64 = 20.0;

/// Scroll state of the primary container
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ContainerMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Furthest the container can scroll, never negative
    #[inline]
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// True when all content is visible without scrolling
    #[inline]
    pub fn fits(&self) -> bool {
        self.scroll_height <= self.client_height
    }

    /// Copy with `scroll_top` clamped into `[0, max_scroll_top]`
    pub fn clamped(self) -> Self {
        Self {
            scroll_top: self.scroll_top.clamp(0.0, self.max_scroll_top()),
            ..self
        }
    }
}

/// Measured sizes of the minimap viewport and the mini-content proxy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MinimapMetrics {
    pub map_height: f64,
    pub mini_content_height: f64,
}

impl MinimapMetrics {
    pub fn new(map_height: f64, mini_content_height: f64) -> Self {
        Self {
            map_height,
            mini_content_height,
        }
    }

    /// Zero (or unmeasurable) sizes mean layout has not happened yet
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.map_height > 0.0 && self.mini_content_height > 0.0
    }

    pub fn regime(&self) -> Regime {
        if self.mini_content_height <= self.map_height {
            Regime::Fit
        } else {
            Regime::Overflow
        }
    }
}

/// Layout regime of the minimap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Mini-content fits inside the minimap viewport. The proxy stays put
    /// and the slider travels across it.
    Fit,
    /// Mini-content is taller than the viewport. The slider is confined to
    /// the viewport while the proxy scrolls underneath it.
    Overflow,
}

/// Viewport indicator overlaid on the minimap
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderState {
    pub top: f64,
    pub height: f64,
}

impl SliderState {
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Bounds are inclusive on both edges
    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        self.top <= y && y <= self.bottom()
    }
}

/// Output of one forward pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderGeometry {
    pub slider: SliderState,
    /// Upward offset of the mini-content proxy, `0` in [`Regime::Fit`]
    pub translate_y: f64,
    pub regime: Regime,
    /// Maximum slider travel in the active regime
    pub track_max: f64,
    /// Clamped scroll percentage the geometry was derived from
    pub percent: f64,
}

impl SliderGeometry {
    /// Point inside the slider that maps back to exactly `percent`.
    ///
    /// At 50% this is the slider's midpoint.
    pub fn anchor_y(&self) -> f64 {
        self.slider.top + self.percent * self.slider.height
    }
}

/// Clamp to `[0, 1]`, treating NaN as `0`
#[inline]
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Scroll position of the container as a fraction of its travel
pub fn scroll_percent(container: &ContainerMetrics) -> f64 {
    let max_scroll_top = container.scroll_height - container.client_height;
    let percent = if max_scroll_top > 0.0 {
        container.scroll_top / max_scroll_top
    } else {
        0.0
    };
    clamp_percent(percent)
}

/// Slider height in mini-content units before regime handling
pub fn slider_height(
    container: &ContainerMetrics,
    minimap: &MinimapMetrics,
    min_slider_height: f64,
) -> f64 {
    if container.fits() {
        return minimap.mini_content_height;
    }
    let raw = (container.client_height / container.scroll_height) * minimap.mini_content_height;
    raw.max(min_slider_height)
}

/// Forward pass: derive the slider and proxy offset from measurements.
///
/// Returns `None` while the minimap is unmeasured; callers keep whatever
/// they computed last.
pub fn compute(
    container: &ContainerMetrics,
    minimap: &MinimapMetrics,
    min_slider_height: f64,
) -> Option<SliderGeometry> {
    if !minimap.is_measured() {
        return None;
    }

    let height = slider_height(container, minimap, min_slider_height);
    let percent = scroll_percent(container);
    let regime = minimap.regime();

    let (top, translate_y, track_max) = match regime {
        Regime::Fit => {
            let max_slider_top = (minimap.mini_content_height - height).max(0.0);
            (percent * max_slider_top, 0.0, max_slider_top)
        }
        Regime::Overflow => {
            let max_slider_move = (minimap.map_height - height).max(0.0);
            let max_content_scroll = minimap.mini_content_height - minimap.map_height;
            (
                percent * max_slider_move,
                percent * max_content_scroll,
                max_slider_move,
            )
        }
    };

    Some(SliderGeometry {
        slider: SliderState { top, height },
        translate_y,
        regime,
        track_max,
        percent,
    })
}

/// Inverse mapping: minimap-relative `click_y` to a scroll fraction.
///
/// `translate_y` must be the offset produced by the last forward pass.
pub fn pointer_percent(click_y: f64, minimap: &MinimapMetrics, translate_y: f64) -> Option<f64> {
    if !minimap.is_measured() {
        return None;
    }

    let y = click_y.clamp(0.0, minimap.map_height);
    let content_y = match minimap.regime() {
        Regime::Fit => y,
        Regime::Overflow => y + translate_y.abs(),
    };
    Some(clamp_percent(content_y / minimap.mini_content_height))
}

/// Scroll position a click at `click_y` should jump the container to
pub fn teleport_target(
    click_y: f64,
    container: &ContainerMetrics,
    minimap: &MinimapMetrics,
    translate_y: f64,
) -> Option<f64> {
    pointer_percent(click_y, minimap, translate_y)
        .map(|percent| percent * container.max_scroll_top())
}

/// Drag mapping: a slider placed at `slider_top` back to a scroll fraction.
///
/// Inverse of the slider placement in [`compute`], so it holds in both
/// regimes. `None` when the slider has no room to travel.
pub fn slider_percent(slider_top: f64, track_max: f64) -> Option<f64> {
    if track_max <= 0.0 || !track_max.is_finite() {
        return None;
    }
    Some(clamp_percent(slider_top / track_max))
}
