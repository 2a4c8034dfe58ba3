//! Pointer gestures on the minimap.

use crate::geometry::{self, MinimapMetrics, SliderGeometry, SliderState};

/// Pointer input in host coordinates (same vertical axis as
/// [`crate::MinimapSurface::top`])
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { y: f64 },
    Move { y: f64 },
    Up,
}

/// Active press-and-drag.
///
/// Holds no pointer history: every move is resolved to an absolute target
/// from the pointer position and the state captured at the press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Whether the press landed on the slider rather than beside it
    pub grabbed_slider: bool,
    /// Pointer position relative to the slider top once the press settled
    pub grab_offset: f64,
    /// Proxy offset when the press happened
    pub translate_y: f64,
}

impl DragSession {
    /// Scroll fraction for a pointer at minimap-relative `click_y`.
    ///
    /// The slider keeps its grabbed point under the pointer. When the slider
    /// has no room to travel the pointer maps through the proxy offset
    /// captured at the press.
    pub fn target_percent(
        &self,
        click_y: f64,
        current: &SliderGeometry,
        minimap: &MinimapMetrics,
    ) -> Option<f64> {
        geometry::slider_percent(click_y - self.grab_offset, current.track_max)
            .or_else(|| geometry::pointer_percent(click_y, minimap, self.translate_y))
    }
}

/// What a press on the minimap does before the drag starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Pressed on the slider: no jump, just start dragging
    Grab,
    /// Pressed beside the slider: jump to the click, then drag
    Teleport,
}

/// Classify a press at minimap-relative `click_y`
pub fn press_outcome(click_y: f64, slider: Option<&SliderState>) -> PressOutcome {
    match slider {
        Some(slider) if slider.contains(click_y) => PressOutcome::Grab,
        _ => PressOutcome::Teleport,
    }
}
