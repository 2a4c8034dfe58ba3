pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod observe;
pub mod sync;

pub use config::{AppConfig, MinimapConfig};
pub use document::Document;
pub use error::{Error, Result};
pub use geometry::{ContainerMetrics, MinimapMetrics, Regime, SliderGeometry, SliderState};
pub use interaction::PointerEvent;
pub use observe::{PollingSizeObserver, SizeObserver, Topic};
pub use sync::{MinimapSurface, ScrollContainer, ScrollSyncMinimap, SyncEvent};
