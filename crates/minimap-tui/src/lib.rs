pub mod app;
pub mod content_view;
pub mod event;
pub mod input;
pub mod minimap_pane;
pub mod theme;
pub mod widgets;

pub use app::{App, StatusMessage};
pub use theme::Theme;
