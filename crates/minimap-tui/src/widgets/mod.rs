mod content;
mod minimap;
mod status_bar;

pub use content::ContentWidget;
pub use minimap::MinimapWidget;
pub use status_bar::StatusBarWidget;
