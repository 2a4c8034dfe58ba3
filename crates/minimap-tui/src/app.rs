use std::sync::Arc;

use minimap_core::{
    AppConfig, Document, MinimapSurface, PointerEvent, PollingSizeObserver, ScrollSyncMinimap,
    SizeObserver, SyncEvent, Topic,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::content_view::ContentView;
use crate::input::{classify_mouse_event, Action, MouseInput};
use crate::minimap_pane::MinimapPane;
use crate::theme::Theme;

/// The minimap component as hosted by the terminal UI
pub type Minimap = ScrollSyncMinimap<ContentView, MinimapPane>;

/// Screen areas for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub content: Rect,
    /// `None` while the minimap is hidden
    pub minimap: Option<Rect>,
    pub status: Rect,
}

/// One-line message shown in place of the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Warning(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Warning(text) => text,
        }
    }
}

/// Application state
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub minimap: Minimap,
    /// Content view while the minimap is hidden and detached from it
    parked_view: Option<ContentView>,
    pub should_quit: bool,
    /// Pending key for multi-key commands (e.g., 'g' for 'gg')
    pub pending_key: Option<char>,
    pub status_message: Option<StatusMessage>,
    content_size: PollingSizeObserver,
    map_size: PollingSizeObserver,
}

impl App {
    pub fn new(config: AppConfig, document: Arc<Document>) -> Self {
        let pane = MinimapPane::new(document.clone());
        let view = ContentView::new(document);
        let mut minimap = Minimap::new(&config.minimap, pane);

        let parked_view = if config.minimap.enabled {
            minimap.attach(view);
            None
        } else {
            Some(view)
        };

        Self {
            config,
            theme: Theme::default(),
            minimap,
            parked_view,
            should_quit: false,
            pending_key: None,
            status_message: None,
            content_size: PollingSizeObserver::new(),
            map_size: PollingSizeObserver::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_text(text: &str) -> Self {
        Self::new(AppConfig::default(), Arc::new(Document::from_text(text)))
    }

    #[inline]
    pub fn minimap_visible(&self) -> bool {
        self.minimap.is_attached()
    }

    /// The content view, wherever it currently lives
    pub fn view(&self) -> Option<&ContentView> {
        self.minimap.container().or(self.parked_view.as_ref())
    }

    fn view_mut(&mut self) -> Option<&mut ContentView> {
        match self.minimap.container_mut() {
            Some(view) => Some(view),
            None => self.parked_view.as_mut(),
        }
    }

    pub fn document(&self) -> &Arc<Document> {
        self.minimap.surface().document()
    }

    /// Split the screen: content on the left, minimap on the right,
    /// status bar along the bottom
    pub fn layout(&self, area: Rect) -> AppLayout {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        if !self.minimap_visible() {
            return AppLayout {
                content: rows[0],
                minimap: None,
                status: rows[1],
            };
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(self.config.minimap.width),
            ])
            .split(rows[0]);

        AppLayout {
            content: columns[0],
            minimap: Some(columns[1]),
            status: rows[1],
        }
    }

    /// Push this frame's layout into the views, notify the minimap of any
    /// size changes and run the pending initial sync.
    pub fn apply_layout(&mut self, layout: &AppLayout) {
        let content_height = layout.content.height;
        if let Some(view) = self.view_mut() {
            view.set_viewport_height(content_height);
        }
        if self.content_size.observe(content_height as f64) {
            self.minimap.handle(SyncEvent::ContainerResize);
        }

        let map_area = layout.minimap.unwrap_or_default();
        self.minimap.surface_mut().set_area(map_area);
        if self.map_size.observe(self.minimap.surface().map_height()) {
            self.minimap.handle(SyncEvent::MinimapResize);
        }

        self.minimap.on_frame();
    }

    /// Terminal resize: both elements may have changed size
    pub fn on_resize(&mut self) {
        self.content_size.reset();
        self.map_size.reset();
    }

    /// Replace the document in both views
    pub fn set_document(&mut self, document: Document) {
        let document = Arc::new(document);
        if let Some(view) = self.view_mut() {
            view.set_document(document.clone());
        }
        self.minimap.surface_mut().set_document(document);
        self.minimap.handle(SyncEvent::ContentChange);
        tracing::debug!(lines = self.document().line_count(), "document replaced");
    }

    fn scroll_by(&mut self, delta: i64) {
        if let Some(view) = self.view_mut() {
            view.scroll_by(delta);
        }
        self.minimap.handle(SyncEvent::ContainerScroll);
    }

    pub fn handle_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        let lines = self.config.ui.scroll_lines.max(1) as i64;
        let half_page = self.view().map(|v| v.half_page()).unwrap_or(1);
        let page = self.view().map(|v| v.page()).unwrap_or(1);

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_by(lines),
            Action::ScrollUp => self.scroll_by(-lines),
            Action::ScrollHalfPageDown => self.scroll_by(half_page),
            Action::ScrollHalfPageUp => self.scroll_by(-half_page),
            Action::ScrollPageDown => self.scroll_by(page),
            Action::ScrollPageUp => self.scroll_by(-page),
            Action::JumpToTop => {
                if let Some(view) = self.view_mut() {
                    view.scroll_to_top();
                }
                self.minimap.handle(SyncEvent::ContainerScroll);
            }
            Action::JumpToBottom => {
                if let Some(view) = self.view_mut() {
                    view.scroll_to_bottom();
                }
                self.minimap.handle(SyncEvent::ContainerScroll);
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::ToggleMinimap => self.toggle_minimap(),
            Action::None => {}
        }
    }

    /// Hide (detach) or show (re-attach) the minimap
    pub fn toggle_minimap(&mut self) {
        if let Some(view) = self.parked_view.take() {
            self.minimap.attach(view);
            self.map_size.reset();
            self.status_message = None;
        } else {
            self.parked_view = self.minimap.detach();
            self.status_message = Some(StatusMessage::Info(
                " minimap hidden (m to show)".to_string(),
            ));
        }
    }

    /// Route a mouse event. Presses only count on the minimap; motion and
    /// release are global while a drag is active.
    pub fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) {
        match classify_mouse_event(mouse) {
            MouseInput::Press { column, row } => {
                if self.minimap.surface().contains(column, row)
                    && self.minimap.listens_to(Topic::PointerDown)
                {
                    let y = MinimapPane::pointer_y(row);
                    self.minimap.handle(SyncEvent::Pointer(PointerEvent::Down { y }));
                }
            }
            MouseInput::Motion { row } => {
                if self.minimap.listens_to(Topic::PointerMove) {
                    let y = MinimapPane::pointer_y(row);
                    self.minimap.handle(SyncEvent::Pointer(PointerEvent::Move { y }));
                }
            }
            MouseInput::Release => {
                if self.minimap.listens_to(Topic::PointerUp) {
                    self.minimap.handle(SyncEvent::Pointer(PointerEvent::Up));
                }
            }
            MouseInput::Wheel(notches) => {
                let lines = self.config.ui.scroll_lines.max(1) as i64;
                self.scroll_by(notches * lines);
            }
            MouseInput::Ignored => {}
        }
    }
}
