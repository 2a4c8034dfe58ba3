use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use minimap_core::{AppConfig, Document};
use minimap_tui::{
    app::{App, StatusMessage},
    event::{AppEvent, EventHandler, ReloadResult},
    input::handle_key_event,
    widgets::{ContentWidget, MinimapWidget, StatusBarWidget},
};

type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run(config: AppConfig, file: PathBuf, watch: bool) -> Result<()> {
    let document = Document::load(&file).await?;
    let title = format!("minimap - {}", document.name());

    // Create channel for background reloads
    let (reload_tx, reload_rx) = mpsc::unbounded_channel::<ReloadResult>();
    let watcher = if watch {
        let debounce = Duration::from_millis(config.minimap.watch_debounce_ms);
        spawn_watcher(&file, debounce, reload_tx)
    } else {
        None
    };

    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let mut app = App::new(config, Arc::new(document));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &event_handler, reload_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    drop(watcher);
    result
}

fn event_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    event_handler: &EventHandler,
    mut reload_rx: mpsc::UnboundedReceiver<ReloadResult>,
) -> Result<()> {
    loop {
        // Process any completed reloads (non-blocking)
        while let Ok(result) = reload_rx.try_recv() {
            handle_reload(app, result);
        }

        // Draw UI
        terminal.draw(|frame| {
            let layout = app.layout(frame.area());
            app.apply_layout(&layout);

            ContentWidget::render(frame, layout.content, app);
            if let Some(area) = layout.minimap {
                MinimapWidget::render(frame, area, app);
            }
            StatusBarWidget::render(frame, layout.status, app);
        })?;

        match event_handler.next()? {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app);
                app.handle_action(action);
            }
            Some(AppEvent::Mouse(mouse)) => app.handle_mouse(mouse),
            Some(AppEvent::Resize(width, height)) => {
                tracing::debug!(width, height, "terminal resized");
                app.on_resize();
            }
            Some(AppEvent::Tick) | None => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_reload(app: &mut App, result: ReloadResult) {
    match result {
        ReloadResult::Changed(document) => {
            tracing::info!(
                path = ?document.source(),
                lines = document.line_count(),
                "reloaded file"
            );
            app.set_document(document);
            app.status_message = None;
        }
        ReloadResult::Failure { error } => {
            tracing::warn!(%error, "failed to reload file");
            app.status_message = Some(StatusMessage::Warning(format!(
                " reload failed: {}",
                error
            )));
        }
    }
}

/// Start watching `path` and a task that reloads it on change.
///
/// Live reload is skipped with a warning when the platform watcher cannot
/// be created. The returned watcher must be kept alive while reloads are
/// wanted; dropping it also ends the reload task.
fn spawn_watcher(
    path: &Path,
    debounce: Duration,
    reload_tx: mpsc::UnboundedSender<ReloadResult>,
) -> Option<RecommendedWatcher> {
    let (change_tx, change_rx) = mpsc::unbounded_channel();
    match start_watching(path, change_tx) {
        Ok(watcher) => {
            tokio::spawn(reload_on_change(
                path.to_path_buf(),
                debounce,
                change_rx,
                reload_tx,
            ));
            Some(watcher)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot watch file, live reload disabled");
            None
        }
    }
}

/// Watch the directory holding `path` and signal changes to the file.
///
/// The parent directory is watched, so a file replaced by rename is still
/// seen.
fn start_watching(path: &Path, tx: mpsc::UnboundedSender<()>) -> notify::Result<RecommendedWatcher> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path.file_name().map(OsStr::to_os_string);

    let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| {
        let Ok(event) = event else { return };
        if touches_file(&event, file_name.as_deref()) {
            let _ = tx.send(());
        }
    })?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    tracing::debug!(dir = %dir.display(), "watching for changes");
    Ok(watcher)
}

fn touches_file(event: &Event, file_name: Option<&OsStr>) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|p| p.file_name() == file_name)
}

/// Reload `path` after each burst of change signals.
/// Stops once the watcher or the receiving side is gone.
async fn reload_on_change(
    path: PathBuf,
    debounce: Duration,
    mut changes: mpsc::UnboundedReceiver<()>,
    tx: mpsc::UnboundedSender<ReloadResult>,
) {
    while changes.recv().await.is_some() {
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }
        // Collapse everything that arrived during the quiet period
        while changes.try_recv().is_ok() {}

        let result = match Document::load(&path).await {
            Ok(document) => ReloadResult::Changed(document),
            Err(e) => ReloadResult::Failure {
                error: e.to_string(),
            },
        };
        if tx.send(result).is_err() {
            break;
        }
    }
    tracing::debug!(path = %path.display(), "file watcher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    fn changed_lines(result: ReloadResult) -> usize {
        match result {
            ReloadResult::Changed(doc) => doc.line_count(),
            ReloadResult::Failure { error } => panic!("unexpected failure: {}", error),
        }
    }

    #[test]
    fn test_touches_file() {
        let name = Some(OsStr::new("main.rs"));
        let modify = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/src/main.rs"));
        assert!(touches_file(&modify, name));

        let create = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/src/main.rs"));
        assert!(touches_file(&create, name));

        let sibling = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/src/lib.rs"));
        assert!(!touches_file(&sibling, name));

        let read = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/src/main.rs"));
        assert!(!touches_file(&read, name));
    }

    #[tokio::test]
    async fn test_burst_of_changes_reloads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.txt");
        std::fs::write(&path, "one\n").unwrap();

        let (change_tx, change_rx) = mpsc::unbounded_channel();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(reload_on_change(
            path.clone(),
            Duration::from_millis(20),
            change_rx,
            tx,
        ));

        // Two writes inside the same instant are both picked up
        std::fs::write(&path, "one\ntwo\n").unwrap();
        change_tx.send(()).unwrap();
        std::fs::write(&path, "one\ntwo\nthree\n").unwrap();
        change_tx.send(()).unwrap();

        let result = rx.recv().await.unwrap();
        assert_eq!(changed_lines(result), 3);

        drop(change_tx);
        handle.await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reload_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");

        let (change_tx, change_rx) = mpsc::unbounded_channel();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(reload_on_change(path, Duration::ZERO, change_rx, tx));
        change_tx.send(()).unwrap();

        match rx.recv().await.unwrap() {
            ReloadResult::Failure { error } => assert!(!error.is_empty()),
            ReloadResult::Changed(_) => panic!("missing file reloaded"),
        }
    }

    #[tokio::test]
    async fn test_watcher_reports_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.txt");
        std::fs::write(&path, "one\n").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let watcher = spawn_watcher(&path, Duration::from_millis(10), tx).unwrap();

        std::fs::write(&path, "one\ntwo\n").unwrap();
        let result = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(changed_lines(result), 2);

        drop(watcher);
    }
}
