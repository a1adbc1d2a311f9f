//! TUI rendering and terminal management (impure shell)
//!
//! Hosts a [`TextView`] on a [`TerminalSurface`]: keys and the wheel scroll
//! the surface, clicks go through the hit tester, and typing edits the row
//! under the cursor.

mod status;

pub use status::{Cursor, StatusInfo, status_line};

use crate::config::ResolvedConfig;
use crate::model::InputError;
use crate::source::{Document, load_document};
use crate::surface::{DrawingSurface, TerminalSurface};
use crate::view_state::{HitTestResult, TextView};
use crossterm::{
    ExecutableCommand,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    widgets::Paragraph,
};
use std::io::{self, Stdout};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input document error
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    view: TextView<TerminalSurface>,
    cursor: Cursor,
    scroll_lines: u16,
    message: Option<String>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(view: TextView<TerminalSurface>, scroll_lines: u16) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(terminal, view, scroll_lines))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (Esc or Ctrl+C). Redraws only after input.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                }
                _ => continue,
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an already initialized terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        view: TextView<TerminalSurface>,
        scroll_lines: u16,
    ) -> Self {
        Self {
            terminal,
            view,
            cursor: Cursor::default(),
            scroll_lines: scroll_lines.max(1),
            message: None,
        }
    }

    /// The hosted view.
    pub fn view(&self) -> &TextView<TerminalSurface> {
        &self.view
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The terminal (tests inspect the backend through this).
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns `true` if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            info!("Quit requested");
            return true;
        }

        let step = i32::from(self.scroll_lines);
        let page = i32::from(self.view.surface().page_rows().max(1));
        match key.code {
            KeyCode::Up => self.view.surface_mut().scroll_cells(0, -step),
            KeyCode::Down => self.view.surface_mut().scroll_cells(0, step),
            KeyCode::Left => self.view.surface_mut().scroll_cells(-step, 0),
            KeyCode::Right => self.view.surface_mut().scroll_cells(step, 0),
            KeyCode::PageUp => self.view.surface_mut().scroll_cells(0, -page),
            KeyCode::PageDown => self.view.surface_mut().scroll_cells(0, page),
            KeyCode::Home => self.view.surface_mut().scroll_to(0.0, 0.0),
            KeyCode::End => self.view.surface_mut().scroll_to(0.0, f32::MAX),
            KeyCode::Char(ch)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Enter => self.split_row(),
            _ => {}
        }

        false
    }

    /// Handle a single mouse event
    ///
    /// Wheel scrolls; left click moves the cursor to the hit-tested position.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let step = i32::from(self.scroll_lines);
        match mouse.kind {
            MouseEventKind::ScrollUp => self.view.surface_mut().scroll_cells(0, -step),
            MouseEventKind::ScrollDown => self.view.surface_mut().scroll_cells(0, step),
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        self.view.sync();
        let Some((x, y)) = self.view.surface().cell_to_pixel(column, row) else {
            return;
        };

        let result = self.view.locate(x, y);
        debug!(column, row, ?result, "Click");
        self.message = match &result {
            HitTestResult::Miss | HitTestResult::Hit { .. } => None,
            HitTestResult::StaleRow { row } => Some(format!("row {} no longer exists", row + 1)),
            HitTestResult::Unmeasurable { error, .. } => Some(error.to_string()),
        };
        if let Some((row, column)) = result.position() {
            self.cursor = Cursor::new(row, column);
        }
    }

    /// Cursor column clamped to its row, or `None` if the row is gone.
    fn clamped_cursor(&self) -> Option<Cursor> {
        let text = self.view.document().row(self.cursor.row)?;
        let column = self.cursor.column.min(text.chars().count());
        Some(Cursor::new(self.cursor.row, column))
    }

    fn insert_char(&mut self, ch: char) {
        let Some(cursor) = self.clamped_cursor() else {
            return;
        };
        if self
            .view
            .document_mut()
            .insert_char(cursor.row, cursor.column, ch)
        {
            self.cursor = Cursor::new(cursor.row, cursor.column + 1);
        }
        self.after_edit();
    }

    fn backspace(&mut self) {
        let Some(cursor) = self.clamped_cursor() else {
            return;
        };
        if let Some((row, column)) = self.view.document_mut().backspace(cursor.row, cursor.column) {
            self.cursor = Cursor::new(row, column);
        }
        self.after_edit();
    }

    fn split_row(&mut self) {
        let Some(cursor) = self.clamped_cursor() else {
            return;
        };
        if self.view.document_mut().split_row(cursor.row, cursor.column) {
            self.cursor = Cursor::new(cursor.row + 1, 0);
        }
        self.after_edit();
    }

    fn after_edit(&mut self) {
        self.message = None;
        self.view.sync();
        self.keep_cursor_visible();
    }

    /// Scroll vertically just enough to show the cursor row.
    fn keep_cursor_visible(&mut self) {
        let cache = self.view.cache();
        if self.cursor.row >= cache.len() {
            return;
        }
        let top = cache.row_top(self.cursor.row);
        let bottom = cache.row_bottom(self.cursor.row);
        let viewport = self.view.surface().viewport();

        if top < viewport.scroll_top {
            self.view.surface_mut().scroll_to(viewport.scroll_left, top);
        } else if bottom > viewport.bottom() {
            self.view
                .surface_mut()
                .scroll_to(viewport.scroll_left, bottom - viewport.height);
        }
    }

    /// Render the current frame
    ///
    /// Folds pending document changes into the layout first.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.view.sync();

        let view = &mut self.view;
        let cursor = self.cursor;
        let message = self.message.as_deref();
        self.terminal.draw(|frame| {
            let [text_area, status_area] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

            view.surface_mut().begin_frame(text_area);
            view.render();
            frame.buffer_mut().merge(view.surface().buffer());

            let info = StatusInfo {
                cursor,
                rows: view.document().len(),
                width: view.cache().document_width(),
                height: view.cache().document_height(),
                message,
            };
            frame.render_widget(Paragraph::new(status_line(&info)), status_area);

            if let Some(position) = cursor_cell(view, cursor) {
                frame.set_cursor_position(position);
            }
        })?;

        Ok(())
    }
}

/// Terminal cell where `cursor` is drawn, if it is on screen.
fn cursor_cell(view: &TextView<TerminalSurface>, cursor: Cursor) -> Option<(u16, u16)> {
    let text = view.document().row(cursor.row)?;
    let cache = view.cache();
    if cursor.row >= cache.len() {
        return None;
    }
    let end = text
        .char_indices()
        .nth(cursor.column)
        .map_or(text.len(), |(at, _)| at);
    let surface = view.surface();
    let x = surface.measure_text(&text[..end], cache.style().text()).ok()?;
    surface.pixel_to_cell(x, cache.row_top(cursor.row))
}

/// Load `file` (or start with an empty document) and run the viewer.
///
/// The document is read before the terminal enters raw mode, so a missing
/// file is reported on a normal screen.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_file(file: Option<&Path>, config: &ResolvedConfig) -> Result<(), TuiError> {
    let document = match file {
        Some(path) => load_document(path)?,
        None => Document::from_text(""),
    };
    run_with_document(document, config)
}

/// Initialize and run the TUI application for `document`
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
pub fn run_with_document(document: Document, config: &ResolvedConfig) -> Result<(), TuiError> {
    let style = config.style();
    let surface = TerminalSurface::new(&style);
    let view = TextView::new(document, style, surface);
    info!(
        rows = view.document().len(),
        font_size = config.font_size,
        line_spacing = config.line_spacing,
        "Starting viewer"
    );

    let mut app = TuiApp::new(view, config.scroll_lines)?;
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
