//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod glow;
pub mod page;
pub mod styles;
pub mod wrap;

pub use glow::{GlowLayer, GlowOverlay};
pub use page::{render_page, RenderedPage};
pub use styles::{ColorConfig, PageStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{KeyAction, PointerPosition};
use crate::pointer::CursorScale;
use crate::schedule::{Clock, SystemClock};
use crate::state::PageState;
use constants::{CURSOR_BASELINE, CURSOR_HOVER, CURSOR_PRESSED, IDLE_TIMEOUT, WHEEL_STEP};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    Terminal,
};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: PageState,
    clock: Box<dyn Clock>,
    key_bindings: KeyBindings,
    styles: PageStyles,
    /// Input or resize happened since the last draw
    dirty: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture,
    /// then mounts the page on a fresh system clock.
    pub fn new(config: &ResolvedConfig, colors: ColorConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::assemble(
            terminal,
            config,
            Box::new(SystemClock::new()),
            PageStyles::with_color_config(colors),
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Esc or Ctrl+C).
    /// Sleeps in `event::poll` until input arrives or the earliest task wake
    /// (frame tick or timed deadline) is due. With every task finished or
    /// waiting on a frame nobody asked for, the loop idles.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let now = self.clock.now();
            if self.state.tick(now) {
                self.dirty = true;
            }
            if self.dirty {
                self.draw()?;
            }

            let timeout = self.state.next_timeout(self.clock.now(), IDLE_TIMEOUT);
            if !event::poll(timeout)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    fn assemble(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        clock: Box<dyn Clock>,
        styles: PageStyles,
    ) -> Self {
        let mut state = PageState::mount(config, clock.now());
        if let Ok(size) = terminal.size() {
            state.resize(size.width, size.height);
        }
        Self {
            terminal,
            state,
            clock,
            key_bindings: KeyBindings::default(),
            styles,
            dirty: true,
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        let page = i32::from(self.state.viewport().1.saturating_sub(2).max(1));
        let moved = match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollUp => self.state.scroll_by(-1),
            KeyAction::ScrollDown => self.state.scroll_by(1),
            KeyAction::PageUp => self.state.scroll_by(-page),
            KeyAction::PageDown => self.state.scroll_by(page),
            KeyAction::ScrollToTop => self.state.scroll_to(0),
            KeyAction::ScrollToBottom => self.state.scroll_to(u16::MAX),
        };
        self.dirty |= moved;
        false
    }

    /// Handle a single mouse event
    ///
    /// Moves feed the pointer broadcaster, left button press/release feed the
    /// cursor, and the wheel scrolls the page.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let step = i32::from(WHEEL_STEP);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.state
                    .on_pointer_move(f32::from(mouse.column), f32::from(mouse.row));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.state.on_button(true);
                self.dirty = true;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.state.on_button(false);
                self.dirty = true;
            }
            MouseEventKind::ScrollUp => self.dirty |= self.state.scroll_by(-step),
            MouseEventKind::ScrollDown => self.dirty |= self.state.scroll_by(step),
            _ => {}
        }
    }

    /// Handle a terminal resize event
    ///
    /// The next draw relays the page out at the new width.
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.state.resize(width, height);
        self.dirty = true;
    }

    /// Render the current frame
    ///
    /// Lays the whole page out offscreen, hands the geometry to the page state
    /// (hit map, glow visibility), paints the glow gradients for the published
    /// pointer and copies the scrolled window to the terminal.
    fn draw(&mut self) -> Result<(), TuiError> {
        self.dirty = false;

        let size = self.terminal.size()?;
        if (size.width, size.height) != self.state.viewport() {
            self.state.resize(size.width, size.height);
        }

        let mut page = render_page(&self.state, size.width, &self.styles);
        self.state.apply_layout(&page);

        let pointer = self.state.pointer_on_page();
        for (slot, region) in &page.glow_regions {
            self.state.glow(*slot).paint(
                &mut page.buffer,
                *region,
                pointer,
                self.state.glow_radius(),
                &self.styles,
            );
        }

        let scroll = self.state.scroll();
        let cursor = self.state.show_cursor().then(|| CursorIndicator {
            position: self.state.cursor().position(),
            scale: self.state.cursor().scale(),
            style: self.styles.cursor,
        });

        self.terminal.draw(|frame| {
            let area = frame.area();
            blit(&page, scroll, frame.buffer_mut(), area);
            if let Some(cursor) = cursor {
                frame.render_widget(cursor, area);
            }
        })?;

        Ok(())
    }
}

/// Copy the window `[scroll, scroll + area.height)` of the page into `target`.
fn blit(page: &RenderedPage, scroll: u16, target: &mut Buffer, area: Rect) {
    for row in 0..area.height {
        let page_y = scroll.saturating_add(row);
        if page_y >= page.height {
            break;
        }
        for x in 0..page.buffer.area.width {
            let screen_x = page.left.saturating_add(x);
            if screen_x >= area.width {
                break;
            }
            let (Some(src), Some(dst)) = (
                page.buffer.cell((x, page_y)),
                target.cell_mut((area.x + screen_x, area.y + row)),
            ) else {
                continue;
            };
            *dst = src.clone();
        }
    }
}

/// Cursor-following indicator, drawn last at the published pointer cell.
#[derive(Debug, Clone, Copy)]
struct CursorIndicator {
    position: PointerPosition,
    scale: CursorScale,
    style: Style,
}

impl CursorIndicator {
    fn glyph(self) -> &'static str {
        match self.scale {
            CursorScale::Pressed => CURSOR_PRESSED,
            CursorScale::Baseline => CURSOR_BASELINE,
            CursorScale::Hover => CURSOR_HOVER,
        }
    }
}

impl Widget for CursorIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((x, y)) = self.position.cell() else {
            return;
        };
        if x >= area.width || y >= area.height {
            return;
        }
        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(self.glyph()).set_style(self.style);
        }
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing and benchmarking within the crate.
// They are gated with cfg to ensure they're not accessible from outside the crate.
//
// DO NOT use these in production code.

#[cfg(any(test, feature = "bench-internals"))]
#[allow(dead_code)] // Not all helpers used in every context (tests vs benchmarks)
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Takes the terminal and clock directly so tests can drive time by hand.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        clock: Box<dyn Clock>,
        colors: ColorConfig,
    ) -> Self {
        Self::assemble(terminal, config, clock, PageStyles::with_color_config(colors))
    }

    /// Get reference to page state (test-only accessor)
    pub(crate) fn state(&self) -> &PageState {
        &self.state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event (test-only accessor)
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Handle a resize event (test-only accessor)
    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height)
    }

    /// One pass of the event loop without input (test-only accessor)
    ///
    /// Resumes due tasks at the clock's current time and redraws if anything
    /// changed. Returns whether a draw happened.
    pub(crate) fn step_test(&mut self) -> Result<bool, TuiError> {
        if self.state.tick(self.clock.now()) {
            self.dirty = true;
        }
        if !self.dirty {
            return Ok(false);
        }
        self.draw()?;
        Ok(true)
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Tear the page down the way the shell does on exit (test-only accessor)
    pub(crate) fn unmount_test(&mut self) {
        self.state.unmount();
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

// ===== Benchmark Helpers =====
//
// Public wrappers for benchmarks when bench-internals feature is enabled.
// These delegate to the pub(crate) test helpers above.

#[cfg(feature = "bench-internals")]
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create TuiApp for benchmarking (benchmark-only constructor)
    pub fn new_for_bench(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self::new_for_test(terminal, config, clock, ColorConfig::new(true))
    }

    /// Handle a single mouse event (benchmark-only accessor)
    pub fn handle_mouse_bench(&mut self, mouse: MouseEvent) {
        self.handle_mouse_test(mouse)
    }

    /// One event loop pass (benchmark-only accessor)
    pub fn step_bench(&mut self) -> Result<bool, TuiError> {
        self.step_test()
    }

    /// Render a single frame (benchmark-only accessor)
    pub fn render_bench(&mut self) -> Result<(), TuiError> {
        self.render_test()
    }
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit: every task is
/// unmounted before the terminal is restored.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(config: &ResolvedConfig, colors: ColorConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config, colors)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    app.state.unmount();
    info!("page unmounted");

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
