//! Page state: the mounted animation tasks plus scroll and interaction state.
//!
//! Input handlers are plain methods that mutate the state; the host loop calls
//! [`PageState::tick`] on frame ticks and deadlines and redraws when it reports
//! a change.

use crate::anim::{ScrambleText, SequentialReveal, TypingSimulation};
use crate::config::ResolvedConfig;
use crate::model::{PageContent, PointerPosition};
use crate::pointer::{pointer_channel, CursorState, HitMap, PointerBroadcaster, PointerReader};
use crate::schedule::{next_timeout, FrameTicker, Task};
use crate::view::glow::GlowOverlay;
use crate::view::page::RenderedPage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::debug;

/// The glow text instances on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlowSlot {
    /// Second line of the hero title.
    HeroTagline,
    /// Intro section title.
    IntroTitle,
    /// Features section title.
    FeaturesTitle,
    /// Tech section title.
    TechTitle,
}

impl GlowSlot {
    /// Every slot, in page order.
    pub const ALL: [GlowSlot; 4] = [
        GlowSlot::HeroTagline,
        GlowSlot::IntroTitle,
        GlowSlot::FeaturesTitle,
        GlowSlot::TechTitle,
    ];

    fn index(self) -> usize {
        match self {
            GlowSlot::HeroTagline => 0,
            GlowSlot::IntroTitle => 1,
            GlowSlot::FeaturesTitle => 2,
            GlowSlot::TechTitle => 3,
        }
    }

    /// Text of this slot in `content`.
    pub fn text(self, content: &PageContent) -> &str {
        match self {
            GlowSlot::HeroTagline => &content.hero_tagline,
            GlowSlot::IntroTitle => &content.intro_title,
            GlowSlot::FeaturesTitle => &content.features_title,
            GlowSlot::TechTitle => &content.tech_title,
        }
    }
}

/// Everything mounted for one page view.
#[derive(Debug)]
pub struct PageState {
    content: PageContent,
    broadcaster: Task<PointerBroadcaster>,
    pointer: PointerReader,
    cursor: CursorState,
    scramble: Task<ScrambleText>,
    sequential: Task<SequentialReveal>,
    typing: Task<TypingSimulation>,
    glows: Vec<GlowOverlay>,
    frames: FrameTicker,
    rng: StdRng,
    scroll: u16,
    viewport: (u16, u16),
    page_height: u16,
    page_left: u16,
    hit_map: HitMap,
    lead_margin: u16,
    glow_radius: f32,
    show_cursor: bool,
}

impl PageState {
    /// Mount every component at clock time `now`.
    pub fn mount(config: &ResolvedConfig, now: Duration) -> Self {
        let content = config.content.clone();
        let (publisher, pointer) = pointer_channel(PointerPosition::OFFSCREEN);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let glows = GlowSlot::ALL
            .iter()
            .map(|slot| GlowOverlay::new(slot.text(&content)))
            .collect();

        debug!(fps = config.fps, seed = ?config.seed, "mounting page");

        Self {
            broadcaster: Task::mount("pointer", PointerBroadcaster::new(publisher), now),
            cursor: CursorState::new(pointer.clone()),
            pointer,
            scramble: Task::mount(
                "scramble",
                ScrambleText::new(content.hero_title.clone(), config.scramble),
                now,
            ),
            sequential: Task::mount(
                "sequential",
                SequentialReveal::new(content.paragraphs.clone(), config.sequential),
                now,
            ),
            typing: Task::mount(
                "typing",
                TypingSimulation::new(
                    content.demo_input.clone(),
                    content.demo_output.clone(),
                    config.typing,
                ),
                now,
            ),
            content,
            glows,
            frames: FrameTicker::new(config.fps, now),
            rng,
            scroll: 0,
            viewport: (0, 0),
            page_height: 0,
            page_left: 0,
            hit_map: HitMap::new(),
            lead_margin: config.lead_margin,
            glow_radius: config.glow_radius,
            show_cursor: config.show_cursor,
        }
    }

    /// Resume every task that is due at `now`.
    ///
    /// Returns `true` if anything visible changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let frame = self.frames.tick(now);
        let rng = &mut self.rng;

        let mut changed = false;
        if self.broadcaster.poll(now, frame, rng) {
            changed |= self.broadcaster.animator().published_last_frame();
        }
        changed |= self.scramble.poll(now, frame, rng);
        changed |= self.sequential.poll(now, frame, rng);
        changed |= self.typing.poll(now, frame, rng);
        changed
    }

    /// How long the host may wait for input before the next [`tick`](Self::tick).
    pub fn next_timeout(&self, now: Duration, idle: Duration) -> Duration {
        next_timeout(
            [
                self.broadcaster.pending(),
                self.scramble.pending(),
                self.sequential.pending(),
                self.typing.pending(),
            ],
            now,
            &self.frames,
            idle,
        )
    }

    /// Raw pointer move in screen cells.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let Some(broadcaster) = self.broadcaster.listener() else {
            return;
        };
        broadcaster.on_pointer_move(x, y);
        self.refresh_hover();
    }

    /// Primary button down/up.
    pub fn on_button(&mut self, down: bool) {
        if self.broadcaster.is_cancelled() {
            return;
        }
        self.cursor.on_button(down);
    }

    fn refresh_hover(&mut self) {
        let position = self.broadcaster.animator().buffered();
        let ancestry = match position.cell() {
            Some((x, y)) if x >= self.page_left => self
                .hit_map
                .ancestry_at(x - self.page_left, y.saturating_add(self.scroll)),
            _ => Vec::new(),
        };
        self.cursor.on_pointer_over(&ancestry);
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> u16 {
        self.page_height.saturating_sub(self.viewport.1)
    }

    /// Scroll by `delta` rows (negative is up), clamped to the page.
    ///
    /// Returns `true` if the offset changed.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll_to(u16::try_from(target).unwrap_or(0))
    }

    /// Scroll to an absolute offset, clamped to the page.
    pub fn scroll_to(&mut self, offset: u16) -> bool {
        let offset = offset.min(self.max_scroll());
        if offset == self.scroll {
            return false;
        }
        self.scroll = offset;
        if !self.broadcaster.is_cancelled() {
            self.refresh_hover();
        }
        true
    }

    /// Terminal size changed.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "viewport resized");
        self.viewport = (width, height);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Take over the geometry of a freshly rendered page.
    ///
    /// Replaces the hit map, clamps the scroll offset and updates every glow
    /// overlay's visibility. Returns `true` if any visibility flag changed.
    pub fn apply_layout(&mut self, page: &RenderedPage) -> bool {
        self.hit_map = page.hit_map.clone();
        self.page_height = page.height;
        self.page_left = page.left;
        self.scroll = self.scroll.min(self.max_scroll());

        let (top, height) = (self.scroll, self.viewport.1);
        let mut changed = false;
        for (slot, region) in &page.glow_regions {
            changed |= self.glows[slot.index()].observe(
                *region,
                top,
                height,
                self.lead_margin,
                &page.buffer,
            );
        }
        changed
    }

    /// Tear everything down. Idempotent.
    pub fn unmount(&mut self) {
        self.broadcaster.unmount();
        self.scramble.unmount();
        self.sequential.unmount();
        self.typing.unmount();
    }

    /// Whether [`unmount`](Self::unmount) has run.
    pub fn is_unmounted(&self) -> bool {
        self.broadcaster.is_cancelled()
    }

    /// Page text.
    pub fn content(&self) -> &PageContent {
        &self.content
    }

    /// Cursor indicator state.
    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Published pointer position translated into page coordinates.
    pub fn pointer_on_page(&self) -> PointerPosition {
        let position = self.pointer.get();
        PointerPosition::new(
            position.x - f32::from(self.page_left),
            position.y + f32::from(self.scroll),
        )
    }

    /// Pointer broadcaster task.
    pub fn broadcaster(&self) -> &Task<PointerBroadcaster> {
        &self.broadcaster
    }

    /// Hero title scramble.
    pub fn scramble(&self) -> &ScrambleText {
        self.scramble.animator()
    }

    /// Intro paragraph reveal.
    pub fn sequential(&self) -> &SequentialReveal {
        self.sequential.animator()
    }

    /// Demo card typing simulation.
    pub fn typing(&self) -> &TypingSimulation {
        self.typing.animator()
    }

    /// Glow overlay for `slot`.
    pub fn glow(&self, slot: GlowSlot) -> &GlowOverlay {
        &self.glows[slot.index()]
    }

    /// Current scroll offset in rows.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Viewport size (columns, rows).
    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Height of the last rendered page.
    pub fn page_height(&self) -> u16 {
        self.page_height
    }

    /// Hit map of the last rendered page.
    pub fn hit_map(&self) -> &HitMap {
        &self.hit_map
    }

    /// Glow radius in columns.
    pub fn glow_radius(&self) -> f32 {
        self.glow_radius
    }

    /// Whether the cursor indicator is drawn.
    pub fn show_cursor(&self) -> bool {
        self.show_cursor
    }
}

#[cfg(test)]
#[path = "page_state_tests.rs"]
mod tests;
