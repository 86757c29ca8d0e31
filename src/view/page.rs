//! Offscreen page rendering.
//!
//! The whole page is drawn into a [`Buffer`] one column wide enough for the
//! content and as tall as the content needs. The viewport then shows a window
//! of it. Every drawn element is registered in a [`HitMap`] for hover
//! detection, and every glow title records its region for the glow pass.

use super::constants::{
    CARET, INPUT_PREFIX, OUTPUT_PREFIX, PAGE_MAX_WIDTH, PAGE_PADDING, SECTION_GAP,
};
use super::styles::PageStyles;
use super::wrap::{display_width, wrap_lines, wrap_text};
use crate::anim::{char_prefix, ScrambleText, SequentialReveal, TypingPhase};
use crate::pointer::{ElementKind, HitMap};
use crate::state::{GlowSlot, PageState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Widget};

/// Output of one page render.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Page content, `column width × page height`.
    pub buffer: Buffer,
    /// Element regions in page coordinates.
    pub hit_map: HitMap,
    /// Region of every glow title, in page coordinates.
    pub glow_regions: Vec<(GlowSlot, Rect)>,
    /// Rows used.
    pub height: u16,
    /// Screen column where the page column starts.
    pub left: u16,
}

/// Width of the page column on a terminal `terminal_width` columns wide.
pub fn column_width(terminal_width: u16) -> u16 {
    terminal_width.min(PAGE_MAX_WIDTH)
}

/// Growable drawing surface that tracks a write cursor row.
#[derive(Debug)]
pub struct PageCanvas {
    buffer: Buffer,
    hit_map: HitMap,
    glow_regions: Vec<(GlowSlot, Rect)>,
    width: u16,
    row: u16,
}

impl PageCanvas {
    /// Empty canvas `width` columns wide.
    pub fn new(width: u16) -> Self {
        Self {
            buffer: Buffer::empty(area(width, 0)),
            hit_map: HitMap::new(),
            glow_regions: Vec::new(),
            width,
            row: 0,
        }
    }

    /// Current write row.
    pub fn row(&self) -> u16 {
        self.row
    }

    /// Canvas width.
    pub fn width(&self) -> u16 {
        self.width
    }

    fn ensure_rows(&mut self, end: u16) {
        if end > self.buffer.area.height {
            self.buffer.resize(area(self.width, end));
        }
    }

    /// Leave `rows` blank rows.
    pub fn gap(&mut self, rows: u16) {
        self.row = self.row.saturating_add(rows);
        self.ensure_rows(self.row);
    }

    /// Write `text` at column `x` of row `y`, clipped to the canvas. Returns the
    /// column after the last written cell.
    pub fn put(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        self.ensure_rows(y.saturating_add(1));
        if x >= self.width {
            return x;
        }
        let (end, _) = self
            .buffer
            .set_stringn(x, y, text, usize::from(self.width - x), style);
        end
    }

    /// Write a single line at the current row and advance. Returns its region.
    pub fn line(&mut self, x: u16, text: &str, style: Style) -> Rect {
        let y = self.row;
        let end = self.put(x, y, text, style);
        self.row += 1;
        Rect::new(x, y, end.saturating_sub(x), 1)
    }

    /// Write pieces side by side on the current row and advance. Returns the
    /// region of each piece.
    pub fn spans(&mut self, x: u16, pieces: &[(&str, Style)]) -> Vec<Rect> {
        let y = self.row;
        let mut cursor = x;
        let mut regions = Vec::with_capacity(pieces.len());
        for (text, style) in pieces {
            let end = self.put(cursor, y, text, *style);
            regions.push(Rect::new(cursor, y, end.saturating_sub(cursor), 1));
            cursor = end;
        }
        self.row += 1;
        regions
    }

    /// Write `text` wrapped to `width` columns. Returns the covered region.
    pub fn wrapped(&mut self, x: u16, width: u16, text: &str, style: Style) -> Rect {
        let top = self.row;
        let mut widest = 0;
        for line in wrap_text(text, width) {
            widest = widest.max(self.line(x, &line, style).width);
        }
        Rect::new(x, top, widest, self.row - top)
    }

    /// Write `text` wrapped to `width` with its first `visible` chars in
    /// `shown` and the rest in `ghost`, with an optional caret after the
    /// visible part.
    ///
    /// Lines wrap one column short of `width` so the caret never covers a
    /// glyph and the layout does not shift when it disappears.
    #[allow(clippy::too_many_arguments)]
    pub fn revealed(
        &mut self,
        x: u16,
        width: u16,
        text: &str,
        visible: usize,
        shown: Style,
        ghost: Style,
        caret: Option<Style>,
    ) -> Rect {
        let top = self.row;
        let lines = wrap_lines(text, width.saturating_sub(1));
        let caret_line = lines.iter().rposition(|line| line.start <= visible);
        for (i, line) in lines.iter().enumerate() {
            let y = self.row;
            let head = char_prefix(&line.text, visible.saturating_sub(line.start));
            let mut end = self.put(x, y, head, shown);
            if caret_line == Some(i) {
                if let Some(style) = caret {
                    end = self.put(end, y, CARET, style);
                }
            }
            self.put(end, y, &line.text[head.len()..], ghost);
            self.row += 1;
        }
        Rect::new(x, top, width, self.row - top)
    }

    /// Register an element region.
    pub fn hit(&mut self, region: Rect, kind: ElementKind, depth: u16) {
        self.hit_map.push(region, kind, depth);
    }

    /// Record where a glow title was drawn.
    pub fn glow(&mut self, slot: GlowSlot, region: Rect) {
        self.glow_regions.push((slot, region));
    }

    /// Draw a rounded border around `region`.
    pub fn border(&mut self, region: Rect, style: Style) {
        self.ensure_rows(region.bottom());
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .render(region.intersection(self.buffer.area), &mut self.buffer);
    }

    /// Finish drawing.
    pub fn finish(self, left: u16) -> RenderedPage {
        RenderedPage {
            height: self.row,
            buffer: self.buffer,
            hit_map: self.hit_map,
            glow_regions: self.glow_regions,
            left,
        }
    }
}

fn area(width: u16, height: u16) -> Rect {
    Rect {
        x: 0,
        y: 0,
        width,
        height,
    }
}

/// Content inset and width inside a column `width` wide.
fn inner(width: u16) -> (u16, u16) {
    let pad = if width > PAGE_PADDING * 4 { PAGE_PADDING } else { 0 };
    (pad, width.saturating_sub(pad * 2).max(1))
}

/// Render the complete page for a terminal `terminal_width` columns wide.
///
/// Only the base layers are drawn; glow gradients and the cursor are applied
/// afterwards.
pub fn render_page(state: &PageState, terminal_width: u16, styles: &PageStyles) -> RenderedPage {
    let width = column_width(terminal_width);
    let left = (terminal_width - width) / 2;
    let mut canvas = PageCanvas::new(width);

    navbar(&mut canvas, state, styles);
    canvas.gap(SECTION_GAP);
    hero(&mut canvas, state, styles);
    canvas.gap(SECTION_GAP);
    intro(&mut canvas, state, styles);
    canvas.gap(SECTION_GAP);
    features(&mut canvas, state, styles);
    canvas.gap(SECTION_GAP);
    tech(&mut canvas, state, styles);
    canvas.gap(SECTION_GAP);
    footer(&mut canvas, state, styles);

    canvas.finish(left)
}

fn section<F>(canvas: &mut PageCanvas, draw: F)
where
    F: FnOnce(&mut PageCanvas),
{
    let top = canvas.row();
    draw(canvas);
    let region = Rect::new(0, top, canvas.width(), canvas.row() - top);
    canvas.hit(region, ElementKind::Section, 0);
}

fn glow_title(canvas: &mut PageCanvas, slot: GlowSlot, text: &str, styles: &PageStyles) {
    let (x, w) = inner(canvas.width());
    let region = canvas.wrapped(x, w, text, styles.glow_base);
    canvas.hit(region, ElementKind::Text, 1);
    canvas.glow(slot, region);
}

fn navbar(canvas: &mut PageCanvas, state: &PageState, styles: &PageStyles) {
    let content = state.content();
    section(canvas, |canvas| {
        let (x, w) = inner(canvas.width());
        let logo = canvas.spans(
            x,
            &[
                ("◆ ", styles.accent),
                (&content.site_name, styles.title),
                (" ", styles.body),
                (&content.en_name, styles.muted),
            ],
        );
        canvas.hit(logo[0].union(logo[3]), ElementKind::Link, 1);

        let y = canvas.row();
        let mut cursor = x;
        for item in &content.nav {
            let end = canvas.put(cursor, y, item, styles.body);
            canvas.hit(Rect::new(cursor, y, end - cursor, 1), ElementKind::Link, 1);
            cursor = end + 2;
        }
        let label = format!(" {} ", content.nav_download);
        let label_width = display_width(&label);
        if cursor + label_width <= x + w {
            let start = x + w - label_width;
            let end = canvas.put(start, y, &label, styles.button);
            canvas.hit(Rect::new(start, y, end - start, 1), ElementKind::Button, 1);
        }
        canvas.gap(1);
        canvas.line(x, &"─".repeat(usize::from(w)), styles.border);
    });
}

fn scramble_line(canvas: &mut PageCanvas, x: u16, scramble: &ScrambleText, styles: &PageStyles) -> Rect {
    let y = canvas.row();
    let mut cursor = x;
    for (i, c) in scramble.display().chars().enumerate() {
        let style = if scramble.is_locked(i) {
            styles.title
        } else {
            styles.scramble
        };
        let mut glyph = [0u8; 4];
        cursor = canvas.put(cursor, y, c.encode_utf8(&mut glyph), style);
    }
    canvas.gap(1);
    Rect::new(x, y, cursor - x, 1)
}

fn hero(canvas: &mut PageCanvas, state: &PageState, styles: &PageStyles) {
    let content = state.content();
    section(canvas, |canvas| {
        let (x, w) = inner(canvas.width());
        let badge = canvas.spans(x, &[("● ", styles.accent), (&content.hero_badge, styles.accent)]);
        canvas.hit(badge[1], ElementKind::Text, 1);
        canvas.gap(1);

        let title = scramble_line(canvas, x, state.scramble(), styles);
        canvas.hit(title, ElementKind::Text, 1);
        glow_title(canvas, GlowSlot::HeroTagline, &content.hero_tagline, styles);
        canvas.gap(1);

        let desc = canvas.wrapped(x, w, &content.hero_description, styles.body);
        canvas.hit(desc, ElementKind::Text, 1);
        canvas.gap(1);

        let button = canvas.line(x, &format!("  {}  ", content.download_label), styles.button);
        canvas.hit(button, ElementKind::Button, 1);
    });
}

fn paragraphs(canvas: &mut PageCanvas, x: u16, w: u16, reveal: &SequentialReveal, styles: &PageStyles) {
    let counts = reveal.visible_counts();
    for (i, block) in reveal.blocks().iter().enumerate() {
        let visible = counts.get(i).copied().unwrap_or(0);
        let ghost = if reveal.is_reached(i) {
            styles.ghost
        } else {
            styles.ghost.add_modifier(Modifier::DIM)
        };
        let caret = reveal.is_revealing(i).then_some(styles.accent);
        let region = canvas.revealed(x, w, block, visible, styles.body, ghost, caret);
        canvas.hit(region, ElementKind::Text, 1);
        canvas.gap(1);
    }
}

fn demo_card(canvas: &mut PageCanvas, x: u16, w: u16, state: &PageState, styles: &PageStyles) {
    let content = state.content();
    let typing = state.typing();
    let top = canvas.row();
    canvas.gap(1);
    let body_x = x + 2;
    let body_w = w.saturating_sub(4).max(1);

    canvas.line(body_x, &content.demo_label, styles.muted);
    canvas.gap(1);

    let input_caret = matches!(typing.phase(), TypingPhase::Input | TypingPhase::Lead);
    let input = canvas.spans(
        body_x,
        &[
            (INPUT_PREFIX, styles.muted),
            (typing.input_text(), styles.body),
            (if input_caret { CARET } else { "" }, styles.accent),
        ],
    );
    canvas.hit(input[0].union(input[1]), ElementKind::TextInput, 2);

    let output_caret = typing.phase() == TypingPhase::Output;
    canvas.spans(
        body_x,
        &[
            (OUTPUT_PREFIX, styles.accent),
            (typing.output_text(), styles.title),
            (if output_caret { CARET } else { "" }, styles.accent),
        ],
    );
    canvas.gap(1);
    canvas.wrapped(body_x, body_w, &content.demo_hint, styles.muted);
    canvas.gap(1);

    let card = Rect::new(x, top, w, canvas.row() - top);
    canvas.border(card, styles.border);
    canvas.hit(card, ElementKind::Card, 1);
}

fn intro(canvas: &mut PageCanvas, state: &PageState, styles: &PageStyles) {
    let content = state.content();
    section(canvas, |canvas| {
        let (x, w) = inner(canvas.width());
        glow_title(canvas, GlowSlot::IntroTitle, &content.intro_title, styles);
        canvas.gap(1);
        paragraphs(canvas, x, w, state.sequential(), styles);

        let author = canvas.spans(
            x,
            &[
                ("— ", styles.muted),
                (&content.author_name, styles.title),
                ("  ", styles.muted),
                (&content.author_role, styles.muted),
            ],
        );
        canvas.hit(author[1], ElementKind::Text, 1);
        canvas.gap(1);

        demo_card(canvas, x, w, state, styles);
    });
}

fn features(canvas: &mut PageCanvas, state: &PageState, styles: &PageStyles) {
    let content = state.content();
    section(canvas, |canvas| {
        let (x, w) = inner(canvas.width());
        glow_title(canvas, GlowSlot::FeaturesTitle, &content.features_title, styles);
        canvas.wrapped(x, w, &content.features_subtitle, styles.muted);
        canvas.gap(1);

        for feature in &content.features {
            let top = canvas.row();
            canvas.gap(1);
            canvas.line(x + 2, &feature.highlight, styles.accent);
            let title = canvas.line(x + 2, &feature.title, styles.title);
            canvas.hit(title, ElementKind::Text, 2);
            canvas.wrapped(x + 2, w.saturating_sub(4).max(1), &feature.desc, styles.body);
            canvas.gap(1);
            let card = Rect::new(x, top, w, canvas.row() - top);
            canvas.border(card, styles.border);
            canvas.hit(card, ElementKind::Card, 1);
        }
    });
}

fn tech(canvas: &mut PageCanvas, state: &PageState, styles: &PageStyles) {
    let content = state.content();
    section(canvas, |canvas| {
        let (x, w) = inner(canvas.width());
        glow_title(canvas, GlowSlot::TechTitle, &content.tech_title, styles);
        canvas.gap(1);

        for spec in &content.specs {
            canvas.spans(x, &[("▸ ", styles.accent), (&spec.title, styles.title)]);
            canvas.wrapped(x + 2, w.saturating_sub(2).max(1), &spec.desc, styles.body);
            canvas.gap(1);
        }

        canvas.line(x, &content.shortcuts_title, styles.title);
        canvas.gap(1);
        for shortcut in &content.shortcuts {
            let y = canvas.row();
            let mut cursor = x;
            for (i, key) in shortcut.keys.iter().enumerate() {
                if i > 0 {
                    cursor = canvas.put(cursor, y, " + ", styles.muted);
                }
                let start = cursor;
                cursor = canvas.put(cursor, y, &format!(" {key} "), styles.keycap);
                canvas.hit(Rect::new(start, y, cursor - start, 1), ElementKind::KeyCap, 1);
            }
            cursor = canvas.put(cursor + 3, y, &shortcut.label, styles.body);
            canvas.put(cursor + 2, y, &shortcut.en, styles.muted);
            canvas.gap(1);
        }
        canvas.gap(1);
        canvas.wrapped(x, w, &content.shortcut_tip, styles.muted);
    });
}

fn footer(canvas: &mut PageCanvas, state: &PageState, styles: &PageStyles) {
    let content = state.content();
    section(canvas, |canvas| {
        let (x, w) = inner(canvas.width());
        canvas.line(x, &"─".repeat(usize::from(w)), styles.border);
        canvas.spans(x, &[("◆ ", styles.accent), (&content.site_name, styles.title)]);
        canvas.wrapped(x, w, &content.footer_desc, styles.muted);
        canvas.gap(1);

        for work in &content.works {
            let link = canvas.spans(
                x,
                &[("↗ ", styles.accent), (&work.title, styles.body), ("  ", styles.muted), (&work.desc, styles.muted)],
            );
            canvas.hit(link[0].union(link[1]), ElementKind::Link, 1);
        }
        canvas.gap(1);

        canvas.spans(x, &[("微信 ", styles.muted), (&content.contact_wechat, styles.body)]);
        let email = canvas.spans(x, &[("邮箱 ", styles.muted), (&content.contact_email, styles.accent)]);
        canvas.hit(email[1], ElementKind::Link, 1);
        canvas.gap(1);

        let y = canvas.row();
        let mut cursor = x;
        for badge in &content.status {
            let (dot, style) = if badge.active {
                ("● ", styles.accent)
            } else {
                ("○ ", styles.muted)
            };
            cursor = canvas.put(cursor, y, dot, style);
            cursor = canvas.put(cursor, y, &badge.label, style) + 3;
        }
        canvas.gap(1);
        canvas.gap(1);
        canvas.wrapped(x, w, &content.copyright, styles.muted);
    });
}
