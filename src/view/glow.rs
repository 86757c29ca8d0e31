//! Pointer-following glow over text.
//!
//! A [`GlowOverlay`] is drawn as two layers: the base-coloured text, which is
//! always rendered by the page, and a [`GlowLayer`] that recolours the glyph
//! cells with a radial gradient centred on the pointer. The gradient layer only
//! exists while the overlay is near the viewport.

use super::styles::{PageStyles, GLOW_BASE, GLOW_HIGHLIGHT};
use crate::model::PointerPosition;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Intensity above which monochrome output switches to bold.
const MONO_THRESHOLD: f32 = 0.5;

/// Whether `region` intersects the viewport rows `[top, top + height)` grown
/// by `margin` rows on both sides.
pub fn is_near_viewport(region: Rect, top: u16, height: u16, margin: u16) -> bool {
    if region.height == 0 {
        return false;
    }
    let start = u32::from(top).saturating_sub(u32::from(margin));
    let end = u32::from(top) + u32::from(height) + u32::from(margin);
    let region_start = u32::from(region.y);
    let region_end = region_start + u32::from(region.height);
    region_start < end && region_end > start
}

/// Gradient intensity in `[0, 1]` at a point, for a pointer at `pointer`.
///
/// Linear falloff with aspect-corrected distance; 1 at the pointer, 0 at
/// `radius` columns and beyond.
pub fn glow_intensity(x: f32, y: f32, pointer: PointerPosition, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    let dx = x - pointer.x;
    let dy = (y - pointer.y) * CELL_ASPECT;
    let distance = (dx * dx + dy * dy).sqrt();
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

fn rgb(color: Color) -> (f32, f32, f32) {
    match color {
        Color::Rgb(r, g, b) => (f32::from(r), f32::from(g), f32::from(b)),
        _ => (0.0, 0.0, 0.0),
    }
}

/// Blend the glow base and highlight colours.
pub fn blend(t: f32) -> Color {
    let (r0, g0, b0) = rgb(GLOW_BASE);
    let (r1, g1, b1) = rgb(GLOW_HIGHLIGHT);
    let t = t.clamp(0.0, 1.0);
    let mix = |a: f32, b: f32| (a + (b - a) * t).round() as u8;
    Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// One glyph cell of a [`GlowLayer`] mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    /// Column offset within the region.
    pub dx: u16,
    /// Row offset within the region.
    pub dy: u16,
    /// Display width of the glyph.
    pub width: u16,
}

/// Gradient layer of a glow overlay: the glyph mask of its region.
///
/// Only non-whitespace cells are in the mask, so the gradient never bleeds
/// into the gaps between words or past the end of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlowLayer {
    size: (u16, u16),
    mask: Vec<GlyphCell>,
}

impl GlowLayer {
    /// Precompute the mask from the base layer already drawn in `buf`.
    pub fn from_buffer(buf: &Buffer, region: Rect) -> Self {
        let area = region.intersection(buf.area);
        let mut mask = Vec::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let Some(cell) = buf.cell((x, y)) else {
                    continue;
                };
                let symbol = cell.symbol();
                if symbol.trim().is_empty() {
                    continue;
                }
                mask.push(GlyphCell {
                    dx: x - region.x,
                    dy: y - region.y,
                    width: u16::try_from(symbol.width().max(1)).unwrap_or(1),
                });
            }
        }
        Self {
            size: (region.width, region.height),
            mask,
        }
    }

    /// Glyph cells, relative to the region origin.
    pub fn mask(&self) -> &[GlyphCell] {
        &self.mask
    }

    /// Whether the mask was computed for a region of this size.
    pub fn fits(&self, region: Rect) -> bool {
        self.size == (region.width, region.height)
    }
}

/// Glow text instance with its own visibility flag and gradient layer.
#[derive(Debug, Clone)]
pub struct GlowOverlay {
    text: String,
    visible: bool,
    layer: Option<GlowLayer>,
    constructions: u64,
}

impl GlowOverlay {
    /// Overlay over `text`, initially not visible and without a layer.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: false,
            layer: None,
            constructions: 0,
        }
    }

    /// The text the overlay covers.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Gradient layer, present exactly while visible.
    pub fn layer(&self) -> Option<&GlowLayer> {
        self.layer.as_ref()
    }

    /// How many times the gradient layer has been constructed.
    pub fn constructions(&self) -> u64 {
        self.constructions
    }

    /// Update visibility for `region` (page rows) against the viewport.
    ///
    /// The layer is built from `buf` when the flag turns on and dropped when it
    /// turns off. While visible, a resize that changes the region's size only
    /// recomputes the mask. Returns `true` if the visibility flag changed.
    pub fn observe(
        &mut self,
        region: Rect,
        viewport_top: u16,
        viewport_height: u16,
        margin: u16,
        buf: &Buffer,
    ) -> bool {
        let visible = is_near_viewport(region, viewport_top, viewport_height, margin);
        if visible == self.visible {
            if let Some(layer) = self.layer.as_mut() {
                if !layer.fits(region) {
                    *layer = GlowLayer::from_buffer(buf, region);
                }
            }
            return false;
        }

        self.visible = visible;
        if visible {
            self.layer = Some(GlowLayer::from_buffer(buf, region));
            self.constructions += 1;
            debug!(text = %self.text, row = region.y, "glow layer constructed");
        } else {
            self.layer = None;
            debug!(text = %self.text, row = region.y, "glow layer dropped");
        }
        true
    }

    /// Paint the gradient over `region` in `buf` for a pointer in page coordinates.
    ///
    /// Does nothing without a layer.
    pub fn paint(
        &self,
        buf: &mut Buffer,
        region: Rect,
        pointer: PointerPosition,
        radius: f32,
        styles: &PageStyles,
    ) {
        let Some(layer) = &self.layer else {
            return;
        };
        for glyph in layer.mask() {
            let x = region.x.saturating_add(glyph.dx);
            let y = region.y.saturating_add(glyph.dy);
            let center_x = f32::from(x) + f32::from(glyph.width) / 2.0;
            let center_y = f32::from(y) + 0.5;
            let t = glow_intensity(center_x, center_y, pointer, radius);
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            if styles.colors {
                cell.set_fg(blend(t));
            } else if t >= MONO_THRESHOLD {
                cell.modifier.insert(Modifier::BOLD);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::styles::ColorConfig;
    use ratatui::style::Style;

    fn drawn(text: &str, width: u16) -> (Buffer, Rect) {
        let region = Rect::new(0, 10, width, 1);
        let mut buf = Buffer::empty(Rect::new(0, 0, width, 20));
        buf.set_string(0, 10, text, Style::default());
        (buf, region)
    }

    #[test]
    fn near_viewport_uses_margin_on_both_sides() {
        let region = Rect::new(0, 30, 10, 2);
        assert!(!is_near_viewport(region, 0, 20, 6));
        assert!(is_near_viewport(region, 0, 20, 11));
        assert!(is_near_viewport(region, 37, 20, 6));
        assert!(!is_near_viewport(region, 38, 20, 6));
    }

    #[test]
    fn intensity_peaks_at_pointer_and_fades() {
        let pointer = PointerPosition::new(10.0, 5.0);
        assert_eq!(glow_intensity(10.0, 5.0, pointer, 12.0), 1.0);
        assert_eq!(glow_intensity(16.0, 5.0, pointer, 12.0), 0.5);
        assert_eq!(glow_intensity(40.0, 5.0, pointer, 12.0), 0.0);
        // vertical distance counts double
        assert_eq!(glow_intensity(10.0, 8.0, pointer, 12.0), 0.5);
    }

    #[test]
    fn offscreen_pointer_leaves_base_colour() {
        let t = glow_intensity(3.0, 3.0, PointerPosition::OFFSCREEN, 12.0);
        assert_eq!(blend(t), GLOW_BASE);
    }

    #[test]
    fn mask_skips_spaces_and_wide_glyph_tails() {
        let (buf, region) = drawn("跨越 ab", 10);
        let layer = GlowLayer::from_buffer(&buf, region);
        let offsets: Vec<u16> = layer.mask().iter().map(|g| g.dx).collect();
        assert_eq!(offsets, vec![0, 2, 5, 6]);
        assert_eq!(layer.mask()[0].width, 2);
    }

    #[test]
    fn layer_exists_only_while_visible() {
        let (buf, region) = drawn("跨越语言鸿沟", 20);
        let mut glow = GlowOverlay::new("跨越语言鸿沟");
        assert!(glow.layer().is_none());

        assert!(glow.observe(region, 0, 12, 6, &buf));
        assert!(glow.is_visible());
        assert!(glow.layer().is_some());

        assert!(glow.observe(region, 40, 12, 6, &buf));
        assert!(!glow.is_visible());
        assert!(glow.layer().is_none());
    }

    #[test]
    fn layer_is_not_rebuilt_per_frame() {
        let (buf, region) = drawn("跨越语言鸿沟", 20);
        let mut glow = GlowOverlay::new("跨越语言鸿沟");
        for _ in 0..100 {
            glow.observe(region, 0, 12, 6, &buf);
        }
        assert_eq!(glow.constructions(), 1);
    }

    #[test]
    fn each_visibility_transition_constructs_once() {
        let (buf, region) = drawn("abc", 20);
        let mut glow = GlowOverlay::new("abc");
        for top in [0, 50, 0, 50, 0] {
            glow.observe(region, top, 12, 2, &buf);
        }
        assert_eq!(glow.constructions(), 3);
    }

    #[test]
    fn paint_recolours_only_glyphs_near_pointer() {
        let (mut buf, region) = drawn("ab  cd", 20);
        let mut glow = GlowOverlay::new("ab  cd");
        glow.observe(region, 0, 20, 0, &buf);

        let styles = PageStyles::with_color_config(ColorConfig::new(true));
        glow.paint(&mut buf, region, PointerPosition::new(0.5, 10.5), 4.0, &styles);

        assert_eq!(buf[(0, 10)].fg, blend(1.0));
        assert_eq!(buf[(2, 10)].fg, Color::Reset, "space stays untouched");
        assert_eq!(buf[(5, 10)].fg, blend(0.0));
    }

    #[test]
    fn monochrome_paint_uses_bold() {
        let (mut buf, region) = drawn("ab", 20);
        let mut glow = GlowOverlay::new("ab");
        glow.observe(region, 0, 20, 0, &buf);

        let styles = PageStyles::with_color_config(ColorConfig::new(false));
        glow.paint(&mut buf, region, PointerPosition::new(0.5, 10.5), 1.5, &styles);

        assert!(buf[(0, 10)].modifier.contains(Modifier::BOLD));
        assert!(!buf[(1, 10)].modifier.contains(Modifier::BOLD));
        assert_eq!(buf[(0, 10)].fg, Color::Reset);
    }

    #[test]
    fn paint_without_layer_is_a_no_op() {
        let (mut buf, region) = drawn("ab", 20);
        let before = buf.clone();
        let glow = GlowOverlay::new("ab");
        let styles = PageStyles::with_color_config(ColorConfig::new(true));
        glow.paint(&mut buf, region, PointerPosition::new(0.5, 10.5), 4.0, &styles);
        assert_eq!(buf, before);
    }
}
