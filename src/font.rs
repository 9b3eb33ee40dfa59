//! Font resolution and glyph outlines
//!
//! Text is drawn through the [`GlyphSource`] trait. Two implementations exist:
//!
//! - [`OutlineFont`]: a TrueType/OpenType file parsed with `ttf-parser`
//! - [`BitmapFont`]: the built-in 8x8 glyph set from `font8x8`, used when no
//!   candidate font file can be loaded
//!
//! [`resolve_font`] walks a prioritized candidate list and never fails: a
//! missing or broken file just moves on to the next candidate. Each
//! candidate is read at most once.

use std::path::{Path, PathBuf};

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use log::{debug, warn};
use tiny_skia::{Path as SkPath, PathBuilder, Rect as SkRect};

use crate::rendering::layout::Point;
use crate::{Error, Result};

/// Horizontal extent and vertical metrics of a measured line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Offset of the leftmost inked pixel from the pen origin.
    pub ink_left: f32,
    /// Width of the inked area, from the leftmost to the rightmost glyph pixel.
    pub ink_width: f32,
    /// Sum of glyph advances.
    pub advance: f32,
    /// Distance from the top of the line to the baseline.
    pub ascent: f32,
}

/// Source of glyph shapes for a single typeface.
///
/// `origin` is the top-left of the line's ascender box; glyphs sit on a
/// baseline `ascent` pixels below it.
pub trait GlyphSource: Send + Sync {
    /// Human readable identifier, used in logs.
    fn name(&self) -> String;

    fn measure(&self, text: &str, size: f32) -> Result<TextMetrics>;

    /// Fillable outline of `text`, or `None` if nothing would be inked.
    fn text_path(&self, text: &str, size: f32, origin: Point) -> Result<Option<SkPath>>;
}

/// A scalable font loaded from disk.
pub struct OutlineFont {
    path: PathBuf,
    data: Vec<u8>,
}

impl OutlineFont {
    /// Load and check a font file. Collections use their first face.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| Error::FontError(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_bytes(path, data)
    }

    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self> {
        let path = path.into();
        ttf_parser::Face::parse(&data, 0)
            .map_err(|e| Error::FontError(format!("{}: {}", path.display(), e)))?;
        Ok(Self { path, data })
    }

    fn face(&self) -> Result<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, 0)
            .map_err(|e| Error::FontError(format!("{}: {}", self.path.display(), e)))
    }
}

/// Collects a glyph outline into a tiny-skia path, mapping font units
/// (y up) to canvas pixels (y down).
struct OutlineSink<'a> {
    builder: &'a mut PathBuilder,
    scale: f32,
    x: f32,
    baseline: f32,
}

impl OutlineSink<'_> {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.baseline - y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for OutlineSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Pen position of each drawable glyph on a line, plus the line's metrics.
/// Characters without a glyph (or mapped to `.notdef`) are dropped and take
/// no advance.
fn layout_line(face: &ttf_parser::Face<'_>, text: &str, size: f32) -> (Vec<(ttf_parser::GlyphId, f32)>, TextMetrics) {
    let scale = size / face.units_per_em() as f32;
    let mut glyphs = Vec::new();
    let mut pen = 0.0f32;
    let mut ink: Option<(f32, f32)> = None;
    for c in text.chars() {
        let Some(id) = face.glyph_index(c).filter(|id| id.0 != 0) else { continue };
        if let Some(bb) = face.glyph_bounding_box(id) {
            let l = pen + bb.x_min as f32 * scale;
            let r = pen + bb.x_max as f32 * scale;
            ink = Some(match ink {
                Some((a, b)) => (a.min(l), b.max(r)),
                None => (l, r),
            });
        }
        glyphs.push((id, pen));
        pen += face.glyph_hor_advance(id).unwrap_or(0) as f32 * scale;
    }
    let metrics = TextMetrics {
        ink_left: ink.map(|(l, _)| l).unwrap_or(0.0),
        ink_width: ink.map(|(l, r)| r - l).unwrap_or(0.0),
        advance: pen,
        ascent: face.ascender() as f32 * scale,
    };
    (glyphs, metrics)
}

impl GlyphSource for OutlineFont {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn measure(&self, text: &str, size: f32) -> Result<TextMetrics> {
        let face = self.face()?;
        Ok(layout_line(&face, text, size).1)
    }

    fn text_path(&self, text: &str, size: f32, origin: Point) -> Result<Option<SkPath>> {
        let face = self.face()?;
        let (glyphs, metrics) = layout_line(&face, text, size);
        let scale = size / face.units_per_em() as f32;
        let mut builder = PathBuilder::new();
        for (id, pen) in glyphs {
            let mut sink = OutlineSink {
                builder: &mut builder,
                scale,
                x: origin.x + pen,
                baseline: origin.y + metrics.ascent,
            };
            face.outline_glyph(id, &mut sink);
        }
        Ok(builder.finish())
    }
}

/// Built-in 8x8 bitmap glyphs, scaled up with square pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

/// Rows and columns in a `font8x8` glyph.
const CELL: usize = 8;

impl BitmapFont {
    pub fn new() -> Self {
        BitmapFont
    }

    /// Side of one glyph pixel. A cell is 0.6 em tall so two lines of text
    /// at the reference sizes stay inside the canvas.
    fn dot(size: f32) -> f32 {
        (size * 0.6 / CELL as f32).round().max(1.0)
    }

    fn glyph(c: char) -> Option<[u8; 8]> {
        BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
    }

    /// Leftmost and rightmost inked columns of a glyph.
    fn ink_columns(rows: &[u8; 8]) -> Option<(usize, usize)> {
        let mask = rows.iter().fold(0u8, |acc, r| acc | r);
        if mask == 0 {
            return None;
        }
        // Bit 0 is the leftmost column.
        Some((mask.trailing_zeros() as usize, CELL - 1 - mask.leading_zeros() as usize))
    }
}

impl GlyphSource for BitmapFont {
    fn name(&self) -> String {
        "built-in 8x8".to_string()
    }

    fn measure(&self, text: &str, size: f32) -> Result<TextMetrics> {
        let dot = Self::dot(size);
        let mut ink: Option<(f32, f32)> = None;
        for (i, c) in text.chars().enumerate() {
            let Some((first, last)) = Self::glyph(c).as_ref().and_then(Self::ink_columns) else { continue };
            let base = (i * CELL) as f32 * dot;
            let l = base + first as f32 * dot;
            let r = base + (last + 1) as f32 * dot;
            ink = Some(match ink {
                Some((a, b)) => (a.min(l), b.max(r)),
                None => (l, r),
            });
        }
        Ok(TextMetrics {
            ink_left: ink.map(|(l, _)| l).unwrap_or(0.0),
            ink_width: ink.map(|(l, r)| r - l).unwrap_or(0.0),
            advance: (text.chars().count() * CELL) as f32 * dot,
            ascent: CELL as f32 * dot,
        })
    }

    fn text_path(&self, text: &str, size: f32, origin: Point) -> Result<Option<SkPath>> {
        let dot = Self::dot(size);
        let mut builder = PathBuilder::new();
        for (i, c) in text.chars().enumerate() {
            let Some(rows) = Self::glyph(c) else { continue };
            let cell_x = origin.x + (i * CELL) as f32 * dot;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..CELL {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let x = cell_x + col as f32 * dot;
                    let y = origin.y + row as f32 * dot;
                    if let Some(r) = SkRect::from_xywh(x, y, dot, dot) {
                        builder.push_rect(r);
                    }
                }
            }
        }
        Ok(builder.finish())
    }
}

/// Pick the first candidate that exists and parses as a font, or fall back
/// to the built-in bitmap font.
pub fn resolve_font(candidates: &[PathBuf]) -> Box<dyn GlyphSource> {
    for candidate in candidates {
        if !candidate.exists() {
            debug!("font candidate {} not found", candidate.display());
            continue;
        }
        match OutlineFont::load(candidate) {
            Ok(font) => {
                debug!("using font {}", candidate.display());
                return Box::new(font);
            }
            // The file is there but unusable, which is worth surfacing.
            Err(e) => warn!("skipping font candidate: {}", e),
        }
    }
    debug!("no usable font file, falling back to built-in bitmap font");
    Box::new(BitmapFont::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::layout::TextAnchor;

    const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/logo-bold.ttf");

    fn bundled() -> OutlineFont {
        OutlineFont::load(BUNDLED).expect("bundled font loads")
    }

    #[test]
    fn empty_candidate_list_falls_back() {
        let font = resolve_font(&[]);
        assert_eq!(font.name(), "built-in 8x8");
    }

    #[test]
    fn broken_candidates_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();
        let missing = dir.path().join("missing.ttf");

        let font = resolve_font(&[missing, bogus.clone()]);
        assert_eq!(font.name(), "built-in 8x8");

        let err = OutlineFont::load(&bogus).err().expect("bogus font must not parse");
        assert!(matches!(err, Error::FontError(_)));
    }

    #[test]
    fn bitmap_metrics_scale_with_size() {
        let font = BitmapFont::new();
        // 120 * 0.6 / 8 = 9px dots, 72px cells
        let m = font.measure("SECURITY", 120.0).unwrap();
        assert_eq!(m.advance, 8.0 * 72.0);
        assert_eq!(m.ascent, 72.0);
        assert!(m.ink_width > 0.0 && m.ink_width <= m.advance);
    }

    #[test]
    fn bitmap_blank_text_has_no_ink() {
        let font = BitmapFont::new();
        let m = font.measure("   ", 100.0).unwrap();
        assert_eq!(m.ink_width, 0.0);
        assert!(font.text_path("   ", 100.0, Point::new(0.0, 0.0)).unwrap().is_none());
        assert!(font.text_path("", 100.0, Point::new(0.0, 0.0)).unwrap().is_none());
    }

    #[test]
    fn bitmap_path_stays_inside_its_cells() {
        let font = BitmapFont::new();
        let origin = Point::new(100.0, 50.0);
        let path = font.text_path("3:11", 150.0, origin).unwrap().expect("ink");
        let b = path.bounds();
        let m = font.measure("3:11", 150.0).unwrap();
        assert!(b.left() >= origin.x);
        assert!(b.top() >= origin.y);
        assert!(b.right() <= origin.x + m.advance);
        assert!(b.bottom() <= origin.y + m.ascent);
        assert!((b.width() - m.ink_width).abs() < 1e-3);
    }

    #[test]
    fn bundled_font_is_preferred_over_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let font = resolve_font(&[dir.path().join("missing.ttf"), PathBuf::from(BUNDLED)]);
        assert_eq!(font.name(), Path::new(BUNDLED).display().to_string());
    }

    #[test]
    fn outline_path_spans_measured_ink() {
        let font = bundled();
        for (text, size) in [("3:11", 150.0), ("SECURITY", 120.0)] {
            let m = font.measure(text, size).unwrap();
            assert!(m.ink_width > 0.0);
            let b = font
                .text_path(text, size, Point::new(0.0, 0.0))
                .unwrap()
                .expect("ink")
                .bounds();
            assert!((b.width() - m.ink_width).abs() < 1e-3, "{}: {} vs {}", text, b.width(), m.ink_width);
            assert!((b.left() - m.ink_left).abs() < 1e-3);
        }
    }

    #[test]
    fn outline_ink_is_centered_on_anchor() {
        let font = bundled();
        let anchor = TextAnchor { center_x: 512.0, top: 839.68, size: 150.0 };
        let m = font.measure("3:11", anchor.size).unwrap();
        let origin = anchor.origin_for_ink(m.ink_left, m.ink_width);
        let b = font.text_path("3:11", anchor.size, origin).unwrap().expect("ink").bounds();
        assert!(((b.left() + b.right()) / 2.0 - 512.0).abs() < 1e-3);
        // Cap height is below the ascender, so glyph tops sit under the origin.
        assert!(m.ascent > 0.0);
        assert!(b.top() > origin.y);
    }

    #[test]
    fn outline_skips_characters_without_glyphs() {
        let font = bundled();
        let plain = font.measure("3:11", 150.0).unwrap();
        let mixed = font.measure("3\u{4E2D}:11", 150.0).unwrap();
        assert_eq!(mixed.advance, plain.advance);
        assert_eq!(mixed.ink_width, plain.ink_width);

        let origin = Point::new(10.0, 20.0);
        let a = font.text_path("3:11", 150.0, origin).unwrap().expect("ink").bounds();
        let b = font.text_path("3\u{4E2D}:11", 150.0, origin).unwrap().expect("ink").bounds();
        assert_eq!(a, b);
        assert!(font.text_path("\u{4E2D}", 150.0, origin).unwrap().is_none());
    }
}
