//! Font metrics and line assembly for inline layout.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;

use crate::style::{ColorValue, FontKey};

/// Extra leading applied above and below each line, as a multiple of the
/// tallest ascent and deepest descent on the line.
pub const LINE_LEADING: f32 = 1.25;

/// Vertical metrics of one face at one size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LineMetrics {
    /// Distance from the top of the tallest glyph to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the deepest glyph
    /// (positive).
    pub descent: f32,
    /// Recommended distance between consecutive baselines.
    pub linespace: f32,
}

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide advance widths and vertical metrics per
/// [`FontKey`]. Layout calls these once per word, so implementations that
/// are expensive to query should be wrapped in a [`FontCache`].
pub trait FontMetrics {
    /// Total advance width of `text` in the given face, in pixels.
    fn measure(&self, key: FontKey, text: &str) -> f32;

    /// Vertical metrics of the given face, in pixels.
    fn metrics(&self, key: FontKey) -> LineMetrics;
}

/// Approximate font metrics using fixed ratios.
///
/// Without access to font data, glyph advances are taken as 0.6 of the size
/// (typical for proportional Latin text), the ascent as 0.8 and the descent
/// as 0.2.
///
/// This is used as a fallback when no font is available, and in tests.
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, key: FontKey, text: &str) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * key.size as f32 * CHAR_WIDTH_RATIO
    }

    #[allow(clippy::cast_precision_loss)]
    fn metrics(&self, key: FontKey) -> LineMetrics {
        let size = key.size as f32;
        LineMetrics {
            ascent: size * 0.8,
            descent: size * 0.2,
            linespace: size * 1.2,
        }
    }
}

/// Memoizing wrapper around a [`FontMetrics`] provider.
///
/// Results are kept for the life of the cache, keyed by [`FontKey`] (and
/// text, for measurements). The owner decides that lifetime: one render or
/// the whole process.
pub struct FontCache<M> {
    inner: M,
    metrics: RefCell<HashMap<FontKey, LineMetrics>>,
    widths: RefCell<HashMap<(FontKey, String), f32>>,
}

impl<M: FontMetrics> FontCache<M> {
    /// Wrap a provider.
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            metrics: RefCell::new(HashMap::new()),
            widths: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct faces measured so far.
    #[must_use]
    pub fn cached_faces(&self) -> usize {
        self.metrics.borrow().len()
    }
}

impl<M: FontMetrics> FontMetrics for FontCache<M> {
    fn measure(&self, key: FontKey, text: &str) -> f32 {
        let cache_key = (key, text.to_string());
        if let Some(&width) = self.widths.borrow().get(&cache_key) {
            return width;
        }
        let width = self.inner.measure(key, text);
        let _ = self.widths.borrow_mut().insert(cache_key, width);
        width
    }

    fn metrics(&self, key: FontKey) -> LineMetrics {
        if let Some(&metrics) = self.metrics.borrow().get(&key) {
            return metrics;
        }
        let metrics = self.inner.metrics(key);
        let _ = self.metrics.borrow_mut().insert(key, metrics);
        metrics
    }
}

/// A word placed on a line, in absolute page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFragment {
    /// Left edge.
    pub x: f32,
    /// Top edge (baseline minus the face's ascent).
    pub y: f32,
    /// Advance width of the word.
    pub width: f32,
    /// Line spacing of the face.
    pub height: f32,
    /// The word.
    pub text: String,
    /// Face and size.
    pub font: FontKey,
    /// Text color.
    pub color: ColorValue,
}

/// A word waiting on the current line, positioned relative to the box.
struct PendingWord {
    x: f32,
    width: f32,
    text: String,
    font: FontKey,
    color: ColorValue,
}

/// Breaks a stream of words into lines for one inline-mode box.
///
/// Cursor positions are relative to the box; finished fragments are
/// absolute.
pub struct LineBuilder<'a> {
    fonts: &'a dyn FontMetrics,
    /// Absolute position of the box.
    origin_x: f32,
    origin_y: f32,
    /// Width available to each line.
    width: f32,
    cursor_x: f32,
    cursor_y: f32,
    line: Vec<PendingWord>,
    fragments: Vec<WordFragment>,
}

impl<'a> LineBuilder<'a> {
    /// Start laying out lines for a box at (`x`, `y`) that is `width` wide.
    #[must_use]
    pub fn new(fonts: &'a dyn FontMetrics, x: f32, y: f32, width: f32) -> Self {
        Self {
            fonts,
            origin_x: x,
            origin_y: y,
            width,
            cursor_x: 0.0,
            cursor_y: 0.0,
            line: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// Place one word. If it does not fit after the words already on the
    /// line, the line is finished first. A word wider than the whole line
    /// still gets a line to itself.
    pub fn push_word(&mut self, text: &str, font: FontKey, color: ColorValue) {
        let width = self.fonts.measure(font, text);
        if self.cursor_x + width > self.width {
            self.flush();
        }
        self.line.push(PendingWord {
            x: self.cursor_x,
            width,
            text: text.to_string(),
            font,
            color,
        });
        self.cursor_x += width + self.fonts.measure(font, " ");
    }

    /// Finish the current line: align every word on a shared baseline and
    /// move the cursor below the line. Does nothing if the line is empty.
    pub fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }
        let line = std::mem::take(&mut self.line);
        let metrics: Vec<LineMetrics> = line
            .iter()
            .map(|word| self.fonts.metrics(word.font))
            .collect();

        let max_ascent = metrics.iter().map(|m| m.ascent).fold(0.0, f32::max);
        let baseline = self.cursor_y + LINE_LEADING * max_ascent;

        for (word, metric) in line.into_iter().zip(&metrics) {
            self.fragments.push(WordFragment {
                x: self.origin_x + word.x,
                y: self.origin_y + baseline - metric.ascent,
                width: word.width,
                height: metric.linespace,
                text: word.text,
                font: word.font,
                color: word.color,
            });
        }

        let max_descent = metrics.iter().map(|m| m.descent).fold(0.0, f32::max);
        self.cursor_y = baseline + LINE_LEADING * max_descent;
        self.cursor_x = 0.0;
    }

    /// Flush the last line and return the fragments and the total height.
    #[must_use]
    pub fn finish(mut self) -> (Vec<WordFragment>, f32) {
        self.flush();
        (self.fragments, self.cursor_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontSlant, FontWeight};

    /// Every character is 10px wide, spaces 5px; ascent 8, descent 2.
    struct Fixed;

    impl FontMetrics for Fixed {
        #[allow(clippy::cast_precision_loss)]
        fn measure(&self, _key: FontKey, text: &str) -> f32 {
            if text == " " {
                5.0
            } else {
                text.chars().count() as f32 * 10.0
            }
        }

        fn metrics(&self, _key: FontKey) -> LineMetrics {
            LineMetrics {
                ascent: 8.0,
                descent: 2.0,
                linespace: 12.0,
            }
        }
    }

    const KEY: FontKey = FontKey {
        size: 12,
        weight: FontWeight::Normal,
        slant: FontSlant::Roman,
    };

    #[test]
    fn test_empty_builder_has_zero_height() {
        let (fragments, height) = LineBuilder::new(&Fixed, 0.0, 0.0, 100.0).finish();
        assert!(fragments.is_empty());
        assert!(height.abs() < f32::EPSILON);
    }

    #[test]
    fn test_line_geometry() {
        let mut builder = LineBuilder::new(&Fixed, 13.0, 18.0, 100.0);
        builder.push_word("ab", KEY, ColorValue::BLACK);
        builder.push_word("cd", KEY, ColorValue::BLACK);
        let (fragments, height) = builder.finish();

        assert_eq!(fragments.len(), 2);
        assert!((fragments[0].x - 13.0).abs() < f32::EPSILON);
        assert!((fragments[1].x - 38.0).abs() < f32::EPSILON);
        // baseline = 1.25 * 8 = 10; y = 18 + 10 - 8
        assert!((fragments[0].y - 20.0).abs() < f32::EPSILON);
        // 10 + 1.25 * 2
        assert!((height - 12.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cache_memoizes() {
        let cache = FontCache::new(Fixed);
        assert!((cache.measure(KEY, "abc") - 30.0).abs() < f32::EPSILON);
        assert!((cache.measure(KEY, "abc") - 30.0).abs() < f32::EPSILON);
        let _ = cache.metrics(KEY);
        let _ = cache.metrics(KEY);
        assert_eq!(cache.cached_faces(), 1);
    }
}
