//! Font metrics backed by fontdue for accurate text measurement during layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use fontdue::{Font, FontSettings};
use wren_css::{ApproximateFontMetrics, FontKey, FontMetrics, FontSlant, FontWeight, LineMetrics};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Convert a key's point size to pixels.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn key_px(key: FontKey) -> f32 {
    key.size as f32 * 4.0 / 3.0
}

/// The system faces available for rendering, one per weight/slant pair.
///
/// Missing variants fall back to a nearby face; if even the regular face is
/// missing, text cannot be drawn and measurement falls back to
/// [`ApproximateFontMetrics`].
#[derive(Default)]
pub struct SystemFonts {
    regular: Option<Font>,
    bold: Option<Font>,
    italic: Option<Font>,
    bold_italic: Option<Font>,
}

impl SystemFonts {
    /// Search the usual system locations for each variant.
    #[must_use]
    pub fn load() -> Self {
        let fonts = Self {
            regular: load_font_from_paths(FONT_SEARCH_PATHS, "regular"),
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS, "bold"),
            italic: load_font_from_paths(FONT_ITALIC_SEARCH_PATHS, "italic"),
            bold_italic: load_font_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS, "bold-italic"),
        };
        if fonts.regular.is_none() {
            log::warn!(
                target: "wren::fonts",
                "no system font found in {} locations; text will be measured approximately and not drawn",
                FONT_SEARCH_PATHS.len()
            );
        }
        fonts
    }

    /// No fonts at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a regular face was found.
    #[must_use]
    pub const fn has_fonts(&self) -> bool {
        self.regular.is_some()
    }

    /// The best available face for a weight and slant, falling back through
    /// exact match, partial match, then regular.
    #[must_use]
    pub fn select(&self, weight: FontWeight, slant: FontSlant) -> Option<&Font> {
        let bold = weight == FontWeight::Bold;
        let italic = slant == FontSlant::Italic;
        match (bold, italic) {
            (true, true) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref())
                .or(self.regular.as_ref()),
            (true, false) => self.bold.as_ref().or(self.regular.as_ref()),
            (false, true) => self.italic.as_ref().or(self.regular.as_ref()),
            (false, false) => self.regular.as_ref(),
        }
    }
}

/// Try to load a font from a list of filesystem paths.
fn load_font_from_paths(paths: &[&str], label: &str) -> Option<Font> {
    for path in paths {
        if let Ok(data) = std::fs::read(path)
            && let Ok(font) = Font::from_bytes(data, FontSettings::default())
        {
            log::debug!(target: "wren::fonts", "loaded {label} font: {path}");
            return Some(font);
        }
    }
    None
}

/// Font metrics implementation backed by fontdue's per-glyph metrics.
///
/// Uses `Font::metrics()` (not `Font::rasterize()`) to avoid the cost of
/// bitmap generation when only measurements are needed. Wrap it in a
/// [`wren_css::FontCache`] to memoize across a load.
pub struct FontdueFontMetrics<'a> {
    fonts: &'a SystemFonts,
}

impl<'a> FontdueFontMetrics<'a> {
    /// Create a new font metrics provider over loaded system fonts.
    #[must_use]
    pub const fn new(fonts: &'a SystemFonts) -> Self {
        Self { fonts }
    }
}

impl FontMetrics for FontdueFontMetrics<'_> {
    fn measure(&self, key: FontKey, text: &str) -> f32 {
        let Some(font) = self.fonts.select(key.weight, key.slant) else {
            return ApproximateFontMetrics.measure(key, text);
        };
        let px = key_px(key);
        // Matches the cursor advancement in Renderer::draw_text.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| font.metrics(ch, px).advance_width)
            .sum()
    }

    fn metrics(&self, key: FontKey) -> LineMetrics {
        let line = self
            .fonts
            .select(key.weight, key.slant)
            .and_then(|font| font.horizontal_line_metrics(key_px(key)));
        match line {
            // fontdue reports descent as a negative offset from the baseline.
            Some(line) => LineMetrics {
                ascent: line.ascent,
                descent: -line.descent,
                linespace: line.new_line_size,
            },
            None => ApproximateFontMetrics.metrics(key),
        }
    }
}
