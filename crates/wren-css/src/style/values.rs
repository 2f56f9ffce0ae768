//! Value grammar
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Only three shapes exist: a keyword, a `px` length and a percentage.

/// Font size at the root when nothing else applies.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// A declared value in the supported grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Anything that is not a length or percentage (`bold`, `red`, `#fff`).
    Keyword(String),
    /// [§ 6.2 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    Px(f32),
    /// [§ 5.1.2 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percent(f32),
}

impl CssValue {
    /// Classify a raw value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(px) = parse_px(raw) {
            return Self::Px(px);
        }
        if let Some(number) = raw.strip_suffix('%')
            && let Ok(percent) = number.parse::<f32>()
        {
            return Self::Percent(percent);
        }
        Self::Keyword(raw.to_string())
    }
}

/// Parse `<number>px`.
#[must_use]
pub fn parse_px(value: &str) -> Option<f32> {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|number| number.parse::<f32>().ok())
        .filter(|px| px.is_finite())
}

/// Format a pixel length, always with at least one fractional digit
/// (`30.0px`, `14.4px`).
#[must_use]
pub fn format_px(px: f32) -> String {
    if px.fract() == 0.0 {
        format!("{px:.1}px")
    } else {
        format!("{px}px")
    }
}
