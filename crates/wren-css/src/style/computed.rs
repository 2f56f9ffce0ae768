//! Typed access to a resolved style map.
//!
//! The cascade stores strings; layout and paint read them through
//! [`ComputedStyle`], which applies defaults and reports values it cannot
//! interpret once per distinct value.

use wren_common::warning::warn_once;
use wren_dom::StyleMap;

use super::{ColorValue, DEFAULT_FONT_SIZE_PX, FontKey, FontSlant, FontWeight, parse_px};

/// A read-only view of one node's resolved style.
#[derive(Debug, Clone, Copy)]
pub struct ComputedStyle<'a> {
    map: &'a StyleMap,
}

impl<'a> ComputedStyle<'a> {
    /// Wrap a resolved style map.
    #[must_use]
    pub const fn new(map: &'a StyleMap) -> Self {
        Self { map }
    }

    /// The raw value of a property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&'a str> {
        self.map.get(property).map(String::as_str)
    }

    /// `font-size` in pixels. Unparseable sizes fall back to the default.
    #[must_use]
    pub fn font_size_px(&self) -> f32 {
        match self.get("font-size") {
            Some(value) => parse_px(value).unwrap_or_else(|| {
                warn_once("CSS", &format!("unsupported font-size '{value}'"));
                DEFAULT_FONT_SIZE_PX
            }),
            None => DEFAULT_FONT_SIZE_PX,
        }
    }

    /// `font-weight`, reduced to normal or bold.
    #[must_use]
    pub fn font_weight(&self) -> FontWeight {
        self.get("font-weight")
            .map_or(FontWeight::Normal, FontWeight::from_css)
    }

    /// `font-style`, reduced to roman or italic.
    #[must_use]
    pub fn font_slant(&self) -> FontSlant {
        self.get("font-style")
            .map_or(FontSlant::Roman, FontSlant::from_css)
    }

    /// The face and size text in this style is drawn with.
    #[must_use]
    pub fn font_key(&self) -> FontKey {
        FontKey::from_px(self.font_size_px(), self.font_weight(), self.font_slant())
    }

    /// Text `color`. Unknown colors fall back to black.
    #[must_use]
    pub fn color(&self) -> ColorValue {
        let Some(value) = self.get("color") else {
            return ColorValue::BLACK;
        };
        ColorValue::parse(value).unwrap_or_else(|| {
            warn_once("CSS", &format!("unknown color '{value}'"));
            ColorValue::BLACK
        })
    }

    /// `background-color`, if set to a color that paints something.
    #[must_use]
    pub fn background_color(&self) -> Option<ColorValue> {
        let value = self.get("background-color")?;
        match ColorValue::parse(value) {
            Some(color) if !color.is_transparent() => Some(color),
            Some(_) => None,
            None => {
                warn_once("CSS", &format!("unknown background-color '{value}'"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(pairs: &[(&str, &str)]) -> StyleMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_for_empty_map() {
        let map = StyleMap::new();
        let computed = ComputedStyle::new(&map);
        assert!((computed.font_size_px() - 16.0).abs() < f32::EPSILON);
        assert_eq!(computed.color(), ColorValue::BLACK);
        assert_eq!(computed.background_color(), None);
        assert_eq!(computed.font_key().size, 12);
    }

    #[test]
    fn test_font_key_from_map() {
        let map = style(&[
            ("font-size", "32px"),
            ("font-weight", "bold"),
            ("font-style", "italic"),
        ]);
        let key = ComputedStyle::new(&map).font_key();
        assert_eq!(key.size, 24);
        assert_eq!(key.weight, FontWeight::Bold);
        assert_eq!(key.slant, FontSlant::Italic);
    }

    #[test]
    fn test_unknown_colors() {
        let map = style(&[("color", "nope"), ("background-color", "nope")]);
        let computed = ComputedStyle::new(&map);
        assert_eq!(computed.color(), ColorValue::BLACK);
        assert_eq!(computed.background_color(), None);
    }

    #[test]
    fn test_transparent_background_is_none() {
        let map = style(&[("background-color", "transparent")]);
        assert_eq!(ComputedStyle::new(&map).background_color(), None);
    }

    #[test]
    fn test_unparseable_font_size_falls_back() {
        let map = style(&[("font-size", "2em")]);
        assert!((ComputedStyle::new(&map).font_size_px() - 16.0).abs() < f32::EPSILON);
    }
}
