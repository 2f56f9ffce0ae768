//! Font selection
//!
//! [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// [§ 2.2 `font-weight`](https://www.w3.org/TR/css-fonts-4/#font-weight-prop),
/// reduced to the two faces the renderer distinguishes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    /// Interpret a resolved `font-weight` value.
    ///
    /// `bold`, `bolder` and numeric weights of 600 and up select the bold
    /// face; everything else is normal.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bold" | "bolder" => Self::Bold,
            other => match other.parse::<u16>() {
                Ok(weight) if weight >= 600 => Self::Bold,
                _ => Self::Normal,
            },
        }
    }
}

/// [§ 2.4 `font-style`](https://www.w3.org/TR/css-fonts-4/#font-style-prop),
/// reduced to upright or italic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    /// Upright.
    #[default]
    Roman,
    /// Italic.
    Italic,
}

impl FontSlant {
    /// `italic` selects the italic face; anything else is roman.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("italic") {
            Self::Italic
        } else {
            Self::Roman
        }
    }
}

/// Everything needed to pick and size a face.
///
/// Used as the cache key by font metrics providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontKey {
    /// Size in points (`floor(px × 0.75)`).
    pub size: u32,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub slant: FontSlant,
}

impl FontKey {
    /// Build a key from a pixel font size.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_px(px: f32, weight: FontWeight, slant: FontSlant) -> Self {
        let size = (px * 0.75).floor().max(0.0) as u32;
        Self {
            size,
            weight,
            slant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_from_css() {
        assert_eq!(FontWeight::from_css("bold"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("700"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("400"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css("normal"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css("heavy"), FontWeight::Normal);
    }

    #[test]
    fn test_slant_from_css() {
        assert_eq!(FontSlant::from_css("italic"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("oblique"), FontSlant::Roman);
        assert_eq!(FontSlant::from_css("normal"), FontSlant::Roman);
    }

    #[test]
    fn test_key_size_is_floored_points() {
        let key = FontKey::from_px(16.0, FontWeight::Normal, FontSlant::Roman);
        assert_eq!(key.size, 12);
        let key = FontKey::from_px(14.4, FontWeight::Bold, FontSlant::Italic);
        assert_eq!(key.size, 10);
    }

    #[test]
    fn test_strum_round_trip_names() {
        assert_eq!(FontWeight::Bold.to_string(), "bold");
        assert_eq!("italic".parse::<FontSlant>(), Ok(FontSlant::Italic));
    }
}
