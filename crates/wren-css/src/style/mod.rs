//! Resolved style values
//!
//! The cascade leaves every node with a string map in a small value grammar
//! (keyword, `<number>px`, `<number>%`). This module interprets those
//! strings for layout and paint:
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

mod color;
pub mod computed;
mod font;
mod values;

pub use color::ColorValue;
pub use computed::ComputedStyle;
pub use font::{FontKey, FontSlant, FontWeight};
pub use values::{CssValue, DEFAULT_FONT_SIZE_PX, format_px, parse_px};
