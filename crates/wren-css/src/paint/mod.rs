//! Painting
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! This module converts a laid-out box tree into a display list of drawing
//! commands. The display list can then be executed by any renderer.
//!
//! ```text
//! Style → Layout → Paint → Render
//!                    ↓
//!              DisplayList
//! ```

mod display_list;
mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::Painter;
