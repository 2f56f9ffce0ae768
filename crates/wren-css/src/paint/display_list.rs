//! Display List - a sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list is the output of the painting phase. Commands carry
//! absolute page coordinates and own all their data, so the list outlives
//! the box tree it came from.

use serde::{Deserialize, Serialize};

use crate::style::{ColorValue, FontKey};

/// A single drawing command.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// Commands are added to the display list in painting order (back to front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// Draw one word.
    DrawText {
        /// Top edge.
        top: f32,
        /// Left edge.
        left: f32,
        /// Bottom edge (`top` plus the face's line spacing).
        bottom: f32,
        /// Right edge (`left` plus the word's advance width).
        right: f32,
        /// The text to draw.
        text: String,
        /// Face and size.
        font: FontKey,
        /// Text color.
        color: ColorValue,
    },

    /// Fill a rectangle with a solid color.
    DrawRect {
        /// Top edge.
        top: f32,
        /// Left edge.
        left: f32,
        /// Bottom edge.
        bottom: f32,
        /// Right edge.
        right: f32,
        /// Fill color.
        color: ColorValue,
    },
}

impl DisplayCommand {
    /// Top edge in page coordinates.
    #[must_use]
    pub const fn top(&self) -> f32 {
        match self {
            Self::DrawText { top, .. } | Self::DrawRect { top, .. } => *top,
        }
    }

    /// Bottom edge in page coordinates.
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        match self {
            Self::DrawText { bottom, .. } | Self::DrawRect { bottom, .. } => *bottom,
        }
    }

    /// Left edge in page coordinates.
    #[must_use]
    pub const fn left(&self) -> f32 {
        match self {
            Self::DrawText { left, .. } | Self::DrawRect { left, .. } => *left,
        }
    }

    /// Right edge in page coordinates.
    #[must_use]
    pub const fn right(&self) -> f32 {
        match self {
            Self::DrawText { right, .. } | Self::DrawRect { right, .. } => *right,
        }
    }

    /// Whether any part of the command lies in the vertical band
    /// `[scroll, scroll + height]`.
    #[must_use]
    pub fn is_visible(&self, scroll: f32, height: f32) -> bool {
        !(self.top() > scroll + height || self.bottom() < scroll)
    }
}

/// A list of drawing commands in painting order.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Iterate over the commands in painting order.
    pub fn iter(&self) -> std::slice::Iter<'_, DisplayCommand> {
        self.commands.iter()
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayCommand;
    type IntoIter = std::slice::Iter<'a, DisplayCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl From<Vec<DisplayCommand>> for DisplayList {
    fn from(commands: Vec<DisplayCommand>) -> Self {
        Self { commands }
    }
}
