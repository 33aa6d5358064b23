//! Style definitions for rendered text.
//!
//! A label's content is a sequence of [`StyledSpan`]s, each pairing a piece
//! of text with a [`TextStyle`]. Spans are compared by value during dirty
//! detection, so two renders of identical content produce no terminal output.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

// === Color ===

/// A terminal color.
///
/// Covers the 16 named ANSI colors, the 256-color palette and 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Default terminal color.
    Default,
    /// Black.
    Black,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
    /// Bright/light black (gray).
    BrightBlack,
    /// Bright/light red.
    BrightRed,
    /// Bright/light green.
    BrightGreen,
    /// Bright/light yellow.
    BrightYellow,
    /// Bright/light blue.
    BrightBlue,
    /// Bright/light magenta.
    BrightMagenta,
    /// Bright/light cyan.
    BrightCyan,
    /// Bright/light white.
    BrightWhite,
    /// 8-bit color (0-255).
    Ansi256(u8),
    /// 24-bit RGB color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Create an RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Create an 8-bit palette color.
    pub const fn ansi(n: u8) -> Self {
        Color::Ansi256(n)
    }
}

// === Attributes ===

bitflags::bitflags! {
    /// Text attribute flags.
    #[repr(transparent)]
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    pub struct Attributes: u8 {
        /// Bold text.
        const BOLD          = 0b00_0001;
        /// Dimmed/faint text.
        const DIM           = 0b00_0010;
        /// Italic text.
        const ITALIC        = 0b00_0100;
        /// Underlined text.
        const UNDERLINE     = 0b00_1000;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b01_0000;
        /// Inverse/reverse video (swap fg/bg).
        const INVERSE       = 0b10_0000;
    }
}

impl std::fmt::Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

// === Text Style ===

/// Visual styling for a span of text.
///
/// # Example
///
/// ```
/// use liveline::style::{Color, TextStyle};
///
/// let error = TextStyle::new().color(Color::Red).bold();
/// assert_eq!(error.color, Some(Color::Red));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    /// Text color (foreground).
    pub color: Option<Color>,
    /// Background color.
    pub background_color: Option<Color>,
    /// Attribute flags (bold, italic, ...).
    pub attributes: Attributes,
}

impl TextStyle {
    /// Create a new text style with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: None,
            background_color: None,
            attributes: Attributes::empty(),
        }
    }

    /// Default style as a compile-time constant.
    pub const DEFAULT: Self = Self::new();

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bg(mut self, color: impl Into<Color>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set bold attribute.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.attributes = self.attributes.union(Attributes::BOLD);
        self
    }

    /// Set dim attribute.
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.attributes = self.attributes.union(Attributes::DIM);
        self
    }

    /// Set italic attribute.
    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.attributes = self.attributes.union(Attributes::ITALIC);
        self
    }

    /// Set underline attribute.
    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.attributes = self.attributes.union(Attributes::UNDERLINE);
        self
    }

    /// Set strikethrough attribute.
    #[must_use]
    pub const fn strikethrough(mut self) -> Self {
        self.attributes = self.attributes.union(Attributes::STRIKETHROUGH);
        self
    }

    /// Set inverse attribute.
    #[must_use]
    pub const fn inverse(mut self) -> Self {
        self.attributes = self.attributes.union(Attributes::INVERSE);
        self
    }

    /// True if no color or attribute is set.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.background_color.is_none() && self.attributes.is_empty()
    }

    /// Apply this style to text, creating a [`StyledSpan`].
    #[must_use]
    pub fn apply(&self, text: impl Into<String>) -> StyledSpanOwned {
        StyledSpan {
            text: Cow::Owned(text.into()),
            style: *self,
        }
    }
}

impl std::fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextStyle")
            .field("color", &self.color)
            .field("background_color", &self.background_color)
            .field("attributes", &self.attributes)
            .finish()
    }
}

// === Styled Span ===

/// A segment of text with its own styling.
///
/// The text is stored as `Cow<'a, str>` to support zero-copy construction
/// from borrowed input (e.g. ANSI parsing of streaming output). Spans stored
/// inside a label are owned; use [`StyledSpanOwned`] there.
///
/// # Example
///
/// ```
/// use liveline::style::{Color, StyledSpan};
///
/// // Owned span (allocates)
/// let span = StyledSpan::new("Hello").color(Color::Red).bold();
///
/// // Borrowed span (zero-copy)
/// let text = "World";
/// let borrowed = StyledSpan::borrowed(text).color(Color::Blue);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan<'a> {
    /// The text content of this span.
    pub text: Cow<'a, str>,
    /// The style applied to the whole span.
    pub style: TextStyle,
}

/// Type alias for owned spans (no lifetime constraints).
pub type StyledSpanOwned = StyledSpan<'static>;

impl StyledSpan<'static> {
    /// Create a new owned styled span with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Cow::Owned(text.into()),
            style: TextStyle::new(),
        }
    }
}

impl<'a> StyledSpan<'a> {
    /// Create a borrowed styled span (zero-copy).
    pub fn borrowed(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            style: TextStyle::new(),
        }
    }

    /// Create a span from text and a prebuilt style.
    pub fn styled(text: impl Into<Cow<'a, str>>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Convert to an owned span, copying the text if it was borrowed.
    pub fn into_owned(self) -> StyledSpanOwned {
        StyledSpan {
            text: Cow::Owned(self.text.into_owned()),
            style: self.style,
        }
    }

    /// Set foreground color.
    #[must_use]
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.style.color = Some(color.into());
        self
    }

    /// Set background color.
    #[must_use]
    pub fn bg(mut self, color: impl Into<Color>) -> Self {
        self.style.background_color = Some(color.into());
        self
    }

    /// Make text bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.style.attributes.insert(Attributes::BOLD);
        self
    }

    /// Dim text.
    #[must_use]
    pub fn dim(mut self) -> Self {
        self.style.attributes.insert(Attributes::DIM);
        self
    }

    /// Make text italic.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.style.attributes.insert(Attributes::ITALIC);
        self
    }

    /// Underline text.
    #[must_use]
    pub fn underline(mut self) -> Self {
        self.style.attributes.insert(Attributes::UNDERLINE);
        self
    }

    /// Strikethrough text.
    #[must_use]
    pub fn strikethrough(mut self) -> Self {
        self.style.attributes.insert(Attributes::STRIKETHROUGH);
        self
    }

    /// Inverse colors.
    #[must_use]
    pub fn inverse(mut self) -> Self {
        self.style.attributes.insert(Attributes::INVERSE);
        self
    }

    /// Display width of this span in terminal columns.
    ///
    /// Wide (CJK) characters count as two columns, zero-width characters as
    /// none.
    #[must_use]
    pub fn display_width(&self) -> u16 {
        UnicodeWidthStr::width(self.text.as_ref()) as u16
    }
}

impl Default for StyledSpan<'static> {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for StyledSpan<'static> {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StyledSpan<'static> {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
