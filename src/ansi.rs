//! ANSI SGR parsing for styled text.
//!
//! Turns text that already carries ANSI escape sequences (e.g. output from a
//! child process) into [`StyledSpan`]s that can be handed to a label.
//! Malformed or unsupported sequences are skipped rather than surfaced as
//! errors.
//!
//! # Supported sequences
//!
//! - Reset: `\x1b[0m`
//! - Attributes: bold, dim, italic, underline, inverse, strikethrough and
//!   their disabling counterparts
//! - Standard and bright colors (30-37, 40-47, 90-97, 100-107)
//! - 256-color mode: `\x1b[38;5;123m` / `\x1b[48;5;123m`
//! - True color: `\x1b[38;2;R;G;Bm` / `\x1b[48;2;R;G;Bm`
//!
//! # Example
//!
//! ```
//! use liveline::ansi::parse_ansi;
//!
//! let spans = parse_ansi("\x1b[31mError:\x1b[0m file not found");
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[0].text, "Error:");
//! assert_eq!(spans[1].text, " file not found");
//! ```

use crate::style::{Attributes, Color, StyledSpan, StyledSpanOwned, TextStyle};

/// Parse ANSI-escaped text into styled spans.
///
/// # Example
///
/// ```
/// use liveline::ansi::parse_ansi;
/// use liveline::style::{Attributes, Color};
///
/// let spans = parse_ansi("\x1b[1;31mBold Red\x1b[0m Normal");
/// assert_eq!(spans.len(), 2);
/// assert!(spans[0].style.attributes.contains(Attributes::BOLD));
/// assert_eq!(spans[0].style.color, Some(Color::Red));
/// ```
pub fn parse_ansi(input: &str) -> Vec<StyledSpanOwned> {
    let mut spans = Vec::new();
    let mut style = TextStyle::new();
    let mut current_text = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next(); // consume '['

            if !current_text.is_empty() {
                spans.push(StyledSpan::styled(
                    std::mem::take(&mut current_text),
                    style,
                ));
            }

            let mut params = Vec::new();
            let mut current_param = String::new();

            loop {
                match chars.next() {
                    Some(c) if c.is_ascii_digit() => {
                        current_param.push(c);
                    }
                    Some(';') => {
                        if let Ok(n) = current_param.parse::<u8>() {
                            params.push(n);
                        } else if current_param.is_empty() {
                            // Empty parameter defaults to 0.
                            params.push(0);
                        }
                        current_param.clear();
                    }
                    Some('m') => {
                        if let Ok(n) = current_param.parse::<u8>() {
                            params.push(n);
                        }
                        apply_sgr_params(&mut style, &params);
                        break;
                    }
                    Some(c) if c.is_ascii_alphabetic() => {
                        // Non-SGR sequence; skip it.
                        break;
                    }
                    _ => {
                        // Malformed sequence; skip.
                        break;
                    }
                }
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(StyledSpan::styled(current_text, style));
    }

    spans
}

/// Apply SGR (Select Graphic Rendition) parameters to a style.
fn apply_sgr_params(style: &mut TextStyle, params: &[u8]) {
    if params.is_empty() {
        *style = TextStyle::new();
        return;
    }

    let mut i = 0;
    while i < params.len() {
        match params[i] {
            0 => *style = TextStyle::new(),
            1 => style.attributes.insert(Attributes::BOLD),
            2 => style.attributes.insert(Attributes::DIM),
            3 => style.attributes.insert(Attributes::ITALIC),
            4 => style.attributes.insert(Attributes::UNDERLINE),
            7 => style.attributes.insert(Attributes::INVERSE),
            9 => style.attributes.insert(Attributes::STRIKETHROUGH),

            21 | 22 => style.attributes.remove(Attributes::BOLD | Attributes::DIM),
            23 => style.attributes.remove(Attributes::ITALIC),
            24 => style.attributes.remove(Attributes::UNDERLINE),
            27 => style.attributes.remove(Attributes::INVERSE),
            29 => style.attributes.remove(Attributes::STRIKETHROUGH),

            30..=37 => style.color = Some(standard_color(params[i] - 30)),
            38 => {
                if let Some(color) = parse_extended_color(params, &mut i) {
                    style.color = Some(color);
                }
            }
            39 => style.color = None,

            40..=47 => style.background_color = Some(standard_color(params[i] - 40)),
            48 => {
                if let Some(color) = parse_extended_color(params, &mut i) {
                    style.background_color = Some(color);
                }
            }
            49 => style.background_color = None,

            90..=97 => style.color = Some(bright_color(params[i] - 90)),
            100..=107 => style.background_color = Some(bright_color(params[i] - 100)),

            _ => {} // Unknown code, ignore.
        }
        i += 1;
    }
}

fn standard_color(n: u8) -> Color {
    match n {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    }
}

fn bright_color(n: u8) -> Color {
    match n {
        0 => Color::BrightBlack,
        1 => Color::BrightRed,
        2 => Color::BrightGreen,
        3 => Color::BrightYellow,
        4 => Color::BrightBlue,
        5 => Color::BrightMagenta,
        6 => Color::BrightCyan,
        _ => Color::BrightWhite,
    }
}

/// Parse extended color (256-color or 24-bit RGB).
fn parse_extended_color(params: &[u8], i: &mut usize) -> Option<Color> {
    match params.get(*i + 1)? {
        5 => {
            let idx = *params.get(*i + 2)?;
            *i += 2;
            Some(Color::Ansi256(idx))
        }
        2 => {
            let r = *params.get(*i + 2)?;
            let g = *params.get(*i + 3)?;
            let b = *params.get(*i + 4)?;
            *i += 4;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Strip ANSI escape sequences from text, returning plain text.
///
/// # Example
///
/// ```
/// use liveline::ansi::strip_ansi;
///
/// let plain = strip_ansi("\x1b[31mRed\x1b[0m text");
/// assert_eq!(plain, "Red text");
/// ```
pub fn strip_ansi(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next(); // consume '['
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty() {
        assert!(parse_ansi("").is_empty());
    }

    #[test]
    fn parse_plain_text() {
        let spans = parse_ansi("Hello, World!");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Hello, World!");
        assert!(spans[0].style.is_plain());
    }

    #[test]
    fn parse_bold() {
        let spans = parse_ansi("\x1b[1mBold\x1b[0m");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].style.attributes.contains(Attributes::BOLD));
    }

    #[test]
    fn parse_colors() {
        let spans = parse_ansi("\x1b[31mRed\x1b[32mGreen\x1b[0m");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].style.color, Some(Color::Red));
        assert_eq!(spans[1].style.color, Some(Color::Green));
    }

    #[test]
    fn parse_bright_colors() {
        let spans = parse_ansi("\x1b[91mBright Red\x1b[0m");
        assert_eq!(spans[0].style.color, Some(Color::BrightRed));
    }

    #[test]
    fn parse_256_color() {
        let spans = parse_ansi("\x1b[38;5;123mCustom\x1b[0m");
        assert_eq!(spans[0].style.color, Some(Color::Ansi256(123)));
    }

    #[test]
    fn parse_rgb_color() {
        let spans = parse_ansi("\x1b[38;2;255;128;64mRGB\x1b[0m");
        assert_eq!(spans[0].style.color, Some(Color::Rgb(255, 128, 64)));
    }

    #[test]
    fn parse_combined_attributes() {
        let spans = parse_ansi("\x1b[1;3;31mBold Italic Red\x1b[0m");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].style.attributes.contains(Attributes::BOLD));
        assert!(spans[0].style.attributes.contains(Attributes::ITALIC));
        assert_eq!(spans[0].style.color, Some(Color::Red));
    }

    #[test]
    fn parse_background_color() {
        let spans = parse_ansi("\x1b[41mRed BG\x1b[0m");
        assert_eq!(spans[0].style.background_color, Some(Color::Red));
    }

    #[test]
    fn parse_mixed_text() {
        let spans = parse_ansi("Normal \x1b[31mRed\x1b[0m Normal");
        assert_eq!(spans.len(), 3);
        assert!(spans[0].style.is_plain());
        assert_eq!(spans[1].style.color, Some(Color::Red));
        assert!(spans[2].style.is_plain());
    }

    #[test]
    fn reset_clears_everything() {
        let spans = parse_ansi("\x1b[1;41;96mloud\x1b[0mquiet");
        assert_eq!(spans.len(), 2);
        assert!(spans[1].style.is_plain());
    }

    #[test]
    fn disable_codes_remove_attributes() {
        let spans = parse_ansi("\x1b[1mbold\x1b[22mplain");
        assert_eq!(spans.len(), 2);
        assert!(!spans[1].style.attributes.contains(Attributes::BOLD));
    }

    #[test]
    fn non_sgr_sequences_are_skipped() {
        let spans = parse_ansi("a\x1b[2Jb");
        let text: String = spans.iter().map(|s| s.text.as_ref()).collect();
        assert_eq!(text, "ab");
    }

    #[test]
    fn strip_ansi_removes_sequences() {
        assert_eq!(strip_ansi("\x1b[1;31mBold Red\x1b[0m Normal"), "Bold Red Normal");
        assert_eq!(strip_ansi("No escape codes"), "No escape codes");
    }
}
