//! Terminal output: logical instructions and their ANSI translation.
//!
//! Labels never emit escape sequences themselves. A redraw produces an
//! ordered batch of [`Instruction`]s targeted at a [`Cursor`] position, and a
//! [`TerminalWriter`] applies the batch to the real terminal. This keeps the
//! redraw state machine free of terminal details and makes it testable
//! against [`RecordingWriter`], which records batches instead of writing.
//!
//! [`AnsiWriter`] is the production implementation: it tracks its own belief
//! of the physical cursor, moves it with relative escape sequences, and
//! deduplicates style changes across a batch so unchanged styling costs no
//! bytes.

use std::io::{self, Write};

use smallvec::SmallVec;
use unicode_width::UnicodeWidthStr;

use crate::cursor::Cursor;
use crate::style::{Attributes, Color, TextStyle};

/// Type alias for instruction batches.
///
/// SmallVec keeps typical batches (a handful of spans plus an erase) off the
/// heap.
pub type InstructionBatch = SmallVec<[Instruction; 8]>;

/// One logical output operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Write styled text at the current cursor position.
    Write {
        /// Style applied to the whole text.
        style: TextStyle,
        /// Text to write; must not contain newlines.
        text: String,
    },
    /// Erase from the cursor to the end of the line.
    EraseForward,
    /// Erase the entire line the cursor is on.
    EraseLine,
}

impl Instruction {
    /// Build a write instruction.
    pub fn write(style: TextStyle, text: impl Into<String>) -> Self {
        Instruction::Write {
            style,
            text: text.into(),
        }
    }
}

/// Failure applying an instruction batch to the terminal.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The target position is above the visible viewport.
    #[error("write position row {0} is above the viewport")]
    OutOfViewport(i32),

    /// The underlying terminal stream failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Applies instruction batches at a target position.
///
/// Implementations must leave the physical cursor in a defined state after
/// each batch; callers track only logical row/column counters.
pub trait TerminalWriter {
    /// Apply `batch` in order, starting at `at`.
    fn write_at(&mut self, at: Cursor, batch: &[Instruction]) -> Result<(), WriteError>;
}

// === ANSI writer ===

/// Translates instruction batches into ANSI escape sequences.
///
/// The writer owns an output stream and a [`Cursor`] recording where it
/// believes the physical cursor is. Vertical movement is always relative
/// (`MoveUp`/`MoveDown`), since the terminal scrolls underneath us and no
/// absolute row address stays valid across frames. Output is queued and
/// flushed once per batch.
pub struct AnsiWriter<W: Write> {
    out: W,
    cursor: Cursor,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a writer assuming the physical cursor sits at the origin.
    pub fn new(out: W) -> Self {
        Self {
            out,
            cursor: Cursor::origin(),
        }
    }

    /// Reset the writer's belief of the physical cursor position.
    ///
    /// Use after the caller has moved the cursor by other means (e.g. a
    /// newline printed outside this writer).
    pub fn assume_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Where the writer believes the physical cursor is.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Consume the writer, returning the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn move_to(&mut self, at: Cursor) -> io::Result<()> {
        use crossterm::{cursor, queue};

        match at.row.cmp(&self.cursor.row) {
            std::cmp::Ordering::Less => {
                queue!(self.out, cursor::MoveUp((self.cursor.row - at.row) as u16))?;
            }
            std::cmp::Ordering::Greater => {
                queue!(self.out, cursor::MoveDown((at.row - self.cursor.row) as u16))?;
            }
            std::cmp::Ordering::Equal => {}
        }
        queue!(self.out, cursor::MoveToColumn(at.col))?;
        self.cursor = at;
        Ok(())
    }
}

impl<W: Write> TerminalWriter for AnsiWriter<W> {
    fn write_at(&mut self, at: Cursor, batch: &[Instruction]) -> Result<(), WriteError> {
        use crossterm::{queue, style, terminal};

        if at.row < 0 {
            return Err(WriteError::OutOfViewport(at.row));
        }

        self.move_to(at)?;

        // Track the applied style across the batch; only emit escape
        // sequences when it changes.
        let mut current_fg: Option<style::Color> = None;
        let mut current_bg: Option<style::Color> = None;
        let mut current_attrs: Option<style::Attributes> = None;
        let mut styled = false;

        for instruction in batch {
            match instruction {
                Instruction::Write { style: text_style, text } => {
                    let fg = to_crossterm_color(text_style.color);
                    let bg = to_crossterm_color(text_style.background_color);
                    let attrs = to_crossterm_attributes(text_style.attributes);

                    if current_attrs != Some(attrs) {
                        // SGR reset clears colors too, so re-emit both below.
                        queue!(self.out, style::SetAttribute(style::Attribute::Reset))?;
                        queue!(self.out, style::SetAttributes(attrs))?;
                        current_attrs = Some(attrs);
                        current_fg = None;
                        current_bg = None;
                        styled = true;
                    }
                    if current_fg != Some(fg) {
                        queue!(self.out, style::SetForegroundColor(fg))?;
                        current_fg = Some(fg);
                        styled = true;
                    }
                    if current_bg != Some(bg) {
                        queue!(self.out, style::SetBackgroundColor(bg))?;
                        current_bg = Some(bg);
                        styled = true;
                    }

                    queue!(self.out, style::Print(text))?;
                    self.cursor.col += UnicodeWidthStr::width(text.as_str()) as u16;
                }
                Instruction::EraseForward => {
                    queue!(self.out, terminal::Clear(terminal::ClearType::UntilNewLine))?;
                }
                Instruction::EraseLine => {
                    queue!(self.out, terminal::Clear(terminal::ClearType::CurrentLine))?;
                }
            }
        }

        if styled {
            queue!(self.out, style::SetAttribute(style::Attribute::Reset))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn to_crossterm_color(color: Option<Color>) -> crossterm::style::Color {
    use crossterm::style::Color as C;

    match color {
        None | Some(Color::Default) => C::Reset,
        Some(Color::Black) => C::Black,
        Some(Color::Red) => C::DarkRed,
        Some(Color::Green) => C::DarkGreen,
        Some(Color::Yellow) => C::DarkYellow,
        Some(Color::Blue) => C::DarkBlue,
        Some(Color::Magenta) => C::DarkMagenta,
        Some(Color::Cyan) => C::DarkCyan,
        Some(Color::White) => C::Grey,
        Some(Color::BrightBlack) => C::DarkGrey,
        Some(Color::BrightRed) => C::Red,
        Some(Color::BrightGreen) => C::Green,
        Some(Color::BrightYellow) => C::Yellow,
        Some(Color::BrightBlue) => C::Blue,
        Some(Color::BrightMagenta) => C::Magenta,
        Some(Color::BrightCyan) => C::Cyan,
        Some(Color::BrightWhite) => C::White,
        Some(Color::Ansi256(n)) => C::AnsiValue(n),
        Some(Color::Rgb(r, g, b)) => C::Rgb { r, g, b },
    }
}

fn to_crossterm_attributes(attrs: Attributes) -> crossterm::style::Attributes {
    use crossterm::style::Attribute;

    let mut out = crossterm::style::Attributes::default();
    if attrs.contains(Attributes::BOLD) {
        out.set(Attribute::Bold);
    }
    if attrs.contains(Attributes::DIM) {
        out.set(Attribute::Dim);
    }
    if attrs.contains(Attributes::ITALIC) {
        out.set(Attribute::Italic);
    }
    if attrs.contains(Attributes::UNDERLINE) {
        out.set(Attribute::Underlined);
    }
    if attrs.contains(Attributes::STRIKETHROUGH) {
        out.set(Attribute::CrossedOut);
    }
    if attrs.contains(Attributes::INVERSE) {
        out.set(Attribute::Reverse);
    }
    out
}

// === Recording writer ===

/// One recorded `write_at` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteBatch {
    /// Target position of the batch.
    pub at: Cursor,
    /// Instructions in application order.
    pub instructions: Vec<Instruction>,
}

impl WriteBatch {
    /// Concatenated text of all write instructions in this batch.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::Write { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True if the batch ends with an erase-to-end-of-line.
    #[must_use]
    pub fn erases_forward(&self) -> bool {
        matches!(self.instructions.last(), Some(Instruction::EraseForward))
    }
}

/// A [`TerminalWriter`] that records batches instead of producing output.
///
/// Useful for tests and for callers that want to inspect what a redraw pass
/// would emit.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    batches: Vec<WriteBatch>,
}

impl RecordingWriter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches recorded so far, oldest first.
    #[must_use]
    pub fn batches(&self) -> &[WriteBatch] {
        &self.batches
    }

    /// Drain the recorded batches.
    pub fn take_batches(&mut self) -> Vec<WriteBatch> {
        std::mem::take(&mut self.batches)
    }

    /// Discard everything recorded so far.
    pub fn clear(&mut self) {
        self.batches.clear();
    }

    /// Number of recorded batches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

impl TerminalWriter for RecordingWriter {
    fn write_at(&mut self, at: Cursor, batch: &[Instruction]) -> Result<(), WriteError> {
        self.batches.push(WriteBatch {
            at,
            instructions: batch.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ansi_output(at: Cursor, batch: &[Instruction]) -> (String, Cursor) {
        let mut writer = AnsiWriter::new(Vec::new());
        writer.write_at(at, batch).unwrap();
        let cursor = writer.cursor();
        (String::from_utf8(writer.into_inner()).unwrap(), cursor)
    }

    #[test]
    fn rejects_negative_rows() {
        let mut writer = AnsiWriter::new(Vec::new());
        let err = writer
            .write_at(Cursor::new(-1, 0), &[Instruction::EraseLine])
            .unwrap_err();
        assert!(matches!(err, WriteError::OutOfViewport(-1)));
    }

    #[test]
    fn erase_line_emits_clear_sequence() {
        let (out, _) = ansi_output(Cursor::new(0, 0), &[Instruction::EraseLine]);
        assert!(out.contains("\x1b[2K"), "output: {out:?}");
    }

    #[test]
    fn erase_forward_emits_clear_sequence() {
        let (out, _) = ansi_output(Cursor::new(0, 0), &[Instruction::EraseForward]);
        assert!(out.contains("\x1b[K"), "output: {out:?}");
    }

    #[test]
    fn text_is_written_in_order() {
        let batch = [
            Instruction::write(TextStyle::new(), "foo"),
            Instruction::write(TextStyle::new().bold(), "bar"),
        ];
        let (out, _) = ansi_output(Cursor::new(0, 0), &batch);
        let foo = out.find("foo").expect("foo present");
        let bar = out.find("bar").expect("bar present");
        assert!(foo < bar);
    }

    #[test]
    fn cursor_advances_by_display_width() {
        let batch = [Instruction::write(TextStyle::new(), "你好")];
        let (_, cursor) = ansi_output(Cursor::new(2, 0), &batch);
        assert_eq!(cursor, Cursor::new(2, 4));
    }

    #[test]
    fn vertical_movement_is_relative() {
        let mut writer = AnsiWriter::new(Vec::new());
        writer.assume_cursor(Cursor::new(5, 0));
        writer
            .write_at(Cursor::new(2, 0), &[Instruction::EraseLine])
            .unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.contains("\x1b[3A"), "expected MoveUp(3) in {out:?}");
    }

    #[test]
    fn unstyled_batches_emit_no_sgr_reset() {
        let (out, _) = ansi_output(Cursor::new(0, 0), &[Instruction::EraseLine]);
        assert!(!out.contains("\x1b[0m"), "output: {out:?}");
    }

    #[test]
    fn identical_styles_are_applied_once() {
        let style = TextStyle::new().color(crate::style::Color::Red);
        let batch = [
            Instruction::write(style, "aa"),
            Instruction::write(style, "bb"),
        ];
        let (out, _) = ansi_output(Cursor::new(0, 0), &batch);
        // One foreground change for the pair, plus the trailing reset.
        let fg_changes = out.matches("\x1b[38;").count();
        assert_eq!(fg_changes, 1, "output: {out:?}");
    }

    #[test]
    fn recording_writer_captures_batches() {
        let mut writer = RecordingWriter::new();
        writer
            .write_at(
                Cursor::new(1, 0),
                &[
                    Instruction::write(TextStyle::new(), "hi"),
                    Instruction::EraseForward,
                ],
            )
            .unwrap();
        assert_eq!(writer.len(), 1);
        let batch = &writer.batches()[0];
        assert_eq!(batch.at, Cursor::new(1, 0));
        assert_eq!(batch.plain_text(), "hi");
        assert!(batch.erases_forward());
    }
}
