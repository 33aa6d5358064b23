//! The redrawable label: one live line that keeps itself current.
//!
//! A label owns its desired content and a snapshot of what was last written,
//! and emits the minimum instruction batch needed to reconcile the two. It
//! never reads the terminal back; everything is reconstructed from deltas.
//!
//! Two coordinate frames are tracked. The write position is
//! viewport-relative and shared with sibling labels through a
//! [`SharedCursor`]; its row goes negative when the label scrolls above the
//! visible window. The absolute row is a lifetime counter that only moves
//! with scroll adjustments and never resets - it exists solely to answer
//! "has this line's identity changed since the last write", independent of
//! viewport clipping.
//!
//! # Example
//!
//! ```
//! use liveline::cursor::SharedCursor;
//! use liveline::label::RedrawableLabel;
//! use liveline::style::{Color, StyledSpan};
//! use liveline::writer::RecordingWriter;
//!
//! let mut label = RedrawableLabel::new(SharedCursor::at(0, 0));
//! let mut writer = RecordingWriter::new();
//!
//! label.set_text(StyledSpan::new("building...").color(Color::Yellow));
//! label.redraw(&mut writer).unwrap();
//! assert_eq!(writer.batches()[0].plain_text(), "building...");
//!
//! // Unchanged content redraws to nothing.
//! label.redraw(&mut writer).unwrap();
//! assert_eq!(writer.len(), 1);
//! ```

use smallvec::SmallVec;

use crate::cursor::{Cursor, SharedCursor};
use crate::style::StyledSpanOwned;
use crate::writer::{Instruction, InstructionBatch, TerminalWriter, WriteError};

/// A single styled line rendered into a live terminal region.
///
/// Driven by an external render loop: mutate content, visibility and scroll
/// state freely between frames, then call [`redraw`](Self::redraw) once per
/// pass. Concurrent mutation while a redraw is in progress is not supported;
/// the owning loop must serialize access.
pub struct RedrawableLabel {
    // Relative coordinate frame, shared with siblings on the same row.
    write_pos: SharedCursor,
    spans: Vec<StyledSpanOwned>,
    written_spans: Vec<StyledSpanOwned>,
    // Absolute coordinate frame.
    absolute_row: i64,
    last_written_row: i64,
    visible: bool,
    was_visible: bool,
}

impl RedrawableLabel {
    /// Create a label writing at the given shared position.
    ///
    /// The label starts visible and empty.
    #[must_use]
    pub fn new(write_pos: SharedCursor) -> Self {
        Self {
            write_pos,
            spans: Vec::new(),
            written_spans: Vec::new(),
            absolute_row: 0,
            last_written_row: 0,
            visible: true,
            was_visible: true,
        }
    }

    /// Replace the desired content with a single span.
    ///
    /// Accepts anything convertible to an owned span, including plain `&str`.
    /// No I/O happens until the next [`redraw`](Self::redraw).
    pub fn set_text(&mut self, text: impl Into<StyledSpanOwned>) {
        self.spans = vec![text.into()];
    }

    /// Replace the desired content with a span sequence.
    ///
    /// An empty sequence clears the label on the next redraw.
    pub fn set_spans<I, S>(&mut self, spans: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<StyledSpanOwned>,
    {
        self.spans = spans.into_iter().map(Into::into).collect();
    }

    /// The desired content.
    #[must_use]
    pub fn spans(&self) -> &[StyledSpanOwned] {
        &self.spans
    }

    /// Show or hide the label. No I/O until the next redraw.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the label is currently set visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Handle to the label's shared write position.
    #[must_use]
    pub fn write_position(&self) -> SharedCursor {
        self.write_pos.clone()
    }

    /// The label's row in the lifetime-absolute frame.
    #[must_use]
    pub fn absolute_row(&self) -> i64 {
        self.absolute_row
    }

    /// True if `cursor` sits on this label's row, left of where the label's
    /// written content ends.
    ///
    /// Pure query; used by layout callers to detect collisions on shared
    /// rows.
    #[must_use]
    pub fn is_overlapping(&self, cursor: &Cursor) -> bool {
        let pos = self.write_pos.get();
        cursor.row == pos.row && pos.col > cursor.col
    }

    /// Reconcile the terminal with the desired state.
    ///
    /// Emits at most one instruction batch. A label whose relative row is
    /// negative is above the viewport and produces no output regardless of
    /// any other state. Writer failures propagate unchanged.
    pub fn redraw<W>(&mut self, writer: &mut W) -> Result<(), WriteError>
    where
        W: TerminalWriter + ?Sized,
    {
        let pos = self.write_pos.get();
        if pos.row < 0 {
            // Out of bounds; nothing may be drawn or recorded.
            return Ok(());
        }

        if !self.visible && self.was_visible {
            if self.last_written_row == self.absolute_row && self.written_spans.is_empty() {
                // Never actually drawn, nothing to erase.
                self.was_visible = false;
                return Ok(());
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(row = pos.row, "erasing hidden label");

            writer.write_at(pos, &[Instruction::EraseLine])?;
            self.written_spans.clear();
        }

        if self.visible {
            if self.last_written_row == self.absolute_row && self.written_spans == self.spans {
                // Line identity and content unchanged since the last write.
                self.was_visible = true;
                return Ok(());
            }

            let written_len = pos.col;
            self.write_pos.set_col(0);

            let mut batch: InstructionBatch = SmallVec::with_capacity(self.spans.len() + 1);
            let mut new_len: u16 = 0;
            for span in &self.spans {
                new_len += span.display_width();
                batch.push(Instruction::Write {
                    style: span.style,
                    text: span.text.clone().into_owned(),
                });
            }

            // A changed line identity invalidates the whole line; on the
            // same line, shorter content leaves stale trailing characters.
            // Either way the tail must be erased.
            if self.last_written_row != self.absolute_row || new_len < written_len {
                batch.push(Instruction::EraseForward);
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(row = pos.row, columns = new_len, "rewriting label");

            writer.write_at(Cursor::new(pos.row, 0), &batch)?;

            self.write_pos.set_col(new_len);
            self.written_spans = self.spans.clone();
            self.last_written_row = self.absolute_row;
        }

        self.was_visible = self.visible;
        Ok(())
    }

    /// A line was inserted above this label within the current viewport,
    /// without the viewport itself scrolling. Only the relative frame moves.
    pub fn new_line_adjustment(&mut self) {
        self.write_pos.adjust_row(1);
    }

    /// The viewport scrolled up by `rows`: content moved toward the top, so
    /// the relative row decreases while the absolute row advances.
    pub fn scroll_by(&mut self, rows: i32) {
        self.write_pos.adjust_row(-rows);
        self.absolute_row += i64::from(rows);
    }

    /// Sign-adjusted convenience for [`scroll_by`](Self::scroll_by).
    pub fn scroll_up_by(&mut self, rows: i32) {
        self.scroll_by(-rows);
    }

    /// Sign-adjusted convenience for [`scroll_by`](Self::scroll_by).
    pub fn scroll_down_by(&mut self, rows: i32) {
        self.scroll_by(rows);
    }
}
