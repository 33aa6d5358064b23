//! Flicker-free in-place line redrawing for live terminal displays.
//!
//! liveline keeps single lines of styled text ("labels") current inside a
//! live-updating terminal region - the moving part of progress displays and
//! build consoles, where new output scrolls the viewport while status lines
//! rewrite themselves in place.
//!
//! Each [`RedrawableLabel`](label::RedrawableLabel) diffs its desired content
//! against what it last wrote and emits the minimum batch of cursor-movement,
//! write and erase instructions needed to reconcile the two. There is no
//! screen buffer to read back from: all state is reconstructed from deltas,
//! which is what lets labels stay correct while the terminal scrolls
//! underneath them.
//!
//! # Pipeline
//!
//! ```text
//! ┌────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────┐
//! │ StyledSpan │ -> │ Redrawable   │ -> │ Instruction  │ -> │ Terminal │
//! │ content    │    │ Label (diff) │    │ batch        │    │ (ANSI)   │
//! └────────────┘    └──────────────┘    └──────────────┘    └──────────┘
//! ```
//!
//! A driving render loop mutates label content, visibility and scroll state
//! between frames, then calls `redraw()` once per label per pass. Labels that
//! detect no change emit nothing.
//!
//! # Example
//!
//! ```
//! use liveline::cursor::SharedCursor;
//! use liveline::label::RedrawableLabel;
//! use liveline::style::{Color, StyledSpan};
//! use liveline::writer::RecordingWriter;
//!
//! // In production, wrap stdout: AnsiWriter::new(std::io::stdout())
//! let mut writer = RecordingWriter::new();
//!
//! let mut status = RedrawableLabel::new(SharedCursor::at(0, 0));
//! status.set_spans([
//!     StyledSpan::new("> ").color(Color::Green),
//!     StyledSpan::new("compiling core").bold(),
//! ]);
//! status.redraw(&mut writer).unwrap();
//!
//! // A frame later: same content, no output.
//! status.redraw(&mut writer).unwrap();
//! assert_eq!(writer.len(), 1);
//!
//! // The display scrolled one line; the label rewrites itself.
//! status.new_line_adjustment();
//! status.scroll_by(1);
//! status.redraw(&mut writer).unwrap();
//! assert_eq!(writer.len(), 2);
//! ```
//!
//! # Concurrency
//!
//! The crate is single-threaded by design: one render loop drives all labels
//! and serializes every redraw. Mutating a label from another thread during a
//! redraw is not supported. The [`SharedCursor`](cursor::SharedCursor) handle
//! exists for sibling labels on one physical row, not for cross-thread
//! coordination.

#![warn(missing_docs)]

pub mod ansi;
pub mod cursor;
pub mod label;
pub mod style;
pub mod writer;

/// Commonly used types, importable as a block.
pub mod prelude {
    pub use crate::ansi::{parse_ansi, strip_ansi};
    pub use crate::cursor::{Cursor, SharedCursor};
    pub use crate::label::RedrawableLabel;
    pub use crate::style::{Attributes, Color, StyledSpan, StyledSpanOwned, TextStyle};
    pub use crate::writer::{
        AnsiWriter, Instruction, RecordingWriter, TerminalWriter, WriteBatch, WriteError,
    };
}
