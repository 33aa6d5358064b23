//! Benchmarks for the redraw hot path.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use liveline::cursor::{Cursor, SharedCursor};
use liveline::label::RedrawableLabel;
use liveline::style::{Color, StyledSpan};
use liveline::writer::{AnsiWriter, Instruction, TerminalWriter, WriteError};

/// Discards batches; isolates the diffing cost from output encoding.
struct NullWriter;

impl TerminalWriter for NullWriter {
    fn write_at(&mut self, _at: Cursor, batch: &[Instruction]) -> Result<(), WriteError> {
        black_box(batch);
        Ok(())
    }
}

fn bench_settled_redraw(c: &mut Criterion) {
    let mut label = RedrawableLabel::new(SharedCursor::at(0, 0));
    let mut writer = NullWriter;
    label.set_spans([
        StyledSpan::new("> ").color(Color::Green),
        StyledSpan::new("assemble").bold(),
        StyledSpan::new(" 73%"),
    ]);
    label.redraw(&mut writer).unwrap();

    c.bench_function("settled_redraw", |b| {
        b.iter(|| label.redraw(&mut writer).unwrap());
    });
}

fn bench_content_churn(c: &mut Criterion) {
    let mut label = RedrawableLabel::new(SharedCursor::at(0, 0));
    let mut writer = NullWriter;
    let frames = [
        vec![StyledSpan::new("downloading 10%").color(Color::Cyan)],
        vec![StyledSpan::new("downloading 100%").color(Color::Cyan)],
    ];

    c.bench_function("content_churn", |b| {
        let mut i = 0usize;
        b.iter(|| {
            label.set_spans(frames[i % 2].clone());
            label.redraw(&mut writer).unwrap();
            i += 1;
        });
    });
}

fn bench_scroll_churn(c: &mut Criterion) {
    // Start far down so the row stays non-negative for the whole run.
    let mut label = RedrawableLabel::new(SharedCursor::at(i32::MAX, 0));
    let mut writer = NullWriter;
    label.set_text("steady content");
    label.redraw(&mut writer).unwrap();

    c.bench_function("scroll_churn", |b| {
        b.iter(|| {
            label.scroll_by(1);
            label.redraw(&mut writer).unwrap();
        });
    });
}

fn bench_ansi_encoding(c: &mut Criterion) {
    let mut label = RedrawableLabel::new(SharedCursor::at(0, 0));
    let mut writer = AnsiWriter::new(std::io::sink());
    let frames = [
        vec![
            StyledSpan::new("> ").color(Color::Green),
            StyledSpan::new("compiling").bold(),
        ],
        vec![
            StyledSpan::new("> ").color(Color::Green),
            StyledSpan::new("linking").bold(),
        ],
    ];

    c.bench_function("ansi_encoding", |b| {
        let mut i = 0usize;
        b.iter(|| {
            label.set_spans(frames[i % 2].clone());
            label.redraw(&mut writer).unwrap();
            i += 1;
        });
    });
}

criterion_group!(
    benches,
    bench_settled_redraw,
    bench_content_churn,
    bench_scroll_churn,
    bench_ansi_encoding
);
criterion_main!(benches);
