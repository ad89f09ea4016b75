//! Benchmarks for document rendering.

use bean::render::{RenderOptions, Renderer, format_inline};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn fixture_lines() -> Vec<String> {
    include_str!("../tests/fixtures/sample.md")
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}

fn bench_render_fixture(c: &mut Criterion) {
    let lines = fixture_lines();
    let renderer = Renderer::new(RenderOptions::with_width(80));
    c.bench_function("render_fixture", |b| {
        b.iter(|| renderer.render(black_box(&lines)))
    });
}

fn bench_render_long_paragraph(c: &mut Criterion) {
    let lines: Vec<String> = (0..200)
        .map(|i| format!("Line {i} of a long paragraph with **bold** and `code` spans."))
        .collect();
    let renderer = Renderer::new(RenderOptions::with_width(72));
    c.bench_function("render_long_paragraph", |b| {
        b.iter(|| renderer.render(black_box(&lines)))
    });
}

fn bench_format_inline(c: &mut Criterion) {
    let line = "**Paragraph** _with_ `code` ~~in it~~ `**and such**` and *more* text.";
    c.bench_function("format_inline", |b| b.iter(|| format_inline(black_box(line))));
}

criterion_group!(benches, bench_render_fixture, bench_render_long_paragraph, bench_format_inline);
criterion_main!(benches);
