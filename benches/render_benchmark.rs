//! Benchmarks for msvg rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic MSVG documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic MSVG document with the given number of pages.
fn create_test_msvg(page_count: usize) -> String {
    let mut content = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    content.push_str("<MSVG version=\"1.0\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n<pageSet>\n");

    for i in 0..page_count {
        content.push_str("<Page>\n<svg viewBox=\"0 0 210 297\">\n");
        for j in 0..50 {
            content.push_str(&format!(
                "<path d=\"M{} {} L{} {} Z\" stroke=\"#333\" fill=\"none\"/>\n",
                j,
                i,
                j * 2,
                i * 3
            ));
        }
        content.push_str(&format!("<text x=\"10\" y=\"20\">Page {}</text>\n", i + 1));
        content.push_str("</svg>\n</Page>\n");
    }

    content.push_str("</pageSet>\n</MSVG>\n");
    content
}

/// Benchmark root-element sniffing.
fn bench_detection(c: &mut Criterion) {
    let msvg = create_test_msvg(10);

    c.bench_function("detect_kind", |b| {
        b.iter(|| msvg::detect_kind_from_str(black_box(&msvg)).unwrap());
    });
}

/// Benchmark full rendering at various sizes.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for page_count in [1, 10, 50].iter() {
        let text = create_test_msvg(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| msvg::render(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark the HTML viewer surface.
fn bench_html(c: &mut Criterion) {
    let result = msvg::render(&create_test_msvg(10));
    let options = msvg::RenderOptions::default();
    let zoom = msvg::ZoomConfig::default();

    c.bench_function("to_html_10_pages", |b| {
        b.iter(|| msvg::render::to_html(black_box(&result), &options, &zoom));
    });
}

/// Benchmark a long run of zoom actions.
fn bench_zoom(c: &mut Criterion) {
    c.bench_function("zoom_1000_steps", |b| {
        b.iter(|| {
            let mut zoom = msvg::ZoomController::new(50_000.0, msvg::ZoomConfig::default());
            for i in 0..1000 {
                let direction = if i % 3 == 0 {
                    msvg::ZoomDirection::Out
                } else {
                    msvg::ZoomDirection::In
                };
                black_box(zoom.zoom(direction, 800.0));
            }
        });
    });
}

criterion_group!(benches, bench_detection, bench_render, bench_html, bench_zoom);
criterion_main!(benches);
