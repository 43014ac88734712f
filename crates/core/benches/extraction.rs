use brevis_core::preprocess::strip_unwanted_elements;
use brevis_core::{Document, SummarizationRequest, SummaryLength, clean_body_text, extract_from_html};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

/// The blog post fixture with its article body repeated `times` times.
fn inflated_post(times: usize) -> String {
    let html = load_fixture("blog_post.html");
    let start = html.find("<article>").unwrap();
    let end = html.find("</article>").unwrap() + "</article>".len();
    let article = &html[start..end];
    format!("{}{}{}", &html[..start], article.repeat(times), &html[end..])
}

fn bench_heuristic_extraction(c: &mut Criterion) {
    let small = load_fixture("blog_post.html");
    let medium = inflated_post(50);
    let large = inflated_post(500);

    let mut group = c.benchmark_group("heuristic_extraction");

    group.bench_with_input(BenchmarkId::new("small", "3KB"), &small, |b, html| {
        b.iter(|| extract_from_html(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("medium", "60KB"), &medium, |b, html| {
        b.iter(|| extract_from_html(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "600KB"), &large, |b, html| {
        b.iter(|| extract_from_html(black_box(html)))
    });

    group.finish();
}

fn bench_preprocess(c: &mut Criterion) {
    let html = inflated_post(50);

    c.bench_function("strip_unwanted_elements", |b| b.iter(|| strip_unwanted_elements(black_box(&html))));
}

fn bench_cleanup(c: &mut Criterion) {
    let html = inflated_post(50);
    let raw = Document::parse(&html).body_text().unwrap_or_default();

    c.bench_function("clean_body_text", |b| b.iter(|| clean_body_text(black_box(&raw))));
}

fn bench_request_building(c: &mut Criterion) {
    let content = "Ownership rules keep memory safe. ".repeat(1_000);

    c.bench_function("summarization_request", |b| {
        b.iter(|| SummarizationRequest::build(Some("Ownership"), black_box(&content), SummaryLength::Medium).messages())
    });
}

criterion_group!(
    benches,
    bench_heuristic_extraction,
    bench_preprocess,
    bench_cleanup,
    bench_request_building
);
criterion_main!(benches);
