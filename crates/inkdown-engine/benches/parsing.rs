use std::fmt::Write as _;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use inkdown_engine::Processor;

fn synthetic_document(sections: usize) -> String {
    let mut out = String::new();
    for i in 0..sections {
        let _ = writeln!(out, "# Section {i} {{#s{i}}}\n");
        let _ = writeln!(
            out,
            "Paragraph with _emphasis_, *strong text*, `code spans` and a \
             [link](/page/{i}) plus an entity &amp; here.\n"
        );
        out.push_str("* first item\n* second item with ~strike~\n* third\n\n");
        out.push_str("```\nfn bench() { body(); }\n```\n\n");
        let _ = writeln!(out, "Formula $$x_{i} < y$$ closes the section.\n");
    }
    out
}

fn bench_to_html(c: &mut Criterion) {
    let small = synthetic_document(4);
    let large = synthetic_document(64);
    let processor = Processor::new();

    c.bench_function("to_html/small", |b| {
        b.iter(|| processor.to_html(black_box(&small)).unwrap());
    });
    c.bench_function("to_html/large", |b| {
        b.iter(|| processor.to_html(black_box(&large)).unwrap());
    });
}

criterion_group!(benches, bench_to_html);
criterion_main!(benches);
