use criterion::{black_box, criterion_group, criterion_main, Criterion};
use openstep_plist::Plist;

/// A synthetic source shaped like a large .glyphs file.
fn big_source(glyphs: usize) -> String {
    let mut out = String::from("{\nfamilyName = \"Bench\";\nglyphs = (\n");
    for ix in 0..glyphs {
        out.push_str(&format!(
            "{{\nglyphname = g{ix};\nlayers = (\n{{\nlayerId = \"M1\";\npaths = (\n{{\nclosed = 1;\nnodes = (\n\"0 0 LINE\",\n\"{ix} 700 LINE\",\n\"600 0 LINE\"\n);\n}}\n);\nwidth = 600;\n}}\n);\nunicode = {ix:04X};\n}},\n"
        ));
    }
    out.push_str(");\n}\n");
    out
}

fn criterion_benchmark(c: &mut Criterion) {
    let source = big_source(5000);
    c.bench_function("parse 5000 glyphs", |b| {
        b.iter(|| Plist::parse(black_box(&source)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
