use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::str::FromStr;
use yaml_contents::YamlContents;

/// A settings file with `sections` blocks of commented entries, a block
/// scalar and a sequence each.
fn settings_file(sections: usize) -> String {
    let mut text = String::from("# Generated settings\n\n");
    for i in 0..sections {
        text.push_str(&format!("section_{}: &section_{}\n", i, i));
        text.push_str(&format!("  name: \"Section {}\" # display name\n", i));
        text.push_str("  enabled: true # toggled by ops\n");
        text.push_str(&format!("  retries: {} # per request\n", i % 7));
        text.push_str("  script: |\n    echo start: now # not a comment\n    echo done\n");
        text.push_str("  hosts:\n    - alpha.example.com # primary\n    - beta.example.com\n");
        text.push_str("  nested:\n    deeper:\n      key: <%= ENV['VALUE'] %>\n\n");
    }
    text
}

fn bench_parse_and_render(c: &mut Criterion) {
    let yaml = settings_file(200);
    c.bench_function("parse_and_render", |b| {
        b.iter(|| {
            let parsed = YamlContents::from_str(black_box(&yaml)).unwrap();
            black_box(parsed.to_string())
        })
    });
}

fn bench_set_key(c: &mut Criterion) {
    let yaml = settings_file(200);
    let doc = YamlContents::from_str(&yaml).unwrap();
    c.bench_function("set_key_late_section", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            doc.set_key(black_box("section_199.nested.deeper.key"), "value")
                .unwrap();
            black_box(doc)
        })
    });
}

fn bench_add_key(c: &mut Criterion) {
    let yaml = settings_file(200);
    let doc = YamlContents::from_str(&yaml).unwrap();
    c.bench_function("add_key_new_branch", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            doc.add_key(black_box("section_100.extra.deep.flag"), true)
                .unwrap();
            black_box(doc)
        })
    });
}

fn bench_realign(c: &mut Criterion) {
    let yaml = settings_file(200);
    c.bench_function("realign", |b| {
        b.iter(|| {
            let mut doc = YamlContents::from_str(black_box(&yaml)).unwrap();
            black_box(doc.realign())
        })
    });
}

criterion_group!(
    benches,
    bench_parse_and_render,
    bench_set_key,
    bench_add_key,
    bench_realign
);
criterion_main!(benches);
