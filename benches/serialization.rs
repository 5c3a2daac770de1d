use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use yamlite::{from_str, parse, serialize, to_string, Value};

#[derive(Serialize, Deserialize, Clone)]
struct Server {
    host: String,
    port: u16,
    debug: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct NavEntry {
    name: String,
    url: String,
}

#[derive(Serialize, Deserialize, Clone)]
struct Site {
    title: String,
    server: Server,
    nav: Vec<NavEntry>,
    tags: Vec<String>,
}

fn sample_site(nav_len: usize) -> Site {
    Site {
        title: "Notes".to_string(),
        server: Server {
            host: "localhost".to_string(),
            port: 4321,
            debug: false,
        },
        nav: (0..nav_len)
            .map(|i| NavEntry {
                name: format!("page{}", i),
                url: format!("/page{}", i),
            })
            .collect(),
        tags: vec!["rust".to_string(), "config".to_string()],
    }
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let server = Server {
        host: "localhost".to_string(),
        port: 4321,
        debug: false,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&server)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "host: localhost\nport: 4321\ndebug: false\n";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<Server>(black_box(text)))
    });
}

fn benchmark_serialize_nested(c: &mut Criterion) {
    let site = sample_site(3);

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&site)))
    });
}

fn benchmark_deserialize_nested(c: &mut Criterion) {
    let text = to_string(&sample_site(3)).unwrap();

    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| from_str::<Site>(black_box(&text)))
    });
}

fn benchmark_sequence_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_scaling");

    for size in [10, 50, 100, 500].iter() {
        let site = sample_site(*size);
        let text = to_string(&site).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &site, |b, site| {
            b.iter(|| to_string(black_box(site)))
        });
        group.bench_with_input(BenchmarkId::new("deserialize", size), &text, |b, text| {
            b.iter(|| from_str::<Site>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_parse_to_value(c: &mut Criterion) {
    let text = to_string(&sample_site(20)).unwrap();

    c.bench_function("parse_to_value_tree", |b| {
        b.iter(|| parse(black_box(&text)))
    });

    let doc = Value::Mapping(parse(&text).unwrap());
    c.bench_function("serialize_value_tree", |b| {
        b.iter(|| serialize(black_box(&doc)))
    });
}

fn benchmark_comment_heavy_document(c: &mut Criterion) {
    let mut text = String::new();
    for i in 0..100 {
        text.push_str("# section comment\n");
        text.push_str(&format!("key{}: value{} # trailing note\n", i, i));
    }

    c.bench_function("parse_comment_heavy", |b| {
        b.iter(|| parse(black_box(&text)))
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let site = sample_site(3);

    c.bench_function("roundtrip_nested", |b| {
        b.iter(|| {
            let serialized = to_string(black_box(&site)).unwrap();
            let _deserialized: Site = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_nested,
    benchmark_deserialize_nested,
    benchmark_sequence_scaling,
    benchmark_parse_to_value,
    benchmark_comment_heavy_document,
    benchmark_roundtrip
);
criterion_main!(benches);
