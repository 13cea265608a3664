use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Deserialize;
use serde_ini::{decode, from_str, parse};
use std::time::Duration;

#[derive(Deserialize, Default)]
#[allow(dead_code)]
struct Server {
    host: String,
    port: u16,
    workers: u32,
    debug: bool,
    #[serde(with = "serde_ini::with::duration")]
    timeout: Duration,
}

#[derive(Deserialize, Default)]
#[allow(dead_code, non_snake_case)]
struct Config {
    Server: Server,
}

const SERVER: &str = "[Server]\nhost=localhost\nport=8080\nworkers=16\ndebug=false\ntimeout=1m30s\n";

fn large_document(sections: usize) -> String {
    let mut text = String::from(SERVER);
    for i in 0..sections {
        text.push_str(&format!("\n; filler {i}\n[Extra{i}]\n"));
        for k in 0..10 {
            text.push_str(&format!("key{k}=value {i} {k}\n"));
        }
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = large_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text.as_bytes())))
        });
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let document = parse(SERVER.as_bytes()).unwrap();

    c.bench_function("decode_in_place", |b| {
        let mut config = Config::default();
        b.iter(|| decode(black_box(&document), &mut config))
    });
}

fn benchmark_from_str(c: &mut Criterion) {
    c.bench_function("from_str_simple", |b| {
        b.iter(|| from_str::<Config>(black_box(SERVER)))
    });
}

criterion_group!(benches, benchmark_parse, benchmark_decode, benchmark_from_str);
criterion_main!(benches);
