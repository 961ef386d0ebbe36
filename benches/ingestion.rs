use std::hint::black_box;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, Criterion};

use player_ranking::ingestion::csv::ingest_players_from_str;
use player_ranking::ingestion::{IngestionContext, NoopObserver, TextEncoding};
use player_ranking::processing::rank;

fn sample_csv(rows: usize) -> String {
    let mut out = String::from("nome,nivel,pontuacao\n");
    for i in 0..rows {
        match i % 10 {
            // Roughly one bad row in ten, one blank line in ten.
            0 => out.push_str(&format!("Player{i},x,{i}.5\n")),
            5 => out.push('\n'),
            _ => out.push_str(&format!("Player{i},{},{}.25\n", i % 50, (i * 7) % 1000)),
        }
    }
    out
}

fn bench_ingestion(c: &mut Criterion) {
    let text = sample_csv(10_000);
    let ctx = IngestionContext {
        path: PathBuf::from("<bench>"),
        encoding: TextEncoding::Utf8,
    };

    c.bench_function("ingest_players_10k", |b| {
        b.iter(|| ingest_players_from_str(black_box(&text), &ctx, &NoopObserver).unwrap())
    });

    let report = ingest_players_from_str(&text, &ctx, &NoopObserver).unwrap();
    c.bench_function("rank_players_10k", |b| b.iter(|| rank(black_box(&report.records))));

    c.bench_function("decode_latin1_10k", |b| {
        b.iter(|| TextEncoding::Latin1.decode(black_box(text.as_bytes())).unwrap())
    });
}

criterion_group!(benches, bench_ingestion);
criterion_main!(benches);
