use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use corpusprep::extract::FieldExtractor;
use corpusprep::normalize::Normalizer;
use corpusprep::record::DatasetRecord;

const NB_UNITS: usize = 1_000;

// bench protocol:
//
// - normalization of NB_UNITS utterances, with and without NFKC
// - extraction + normalization of NB_UNITS dialog records
fn utterances() -> Vec<String> {
    (0..NB_UNITS)
        .map(|i| {
            format!(
                "  Turn {}:\tHow are   you doing today?\r\n ｆｕｌｌｗｉｄｔｈ  and 你好，世界 ",
                i
            )
        })
        .collect()
}

fn normalize_all(normalizer: &Normalizer, units: &[String]) -> usize {
    units.iter().map(|u| normalizer.normalize(u).len()).sum()
}

fn extract_and_normalize(records: &[DatasetRecord]) -> usize {
    let extractor = FieldExtractor::default();
    let normalizer = Normalizer::default();
    records
        .iter()
        .filter_map(|r| extractor.extract(r))
        .flat_map(|e| e.units)
        .map(|u| normalizer.normalize(&u).len())
        .sum()
}

fn bench_normalize(c: &mut Criterion) {
    let units = utterances();
    let records: Vec<DatasetRecord> = units
        .chunks(4)
        .map(|chunk| {
            let line = serde_json::json!({ "id": 0, "dialog": chunk }).to_string();
            DatasetRecord::from_json_str(&line).unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("Normalize");
    for nfkc in [true, false].iter() {
        group.bench_with_input(BenchmarkId::new("normalize", nfkc), nfkc, |b, nfkc| {
            let normalizer = Normalizer::new(*nfkc);
            b.iter(|| normalize_all(&normalizer, &units))
        });
    }
    group.bench_function("extract_and_normalize", |b| {
        b.iter(|| extract_and_normalize(&records))
    });
    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
