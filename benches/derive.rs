//! Benchmarks for partitioned vs sequential feature derivation.
//!
//! Measures the throughput of `FeatureDeriver::derive` over synthetic
//! sentence batches, with and without the rayon-backed `parallel` feature.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use razbor::features::{DeriverConfig, FeatureDeriver};
use razbor::{DependencyEdge, Sentence, Token};

const VOCABULARY: &[(&str, &str, &str)] = &[
    ("Мама", "мама", "NOUN"),
    ("мыла", "мыть", "VERB"),
    ("новую", "новый", "ADJ"),
    ("раму", "рама", "NOUN"),
    ("на", "на", "ADP"),
    ("кухне", "кухня", "NOUN"),
    ("вчера", "вчера", "ADV"),
    ("очень", "очень", "ADV"),
    ("тщательно", "тщательно", "ADV"),
    ("и", "и", "CCONJ"),
    ("долго", "долго", "ADV"),
    (".", ".", "PUNCT"),
];

fn synthetic_sentences(count: usize) -> Vec<Sentence> {
    (0..count)
        .map(|s| {
            let mut tokens = Vec::with_capacity(VOCABULARY.len());
            let mut deps = Vec::with_capacity(VOCABULARY.len());
            let mut offset = s * 100;
            for (i, (form, lemma, upos)) in VOCABULARY.iter().enumerate() {
                let end = offset + form.len();
                tokens.push(
                    Token::new(*form, *lemma, *upos, offset, end)
                        .with_feat("Case", if i % 2 == 0 { "Nom" } else { "Acc" }),
                );
                deps.push(if i == 1 {
                    DependencyEdge::root("root")
                } else {
                    DependencyEdge::to_parent(1, "dep")
                });
                offset = end + 1;
            }
            Sentence::new(tokens, deps).unwrap()
        })
        .collect()
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_derivation");
    group.sample_size(20);

    for &sentence_count in &[16, 64, 256] {
        let sentences = synthetic_sentences(sentence_count);

        let sequential = FeatureDeriver::with_config(DeriverConfig {
            partitions: 1,
            ..DeriverConfig::default()
        });
        group.bench_with_input(
            BenchmarkId::new("sequential", sentence_count),
            &sentences,
            |b, sentences| b.iter(|| black_box(sequential.derive(black_box(sentences)))),
        );

        #[cfg(feature = "parallel")]
        {
            let partitioned = FeatureDeriver::with_config(DeriverConfig {
                partitions: 8,
                ..DeriverConfig::default()
            });
            group.bench_with_input(
                BenchmarkId::new("partitioned", sentence_count),
                &sentences,
                |b, sentences| b.iter(|| black_box(partitioned.derive(black_box(sentences)))),
            );
        }
    }

    group.finish();
}

fn bench_ancestor_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("ancestor_features");
    group.sample_size(20);

    let sentences = synthetic_sentences(64);
    for &enabled in &[false, true] {
        let deriver = FeatureDeriver::with_config(DeriverConfig {
            ancestor_features: enabled,
            ..DeriverConfig::default()
        });
        group.bench_with_input(
            BenchmarkId::new("ancestors", enabled),
            &sentences,
            |b, sentences| b.iter(|| black_box(deriver.derive(black_box(sentences)))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_derive, bench_ancestor_features);
criterion_main!(benches);
