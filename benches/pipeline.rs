//! Throughput of the indexing pipeline over a synthetic corpus
//!
//! Measures trie construction on its own, stem collapsing on a freshly built
//! trie, and the full pass through the [`Indexer`].

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lexitrie::{Indexer, IrregularTable, LearningPhase, TrackedWord, Trie};

const SENTENCES: &[&str] = &[
    "The cat runs across the garden while the dogs are sleeping.",
    "Children went home after school, and a child goes home alone.",
    "She walked to work, he walks to the station, they are walking together.",
    "The boxes were stacked in the kitchen; the box's lid was missing.",
    "We studied the maps, then she studies the notes he'd written.",
    "Leaves fall in autumn. A leaf fell on the wolf's back.",
    "I'm sure they've finished, but you'll have to check what's left.",
    "Running is hard, so the runner ran slower than the other runners.",
];

fn corpus(repeat: usize) -> String {
    let mut text = String::new();
    for _ in 0..repeat {
        for sentence in SENTENCES {
            text.push_str(sentence);
            text.push(' ');
        }
    }
    text
}

fn bench_pipeline(c: &mut Criterion) {
    let tracked = vec![
        TrackedWord::new("cat", LearningPhase::Acquainted),
        TrackedWord::new("walk", LearningPhase::Retaining),
        TrackedWord::new("child", LearningPhase::Fading),
    ];
    let indexer = Indexer::builder()
        .english_irregulars()
        .tracked_words(tracked)
        .build();
    let irregulars = IrregularTable::english();

    let mut group = c.benchmark_group("Pipeline");

    for repeat in [1usize, 16, 128] {
        let text = corpus(repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("build", repeat), &text, |b, text| {
            b.iter(|| {
                let mut trie = Trie::new();
                trie.add(black_box(text));
                trie
            });
        });

        group.bench_with_input(BenchmarkId::new("collapse+link", repeat), &text, |b, text| {
            b.iter_with_setup(
                || {
                    let mut trie = Trie::new();
                    trie.add(text);
                    trie
                },
                |mut trie| {
                    trie.collapse_stems();
                    trie.merge_derived_word_into_stem(&irregulars);
                    trie
                },
            );
        });

        group.bench_with_input(BenchmarkId::new("index", repeat), &text, |b, text| {
            b.iter(|| indexer.index(black_box(text)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
