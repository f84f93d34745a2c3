// Criterion benchmarks for spellrank.
//
// Run:
//   cargo bench -p spellrank

use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use spellrank::context::extract_context;
use spellrank::{
    AnalyzedSentence, Collaborators, NgramCountModel, NoopTagger, RankerConfig,
    SimpleWordTokenizer, SuggestionRanker,
};

const SENTENCE: &str = "the hoose is big and the garden around the hoose is small";

fn candidates() -> Vec<String> {
    ["hose", "horse", "house", "hoosier", "goose", "moose", "noose", "loose"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn language_model() -> Arc<NgramCountModel> {
    Arc::new(NgramCountModel::from_counts([
        (vec!["the"], 400),
        (vec!["house"], 120),
        (vec!["horse"], 30),
        (vec!["hose"], 10),
        (vec!["goose"], 8),
        (vec!["loose"], 25),
        (vec!["is"], 300),
        (vec!["big"], 80),
        (vec!["the", "house"], 60),
        (vec!["the", "house", "is"], 30),
        (vec!["house", "is"], 50),
        (vec!["house", "is", "big"], 20),
        (vec!["the", "horse"], 10),
    ]))
}

fn ranker(policy: &str) -> SuggestionRanker {
    let config = RankerConfig {
        policy: policy.to_string(),
        mistake_probability: 0.05,
        ..RankerConfig::default()
    };
    let collaborators = Collaborators {
        language_model: Some(language_model()),
        ..Collaborators::default()
    };
    SuggestionRanker::new(&config, collaborators).expect("valid config")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_policies(c: &mut Criterion) {
    let sentence = AnalyzedSentence::analyze(SENTENCE, &SimpleWordTokenizer, &NoopTagger);
    let candidates = candidates();
    for policy in ["ngrams", "ngrams+levensthein", "ngrams+binomialLevensthein"] {
        let ranker = ranker(policy);
        c.bench_function(&format!("rank_{policy}"), |b| {
            b.iter(|| {
                std::hint::black_box(ranker.rank_suggestions(&candidates, "hoose", &sentence, 4))
            });
        });
    }
}

fn bench_rank_text(c: &mut Criterion) {
    let ranker = ranker("ngrams");
    let candidates = candidates();
    c.bench_function("rank_text", |b| {
        b.iter(|| std::hint::black_box(ranker.rank_text(&candidates, "hoose", SENTENCE, 4)));
    });
}

fn bench_context(c: &mut Criterion) {
    c.bench_function("extract_context", |b| {
        b.iter(|| std::hint::black_box(extract_context(SENTENCE, "hoose", 43, 2)));
    });
}

criterion_group!(benches, bench_policies, bench_rank_text, bench_context);
criterion_main!(benches);
