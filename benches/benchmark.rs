//! Benchmarks for transcript_topics

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use transcript_topics::*;

/// Build a synthetic script of `lines` utterances across two speakers
fn synthetic_script(lines: usize) -> String {
    let themes = [
        "ross: the dinosaurs at the museum were amazing today",
        "rachel: this coffee and the muffins taste wonderful",
        "joey: the sandwich at lunch was incredible honestly",
    ];
    (0..lines)
        .map(|i| format!("{} take{}\n", themes[i % themes.len()], i))
        .collect()
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_by_size");
    for size in [100, 500, 2000].iter() {
        let script = synthetic_script(*size);
        group.throughput(Throughput::Bytes(script.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &script, |b, script| {
            b.iter(|| normalize_script(black_box(script)))
        });
    }
    group.finish();
}

fn benchmark_phrase_fit(c: &mut Criterion) {
    let utterances = normalize_script(&synthetic_script(2000));
    let chunks = chunk::chunk_utterances(&utterances, 40).unwrap();
    let tokenized: Vec<Vec<String>> = chunks.iter().map(|ch| nlp::tokenize(ch)).collect();

    c.bench_function("phrase_fit", |b| {
        b.iter(|| PhraseModel::fit(black_box(&tokenized), &PhraseConfig::default()))
    });
}

fn benchmark_lexical_filter(c: &mut Criterion) {
    let utterances = normalize_script(&synthetic_script(500));
    let chunks = chunk::chunk_utterances(&utterances, 40).unwrap();
    let tokenized: Vec<Vec<String>> = chunks.iter().map(|ch| nlp::tokenize(ch)).collect();
    let lemmatizer = RuleLemmatizer::new();
    let stopwords = StopwordFilter::english();

    c.bench_function("lexical_filter", |b| {
        b.iter(|| {
            tokenized
                .iter()
                .map(|toks| {
                    nlp::annotator::lexical_filter(
                        black_box(toks),
                        &lemmatizer,
                        &stopwords,
                        PosTag::Noun,
                    )
                })
                .collect::<Vec<_>>()
        })
    });
}

fn benchmark_lda_fit(c: &mut Criterion) {
    let utterances = normalize_script(&synthetic_script(1000));
    let chunks = chunk::chunk_utterances(&utterances, 40).unwrap();
    let tokenized: Vec<Vec<String>> = chunks.iter().map(|ch| nlp::tokenize(ch)).collect();
    let lemmatizer = RuleLemmatizer::new();
    let stopwords = StopwordFilter::english();
    let streams: Vec<Vec<String>> = tokenized
        .iter()
        .map(|toks| nlp::annotator::lexical_filter(toks, &lemmatizer, &stopwords, PosTag::Noun))
        .collect();
    let vocab = Vocabulary::build(&streams);
    let docs = vocab.encode_all(&streams);

    let mut group = c.benchmark_group("lda_fit");
    group.sample_size(10);
    for topics in [5, 15].iter() {
        let config = LdaConfig::default().with_num_topics(*topics);
        group.bench_with_input(BenchmarkId::from_parameter(topics), &config, |b, config| {
            b.iter(|| LdaModel::fit(black_box(&docs), &vocab, config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_phrase_fit,
    benchmark_lexical_filter,
    benchmark_lda_fit
);
criterion_main!(benches);
