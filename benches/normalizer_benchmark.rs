use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vietsent::{
    DisplayNormalizer, ModelPreprocessor, ReferenceData, RuleSegmenter, ValidityChecker,
};

const SHORT: &str = "Ban khoe ko?";
const MEDIUM: &str = "hom nay toi di hoc voi ban be, mon an o quan rat ngon nhung hoi man qua";
const LONG: &str = "toi thay cong viec nay kha kho nhung ma minh van thich lam, gia dinh toi \
                    luon ung ho va ban be cung vay. hom qua toi met lam vi phai lam them gio, \
                    nhung sau do duoc nghi ngoi nen thay vui hon nhieu. mai toi se di choi voi \
                    nguoi yeu, hy vong troi dep va khong qua nong.";

fn bench_validity(c: &mut Criterion) {
    let reference = ReferenceData::builtin();
    let segmenter = RuleSegmenter::new();
    let checker = ValidityChecker::new(&reference, &segmenter);

    let mut group = c.benchmark_group("Validity");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("short_text", |b| b.iter(|| checker.is_valid(black_box(SHORT))));
    group.bench_function("medium_text", |b| b.iter(|| checker.is_valid(black_box(MEDIUM))));
    group.bench_function("long_text", |b| b.iter(|| checker.is_valid(black_box(LONG))));

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let reference = ReferenceData::builtin();
    let segmenter = RuleSegmenter::new();
    let display = DisplayNormalizer::new(&reference, &segmenter);
    let preprocessor = ModelPreprocessor::new(&reference, &segmenter);

    let mut group = c.benchmark_group("Normalization");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    for (name, text) in [("short", SHORT), ("medium", MEDIUM), ("long", LONG)] {
        group.bench_function(format!("display_{}", name), |b| {
            b.iter(|| display.normalize(black_box(text)))
        });
        group.bench_function(format!("model_{}", name), |b| {
            b.iter(|| preprocessor.preprocess(black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validity, bench_normalization);
criterion_main!(benches);
