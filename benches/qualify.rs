// Performance benchmarks for the qualification pipeline
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use vendorq_core::{Corpus, FeatureEntry, FeatureGroup, VendorRecord};
use vendorq_similarity::{QualificationQuery, TfidfVectorizer, VendorQualifier};

const WORDS: &[&str] = &[
    "lead", "management", "email", "campaign", "pipeline", "contact", "sales",
    "tracking", "automation", "reporting", "dashboard", "analytics", "invoice",
    "billing", "segmentation", "scoring", "workflow", "integration", "calendar",
    "scheduling", "forecast", "deal", "inbox", "template", "export", "import",
    "audit", "permission", "mobile", "notification", "survey", "onboarding",
];

fn pick(rng: &mut impl Rng) -> &'static str {
    WORDS[rng.random_range(0..WORDS.len())]
}

fn synthetic_corpus(vendors: usize) -> Corpus {
    let mut rng = rand::rng();
    let records = (0..vendors)
        .map(|i| {
            let entries = (0..6)
                .map(|_| {
                    let name = format!("{} {}", pick(&mut rng), pick(&mut rng));
                    let description = (0..10)
                        .map(|_| pick(&mut rng))
                        .collect::<Vec<_>>()
                        .join(" ");
                    FeatureEntry::new(name, description)
                })
                .collect();
            VendorRecord::new(
                format!("Vendor {i}"),
                format!("Company {i}"),
                rng.random_range(1.0f32..5.0),
            )
            .with_category("CRM Software")
            .with_features(vec![FeatureGroup::new("Features", entries)])
        })
        .collect();
    Corpus::new(records)
}

fn benchmark_qualify(c: &mut Criterion) {
    let mut group = c.benchmark_group("qualify");

    let qualifier = VendorQualifier::with_defaults();
    let query = QualificationQuery::new(vec![
        "lead management".to_string(),
        "email campaign automation".to_string(),
        "sales pipeline reporting".to_string(),
    ])
    .with_threshold(0.2);

    for size in [100, 500].iter() {
        let corpus = synthetic_corpus(*size);
        group.bench_with_input(BenchmarkId::new("vendors", size), size, |b, _| {
            b.iter(|| {
                let response = qualifier
                    .qualify(black_box(&corpus), black_box(&query))
                    .unwrap();
                black_box(response.results.total_qualified_vendors);
            });
        });
    }

    group.finish();
}

fn benchmark_vectorizer(c: &mut Criterion) {
    let corpus = synthetic_corpus(500);
    let features = corpus.flatten();
    let texts: Vec<&str> = features.iter().map(|f| f.combined_text.as_str()).collect();

    c.bench_function("tfidf_fit_3000_texts", |b| {
        b.iter(|| {
            let vectorizer = TfidfVectorizer::fit(black_box(&texts), 5_000).unwrap();
            black_box(vectorizer.vocabulary_len());
        });
    });
}

criterion_group!(benches, benchmark_qualify, benchmark_vectorizer);
criterion_main!(benches);
