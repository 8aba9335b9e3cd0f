use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use geoquiz_core::catalog;
use geoquiz_core::levels::generate_level_questions;
use geoquiz_core::model::{Domain, QuestionType};
use geoquiz_core::progress::ProgressTracker;
use geoquiz_core::questions::generate_question;

fn bench_generation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let pool = catalog::pool(Domain::World);

    c.bench_function("single_question_world", |b| {
        b.iter(|| generate_question(black_box(QuestionType::CountryToCurrency), &pool, false, &mut rng))
    });

    c.bench_function("expert_level_world", |b| {
        b.iter(|| generate_level_questions(black_box(5), Domain::World, &mut rng))
    });

    c.bench_function("beginner_level_oceania", |b| {
        b.iter(|| generate_level_questions(black_box(1), Domain::Oceania, &mut rng))
    });
}

fn bench_progress(c: &mut Criterion) {
    c.bench_function("complete_all_levels", |b| {
        b.iter(|| {
            let mut tracker = ProgressTracker::new();
            for domain in Domain::ALL {
                for level in 1..=5 {
                    let _ = tracker.complete_level(domain, level, black_box(8));
                }
            }
            tracker.rank()
        })
    });
}

criterion_group!(benches, bench_generation, bench_progress);
criterion_main!(benches);
