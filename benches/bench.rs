// Criterion benchmarks for the Wander matching engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use wander_match::core::ranking::diversity_rerank;
use wander_match::core::scoring::CompatibilityScorer;
use wander_match::core::{haversine_distance, Matcher};
use wander_match::models::{Coordinates, MatchFilters, UserHistory, UserProfile};

fn candidate(id: usize, lat: f64, lng: f64) -> UserProfile {
    let interests = ["hiking", "food", "museums", "surfing", "nightlife", "art"];
    UserProfile {
        id: id.to_string(),
        name: format!("User {}", id),
        age: Some(22 + (id % 15) as u8),
        location: "Berlin, Germany".to_string(),
        coordinates: Some(Coordinates { lat, lng }),
        bio: "Big on adventure, always out to explore with friendly people".to_string(),
        interests: interests
            .iter()
            .cycle()
            .skip(id % interests.len())
            .take(3)
            .map(|s| s.to_string())
            .collect(),
        travel_style: vec!["backpacker".to_string(), "foodie".to_string()],
        next_destination: if id % 2 == 0 {
            "Lisbon, Portugal".to_string()
        } else {
            "Tokyo, Japan".to_string()
        },
        travel_dates: Some("2026-09".to_string()),
        bucket_list: vec![],
        verified: id % 3 == 0,
        elo_rating: None,
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    let a = Coordinates {
        lat: 40.7128,
        lng: -74.0060,
    };
    let b = Coordinates {
        lat: 40.72,
        lng: -74.01,
    };

    c.bench_function("haversine_distance", |bench| {
        bench.iter(|| haversine_distance(black_box(a), black_box(b)));
    });
}

fn bench_pair_scoring(c: &mut Criterion) {
    let scorer = CompatibilityScorer::default();
    let user = candidate(0, 40.7128, -74.0060);
    let other = candidate(1, 40.72, -74.01);
    let history = UserHistory::new("0");

    c.bench_function("score_pair", |bench| {
        let mut rng = SmallRng::seed_from_u64(42);
        bench.iter(|| {
            scorer.score(
                black_box(&user),
                black_box(&other),
                black_box(&history),
                &mut rng,
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::default();
    let user = candidate(0, 40.7128, -74.0060);
    let history = UserHistory::new("0");
    let filters = MatchFilters::default();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500].iter() {
        let candidates: Vec<UserProfile> = (1..=*candidate_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lng_offset = (i as f64 * 0.001) % 0.5;
                candidate(i, 40.7128 + lat_offset, -74.0060 + lng_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |bench, _| {
                let mut rng = SmallRng::seed_from_u64(42);
                bench.iter(|| {
                    matcher.find_matches(
                        black_box(&user),
                        black_box(candidates.clone()),
                        black_box(&history),
                        black_box(&filters),
                        black_box(20),
                        &mut rng,
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_mmr_rerank(c: &mut Criterion) {
    let matcher = Matcher::default();
    let user = candidate(0, 40.7128, -74.0060);
    let history = UserHistory::new("0");
    let filters = MatchFilters::default();

    // Pre-score a pool, then measure the rerank alone
    let candidates: Vec<UserProfile> = (1..=200)
        .map(|i| candidate(i, 40.7128, -74.0060))
        .collect();
    let mut rng = SmallRng::seed_from_u64(42);
    let scored = matcher
        .find_matches(&user, candidates, &history, &filters, usize::MAX, &mut rng)
        .recommendations;

    c.bench_function("mmr_rerank_200", |bench| {
        bench.iter(|| diversity_rerank(black_box(scored.clone()), black_box(0.7)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_pair_scoring,
    bench_matching,
    bench_mmr_rerank
);

criterion_main!(benches);
