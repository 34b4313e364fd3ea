//! Performance benchmarks for rating calculations and leaderboard rebuilds

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cue_score::config::{EloConfig, LeaderboardConfig};
use cue_score::leaderboard::LeaderboardBuilder;
use cue_score::rating::{EloRatingCalculator, RatingCalculator};
use cue_score::store::{InMemoryStore, PlayerStore};
use cue_score::types::{LeaderboardCriterion, MatchScore, PlayerRecord};
use std::sync::Arc;

fn bench_rating_calculations(c: &mut Criterion) {
    let calculator = EloRatingCalculator::new(EloConfig::default()).unwrap();
    let a = "player_a".to_string();
    let b = "player_b".to_string();

    c.bench_function("elo_calculate_decisive", |bench| {
        bench.iter(|| {
            calculator
                .calculate(
                    black_box((&a, 1412)),
                    black_box((&b, 1188)),
                    MatchScore::PlayerBWin,
                )
                .unwrap()
        })
    });

    c.bench_function("elo_expected_score", |bench| {
        bench.iter(|| calculator.expected(black_box(1412), black_box(1188)))
    });
}

fn bench_leaderboard_rebuild(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let store = Arc::new(InMemoryStore::new());
    runtime.block_on(async {
        for i in 0..1_000u32 {
            let wins = i % 50;
            let matches = 50 + i % 30;
            let player = PlayerRecord {
                id: format!("player_{:04}", i),
                rating: 900 + (i as i32 * 7) % 900,
                total_matches: matches,
                wins,
                losses: matches - wins,
                draws: 0,
                win_rate: cue_score::utils::win_rate(wins, matches),
            };
            store.create_player(player, vec![]).await.unwrap();
        }
    });

    let builder = Arc::new(
        LeaderboardBuilder::new(store.clone(), store, LeaderboardConfig::default()).unwrap(),
    );

    c.bench_function("leaderboard_rebuild_rating_1000_players", |bench| {
        bench.iter(|| {
            runtime
                .block_on(builder.rebuild(black_box(LeaderboardCriterion::Rating)))
                .unwrap()
        })
    });

    c.bench_function("leaderboard_rebuild_all_1000_players", |bench| {
        bench.iter(|| runtime.block_on(builder.rebuild_all()))
    });
}

criterion_group!(benches, bench_rating_calculations, bench_leaderboard_rebuild);
criterion_main!(benches);
