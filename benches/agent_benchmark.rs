//! Benchmarks for the tabular agent and a short training sweep
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use frostlake::agent::{AgentConfig, QLearningAgent};
use frostlake::env::{Discrete, FrozenLake, LakeMap};
use frostlake::experiment::run_env;
use frostlake::params::ExperimentParams;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_agent(state_count: usize) -> QLearningAgent {
    QLearningAgent::new(AgentConfig {
        state_count,
        action_count: 4,
        initial_epsilon: 0.1,
        final_epsilon: 0.1,
        epsilon_decay: 0.0,
        ..Default::default()
    })
    .expect("valid bench config")
}

fn bench_select_action(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_action");

    for state_count in [16, 121, 1024] {
        let mut agent = bench_agent(state_count);
        let mut space = Discrete::new(4, 1);
        let mut rng = StdRng::seed_from_u64(7);

        // Seed some values so the greedy path is taken most of the time
        for state in 0..state_count {
            let action = rng.gen_range(0..4);
            agent.update(state, action, 1.0, true, 0).expect("in range");
        }

        group.bench_with_input(BenchmarkId::from_parameter(state_count), &state_count, |b, &n| {
            b.iter(|| {
                let state = rng.gen_range(0..n);
                black_box(agent.select_action(black_box(state), &mut space).expect("in range"))
            })
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut agent = bench_agent(121);
    let mut rng = StdRng::seed_from_u64(11);

    c.bench_function("update", |b| {
        b.iter(|| {
            let state = rng.gen_range(0..121);
            let next_state = rng.gen_range(0..121);
            let action = rng.gen_range(0..4);
            let reward: f32 = if rng.gen_bool(0.05) { 1.0 } else { 0.0 };
            black_box(
                agent
                    .update(state, action, reward, reward > 0.0, next_state)
                    .expect("in range"),
            )
        })
    });
}

fn bench_run_env(c: &mut Criterion) {
    let params = ExperimentParams {
        total_episodes: 100,
        n_runs: 2,
        epsilon_decay: 0.01,
        ..Default::default()
    };
    let map = LakeMap::from_rows(&["SFFF", "FHFH", "FFFH", "HFFG"]).expect("valid map");

    c.bench_function("run_env 4x4 100 episodes", |b| {
        b.iter(|| {
            let mut env = FrozenLake::new(map.clone(), false).with_seed(params.seed);
            black_box(run_env(&params, &mut env).expect("training succeeds"))
        })
    });
}

criterion_group!(benches, bench_select_action, bench_update, bench_run_env);
criterion_main!(benches);
