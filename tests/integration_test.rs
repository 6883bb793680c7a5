use frostlake::{
    agent::QLearningAgent,
    env::{Environment, FrozenLake, LakeAction, LakeMap},
    experiment::{make_lake, run_map_sizes},
    metrics::{post_process, Statistics},
    params::ExperimentParams,
    play::play,
    visualization::{
        export_results_csv, export_results_json, export_steps_csv, export_training_error_csv,
        plot_q_values_map, plot_rewards_and_steps, plot_states_actions_distribution,
        plot_training_error, save_report, REPORT_FILE_NAME,
    },
};

fn sweep_params() -> ExperimentParams {
    ExperimentParams {
        total_episodes: 200,
        n_runs: 3,
        map_sizes: vec![4, 5],
        epsilon_decay: 0.01,
        final_epsilon: 0.05,
        seed: 123,
        ..Default::default()
    }
}

#[test]
fn test_end_to_end_sweep_and_reports() {
    let params = sweep_params();
    let sweeps = run_map_sizes(&params).unwrap();
    assert_eq!(sweeps.len(), 2);

    let mut rewards = Vec::new();
    let mut steps = Vec::new();
    for sweep in &sweeps {
        let (r, s) = post_process(&sweep.results, sweep.map_size);
        assert_eq!(r.len(), params.total_episodes * params.n_runs);
        assert_eq!(s.len(), params.total_episodes);
        rewards.extend(r);
        steps.extend(s);
    }

    let report = plot_rewards_and_steps(&rewards, &steps, 60, 12);
    assert!(report.contains("Cumulated rewards (map size 4x4)"));
    assert!(report.contains("Averaged steps number (map size 5x5)"));

    let first = &sweeps[0];
    let policy = plot_q_values_map(first.results.mean_q_table().view(), &first.map);
    assert!(policy.contains("Learned Q-values"));

    let labels: Vec<&str> = ["Left", "Down", "Right", "Up"].to_vec();
    let distribution = plot_states_actions_distribution(&first.results.visits, &labels);
    assert!(distribution.contains("Actions"));
    assert_eq!(first.results.visits.states.len(), first.map.state_count());

    let td_plot = plot_training_error(&first.results.training_error, 40, 8);
    assert!(td_plot.starts_with("Temporal difference error"));

    let dir = tempfile::tempdir().unwrap();
    export_results_csv(&rewards, dir.path().join("results.csv")).unwrap();
    export_steps_csv(&steps, dir.path().join("steps.csv")).unwrap();
    export_training_error_csv(&first.results.training_error, dir.path().join("td.csv")).unwrap();
    export_results_json(&rewards, &steps, dir.path().join("results.json")).unwrap();
    let report_path = save_report(dir.path(), &report).unwrap();

    assert!(report_path.ends_with(REPORT_FILE_NAME));
    let csv = std::fs::read_to_string(dir.path().join("results.csv")).unwrap();
    assert_eq!(csv.lines().count(), rewards.len() + 1);
    let td_csv = std::fs::read_to_string(dir.path().join("td.csv")).unwrap();
    assert_eq!(td_csv.lines().count(), first.results.training_error.len() + 1);
}

#[test]
fn test_learning_improves_over_random_play() {
    let params = ExperimentParams {
        map_sizes: vec![4],
        ..sweep_params()
    };
    let sweep = run_map_sizes(&params).unwrap().remove(0);

    let early: Vec<f32> = sweep.results.rewards.rows().into_iter().take(20).flat_map(|r| r.to_vec()).collect();
    let late: Vec<f32> = sweep.results.rewards.rows().into_iter().skip(150).flat_map(|r| r.to_vec()).collect();

    let early = Statistics::from_slice(&early);
    let late = Statistics::from_slice(&late);
    assert!(late.mean > early.mean, "late mean {} <= early mean {}", late.mean, early.mean);
    assert!(late.mean > 0.5);
}

#[test]
fn test_random_play_on_generated_lake() {
    let params = sweep_params();
    let mut env = make_lake(&params, 4).unwrap();
    assert_eq!(env.observation_count(), 16);

    let summaries = play::<FrozenLake, QLearningAgent>(&mut env, 10, None).unwrap();
    assert_eq!(summaries.len(), 10);
    for summary in summaries {
        assert!(summary.steps >= 1);
        assert!(summary.steps <= params.max_episode_steps);
        assert!(summary.total_reward == 0.0 || summary.total_reward == 1.0);
    }
}

#[test]
fn test_lake_walkthrough() {
    let map = LakeMap::from_rows(&["SFFF", "FHFH", "FFFH", "HFFG"]).unwrap();
    let mut env = FrozenLake::new(map, false);
    env.reset();

    let path = [
        LakeAction::Right,
        LakeAction::Right,
        LakeAction::Down,
        LakeAction::Down,
        LakeAction::Down,
        LakeAction::Right,
    ];
    let mut total = 0.0;
    let mut done = false;
    for action in path {
        let step = env.step(action.index()).unwrap();
        total += step.reward;
        done = step.done();
    }
    assert!(done);
    assert_eq!(total, 1.0);
    assert_eq!(env.position(), 15);
}
