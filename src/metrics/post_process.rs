use crate::experiment::RunResults;
use serde::{Serialize, Deserialize};

/// One (run, episode) record of a training sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub episode: usize,
    pub run: usize,
    pub reward: f32,
    pub steps: f32,
    /// Sum of rewards from the first episode of the run up to this one
    pub cum_reward: f32,
    pub map_size: String,
}

/// Steps per episode, averaged over runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRow {
    pub episode: usize,
    pub steps: f32,
    pub map_size: String,
}

/// Label used for an `n x n` lake, e.g. `"4x4"`
pub fn map_size_label(map_size: usize) -> String {
    format!("{}x{}", map_size, map_size)
}

/// Turn raw run arrays into flat result and step tables.
///
/// Result rows are ordered run-major: all episodes of run 0, then run 1, and
/// so on, with `cum_reward` restarting at every run.
pub fn post_process(results: &RunResults, map_size: usize) -> (Vec<ResultRow>, Vec<StepRow>) {
    let label = map_size_label(map_size);
    let n_episodes = results.n_episodes();
    let n_runs = results.n_runs();

    let mut rows = Vec::with_capacity(n_episodes * n_runs);
    for run in 0..n_runs {
        let mut cum_reward = 0.0;
        for episode in 0..n_episodes {
            let reward = results.rewards[[episode, run]];
            cum_reward += reward;
            rows.push(ResultRow {
                episode: results.episodes[episode],
                run,
                reward,
                steps: results.steps[[episode, run]],
                cum_reward,
                map_size: label.clone(),
            });
        }
    }

    let mean_steps = results
        .steps
        .mean_axis(ndarray::Axis(1))
        .unwrap_or_else(|| ndarray::Array1::zeros(n_episodes));
    let steps = results
        .episodes
        .iter()
        .zip(mean_steps.iter())
        .map(|(&episode, &steps)| StepRow {
            episode,
            steps,
            map_size: label.clone(),
        })
        .collect();

    (rows, steps)
}

/// Mean of `cum_reward` over runs for each episode, in episode order.
pub fn mean_cum_rewards(rows: &[ResultRow]) -> Vec<f32> {
    let n_episodes = rows.iter().map(|r| r.episode + 1).max().unwrap_or(0);
    let mut sums = vec![0.0f32; n_episodes];
    let mut counts = vec![0usize; n_episodes];
    for row in rows {
        sums[row.episode] += row.cum_reward;
        counts[row.episode] += 1;
    }
    sums.iter()
        .zip(counts.iter())
        .map(|(&sum, &count)| if count == 0 { 0.0 } else { sum / count as f32 })
        .collect()
}

/// Distinct map size labels in order of first appearance
pub fn map_size_labels(rows: &[ResultRow]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for row in rows {
        if !labels.contains(&row.map_size) {
            labels.push(row.map_size.clone());
        }
    }
    labels
}
