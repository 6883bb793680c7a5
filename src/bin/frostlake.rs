//! Train tabular Q-learning agents on FrozenLake maps of several sizes.
//!
//! Prints the learning curves and the learned policy of every map size, and
//! optionally writes CSV/JSON exports plus the plot report to a folder.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

use frostlake::env::LakeAction;
use frostlake::experiment::{run_map_sizes, MapSizeResults};
use frostlake::metrics::{post_process, ResultRow, StepRow, Statistics};
use frostlake::params::ExperimentParams;
use frostlake::visualization::{
    export_results_csv, export_results_json, export_steps_csv, export_training_error_csv,
    histogram, plot_q_values_map, plot_rewards_and_steps, plot_states_actions_distribution,
    plot_training_error, save_report,
};

/// Command line arguments for a FrozenLake training sweep
#[derive(Parser)]
#[command(name = "frostlake")]
#[command(about = "Tabular Q-learning on FrozenLake grid worlds")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// JSON file with experiment parameters; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Episodes per run
    #[arg(long)]
    episodes: Option<usize>,

    /// Independent runs per map size
    #[arg(long)]
    runs: Option<usize>,

    /// Comma separated lake side lengths, e.g. 4,7,9
    #[arg(long, value_delimiter = ',')]
    map_sizes: Option<Vec<usize>>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Use the slippery transition model
    #[arg(long)]
    slippery: bool,

    /// Output directory for exports and the plot report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_params(args: &Args) -> Result<ExperimentParams> {
    let mut params = match &args.config {
        Some(path) => ExperimentParams::from_json_file(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
        None => ExperimentParams::default(),
    };

    if let Some(episodes) = args.episodes {
        params.total_episodes = episodes;
    }
    if let Some(runs) = args.runs {
        params.n_runs = runs;
    }
    if let Some(sizes) = &args.map_sizes {
        params.map_sizes = sizes.clone();
    }
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    if args.slippery {
        params.is_slippery = true;
    }
    if let Some(output) = &args.output {
        params.savefig_folder = Some(output.clone());
    }

    params.validate().context("Invalid experiment parameters")?;
    Ok(params)
}

fn write_exports(
    folder: &Path,
    sweeps: &[MapSizeResults],
    rewards: &[ResultRow],
    steps: &[StepRow],
    report: &str,
) -> Result<()> {
    std::fs::create_dir_all(folder)
        .with_context(|| format!("Failed to create output directory {}", folder.display()))?;

    export_results_csv(rewards, folder.join("rewards.csv")).context("Failed to write rewards.csv")?;
    export_steps_csv(steps, folder.join("steps.csv")).context("Failed to write steps.csv")?;
    export_results_json(rewards, steps, folder.join("results.json"))
        .context("Failed to write results.json")?;

    for sweep in sweeps {
        let name = format!("training_error_{}x{}.csv", sweep.map_size, sweep.map_size);
        export_training_error_csv(&sweep.results.training_error, folder.join(&name))
            .with_context(|| format!("Failed to write {}", name))?;
    }

    let path = save_report(folder, report).context("Failed to save plot report")?;
    info!("Report saved to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let params = load_params(&args)?;
    info!(
        "Training {} runs x {} episodes on map sizes {:?} (slippery: {})",
        params.n_runs, params.total_episodes, params.map_sizes, params.is_slippery
    );

    let sweeps = run_map_sizes(&params).context("Training failed")?;

    let mut rewards = Vec::new();
    let mut steps = Vec::new();
    for sweep in &sweeps {
        let (r, s) = post_process(&sweep.results, sweep.map_size);
        rewards.extend(r);
        steps.extend(s);
    }

    let action_labels: Vec<&str> = LakeAction::ALL.iter().map(|a| a.name()).collect();
    let mut report = plot_rewards_and_steps(&rewards, &steps, 60, 12);
    for sweep in &sweeps {
        report.push_str(&plot_q_values_map(sweep.results.mean_q_table().view(), &sweep.map));
        report.push('\n');
        report.push_str(&plot_states_actions_distribution(&sweep.results.visits, &action_labels));
        report.push('\n');
        report.push_str(&plot_training_error(&sweep.results.training_error, 60, 10));
        report.push('\n');
        report.push_str("TD error distribution (last run)\n");
        report.push_str(&histogram(&sweep.results.training_error, 10));
        report.push('\n');

        let tail = (sweep.results.n_episodes() / 10).max(1);
        let late_rewards: Vec<f32> = sweep
            .results
            .rewards
            .rows()
            .into_iter()
            .skip(sweep.results.n_episodes() - tail)
            .flat_map(|row| row.to_vec())
            .collect();
        let stats = Statistics::from_slice(&late_rewards);
        info!(
            "Map size {}x{}: success rate over the last {} episodes {:.3} (std {:.3})",
            sweep.map_size,
            sweep.map_size,
            tail,
            stats.mean,
            stats.std
        );
    }

    println!("{}", report);

    if let Some(folder) = &params.savefig_folder {
        write_exports(folder, &sweeps, &rewards, &steps, &report)?;
    }

    Ok(())
}
