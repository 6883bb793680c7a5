use crate::error::Result;
use crate::metrics::post_process::{ResultRow, StepRow};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the rewards/steps report written by [`save_report`]
pub const REPORT_FILE_NAME: &str = "frozenlake-v1_steps_and_rewards.txt";

/// Export result rows to CSV format
pub fn export_results_csv<P: AsRef<Path>>(rows: &[ResultRow], path: P) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "episode,run,reward,steps,cum_reward,map_size")?;
    for row in rows {
        writeln!(file, "{},{},{},{},{},{}",
                 row.episode, row.run, row.reward, row.steps, row.cum_reward, row.map_size)?;
    }

    Ok(())
}

/// Export averaged steps to CSV format
pub fn export_steps_csv<P: AsRef<Path>>(rows: &[StepRow], path: P) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "episode,steps,map_size")?;
    for row in rows {
        writeln!(file, "{},{},{}", row.episode, row.steps, row.map_size)?;
    }

    Ok(())
}

/// Export the TD-error log, one value per update
pub fn export_training_error_csv<P: AsRef<Path>>(training_error: &[f32], path: P) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "update,td_error")?;
    for (i, value) in training_error.iter().enumerate() {
        writeln!(file, "{},{}", i, value)?;
    }

    Ok(())
}

#[derive(Serialize)]
struct ResultsDocument<'a> {
    results: &'a [ResultRow],
    steps: &'a [StepRow],
}

/// Export both tables in JSON format
pub fn export_results_json<P: AsRef<Path>>(rows: &[ResultRow], steps: &[StepRow], path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(&ResultsDocument { results: rows, steps })?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write a text report into `folder`, creating the folder if needed.
///
/// Returns the path of the written file.
pub fn save_report<P: AsRef<Path>>(folder: P, report: &str) -> Result<PathBuf> {
    let folder = folder.as_ref();
    std::fs::create_dir_all(folder)?;
    let path = folder.join(REPORT_FILE_NAME);
    std::fs::write(&path, report)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ResultRow> {
        vec![
            ResultRow { episode: 0, run: 0, reward: 0.0, steps: 3.0, cum_reward: 0.0, map_size: "4x4".to_string() },
            ResultRow { episode: 1, run: 0, reward: 1.0, steps: 6.0, cum_reward: 1.0, map_size: "4x4".to_string() },
        ]
    }

    #[test]
    fn test_results_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        export_results_csv(&rows(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "episode,run,reward,steps,cum_reward,map_size");
        assert_eq!(lines[2], "1,0,1,6,1,4x4");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_results_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let steps = vec![StepRow { episode: 0, steps: 4.5, map_size: "4x4".to_string() }];
        export_results_json(&rows(), &steps, &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["steps"][0]["steps"], 4.5);
    }

    #[test]
    fn test_save_report_creates_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("plots");
        let path = save_report(&folder, "report").unwrap();
        assert_eq!(path, folder.join(REPORT_FILE_NAME));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "report");
    }
}
