use crate::experiment::VisitCounts;
use crate::metrics::post_process::{map_size_labels, mean_cum_rewards, ResultRow, StepRow};

/// Plot the training error log as ASCII art
pub fn plot_training_error(training_error: &[f32], width: usize, height: usize) -> String {
    if training_error.is_empty() {
        return "No training error data available".to_string();
    }
    plot_series(training_error, "Temporal difference error", width, height)
}

/// Generic series plotter
pub fn plot_series(values: &[f32], title: &str, width: usize, height: usize) -> String {
    if values.is_empty() || width < 10 || height < 5 {
        return format!("{}: Invalid data or dimensions", title);
    }

    let min_val = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max_val = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    if (max_val - min_val).abs() < f32::EPSILON {
        return format!("{}: All values are {:.4}", title, min_val);
    }

    let mut plot = vec![vec![' '; width]; height];

    // Axes
    for row in plot.iter_mut() {
        row[0] = '|';
    }
    for j in 0..width {
        plot[height - 1][j] = '-';
    }
    plot[height - 1][0] = '+';

    let x_scale = (values.len() - 1) as f32 / (width - 3) as f32;
    let y_scale = (height - 3) as f32 / (max_val - min_val);

    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            continue;
        }
        let x = ((i as f32 / x_scale) as usize + 2).min(width - 1);
        let y = (height - 3).saturating_sub(((value - min_val) * y_scale) as usize).min(height - 2);
        plot[y][x] = '*';
    }

    let mut output = format!("{}\n", title);
    output.push_str(&format!("Max: {:.4}\n", max_val));

    for row in plot.iter() {
        output.push_str(&row.iter().collect::<String>());
        output.push('\n');
    }

    output.push_str(&format!("Min: {:.4}\n", min_val));
    output.push_str(&format!("Points: {}\n", values.len()));

    output
}

/// Cumulated rewards and averaged steps, one pair of charts per map size
pub fn plot_rewards_and_steps(
    rewards: &[ResultRow],
    steps: &[StepRow],
    width: usize,
    height: usize,
) -> String {
    let mut output = String::new();

    for label in map_size_labels(rewards) {
        let rows: Vec<ResultRow> = rewards.iter().filter(|r| r.map_size == label).cloned().collect();
        let cum_rewards = mean_cum_rewards(&rows);
        output.push_str(&plot_series(
            &cum_rewards,
            &format!("Cumulated rewards (map size {})", label),
            width,
            height,
        ));
        output.push('\n');

        let mut label_steps: Vec<&StepRow> = steps.iter().filter(|s| s.map_size == label).collect();
        label_steps.sort_by_key(|s| s.episode);
        let averaged: Vec<f32> = label_steps.iter().map(|s| s.steps).collect();
        output.push_str(&plot_series(
            &averaged,
            &format!("Averaged steps number (map size {})", label),
            width,
            height,
        ));
        output.push('\n');
    }

    output
}

/// Create a simple histogram
pub fn histogram(values: &[f32], bins: usize) -> String {
    if values.is_empty() || bins == 0 {
        return "No data for histogram".to_string();
    }

    let min_val = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max_val = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    if (max_val - min_val).abs() < f32::EPSILON {
        return format!("All values are {:.4}", min_val);
    }

    let bin_width = (max_val - min_val) / bins as f32;
    let mut counts = vec![0; bins];

    for &value in values {
        let bin = ((value - min_val) / bin_width).floor() as usize;
        let bin = bin.min(bins - 1);
        counts[bin] += 1;
    }

    let max_count = *counts.iter().max().unwrap_or(&1);
    let scale = 40.0 / max_count as f32;

    let mut output = String::new();
    output.push_str("Histogram:\n");

    for (i, &count) in counts.iter().enumerate() {
        let bin_start = min_val + i as f32 * bin_width;
        let bin_end = bin_start + bin_width;
        let bar_length = (count as f32 * scale) as usize;
        let bar = "#".repeat(bar_length);
        output.push_str(&format!("[{:>7.2}, {:>7.2}): {:>4} {}\n",
                                bin_start, bin_end, count, bar));
    }

    output
}

/// Bar chart of pre-computed counts, one bar per category
pub fn count_plot(counts: &[usize], labels: Option<&[&str]>, title: &str) -> String {
    if counts.is_empty() {
        return format!("{}: No categories", title);
    }

    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);
    let scale = 40.0 / max_count as f32;

    let mut output = format!("{}\n", title);
    for (i, &count) in counts.iter().enumerate() {
        let name = labels
            .and_then(|l| l.get(i))
            .map(|s| s.to_string())
            .unwrap_or_else(|| i.to_string());
        let bar = "#".repeat((count as f32 * scale) as usize);
        output.push_str(&format!("{:>6}: {:>7} {}\n", name, count, bar));
    }
    output
}

/// Distribution of visited states and chosen actions
pub fn plot_states_actions_distribution(visits: &VisitCounts, action_labels: &[&str]) -> String {
    let mut output = count_plot(&visits.states, None, "States");
    output.push('\n');
    output.push_str(&count_plot(&visits.actions, Some(action_labels), "Actions"));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_series_marks_points() {
        let values: Vec<f32> = (0..20).map(|i| i as f32).collect();
        let plot = plot_series(&values, "Line", 30, 10);
        assert!(plot.starts_with("Line\n"));
        assert!(plot.contains('*'));
        assert!(plot.contains("Points: 20"));
    }

    #[test]
    fn test_plot_series_constant_and_empty() {
        assert_eq!(plot_series(&[2.0, 2.0], "Flat", 30, 10), "Flat: All values are 2.0000");
        assert_eq!(plot_series(&[], "Empty", 30, 10), "Empty: Invalid data or dimensions");
    }

    #[test]
    fn test_count_plot_counts() {
        let plot = count_plot(&[1, 2, 0, 1], Some(&["L", "D", "R", "U"]), "Actions");
        assert!(plot.contains("     L:       1"));
        assert!(plot.contains("     D:       2"));
        assert!(plot.contains("     R:       0"));
        assert_eq!(count_plot(&[], None, "Empty"), "Empty: No categories");
    }

    #[test]
    fn test_states_actions_distribution_from_visits() {
        let mut visits = VisitCounts::new(3, 2);
        visits.record(0, 1);
        visits.record(2, 1);
        visits.record(2, 0);

        let plot = plot_states_actions_distribution(&visits, &["Left", "Down"]);
        assert!(plot.starts_with("States\n"));
        assert!(plot.contains("     2:       2"));
        assert!(plot.contains("  Down:       2"));
        assert!(plot.contains("  Left:       1"));
    }

    #[test]
    fn test_histogram_bins() {
        let hist = histogram(&[0.0, 0.5, 1.0, 1.0], 2);
        assert!(hist.starts_with("Histogram:"));
        assert_eq!(hist.lines().count(), 3);
    }
}
