pub mod text_plots;
pub mod policy;
pub mod export;

pub use text_plots::{plot_series, plot_training_error, plot_rewards_and_steps, histogram, count_plot, plot_states_actions_distribution};
pub use policy::{qtable_directions_map, plot_q_values_map};
pub use export::{export_results_csv, export_steps_csv, export_training_error_csv, export_results_json, save_report, REPORT_FILE_NAME};
