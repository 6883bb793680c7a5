pub mod post_process;
pub mod statistics;

pub use post_process::{post_process, map_size_label, map_size_labels, mean_cum_rewards, ResultRow, StepRow};
pub use statistics::{Statistics, check_numerical_issues};
