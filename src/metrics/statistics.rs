use ndarray::ArrayView2;
use serde::{Serialize, Deserialize};

/// Statistics for a collection of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f32,
    pub std: f32,
    pub min: f32,
    pub max: f32,
    pub count: usize,
}

impl Statistics {
    /// Compute statistics from a slice of values
    pub fn from_slice(values: &[f32]) -> Self {
        if values.is_empty() {
            return Statistics {
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
                count: 0,
            };
        }

        let count = values.len();
        let sum: f32 = values.iter().sum();
        let mean = sum / count as f32;

        let variance = values.iter()
            .map(|&x| (x - mean).powi(2))
            .sum::<f32>() / count as f32;
        let std = variance.sqrt();

        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        Statistics {
            mean,
            std,
            min,
            max,
            count,
        }
    }
}

/// Count NaN and infinite entries of a table.
///
/// Returns `(has_issue, nan_count, inf_count)`.
pub fn check_numerical_issues(array: ArrayView2<f32>) -> (bool, usize, usize) {
    let nan_count = array.iter().filter(|v| v.is_nan()).count();
    let inf_count = array.iter().filter(|v| v.is_infinite()).count();
    (nan_count + inf_count > 0, nan_count, inf_count)
}
