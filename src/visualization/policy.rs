use crate::env::{LakeAction, LakeMap};
use ndarray::{Array2, ArrayView2};

/// Best value and greedy arrow for every tile of a square lake.
///
/// Returns the per-state maximum reshaped to `(map_size, map_size)` and a grid
/// of arrows. States whose best value is not above `f32::EPSILON` have never
/// been credited with reward and get a blank instead of an arrow. Ties
/// resolve to the lowest action index.
pub fn qtable_directions_map(q_table: ArrayView2<f32>, map_size: usize) -> (Array2<f32>, Vec<Vec<char>>) {
    let mut best_values = Array2::zeros((map_size, map_size));
    let mut directions = vec![vec![' '; map_size]; map_size];

    for (state, row) in q_table.outer_iter().enumerate().take(map_size * map_size) {
        let (r, c) = (state / map_size, state % map_size);

        let mut best_action = 0;
        let mut best_value = f32::NEG_INFINITY;
        for (action, &value) in row.iter().enumerate() {
            if value > best_value {
                best_action = action;
                best_value = value;
            }
        }

        best_values[[r, c]] = best_value;
        if best_value > f32::EPSILON {
            if let Some(action) = LakeAction::from_index(best_action) {
                directions[r][c] = action.arrow();
            }
        }
    }

    (best_values, directions)
}

/// The lake next to the learned policy and its best values
pub fn plot_q_values_map(q_table: ArrayView2<f32>, map: &LakeMap) -> String {
    let map_size = map.nrow();
    let (best_values, directions) = qtable_directions_map(q_table, map_size);

    let mut output = String::new();
    output.push_str(&format!("{:<w$}   Learned Q-values\n", "Lake", w = map_size * 2));

    for (r, row) in map.rows().enumerate() {
        let tiles: String = row.iter().map(|t| format!("{} ", t.as_char())).collect();
        output.push_str(&tiles);
        output.push_str("  ");
        for c in 0..map_size {
            output.push_str(&format!(" {} {:>5.2}", directions[r][c], best_values[[r, c]]));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_directions_follow_argmax() {
        // 2x2 lake, 4 actions: left, down, right, up
        let q = array![
            [0.0, 0.0, 0.5, 0.0],
            [0.0, 0.9, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.3, 0.3, 0.0, 0.0],
        ];
        let (values, arrows) = qtable_directions_map(q.view(), 2);
        assert_eq!(arrows[0][0], '→');
        assert_eq!(arrows[0][1], '↓');
        assert_eq!(arrows[1][0], ' ');
        assert_eq!(arrows[1][1], '←');
        assert_eq!(values[[0, 1]], 0.9);
        assert_eq!(values[[1, 0]], 0.0);
    }

    #[test]
    fn test_plot_contains_lake_and_arrows() {
        let map = LakeMap::from_rows(&["SF", "HG"]).unwrap();
        let q = array![
            [0.0, 0.0, 0.5, 0.0],
            [0.0, 0.9, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ];
        let plot = plot_q_values_map(q.view(), &map);
        assert!(plot.contains("S F"));
        assert!(plot.contains("H G"));
        assert!(plot.contains('→'));
        assert!(plot.contains('↓'));
    }
}
