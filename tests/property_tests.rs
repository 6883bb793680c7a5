#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use frostlake::agent::{AgentConfig, QLearningAgent};
    use frostlake::env::{generate_random_map, Discrete};

    // Strategy for generating valid agent configurations
    fn config_strategy() -> impl Strategy<Value = AgentConfig> {
        (
            0.01f32..=1.0,
            0.0f32..=1.0,
            0.0f32..=1.0,
            0.0f32..=1.0,
            0.0f32..0.5,
            1usize..20,
            1usize..6,
            any::<u64>(),
        )
            .prop_map(|(lr, gamma, eps_a, eps_b, decay, states, actions, seed)| AgentConfig {
                learning_rate: lr,
                discount_factor: gamma,
                initial_epsilon: eps_a.max(eps_b),
                final_epsilon: eps_a.min(eps_b),
                epsilon_decay: decay,
                state_count: states,
                action_count: actions,
                seed,
            })
    }

    proptest! {
        #[test]
        fn test_epsilon_stays_in_range_and_never_increases(
            config in config_strategy(),
            decays in 0usize..200,
        ) {
            let mut agent = QLearningAgent::new(config.clone()).unwrap();
            let mut previous = agent.epsilon();

            for _ in 0..decays {
                agent.decay_epsilon();
                prop_assert!(agent.epsilon() <= previous);
                prop_assert!(agent.epsilon() >= config.final_epsilon);
                prop_assert!(agent.epsilon() <= config.initial_epsilon);
                previous = agent.epsilon();
            }
        }

        #[test]
        fn test_terminal_update_from_zero_is_lr_times_reward(
            config in config_strategy(),
            reward in -100.0f32..100.0,
            state_seed in any::<usize>(),
            action_seed in any::<usize>(),
            next_seed in any::<usize>(),
        ) {
            let mut agent = QLearningAgent::new(config.clone()).unwrap();
            let state = state_seed % config.state_count;
            let action = action_seed % config.action_count;
            let next_state = next_seed % config.state_count;

            let td = agent.update(state, action, reward, true, next_state).unwrap();

            prop_assert_eq!(td, reward);
            prop_assert_eq!(agent.q_table()[[state, action]], config.learning_rate * reward);
            prop_assert_eq!(agent.training_error().len(), 1);
        }

        #[test]
        fn test_selected_action_is_in_range(
            config in config_strategy(),
            rewards in prop::collection::vec(-10.0f32..10.0, 0..50),
            space_seed in any::<u64>(),
        ) {
            let mut agent = QLearningAgent::new(config.clone()).unwrap();
            let mut space = Discrete::new(config.action_count, space_seed);

            for (i, &reward) in rewards.iter().enumerate() {
                let state = i % config.state_count;
                let action = agent.select_action(state, &mut space).unwrap();
                prop_assert!(action < config.action_count);
                let next_state = (i + 1) % config.state_count;
                agent.update(state, action, reward, i % 7 == 0, next_state).unwrap();
            }

            prop_assert!(agent.q_table().iter().all(|v| v.is_finite()));
        }

        #[test]
        fn test_generated_maps_are_solvable(
            size in 2usize..9,
            proba_frozen in 0.5f64..=1.0,
            seed in any::<u64>(),
        ) {
            let map = generate_random_map(size, proba_frozen, seed).unwrap();
            prop_assert_eq!(map.nrow(), size);
            prop_assert_eq!(map.ncol(), size);
            prop_assert!(map.has_path_to_goal());
        }
    }
}
