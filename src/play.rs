//! Roll out episodes for inspection, with or without a trained agent.

use crate::agent::TabularAgent;
use crate::env::{ActionSpace, Environment};
use crate::error::Result;
use log::info;

/// What happened in one played episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub total_reward: f32,
    pub steps: usize,
    pub terminated: bool,
}

/// Play `num_episodes` episodes on `env`.
///
/// Actions come from `agent` when one is given, otherwise they are sampled
/// from the environment's action space. The agent does not learn.
pub fn play<E, A>(env: &mut E, num_episodes: usize, mut agent: Option<&mut A>) -> Result<Vec<EpisodeSummary>>
where
    E: Environment,
    A: TabularAgent,
{
    let mut summaries = Vec::with_capacity(num_episodes);

    for episode in 0..num_episodes {
        info!("Playing episode {}", episode);

        let (mut state, _) = env.reset();
        let mut total_reward = 0.0;
        let mut steps = 0;

        loop {
            let action = match agent.as_deref_mut() {
                Some(agent) => agent.select_action(state, env.action_space())?,
                None => env.action_space().sample(),
            };

            let step = env.step(action)?;
            total_reward += step.reward;
            steps += 1;
            state = step.state;

            if step.done() {
                summaries.push(EpisodeSummary {
                    episode,
                    total_reward,
                    steps,
                    terminated: step.terminated,
                });
                break;
            }
        }
    }

    Ok(summaries)
}
