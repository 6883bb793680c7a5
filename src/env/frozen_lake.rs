use super::{ActionSpace, Discrete, Environment, Step};
use crate::error::{QLearningError, Result};
use crate::types::{ActionIndex, StateIndex};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default time limit, matching the classic 4x4 FrozenLake registration
pub const DEFAULT_MAX_EPISODE_STEPS: usize = 100;

/// Number of moves available on the lake
pub const NUM_ACTIONS: usize = 4;

/// Boards drawn by [`generate_random_map`] before it gives up
pub const MAX_MAP_ATTEMPTS: usize = 10_000;

/// A single cell of the lake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Start,
    Frozen,
    Hole,
    Goal,
}

impl Tile {
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            'S' => Some(Tile::Start),
            'F' => Some(Tile::Frozen),
            'H' => Some(Tile::Hole),
            'G' => Some(Tile::Goal),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Tile::Start => 'S',
            Tile::Frozen => 'F',
            Tile::Hole => 'H',
            Tile::Goal => 'G',
        }
    }

    /// Stepping on this tile ends the episode
    pub fn is_terminal(self) -> bool {
        matches!(self, Tile::Hole | Tile::Goal)
    }
}

/// Moves on the lake, indexed the way agents see them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LakeAction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl LakeAction {
    pub const ALL: [LakeAction; NUM_ACTIONS] =
        [LakeAction::Left, LakeAction::Down, LakeAction::Right, LakeAction::Up];

    pub fn from_index(index: ActionIndex) -> Option<LakeAction> {
        LakeAction::ALL.get(index).copied()
    }

    pub fn index(self) -> ActionIndex {
        self as ActionIndex
    }

    pub fn name(self) -> &'static str {
        match self {
            LakeAction::Left => "Left",
            LakeAction::Down => "Down",
            LakeAction::Right => "Right",
            LakeAction::Up => "Up",
        }
    }

    pub fn arrow(self) -> char {
        match self {
            LakeAction::Left => '←',
            LakeAction::Down => '↓',
            LakeAction::Right => '→',
            LakeAction::Up => '↑',
        }
    }

    /// The move itself followed by its two perpendicular neighbours
    fn slip_candidates(self) -> [LakeAction; 3] {
        let a = self.index();
        [
            LakeAction::ALL[(a + NUM_ACTIONS - 1) % NUM_ACTIONS],
            self,
            LakeAction::ALL[(a + 1) % NUM_ACTIONS],
        ]
    }
}

/// A rectangular lake layout.
///
/// Serialized as its rows of tiles. Deserialization goes through
/// [`LakeMap::new`], so a loaded map is checked like a constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct LakeMap {
    tiles: Vec<Vec<Tile>>,
}

impl TryFrom<Vec<Vec<Tile>>> for LakeMap {
    type Error = QLearningError;

    fn try_from(tiles: Vec<Vec<Tile>>) -> Result<Self> {
        LakeMap::new(tiles)
    }
}

impl From<LakeMap> for Vec<Vec<Tile>> {
    fn from(map: LakeMap) -> Self {
        map.tiles
    }
}

impl LakeMap {
    /// Build a map from tiles, checking it is rectangular and has a start.
    pub fn new(tiles: Vec<Vec<Tile>>) -> Result<Self> {
        let ncol = tiles.first().map(|row| row.len()).unwrap_or(0);
        if tiles.is_empty() || ncol == 0 {
            return Err(QLearningError::invalid_configuration("map", "map must not be empty"));
        }
        if tiles.iter().any(|row| row.len() != ncol) {
            return Err(QLearningError::invalid_configuration("map", "all rows must have the same length"));
        }
        if !tiles.iter().flatten().any(|&t| t == Tile::Start) {
            return Err(QLearningError::invalid_configuration("map", "map has no start tile"));
        }
        Ok(LakeMap { tiles })
    }

    /// Parse rows such as `["SFFF", "FHFH", "FFFH", "HFFG"]`
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut tiles = Vec::with_capacity(rows.len());
        for row in rows {
            let parsed: Option<Vec<Tile>> = row.as_ref().chars().map(Tile::from_char).collect();
            let parsed = parsed.ok_or_else(|| {
                QLearningError::InvalidConfiguration {
                    name: "map".to_string(),
                    reason: format!("unknown tile in row '{}'", row.as_ref()),
                }
            })?;
            tiles.push(parsed);
        }
        LakeMap::new(tiles)
    }

    pub fn nrow(&self) -> usize {
        self.tiles.len()
    }

    pub fn ncol(&self) -> usize {
        self.tiles[0].len()
    }

    pub fn state_count(&self) -> usize {
        self.nrow() * self.ncol()
    }

    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[row][col]
    }

    pub fn tile_at(&self, state: StateIndex) -> Tile {
        let (row, col) = self.to_coords(state);
        self.tile(row, col)
    }

    pub fn to_state(&self, row: usize, col: usize) -> StateIndex {
        row * self.ncol() + col
    }

    pub fn to_coords(&self, state: StateIndex) -> (usize, usize) {
        (state / self.ncol(), state % self.ncol())
    }

    /// First start tile in row-major order
    pub fn start_state(&self) -> StateIndex {
        self.tiles
            .iter()
            .flatten()
            .position(|&t| t == Tile::Start)
            .unwrap_or(0)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(|row| row.as_slice())
    }

    /// Whether the goal can be reached from the start without crossing a hole
    pub fn has_path_to_goal(&self) -> bool {
        let start = self.to_coords(self.start_state());
        let mut frontier = vec![start];
        let mut discovered = vec![vec![false; self.ncol()]; self.nrow()];

        while let Some((r, c)) = frontier.pop() {
            if discovered[r][c] {
                continue;
            }
            discovered[r][c] = true;

            let neighbours = [
                (r.checked_sub(1), Some(c)),
                (Some(r + 1), Some(c)),
                (Some(r), c.checked_sub(1)),
                (Some(r), Some(c + 1)),
            ];
            for (nr, nc) in neighbours {
                let (nr, nc) = match (nr, nc) {
                    (Some(nr), Some(nc)) if nr < self.nrow() && nc < self.ncol() => (nr, nc),
                    _ => continue,
                };
                match self.tile(nr, nc) {
                    Tile::Goal => return true,
                    Tile::Hole => {}
                    _ => frontier.push((nr, nc)),
                }
            }
        }
        false
    }
}

impl fmt::Display for LakeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            let line: String = row.iter().map(|t| t.as_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Generate a random `size` x `size` lake with a guaranteed path from start to goal.
///
/// Each tile is frozen with probability `proba_frozen`, otherwise a hole. The
/// start sits in the top-left corner and the goal in the bottom-right one.
/// Boards are redrawn until the goal is reachable; after
/// [`MAX_MAP_ATTEMPTS`] unsolvable boards the call fails with
/// `InvalidConfiguration`.
pub fn generate_random_map(size: usize, proba_frozen: f64, seed: u64) -> Result<LakeMap> {
    if size < 2 {
        return Err(QLearningError::invalid_configuration("size", "map size must be at least 2"));
    }
    if !(proba_frozen > 0.0 && proba_frozen <= 1.0) {
        return Err(QLearningError::invalid_configuration("proba_frozen", "must be in (0, 1]"));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    for attempt in 1..=MAX_MAP_ATTEMPTS {
        let mut tiles: Vec<Vec<Tile>> = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| if rng.gen_bool(proba_frozen) { Tile::Frozen } else { Tile::Hole })
                    .collect()
            })
            .collect();
        tiles[0][0] = Tile::Start;
        tiles[size - 1][size - 1] = Tile::Goal;

        let map = LakeMap { tiles };
        if map.has_path_to_goal() {
            debug!("Generated {}x{} lake after {} attempt(s)", size, size, attempt);
            return Ok(map);
        }
    }

    Err(QLearningError::InvalidConfiguration {
        name: "proba_frozen".to_string(),
        reason: format!(
            "no solvable {}x{} lake found in {} attempts with proba_frozen={}",
            size, size, MAX_MAP_ATTEMPTS, proba_frozen
        ),
    })
}

/// Diagnostic payload of a lake transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Probability of the transition that actually happened
    pub prob: f32,
}

/// The FrozenLake grid world.
///
/// The agent starts on `S` and must reach `G` without falling into a hole.
/// Reaching the goal gives a reward of 1, every other step gives 0. On a
/// slippery lake the intended move happens with probability 1/3, otherwise
/// the agent slides to one of the two perpendicular directions.
///
/// # Example
///
/// ```
/// use frostlake::env::{Environment, FrozenLake, LakeMap};
///
/// let map = LakeMap::from_rows(&["SF", "FG"]).unwrap();
/// let mut env = FrozenLake::new(map, false);
/// let (state, _) = env.reset();
/// assert_eq!(state, 0);
///
/// let step = env.step(2).unwrap(); // right
/// assert_eq!(step.state, 1);
/// let step = env.step(1).unwrap(); // down
/// assert_eq!(step.reward, 1.0);
/// assert!(step.terminated);
/// ```
#[derive(Debug, Clone)]
pub struct FrozenLake {
    map: LakeMap,
    is_slippery: bool,
    max_episode_steps: usize,
    position: StateIndex,
    elapsed_steps: usize,
    last_action: Option<LakeAction>,
    rng: StdRng,
    action_space: Discrete,
}

impl FrozenLake {
    pub fn new(map: LakeMap, is_slippery: bool) -> Self {
        let position = map.start_state();
        FrozenLake {
            map,
            is_slippery,
            max_episode_steps: DEFAULT_MAX_EPISODE_STEPS,
            position,
            elapsed_steps: 0,
            last_action: None,
            rng: StdRng::seed_from_u64(0),
            action_space: Discrete::new(NUM_ACTIONS, 0),
        }
    }

    pub fn with_max_episode_steps(mut self, max_episode_steps: usize) -> Self {
        self.max_episode_steps = max_episode_steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed(seed);
        self
    }

    pub fn map(&self) -> &LakeMap {
        &self.map
    }

    pub fn is_slippery(&self) -> bool {
        self.is_slippery
    }

    pub fn max_episode_steps(&self) -> usize {
        self.max_episode_steps
    }

    pub fn position(&self) -> StateIndex {
        self.position
    }

    fn moved(&self, state: StateIndex, action: LakeAction) -> StateIndex {
        let (row, col) = self.map.to_coords(state);
        let (row, col) = match action {
            LakeAction::Left => (row, col.saturating_sub(1)),
            LakeAction::Down => ((row + 1).min(self.map.nrow() - 1), col),
            LakeAction::Right => (row, (col + 1).min(self.map.ncol() - 1)),
            LakeAction::Up => (row.saturating_sub(1), col),
        };
        self.map.to_state(row, col)
    }

    /// Text rendering of the lake with the agent's tile in brackets
    pub fn render(&self) -> String {
        let mut output = String::new();
        if let Some(action) = self.last_action {
            output.push_str(&format!("  ({})\n", action.name()));
        }
        let (agent_row, agent_col) = self.map.to_coords(self.position);
        for (r, row) in self.map.rows().enumerate() {
            for (c, tile) in row.iter().enumerate() {
                if r == agent_row && c == agent_col {
                    output.push_str(&format!("[{}]", tile.as_char()));
                } else {
                    output.push_str(&format!(" {} ", tile.as_char()));
                }
            }
            output.push('\n');
        }
        output
    }
}

impl Environment for FrozenLake {
    type Info = StepInfo;
    type Space = Discrete;

    fn reset(&mut self) -> (StateIndex, StepInfo) {
        self.position = self.map.start_state();
        self.elapsed_steps = 0;
        self.last_action = None;
        (self.position, StepInfo { prob: 1.0 })
    }

    fn step(&mut self, action: ActionIndex) -> Result<Step<StepInfo>> {
        let intended = LakeAction::from_index(action)
            .ok_or_else(|| QLearningError::invalid_action(action, NUM_ACTIONS))?;

        let (taken, prob) = if self.is_slippery {
            let candidates = intended.slip_candidates();
            (candidates[self.rng.gen_range(0..candidates.len())], 1.0 / 3.0)
        } else {
            (intended, 1.0)
        };

        self.position = self.moved(self.position, taken);
        self.elapsed_steps += 1;
        self.last_action = Some(taken);

        let tile = self.map.tile_at(self.position);
        let reward = if tile == Tile::Goal { 1.0 } else { 0.0 };

        Ok(Step {
            state: self.position,
            reward,
            terminated: tile.is_terminal(),
            truncated: self.elapsed_steps >= self.max_episode_steps,
            info: StepInfo { prob },
        })
    }

    /// Reseeds the slip dynamics with `seed` and the action space with `seed + 1`
    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.action_space.seed(seed.wrapping_add(1));
    }

    fn action_space(&mut self) -> &mut Discrete {
        &mut self.action_space
    }

    fn observation_count(&self) -> usize {
        self.map.state_count()
    }

    fn action_count(&self) -> usize {
        self.action_space.n()
    }
}
