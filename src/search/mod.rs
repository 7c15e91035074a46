//! The four search strategies and the result record they share.
//!
//! Each strategy is a pure function of a [`Configuration`]: it allocates its
//! own arena and signature tables, runs to completion, and reports the path
//! (if any), wall-clock time and number of expanded states.

mod astar;
mod bfs;
mod dfs;
mod ids;

use std::fmt;
use std::time::{Duration, Instant};

use crate::scenario::Configuration;
use crate::state::{PathStep, StateArena, StateId};

pub use astar::heuristic;

/// Default depth ceiling for iterative deepening.
pub const DEFAULT_IDS_MAX_DEPTH: u32 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Depth-first search; finds a path, not necessarily a short one.
    Dfs,
    /// Breadth-first search; the minimum-move baseline.
    Bfs,
    /// A* with a Manhattan-distance heuristic.
    #[value(name = "astar", alias = "a*")]
    AStar,
    /// Iterative deepening depth-first search.
    Ids,
}

impl Algorithm {
    /// All strategies in comparison-table order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::AStar,
        Algorithm::Ids,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dfs => "DFS",
            Algorithm::Bfs => "BFS",
            Algorithm::AStar => "A*",
            Algorithm::Ids => "IDS",
        }
    }

    /// Runs the strategy once.
    pub fn run(self, config: &Configuration, limits: SearchLimits) -> SolveResult {
        let result = match self {
            Algorithm::Dfs => dfs::solve(config),
            Algorithm::Bfs => bfs::solve(config),
            Algorithm::AStar => astar::solve(config),
            Algorithm::Ids => ids::solve(config, limits.ids_max_depth),
        };
        log::debug!(
            "{} expanded {} nodes in {:?} ({:?})",
            self,
            result.nodes_expanded,
            result.elapsed,
            result.termination
        );
        result
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tunable bounds for the strategies that have them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest limit iterative deepening tries before giving up.
    pub ids_max_depth: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            ids_max_depth: DEFAULT_IDS_MAX_DEPTH,
        }
    }
}

/// Why a search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// A goal state was reached.
    Goal,
    /// Every reachable signature was explored without reaching the goal.
    Exhausted,
    /// Iterative deepening hit its ceiling while branches were still being
    /// cut off; a deeper search might succeed.
    DepthCeiling { max_depth: u32 },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Goal => f.write_str("goal reached"),
            Termination::Exhausted => f.write_str("search space exhausted"),
            Termination::DepthCeiling { max_depth } => {
                write!(f, "depth ceiling {max_depth} reached")
            }
        }
    }
}

/// Outcome of one strategy run.
#[derive(Clone, Debug)]
pub struct SolveResult {
    pub algorithm: Algorithm,
    /// Start-to-goal states, or `None` when no solution was found.
    pub path: Option<Vec<PathStep>>,
    pub elapsed: Duration,
    pub nodes_expanded: u64,
    pub termination: Termination,
}

impl SolveResult {
    /// Builds the record from the arena of a finished search.
    pub(crate) fn finish(
        algorithm: Algorithm,
        started: Instant,
        arena: &StateArena,
        goal: Option<StateId>,
        nodes_expanded: u64,
        termination: Termination,
    ) -> Self {
        let path = goal.map(|id| arena.path_to(id));
        Self {
            algorithm,
            path,
            elapsed: started.elapsed(),
            nodes_expanded,
            termination,
        }
    }

    /// Number of moves on the path (states minus one).
    pub fn moves(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len() - 1)
    }

    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::board::Cell;
    use crate::scenario::{random_configuration, PRESETS};

    fn scenario_one() -> Configuration {
        Configuration::new(
            Cell::new(0, 0),
            [Cell::new(2, 1), Cell::new(7, 7), Cell::new(7, 6)],
            Cell::new(2, 1),
        )
    }

    fn scenario_two() -> Configuration {
        Configuration::new(
            Cell::new(0, 0),
            [Cell::new(7, 7), Cell::new(7, 6), Cell::new(7, 5)],
            Cell::new(0, 1),
        )
    }

    fn sample_configurations(count: usize) -> Vec<Configuration> {
        let mut rng = SmallRng::seed_from_u64(0x6b6e_6967_6874);
        let mut configs: Vec<Configuration> =
            PRESETS.iter().map(|preset| preset.configuration).collect();
        configs.extend((0..count).map(|_| random_configuration(&mut rng)));
        configs
    }

    /// Checks legality, key monotonicity and the goal condition of a path.
    fn assert_valid_path(config: &Configuration, path: &[PathStep], label: &str) {
        let first = path.first().expect("path is never empty");
        assert_eq!(first.cell, config.start, "{label}: path must begin at the start");
        assert!(!first.has_key, "{label}: start must not hold a key");
        assert_eq!(first.depth, 0);

        for (i, pair) in path.windows(2).enumerate() {
            let (prev, next) = (pair[0], pair[1]);
            assert!(
                prev.cell.is_knight_move_to(next.cell),
                "{label}: step {i} {} -> {} is not a knight move",
                prev.cell,
                next.cell
            );
            assert_eq!(next.depth, prev.depth + 1, "{label}: depth must grow by one");
            assert!(
                !prev.has_key || next.has_key,
                "{label}: key flag dropped at step {}",
                i + 1
            );
            assert_eq!(
                next.has_key,
                prev.has_key || config.keys.contains(next.cell),
                "{label}: key flag inconsistent at step {}",
                i + 1
            );
        }

        let last = path.last().expect("path is never empty");
        assert!(last.has_key, "{label}: goal must hold a key");
        assert_eq!(last.cell, config.door, "{label}: goal must be the door");
    }

    #[test]
    fn test_scenario_one_every_strategy_takes_one_move() {
        let config = scenario_one();
        for algorithm in Algorithm::ALL {
            let result = algorithm.run(&config, SearchLimits::default());
            let path = result.path.as_ref().expect("solvable");
            assert_eq!(result.moves(), Some(1), "{algorithm} should need one move");
            assert_eq!(path[1].cell, Cell::new(2, 1));
            assert!(path[1].has_key);
            assert_eq!(result.termination, Termination::Goal);
        }
    }

    #[test]
    fn test_scenario_one_node_counts() {
        let config = scenario_one();
        let limits = SearchLimits::default();
        assert_eq!(Algorithm::Dfs.run(&config, limits).nodes_expanded, 2);
        assert_eq!(Algorithm::Bfs.run(&config, limits).nodes_expanded, 2);
        assert_eq!(Algorithm::AStar.run(&config, limits).nodes_expanded, 2);
        // limit 0 expands the start, limit 1 expands the start and the key
        assert_eq!(Algorithm::Ids.run(&config, limits).nodes_expanded, 3);
    }

    #[test]
    fn test_scenario_two_paths() {
        let config = scenario_two();
        let limits = SearchLimits::default();

        let bfs = Algorithm::Bfs.run(&config, limits);
        assert_eq!(bfs.moves(), Some(9));
        assert_eq!(bfs.nodes_expanded, 125);

        let dfs = Algorithm::Dfs.run(&config, limits);
        assert_eq!(dfs.moves(), Some(53));
        assert_eq!(dfs.nodes_expanded, 55);

        let astar = Algorithm::AStar.run(&config, limits);
        assert_eq!(astar.moves(), Some(9));
        assert_eq!(astar.nodes_expanded, 82);

        let ids = Algorithm::Ids.run(&config, limits);
        assert_eq!(ids.moves(), Some(9));
        assert_eq!(ids.nodes_expanded, 829);
        assert_eq!(ids.path, bfs.path);
    }

    #[test]
    fn test_ids_reports_ceiling_when_minimum_is_deeper() {
        let config = scenario_two();
        let limits = SearchLimits { ids_max_depth: 5 };

        for algorithm in [Algorithm::Dfs, Algorithm::Bfs, Algorithm::AStar] {
            assert!(algorithm.run(&config, limits).is_solved(), "{algorithm} must solve");
        }

        let ids = Algorithm::Ids.run(&config, limits);
        assert!(ids.path.is_none());
        assert_eq!(ids.termination, Termination::DepthCeiling { max_depth: 5 });
        assert_eq!(ids.nodes_expanded, 206);
    }

    #[test]
    fn test_ids_ceiling_equal_to_minimum_still_solves() {
        let config = scenario_two();
        let ids = Algorithm::Ids.run(&config, SearchLimits { ids_max_depth: 9 });
        assert_eq!(ids.moves(), Some(9));
    }

    #[test]
    fn test_every_returned_path_is_valid() {
        for config in sample_configurations(300) {
            for algorithm in Algorithm::ALL {
                let result = algorithm.run(&config, SearchLimits::default());
                let path = result.path.as_ref().unwrap_or_else(|| {
                    panic!("{algorithm} failed on {config:?}: {}", result.termination)
                });
                assert_valid_path(&config, path, algorithm.name());
            }
        }
    }

    #[test]
    fn test_no_strategy_beats_bfs_and_optimal_ones_match_it() {
        for config in sample_configurations(300) {
            let limits = SearchLimits::default();
            let optimal = Algorithm::Bfs.run(&config, limits).moves().unwrap();
            for algorithm in Algorithm::ALL {
                let moves = algorithm.run(&config, limits).moves().unwrap();
                assert!(moves >= optimal, "{algorithm} beat BFS on {config:?}");
            }
            // IDS is exact below its ceiling and the A* heuristic is consistent
            let ids = Algorithm::Ids.run(&config, limits).moves();
            assert_eq!(ids, Some(optimal), "IDS on {config:?}");
            let astar = Algorithm::AStar.run(&config, limits).moves();
            assert_eq!(astar, Some(optimal), "A* on {config:?}");
        }
    }

    #[test]
    fn test_ids_fails_exactly_when_ceiling_is_below_minimum() {
        for config in sample_configurations(60) {
            let optimal = Algorithm::Bfs.run(&config, SearchLimits::default()).moves().unwrap() as u32;
            let below = SearchLimits { ids_max_depth: optimal - 1 };
            let ids = Algorithm::Ids.run(&config, below);
            assert!(ids.path.is_none());
            assert_eq!(
                ids.termination,
                Termination::DepthCeiling { max_depth: optimal - 1 }
            );
        }
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        for config in sample_configurations(40) {
            for algorithm in Algorithm::ALL {
                let first = algorithm.run(&config, SearchLimits::default());
                let second = algorithm.run(&config, SearchLimits::default());
                assert_eq!(first.path, second.path, "{algorithm} path changed");
                assert_eq!(first.nodes_expanded, second.nodes_expanded);
            }
        }
    }

    #[test]
    fn test_heuristic_never_exceeds_true_distance() {
        for config in sample_configurations(100) {
            let bfs = Algorithm::Bfs.run(&config, SearchLimits::default());
            let path = bfs.path.unwrap();
            // along an optimal path, remaining moves are exact
            for step in &path {
                let remaining = (path.len() - 1 - step.depth as usize) as u32;
                let estimate = heuristic(step.cell, step.has_key, &config);
                assert!(
                    estimate <= remaining,
                    "h({}, {}) = {estimate} > {remaining} on {config:?}",
                    step.cell,
                    step.has_key
                );
            }
        }
    }

    #[test]
    fn test_start_on_door_must_fetch_a_key_first() {
        let config = Configuration::new(
            Cell::new(4, 4),
            [Cell::new(6, 5), Cell::new(0, 0), Cell::new(0, 7)],
            Cell::new(4, 4),
        );
        let bfs = Algorithm::Bfs.run(&config, SearchLimits::default());
        assert_eq!(bfs.moves(), Some(2));
    }

    #[test]
    fn test_starting_on_a_key_does_not_grant_it() {
        let config = Configuration::new(
            Cell::new(2, 1),
            [Cell::new(2, 1), Cell::new(7, 7), Cell::new(7, 6)],
            Cell::new(0, 0),
        );
        let bfs = Algorithm::Bfs.run(&config, SearchLimits::default());
        let path = bfs.path.expect("solvable");
        assert!(!path[0].has_key);
        assert_eq!(path.len() - 1, 3);
    }
}
