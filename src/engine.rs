//! Solving, benchmarking and comparing strategies against the BFS baseline.
//!
//! Every public entry point enriches the raw [`SolveResult`] with the key the
//! path picked up and whether its length matches the BFS minimum.

use std::time::Duration;

use crate::board::KeySet;
use crate::scenario::Configuration;
use crate::search::{Algorithm, SearchLimits, SolveResult};
use crate::state::PathStep;

/// Repeats used when timing strategies for comparison.
pub const DEFAULT_REPEATS: usize = 40;

/// A solve result plus the narrative facts derived from it.
#[derive(Clone, Debug)]
pub struct EnrichedResult {
    pub result: SolveResult,
    /// Slot of the key picked up along the path.
    pub chosen_key: Option<usize>,
    /// Minimum number of moves, as found by BFS.
    pub optimal_moves: Option<usize>,
    pub is_optimal: bool,
}

impl EnrichedResult {
    pub fn new(result: SolveResult, keys: &KeySet, optimal_moves: Option<usize>) -> Self {
        let chosen_key = result
            .path
            .as_deref()
            .and_then(|path| chosen_key_index(path, keys));
        let is_optimal = match (result.moves(), optimal_moves) {
            (Some(moves), Some(optimal)) => moves == optimal,
            _ => false,
        };
        Self {
            result,
            chosen_key,
            optimal_moves,
            is_optimal,
        }
    }

    pub fn moves(&self) -> Option<usize> {
        self.result.moves()
    }
}

/// Slot of the key on the square where the key flag first turns on.
pub fn chosen_key_index(path: &[PathStep], keys: &KeySet) -> Option<usize> {
    path.windows(2)
        .find(|pair| !pair[0].has_key && pair[1].has_key)
        .and_then(|pair| keys.index_of(pair[1].cell))
}

/// Every strategy benchmarked on one configuration.
#[derive(Clone, Debug)]
pub struct Comparison {
    pub optimal_moves: Option<usize>,
    /// One row per strategy, in [`Algorithm::ALL`] order.
    pub rows: Vec<EnrichedResult>,
}

impl Comparison {
    /// The solved row with the smallest averaged time.
    pub fn fastest(&self) -> Option<&EnrichedResult> {
        self.rows
            .iter()
            .filter(|row| row.result.is_solved())
            .min_by_key(|row| row.result.elapsed)
    }
}

/// Runs strategies under a fixed set of [`SearchLimits`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    limits: SearchLimits,
}

impl Engine {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Runs one strategy once and compares it with a BFS baseline.
    ///
    /// When the strategy is BFS its own result is the baseline.
    pub fn solve(&self, algorithm: Algorithm, config: &Configuration) -> EnrichedResult {
        let result = algorithm.run(config, self.limits);
        let optimal_moves = self.baseline(algorithm, &result, config);
        EnrichedResult::new(result, &config.keys, optimal_moves)
    }

    /// Like [`Engine::solve`], but runs the strategy `repeats` times and
    /// reports the mean elapsed time. Path and node count come from the last run.
    pub fn benchmark(
        &self,
        algorithm: Algorithm,
        config: &Configuration,
        repeats: usize,
    ) -> EnrichedResult {
        let result = self.repeat(algorithm, config, repeats);
        let optimal_moves = self.baseline(algorithm, &result, config);
        EnrichedResult::new(result, &config.keys, optimal_moves)
    }

    /// Benchmarks every strategy. BFS runs first and is reused as the baseline.
    pub fn compare(&self, config: &Configuration, repeats: usize) -> Comparison {
        let bfs = self.repeat(Algorithm::Bfs, config, repeats);
        let optimal_moves = bfs.moves();

        let rows = Algorithm::ALL
            .into_iter()
            .map(|algorithm| {
                let result = match algorithm {
                    Algorithm::Bfs => bfs.clone(),
                    other => self.repeat(other, config, repeats),
                };
                EnrichedResult::new(result, &config.keys, optimal_moves)
            })
            .collect();

        Comparison {
            optimal_moves,
            rows,
        }
    }

    fn baseline(
        &self,
        algorithm: Algorithm,
        result: &SolveResult,
        config: &Configuration,
    ) -> Option<usize> {
        match algorithm {
            Algorithm::Bfs => result.moves(),
            _ => Algorithm::Bfs.run(config, self.limits).moves(),
        }
    }

    /// Runs `algorithm` `repeats` times (at least once), keeping the last
    /// result with its time replaced by the mean.
    fn repeat(&self, algorithm: Algorithm, config: &Configuration, repeats: usize) -> SolveResult {
        let repeats = repeats.max(1);
        let mut total = Duration::ZERO;
        let mut last = algorithm.run(config, self.limits);
        total += last.elapsed;
        for _ in 1..repeats {
            last = algorithm.run(config, self.limits);
            total += last.elapsed;
        }

        last.elapsed = total / repeats as u32;
        log::debug!(
            "{algorithm}: mean {:?} over {repeats} runs",
            last.elapsed
        );
        last
    }
}

/// Solves with default limits.
pub fn solve(algorithm: Algorithm, config: &Configuration) -> EnrichedResult {
    Engine::default().solve(algorithm, config)
}

/// Benchmarks with default limits.
pub fn benchmark(algorithm: Algorithm, config: &Configuration, repeats: usize) -> EnrichedResult {
    Engine::default().benchmark(algorithm, config, repeats)
}
