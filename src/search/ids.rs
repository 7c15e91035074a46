//! Iterative deepening depth-first search.
//!
//! Runs a depth-limited DFS for limits `0..=max_depth`. Every iteration gets
//! a fresh arena and a fresh table of the shallowest depth at which each
//! signature was entered; a signature is re-entered only along a strictly
//! shallower route, which keeps the first successful limit equal to the
//! minimum move count.

use std::time::Instant;

use crate::scenario::Configuration;
use crate::search::{Algorithm, SolveResult, Termination};
use crate::state::{SearchState, SignatureMap, StateArena, StateId};

/// One depth-limited pass.
struct DepthLimited<'a> {
    config: &'a Configuration,
    limit: u32,
    arena: StateArena,
    shallowest: SignatureMap<u32>,
    nodes_expanded: u64,
    /// Set when some branch was stopped by `limit` rather than exhausted.
    cut_off: bool,
}

impl<'a> DepthLimited<'a> {
    fn new(config: &'a Configuration, limit: u32) -> Self {
        Self {
            config,
            limit,
            arena: StateArena::default(),
            shallowest: SignatureMap::new(u32::MAX),
            nodes_expanded: 0,
            cut_off: false,
        }
    }

    fn run(&mut self) -> Option<StateId> {
        let start = SearchState::start(self.config.start);
        self.shallowest.set(start.signature(), 0);
        let root = self.arena.push(start);
        self.descend(root)
    }

    fn descend(&mut self, id: StateId) -> Option<StateId> {
        self.nodes_expanded += 1;
        let state = self.arena[id];
        if state.is_goal(self.config.door) {
            return Some(id);
        }
        if state.depth == self.limit {
            self.cut_off = true;
            return None;
        }

        let config = self.config;
        for child in state.successors(id, &config.keys) {
            let signature = child.signature();
            if child.depth >= self.shallowest.get(signature) {
                continue;
            }
            self.shallowest.set(signature, child.depth);
            let child_id = self.arena.push(child);
            if let Some(goal) = self.descend(child_id) {
                return Some(goal);
            }
        }
        None
    }
}

pub(super) fn solve(config: &Configuration, max_depth: u32) -> SolveResult {
    let started = Instant::now();
    let mut nodes_expanded = 0;

    for limit in 0..=max_depth {
        let mut pass = DepthLimited::new(config, limit);
        let goal = pass.run();
        nodes_expanded += pass.nodes_expanded;
        log::trace!(
            "IDS limit {limit}: {} nodes, cut off: {}",
            pass.nodes_expanded,
            pass.cut_off
        );

        if goal.is_some() {
            return SolveResult::finish(
                Algorithm::Ids,
                started,
                &pass.arena,
                goal,
                nodes_expanded,
                Termination::Goal,
            );
        }
        if !pass.cut_off {
            // nothing was left unexplored, so deeper limits cannot help
            return SolveResult::finish(
                Algorithm::Ids,
                started,
                &pass.arena,
                None,
                nodes_expanded,
                Termination::Exhausted,
            );
        }
    }

    SolveResult::finish(
        Algorithm::Ids,
        started,
        &StateArena::default(),
        None,
        nodes_expanded,
        Termination::DepthCeiling { max_depth },
    )
}
