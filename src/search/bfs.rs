//! Breadth-first search, the minimum-move baseline.

use std::collections::VecDeque;
use std::time::Instant;

use crate::scenario::Configuration;
use crate::search::{Algorithm, SolveResult, Termination};
use crate::state::{SearchState, StateArena, VisitedSet};

pub(super) fn solve(config: &Configuration) -> SolveResult {
    let started = Instant::now();
    let mut arena = StateArena::default();
    let mut visited = VisitedSet::default();
    let mut queue = VecDeque::new();

    let root = arena.push(SearchState::start(config.start));
    visited.insert(arena[root].signature());
    queue.push_back(root);

    let mut nodes_expanded = 0;
    let mut goal = None;

    while let Some(id) = queue.pop_front() {
        nodes_expanded += 1;
        let state = arena[id];
        if state.is_goal(config.door) {
            goal = Some(id);
            break;
        }

        for child in state.successors(id, &config.keys) {
            // mark on enqueue so each signature is queued at most once
            if visited.insert(child.signature()) {
                queue.push_back(arena.push(child));
            }
        }
    }

    let termination = match goal {
        Some(_) => Termination::Goal,
        None => Termination::Exhausted,
    };
    SolveResult::finish(
        Algorithm::Bfs,
        started,
        &arena,
        goal,
        nodes_expanded,
        termination,
    )
}
