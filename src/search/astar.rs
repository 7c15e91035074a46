//! A* search.
//!
//! The open list is a min-heap on `(f, StateId)`. Arena ids grow in insertion
//! order, so candidates with equal `f` leave the heap in arrival order.
//! Separate g-score slots exist for the with-key and without-key copy of each
//! square.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use crate::board::Cell;
use crate::scenario::Configuration;
use crate::search::{Algorithm, SolveResult, Termination};
use crate::state::{SearchState, SignatureMap, StateArena, StateId, VisitedSet};

/// Lower bound on the moves still needed from `cell`.
///
/// A knight move changes Manhattan distance by at most 3, hence `ceil(d / 3)`.
/// Without a key the knight must pass through one of the placed keys first.
/// The estimate is admissible and consistent, so A* returns minimum-move paths.
pub fn heuristic(cell: Cell, has_key: bool, config: &Configuration) -> u32 {
    if has_key {
        return cell.manhattan(config.door).div_ceil(3);
    }
    config
        .keys
        .placed()
        .map(|key| (cell.manhattan(key) + key.manhattan(config.door)).div_ceil(3))
        .min()
        .unwrap_or(u32::MAX)
}

pub(super) fn solve(config: &Configuration) -> SolveResult {
    let started = Instant::now();
    let mut arena = StateArena::default();
    let mut closed = VisitedSet::default();
    let mut g_scores = SignatureMap::new(u32::MAX);
    let mut open: BinaryHeap<Reverse<(u32, StateId)>> = BinaryHeap::new();

    let start = SearchState::start(config.start);
    g_scores.set(start.signature(), 0);
    let root = arena.push(start);
    open.push(Reverse((heuristic(start.cell, false, config), root)));

    let mut nodes_expanded = 0;
    let mut goal = None;

    while let Some(Reverse((_, id))) = open.pop() {
        let state = arena[id];
        if !closed.insert(state.signature()) {
            continue;
        }
        nodes_expanded += 1;

        if state.is_goal(config.door) {
            goal = Some(id);
            break;
        }

        for child in state.successors(id, &config.keys) {
            // g is the depth: every move costs one
            let tentative = child.depth;
            let signature = child.signature();
            if tentative < g_scores.get(signature) {
                g_scores.set(signature, tentative);
                let f = tentative.saturating_add(heuristic(child.cell, child.has_key, config));
                open.push(Reverse((f, arena.push(child))));
            }
        }
    }

    let termination = match goal {
        Some(_) => Termination::Goal,
        None => Termination::Exhausted,
    };
    SolveResult::finish(
        Algorithm::AStar,
        started,
        &arena,
        goal,
        nodes_expanded,
        termination,
    )
}
