//! Depth-first search.
//!
//! Iterative backtracking over an explicit stack of frames, so the order of
//! exploration matches a recursive DFS without its recursion depth. Signatures
//! are marked visited when a state is created, not when it is expanded.

use std::time::Instant;

use crate::board::KNIGHT_MOVES;
use crate::scenario::Configuration;
use crate::search::{Algorithm, SolveResult, Termination};
use crate::state::{SearchState, StateArena, StateId, VisitedSet};

/// A state on the current DFS branch.
#[derive(Clone, Copy)]
struct Frame {
    id: StateId,
    /// Index into `KNIGHT_MOVES` of the next displacement to try.
    next_move: usize,
}

pub(super) fn solve(config: &Configuration) -> SolveResult {
    let started = Instant::now();
    let mut arena = StateArena::default();
    let mut visited = VisitedSet::default();

    let root = arena.push(SearchState::start(config.start));
    visited.insert(arena[root].signature());
    let mut nodes_expanded = 1;

    let mut goal = arena[root].is_goal(config.door).then_some(root);
    let mut stack = vec![Frame {
        id: root,
        next_move: 0,
    }];

    while goal.is_none() {
        let Some(frame) = stack.last_mut() else {
            break;
        };

        if frame.next_move == KNIGHT_MOVES.len() {
            // every displacement tried; backtrack
            stack.pop();
            continue;
        }

        let parent_id = frame.id;
        let displacement = KNIGHT_MOVES[frame.next_move];
        frame.next_move += 1;

        let parent = arena[parent_id];
        let Some(child) = parent.advance(parent_id, displacement, &config.keys) else {
            continue;
        };
        if !visited.insert(child.signature()) {
            continue;
        }

        let child_id = arena.push(child);
        nodes_expanded += 1;

        if child.is_goal(config.door) {
            goal = Some(child_id);
        } else {
            stack.push(Frame {
                id: child_id,
                next_move: 0,
            });
        }
    }

    let termination = match goal {
        Some(_) => Termination::Goal,
        None => Termination::Exhausted,
    };
    SolveResult::finish(
        Algorithm::Dfs,
        started,
        &arena,
        goal,
        nodes_expanded,
        termination,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_dfs_follows_move_order_before_backtracking() {
        // the first legal move from (7,0) is (6,2); from there (7,4)
        let config = Configuration::new(
            Cell::new(7, 0),
            [Cell::new(1, 2), Cell::new(6, 6), Cell::new(7, 5)],
            Cell::new(7, 7),
        );
        let result = solve(&config);
        let path = result.path.expect("solvable");
        let prefix: Vec<Cell> = path.iter().take(4).map(|step| step.cell).collect();
        assert_eq!(
            prefix,
            vec![Cell::new(7, 0), Cell::new(6, 2), Cell::new(7, 4), Cell::new(6, 6)]
        );
        assert_eq!(path.len() - 1, 13);
        assert_eq!(result.nodes_expanded, 14);
    }

    #[test]
    fn test_dfs_counts_every_created_state() {
        let config = Configuration::new(
            Cell::new(0, 0),
            [Cell::new(7, 7), Cell::new(7, 6), Cell::new(7, 5)],
            Cell::new(0, 1),
        );
        let result = solve(&config);
        assert_eq!(result.nodes_expanded, 55);
        assert_eq!(result.termination, Termination::Goal);
    }
}
