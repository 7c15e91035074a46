//! The augmented state graph every strategy explores.
//!
//! A state is a square plus a "carrying a key" flag, so at most
//! [`SIGNATURE_COUNT`] distinct signatures exist. States created by one search
//! live in a [`StateArena`] owned by that search and refer to their parent by
//! [`StateId`], which keeps path reconstruction free of shared pointers.

use std::ops::Index;

use serde::Serialize;

use crate::board::{is_goal, Cell, KeySet, BOARD_SIZE, KNIGHT_MOVES};

/// Number of distinct `(row, col, has_key)` signatures.
pub const SIGNATURE_COUNT: usize = BOARD_SIZE * BOARD_SIZE * 2;

/// Identity of a state for visited/closed bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub cell: Cell,
    pub has_key: bool,
}

impl Signature {
    /// Slot index: `cell.index() * 2 + has_key`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.cell.index() * 2 + self.has_key as usize
    }
}

/// A fixed 128-slot table indexed by [`Signature`].
///
/// Each search allocates its own; nothing is shared between calls.
#[derive(Clone)]
pub struct SignatureMap<T> {
    slots: [T; SIGNATURE_COUNT],
}

impl<T: Copy> SignatureMap<T> {
    pub fn new(fill: T) -> Self {
        Self {
            slots: [fill; SIGNATURE_COUNT],
        }
    }

    #[inline]
    pub fn get(&self, signature: Signature) -> T {
        self.slots[signature.index()]
    }

    #[inline]
    pub fn set(&mut self, signature: Signature, value: T) {
        self.slots[signature.index()] = value;
    }
}

/// Visited/closed marker set.
pub type VisitedSet = SignatureMap<bool>;

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new(false)
    }
}

impl VisitedSet {
    /// Marks `signature`, returning false if it was already marked.
    #[inline]
    pub fn insert(&mut self, signature: Signature) -> bool {
        let slot = &mut self.slots[signature.index()];
        !std::mem::replace(slot, true)
    }

    pub fn contains(&self, signature: Signature) -> bool {
        self.get(signature)
    }
}

/// Index of a state inside its [`StateArena`].
///
/// Ids are handed out in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchState {
    pub cell: Cell,
    /// Once set along a path it stays set.
    pub has_key: bool,
    /// Moves made from the start.
    pub depth: u32,
    pub parent: Option<StateId>,
}

impl SearchState {
    /// The root state. The knight never starts holding a key, even on a key square.
    pub fn start(cell: Cell) -> Self {
        Self {
            cell,
            has_key: false,
            depth: 0,
            parent: None,
        }
    }

    pub fn signature(&self) -> Signature {
        Signature {
            cell: self.cell,
            has_key: self.has_key,
        }
    }

    pub fn is_goal(&self, door: Cell) -> bool {
        is_goal(self.cell, self.has_key, door)
    }

    /// The state reached by one knight displacement, if it stays on the board.
    ///
    /// Landing on any key square sets the key flag.
    #[inline]
    pub fn advance(&self, id: StateId, displacement: (i8, i8), keys: &KeySet) -> Option<Self> {
        let cell = self.cell.offset(displacement)?;
        Some(Self {
            cell,
            has_key: self.has_key || keys.contains(cell),
            depth: self.depth + 1,
            parent: Some(id),
        })
    }

    /// All successors of the state stored at `id`, in [`KNIGHT_MOVES`] order.
    pub fn successors<'a>(
        &'a self,
        id: StateId,
        keys: &'a KeySet,
    ) -> impl Iterator<Item = SearchState> + 'a {
        KNIGHT_MOVES
            .iter()
            .filter_map(move |&displacement| self.advance(id, displacement, keys))
    }
}

/// One step of a reconstructed path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub cell: Cell,
    pub has_key: bool,
    pub depth: u32,
}

/// Per-search storage for every state created during one traversal.
#[derive(Default)]
pub struct StateArena {
    states: Vec<SearchState>,
}

impl StateArena {
    pub fn push(&mut self, state: SearchState) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(state);
        id
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Walks parent links from `goal` back to the root and returns the path
    /// in start-to-goal order.
    pub fn path_to(&self, goal: StateId) -> Vec<PathStep> {
        let mut path = Vec::with_capacity(self[goal].depth as usize + 1);
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let state = &self[id];
            path.push(PathStep {
                cell: state.cell,
                has_key: state.has_key,
                depth: state.depth,
            });
            cursor = state.parent;
        }
        path.reverse();
        path
    }
}

impl Index<StateId> for StateArena {
    type Output = SearchState;

    fn index(&self, id: StateId) -> &SearchState {
        &self.states[id.0 as usize]
    }
}
