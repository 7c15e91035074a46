//! Board geometry: squares, knight displacements and key/goal predicates.
//!
//! Every search strategy goes through these helpers; none of them encode
//! board geometry on their own.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 8;

/// Number of key slots in a configuration.
pub const KEY_COUNT: usize = 3;

/// The eight knight displacements as `(row delta, col delta)`.
///
/// Successors are always generated in this order. It decides which of several
/// equally deep solutions DFS and IDS report, so changing it changes results.
pub const KNIGHT_MOVES: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// Returns true if `(row, col)` lies on the board.
#[inline(always)]
pub fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// A board square. Both coordinates are in `0..BOARD_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    /// Creates a cell, panicking (at compile time in const contexts) when off the board.
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(
            (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE,
            "cell must be on the board"
        );
        Self { row, col }
    }

    /// Creates a cell from signed coordinates, or `None` when off the board.
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        in_bounds(row, col).then(|| Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Applies a knight displacement, returning `None` if it leaves the board.
    #[inline]
    pub fn offset(self, (d_row, d_col): (i8, i8)) -> Option<Self> {
        Self::try_new(
            self.row as i32 + d_row as i32,
            self.col as i32 + d_col as i32,
        )
    }

    /// Linear index in row-major order, `0..BOARD_SIZE * BOARD_SIZE`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) as u32 + self.col.abs_diff(other.col) as u32
    }

    /// Returns true if a single knight move leads from `self` to `other`.
    pub fn is_knight_move_to(self, other: Cell) -> bool {
        KNIGHT_MOVES
            .iter()
            .any(|&displacement| self.offset(displacement) == Some(other))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Parses `"row,col"`, optionally wrapped in parentheses.
impl FromStr for Cell {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidCoordinate(text.to_string());
        let inner = text
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (row, col) = inner.split_once(',').ok_or_else(invalid)?;
        let row: i32 = row.trim().parse().map_err(|_| invalid())?;
        let col: i32 = col.trim().parse().map_err(|_| invalid())?;
        Cell::try_new(row, col).ok_or_else(invalid)
    }
}

/// The three key slots. A slot may be empty while a setup is being assembled.
///
/// Keys are interchangeable: standing on any of them grants the key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeySet {
    slots: [Option<Cell>; KEY_COUNT],
}

impl KeySet {
    pub const fn new(slots: [Option<Cell>; KEY_COUNT]) -> Self {
        Self { slots }
    }

    /// A key set with every slot filled.
    pub const fn from_cells(cells: [Cell; KEY_COUNT]) -> Self {
        Self {
            slots: [Some(cells[0]), Some(cells[1]), Some(cells[2])],
        }
    }

    pub fn get(&self, slot: usize) -> Option<Cell> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn place(&mut self, slot: usize, cell: Cell) -> Result<(), ConfigError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(ConfigError::InvalidKeySlot(slot))?;
        *entry = Some(cell);
        Ok(())
    }

    /// Returns true if `cell` holds any placed key.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.slots.contains(&Some(cell))
    }

    /// Slot of the first key placed on `cell`.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.slots.iter().position(|&slot| slot == Some(cell))
    }

    /// Placed keys in slot order.
    pub fn placed(&self) -> impl Iterator<Item = Cell> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// First empty slot, if any.
    pub fn missing_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn is_complete(&self) -> bool {
        self.missing_slot().is_none()
    }
}

/// The goal holds once a key is carried onto the door square.
#[inline]
pub fn is_goal(cell: Cell, has_key: bool, door: Cell) -> bool {
    has_key && cell == door
}
