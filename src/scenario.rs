//! Puzzle configurations: placement, validation, presets and random setups.
//!
//! The engine only accepts a [`Configuration`], which always has the knight,
//! all three keys and the door placed. A [`Setup`] collects placements one at
//! a time and is turned into a configuration by [`Setup::validate`].

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::board::{Cell, KeySet, BOARD_SIZE, KEY_COUNT};
use crate::error::ConfigError;

/// A complete puzzle: start square, three keys and the door.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub start: Cell,
    /// Every slot is filled.
    pub keys: KeySet,
    pub door: Cell,
}

impl Configuration {
    pub const fn new(start: Cell, keys: [Cell; KEY_COUNT], door: Cell) -> Self {
        Self {
            start,
            keys: KeySet::from_cells(keys),
            door,
        }
    }
}

/// Pieces placed so far, any of which may still be missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Setup {
    pub start: Option<Cell>,
    pub keys: KeySet,
    pub door: Option<Cell>,
}

impl Setup {
    pub fn place_start(&mut self, cell: Cell) {
        self.start = Some(cell);
    }

    /// Places key `slot` (0, 1 or 2), replacing any key already there.
    pub fn place_key(&mut self, slot: usize, cell: Cell) -> Result<(), ConfigError> {
        self.keys.place(slot, cell)
    }

    pub fn place_door(&mut self, cell: Cell) {
        self.door = Some(cell);
    }

    /// Checks that every piece is placed.
    ///
    /// Reports the first missing piece in the order knight, keys, door.
    pub fn validate(&self) -> Result<Configuration, ConfigError> {
        let start = self.start.ok_or(ConfigError::MissingStart)?;
        if let Some(slot) = self.keys.missing_slot() {
            return Err(ConfigError::MissingKey(slot));
        }
        let door = self.door.ok_or(ConfigError::MissingDoor)?;
        Ok(Configuration {
            start,
            keys: self.keys,
            door,
        })
    }
}

impl From<Configuration> for Setup {
    fn from(config: Configuration) -> Self {
        Self {
            start: Some(config.start),
            keys: config.keys,
            door: Some(config.door),
        }
    }
}

/// A named, ready-made configuration.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub configuration: Configuration,
}

pub static PRESETS: [Preset; 4] = [
    Preset {
        id: "near-key",
        name: "Knight near key",
        configuration: Configuration::new(
            Cell::new(0, 1),
            [Cell::new(1, 3), Cell::new(5, 4), Cell::new(6, 2)],
            Cell::new(7, 7),
        ),
    },
    Preset {
        id: "near-door-key",
        name: "Key near door",
        configuration: Configuration::new(
            Cell::new(7, 0),
            [Cell::new(1, 2), Cell::new(6, 6), Cell::new(7, 5)],
            Cell::new(7, 7),
        ),
    },
    Preset {
        id: "tricky-choice",
        name: "Tricky choice",
        configuration: Configuration::new(
            Cell::new(3, 3),
            [Cell::new(4, 5), Cell::new(6, 1), Cell::new(1, 6)],
            Cell::new(7, 0),
        ),
    },
    Preset {
        id: "spread-out",
        name: "All spread out",
        configuration: Configuration::new(
            Cell::new(2, 2),
            [Cell::new(0, 7), Cell::new(7, 3), Cell::new(4, 0)],
            Cell::new(6, 6),
        ),
    },
];

/// Looks up a preset by id.
pub fn preset(id: &str) -> Result<&'static Preset, ConfigError> {
    PRESETS
        .iter()
        .find(|preset| preset.id == id)
        .ok_or_else(|| ConfigError::UnknownPreset(id.to_string()))
}

/// Draws a configuration whose five pieces all stand on different squares.
pub fn random_configuration<R: Rng>(rng: &mut R) -> Configuration {
    let mut used: FxHashSet<Cell> = FxHashSet::default();
    let mut draw = |rng: &mut R| loop {
        let cell = Cell::new(
            rng.gen_range(0..BOARD_SIZE as u8),
            rng.gen_range(0..BOARD_SIZE as u8),
        );
        if used.insert(cell) {
            break cell;
        }
    };

    let start = draw(&mut *rng);
    let keys = [draw(&mut *rng), draw(&mut *rng), draw(&mut *rng)];
    let door = draw(&mut *rng);
    Configuration::new(start, keys, door)
}
