//! Knight & Keys search engine.
//!
//! A knight on an 8x8 board must step on any one of three key squares before
//! it may finish on the door square. This crate searches that state space with
//! DFS, BFS, A* and iterative deepening, and reports the path, the number of
//! expanded states, the time taken, which key was used and whether the path
//! is as short as the BFS baseline.

pub mod board;
pub mod engine;
pub mod error;
pub mod report;
pub mod scenario;
pub mod search;
pub mod state;

pub use board::{Cell, KeySet};
pub use engine::{benchmark, solve, Comparison, Engine, EnrichedResult, DEFAULT_REPEATS};
pub use error::ConfigError;
pub use scenario::{Configuration, Setup};
pub use search::{Algorithm, SearchLimits, SolveResult, Termination};
