//! Human-readable and JSON renderings of results.
//!
//! The move trace leaves timings out so it stays identical between runs;
//! timings appear only in the feedback line and the comparison table.

use std::fmt::Write;

use serde::Serialize;

use crate::board::{Cell, KEY_COUNT};
use crate::engine::{Comparison, EnrichedResult};
use crate::scenario::Configuration;

/// `"key 2"` for slot 1, `"none"` when no key was picked up.
pub fn key_label(slot: Option<usize>) -> String {
    match slot {
        Some(slot) => format!("key {}", slot + 1),
        None => "none".to_string(),
    }
}

fn elapsed_ms(enriched: &EnrichedResult) -> f64 {
    enriched.result.elapsed.as_secs_f64() * 1000.0
}

/// Lists the configuration and then every move of the path.
pub fn format_trace(config: &Configuration, enriched: &EnrichedResult) -> String {
    let result = &enriched.result;
    let mut output = String::new();

    // writing to a String cannot fail
    let _ = writeln!(output, "== {} ==", result.algorithm);
    let _ = writeln!(output, "start: knight at {}, no key", config.start);
    let keys: Vec<String> = (0..KEY_COUNT)
        .filter_map(|slot| {
            config
                .keys
                .get(slot)
                .map(|cell| format!("#{} {}", slot + 1, cell))
        })
        .collect();
    let _ = writeln!(output, "keys: {}", keys.join(", "));
    let _ = writeln!(output, "door: {}", config.door);

    let Some(path) = &result.path else {
        let _ = write!(
            output,
            "{} found no solution ({}) after expanding {} nodes",
            result.algorithm, result.termination, result.nodes_expanded
        );
        return output;
    };

    let _ = writeln!(output, "chosen key: {}", key_label(enriched.chosen_key));
    output.push('\n');

    for (i, pair) in path.windows(2).enumerate() {
        let (prev, step) = (pair[0], pair[1]);
        let _ = write!(output, "move {}: knight -> {}", i + 1, step.cell);
        if !prev.has_key && step.has_key {
            let _ = write!(
                output,
                ", picked up {}",
                key_label(config.keys.index_of(step.cell))
            );
        }
        if step.has_key && step.cell == config.door {
            output.push_str(", reached the door");
        }
        output.push('\n');
    }

    let moves = path.len() - 1;
    let _ = write!(
        output,
        "{} took {} moves and expanded {} nodes",
        result.algorithm, moves, result.nodes_expanded
    );
    if let Some(optimal) = enriched.optimal_moves {
        let _ = write!(output, " (minimum: {optimal} moves)");
    }
    output
}

/// One-sentence summary of a single run, including its time.
pub fn feedback(enriched: &EnrichedResult) -> String {
    let result = &enriched.result;
    match enriched.moves() {
        None => format!(
            "{}: no solution ({}), {} nodes expanded.",
            result.algorithm, result.termination, result.nodes_expanded
        ),
        Some(moves) => {
            let mut line = format!(
                "{} chose {}, found a path of {} moves in {:.3} ms (expanded {} nodes).",
                result.algorithm,
                key_label(enriched.chosen_key),
                moves,
                elapsed_ms(enriched),
                result.nodes_expanded
            );
            if enriched.is_optimal {
                line.push_str(" This is the minimum number of moves.");
            }
            line
        }
    }
}

/// Table with one line per strategy followed by the fastest-strategy line.
pub fn format_comparison(comparison: &Comparison) -> String {
    let mut output = format!(
        "{:<9} {:>5} {:>10} {:>6}  {:<6} {}\n",
        "algorithm", "moves", "time (ms)", "nodes", "key", "optimal"
    );

    for row in &comparison.rows {
        let moves = row
            .moves()
            .map_or_else(|| "-".to_string(), |moves| moves.to_string());
        let _ = writeln!(
            output,
            "{:<9} {:>5} {:>10.3} {:>6}  {:<6} {}",
            row.result.algorithm.name(),
            moves,
            elapsed_ms(row),
            row.result.nodes_expanded,
            key_label(row.chosen_key),
            if row.is_optimal { "yes" } else { "no" }
        );
    }

    match comparison.fastest() {
        Some(fastest) => {
            let _ = write!(
                output,
                "fastest: {} (chose {}, {:.3} ms, {} moves)",
                fastest.result.algorithm,
                key_label(fastest.chosen_key),
                elapsed_ms(fastest),
                fastest.moves().unwrap_or_default()
            );
        }
        None => output.push_str("no algorithm found a solution for this configuration"),
    }
    output
}

/// Serializable view of one [`EnrichedResult`].
#[derive(Debug, Serialize)]
pub struct ResultRow {
    pub algorithm: &'static str,
    pub moves: Option<usize>,
    pub elapsed_ms: f64,
    pub nodes_expanded: u64,
    pub chosen_key: Option<usize>,
    pub is_optimal: bool,
    pub termination: String,
    pub path: Vec<Cell>,
}

impl From<&EnrichedResult> for ResultRow {
    fn from(enriched: &EnrichedResult) -> Self {
        let result = &enriched.result;
        Self {
            algorithm: result.algorithm.name(),
            moves: enriched.moves(),
            elapsed_ms: elapsed_ms(enriched),
            nodes_expanded: result.nodes_expanded,
            chosen_key: enriched.chosen_key,
            is_optimal: enriched.is_optimal,
            termination: result.termination.to_string(),
            path: result
                .path
                .iter()
                .flatten()
                .map(|step| step.cell)
                .collect(),
        }
    }
}

/// Pretty-printed JSON array of result rows.
pub fn to_json<'a, I>(results: I) -> serde_json::Result<String>
where
    I: IntoIterator<Item = &'a EnrichedResult>,
{
    let rows: Vec<ResultRow> = results.into_iter().map(ResultRow::from).collect();
    serde_json::to_string_pretty(&rows)
}
