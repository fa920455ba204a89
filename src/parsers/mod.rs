//! Parsers for P6-style schedule exports
//!
//! This module turns a raw header row + data rows into the in-memory
//! activity set the metric evaluators consume:
//!
//! - `columns` — maps raw export headers (with optional unit suffixes
//!   like `Total Float(d)`) onto canonical field names.
//! - `relationships` — tokenizes predecessor/successor cell text
//!   (`ID: TYPE [LAG]`, comma-separated) into typed records.
//! - `wbs` — splits hierarchical WBS codes into path segments.
//! - `table` — assembles normalized rows plus parsed relationships into
//!   the `ActivityTable`, computing per-activity derived flags.
//!
//! Malformed input never aborts parsing: bad entries are dropped with an
//! `AnalysisWarning` and the pipeline continues. The single fatal case is
//! a required column missing from the schema (`ScheduleError`).

mod columns;
mod relationships;
mod table;
mod wbs;

pub use columns::{ColumnMap, OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
pub use relationships::{parse_relationship_cell, parse_simple_cell, EntryWarning, ParsedCell};
pub use table::ActivityTable;
pub use wbs::parse_wbs_path;
