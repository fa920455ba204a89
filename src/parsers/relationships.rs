//! Relationship cell tokenizer
//!
//! P6 detail cells carry comma-separated entries of the form
//! `ID: TYPE` or `ID: TYPE LAG` (`A100: FS`, `B200: FF 10`,
//! `C300: SS -15`). Ids-only cells (`A100, B200`) carry no type or lag
//! and fall back to FS with zero lag.
//!
//! Parsing is a direct tokenizer over the cell text. Malformed entries
//! are dropped individually with a warning; the remainder of the cell
//! still parses.

use crate::models::{RelType, Relationship};

/// One dropped entry, with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWarning {
    /// The raw entry text as it appeared in the cell
    pub entry: String,
    pub reason: String,
}

/// Result of parsing one relationship cell.
#[derive(Debug, Clone, Default)]
pub struct ParsedCell {
    /// Well-formed entries, cell declaration order
    pub relationships: Vec<Relationship>,
    /// One per dropped entry; empty cells produce none
    pub warnings: Vec<EntryWarning>,
}

fn valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Parse one entry already split out of the cell. `None` means the entry
/// was malformed; the caller records the warning.
fn parse_entry(entry: &str) -> Result<Relationship, String> {
    let Some((id_part, rest)) = entry.split_once(':') else {
        return Err("expected 'ID: TYPE [LAG]'".to_string());
    };

    let id = id_part.trim();
    if !valid_id(id) {
        return Err(format!("invalid activity id '{id}'"));
    }

    let mut tokens = rest.split_whitespace();
    let Some(code) = tokens.next() else {
        return Err("missing relationship type".to_string());
    };
    let Some(rel_type) = RelType::from_code(code) else {
        return Err(format!("unknown relationship type '{code}'"));
    };

    let lag = match tokens.next() {
        None => 0,
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| format!("invalid lag '{raw}'"))?,
    };

    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected trailing token '{extra}'"));
    }

    Ok(Relationship::new(id, rel_type, lag))
}

/// Parse a detail cell (`ID: TYPE [LAG]`, comma-separated).
///
/// Empty and whitespace-only segments between commas are skipped
/// silently; they are separators, not malformed entries.
pub fn parse_relationship_cell(cell: &str) -> ParsedCell {
    let mut parsed = ParsedCell::default();

    for segment in cell.split(',') {
        let entry = segment.trim();
        if entry.is_empty() {
            continue;
        }
        match parse_entry(entry) {
            Ok(rel) => parsed.relationships.push(rel),
            Err(reason) => parsed.warnings.push(EntryWarning {
                entry: entry.to_string(),
                reason,
            }),
        }
    }

    parsed
}

/// Parse an ids-only cell (`A100, B200`): each id becomes an FS
/// relationship with zero lag. Used only when no detail column exists.
pub fn parse_simple_cell(cell: &str) -> ParsedCell {
    let mut parsed = ParsedCell::default();

    for segment in cell.split(',') {
        let id = segment.trim();
        if id.is_empty() {
            continue;
        }
        if valid_id(id) {
            parsed
                .relationships
                .push(Relationship::new(id, RelType::FS, 0));
        } else {
            parsed.warnings.push(EntryWarning {
                entry: id.to_string(),
                reason: format!("invalid activity id '{id}'"),
            });
        }
    }

    parsed
}
