//! WBS code parsing
//!
//! P6 exports hierarchical WBS codes as dot-separated paths
//! (`PROJ.Phase1.Area2`). The path feeds the per-group health scorer.

/// Split a WBS code into trimmed path segments. Blank codes and codes
/// whose segments are all empty produce an empty path, which the scorer
/// treats as "ungrouped".
pub fn parse_wbs_path(code: &str) -> Vec<String> {
    code.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
