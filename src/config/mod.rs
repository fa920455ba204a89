//! Configuration module for schedlint
//!
//! This module holds the analysis threshold configuration:
//! - DCMA/GAO target values for each metric evaluator
//! - Float-ratio tier bands
//! - Display truncation limits
//!
//! Thresholds are a single immutable value passed into the evaluators at
//! construction, never process-wide globals, so hosts can supply custom
//! targets without code changes.

mod thresholds;

pub use thresholds::AnalysisConfig;
