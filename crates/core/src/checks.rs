//! # Checks
//!
//! This module turns the check runs reported for a commit into a merge verdict.
//!
//! The checks are organized into submodules:
//! - `aggregate`: Folds the raw check-run list according to an [`crate::config::AggregationPolicy`]
//! - `required`: Tracks the state of each required check and why it blocks the merge
//!
//! These are used by the `AutoMerger` to decide whether a pull request can be
//! merged.

pub mod aggregate;
pub mod required;
