/// Data organization utilities for the monitoring service.
///
/// This module provides the pure read-side helpers consumers use to slice
/// the measurement collection and its derived alert set. Nothing here
/// mutates data or performs I/O.
///
/// Submodules:
/// - `filters` — measurement filtering by category, parameter, and period.
/// - `summary` — report counts and per-measurement overall status.

pub mod filters;
pub mod summary;
