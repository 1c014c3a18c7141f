use thiserror::Error;

/// Errors surfaced by the engine's caller-facing entry points.
///
/// Missing structural anchors, unbalanced markup, and oversized atomic units
/// are NOT errors; they take documented fallback paths instead. The only
/// rejectable input is a zero line budget, which is refused up front rather
/// than clamped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("line budget must be at least 1 byte")]
    InvalidBudget,
}
