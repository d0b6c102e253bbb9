use thiserror::Error;

/// Errors produced by the planning library.
///
/// Planning outcomes are never errors: a goal that cannot be reached (or can
/// only be reached within the depth bound) yields an empty plan. `GoapError`
/// covers contract violations caught at construction time and I/O failures
/// from the plan visualizer.
#[derive(Error, Debug)]
pub enum GoapError {
    /// An action was created with an empty name.
    #[error("Action name must not be empty")]
    EmptyActionName,
    /// An action was created with a negative or non-finite base cost.
    #[error("Action cost must be finite and non-negative")]
    InvalidActionCost,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GoapError>;
