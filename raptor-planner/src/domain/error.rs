//! Domain error types.
//!
//! These errors represent invalid leg or journey construction. They are
//! distinct from planner and provider errors.

/// Domain-level errors for leg and journey validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., alight before board)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Consecutive legs don't connect
    #[error("legs do not connect: {from} then {to}")]
    LegsNotConnected { from: String, to: String },

    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,
}
