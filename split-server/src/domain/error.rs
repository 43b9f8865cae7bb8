//! Domain error types.
//!
//! These errors represent a journey that cannot be analysed. They are
//! distinct from provider/IO errors.

/// A journey failed validation before analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,

    /// First leg has no resolvable origin station
    #[error("journey origin station id is missing")]
    MissingOrigin,

    /// Last leg has no resolvable destination station
    #[error("journey destination station id is missing")]
    MissingDestination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::EmptyJourney;
        assert_eq!(err.to_string(), "journey must have at least one leg");

        let err = ValidationError::MissingOrigin;
        assert_eq!(err.to_string(), "journey origin station id is missing");

        let err = ValidationError::MissingDestination;
        assert_eq!(err.to_string(), "journey destination station id is missing");
    }
}
