//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`OctopusError`]
//! via `From` at the port boundary.

/// Top-level error for the Octopus price sensor.
#[derive(Debug, thiserror::Error)]
pub enum OctopusError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The snapshot source (coordinator, file, …) failed.
    #[error("snapshot source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The entity id string is empty.
    #[error("entity id must not be empty")]
    EmptyEntityId,

    /// The friendly name is empty.
    #[error("friendly name must not be empty")]
    EmptyName,

    /// The account number is empty.
    #[error("account number must not be empty")]
    EmptyAccountNumber,
}

/// Why a product's gross rate could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrossRateError {
    /// The rate is text but not a decimal number.
    #[error("gross rate {0:?} is not a number")]
    NotNumeric(String),

    /// The rate is neither text nor a number (e.g. `null`, a list).
    #[error("gross rate has unsupported type {0}")]
    UnsupportedType(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_validation_message() {
        assert_eq!(
            ValidationError::EmptyEntityId.to_string(),
            "entity id must not be empty"
        );
    }

    #[test]
    fn should_convert_validation_into_octopus_error() {
        let err: OctopusError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            OctopusError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_display_gross_rate_errors() {
        assert_eq!(
            GrossRateError::NotNumeric("abc".to_string()).to_string(),
            "gross rate \"abc\" is not a number"
        );
        assert_eq!(
            GrossRateError::UnsupportedType("null").to_string(),
            "gross rate has unsupported type null"
        );
    }
}
