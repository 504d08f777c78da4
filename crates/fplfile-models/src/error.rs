//! Validation errors and the filing result contract.
//!
//! Every defect found by the validators — single-item, cross-field or
//! filing-time — is reported as a [`ValidationError`], a `(code, message)`
//! pair. The code format `ITEMn[.SUBFIELD]` is a contract consumed by
//! callers (e.g. to highlight the offending form field) and must not
//! change shape.

use serde::{Deserialize, Serialize};

use crate::encode::AtsMessage;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A single validation defect, as an immutable `(code, message)` pair.
///
/// `code` is a stable machine-readable identifier of the shape
/// `ITEMn[.SUBFIELD]` (e.g. `"ITEM7"`, `"ITEM13.TIME"`); `message` is the
/// human-readable explanation. Field-level, cross-field and business-timing
/// defects are all represented identically.
///
/// # Examples
///
/// ```
/// use fplfile_models::ValidationError;
///
/// let err = ValidationError::new("ITEM7", "aircraft identification is required");
/// assert_eq!(err.to_string(), "ITEM7: aircraft identification is required");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ValidationError {
    /// Machine-readable item code, `ITEMn[.SUBFIELD]`.
    pub code: String,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// FilingOutcome
// ---------------------------------------------------------------------------

/// The discriminated result of filing a flight plan.
///
/// Exactly one of the two variants is ever produced: a message with zero
/// errors, or one-or-more errors with no message. No partial or
/// best-effort message is ever surfaced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum FilingOutcome {
    /// Every rule passed; the ATS message was generated.
    Filed {
        /// The serialised ATS message line.
        message: AtsMessage,
    },
    /// At least one rule failed; the message is withheld entirely.
    Rejected {
        /// Every defect found, in rule-registry order.
        errors: Vec<ValidationError>,
    },
}

impl FilingOutcome {
    /// The generated ATS message, if the plan was filed.
    pub fn message(&self) -> Option<&AtsMessage> {
        match self {
            FilingOutcome::Filed { message } => Some(message),
            FilingOutcome::Rejected { .. } => None,
        }
    }

    /// The defects found, empty when the plan was filed.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            FilingOutcome::Filed { .. } => &[],
            FilingOutcome::Rejected { errors } => errors,
        }
    }

    /// `true` when the plan was filed and a message is present.
    pub fn is_filed(&self) -> bool {
        matches!(self, FilingOutcome::Filed { .. })
    }

    /// Backward-compatible flat `"code: message"` view of the errors.
    ///
    /// The structured list from [`errors`](Self::errors) is authoritative.
    pub fn error_strings(&self) -> Vec<String> {
        self.errors().iter().map(ValidationError::to_string).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
