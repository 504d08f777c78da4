//! Validation orchestrator and the single gate to the encoder.
//!
//! [`file`] runs every field-level rule, then every cross-field and
//! business rule, and concatenates all findings. A non-empty list means
//! the message is withheld entirely — no partial encoding is ever
//! attempted. An empty list means the plan is handed to the encoder and
//! exactly one message comes back.
//!
//! No other path from a plan to an ATS message exists; the encoder
//! module is private to the crate.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consistency;
use crate::encode;
use crate::error::FilingOutcome;
use crate::fields::{FilingCategory, FlightPlanSubmission};
use crate::plan::FlightPlan;
use crate::rules;

// ---------------------------------------------------------------------------
// FilingContext
// ---------------------------------------------------------------------------

/// Caller-supplied context for the filing-time business rules.
///
/// The core never reads the clock itself; the transport passes the
/// current UTC instant in, which keeps every rule a pure function.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilingContext {
    /// The filing instant, UTC.
    pub now: DateTime<Utc>,
    /// Submission category, which sets the departure lead time.
    pub category: FilingCategory,
}

impl FilingContext {
    /// Minutes since midnight UTC of the filing instant, for comparison
    /// against the HHMM departure time.
    pub(crate) fn minutes_of_day(&self) -> i64 {
        i64::from(self.now.hour() * 60 + self.now.minute())
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Validate a normalized plan and, only if every rule passes, encode it.
///
/// Both validator families always run in full; their findings are
/// concatenated so the filer sees every defect from one submission.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use fplfile_models::{file, FilingCategory, FilingContext, FlightPlanSubmission};
///
/// let plan = FlightPlanSubmission::default().normalize();
/// let ctx = FilingContext {
///     now: Utc.with_ymd_and_hms(2026, 8, 27, 8, 0, 0).unwrap(),
///     category: FilingCategory::Full,
/// };
/// let outcome = file(&plan, &ctx);
/// assert!(!outcome.is_filed());
/// assert!(!outcome.errors().is_empty());
/// ```
pub fn file(plan: &FlightPlan, ctx: &FilingContext) -> FilingOutcome {
    let mut errors = rules::check_all(plan);
    errors.extend(consistency::check_all(plan, ctx));

    if errors.is_empty() {
        let message = encode::encode(plan);
        debug!(aircraft_id = %plan.aircraft_id, "flight plan filed");
        FilingOutcome::Filed { message }
    } else {
        debug!(
            aircraft_id = %plan.aircraft_id,
            defects = errors.len(),
            "flight plan rejected"
        );
        FilingOutcome::Rejected { errors }
    }
}

/// Normalize a raw submission and file it in one step.
pub fn file_submission(submission: FlightPlanSubmission, ctx: &FilingContext) -> FilingOutcome {
    file(&submission.normalize(), ctx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::plan::OtherInfo;

    fn valid_submission() -> FlightPlanSubmission {
        FlightPlanSubmission {
            aircraft_id: Some("PTABC".into()),
            flight_rules: Some("I".into()),
            flight_type: Some("G".into()),
            aircraft_number: Some(1),
            aircraft_type: Some("C172".into()),
            wake_category: Some("L".into()),
            equipment: Some("SDFGRY/S".into()),
            departure: Some("SBSP".into()),
            departure_time: Some("1300".into()),
            cruising_speed: Some("N0100".into()),
            cruising_level: Some("F090".into()),
            route: Some("DCT UZ31 PAB DCT".into()),
            destination: Some("SBRJ".into()),
            total_eet: Some("0105".into()),
            alternate_1: Some("SBJR".into()),
            alternate_2: Some("SBRP".into()),
            other: OtherInfo {
                pbn: Some("B2C2".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ctx() -> FilingContext {
        FilingContext {
            now: Utc.with_ymd_and_hms(2026, 8, 27, 8, 0, 0).unwrap(),
            category: FilingCategory::Full,
        }
    }

    #[test]
    fn valid_plan_is_filed_with_no_errors() {
        let outcome = file_submission(valid_submission(), &ctx());
        assert!(outcome.is_filed());
        assert!(outcome.errors().is_empty());
        let message = outcome.message().unwrap();
        assert!(message.as_str().starts_with("(FPL-PTABC"));
        assert!(message.as_str().ends_with(')'));
    }

    #[test]
    fn invalid_plan_withholds_the_message() {
        // Bad departure aerodrome and blank cruising speed: the outcome
        // carries no message and references both offending items.
        let submission = FlightPlanSubmission {
            departure: Some("XXX".into()),
            cruising_speed: None,
            ..valid_submission()
        };
        let outcome = file_submission(submission, &ctx());
        assert!(!outcome.is_filed());
        assert!(outcome.message().is_none());
        let codes: Vec<&str> = outcome.errors().iter().map(|e| e.code.as_str()).collect();
        assert!(codes.iter().any(|c| c.starts_with("ITEM13")));
        assert!(codes.iter().any(|c| c.starts_with("ITEM15")));
    }

    #[test]
    fn outcome_is_message_xor_errors() {
        for submission in [
            valid_submission(),
            FlightPlanSubmission::default(),
            FlightPlanSubmission {
                aircraft_id: Some("!".into()),
                ..valid_submission()
            },
        ] {
            let outcome = file_submission(submission, &ctx());
            let has_message = outcome.message().is_some();
            let has_errors = !outcome.errors().is_empty();
            assert!(has_message != has_errors);
        }
    }

    #[test]
    fn filing_is_deterministic() {
        let first = file_submission(valid_submission(), &ctx());
        let second = file_submission(valid_submission(), &ctx());
        assert_eq!(first, second);
        assert_eq!(
            first.message().unwrap().as_str(),
            second.message().unwrap().as_str()
        );
    }

    #[test]
    fn pbn_requirement_is_the_sole_defect() {
        // Equipment carries R but no PBN/ annotation: exactly one error,
        // referencing the PBN requirement.
        let submission = FlightPlanSubmission {
            other: OtherInfo::default(),
            ..valid_submission()
        };
        let outcome = file_submission(submission, &ctx());
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].code, "ITEM18.PBN");
    }

    #[test]
    fn zzzz_destination_without_dest_annotation_is_rejected() {
        let submission = FlightPlanSubmission {
            destination: Some("ZZZZ".into()),
            ..valid_submission()
        };
        let outcome = file_submission(submission, &ctx());
        let codes: Vec<&str> = outcome.errors().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["ITEM18.DEST"]);
    }

    #[test]
    fn short_lead_time_is_rejected_with_the_lead_in_the_message() {
        let submission = FlightPlanSubmission {
            departure_time: Some("0820".into()),
            ..valid_submission()
        };
        let outcome = file_submission(submission, &ctx());
        assert!(!outcome.is_filed());
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].code, "ITEM13.EOBT");
        assert!(outcome.errors()[0].message.contains("45 minutes"));
    }

    #[test]
    fn error_strings_mirror_the_structured_list() {
        let outcome = file_submission(
            FlightPlanSubmission {
                departure: Some("XXX".into()),
                ..valid_submission()
            },
            &ctx(),
        );
        let flat = outcome.error_strings();
        assert_eq!(flat.len(), outcome.errors().len());
        assert!(flat[0].starts_with("ITEM13.DEP: "));
    }
}
