#![deny(missing_docs)]

//! # fplfile-models
//!
//! ICAO flight-plan message codec and validation engine for the filing
//! portal. Takes a loosely-typed [`FlightPlanSubmission`], normalizes it
//! into a [`FlightPlan`], checks it against the grammar of items 7–19 of
//! the ATS flight-plan form plus the cross-field and filing-time rules,
//! and — only when every rule passes — serialises it into the
//! hyphen-delimited ATS text line.
//!
//! ## Data flow
//!
//! ```text
//! FlightPlanSubmission
//!   └── normalize() ──► FlightPlan
//!         └── file(plan, ctx) ──► FilingOutcome
//!               ├── Rejected { errors }   (one entry per defect)
//!               └── Filed { message }     (the ATS line, e.g. "(FPL-PTABC-…)")
//! ```
//!
//! Normalization is total: unrecognised input becomes an explicit
//! *unspecified* state, never an error. All failure reporting funnels
//! through validation, which always runs every rule and reports every
//! defect at once.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`fields`] | Closed-code enums, submission type, normalizer |
//! | [`plan`] | The `FlightPlan` aggregate, item-18/19 blocks |
//! | [`error`] | `ValidationError`, `FilingOutcome` |
//! | [`filing`] | Validation orchestrator and the encoder gate |
//!
//! The field-level and cross-field rule registries and the ATS encoder
//! are internal; [`filing::file`] is the only path from a plan to a
//! message.

pub mod error;
pub mod fields;
pub mod filing;
pub mod plan;

mod consistency;
mod encode;
mod rules;

// Re-export all public types at crate root for convenience.
pub use encode::AtsMessage;
pub use error::{FilingOutcome, ValidationError};
pub use fields::{
    FilingCategory, FlightPlanSubmission, FlightRules, FlightType, WakeCategory,
};
pub use filing::{file, file_submission, FilingContext};
pub use plan::{Dinghies, FlightPlan, OtherInfo, SupplementaryInfo};
