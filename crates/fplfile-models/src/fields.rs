//! Field model and normalizer.
//!
//! Closed-code enums for the coded items of the flight-plan form, plus
//! [`FlightPlanSubmission`] — the loosely-typed input handed over by the
//! transport layer — and its total normalization into a
//! [`FlightPlan`](crate::plan::FlightPlan).
//!
//! Normalization never fails: blanks fall back to the legacy defaults,
//! aliases are resolved case-insensitively, and anything unrecognised
//! becomes an explicit `Unspecified` variant for the validators to
//! report. Parsing is total so that all failure reporting funnels
//! through one place.

use serde::{Deserialize, Serialize};

use crate::plan::{FlightPlan, OtherInfo, SupplementaryInfo};

/// Identification substituted for a blank item 7 (legacy test-filing marker).
pub(crate) const DEFAULT_IDENTIFICATION: &str = "TESTE";

/// Equipment substituted for a blank item 10 (standard equipment).
pub(crate) const DEFAULT_EQUIPMENT: &str = "S";

/// Sentinel for an aerodrome without an assigned ICAO code; the matching
/// item-18 annotation (`DEP/`, `DEST/` or `ALTN/`) must describe it.
pub(crate) const ZZZZ: &str = "ZZZZ";

// ---------------------------------------------------------------------------
// FlightRules
// ---------------------------------------------------------------------------

/// Item 8 flight rules.
///
/// Accepts the single ICAO letter or the full word on input; displays as
/// the wire code (`IFR`, `VFR`, `Y`, `Z`).
///
/// # Examples
///
/// ```
/// use fplfile_models::FlightRules;
///
/// assert_eq!("I".parse::<FlightRules>().unwrap(), FlightRules::Ifr);
/// assert_eq!("ifr".parse::<FlightRules>().unwrap(), FlightRules::Ifr);
/// assert_eq!(FlightRules::Ifr.to_string(), "IFR");
/// ```
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum FlightRules {
    /// Instrument flight rules for the entire flight.
    #[strum(to_string = "IFR", serialize = "I")]
    Ifr,
    /// Visual flight rules for the entire flight.
    #[strum(to_string = "VFR", serialize = "V")]
    Vfr,
    /// IFR first, changing to VFR en route.
    #[strum(to_string = "Y")]
    IfrThenVfr,
    /// VFR first, changing to IFR en route.
    #[strum(to_string = "Z")]
    VfrThenIfr,
    /// The submitted value did not resolve to any known rules code.
    #[strum(to_string = "UNSPECIFIED")]
    Unspecified,
}

impl FlightRules {
    /// Resolve a raw submitted value; unrecognised input is
    /// [`Unspecified`](Self::Unspecified), never an error.
    pub(crate) fn resolve(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
            .unwrap_or(FlightRules::Unspecified)
    }

    /// Whether the flight ends under VFR (pure VFR or IFR-then-VFR).
    /// This is what legitimises the literal `VFR` cruising level.
    pub fn ends_vfr(self) -> bool {
        matches!(self, FlightRules::Vfr | FlightRules::IfrThenVfr)
    }
}

// ---------------------------------------------------------------------------
// FlightType
// ---------------------------------------------------------------------------

/// Item 8 type of flight.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum FlightType {
    /// Scheduled air service.
    #[strum(to_string = "S", serialize = "SCHEDULED")]
    Scheduled,
    /// Non-scheduled air transport.
    #[strum(to_string = "N", serialize = "NON-SCHEDULED", serialize = "NONSCHEDULED")]
    NonScheduled,
    /// General aviation.
    #[strum(to_string = "G", serialize = "GENERAL")]
    General,
    /// Military.
    #[strum(to_string = "M", serialize = "MILITARY")]
    Military,
    /// Other flights.
    #[strum(to_string = "X", serialize = "OTHER")]
    Other,
    /// The submitted value did not resolve to any known type code.
    #[strum(to_string = "UNSPECIFIED")]
    Unspecified,
}

impl FlightType {
    /// Resolve a raw submitted value; unrecognised input is
    /// [`Unspecified`](Self::Unspecified), never an error.
    pub(crate) fn resolve(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
            .unwrap_or(FlightType::Unspecified)
    }
}

// ---------------------------------------------------------------------------
// WakeCategory
// ---------------------------------------------------------------------------

/// Item 9 wake-turbulence category.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum WakeCategory {
    /// MTOM of 136 000 kg or more, designated super.
    #[strum(to_string = "J", serialize = "SUPER")]
    Super,
    /// MTOM of 136 000 kg or more.
    #[strum(to_string = "H", serialize = "HEAVY")]
    Heavy,
    /// MTOM between 7 000 kg and 136 000 kg.
    #[strum(to_string = "M", serialize = "MEDIUM")]
    Medium,
    /// MTOM of 7 000 kg or less.
    #[strum(to_string = "L", serialize = "LIGHT")]
    Light,
    /// The submitted value did not resolve to any known category.
    #[strum(to_string = "UNSPECIFIED")]
    Unspecified,
}

impl WakeCategory {
    /// Resolve a raw submitted value; unrecognised input is
    /// [`Unspecified`](Self::Unspecified), never an error.
    pub(crate) fn resolve(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
            .unwrap_or(WakeCategory::Unspecified)
    }
}

// ---------------------------------------------------------------------------
// FilingCategory
// ---------------------------------------------------------------------------

/// Submission category of a filing, which determines the minimum lead
/// time between the filing instant and the requested departure time.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FilingCategory {
    /// Simplified/short submission: departure at least 15 minutes ahead.
    Simplified,
    /// Full submission: departure at least 45 minutes ahead.
    Full,
}

impl FilingCategory {
    /// Minimum required lead time in minutes between filing and departure.
    pub fn lead_minutes(self) -> i64 {
        match self {
            FilingCategory::Simplified => 15,
            FilingCategory::Full => 45,
        }
    }
}

// ---------------------------------------------------------------------------
// FlightPlanSubmission
// ---------------------------------------------------------------------------

/// The flat, loosely-typed submission handed over by the transport layer.
///
/// Every field is optional; [`normalize`](Self::normalize) applies the
/// defaulting and alias resolution of the legacy contract and always
/// yields a [`FlightPlan`] — possibly an invalid one, for the validators
/// to report on.
///
/// # Examples
///
/// ```
/// use fplfile_models::FlightPlanSubmission;
///
/// let sub: FlightPlanSubmission = serde_json::from_str(r#"{
///     "aircraft_id": "ptabc",
///     "flight_rules": "I",
///     "departure": "sbsp"
/// }"#).unwrap();
/// let plan = sub.normalize();
/// assert_eq!(plan.aircraft_id, "PTABC");
/// assert_eq!(plan.departure, "SBSP");
/// // Blank destination defaults to the ZZZZ sentinel.
/// assert_eq!(plan.destination, "ZZZZ");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FlightPlanSubmission {
    /// Item 7 aircraft identification.
    pub aircraft_id: Option<String>,
    /// Item 8 flight rules (letter or word).
    pub flight_rules: Option<String>,
    /// Item 8 type of flight (letter or word).
    pub flight_type: Option<String>,
    /// Item 9 number of aircraft (formation flights).
    pub aircraft_number: Option<u32>,
    /// Item 9 aircraft type designator.
    pub aircraft_type: Option<String>,
    /// Item 9 wake-turbulence category (letter or word).
    pub wake_category: Option<String>,
    /// Item 10 equipment and capabilities text.
    pub equipment: Option<String>,
    /// Item 13 departure aerodrome.
    pub departure: Option<String>,
    /// Item 13 departure time, HHMM UTC.
    pub departure_time: Option<String>,
    /// Item 15 cruising speed.
    pub cruising_speed: Option<String>,
    /// Item 15 cruising level.
    pub cruising_level: Option<String>,
    /// Item 15 route.
    pub route: Option<String>,
    /// Item 16 destination aerodrome.
    pub destination: Option<String>,
    /// Item 16 total estimated elapsed time, HHMM.
    pub total_eet: Option<String>,
    /// Item 16 first alternate aerodrome.
    pub alternate_1: Option<String>,
    /// Item 16 second alternate aerodrome.
    pub alternate_2: Option<String>,
    /// Item 18 other-information annotations.
    pub other: OtherInfo,
    /// Item 19 supplementary information.
    pub supplementary: SupplementaryInfo,
}

impl FlightPlanSubmission {
    /// Canonicalise this submission into a [`FlightPlan`].
    ///
    /// Trims and uppercases code-like text, substitutes the legacy
    /// defaults (blank identification → test marker, blank equipment →
    /// `"S"`, blank departure/destination → `"ZZZZ"`), and resolves
    /// coded fields to their variants. Never fails; defects are left in
    /// place for validation to report.
    #[must_use]
    pub fn normalize(self) -> FlightPlan {
        FlightPlan {
            aircraft_id: canon_or(self.aircraft_id, DEFAULT_IDENTIFICATION),
            flight_rules: FlightRules::resolve(self.flight_rules.as_deref()),
            flight_type: FlightType::resolve(self.flight_type.as_deref()),
            aircraft_number: self.aircraft_number.unwrap_or(0),
            aircraft_type: canon(self.aircraft_type),
            wake_category: WakeCategory::resolve(self.wake_category.as_deref()),
            equipment: canon_or(self.equipment, DEFAULT_EQUIPMENT),
            departure: canon_or(self.departure, ZZZZ),
            departure_time: canon(self.departure_time),
            cruising_speed: canon(self.cruising_speed),
            cruising_level: canon(self.cruising_level),
            route: canon(self.route),
            destination: canon_or(self.destination, ZZZZ),
            total_eet: canon(self.total_eet),
            alternate_1: canon_opt(self.alternate_1),
            alternate_2: canon_opt(self.alternate_2),
            other: self.other.normalized(),
            supplementary: self.supplementary.normalized(),
        }
    }
}

// ---------------------------------------------------------------------------
// Canonicalisation helpers
// ---------------------------------------------------------------------------

/// Trim and uppercase; blank or absent input becomes the empty string.
pub(crate) fn canon(raw: Option<String>) -> String {
    raw.map(|s| s.trim().to_ascii_uppercase())
        .unwrap_or_default()
}

/// Trim and uppercase; blank or absent input becomes the default.
fn canon_or(raw: Option<String>, default: &str) -> String {
    let value = canon(raw);
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Trim and uppercase; blank or absent input becomes `None`.
pub(crate) fn canon_opt(raw: Option<String>) -> Option<String> {
    let value = canon(raw);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_rules_aliases() {
        assert_eq!(FlightRules::resolve(Some("I")), FlightRules::Ifr);
        assert_eq!(FlightRules::resolve(Some("ifr")), FlightRules::Ifr);
        assert_eq!(FlightRules::resolve(Some(" V ")), FlightRules::Vfr);
        assert_eq!(FlightRules::resolve(Some("Y")), FlightRules::IfrThenVfr);
        assert_eq!(FlightRules::resolve(Some("z")), FlightRules::VfrThenIfr);
        assert_eq!(FlightRules::resolve(Some("??")), FlightRules::Unspecified);
        assert_eq!(FlightRules::resolve(None), FlightRules::Unspecified);
    }

    #[test]
    fn flight_rules_ends_vfr() {
        assert!(FlightRules::Vfr.ends_vfr());
        assert!(FlightRules::IfrThenVfr.ends_vfr());
        assert!(!FlightRules::Ifr.ends_vfr());
        assert!(!FlightRules::VfrThenIfr.ends_vfr());
    }

    #[test]
    fn flight_type_aliases() {
        assert_eq!(FlightType::resolve(Some("G")), FlightType::General);
        assert_eq!(FlightType::resolve(Some("general")), FlightType::General);
        assert_eq!(FlightType::resolve(Some("NON-SCHEDULED")), FlightType::NonScheduled);
        assert_eq!(FlightType::resolve(Some("bogus")), FlightType::Unspecified);
    }

    #[test]
    fn wake_category_aliases() {
        assert_eq!(WakeCategory::resolve(Some("L")), WakeCategory::Light);
        assert_eq!(WakeCategory::resolve(Some("heavy")), WakeCategory::Heavy);
        assert_eq!(WakeCategory::resolve(Some("SUPER")), WakeCategory::Super);
        assert_eq!(WakeCategory::resolve(Some("")), WakeCategory::Unspecified);
    }

    #[test]
    fn every_resolved_code_roundtrips_through_its_display() {
        use strum::IntoEnumIterator;
        for rules in FlightRules::iter().filter(|r| *r != FlightRules::Unspecified) {
            assert_eq!(FlightRules::resolve(Some(&rules.to_string())), rules);
        }
        for wake in WakeCategory::iter().filter(|w| *w != WakeCategory::Unspecified) {
            assert_eq!(WakeCategory::resolve(Some(&wake.to_string())), wake);
        }
    }

    #[test]
    fn filing_category_lead_times() {
        assert_eq!(FilingCategory::Simplified.lead_minutes(), 15);
        assert_eq!(FilingCategory::Full.lead_minutes(), 45);
        assert_eq!("full".parse::<FilingCategory>().unwrap(), FilingCategory::Full);
    }

    #[test]
    fn normalize_applies_legacy_defaults() {
        let plan = FlightPlanSubmission::default().normalize();
        assert_eq!(plan.aircraft_id, DEFAULT_IDENTIFICATION);
        assert_eq!(plan.equipment, DEFAULT_EQUIPMENT);
        assert_eq!(plan.departure, ZZZZ);
        assert_eq!(plan.destination, ZZZZ);
        assert_eq!(plan.aircraft_number, 0);
        assert_eq!(plan.flight_rules, FlightRules::Unspecified);
        assert!(plan.alternate_1.is_none());
    }

    #[test]
    fn normalize_canonicalises_case_and_whitespace() {
        let sub = FlightPlanSubmission {
            aircraft_id: Some(" ptabc ".into()),
            departure: Some("sbsp".into()),
            cruising_speed: Some("n0100".into()),
            route: Some(" dct uz31 pab dct ".into()),
            alternate_1: Some("  ".into()),
            ..Default::default()
        };
        let plan = sub.normalize();
        assert_eq!(plan.aircraft_id, "PTABC");
        assert_eq!(plan.departure, "SBSP");
        assert_eq!(plan.cruising_speed, "N0100");
        assert_eq!(plan.route, "DCT UZ31 PAB DCT");
        assert!(plan.alternate_1.is_none());
    }

    #[test]
    fn normalize_never_fails_on_garbage() {
        let sub = FlightPlanSubmission {
            flight_rules: Some("QUUX".into()),
            flight_type: Some("123".into()),
            wake_category: Some("???".into()),
            ..Default::default()
        };
        let plan = sub.normalize();
        assert_eq!(plan.flight_rules, FlightRules::Unspecified);
        assert_eq!(plan.flight_type, FlightType::Unspecified);
        assert_eq!(plan.wake_category, WakeCategory::Unspecified);
    }

    #[test]
    fn submission_deserializes_with_missing_fields() {
        let sub: FlightPlanSubmission = serde_json::from_str("{}").unwrap();
        assert_eq!(sub, FlightPlanSubmission::default());
    }
}
