//! Field-level validators — one rule per ICAO item.
//!
//! Each rule is a pure function evaluating only its own item(s) and
//! returning zero or more errors; the rules live in a static registry
//! (the same data-driven shape as a message-definition table) that the
//! orchestrator iterates unconditionally, in fixed item order, with no
//! short-circuiting — a filer must see every defect from one submission.
//!
//! Rules never mutate their input and never panic on malformed business
//! data; malformation is what a rule reports.

use tracing::trace;

use crate::error::ValidationError;
use crate::fields::{FlightRules, FlightType, WakeCategory};
use crate::plan::FlightPlan;

/// A named field-level check.
pub(crate) struct FieldRule {
    /// Item the rule covers, for tracing.
    pub(crate) item: &'static str,
    /// The check itself.
    pub(crate) check: fn(&FlightPlan) -> Vec<ValidationError>,
}

/// The field-level rule registry, in ATS item order.
pub(crate) static FIELD_RULES: &[FieldRule] = &[
    FieldRule { item: "7", check: check_identification },
    FieldRule { item: "8", check: check_rules_and_type },
    FieldRule { item: "9", check: check_aircraft },
    FieldRule { item: "10", check: check_equipment },
    FieldRule { item: "13", check: check_departure },
    FieldRule { item: "15", check: check_route_group },
    FieldRule { item: "16", check: check_destination_group },
    FieldRule { item: "18", check: check_other_info },
    FieldRule { item: "19", check: check_supplementary },
];

/// Run every field-level rule and concatenate the findings.
pub(crate) fn check_all(plan: &FlightPlan) -> Vec<ValidationError> {
    FIELD_RULES
        .iter()
        .flat_map(|rule| {
            let findings = (rule.check)(plan);
            if !findings.is_empty() {
                trace!(item = rule.item, defects = findings.len(), "field rule failed");
            }
            findings
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Shared predicates
// ---------------------------------------------------------------------------

/// Parse an HHMM string into minutes since midnight.
///
/// Requires both the 4-digit shape and the numeric ranges 00–23 / 00–59;
/// a value matching the shape but failing the range is rejected.
pub(crate) fn parse_hhmm(value: &str) -> Option<u32> {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = value[..2].parse().ok()?;
    let minutes: u32 = value[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Exactly 4 uppercase ASCII letters; the `ZZZZ` sentinel satisfies this.
pub(crate) fn is_aerodrome(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn hhmm_error(code: &str, field: &str, value: &str) -> ValidationError {
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        ValidationError::new(
            code,
            format!("{field} \"{value}\" out of range: hours 00-23, minutes 00-59"),
        )
    } else {
        ValidationError::new(code, format!("{field} must be 4 digits HHMM"))
    }
}

// ---------------------------------------------------------------------------
// Item checks
// ---------------------------------------------------------------------------

fn check_identification(plan: &FlightPlan) -> Vec<ValidationError> {
    let id = &plan.aircraft_id;
    if id.is_empty() {
        return vec![ValidationError::new(
            "ITEM7",
            "aircraft identification is required",
        )];
    }
    if id.len() < 2 || id.len() > 7 || !is_alphanumeric(id) {
        return vec![ValidationError::new(
            "ITEM7",
            format!("aircraft identification \"{id}\" must be 2 to 7 alphanumeric characters"),
        )];
    }
    Vec::new()
}

fn check_rules_and_type(plan: &FlightPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if plan.flight_rules == FlightRules::Unspecified {
        errors.push(ValidationError::new(
            "ITEM8.RULES",
            "flight rules must be one of IFR, VFR, Y or Z",
        ));
    }
    if plan.flight_type == FlightType::Unspecified {
        errors.push(ValidationError::new(
            "ITEM8.TYPE",
            "type of flight must be one of S, N, G, M or X",
        ));
    }
    errors
}

fn check_aircraft(plan: &FlightPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !(1..=99).contains(&plan.aircraft_number) {
        errors.push(ValidationError::new(
            "ITEM9.NUMBER",
            "number of aircraft must be between 1 and 99",
        ));
    }
    let designator = &plan.aircraft_type;
    if designator.len() < 2 || designator.len() > 4 || !is_alphanumeric(designator) {
        errors.push(ValidationError::new(
            "ITEM9.TYPE",
            format!("aircraft type \"{designator}\" must be 2 to 4 alphanumeric characters"),
        ));
    }
    if plan.wake_category == WakeCategory::Unspecified {
        errors.push(ValidationError::new(
            "ITEM9.WAKE",
            "wake-turbulence category must be one of J, H, M or L",
        ));
    }
    errors
}

fn check_equipment(plan: &FlightPlan) -> Vec<ValidationError> {
    let equipment = &plan.equipment;
    if equipment.is_empty() {
        return vec![ValidationError::new("ITEM10", "equipment is required")];
    }
    let valid = equipment
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'/');
    if !valid {
        return vec![ValidationError::new(
            "ITEM10",
            format!("equipment \"{equipment}\" may only contain letters, digits and \"/\""),
        )];
    }
    Vec::new()
}

fn check_departure(plan: &FlightPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !is_aerodrome(&plan.departure) {
        errors.push(ValidationError::new(
            "ITEM13.DEP",
            format!(
                "departure aerodrome \"{}\" must be a 4-letter ICAO code or ZZZZ",
                plan.departure
            ),
        ));
    }
    if parse_hhmm(&plan.departure_time).is_none() {
        errors.push(hhmm_error(
            "ITEM13.TIME",
            "departure time",
            &plan.departure_time,
        ));
    }
    errors
}

fn check_route_group(plan: &FlightPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !is_cruising_speed(&plan.cruising_speed) {
        errors.push(ValidationError::new(
            "ITEM15.SPEED",
            format!(
                "cruising speed \"{}\" must be N or K plus 4 digits, or M plus 3 digits",
                plan.cruising_speed
            ),
        ));
    }
    if !is_cruising_level(&plan.cruising_level) {
        errors.push(ValidationError::new(
            "ITEM15.LEVEL",
            format!(
                "cruising level \"{}\" must be F, A, M or S plus 3 digits, or VFR",
                plan.cruising_level
            ),
        ));
    }
    if plan.route.is_empty() {
        errors.push(ValidationError::new("ITEM15.ROUTE", "route is required"));
    }
    errors
}

fn check_destination_group(plan: &FlightPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !is_aerodrome(&plan.destination) {
        errors.push(ValidationError::new(
            "ITEM16.DEST",
            format!(
                "destination aerodrome \"{}\" must be a 4-letter ICAO code or ZZZZ",
                plan.destination
            ),
        ));
    }
    if parse_hhmm(&plan.total_eet).is_none() {
        errors.push(hhmm_error(
            "ITEM16.EET",
            "total estimated elapsed time",
            &plan.total_eet,
        ));
    }
    for (code, alternate) in [
        ("ITEM16.ALTN1", plan.alternate_1.as_deref()),
        ("ITEM16.ALTN2", plan.alternate_2.as_deref()),
    ] {
        if let Some(aerodrome) = alternate {
            if !is_aerodrome(aerodrome) {
                errors.push(ValidationError::new(
                    code,
                    format!(
                        "alternate aerodrome \"{aerodrome}\" must be a 4-letter ICAO code or ZZZZ"
                    ),
                ));
            }
        }
    }
    errors
}

fn check_other_info(plan: &FlightPlan) -> Vec<ValidationError> {
    plan.other
        .tokens()
        .into_iter()
        .filter(|(_, value)| value.contains(['(', ')', '-']))
        .map(|(code, value)| {
            ValidationError::new(
                format!("ITEM18.{code}"),
                format!("annotation {code}/\"{value}\" contains characters not allowed in the ATS line"),
            )
        })
        .collect()
}

fn check_supplementary(plan: &FlightPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(endurance) = plan.supplementary.endurance.as_deref() {
        if parse_hhmm(endurance).is_none() {
            errors.push(hhmm_error("ITEM19.ENDURANCE", "endurance", endurance));
        }
    }
    if let Some(persons) = plan.supplementary.persons_on_board {
        if persons > 999 {
            errors.push(ValidationError::new(
                "ITEM19.PERSONS",
                "persons on board must be between 0 and 999",
            ));
        }
    }
    errors
}

fn is_cruising_speed(value: &str) -> bool {
    match value.as_bytes() {
        [b'N' | b'K', digits @ ..] if digits.len() == 4 => {
            digits.iter().all(u8::is_ascii_digit)
        }
        [b'M', digits @ ..] if digits.len() == 3 => digits.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

fn is_cruising_level(value: &str) -> bool {
    if value == "VFR" {
        return true;
    }
    match value.as_bytes() {
        [b'F' | b'A' | b'M' | b'S', digits @ ..] if digits.len() == 3 => {
            digits.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
