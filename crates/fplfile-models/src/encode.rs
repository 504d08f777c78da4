//! ATS message encoder.
//!
//! Deterministic, order-preserving projection of an already-valid
//! [`FlightPlan`] into the hyphen-delimited ATS line. The encoder
//! performs no validation and never fails; it assumes every field- and
//! cross-field rule has passed. Only the filing orchestrator calls it —
//! the module is private, so no caller can reach it with an unvalidated
//! plan.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::plan::FlightPlan;

// ---------------------------------------------------------------------------
// AtsMessage
// ---------------------------------------------------------------------------

/// The serialised ATS flight-plan message line, e.g.
/// `(FPL-PTABC-IFR/G-C172/L-SDFGRY/S-SBSP1300-N0100F090 DCT UZ31 PAB DCT-SBRJ0105 SBJR SBRP-PBN/B2C2)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtsMessage(String);

impl AtsMessage {
    pub(crate) fn from_line(line: String) -> Self {
        Self(line)
    }

    /// Return the wire line as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AtsMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Serialise a validated plan into the ATS line: one segment per item,
/// in item order, joined by `-`, the whole wrapped in parentheses.
pub(crate) fn encode(plan: &FlightPlan) -> AtsMessage {
    let mut segments: Vec<String> = Vec::with_capacity(10);
    segments.push("FPL".to_string());
    segments.push(plan.aircraft_id.clone());
    segments.push(format!("{}/{}", plan.flight_rules, plan.flight_type));
    segments.push(aircraft_segment(plan));
    segments.push(plan.equipment.clone());
    segments.push(format!("{}{}", plan.departure, plan.departure_time));
    segments.push(format!(
        "{}{} {}",
        plan.cruising_speed, plan.cruising_level, plan.route
    ));
    segments.push(destination_segment(plan));
    segments.push(other_segment(plan));
    if let Some(supplementary) = supplementary_segment(plan) {
        segments.push(supplementary);
    }
    let line = format!("({})", segments.join("-"));
    AtsMessage::from_line(collapse_whitespace(&line))
}

/// Item 9: `<count><type>/<wake>`; the count is omitted for a single
/// aircraft.
fn aircraft_segment(plan: &FlightPlan) -> String {
    if plan.aircraft_number > 1 {
        format!(
            "{}{}/{}",
            plan.aircraft_number, plan.aircraft_type, plan.wake_category
        )
    } else {
        format!("{}/{}", plan.aircraft_type, plan.wake_category)
    }
}

/// Item 16: destination immediately followed by the EET, then any
/// present alternates separated by single spaces.
fn destination_segment(plan: &FlightPlan) -> String {
    let mut segment = format!("{}{}", plan.destination, plan.total_eet);
    for alternate in [plan.alternate_1.as_deref(), plan.alternate_2.as_deref()]
        .into_iter()
        .flatten()
    {
        segment.push(' ');
        segment.push_str(alternate);
    }
    segment
}

/// Item 18: `CODE/value` tokens in sorted code order, or `0` when the
/// block is empty.
fn other_segment(plan: &FlightPlan) -> String {
    let tokens: Vec<String> = plan
        .other
        .tokens()
        .into_iter()
        .map(|(code, value)| format!("{code}/{value}"))
        .collect();
    if tokens.is_empty() {
        "0".to_string()
    } else {
        tokens.join(" ")
    }
}

/// Item 19: `CODE/value` tokens in sorted code order; the segment is
/// omitted entirely when no supplementary data is present.
fn supplementary_segment(plan: &FlightPlan) -> Option<String> {
    let tokens: Vec<String> = plan
        .supplementary
        .tokens()
        .into_iter()
        .map(|(code, value)| format!("{code}/{value}"))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Collapse runs of whitespace into single spaces.
fn collapse_whitespace(line: &str) -> String {
    let mut collapsed = String::with_capacity(line.len());
    let mut previous_was_space = false;
    for c in line.chars() {
        if c.is_whitespace() {
            if !previous_was_space {
                collapsed.push(' ');
            }
            previous_was_space = true;
        } else {
            collapsed.push(c);
            previous_was_space = false;
        }
    }
    collapsed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
