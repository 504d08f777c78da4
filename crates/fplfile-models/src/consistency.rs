//! Cross-field consistency rules and filing-time business rules.
//!
//! These checks read two or more items together (equipment against the
//! item-18 annotations, the `ZZZZ` sentinel against its descriptions,
//! the supplementary implication pairs) plus the filing-time rules that
//! need the caller-supplied clock in
//! [`FilingContext`](crate::filing::FilingContext).
//!
//! Same registry shape as the field-level rules: every rule runs, all
//! findings are concatenated.

use tracing::trace;

use crate::error::ValidationError;
use crate::fields::{FlightRules, ZZZZ};
use crate::filing::FilingContext;
use crate::plan::FlightPlan;
use crate::rules::parse_hhmm;

/// A named cross-field check.
pub(crate) struct ConsistencyRule {
    /// Short rule name, for tracing.
    pub(crate) name: &'static str,
    /// The check itself.
    pub(crate) check: fn(&FlightPlan, &FilingContext) -> Vec<ValidationError>,
}

/// The cross-field rule registry, in fixed order.
pub(crate) static CONSISTENCY_RULES: &[ConsistencyRule] = &[
    ConsistencyRule { name: "equipment-none-sole", check: check_equipment_none },
    ConsistencyRule { name: "equipment-r-pbn", check: check_pbn_annotation },
    ConsistencyRule { name: "equipment-z-nav", check: check_other_navigation },
    ConsistencyRule { name: "zzzz-annotations", check: check_zzzz_annotations },
    ConsistencyRule { name: "vfr-level", check: check_vfr_level },
    ConsistencyRule { name: "survival-flags", check: check_survival_flags },
    ConsistencyRule { name: "jacket-flags", check: check_jacket_flags },
    ConsistencyRule { name: "dinghies", check: check_dinghies },
    ConsistencyRule { name: "departure-lead", check: check_departure_lead },
    ConsistencyRule { name: "eet-endurance", check: check_eet_endurance },
    ConsistencyRule { name: "rea-remark", check: check_rea_remark },
];

/// Run every cross-field rule and concatenate the findings.
pub(crate) fn check_all(plan: &FlightPlan, ctx: &FilingContext) -> Vec<ValidationError> {
    CONSISTENCY_RULES
        .iter()
        .flat_map(|rule| {
            let findings = (rule.check)(plan, ctx);
            if !findings.is_empty() {
                trace!(rule = rule.name, defects = findings.len(), "consistency rule failed");
            }
            findings
        })
        .collect()
}

/// The communication/navigation/approach part of the equipment text
/// (everything before the surveillance `/`).
fn capability_codes(plan: &FlightPlan) -> &str {
    plan.equipment.split('/').next().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Equipment ↔ annotations
// ---------------------------------------------------------------------------

fn check_equipment_none(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    let codes = capability_codes(plan);
    if codes.contains('N') && codes != "N" {
        return vec![ValidationError::new(
            "ITEM10.N",
            "equipment code N (no equipment) must be the sole entry",
        )];
    }
    Vec::new()
}

fn check_pbn_annotation(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    if capability_codes(plan).contains('R') && plan.other.pbn.is_none() {
        return vec![ValidationError::new(
            "ITEM18.PBN",
            "equipment code R requires a PBN/ annotation in item 18",
        )];
    }
    Vec::new()
}

fn check_other_navigation(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    let has_detail =
        plan.other.nav.is_some() || plan.other.com.is_some() || plan.other.dat.is_some();
    if capability_codes(plan).contains('Z') && !has_detail {
        return vec![ValidationError::new(
            "ITEM18.NAV",
            "equipment code Z requires a NAV/, COM/ or DAT/ annotation in item 18",
        )];
    }
    Vec::new()
}

// ---------------------------------------------------------------------------
// ZZZZ sentinel ↔ annotations
// ---------------------------------------------------------------------------

fn check_zzzz_annotations(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if plan.departure == ZZZZ && plan.other.dep.is_none() {
        errors.push(ValidationError::new(
            "ITEM18.DEP",
            "departure aerodrome ZZZZ requires a DEP/ annotation in item 18",
        ));
    }
    if plan.destination == ZZZZ && plan.other.dest.is_none() {
        errors.push(ValidationError::new(
            "ITEM18.DEST",
            "destination aerodrome ZZZZ requires a DEST/ annotation in item 18",
        ));
    }
    let any_alternate_zzzz = [plan.alternate_1.as_deref(), plan.alternate_2.as_deref()]
        .into_iter()
        .flatten()
        .any(|alternate| alternate == ZZZZ);
    if any_alternate_zzzz && plan.other.altn.is_none() {
        errors.push(ValidationError::new(
            "ITEM18.ALTN",
            "alternate aerodrome ZZZZ requires an ALTN/ annotation in item 18",
        ));
    }
    errors
}

// ---------------------------------------------------------------------------
// VFR cruising level
// ---------------------------------------------------------------------------

fn check_vfr_level(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    // Unresolved rules are already reported by the field validator.
    if plan.cruising_level == "VFR"
        && plan.flight_rules != FlightRules::Unspecified
        && !plan.flight_rules.ends_vfr()
    {
        return vec![ValidationError::new(
            "ITEM15.LEVEL",
            "cruising level VFR is only allowed when the flight ends under VFR",
        )];
    }
    Vec::new()
}

// ---------------------------------------------------------------------------
// Supplementary implications
// ---------------------------------------------------------------------------

fn check_survival_flags(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    let supp = &plan.supplementary;
    let any_specific = supp.survival_polar
        || supp.survival_desert
        || supp.survival_maritime
        || supp.survival_jungle;
    if supp.survival_none && any_specific {
        return vec![ValidationError::new(
            "ITEM19.SURVIVAL",
            "survival equipment flags cannot be combined with \"no survival equipment\"",
        )];
    }
    Vec::new()
}

fn check_jacket_flags(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    let supp = &plan.supplementary;
    let any_specific =
        supp.jacket_light || supp.jacket_fluorescein || supp.jacket_uhf || supp.jacket_vhf;
    if supp.jackets_none && any_specific {
        return vec![ValidationError::new(
            "ITEM19.JACKETS",
            "life-jacket flags cannot be combined with \"no life jackets\"",
        )];
    }
    Vec::new()
}

fn check_dinghies(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    let dinghies = &plan.supplementary.dinghies;
    let has_detail = dinghies.capacity.is_some() || dinghies.covered || dinghies.colour.is_some();
    if !dinghies.is_carried() && has_detail {
        return vec![ValidationError::new(
            "ITEM19.DINGHIES",
            "dinghy capacity, cover and colour require a dinghy count",
        )];
    }
    Vec::new()
}

// ---------------------------------------------------------------------------
// Filing-time business rules
// ---------------------------------------------------------------------------

fn check_departure_lead(plan: &FlightPlan, ctx: &FilingContext) -> Vec<ValidationError> {
    // A malformed departure time is the field validator's finding.
    let Some(departure) = parse_hhmm(&plan.departure_time) else {
        return Vec::new();
    };
    let lead = ctx.category.lead_minutes();
    if i64::from(departure) - ctx.minutes_of_day() < lead {
        return vec![ValidationError::new(
            "ITEM13.EOBT",
            format!("departure time must be at least {lead} minutes after the filing time"),
        )];
    }
    Vec::new()
}

fn check_eet_endurance(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    let (Some(eet), Some(endurance)) = (
        parse_hhmm(&plan.total_eet),
        plan.supplementary.endurance.as_deref().and_then(parse_hhmm),
    ) else {
        return Vec::new();
    };
    if eet > endurance {
        return vec![ValidationError::new(
            "ITEM16.EET",
            "total estimated elapsed time exceeds the declared endurance",
        )];
    }
    Vec::new()
}

fn check_rea_remark(plan: &FlightPlan, _ctx: &FilingContext) -> Vec<ValidationError> {
    let route_has_rea = plan.route.split_whitespace().any(|token| token == "REA");
    let remark_has_rea = plan
        .other
        .rmk
        .as_deref()
        .is_some_and(|rmk| rmk.contains("REA"));
    if route_has_rea && !remark_has_rea {
        return vec![ValidationError::new(
            "ITEM18.RMK",
            "route uses the REA reduced-separation marker; RMK/ must mention REA",
        )];
    }
    Vec::new()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::fields::{FilingCategory, FlightPlanSubmission};
    use crate::plan::{Dinghies, OtherInfo};

    fn valid_plan() -> FlightPlan {
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
        .normalize()
    }

    fn ctx() -> FilingContext {
        // 0800Z, five hours before the sample departure at 1300.
        FilingContext {
            now: Utc.with_ymd_and_hms(2026, 8, 27, 8, 0, 0).unwrap(),
            category: FilingCategory::Full,
        }
    }

    fn codes(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.code.as_str()).collect()
    }

    #[test]
    fn valid_plan_passes_every_consistency_rule() {
        assert_eq!(check_all(&valid_plan(), &ctx()), Vec::new());
    }

    #[test]
    fn equipment_none_must_be_sole() {
        let mut plan = valid_plan();
        plan.equipment = "N".into();
        plan.other.pbn = None;
        assert!(check_all(&plan, &ctx()).is_empty());
        plan.equipment = "SN/S".into();
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM10.N"]);
    }

    #[test]
    fn pbn_capable_requires_pbn_annotation() {
        let mut plan = valid_plan();
        plan.other.pbn = None;
        let errors = check_all(&plan, &ctx());
        assert_eq!(codes(&errors), vec!["ITEM18.PBN"]);
    }

    #[test]
    fn other_navigation_requires_detail_annotation() {
        let mut plan = valid_plan();
        plan.equipment = "SZ/S".into();
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM18.NAV"]);
        plan.other.nav = Some("GNSS".into());
        assert!(check_all(&plan, &ctx()).is_empty());
        plan.other.nav = None;
        plan.other.dat = Some("V".into());
        assert!(check_all(&plan, &ctx()).is_empty());
    }

    #[test]
    fn zzzz_destination_requires_dest_annotation() {
        let mut plan = valid_plan();
        plan.destination = "ZZZZ".into();
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM18.DEST"]);
        plan.other.dest = Some("FAZENDA SANTA FE".into());
        assert!(check_all(&plan, &ctx()).is_empty());
    }

    #[test]
    fn zzzz_departure_and_alternate_require_annotations() {
        let mut plan = valid_plan();
        plan.departure = "ZZZZ".into();
        plan.alternate_2 = Some("ZZZZ".into());
        assert_eq!(
            codes(&check_all(&plan, &ctx())),
            vec!["ITEM18.DEP", "ITEM18.ALTN"]
        );
    }

    #[test]
    fn vfr_level_only_when_flight_ends_vfr() {
        let mut plan = valid_plan();
        plan.cruising_level = "VFR".into();
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM15.LEVEL"]);
        plan.flight_rules = FlightRules::IfrThenVfr;
        assert!(check_all(&plan, &ctx()).is_empty());
        plan.flight_rules = FlightRules::Vfr;
        assert!(check_all(&plan, &ctx()).is_empty());
        plan.flight_rules = FlightRules::VfrThenIfr;
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM15.LEVEL"]);
    }

    #[test]
    fn survival_none_forbids_specific_flags() {
        let mut plan = valid_plan();
        plan.supplementary.survival_none = true;
        assert!(check_all(&plan, &ctx()).is_empty());
        plan.supplementary.survival_maritime = true;
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM19.SURVIVAL"]);
    }

    #[test]
    fn jackets_none_forbids_specific_flags() {
        let mut plan = valid_plan();
        plan.supplementary.jackets_none = true;
        plan.supplementary.jacket_fluorescein = true;
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM19.JACKETS"]);
    }

    #[test]
    fn dinghy_details_require_a_count() {
        let mut plan = valid_plan();
        plan.supplementary.dinghies = Dinghies {
            number: None,
            capacity: Some(8),
            covered: false,
            colour: None,
        };
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM19.DINGHIES"]);
        plan.supplementary.dinghies.number = Some(0);
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM19.DINGHIES"]);
        plan.supplementary.dinghies.number = Some(2);
        assert!(check_all(&plan, &ctx()).is_empty());
    }

    #[test]
    fn departure_lead_time_by_category() {
        let mut plan = valid_plan();
        plan.departure_time = "0830".into();

        // 30 minutes ahead: enough for simplified (15), not for full (45).
        let simplified = FilingContext {
            category: FilingCategory::Simplified,
            ..ctx()
        };
        assert!(check_all(&plan, &simplified).is_empty());

        let errors = check_all(&plan, &ctx());
        assert_eq!(codes(&errors), vec!["ITEM13.EOBT"]);
        assert!(errors[0].message.contains("45 minutes"));

        // A departure time already in the past is always too soon.
        plan.departure_time = "0700".into();
        assert_eq!(codes(&check_all(&plan, &simplified)), vec!["ITEM13.EOBT"]);
    }

    #[test]
    fn eet_must_not_exceed_endurance() {
        let mut plan = valid_plan();
        plan.supplementary.endurance = Some("0100".into());
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM16.EET"]);
        plan.supplementary.endurance = Some("0105".into());
        assert!(check_all(&plan, &ctx()).is_empty());
    }

    #[test]
    fn rea_marker_requires_matching_remark() {
        let mut plan = valid_plan();
        plan.route = "DCT PAB REA DCT".into();
        assert_eq!(codes(&check_all(&plan, &ctx())), vec!["ITEM18.RMK"]);
        plan.other.rmk = Some("REA APPROVED".into());
        assert!(check_all(&plan, &ctx()).is_empty());
        // AREA does not trigger the marker rule.
        plan.route = "DCT AREA DCT".into();
        plan.other.rmk = None;
        assert!(check_all(&plan, &ctx()).is_empty());
    }
}
