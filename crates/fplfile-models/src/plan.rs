//! The flight-plan aggregate and its item-18/19 blocks.
//!
//! A [`FlightPlan`] is constructed exactly once per submission by
//! [`FlightPlanSubmission::normalize`](crate::fields::FlightPlanSubmission::normalize)
//! and never mutated afterwards. It is either discarded with the error
//! list or consumed by the encoder, after every rule has passed.
//!
//! The item-18 and item-19 blocks keep a closed set of known codes in
//! explicit fields; encoding iterates the codes in fixed sorted order
//! via [`OtherInfo::tokens`] and [`SupplementaryInfo::tokens`], so the
//! wire output never depends on incidental map-iteration order.

use serde::{Deserialize, Serialize};

use crate::fields::{canon_opt, FlightRules, FlightType, WakeCategory};

// ---------------------------------------------------------------------------
// FlightPlan
// ---------------------------------------------------------------------------

/// A normalized flight plan, covering items 7–19 of the ATS form.
///
/// Values reaching the encoder have passed every validation rule; until
/// then any field may hold an invalid-but-representable value (empty
/// strings, `Unspecified` variants, out-of-range numbers).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlightPlan {
    /// Item 7 aircraft identification, 2–7 alphanumeric.
    pub aircraft_id: String,
    /// Item 8 flight rules.
    pub flight_rules: FlightRules,
    /// Item 8 type of flight.
    pub flight_type: FlightType,
    /// Item 9 number of aircraft, 1–99 (0 = not submitted).
    pub aircraft_number: u32,
    /// Item 9 aircraft type designator, 2–4 alphanumeric.
    pub aircraft_type: String,
    /// Item 9 wake-turbulence category.
    pub wake_category: WakeCategory,
    /// Item 10 equipment text, e.g. `"SDFGRY/S"`.
    pub equipment: String,
    /// Item 13 departure aerodrome, 4 letters or `ZZZZ`.
    pub departure: String,
    /// Item 13 departure time, HHMM UTC.
    pub departure_time: String,
    /// Item 15 cruising speed (`N`/`K` + 4 digits or `M` + 3 digits).
    pub cruising_speed: String,
    /// Item 15 cruising level (`F`/`A`/`M`/`S` + 3 digits or `VFR`).
    pub cruising_level: String,
    /// Item 15 route text.
    pub route: String,
    /// Item 16 destination aerodrome, 4 letters or `ZZZZ`.
    pub destination: String,
    /// Item 16 total estimated elapsed time, HHMM.
    pub total_eet: String,
    /// Item 16 first alternate aerodrome.
    pub alternate_1: Option<String>,
    /// Item 16 second alternate aerodrome.
    pub alternate_2: Option<String>,
    /// Item 18 other information.
    pub other: OtherInfo,
    /// Item 19 supplementary information.
    pub supplementary: SupplementaryInfo,
}

// ---------------------------------------------------------------------------
// OtherInfo
// ---------------------------------------------------------------------------

/// Item 18 other-information annotations, keyed by the closed set of
/// 3–4-letter codes the portal accepts.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OtherInfo {
    /// `ALTN/` — description of a non-ICAO alternate aerodrome.
    pub altn: Option<String>,
    /// `COM/` — communication equipment remarks.
    pub com: Option<String>,
    /// `DAT/` — data applications remarks.
    pub dat: Option<String>,
    /// `DEP/` — description of a non-ICAO departure aerodrome.
    pub dep: Option<String>,
    /// `DEST/` — description of a non-ICAO destination aerodrome.
    pub dest: Option<String>,
    /// `DOF/` — date of flight, YYMMDD.
    pub dof: Option<String>,
    /// `NAV/` — navigation equipment remarks.
    pub nav: Option<String>,
    /// `OPR/` — operator name.
    pub opr: Option<String>,
    /// `PBN/` — performance-based navigation capabilities.
    pub pbn: Option<String>,
    /// `PER/` — aircraft performance category.
    pub per: Option<String>,
    /// `RMK/` — plain-language remarks.
    pub rmk: Option<String>,
}

impl OtherInfo {
    /// The `(code, value)` pairs present in this block, in fixed sorted
    /// code order. Blank values are skipped.
    pub fn tokens(&self) -> Vec<(&'static str, &str)> {
        let fields: [(&'static str, &Option<String>); 11] = [
            ("ALTN", &self.altn),
            ("COM", &self.com),
            ("DAT", &self.dat),
            ("DEP", &self.dep),
            ("DEST", &self.dest),
            ("DOF", &self.dof),
            ("NAV", &self.nav),
            ("OPR", &self.opr),
            ("PBN", &self.pbn),
            ("PER", &self.per),
            ("RMK", &self.rmk),
        ];
        fields
            .into_iter()
            .filter_map(|(code, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| (code, v))
            })
            .collect()
    }

    /// `true` when no annotation carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }

    /// Trim and uppercase every annotation value, dropping blanks.
    pub(crate) fn normalized(self) -> Self {
        Self {
            altn: canon_opt(self.altn),
            com: canon_opt(self.com),
            dat: canon_opt(self.dat),
            dep: canon_opt(self.dep),
            dest: canon_opt(self.dest),
            dof: canon_opt(self.dof),
            nav: canon_opt(self.nav),
            opr: canon_opt(self.opr),
            pbn: canon_opt(self.pbn),
            per: canon_opt(self.per),
            rmk: canon_opt(self.rmk),
        }
    }
}

// ---------------------------------------------------------------------------
// Dinghies
// ---------------------------------------------------------------------------

/// Item 19 `D/` — life rafts carried aboard.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Dinghies {
    /// Number of dinghies carried.
    pub number: Option<u32>,
    /// Total capacity in persons.
    pub capacity: Option<u32>,
    /// Whether the dinghies are covered.
    pub covered: bool,
    /// Dinghy colour.
    pub colour: Option<String>,
}

impl Dinghies {
    /// `true` when a positive number of dinghies is declared.
    pub fn is_carried(&self) -> bool {
        self.number.is_some_and(|n| n > 0)
    }
}

// ---------------------------------------------------------------------------
// SupplementaryInfo
// ---------------------------------------------------------------------------

/// Item 19 supplementary information.
///
/// The `*_none` flags are explicit declarations that no equipment of the
/// category is carried; the consistency rules forbid combining them with
/// the specific flags of the same category.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SupplementaryInfo {
    /// `E/` — fuel endurance, HHMM.
    pub endurance: Option<String>,
    /// `P/` — persons on board, 0–999.
    pub persons_on_board: Option<u32>,
    /// `R/U` — UHF 243.0 MHz emergency radio.
    pub radio_uhf: bool,
    /// `R/V` — VHF 121.5 MHz emergency radio.
    pub radio_vhf: bool,
    /// `R/E` — emergency locator transmitter.
    pub radio_elt: bool,
    /// No survival equipment carried.
    pub survival_none: bool,
    /// `S/P` — polar survival equipment.
    pub survival_polar: bool,
    /// `S/D` — desert survival equipment.
    pub survival_desert: bool,
    /// `S/M` — maritime survival equipment.
    pub survival_maritime: bool,
    /// `S/J` — jungle survival equipment.
    pub survival_jungle: bool,
    /// No life jackets carried.
    pub jackets_none: bool,
    /// `J/L` — jackets with lights.
    pub jacket_light: bool,
    /// `J/F` — jackets with fluorescein.
    pub jacket_fluorescein: bool,
    /// `J/U` — jackets with UHF radio.
    pub jacket_uhf: bool,
    /// `J/V` — jackets with VHF radio.
    pub jacket_vhf: bool,
    /// `D/` — dinghies carried.
    pub dinghies: Dinghies,
    /// `A/` — aircraft colour and markings.
    pub aircraft_colour: Option<String>,
    /// `C/` — pilot in command.
    pub pilot_in_command: Option<String>,
    /// First licence number, carried with the `C/` token.
    pub licence_1: Option<String>,
    /// Second licence number, carried with the `C/` token.
    pub licence_2: Option<String>,
    /// Contact telephone, carried with the `C/` token.
    pub telephone: Option<String>,
}

impl SupplementaryInfo {
    /// The `(code, value)` pairs present in this block, in fixed sorted
    /// code order (`A`, `C`, `D`, `E`, `J`, `P`, `R`, `S`). Blank or
    /// all-absent categories are skipped.
    pub fn tokens(&self) -> Vec<(&'static str, String)> {
        let mut tokens = Vec::new();
        if let Some(colour) = non_blank(self.aircraft_colour.as_deref()) {
            tokens.push(("A", colour.to_string()));
        }
        if let Some(pilot) = self.pilot_token() {
            tokens.push(("C", pilot));
        }
        if let Some(dinghies) = self.dinghies_token() {
            tokens.push(("D", dinghies));
        }
        if let Some(endurance) = non_blank(self.endurance.as_deref()) {
            tokens.push(("E", endurance.to_string()));
        }
        if let Some(jackets) = flags_token(&[
            (self.jacket_light, 'L'),
            (self.jacket_fluorescein, 'F'),
            (self.jacket_uhf, 'U'),
            (self.jacket_vhf, 'V'),
        ]) {
            tokens.push(("J", jackets));
        }
        if let Some(persons) = self.persons_on_board {
            tokens.push(("P", format!("{persons:03}")));
        }
        if let Some(radio) = flags_token(&[
            (self.radio_uhf, 'U'),
            (self.radio_vhf, 'V'),
            (self.radio_elt, 'E'),
        ]) {
            tokens.push(("R", radio));
        }
        if let Some(survival) = flags_token(&[
            (self.survival_polar, 'P'),
            (self.survival_desert, 'D'),
            (self.survival_maritime, 'M'),
            (self.survival_jungle, 'J'),
        ]) {
            tokens.push(("S", survival));
        }
        tokens
    }

    /// `true` when no supplementary category carries a value.
    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }

    /// `C/` value: pilot name, licence numbers, then telephone.
    fn pilot_token(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.pilot_in_command.as_deref(),
            self.licence_1.as_deref(),
            self.licence_2.as_deref(),
            self.telephone.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// `D/` value: `<number> <capacity> [C] <colour>`, covered → `C`.
    fn dinghies_token(&self) -> Option<String> {
        if !self.dinghies.is_carried() {
            return None;
        }
        let mut parts = Vec::new();
        if let Some(number) = self.dinghies.number {
            parts.push(number.to_string());
        }
        if let Some(capacity) = self.dinghies.capacity {
            parts.push(capacity.to_string());
        }
        if self.dinghies.covered {
            parts.push("C".to_string());
        }
        if let Some(colour) = non_blank(self.dinghies.colour.as_deref()) {
            parts.push(colour.to_string());
        }
        Some(parts.join(" "))
    }

    /// Trim and uppercase the free-text values, dropping blanks.
    pub(crate) fn normalized(mut self) -> Self {
        self.endurance = canon_opt(self.endurance.take());
        self.aircraft_colour = canon_opt(self.aircraft_colour.take());
        self.pilot_in_command = canon_opt(self.pilot_in_command.take());
        self.licence_1 = canon_opt(self.licence_1.take());
        self.licence_2 = canon_opt(self.licence_2.take());
        self.telephone = canon_opt(self.telephone.take());
        self.dinghies.colour = canon_opt(self.dinghies.colour.take());
        self
    }
}

/// A set-flag token like `R/UVE`: the letters of the raised flags, or
/// `None` when no flag is raised.
fn flags_token(flags: &[(bool, char)]) -> Option<String> {
    let letters: String = flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, letter)| letter)
        .collect();
    if letters.is_empty() {
        None
    } else {
        Some(letters)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
