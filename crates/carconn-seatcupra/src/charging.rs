//! Seat/Cupra charging
//!
//! Adds the vendor charging states and charge modes, the mapping onto the
//! generic [`ChargingState`], and battery-care settings on top of the
//! generic [`ChargingSettings`].

use carconn_model::{
    Attribute, AttributeEntry, Charging, ChargingSettings, ChargingState, LevelAttribute, Snapshot,
    StateEnum, UnknownState,
};
use serde::{Deserialize, Serialize};

use crate::backfill::Backfill;
use crate::diagnostics::{parse_vendor, Diagnostics};

/// Charging states reported by the Seat/Cupra API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatCupraChargingState {
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "readyForCharging")]
    ReadyForCharging,
    #[serde(rename = "notReadyForCharging")]
    NotReadyForCharging,
    #[serde(rename = "conservation")]
    Conservation,
    #[serde(rename = "chargePurposeReachedAndNotConservationCharging")]
    ChargePurposeReachedNotConservationCharging,
    #[serde(rename = "chargePurposeReachedAndConservation")]
    ChargePurposeReachedConservation,
    #[serde(rename = "charging")]
    Charging,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "unsupported")]
    Unsupported,
    #[serde(rename = "discharging")]
    Discharging,
    #[serde(rename = "unknown charging state")]
    Unknown,
}

impl StateEnum for SeatCupraChargingState {
    const KIND: &'static str = "Seat/Cupra charging state";
    const ALL: &'static [Self] = &[
        SeatCupraChargingState::Off,
        SeatCupraChargingState::ReadyForCharging,
        SeatCupraChargingState::NotReadyForCharging,
        SeatCupraChargingState::Conservation,
        SeatCupraChargingState::ChargePurposeReachedNotConservationCharging,
        SeatCupraChargingState::ChargePurposeReachedConservation,
        SeatCupraChargingState::Charging,
        SeatCupraChargingState::Error,
        SeatCupraChargingState::Unsupported,
        SeatCupraChargingState::Discharging,
        SeatCupraChargingState::Unknown,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SeatCupraChargingState::Off => "off",
            SeatCupraChargingState::ReadyForCharging => "readyForCharging",
            SeatCupraChargingState::NotReadyForCharging => "notReadyForCharging",
            SeatCupraChargingState::Conservation => "conservation",
            SeatCupraChargingState::ChargePurposeReachedNotConservationCharging => {
                "chargePurposeReachedAndNotConservationCharging"
            }
            SeatCupraChargingState::ChargePurposeReachedConservation => {
                "chargePurposeReachedAndConservation"
            }
            SeatCupraChargingState::Charging => "charging",
            SeatCupraChargingState::Error => "error",
            SeatCupraChargingState::Unsupported => "unsupported",
            SeatCupraChargingState::Discharging => "discharging",
            SeatCupraChargingState::Unknown => "unknown charging state",
        }
    }
}

impl UnknownState for SeatCupraChargingState {
    const UNKNOWN: Self = SeatCupraChargingState::Unknown;
}

impl From<SeatCupraChargingState> for ChargingState {
    fn from(state: SeatCupraChargingState) -> Self {
        match state {
            SeatCupraChargingState::Off | SeatCupraChargingState::NotReadyForCharging => {
                ChargingState::Off
            }
            SeatCupraChargingState::ReadyForCharging
            | SeatCupraChargingState::ChargePurposeReachedNotConservationCharging => {
                ChargingState::ReadyForCharging
            }
            SeatCupraChargingState::Conservation
            | SeatCupraChargingState::ChargePurposeReachedConservation => {
                ChargingState::Conservation
            }
            SeatCupraChargingState::Charging => ChargingState::Charging,
            SeatCupraChargingState::Error => ChargingState::Error,
            SeatCupraChargingState::Unsupported => ChargingState::Unsupported,
            SeatCupraChargingState::Discharging => ChargingState::Discharging,
            SeatCupraChargingState::Unknown => ChargingState::Unknown,
        }
    }
}

/// Map a vendor charging state onto the generic one
pub fn map_charging_state(state: SeatCupraChargingState) -> ChargingState {
    state.into()
}

/// Resolve a raw vendor charging-state string to a generic state
///
/// Strings the vendor enumeration does not know are reported to
/// `diagnostics` and resolve to [`ChargingState::Unknown`].
pub fn resolve_charging_state(raw: &str, diagnostics: &dyn Diagnostics) -> ChargingState {
    parse_vendor::<SeatCupraChargingState>(raw, diagnostics)
        .map(map_charging_state)
        .unwrap_or(ChargingState::UNKNOWN)
}

/// Charge modes reported by the Seat/Cupra API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatCupraChargeMode {
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "invalid")]
    Invalid,
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "timer")]
    Timer,
    #[serde(rename = "onlyOwnCurrent")]
    OnlyOwnCurrent,
    #[serde(rename = "preferredChargingTimes")]
    PreferredChargingTimes,
    #[serde(rename = "timerChargingWithClimatisation")]
    TimerChargingWithClimatisation,
    #[serde(rename = "homeStorageCharging")]
    HomeStorageCharging,
    #[serde(rename = "immediateDischarging")]
    ImmediateDischarging,
    #[serde(rename = "unknown charge mode")]
    Unknown,
}

impl StateEnum for SeatCupraChargeMode {
    const KIND: &'static str = "Seat/Cupra charge mode";
    const ALL: &'static [Self] = &[
        SeatCupraChargeMode::Manual,
        SeatCupraChargeMode::Invalid,
        SeatCupraChargeMode::Off,
        SeatCupraChargeMode::Timer,
        SeatCupraChargeMode::OnlyOwnCurrent,
        SeatCupraChargeMode::PreferredChargingTimes,
        SeatCupraChargeMode::TimerChargingWithClimatisation,
        SeatCupraChargeMode::HomeStorageCharging,
        SeatCupraChargeMode::ImmediateDischarging,
        SeatCupraChargeMode::Unknown,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SeatCupraChargeMode::Manual => "manual",
            SeatCupraChargeMode::Invalid => "invalid",
            SeatCupraChargeMode::Off => "off",
            SeatCupraChargeMode::Timer => "timer",
            SeatCupraChargeMode::OnlyOwnCurrent => "onlyOwnCurrent",
            SeatCupraChargeMode::PreferredChargingTimes => "preferredChargingTimes",
            SeatCupraChargeMode::TimerChargingWithClimatisation => {
                "timerChargingWithClimatisation"
            }
            SeatCupraChargeMode::HomeStorageCharging => "homeStorageCharging",
            SeatCupraChargeMode::ImmediateDischarging => "immediateDischarging",
            SeatCupraChargeMode::Unknown => "unknown charge mode",
        }
    }
}

impl UnknownState for SeatCupraChargeMode {
    const UNKNOWN: Self = SeatCupraChargeMode::Unknown;
}

// =============================================================================
// Origins
// =============================================================================

/// Charging settings a new snapshot can be seeded from
///
/// Generic settings carry none of the brand fields; brand settings carry
/// all of them.
pub trait ChargingSettingsOrigin {
    fn generic(&self) -> &ChargingSettings;

    fn battery_care_enabled(&self) -> Option<&Attribute<bool>> {
        None
    }

    fn battery_care_target_level(&self) -> Option<&LevelAttribute> {
        None
    }
}

impl ChargingSettingsOrigin for ChargingSettings {
    fn generic(&self) -> &ChargingSettings {
        self
    }
}

impl ChargingSettingsOrigin for SeatCupraChargingSettings {
    fn generic(&self) -> &ChargingSettings {
        &self.base
    }

    fn battery_care_enabled(&self) -> Option<&Attribute<bool>> {
        Some(&self.battery_care_enabled)
    }

    fn battery_care_target_level(&self) -> Option<&LevelAttribute> {
        Some(&self.battery_care_target_level)
    }
}

/// Charging entity a new snapshot can be seeded from
pub trait ChargingOrigin {
    type Settings: ChargingSettingsOrigin;

    fn charging(&self) -> &Charging<Self::Settings>;

    fn mode(&self) -> Option<&Attribute<SeatCupraChargeMode>> {
        None
    }

    fn preferred_mode(&self) -> Option<&Attribute<SeatCupraChargeMode>> {
        None
    }
}

impl ChargingOrigin for Charging {
    type Settings = ChargingSettings;

    fn charging(&self) -> &Charging {
        self
    }
}

impl ChargingOrigin for SeatCupraCharging {
    type Settings = SeatCupraChargingSettings;

    fn charging(&self) -> &Charging<SeatCupraChargingSettings> {
        &self.base
    }

    fn mode(&self) -> Option<&Attribute<SeatCupraChargeMode>> {
        Some(&self.mode)
    }

    fn preferred_mode(&self) -> Option<&Attribute<SeatCupraChargeMode>> {
        Some(&self.preferred_mode)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Generic charging settings plus battery care
#[derive(Debug, Clone, PartialEq)]
pub struct SeatCupraChargingSettings {
    pub base: ChargingSettings,
    pub battery_care_enabled: Attribute<bool>,
    /// Battery-care target in percent, 0..=100 in steps of 5
    pub battery_care_target_level: LevelAttribute,
}

impl SeatCupraChargingSettings {
    pub fn new() -> Self {
        Self::from_origin(&ChargingSettings::new())
    }

    /// Build settings seeded from `origin`
    ///
    /// Generic fields are copied as a whole; each brand field is copied
    /// only when the origin has it and it holds a value.
    pub fn from_origin<O: ChargingSettingsOrigin + ?Sized>(origin: &O) -> Self {
        let mut settings = Self {
            base: origin.generic().clone(),
            battery_care_enabled: Attribute::custom("battery_care_enabled"),
            battery_care_target_level: LevelAttribute::custom("battery_care_target_level")
                .with_bounds(0.0, 100.0)
                .with_precision(5.0),
        };

        if let Some(enabled) = origin.battery_care_enabled() {
            settings.battery_care_enabled.seed_from(enabled);
        }
        if let Some(level) = origin.battery_care_target_level() {
            if let Err(error) = settings.battery_care_target_level.seed_from(level) {
                tracing::warn!(%error, "Dropping battery care target level from previous snapshot");
            }
        }

        settings
    }
}

impl Default for SeatCupraChargingSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot for SeatCupraChargingSettings {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        self.base.collect(prefix, out);
        out.push(self.battery_care_enabled.entry(prefix));
        out.push(self.battery_care_target_level.entry(prefix));
    }
}

// =============================================================================
// Charging
// =============================================================================

/// Charging entity of a Seat/Cupra vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct SeatCupraCharging {
    pub base: Charging<SeatCupraChargingSettings>,
    pub mode: Attribute<SeatCupraChargeMode>,
    pub preferred_mode: Attribute<SeatCupraChargeMode>,
}

impl SeatCupraCharging {
    /// Fresh entity with nothing observed yet
    pub fn new() -> Self {
        Self::from_origin(&Charging::new())
    }

    /// Build a new snapshot seeded from `origin`
    pub fn from_origin<O: ChargingOrigin + ?Sized>(origin: &O) -> Self {
        let previous = origin.charging();
        let settings = SeatCupraChargingSettings::from_origin(&previous.settings);

        let mut charging = Self {
            base: previous.with_settings(settings),
            mode: Attribute::custom("mode"),
            preferred_mode: Attribute::custom("preferred_mode"),
        };
        if let Some(mode) = origin.mode() {
            charging.mode.seed_from(mode);
        }
        if let Some(preferred_mode) = origin.preferred_mode() {
            charging.preferred_mode.seed_from(preferred_mode);
        }

        charging.backfill();
        charging
    }

    /// Record a raw vendor charging state
    pub fn observe_state(&mut self, raw: &str, diagnostics: &dyn Diagnostics) {
        let state = resolve_charging_state(raw, diagnostics);
        self.base.state.set_value(state);
    }

    /// Record a raw vendor charge mode; unknown strings become `UNKNOWN`
    pub fn observe_mode(&mut self, raw: &str, diagnostics: &dyn Diagnostics) {
        let mode = parse_vendor(raw, diagnostics).unwrap_or(SeatCupraChargeMode::UNKNOWN);
        self.mode.set_value(mode);
    }

    /// Record a raw vendor preferred charge mode
    pub fn observe_preferred_mode(&mut self, raw: &str, diagnostics: &dyn Diagnostics) {
        let mode = parse_vendor(raw, diagnostics).unwrap_or(SeatCupraChargeMode::UNKNOWN);
        self.preferred_mode.set_value(mode);
    }
}

impl Default for SeatCupraCharging {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot for SeatCupraCharging {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        self.base.collect(prefix, out);
        out.push(self.mode.entry(prefix));
        out.push(self.preferred_mode.entry(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, RecordingDiagnostics};
    use carconn_model::ConnectionState;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_vendor_wire_names_match_serde() {
        for state in SeatCupraChargingState::ALL {
            assert_eq!(
                serde_json::to_value(state).unwrap(),
                serde_json::json!(state.as_str())
            );
        }
        for mode in SeatCupraChargeMode::ALL {
            assert_eq!(
                serde_json::to_value(mode).unwrap(),
                serde_json::json!(mode.as_str())
            );
        }
    }

    #[test]
    fn test_mapping_is_total() {
        for state in SeatCupraChargingState::ALL {
            // Exhaustive match in `From` guarantees a result; check the sentinel
            let mapped = map_charging_state(*state);
            if *state == SeatCupraChargingState::Unknown {
                assert_eq!(mapped, ChargingState::Unknown);
            } else {
                assert_ne!(mapped, ChargingState::Unknown, "{:?}", state);
            }
        }
    }

    #[rstest]
    #[case("off", ChargingState::Off)]
    #[case("notReadyForCharging", ChargingState::Off)]
    #[case("readyForCharging", ChargingState::ReadyForCharging)]
    #[case(
        "chargePurposeReachedAndNotConservationCharging",
        ChargingState::ReadyForCharging
    )]
    #[case("conservation", ChargingState::Conservation)]
    #[case("chargePurposeReachedAndConservation", ChargingState::Conservation)]
    #[case("charging", ChargingState::Charging)]
    #[case("error", ChargingState::Error)]
    #[case("unsupported", ChargingState::Unsupported)]
    #[case("discharging", ChargingState::Discharging)]
    #[case("unknown charging state", ChargingState::Unknown)]
    fn test_resolve_charging_state(#[case] raw: &str, #[case] expected: ChargingState) {
        let diagnostics = RecordingDiagnostics::new();
        assert_eq!(resolve_charging_state(raw, &diagnostics), expected);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unrecognized_state_resolves_to_unknown() {
        let diagnostics = RecordingDiagnostics::new();
        assert_eq!(
            resolve_charging_state("turboCharging", &diagnostics),
            ChargingState::Unknown
        );
        assert_eq!(
            diagnostics.entries(),
            vec![Diagnostic::UnparsedValue {
                kind: SeatCupraChargingState::KIND,
                raw: "turboCharging".to_string()
            }]
        );
    }

    #[test]
    fn test_fresh_charging_is_backfilled() {
        let charging = SeatCupraCharging::new();
        assert_eq!(charging.base.state.value(), Some(&ChargingState::Unknown));
        assert_eq!(charging.mode.value(), Some(&SeatCupraChargeMode::Unknown));
        assert_eq!(
            charging.preferred_mode.value(),
            Some(&SeatCupraChargeMode::Unknown)
        );
        let connector = charging.base.connector.as_ref().unwrap();
        assert_eq!(
            connector.connection_state.value(),
            Some(&ConnectionState::Unknown)
        );
        assert!(!charging.base.settings.battery_care_enabled.is_set());
        assert!(charging.mode.is_custom());
    }

    #[test]
    fn test_origin_upgrade_keeps_brand_values() {
        let mut previous = SeatCupraCharging::new();
        previous.mode.set_value(SeatCupraChargeMode::Timer);
        previous
            .base
            .settings
            .battery_care_target_level
            .set_value(80.0)
            .unwrap();
        previous.base.settings.battery_care_enabled.set_value(true);

        let upgraded = SeatCupraCharging::from_origin(&previous);
        assert_eq!(upgraded.mode.value(), Some(&SeatCupraChargeMode::Timer));
        assert_eq!(
            upgraded.base.settings.battery_care_target_level.value(),
            Some(80.0)
        );
        assert_eq!(
            upgraded.base.settings.battery_care_enabled.value(),
            Some(&true)
        );
    }

    #[test]
    fn test_upgrade_from_generic_charging() {
        let mut generic = Charging::new();
        generic.state.set_value(ChargingState::Charging);
        generic.settings.target_level.set_value(90.0).unwrap();
        generic.connector = None;

        let upgraded = SeatCupraCharging::from_origin(&generic);
        assert_eq!(upgraded.base.state.value(), Some(&ChargingState::Charging));
        assert_eq!(upgraded.base.settings.base.target_level.value(), Some(90.0));
        assert_eq!(upgraded.mode.value(), Some(&SeatCupraChargeMode::Unknown));
        assert!(upgraded.base.connector.is_none());
    }

    #[test]
    fn test_observe_mode_unknown_string() {
        let diagnostics = RecordingDiagnostics::new();
        let mut charging = SeatCupraCharging::new();
        charging.observe_mode("solarSurplus", &diagnostics);
        assert_eq!(charging.mode.value(), Some(&SeatCupraChargeMode::Unknown));
        assert_eq!(diagnostics.entries().len(), 1);
    }

    #[test]
    fn test_snapshot_marks_brand_fields() {
        let custom: Vec<String> = SeatCupraCharging::new()
            .snapshot()
            .into_iter()
            .filter(|entry| entry.is_custom())
            .map(|entry| entry.path)
            .collect();
        assert_eq!(
            custom,
            vec![
                "settings/battery_care_enabled",
                "settings/battery_care_target_level",
                "mode",
                "preferred_mode",
            ]
        );
    }
}
