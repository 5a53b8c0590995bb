//! Seat/Cupra climatization

use carconn_model::{
    Attribute, AttributeEntry, Climatization, ClimatizationSettings, ClimatizationState,
    Snapshot, UnknownState,
};

use crate::backfill::Backfill;
use crate::diagnostics::{parse_vendor, Diagnostics};

/// Climatization settings a new snapshot can be seeded from
pub trait ClimatizationSettingsOrigin {
    fn generic(&self) -> &ClimatizationSettings;

    fn climatization_at_unlock(&self) -> Option<&Attribute<bool>> {
        None
    }

    fn window_heating_enabled(&self) -> Option<&Attribute<bool>> {
        None
    }

    fn unit_in_car(&self) -> Option<&Attribute<String>> {
        None
    }
}

impl ClimatizationSettingsOrigin for ClimatizationSettings {
    fn generic(&self) -> &ClimatizationSettings {
        self
    }
}

impl ClimatizationSettingsOrigin for SeatCupraClimatizationSettings {
    fn generic(&self) -> &ClimatizationSettings {
        &self.base
    }

    fn climatization_at_unlock(&self) -> Option<&Attribute<bool>> {
        Some(&self.climatization_at_unlock)
    }

    fn window_heating_enabled(&self) -> Option<&Attribute<bool>> {
        Some(&self.window_heating_enabled)
    }

    fn unit_in_car(&self) -> Option<&Attribute<String>> {
        Some(&self.unit_in_car)
    }
}

/// Climatization entity a new snapshot can be seeded from
pub trait ClimatizationOrigin {
    type Settings: ClimatizationSettingsOrigin;

    fn climatization(&self) -> &Climatization<Self::Settings>;
}

impl ClimatizationOrigin for Climatization {
    type Settings = ClimatizationSettings;

    fn climatization(&self) -> &Climatization {
        self
    }
}

impl ClimatizationOrigin for SeatCupraClimatization {
    type Settings = SeatCupraClimatizationSettings;

    fn climatization(&self) -> &Climatization<SeatCupraClimatizationSettings> {
        &self.base
    }
}

/// Generic climatization settings plus the Seat/Cupra extras
#[derive(Debug, Clone, PartialEq)]
pub struct SeatCupraClimatizationSettings {
    pub base: ClimatizationSettings,
    /// Start climatization when the car is unlocked
    pub climatization_at_unlock: Attribute<bool>,
    pub window_heating_enabled: Attribute<bool>,
    /// Temperature unit shown in the car (e.g. "celsius")
    pub unit_in_car: Attribute<String>,
}

impl SeatCupraClimatizationSettings {
    pub fn new() -> Self {
        Self::from_origin(&ClimatizationSettings::new())
    }

    pub fn from_origin<O: ClimatizationSettingsOrigin + ?Sized>(origin: &O) -> Self {
        let mut settings = Self {
            base: origin.generic().clone(),
            climatization_at_unlock: Attribute::custom("climatization_at_unlock"),
            window_heating_enabled: Attribute::custom("window_heating_enabled"),
            unit_in_car: Attribute::custom("unit_in_car"),
        };

        if let Some(at_unlock) = origin.climatization_at_unlock() {
            settings.climatization_at_unlock.seed_from(at_unlock);
        }
        if let Some(window_heating) = origin.window_heating_enabled() {
            settings.window_heating_enabled.seed_from(window_heating);
        }
        if let Some(unit) = origin.unit_in_car() {
            settings.unit_in_car.seed_from(unit);
        }

        settings
    }
}

impl Default for SeatCupraClimatizationSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot for SeatCupraClimatizationSettings {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        self.base.collect(prefix, out);
        out.push(self.climatization_at_unlock.entry(prefix));
        out.push(self.window_heating_enabled.entry(prefix));
        out.push(self.unit_in_car.entry(prefix));
    }
}

/// Climatization entity of a Seat/Cupra vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct SeatCupraClimatization {
    pub base: Climatization<SeatCupraClimatizationSettings>,
}

impl SeatCupraClimatization {
    pub fn new() -> Self {
        Self::from_origin(&Climatization::new())
    }

    /// Build a new snapshot seeded from `origin`
    pub fn from_origin<O: ClimatizationOrigin + ?Sized>(origin: &O) -> Self {
        let previous = origin.climatization();
        let settings = SeatCupraClimatizationSettings::from_origin(&previous.settings);

        let mut climatization = Self {
            base: previous.with_settings(settings),
        };
        climatization.backfill();
        climatization
    }

    /// Record a raw vendor climatization state
    pub fn observe_state(&mut self, raw: &str, diagnostics: &dyn Diagnostics) {
        let state = parse_vendor(raw, diagnostics).unwrap_or(ClimatizationState::UNKNOWN);
        self.base.state.set_value(state);
    }
}

impl Default for SeatCupraClimatization {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot for SeatCupraClimatization {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        self.base.collect(prefix, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;

    #[test]
    fn test_fresh_climatization() {
        let climatization = SeatCupraClimatization::new();
        assert_eq!(
            climatization.base.state.value(),
            Some(&ClimatizationState::Unknown)
        );
        let settings = &climatization.base.settings;
        assert!(!settings.climatization_at_unlock.is_set());
        assert!(!settings.window_heating_enabled.is_set());
        assert!(!settings.unit_in_car.is_set());
        assert!(settings.unit_in_car.is_custom());
    }

    #[test]
    fn test_settings_copied_from_brand_origin() {
        let mut previous = SeatCupraClimatization::new();
        let settings = &mut previous.base.settings;
        settings.climatization_at_unlock.set_value(true);
        settings.unit_in_car.set_value("celsius".to_string());
        settings.base.target_temperature.set_value(21.5);

        let upgraded = SeatCupraClimatization::from_origin(&previous);
        let settings = &upgraded.base.settings;
        assert_eq!(settings.climatization_at_unlock.value(), Some(&true));
        assert_eq!(
            settings.unit_in_car.value().map(String::as_str),
            Some("celsius")
        );
        assert!(!settings.window_heating_enabled.is_set());
        assert_eq!(settings.base.target_temperature.value(), Some(&21.5));
    }

    #[test]
    fn test_generic_origin_keeps_observed_state() {
        let mut generic = Climatization::new();
        generic.state.set_value(ClimatizationState::Cooling);
        generic.settings.window_heating.set_value(true);

        let upgraded = SeatCupraClimatization::from_origin(&generic);
        assert_eq!(
            upgraded.base.state.value(),
            Some(&ClimatizationState::Cooling)
        );
        assert_eq!(
            upgraded.base.settings.base.window_heating.value(),
            Some(&true)
        );
        assert!(!upgraded.base.settings.window_heating_enabled.is_set());
    }

    #[test]
    fn test_observe_unknown_state() {
        let diagnostics = RecordingDiagnostics::new();
        let mut climatization = SeatCupraClimatization::new();
        climatization.observe_state("heating", &diagnostics);
        assert_eq!(
            climatization.base.state.value(),
            Some(&ClimatizationState::Heating)
        );

        climatization.observe_state("defrosting", &diagnostics);
        assert_eq!(
            climatization.base.state.value(),
            Some(&ClimatizationState::Unknown)
        );
        assert_eq!(diagnostics.entries().len(), 1);
    }
}
