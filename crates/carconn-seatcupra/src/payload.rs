//! Vendor payload decoding
//!
//! The subset of the Seat/Cupra API response the entities carry, and the
//! `apply` operations that write observed values onto a snapshot. Fields
//! missing from the payload leave the snapshot untouched; fields that are
//! present but unusable are reported to the [`Diagnostics`] sink.

use carconn_model::{
    ChargingConnector, ConnectionState, ExternalPower, LevelAttribute, LockState, Powertrain,
    UnknownState, VehicleState,
};
use serde::Deserialize;

use crate::backfill::Backfill;
use crate::capability::Capability;
use crate::charging::SeatCupraCharging;
use crate::climatization::SeatCupraClimatization;
use crate::diagnostics::{parse_vendor, Diagnostics};
use crate::error::SeatCupraResult;
use crate::vehicle::SeatCupraVehicle;

/// Top-level vehicle payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehiclePayload {
    pub vin: String,
    pub powertrain: Option<Powertrain>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub mileage_km: Option<f64>,
    pub state: Option<String>,
    pub is_active: Option<bool>,
    pub capabilities: Option<Vec<Capability>>,
    pub fuel_level_pct: Option<f64>,
    pub charging: Option<ChargingPayload>,
    pub climatisation: Option<ClimatizationPayload>,
}

/// Charging section of the payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChargingPayload {
    pub state: Option<String>,
    pub charge_mode: Option<String>,
    pub preferred_charge_mode: Option<String>,
    pub charge_power_kw: Option<f64>,
    pub charge_rate_kmph: Option<f64>,
    pub plug: Option<PlugPayload>,
    pub settings: Option<ChargingSettingsPayload>,
}

/// Plug status reported inside the charging section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlugPayload {
    pub connection_state: Option<String>,
    pub lock_state: Option<String>,
    pub external_power: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChargingSettingsPayload {
    pub target_soc_pct: Option<f64>,
    pub max_charge_current_ac: Option<f64>,
    pub auto_unlock_plug_when_charged: Option<bool>,
    pub battery_care_mode_enabled: Option<bool>,
    pub battery_care_target_soc_pct: Option<f64>,
}

/// Climatisation section of the payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClimatizationPayload {
    pub state: Option<String>,
    pub settings: Option<ClimatizationSettingsPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClimatizationSettingsPayload {
    pub target_temperature_celsius: Option<f64>,
    pub climatisation_at_unlock: Option<bool>,
    /// Whether window heating is switched on right now
    pub window_heating: Option<bool>,
    /// Whether window heating runs along with climatisation
    pub window_heating_enabled: Option<bool>,
    pub seat_heating_enabled: Option<bool>,
    pub unit_in_car: Option<String>,
}

impl VehiclePayload {
    /// Decode a payload from JSON
    pub fn from_json(json: &str) -> SeatCupraResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Powertrain stated by the payload, or implied by the sections it has
    pub fn inferred_powertrain(&self) -> Option<Powertrain> {
        if self.powertrain.is_some() {
            return self.powertrain;
        }
        match (self.charging.is_some(), self.fuel_level_pct.is_some()) {
            (true, true) => Some(Powertrain::Hybrid),
            (true, false) => Some(Powertrain::Electric),
            (false, true) => Some(Powertrain::Combustion),
            (false, false) => None,
        }
    }
}

/// Store a level value, reporting rejections instead of failing
fn set_level(level: &mut LevelAttribute, value: f64, diagnostics: &dyn Diagnostics) {
    if let Err(error) = level.set_value(value) {
        diagnostics.rejected_value(level.name(), &error);
    }
}

/// External power as reported by the plug; the vendor uses its own words
/// for the available states
fn resolve_external_power(raw: &str, diagnostics: &dyn Diagnostics) -> ExternalPower {
    match raw {
        "ready" | "active" => ExternalPower::Available,
        other => parse_vendor(other, diagnostics).unwrap_or(ExternalPower::UNKNOWN),
    }
}

impl SeatCupraCharging {
    /// Write the observed charging values onto this snapshot
    pub fn apply(&mut self, payload: &ChargingPayload, diagnostics: &dyn Diagnostics) {
        if let Some(state) = &payload.state {
            self.observe_state(state, diagnostics);
        }
        if let Some(mode) = &payload.charge_mode {
            self.observe_mode(mode, diagnostics);
        }
        if let Some(mode) = &payload.preferred_charge_mode {
            self.observe_preferred_mode(mode, diagnostics);
        }
        if let Some(power) = payload.charge_power_kw {
            self.base.power.set_value(power);
        }
        if let Some(rate) = payload.charge_rate_kmph {
            self.base.rate.set_value(rate);
        }

        if let Some(plug) = &payload.plug {
            let connector = self
                .base
                .connector
                .get_or_insert_with(ChargingConnector::new);
            if let Some(raw) = &plug.connection_state {
                let state = parse_vendor(raw, diagnostics).unwrap_or(ConnectionState::UNKNOWN);
                connector.connection_state.set_value(state);
            }
            if let Some(raw) = &plug.lock_state {
                let state = parse_vendor(raw, diagnostics).unwrap_or(LockState::UNKNOWN);
                connector.lock_state.set_value(state);
            }
            if let Some(raw) = &plug.external_power {
                let power = resolve_external_power(raw, diagnostics);
                connector.external_power.set_value(power);
            }
        }

        if let Some(settings) = &payload.settings {
            let target = &mut self.base.settings;
            if let Some(level) = settings.target_soc_pct {
                set_level(&mut target.base.target_level, level, diagnostics);
            }
            if let Some(current) = settings.max_charge_current_ac {
                target.base.maximum_current.set_value(current);
            }
            if let Some(auto_unlock) = settings.auto_unlock_plug_when_charged {
                target.base.auto_unlock.set_value(auto_unlock);
            }
            if let Some(enabled) = settings.battery_care_mode_enabled {
                target.battery_care_enabled.set_value(enabled);
            }
            if let Some(level) = settings.battery_care_target_soc_pct {
                set_level(&mut target.battery_care_target_level, level, diagnostics);
            }
        }

        self.backfill();
    }
}

impl SeatCupraClimatization {
    /// Write the observed climatization values onto this snapshot
    pub fn apply(&mut self, payload: &ClimatizationPayload, diagnostics: &dyn Diagnostics) {
        if let Some(state) = &payload.state {
            self.observe_state(state, diagnostics);
        }

        if let Some(settings) = &payload.settings {
            let target = &mut self.base.settings;
            if let Some(temperature) = settings.target_temperature_celsius {
                target.base.target_temperature.set_value(temperature);
            }
            if let Some(window_heating) = settings.window_heating {
                target.base.window_heating.set_value(window_heating);
            }
            if let Some(enabled) = settings.window_heating_enabled {
                target.window_heating_enabled.set_value(enabled);
            }
            if let Some(seat_heating) = settings.seat_heating_enabled {
                target.base.seat_heating.set_value(seat_heating);
            }
            if let Some(at_unlock) = settings.climatisation_at_unlock {
                target.climatization_at_unlock.set_value(at_unlock);
            }
            if let Some(unit) = &settings.unit_in_car {
                target.unit_in_car.set_value(unit.clone());
            }
        }

        self.backfill();
    }
}

impl SeatCupraVehicle {
    /// Write the observed vehicle values onto this snapshot
    ///
    /// Sections for parts the vehicle does not have are ignored.
    pub fn apply(&mut self, payload: &VehiclePayload, diagnostics: &dyn Diagnostics) {
        if let Some(name) = &payload.name {
            self.base.name.set_value(name.clone());
        }
        if let Some(model) = &payload.model {
            self.base.model.set_value(model.clone());
        }
        if let Some(brand) = &payload.brand {
            self.base.manufacturer.set_value(brand.clone());
        }
        if let Some(mileage) = payload.mileage_km {
            self.base.odometer.set_value(mileage);
        }
        if let Some(raw) = &payload.state {
            let state = parse_vendor(raw, diagnostics).unwrap_or(VehicleState::UNKNOWN);
            self.base.state.set_value(state);
        }
        if let Some(active) = payload.is_active {
            self.is_active.set_value(active);
        }
        if let Some(capabilities) = &payload.capabilities {
            self.capabilities.update(capabilities.iter().cloned());
        }

        if let Some(level) = payload.fuel_level_pct {
            match self.fuel_level.as_mut() {
                Some(fuel_level) => set_level(fuel_level, level, diagnostics),
                None => tracing::debug!(vin = self.vin(), "Ignoring fuel level, no tank"),
            }
        }

        if let Some(section) = &payload.charging {
            match self.charging.as_mut() {
                Some(charging) => charging.apply(section, diagnostics),
                None => tracing::debug!(vin = self.vin(), "Ignoring charging section"),
            }
        }
        if let Some(section) = &payload.climatisation {
            self.climatization.apply(section, diagnostics);
        }

        self.backfill();
    }
}
