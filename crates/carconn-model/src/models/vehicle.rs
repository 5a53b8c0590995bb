//! Generic vehicle models

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, StateEnum, UnknownState};
use crate::snapshot::{join_path, AttributeEntry, Snapshot};

/// Drive technology of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Powertrain {
    /// Battery electric
    Electric,
    /// Combustion engine only
    Combustion,
    /// Plug-in hybrid
    Hybrid,
}

impl Powertrain {
    /// Vehicle has a traction battery that can be charged
    pub fn has_charging(&self) -> bool {
        matches!(self, Powertrain::Electric | Powertrain::Hybrid)
    }

    /// Vehicle has a fuel tank
    pub fn has_combustion(&self) -> bool {
        matches!(self, Powertrain::Combustion | Powertrain::Hybrid)
    }

    /// Powertrain that has every part of `self` and of `other`
    pub fn union(self, other: Powertrain) -> Powertrain {
        let charging = self.has_charging() || other.has_charging();
        let combustion = self.has_combustion() || other.has_combustion();
        match (charging, combustion) {
            (true, true) => Powertrain::Hybrid,
            (true, false) => Powertrain::Electric,
            (false, _) => Powertrain::Combustion,
        }
    }
}

impl StateEnum for Powertrain {
    const KIND: &'static str = "powertrain";
    const ALL: &'static [Self] = &[
        Powertrain::Electric,
        Powertrain::Combustion,
        Powertrain::Hybrid,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Powertrain::Electric => "electric",
            Powertrain::Combustion => "combustion",
            Powertrain::Hybrid => "hybrid",
        }
    }
}

/// Coarse operating state of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleState {
    #[serde(rename = "parked")]
    Parked,
    #[serde(rename = "ignition_on")]
    IgnitionOn,
    #[serde(rename = "driving")]
    Driving,
    #[serde(rename = "offline")]
    Offline,
    #[serde(rename = "unknown vehicle state")]
    Unknown,
}

impl StateEnum for VehicleState {
    const KIND: &'static str = "vehicle state";
    const ALL: &'static [Self] = &[
        VehicleState::Parked,
        VehicleState::IgnitionOn,
        VehicleState::Driving,
        VehicleState::Offline,
        VehicleState::Unknown,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            VehicleState::Parked => "parked",
            VehicleState::IgnitionOn => "ignition_on",
            VehicleState::Driving => "driving",
            VehicleState::Offline => "offline",
            VehicleState::Unknown => "unknown vehicle state",
        }
    }
}

impl UnknownState for VehicleState {
    const UNKNOWN: Self = VehicleState::Unknown;
}

/// Attributes every vehicle has regardless of brand
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    powertrain: Powertrain,
    pub vin: Attribute<String>,
    pub name: Attribute<String>,
    pub model: Attribute<String>,
    pub manufacturer: Attribute<String>,
    /// Odometer reading in km
    pub odometer: Attribute<f64>,
    pub state: Attribute<VehicleState>,
}

impl Vehicle {
    pub fn new(vin: impl Into<String>, powertrain: Powertrain) -> Self {
        let mut vin_attribute = Attribute::new("vin");
        vin_attribute.set_value(vin.into());
        Self {
            powertrain,
            vin: vin_attribute,
            name: Attribute::new("name"),
            model: Attribute::new("model"),
            manufacturer: Attribute::new("manufacturer"),
            odometer: Attribute::new("odometer"),
            state: Attribute::new("state"),
        }
    }

    pub fn powertrain(&self) -> Powertrain {
        self.powertrain
    }

    /// Copy of this vehicle with a different powertrain
    pub fn with_powertrain(&self, powertrain: Powertrain) -> Self {
        Self {
            powertrain,
            ..self.clone()
        }
    }

    /// VIN as a plain string, empty if unset
    pub fn vin_str(&self) -> &str {
        self.vin.value().map(String::as_str).unwrap_or_default()
    }
}

impl Snapshot for Vehicle {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        out.push(self.vin.entry(prefix));
        out.push(AttributeEntry::fixed(
            join_path(prefix, "type"),
            serde_json::Value::String(self.powertrain.as_str().to_string()),
        ));
        out.push(self.name.entry(prefix));
        out.push(self.model.entry(prefix));
        out.push(self.manufacturer.entry(prefix));
        out.push(self.odometer.entry(prefix));
        out.push(self.state.entry(prefix));
    }
}
