//! Seat/Cupra vehicle
//!
//! One concrete vehicle type covers electric, combustion and hybrid cars.
//! The [`Powertrain`] decides which parts exist: vehicles that can charge
//! own a [`SeatCupraCharging`], vehicles with a tank own a fuel level.

use carconn_model::{
    join_path, Attribute, AttributeEntry, CommandKind, LevelAttribute, Powertrain, Snapshot,
    Vehicle,
};

use crate::backfill::Backfill;
use crate::capability::Capabilities;
use crate::charging::SeatCupraCharging;
use crate::climatization::SeatCupraClimatization;
use crate::commands::ensure_command;
use crate::diagnostics::Diagnostics;
use crate::error::{SeatCupraError, SeatCupraResult};
use crate::payload::VehiclePayload;

fn fuel_level_attribute() -> LevelAttribute {
    LevelAttribute::new("fuel_level").with_bounds(0.0, 100.0)
}

/// A Seat/Cupra vehicle snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SeatCupraVehicle {
    pub base: Vehicle,
    pub climatization: SeatCupraClimatization,
    /// Present iff the powertrain can charge
    pub charging: Option<SeatCupraCharging>,
    /// Fuel level in percent, present iff the powertrain has a tank
    pub fuel_level: Option<LevelAttribute>,
    pub capabilities: Capabilities,
    /// Whether the vehicle is activated in the owner's account
    pub is_active: Attribute<bool>,
}

impl SeatCupraVehicle {
    /// First observation of a vehicle
    pub fn new(vin: impl Into<String>, powertrain: Powertrain) -> Self {
        let vehicle = Self {
            base: Vehicle::new(vin, powertrain),
            climatization: SeatCupraClimatization::new(),
            charging: powertrain.has_charging().then(SeatCupraCharging::new),
            fuel_level: powertrain.has_combustion().then(fuel_level_attribute),
            capabilities: Capabilities::new(),
            is_active: Attribute::custom("is_active"),
        };
        tracing::debug!(vin = vehicle.vin(), ?powertrain, "Created vehicle");
        vehicle.finish()
    }

    /// New snapshot seeded from the previous one
    pub fn from_origin(origin: &SeatCupraVehicle) -> Self {
        Self::upgrade(origin, origin.powertrain())
    }

    /// New snapshot seeded from `origin`, switching to `powertrain`
    ///
    /// Parts the new powertrain has are seeded from the origin when the
    /// origin had them and built fresh otherwise.
    pub fn upgrade(origin: &SeatCupraVehicle, powertrain: Powertrain) -> Self {
        if powertrain != origin.powertrain() {
            tracing::info!(
                vin = origin.vin(),
                from = ?origin.powertrain(),
                to = ?powertrain,
                "Vehicle powertrain changed"
            );
        }

        let charging = powertrain.has_charging().then(|| match &origin.charging {
            Some(previous) => SeatCupraCharging::from_origin(previous),
            None => SeatCupraCharging::new(),
        });
        let fuel_level = powertrain.has_combustion().then(|| {
            origin
                .fuel_level
                .clone()
                .unwrap_or_else(fuel_level_attribute)
        });

        let vehicle = Self {
            base: origin.base.with_powertrain(powertrain),
            climatization: SeatCupraClimatization::from_origin(&origin.climatization),
            charging,
            fuel_level,
            capabilities: origin.capabilities.clone(),
            is_active: origin.is_active.clone(),
        };
        vehicle.finish()
    }

    /// Build the next snapshot from a vendor payload
    ///
    /// Without a previous snapshot the vehicle is created fresh, with the
    /// powertrain the payload reveals (combustion when it reveals none).
    /// Afterwards only a stated `powertrain` can remove a part; sections a
    /// poll happens to carry can only add one.
    pub fn refresh(
        previous: Option<&SeatCupraVehicle>,
        payload: &VehiclePayload,
        diagnostics: &dyn Diagnostics,
    ) -> SeatCupraResult<Self> {
        if payload.vin.is_empty() {
            return Err(SeatCupraError::MissingVin);
        }

        let mut vehicle = match previous {
            Some(previous) => {
                if previous.vin() != payload.vin {
                    return Err(SeatCupraError::VinMismatch {
                        expected: previous.vin().to_string(),
                        actual: payload.vin.clone(),
                    });
                }
                let powertrain = match (payload.powertrain, payload.inferred_powertrain()) {
                    (Some(stated), _) => stated,
                    (None, Some(observed)) => previous.powertrain().union(observed),
                    (None, None) => previous.powertrain(),
                };
                Self::upgrade(previous, powertrain)
            }
            None => {
                let powertrain = payload
                    .inferred_powertrain()
                    .unwrap_or(Powertrain::Combustion);
                Self::new(payload.vin.clone(), powertrain)
            }
        };

        vehicle.apply(payload, diagnostics);
        Ok(vehicle)
    }

    pub fn vin(&self) -> &str {
        self.base.vin_str()
    }

    pub fn powertrain(&self) -> Powertrain {
        self.base.powertrain()
    }

    pub fn has_charging(&self) -> bool {
        self.charging.is_some()
    }

    pub fn has_combustion(&self) -> bool {
        self.fuel_level.is_some()
    }

    /// Attributes added by this connector, for publishers that only want those
    pub fn custom_attributes(&self) -> Vec<AttributeEntry> {
        self.snapshot()
            .into_iter()
            .filter(AttributeEntry::is_custom)
            .collect()
    }

    fn finish(mut self) -> Self {
        self.backfill();
        self.ensure_base_commands();
        self
    }

    fn ensure_base_commands(&mut self) {
        ensure_command(
            &mut self.climatization.base.commands,
            CommandKind::ClimatizationStartStop,
        );
        if let Some(charging) = self.charging.as_mut() {
            ensure_command(&mut charging.base.commands, CommandKind::ChargingStartStop);
        }
    }
}

impl Snapshot for SeatCupraVehicle {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        self.base.collect(prefix, out);
        out.push(self.is_active.entry(prefix));
        if let Some(fuel_level) = &self.fuel_level {
            out.push(fuel_level.entry(prefix));
        }
        self.capabilities.collect(prefix, out);
        self.climatization.collect(&join_path(prefix, "climatization"), out);
        if let Some(charging) = &self.charging {
            charging.collect(&join_path(prefix, "charging"), out);
        }
    }
}
