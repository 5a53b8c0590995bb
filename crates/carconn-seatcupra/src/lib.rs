//! carconn-seatcupra - Seat/Cupra extension of the carconn vehicle model
//!
//! Builds brand-specific vehicle snapshots on top of `carconn-model`:
//!
//! - vendor charging states and charge modes, mapped onto the generic states
//! - battery-care and climatization extras on the generic settings
//! - fresh and origin-upgrade construction, followed by unknown-state
//!   backfill and default command registration
//! - decoding of vendor payloads with non-fatal diagnostics
//!
//! # Refresh cycle
//!
//! ```rust
//! use carconn_seatcupra::{SeatCupraVehicle, TracingDiagnostics, VehiclePayload};
//! use carconn_model::ChargingState;
//!
//! let payload = VehiclePayload::from_json(
//!     r#"{"vin": "VSSZZZKJZNR000001", "charging": {"state": "charging"}}"#,
//! )
//! .unwrap();
//!
//! let first = SeatCupraVehicle::refresh(None, &payload, &TracingDiagnostics).unwrap();
//! let next = SeatCupraVehicle::refresh(Some(&first), &payload, &TracingDiagnostics).unwrap();
//!
//! let charging = next.charging.as_ref().unwrap();
//! assert_eq!(charging.base.state.value(), Some(&ChargingState::Charging));
//! ```

pub mod backfill;
pub mod capability;
pub mod charging;
pub mod climatization;
pub mod commands;
pub mod diagnostics;
pub mod error;
pub mod payload;
pub mod vehicle;

pub use backfill::Backfill;
pub use capability::{Capabilities, Capability};
pub use charging::{
    map_charging_state, resolve_charging_state, ChargingOrigin, ChargingSettingsOrigin,
    SeatCupraChargeMode, SeatCupraCharging, SeatCupraChargingSettings, SeatCupraChargingState,
};
pub use climatization::{
    ClimatizationOrigin, ClimatizationSettingsOrigin, SeatCupraClimatization,
    SeatCupraClimatizationSettings,
};
pub use commands::ensure_command;
pub use diagnostics::{parse_vendor, Diagnostic, Diagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use error::{SeatCupraError, SeatCupraResult};
pub use payload::{
    ChargingPayload, ChargingSettingsPayload, ClimatizationPayload, ClimatizationSettingsPayload,
    PlugPayload, VehiclePayload,
};
pub use vehicle::SeatCupraVehicle;
