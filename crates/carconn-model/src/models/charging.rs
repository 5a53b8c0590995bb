//! Generic charging models

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, LevelAttribute, StateEnum, UnknownState};
use crate::command::Commands;
use crate::snapshot::{join_path, AttributeEntry, Snapshot};

/// Charging state as understood by every connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargingState {
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "readyForCharging")]
    ReadyForCharging,
    #[serde(rename = "charging")]
    Charging,
    #[serde(rename = "conservation")]
    Conservation,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "unsupported")]
    Unsupported,
    #[serde(rename = "discharging")]
    Discharging,
    #[serde(rename = "unknown charging state")]
    Unknown,
}

impl StateEnum for ChargingState {
    const KIND: &'static str = "charging state";
    const ALL: &'static [Self] = &[
        ChargingState::Off,
        ChargingState::ReadyForCharging,
        ChargingState::Charging,
        ChargingState::Conservation,
        ChargingState::Error,
        ChargingState::Unsupported,
        ChargingState::Discharging,
        ChargingState::Unknown,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ChargingState::Off => "off",
            ChargingState::ReadyForCharging => "readyForCharging",
            ChargingState::Charging => "charging",
            ChargingState::Conservation => "conservation",
            ChargingState::Error => "error",
            ChargingState::Unsupported => "unsupported",
            ChargingState::Discharging => "discharging",
            ChargingState::Unknown => "unknown charging state",
        }
    }
}

impl UnknownState for ChargingState {
    const UNKNOWN: Self = ChargingState::Unknown;
}

/// Whether a charging cable is plugged in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    #[serde(rename = "connected")]
    Connected,
    #[serde(rename = "disconnected")]
    Disconnected,
    #[serde(rename = "unknown connection state")]
    Unknown,
}

impl StateEnum for ConnectionState {
    const KIND: &'static str = "connection state";
    const ALL: &'static [Self] = &[
        ConnectionState::Connected,
        ConnectionState::Disconnected,
        ConnectionState::Unknown,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Unknown => "unknown connection state",
        }
    }
}

impl UnknownState for ConnectionState {
    const UNKNOWN: Self = ConnectionState::Unknown;
}

/// Availability of power at the charging connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalPower {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "stationConnected")]
    StationConnected,
    #[serde(rename = "unavailable")]
    Unavailable,
    #[serde(rename = "unknown external power")]
    Unknown,
}

impl StateEnum for ExternalPower {
    const KIND: &'static str = "external power";
    const ALL: &'static [Self] = &[
        ExternalPower::Available,
        ExternalPower::StationConnected,
        ExternalPower::Unavailable,
        ExternalPower::Unknown,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ExternalPower::Available => "available",
            ExternalPower::StationConnected => "stationConnected",
            ExternalPower::Unavailable => "unavailable",
            ExternalPower::Unknown => "unknown external power",
        }
    }
}

impl UnknownState for ExternalPower {
    const UNKNOWN: Self = ExternalPower::Unknown;
}

/// Lock state of the charging plug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockState {
    #[serde(rename = "locked")]
    Locked,
    #[serde(rename = "unlocked")]
    Unlocked,
    #[serde(rename = "unknown lock state")]
    Unknown,
}

impl StateEnum for LockState {
    const KIND: &'static str = "lock state";
    const ALL: &'static [Self] = &[LockState::Locked, LockState::Unlocked, LockState::Unknown];

    fn as_str(&self) -> &'static str {
        match self {
            LockState::Locked => "locked",
            LockState::Unlocked => "unlocked",
            LockState::Unknown => "unknown lock state",
        }
    }
}

impl UnknownState for LockState {
    const UNKNOWN: Self = LockState::Unknown;
}

/// The vehicle side of the charging cable
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingConnector {
    pub connection_state: Attribute<ConnectionState>,
    pub external_power: Attribute<ExternalPower>,
    pub lock_state: Attribute<LockState>,
}

impl ChargingConnector {
    pub fn new() -> Self {
        Self {
            connection_state: Attribute::new("connection_state"),
            external_power: Attribute::new("external_power"),
            lock_state: Attribute::new("lock_state"),
        }
    }
}

impl Default for ChargingConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot for ChargingConnector {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        out.push(self.connection_state.entry(prefix));
        out.push(self.external_power.entry(prefix));
        out.push(self.lock_state.entry(prefix));
    }
}

/// User-configurable charging parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingSettings {
    /// Target state of charge in percent
    pub target_level: LevelAttribute,
    /// Maximum AC charging current in ampere
    pub maximum_current: Attribute<f64>,
    /// Unlock the plug once charging completes
    pub auto_unlock: Attribute<bool>,
}

impl ChargingSettings {
    pub fn new() -> Self {
        Self {
            target_level: LevelAttribute::new("target_level").with_bounds(0.0, 100.0),
            maximum_current: Attribute::new("maximum_current"),
            auto_unlock: Attribute::new("auto_unlock"),
        }
    }
}

impl Default for ChargingSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot for ChargingSettings {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        out.push(self.target_level.entry(prefix));
        out.push(self.maximum_current.entry(prefix));
        out.push(self.auto_unlock.entry(prefix));
    }
}

/// Charging entity, generic over the settings it carries
///
/// Brand connectors extend the settings by supplying their own `S` that
/// wraps [`ChargingSettings`].
#[derive(Debug, Clone, PartialEq)]
pub struct Charging<S = ChargingSettings> {
    pub state: Attribute<ChargingState>,
    /// Charging power in kW
    pub power: Attribute<f64>,
    /// Charging rate in km of range per hour
    pub rate: Attribute<f64>,
    /// Absent on vehicles that do not report plug details
    pub connector: Option<ChargingConnector>,
    pub settings: S,
    pub commands: Option<Commands>,
}

impl Charging {
    pub fn new() -> Self {
        Self::from_settings(ChargingSettings::new())
    }
}

impl Default for Charging {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Charging<S> {
    /// Fresh entity carrying the given settings
    pub fn from_settings(settings: S) -> Self {
        Self {
            state: Attribute::new("state"),
            power: Attribute::new("power"),
            rate: Attribute::new("rate"),
            connector: Some(ChargingConnector::new()),
            settings,
            commands: None,
        }
    }

    /// Copy of this entity with its settings replaced
    pub fn with_settings<T>(&self, settings: T) -> Charging<T> {
        Charging {
            state: self.state.clone(),
            power: self.power.clone(),
            rate: self.rate.clone(),
            connector: self.connector.clone(),
            settings,
            commands: self.commands.clone(),
        }
    }
}

impl<S: Snapshot> Snapshot for Charging<S> {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        out.push(self.state.entry(prefix));
        out.push(self.power.entry(prefix));
        out.push(self.rate.entry(prefix));
        if let Some(connector) = &self.connector {
            connector.collect(&join_path(prefix, "connector"), out);
        }
        self.settings.collect(&join_path(prefix, "settings"), out);
        if let Some(commands) = &self.commands {
            commands.collect(prefix, out);
        }
    }
}
