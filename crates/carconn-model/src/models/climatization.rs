//! Generic climatization models

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, StateEnum, UnknownState};
use crate::command::Commands;
use crate::snapshot::{join_path, AttributeEntry, Snapshot};

/// What the climatization system is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimatizationState {
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "heating")]
    Heating,
    #[serde(rename = "cooling")]
    Cooling,
    #[serde(rename = "ventilation")]
    Ventilation,
    #[serde(rename = "unknown climatization state")]
    Unknown,
}

impl StateEnum for ClimatizationState {
    const KIND: &'static str = "climatization state";
    const ALL: &'static [Self] = &[
        ClimatizationState::Off,
        ClimatizationState::Heating,
        ClimatizationState::Cooling,
        ClimatizationState::Ventilation,
        ClimatizationState::Unknown,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ClimatizationState::Off => "off",
            ClimatizationState::Heating => "heating",
            ClimatizationState::Cooling => "cooling",
            ClimatizationState::Ventilation => "ventilation",
            ClimatizationState::Unknown => "unknown climatization state",
        }
    }
}

impl UnknownState for ClimatizationState {
    const UNKNOWN: Self = ClimatizationState::Unknown;
}

/// User-configurable climatization parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatizationSettings {
    /// Target cabin temperature in °C
    pub target_temperature: Attribute<f64>,
    pub window_heating: Attribute<bool>,
    pub seat_heating: Attribute<bool>,
}

impl ClimatizationSettings {
    pub fn new() -> Self {
        Self {
            target_temperature: Attribute::new("target_temperature"),
            window_heating: Attribute::new("window_heating"),
            seat_heating: Attribute::new("seat_heating"),
        }
    }
}

impl Default for ClimatizationSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot for ClimatizationSettings {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        out.push(self.target_temperature.entry(prefix));
        out.push(self.window_heating.entry(prefix));
        out.push(self.seat_heating.entry(prefix));
    }
}

/// Climatization entity, generic over the settings it carries
#[derive(Debug, Clone, PartialEq)]
pub struct Climatization<S = ClimatizationSettings> {
    pub state: Attribute<ClimatizationState>,
    pub settings: S,
    pub commands: Option<Commands>,
}

impl Climatization {
    pub fn new() -> Self {
        Self::from_settings(ClimatizationSettings::new())
    }
}

impl Default for Climatization {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Climatization<S> {
    /// Fresh entity carrying the given settings
    pub fn from_settings(settings: S) -> Self {
        Self {
            state: Attribute::new("state"),
            settings,
            commands: None,
        }
    }

    /// Copy of this entity with its settings replaced
    pub fn with_settings<T>(&self, settings: T) -> Climatization<T> {
        Climatization {
            state: self.state.clone(),
            settings,
            commands: self.commands.clone(),
        }
    }
}

impl<S: Snapshot> Snapshot for Climatization<S> {
    fn collect(&self, prefix: &str, out: &mut Vec<AttributeEntry>) {
        out.push(self.state.entry(prefix));
        self.settings.collect(&join_path(prefix, "settings"), out);
        if let Some(commands) = &self.commands {
            commands.collect(prefix, out);
        }
    }
}
