//! carconn-model - Generic vehicle data model
//!
//! This crate provides the object graph that brand connectors build on:
//! typed attribute cells, command containers and the generic vehicle,
//! charging and climatization entities. Brand crates extend the generic
//! entities by composition and publish everything through [`Snapshot`].

pub mod attribute;
pub mod command;
pub mod error;
pub mod models;
pub mod snapshot;

pub use attribute::{Attribute, LevelAttribute, StateEnum, UnknownState, CONNECTOR_CUSTOM};
pub use command::{Command, CommandKind, Commands, START_STOP};
pub use error::{ModelError, ModelResult};
pub use models::*;
pub use snapshot::{join_path, AttributeEntry, Snapshot};
