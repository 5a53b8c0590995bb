//! Generic entity models shared by all brand connectors

mod charging;
mod climatization;
mod vehicle;

pub use charging::*;
pub use climatization::*;
pub use vehicle::*;
