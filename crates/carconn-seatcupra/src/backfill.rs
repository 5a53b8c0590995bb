//! Unknown-state backfill
//!
//! Once an entity is built, every state attribute that is still unset gets
//! its `UNKNOWN` member so publishers never see an empty value. The only
//! shape variance tolerated is the charging connector, which vehicles may
//! not report; when it is absent that part is skipped.

use crate::charging::SeatCupraCharging;
use crate::climatization::SeatCupraClimatization;
use crate::vehicle::SeatCupraVehicle;

/// Entities whose state attributes can be backfilled
pub trait Backfill {
    /// Set `UNKNOWN` on every unset state attribute
    ///
    /// Returns the number of attributes written.
    fn backfill(&mut self) -> usize;
}

impl Backfill for SeatCupraCharging {
    fn backfill(&mut self) -> usize {
        let mut filled = [
            self.base.state.backfill_unknown(),
            self.mode.backfill_unknown(),
            self.preferred_mode.backfill_unknown(),
        ]
        .into_iter()
        .filter(|written| *written)
        .count();

        match self.base.connector.as_mut() {
            Some(connector) => {
                filled += [
                    connector.connection_state.backfill_unknown(),
                    connector.external_power.backfill_unknown(),
                    connector.lock_state.backfill_unknown(),
                ]
                .into_iter()
                .filter(|written| *written)
                .count();
            }
            None => tracing::debug!("No charging connector, skipping connector backfill"),
        }

        filled
    }
}

impl Backfill for SeatCupraClimatization {
    fn backfill(&mut self) -> usize {
        usize::from(self.base.state.backfill_unknown())
    }
}

impl Backfill for SeatCupraVehicle {
    fn backfill(&mut self) -> usize {
        let mut filled = usize::from(self.base.state.backfill_unknown());
        filled += self.climatization.backfill();
        if let Some(charging) = self.charging.as_mut() {
            filled += charging.backfill();
        }
        if filled > 0 {
            tracing::debug!(vin = self.base.vin_str(), filled, "Backfilled unknown states");
        }
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carconn_model::{ChargingState, ConnectionState, ExternalPower, LockState};

    #[test]
    fn test_backfill_is_idempotent() {
        let mut charging = SeatCupraCharging::new();
        assert_eq!(charging.backfill(), 0);
    }

    #[test]
    fn test_backfill_reaches_connector() {
        let mut charging = SeatCupraCharging::new();
        charging.base.state.clear();
        let connector = charging.base.connector.as_mut().unwrap();
        connector.connection_state.clear();
        connector.external_power.clear();
        connector.lock_state.set_value(LockState::Locked);

        assert_eq!(charging.backfill(), 3);
        assert_eq!(charging.base.state.value(), Some(&ChargingState::Unknown));
        let connector = charging.base.connector.as_ref().unwrap();
        assert_eq!(
            connector.connection_state.value(),
            Some(&ConnectionState::Unknown)
        );
        assert_eq!(
            connector.external_power.value(),
            Some(&ExternalPower::Unknown)
        );
        assert_eq!(connector.lock_state.value(), Some(&LockState::Locked));
    }

    #[test]
    fn test_backfill_without_connector() {
        let mut charging = SeatCupraCharging::new();
        charging.base.connector = None;
        charging.mode.clear();
        assert_eq!(charging.backfill(), 1);
        assert!(charging.base.connector.is_none());
    }
}
