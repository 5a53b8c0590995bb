//! Diagnostics for vendor values that cannot be used
//!
//! Parsing vendor strings never fails hard. Instead the problem is reported
//! to a [`Diagnostics`] sink supplied by the caller and the value resolves
//! to nothing. [`TracingDiagnostics`] forwards to `tracing`;
//! [`RecordingDiagnostics`] keeps the reports for later inspection.

use carconn_model::{ModelError, StateEnum};
use parking_lot::Mutex;

/// Receiver of non-fatal problems found while reading vendor data
pub trait Diagnostics {
    /// A raw vendor string matched no member of the enumeration `kind`
    fn unparsed_value(&self, kind: &'static str, raw: &str);

    /// An observed value was rejected by an attribute constraint
    fn rejected_value(&self, attribute: &'static str, error: &ModelError);
}

/// Sink logging every report at `warn` level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn unparsed_value(&self, kind: &'static str, raw: &str) {
        tracing::warn!(kind, raw, "Unknown vendor value, treating as unknown");
    }

    fn rejected_value(&self, attribute: &'static str, error: &ModelError) {
        tracing::warn!(attribute, %error, "Rejected vendor value");
    }
}

/// A single recorded report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnparsedValue { kind: &'static str, raw: String },
    RejectedValue { attribute: &'static str, reason: String },
}

/// Sink that stores reports in memory
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn unparsed_value(&self, kind: &'static str, raw: &str) {
        tracing::debug!(kind, raw, "Recording unparsed vendor value");
        self.entries.lock().push(Diagnostic::UnparsedValue {
            kind,
            raw: raw.to_string(),
        });
    }

    fn rejected_value(&self, attribute: &'static str, error: &ModelError) {
        tracing::debug!(attribute, %error, "Recording rejected vendor value");
        self.entries.lock().push(Diagnostic::RejectedValue {
            attribute,
            reason: error.to_string(),
        });
    }
}

/// Parse a raw vendor string, reporting failures to `diagnostics`
///
/// Returns `None` when the string names no member of `T`.
pub fn parse_vendor<T: StateEnum>(raw: &str, diagnostics: &dyn Diagnostics) -> Option<T> {
    match T::parse(raw) {
        Ok(value) => Some(value),
        Err(_) => {
            diagnostics.unparsed_value(T::KIND, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carconn_model::LockState;

    #[test]
    fn test_parse_known_value() {
        let diagnostics = RecordingDiagnostics::new();
        assert_eq!(
            parse_vendor::<LockState>("locked", &diagnostics),
            Some(LockState::Locked)
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parse_unknown_value_is_recorded() {
        let diagnostics = RecordingDiagnostics::new();
        assert_eq!(parse_vendor::<LockState>("jammed", &diagnostics), None);
        assert_eq!(
            diagnostics.entries(),
            vec![Diagnostic::UnparsedValue {
                kind: "lock state",
                raw: "jammed".to_string()
            }]
        );
    }

    #[test]
    fn test_rejected_value_is_recorded() {
        let error = ModelError::OutOfRange {
            name: "target_level",
            value: 120.0,
            min: 0.0,
            max: 100.0,
        };
        let diagnostics = RecordingDiagnostics::new();
        diagnostics.rejected_value("target_level", &error);
        TracingDiagnostics.rejected_value("target_level", &error);

        assert_eq!(
            diagnostics.entries(),
            vec![Diagnostic::RejectedValue {
                attribute: "target_level",
                reason: error.to_string(),
            }]
        );
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        assert_eq!(parse_vendor::<LockState>("", &TracingDiagnostics), None);
    }
}
