//! Attribute cells
//!
//! Every observable value of the entity graph lives in an [`Attribute`]:
//! a named cell that stays unset until the first observation, carries a set
//! of descriptive tags and remembers when it was last written.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::snapshot::{join_path, AttributeEntry};

/// Tag marking attributes a brand connector adds on top of the generic model
pub const CONNECTOR_CUSTOM: &str = "connector_custom";

/// Tolerance used when checking a level against its precision
const STEP_EPSILON: f64 = 1e-9;

/// Enumerations with a fixed set of string-named members
///
/// The string form is the one used on the wire; `ALL` lists every member so
/// parsing and exhaustive checks do not need a hand-written match.
pub trait StateEnum: Copy + PartialEq + 'static {
    /// Human-readable enumeration name used in diagnostics
    const KIND: &'static str;
    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Wire representation of this member
    fn as_str(&self) -> &'static str;

    /// Parse the wire representation
    fn parse(raw: &str) -> ModelResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str() == raw)
            .ok_or_else(|| ModelError::UnknownVariant {
                kind: Self::KIND,
                raw: raw.to_string(),
            })
    }
}

/// Enumerations carrying an explicit "unknown" member
pub trait UnknownState: Copy {
    /// Sentinel used when nothing has been observed
    const UNKNOWN: Self;
}

/// A named, typed value cell
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<T> {
    name: &'static str,
    value: Option<T>,
    tags: BTreeSet<&'static str>,
    last_updated: Option<DateTime<Utc>>,
}

impl<T> Attribute<T> {
    /// Create an unset attribute
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            value: None,
            tags: BTreeSet::new(),
            last_updated: None,
        }
    }

    /// Create an unset attribute tagged as connector-specific
    pub fn custom(name: &'static str) -> Self {
        Self::new(name).with_tag(CONNECTOR_CUSTOM)
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Store an observed value and stamp the update time
    pub fn set_value(&mut self, value: T) {
        self.value = Some(value);
        self.last_updated = Some(Utc::now());
    }

    /// Drop the current value
    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tags.iter().copied()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether this attribute was added by a brand connector
    pub fn is_custom(&self) -> bool {
        self.has_tag(CONNECTOR_CUSTOM)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

impl<T: Clone> Attribute<T> {
    /// Copy the value of `origin` into this attribute when origin holds one
    ///
    /// The update time travels with the value. Returns `true` if a value was
    /// copied.
    pub fn seed_from(&mut self, origin: &Attribute<T>) -> bool {
        match &origin.value {
            Some(value) => {
                self.value = Some(value.clone());
                self.last_updated = origin.last_updated;
                true
            }
            None => false,
        }
    }
}

impl<T: UnknownState> Attribute<T> {
    /// Set the `UNKNOWN` sentinel if no value is present
    ///
    /// Returns `true` if the sentinel was written.
    pub fn backfill_unknown(&mut self) -> bool {
        if self.value.is_some() {
            return false;
        }
        self.value = Some(T::UNKNOWN);
        true
    }
}

impl<T: Serialize> Attribute<T> {
    /// Flatten this attribute into a snapshot entry below `prefix`
    pub fn entry(&self, prefix: &str) -> AttributeEntry {
        let value = match &self.value {
            Some(value) => serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
            None => serde_json::Value::Null,
        };
        AttributeEntry {
            path: join_path(prefix, self.name),
            value,
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
            last_updated: self.last_updated,
        }
    }
}

/// Numeric attribute with optional bounds and precision
///
/// Values outside `[minimum, maximum]` or not on the precision grid
/// (counted from `minimum`, or from zero without one) are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelAttribute {
    inner: Attribute<f64>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    precision: Option<f64>,
}

impl LevelAttribute {
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Attribute::new(name),
            minimum: None,
            maximum: None,
            precision: None,
        }
    }

    /// Create an unset level tagged as connector-specific
    pub fn custom(name: &'static str) -> Self {
        Self::new(name).with_tag(CONNECTOR_CUSTOM)
    }

    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.inner = self.inner.with_tag(tag);
        self
    }

    /// Restrict values to `[minimum, maximum]`
    pub fn with_bounds(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    /// Restrict values to multiples of `precision`
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<f64> {
        self.maximum
    }

    pub fn precision(&self) -> Option<f64> {
        self.precision
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    pub fn value(&self) -> Option<f64> {
        self.inner.value().copied()
    }

    pub fn is_set(&self) -> bool {
        self.inner.is_set()
    }

    /// The underlying attribute cell
    pub fn attribute(&self) -> &Attribute<f64> {
        &self.inner
    }

    /// Check `value` against bounds and precision without storing it
    pub fn validate(&self, value: f64) -> ModelResult<()> {
        let name = self.inner.name();
        if !value.is_finite() {
            return Err(ModelError::NotFinite(name));
        }

        let min = self.minimum.unwrap_or(f64::NEG_INFINITY);
        let max = self.maximum.unwrap_or(f64::INFINITY);
        if value < min || value > max {
            return Err(ModelError::OutOfRange {
                name,
                value,
                min,
                max,
            });
        }

        if let Some(step) = self.precision.filter(|step| *step > 0.0) {
            let steps = (value - self.minimum.unwrap_or(0.0)) / step;
            if (steps - steps.round()).abs() > STEP_EPSILON {
                return Err(ModelError::InvalidStep { name, value, step });
            }
        }

        Ok(())
    }

    /// Validate and store a value; on error the previous value is kept
    pub fn set_value(&mut self, value: f64) -> ModelResult<()> {
        self.validate(value)?;
        self.inner.set_value(value);
        Ok(())
    }

    /// Copy the value of `origin` when it holds one that fits this level
    pub fn seed_from(&mut self, origin: &LevelAttribute) -> ModelResult<bool> {
        match origin.value() {
            Some(value) => {
                self.validate(value)?;
                self.inner.seed_from(&origin.inner);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.inner.is_custom()
    }

    pub fn entry(&self, prefix: &str) -> AttributeEntry {
        self.inner.entry(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    enum Door {
        #[serde(rename = "open")]
        Open,
        #[serde(rename = "unknown door state")]
        Unknown,
    }

    impl StateEnum for Door {
        const KIND: &'static str = "door state";
        const ALL: &'static [Self] = &[Door::Open, Door::Unknown];

        fn as_str(&self) -> &'static str {
            match self {
                Door::Open => "open",
                Door::Unknown => "unknown door state",
            }
        }
    }

    impl UnknownState for Door {
        const UNKNOWN: Self = Door::Unknown;
    }

    fn battery_care() -> LevelAttribute {
        LevelAttribute::custom("battery_care_target_level")
            .with_bounds(0.0, 100.0)
            .with_precision(5.0)
    }

    #[test]
    fn test_new_attribute_is_unset() {
        let attr: Attribute<bool> = Attribute::custom("is_active");
        assert!(!attr.is_set());
        assert!(attr.is_custom());
        assert_eq!(attr.last_updated(), None);
        assert_eq!(attr.tags().collect::<Vec<_>>(), vec![CONNECTOR_CUSTOM]);
    }

    #[test]
    fn test_set_value_stamps_time() {
        let mut attr = Attribute::new("odometer");
        attr.set_value(12_500.0);
        assert_eq!(attr.value(), Some(&12_500.0));
        assert!(attr.last_updated().is_some());
    }

    #[test]
    fn test_seed_from_copies_only_set_values() {
        let mut origin = Attribute::new("unit_in_car");
        let mut target: Attribute<String> = Attribute::new("unit_in_car");
        assert!(!target.seed_from(&origin));
        assert!(!target.is_set());

        origin.set_value("celsius".to_string());
        assert!(target.seed_from(&origin));
        assert_eq!(target.value().map(String::as_str), Some("celsius"));
        assert_eq!(target.last_updated(), origin.last_updated());
    }

    #[test]
    fn test_backfill_unknown_only_when_unset() {
        let mut attr: Attribute<Door> = Attribute::new("door");
        assert!(attr.backfill_unknown());
        assert_eq!(attr.value(), Some(&Door::Unknown));
        assert_eq!(attr.last_updated(), None);

        let mut attr: Attribute<Door> = Attribute::new("door");
        attr.set_value(Door::Open);
        assert!(!attr.backfill_unknown());
        assert_eq!(attr.value(), Some(&Door::Open));
    }

    #[test]
    fn test_state_enum_parse() {
        assert_eq!(Door::parse("open").unwrap(), Door::Open);
        assert_eq!(
            Door::parse("ajar").unwrap_err(),
            ModelError::UnknownVariant {
                kind: "door state",
                raw: "ajar".to_string()
            }
        );
    }

    #[test]
    fn test_entry_serializes_value_and_tags() {
        let mut attr: Attribute<Door> = Attribute::custom("door");
        let entry = attr.entry("body");
        assert_eq!(entry.path, "body/door");
        assert_eq!(entry.value, serde_json::Value::Null);

        attr.set_value(Door::Open);
        let entry = attr.entry("body");
        assert_eq!(entry.value, serde_json::json!("open"));
        assert_eq!(entry.tags, vec![CONNECTOR_CUSTOM.to_string()]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(5.0)]
    #[case(80.0)]
    #[case(100.0)]
    fn test_level_accepts_values_on_grid(#[case] value: f64) {
        let mut level = battery_care();
        level.set_value(value).unwrap();
        assert_eq!(level.value(), Some(value));
    }

    #[rstest]
    #[case(-5.0)]
    #[case(105.0)]
    #[case(250.0)]
    fn test_level_rejects_out_of_range(#[case] value: f64) {
        let mut level = battery_care();
        assert!(matches!(
            level.set_value(value),
            Err(ModelError::OutOfRange { .. })
        ));
        assert!(!level.is_set());
    }

    #[rstest]
    #[case(42.0)]
    #[case(2.5)]
    #[case(99.0)]
    fn test_level_rejects_off_grid(#[case] value: f64) {
        let mut level = battery_care();
        assert!(matches!(
            level.set_value(value),
            Err(ModelError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_level_rejection_keeps_previous_value() {
        let mut level = battery_care();
        level.set_value(80.0).unwrap();
        assert!(level.set_value(f64::NAN).is_err());
        assert_eq!(level.value(), Some(80.0));
    }

    #[test]
    fn test_level_seed_validates_against_own_bounds() {
        let mut wide = LevelAttribute::new("target_level");
        wide.set_value(42.0).unwrap();

        let mut strict = battery_care();
        assert!(strict.seed_from(&wide).is_err());
        assert!(!strict.is_set());

        let mut origin = battery_care();
        origin.set_value(70.0).unwrap();
        assert_eq!(strict.seed_from(&origin), Ok(true));
        assert_eq!(strict.value(), Some(70.0));
    }
}
