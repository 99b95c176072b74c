use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names the lead service is known to return.
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const SIP_LUMPSUM: &str = "sipLumpsum";
    pub const HEALTH_INSURANCE: &str = "healthInsurance";
    pub const TERM_INSURANCE: &str = "termInsurance";
    pub const TWO_WHEELER: &str = "twoWheeler";
    pub const FOUR_WHEELER: &str = "fourWheeler";
    pub const HEALTH_INSURANCE_EXPIRY: &str = "healthInsuranceExpiry";
    pub const TERM_INSURANCE_EXPIRY: &str = "termInsuranceExpiry";
    pub const TWO_W_INSURANCE_EXPIRY: &str = "twoWInsuranceExpiry";
    pub const FOUR_W_INSURANCE_EXPIRY: &str = "fourWInsuranceExpiry";
    pub const REFERRED_BY: &str = "referredBy";
    pub const CREATED_AT: &str = "createdAt";

    pub const KNOWN: [&str; 14] = [
        NAME,
        EMAIL,
        PHONE,
        SIP_LUMPSUM,
        HEALTH_INSURANCE,
        TERM_INSURANCE,
        TWO_WHEELER,
        FOUR_WHEELER,
        HEALTH_INSURANCE_EXPIRY,
        TERM_INSURANCE_EXPIRY,
        TWO_W_INSURANCE_EXPIRY,
        FOUR_W_INSURANCE_EXPIRY,
        REFERRED_BY,
        CREATED_AT,
    ];

    pub const DATE_FIELDS: [&str; 5] = [
        HEALTH_INSURANCE_EXPIRY,
        TERM_INSURANCE_EXPIRY,
        TWO_W_INSURANCE_EXPIRY,
        FOUR_W_INSURANCE_EXPIRY,
        CREATED_AT,
    ];
}

/// One lead as returned by the service.
///
/// The shape is open: whatever keys the service sends are kept, in wire order, so the
/// record can be sent back unchanged on update. Values are read through [`Record::text`],
/// which views JSON scalars as strings and `null` as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.0.get(field).and_then(value_text)
    }

    pub fn phone(&self) -> Option<Cow<'_, str>> {
        self.text(fields::PHONE)
    }

    pub fn has_phone(&self, phone: &str) -> bool {
        self.phone().is_some_and(|p| p == phone)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), Value::String(value.into()));
    }

    pub fn clear(&mut self, field: &str) {
        if let Some(slot) = self.0.get_mut(field) {
            *slot = Value::Null;
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.shift_remove(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        other => Some(Cow::Owned(other.to_string())),
    }
}
