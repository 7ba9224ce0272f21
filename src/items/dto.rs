use std::collections::BTreeMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::json::{lenient_bool, lenient_number, lenient_text};

pub type ItemId = String;

// branch level stock line, kept opaque since only its presence and count matter here
pub type HoldingEntry = Value;

// raw answer of the availability source keyed by item id
pub type AvailabilityPayload = serde_json::Map<String, Value>;

// Holdings arrive either as a list or as an object keyed by branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Holdings {
    List(Vec<HoldingEntry>),
    Keyed(BTreeMap<String, HoldingEntry>),
}

impl Holdings {
    pub fn len(&self) -> usize {
        match self {
            Holdings::List(entries) => entries.len(),
            Holdings::Keyed(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lenient_holdings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Holdings>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(Some(Holdings::List(entries))),
        Value::Object(entries) => Ok(Some(Holdings::Keyed(entries.into_iter().collect()))),
        _ => Ok(None),
    }
}

// StatusRecord is the resolved availability of one item as reported by the source
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusRecord {
    #[serde(deserialize_with = "lenient_bool::deserialize")]
    pub available: bool,
    #[serde(deserialize_with = "lenient_bool::deserialize")]
    pub reservable: bool,
    #[serde(deserialize_with = "lenient_bool::deserialize")]
    pub show_reservation_button: bool,
    #[serde(deserialize_with = "lenient_bool::deserialize")]
    pub is_periodical: bool,
    #[serde(deserialize_with = "lenient_holdings", skip_serializing_if = "Option::is_none")]
    pub holdings: Option<Holdings>,
    #[serde(deserialize_with = "lenient_holdings", skip_serializing_if = "Option::is_none")]
    pub holdings_available: Option<Holdings>,
    #[serde(deserialize_with = "lenient_text::deserialize", skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(deserialize_with = "lenient_number::deserialize")]
    pub total_count: i64,
}

impl StatusRecord {
    pub fn new(available: bool, reservable: bool, show_reservation_button: bool) -> Self {
        StatusRecord {
            available,
            reservable,
            show_reservation_button,
            ..Default::default()
        }
    }

    // only json objects are records, anything else is left unresolved
    pub fn from_value(value: &Value) -> Option<StatusRecord> {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    pub fn has_holdings(&self) -> bool {
        self.holdings.is_some() || self.holdings_available.is_some()
    }

    // the available subset is not shown for periodicals
    pub fn display_holdings(&self) -> Option<&Holdings> {
        match (&self.holdings_available, self.is_periodical) {
            (Some(available), false) => Some(available),
            _ => self.holdings.as_ref(),
        }
    }
}

pub fn parse_payload(value: Value) -> LibraryResult<AvailabilityPayload> {
    match value {
        Value::Object(map) => Ok(map),
        // php encodes an empty keyed array as a list
        Value::Array(list) if list.is_empty() => Ok(AvailabilityPayload::new()),
        other => Err(LibraryError::serialization(
            format!("availability payload is not an object {}", other).as_str())),
    }
}

// picks the records of the given ids, unknown ids are left out
pub fn select_records(records: &AvailabilityPayload, ids: &[ItemId]) -> AvailabilityPayload {
    ids.iter()
        .filter_map(|id| records.get(id).map(|v| (id.to_string(), v.clone())))
        .collect()
}
