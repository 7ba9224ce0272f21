use std::collections::{BTreeMap, HashSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::library::{AvailabilityState, GroupKind, LibraryError, LibraryResult};
use crate::items::dto::ItemId;
use crate::utils::json::{item_ids, parse_id_value};

// DisplayGroup is one page region standing for one or more items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayGroup {
    pub kind: GroupKind,
    #[serde(deserialize_with = "item_ids::deserialize")]
    pub items: Vec<ItemId>,
}

impl DisplayGroup {
    pub fn new(kind: GroupKind, items: &[&str]) -> Self {
        Self {
            kind,
            items: items.iter().map(|id| id.to_string()).collect(),
        }
    }

    pub fn indicator(items: &[&str]) -> Self {
        Self::new(GroupKind::Indicator, items)
    }

    pub fn holdings(items: &[&str]) -> Self {
        Self::new(GroupKind::Holdings, items)
    }

    // the reservation control of an indicator belongs to its first item
    pub fn first(&self) -> Option<&ItemId> {
        self.items.first()
    }

    // holdings are rendered for the last item of the group
    pub fn representative(&self) -> Option<&ItemId> {
        self.items.last()
    }
}

// GroupMapping maps region ids to their groups, iterated in id order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupMapping {
    groups: BTreeMap<String, DisplayGroup>,
}

impl GroupMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group_id: &str, group: DisplayGroup) {
        self.groups.insert(group_id.to_string(), group);
    }

    // lets a collaborator add items to an already registered group
    pub fn contribute(&mut self, group_id: &str, items: &[&str]) -> LibraryResult<()> {
        let group = self.groups.get_mut(group_id)
            .ok_or_else(|| LibraryError::not_found(format!("no display group {}", group_id).as_str()))?;
        group.items.extend(items.iter().map(|id| id.to_string()));
        Ok(())
    }

    pub fn get(&self, group_id: &str) -> Option<&DisplayGroup> {
        self.groups.get(group_id)
    }

    pub fn iter(&self) -> impl Iterator<Item=(&String, &DisplayGroup)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    // all referenced item ids without duplicates, in first-seen order
    pub fn item_ids(&self) -> Vec<ItemId> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut ids = vec![];
        for id in self.groups.values().flat_map(|g| g.items.iter()) {
            if seen.insert(id.as_str()) {
                ids.push(id.to_string());
            }
        }
        ids
    }
}

// ActivationSettings is what the host supplies for one activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationSettings {
    pub group_mapping: GroupMapping,
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub path_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl ActivationSettings {
    pub fn new(group_mapping: GroupMapping, base_path: &str, path_prefix: &str) -> Self {
        Self {
            group_mapping,
            base_path: base_path.to_string(),
            path_prefix: path_prefix.to_string(),
            mode: None,
        }
    }

    pub fn mode_or(&self, default_mode: &str) -> String {
        match &self.mode {
            Some(mode) if !mode.is_empty() => mode.to_string(),
            _ => default_mode.to_string(),
        }
    }

    // accepts both the native shape and the legacy host settings
    pub fn from_value(value: Value) -> LibraryResult<Self> {
        if value.get("ding_availability").is_some() {
            let settings: DrupalSettings = serde_json::from_value(value)?;
            ActivationSettings::try_from(settings)
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }
}

// DrupalSettings is the legacy settings shape where the group kind is encoded in the region id
#[derive(Debug, Clone, Deserialize)]
pub struct DrupalSettings {
    pub ding_availability: BTreeMap<String, Vec<Value>>,
    #[serde(rename = "basePath", default)]
    pub base_path: String,
    #[serde(rename = "pathPrefix", default)]
    pub path_prefix: String,
    #[serde(default)]
    pub ding_availability_mode: Option<String>,
}

impl TryFrom<DrupalSettings> for ActivationSettings {
    type Error = LibraryError;

    fn try_from(other: DrupalSettings) -> Result<Self, Self::Error> {
        let mut mapping = GroupMapping::new();
        for (group_id, values) in other.ding_availability {
            let items = values.iter()
                .map(|v| parse_id_value(v).ok_or_else(|| LibraryError::validation(
                    format!("invalid item id {} in group {}", v, group_id).as_str(), None)))
                .collect::<LibraryResult<Vec<ItemId>>>()?;
            mapping.insert(group_id.as_str(), DisplayGroup { kind: GroupKind::from_region_id(group_id.as_str()), items });
        }
        Ok(Self {
            group_mapping: mapping,
            base_path: other.base_path,
            path_prefix: other.path_prefix,
            mode: other.ding_availability_mode,
        })
    }
}

// RawStatus is the OR of the flags of every resolved item in a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatus {
    pub available: bool,
    pub reservable: bool,
    pub show_reservation_button: bool,
}

// AggregatedStatus is derived per group and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStatus {
    pub raw: RawStatus,
    pub available: bool,
    pub on_loan: bool,
    pub not_reservable: bool,
    pub unavailable: bool,
}

impl AggregatedStatus {
    pub fn from_raw(raw: RawStatus) -> Self {
        Self {
            raw,
            available: raw.available && raw.reservable,
            on_loan: !raw.available && raw.reservable,
            not_reservable: raw.available && !raw.reservable,
            unavailable: !raw.available && !raw.reservable,
        }
    }

    pub fn show_reservation_button(&self) -> bool {
        self.raw.show_reservation_button
    }

    pub fn state(&self) -> AvailabilityState {
        if self.available {
            AvailabilityState::Available
        } else if self.on_loan {
            AvailabilityState::OnLoan
        } else if self.not_reservable {
            AvailabilityState::NotReservable
        } else {
            AvailabilityState::Unavailable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    Skipped,
    Fetched { requested: usize, returned: usize },
    Failed { message: String },
}

// Rendered tells what the display step did with a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rendered", content = "state", rename_all = "snake_case")]
pub enum Rendered {
    Indicator(AvailabilityState),
    HoldingsStatus(AvailabilityState),
    NoHoldings,
    Nothing,
    MissingRegion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDisplay {
    pub group_id: String,
    pub rendered: Rendered,
}

// ActivationReport summarizes one activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationReport {
    pub requested: Vec<ItemId>,
    pub fetch: FetchOutcome,
    pub resolved: Vec<ItemId>,
    pub displayed: Vec<GroupDisplay>,
}

impl ActivationReport {
    pub fn rendered(&self, group_id: &str) -> Option<&Rendered> {
        self.displayed.iter().find(|d| d.group_id == group_id).map(|d| &d.rendered)
    }
}
