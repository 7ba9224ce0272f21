use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;
use serde::{Deserialize, Serialize};

// Page is the host document as seen by the engine: regions addressed by id that can
// be decorated but never created. Operations on unknown ids are no-ops.
pub trait Page: Sync + Send {
    fn has_region(&self, id: &str) -> bool;
    fn add_class(&self, id: &str, class: &str);
    fn remove_class(&self, id: &str, class: &str);
    fn set_attribute(&self, id: &str, name: &str, value: &str);
    fn append_html(&self, id: &str, html: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<String>,
}

impl Region {
    pub fn with_classes(classes: &[&str]) -> Self {
        Region {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn html(&self) -> String {
        self.children.concat()
    }
}

/// In-memory page used by the command line runner and by tests.
#[derive(Debug, Default)]
pub struct MemoryPage {
    regions: RwLock<BTreeMap<String, Region>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            regions: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn add_region(&self, id: &str, region: Region) {
        let mut regions = self.regions.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        regions.insert(id.to_string(), region);
    }

    pub fn region(&self, id: &str) -> Option<Region> {
        let regions = self.regions.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        regions.get(id).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<String, Region> {
        self.regions.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    fn update<F: FnOnce(&mut Region)>(&self, id: &str, f: F) {
        let mut regions = self.regions.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(region) = regions.get_mut(id) {
            f(region);
        }
    }
}

impl Page for MemoryPage {
    fn has_region(&self, id: &str) -> bool {
        self.regions.read().unwrap_or_else(|poisoned| poisoned.into_inner()).contains_key(id)
    }

    fn add_class(&self, id: &str, class: &str) {
        self.update(id, |r| { r.classes.insert(class.to_string()); });
    }

    fn remove_class(&self, id: &str, class: &str) {
        self.update(id, |r| { r.classes.remove(class); });
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        self.update(id, |r| { r.attributes.insert(name.to_string(), value.to_string()); });
    }

    fn append_html(&self, id: &str, html: &str) {
        self.update(id, |r| r.children.push(html.to_string()));
    }
}
