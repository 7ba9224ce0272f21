use serde::{Deserialize, Serialize};

pub const DEFAULT_MODE: &str = "items";

// Labels holds the human-readable texts written into the page
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Labels {
    pub available: String,
    pub on_loan: String,
    pub not_reservable: String,
    pub unavailable: String,
    pub holdings_heading: String,
    pub no_holdings: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            available: "available".to_string(),
            on_loan: "on loan".to_string(),
            not_reservable: "not reservable".to_string(),
            unavailable: "unavailable".to_string(),
            holdings_heading: "Status for the material".to_string(),
            no_holdings: "No holdings available".to_string(),
        }
    }
}

// Configuration abstracts session-wide options for the availability engine
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Configuration {
    pub default_mode: String,
    pub http_timeout_secs: u64,
    pub labels: Labels,
}

impl Configuration {
    pub fn new() -> Self {
        Configuration {
            default_mode: DEFAULT_MODE.to_string(),
            http_timeout_secs: 10,
            labels: Labels::default(),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
