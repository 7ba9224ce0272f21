use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::domain::Labels;

#[derive(Debug)]
pub enum LibraryError {
    // Raised when the availability source could not be reached or answered with a
    // non-success status. Nothing is resolved in the cache when this happens and the
    // affected groups stay pending until a new activation is started.
    Transport {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn transport(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Transport { message: message.to_string(), reason_code, retryable }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    // maps an http status of the availability source to an error
    pub fn from_status(message: &str, status: u16) -> LibraryError {
        if status == 404 {
            LibraryError::not_found(
                format!("availability not found {:?} {}", message, status).as_str())
        } else if (400..500).contains(&status) {
            LibraryError::validation(
                format!("availability request rejected {:?} {}", message, status).as_str(), Some(status.to_string()))
        } else {
            LibraryError::transport(
                format!("availability source error {:?} {}", message, status).as_str(), Some(status.to_string()), status >= 500)
        }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Transport { retryable, .. } => { *retryable }
            LibraryError::NotFound { .. } => { false }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return LibraryError::serialization(
                format!("availability body decoding {}", err).as_str());
        }
        let reason = err.status().map(|s| s.as_u16().to_string());
        LibraryError::transport(
            format!("availability request failed {}", err).as_str(), reason,
            err.is_timeout() || err.is_connect())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Transport { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the availability engine.
pub type LibraryResult<T> = Result<T, LibraryError>;

// The four display states a group can end up in, in label priority order
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum AvailabilityState {
    Available,
    OnLoan,
    NotReservable,
    Unavailable,
}

impl AvailabilityState {
    pub fn label(&self, labels: &Labels) -> String {
        match self {
            AvailabilityState::Available => labels.available.to_string(),
            AvailabilityState::OnLoan => labels.on_loan.to_string(),
            AvailabilityState::NotReservable => labels.not_reservable.to_string(),
            AvailabilityState::Unavailable => labels.unavailable.to_string(),
        }
    }
}

impl From<String> for AvailabilityState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Available" => AvailabilityState::Available,
            "OnLoan" => AvailabilityState::OnLoan,
            "NotReservable" => AvailabilityState::NotReservable,
            _ => AvailabilityState::Unavailable,
        }
    }
}

impl Display for AvailabilityState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            AvailabilityState::Available => write!(f, "Available"),
            AvailabilityState::OnLoan => write!(f, "OnLoan"),
            AvailabilityState::NotReservable => write!(f, "NotReservable"),
            AvailabilityState::Unavailable => write!(f, "Unavailable"),
        }
    }
}

// GroupKind tells the display side how a group region is rendered
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Indicator,
    Holdings,
}

pub const INDICATOR_PREFIX: &str = "availability-";
pub const RESERVATION_PREFIX: &str = "reservation-";

impl GroupKind {
    // classifies a region id by the naming convention used by legacy host settings
    pub fn from_region_id(id: &str) -> GroupKind {
        if id.starts_with(INDICATOR_PREFIX) {
            GroupKind::Indicator
        } else {
            GroupKind::Holdings
        }
    }
}

impl From<String> for GroupKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Indicator" | "indicator" => GroupKind::Indicator,
            _ => GroupKind::Holdings,
        }
    }
}

impl Display for GroupKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            GroupKind::Indicator => write!(f, "Indicator"),
            GroupKind::Holdings => write!(f, "Holdings"),
        }
    }
}
