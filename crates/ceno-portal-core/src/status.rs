use serde::Serialize;

pub const PORTAL_STATUS_OKAY: &str = "okay";

/// Connectivity state as reported by the navigation helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reported", rename_all = "snake_case")]
pub enum PortalStatus {
    Okay,
    NotReady(String),
}

impl PortalStatus {
    /// Only the exact literal `okay` counts as connected.
    #[must_use]
    pub fn from_reported(raw: &str) -> Self {
        if raw == PORTAL_STATUS_OKAY {
            Self::Okay
        } else {
            Self::NotReady(raw.to_string())
        }
    }

    #[must_use]
    pub fn is_okay(&self) -> bool {
        matches!(self, Self::Okay)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Okay => PORTAL_STATUS_OKAY,
            Self::NotReady(raw) => raw,
        }
    }
}
