use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::lookup::{CLIENT_LOOKUP_ROUTE, DEFAULT_CLIENT_BASE_URL, lookup_url_with_base};

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_STATUS_CHECK_DELAY_MS: u64 = 500;

pub const LOOKUP_FORM_ID: &str = "lookupForm";
pub const URL_INPUT_ID: &str = "indexUrlSearch";
pub const WHAT_NEXT_HEADER_ID: &str = "whatNextHeader";
pub const WAIT_FOR_CONNECT_ID: &str = "waitForConnect";
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortalConfigError {
    #[error("client base url must not be empty")]
    EmptyBaseUrl,
    #[error("client base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
    #[error("lookup route must start with `/`")]
    InvalidLookupRoute,
    #[error("dom field `{0}` must not be empty")]
    EmptyDomField(&'static str),
    #[error("portal config is not valid json: {0}")]
    Json(String),
}

/// Element ids and class names the portal page is built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortalDomIds {
    pub lookup_form: String,
    pub url_input: String,
    pub what_next_header: String,
    pub wait_for_connect: String,
    pub hidden_class: String,
}

impl Default for PortalDomIds {
    fn default() -> Self {
        Self {
            lookup_form: LOOKUP_FORM_ID.to_string(),
            url_input: URL_INPUT_ID.to_string(),
            what_next_header: WHAT_NEXT_HEADER_ID.to_string(),
            wait_for_connect: WAIT_FOR_CONNECT_ID.to_string(),
            hidden_class: HIDDEN_CLASS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortalConfig {
    pub client_base_url: String,
    pub lookup_route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub status_check_delay_ms: u64,
    pub dom: PortalDomIds,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            client_base_url: DEFAULT_CLIENT_BASE_URL.to_string(),
            lookup_route: CLIENT_LOOKUP_ROUTE.to_string(),
            locale: None,
            status_check_delay_ms: DEFAULT_STATUS_CHECK_DELAY_MS,
            dom: PortalDomIds::default(),
        }
    }
}

impl PortalConfig {
    pub fn from_json(raw: &str) -> Result<Self, PortalConfigError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|error| PortalConfigError::Json(error.to_string()))?;
        config.validated()
    }

    pub fn validated(mut self) -> Result<Self, PortalConfigError> {
        self.client_base_url = normalize_base_url(&self.client_base_url)?;
        if !self.lookup_route.starts_with('/') {
            return Err(PortalConfigError::InvalidLookupRoute);
        }
        let dom_fields = [
            ("lookupForm", &self.dom.lookup_form),
            ("urlInput", &self.dom.url_input),
            ("whatNextHeader", &self.dom.what_next_header),
            ("waitForConnect", &self.dom.wait_for_connect),
            ("hiddenClass", &self.dom.hidden_class),
        ];
        if let Some((name, _)) = dom_fields
            .iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(PortalConfigError::EmptyDomField(*name));
        }
        Ok(self)
    }

    #[must_use]
    pub fn status_check_delay(&self) -> Duration {
        Duration::from_millis(self.status_check_delay_ms)
    }

    #[must_use]
    pub fn lookup_url(&self, site_url: &str) -> String {
        lookup_url_with_base(&self.client_base_url, &self.lookup_route, site_url)
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String, PortalConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(PortalConfigError::EmptyBaseUrl);
    }
    let Some((scheme, remainder)) = trimmed.split_once("://") else {
        return Err(PortalConfigError::InvalidBaseUrl);
    };
    if !matches!(scheme, "http" | "https") {
        return Err(PortalConfigError::InvalidBaseUrl);
    }
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(PortalConfigError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}

/// Picks the locale handed to the localization collaborator: configured
/// value first, then the page's own locale, then English.
#[must_use]
pub fn resolve_locale(configured: Option<&str>, page_locale: Option<&str>) -> String {
    [configured, page_locale]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|locale| !locale.is_empty())
        .unwrap_or(DEFAULT_LOCALE)
        .to_string()
}
