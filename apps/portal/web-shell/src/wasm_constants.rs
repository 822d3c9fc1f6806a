pub(crate) const PORTAL_CONFIG_GLOBAL: &str = "__CENO_PORTAL_CONFIG__";
pub(crate) const PAGE_LOCALE_GLOBAL: &str = "CURRENT_LOCALE";
pub(crate) const LANGUAGES_GLOBAL: &str = "languages";
pub(crate) const SET_INDEX_TEXT_FN: &str = "setIndexText";
pub(crate) const NAVIGATION_GLOBAL: &str = "navigation";
pub(crate) const GET_PORTAL_STATUS_FN: &str = "getPortalStatus";
pub(crate) const ADD_EVENT_LISTENER_FN: &str = "addEventListener";
pub(crate) const ATTACH_EVENT_FN: &str = "attachEvent";
pub(crate) const SUBMIT_EVENT: &str = "submit";
pub(crate) const LEGACY_SUBMIT_EVENT: &str = "onsubmit";
pub(crate) const BOOT_BUDGET_MS: u64 = 50;
