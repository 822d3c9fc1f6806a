//! Shared core for the CENO portal page.
//!
//! Everything here is platform independent; the wasm web shell supplies the
//! browser-backed [`bootstrap::PortalHost`].

pub mod bootstrap;
pub mod config;
pub mod lookup;
pub mod status;

pub use bootstrap::{
    BindingMechanism, PortalBoot, PortalBootReport, PortalCollaborators, PortalError, PortalHost,
    StatusCheckState, WaitMessageOutcome, encode_lookup_url, init_portal, show_wait_message,
};
pub use config::{PortalConfig, PortalConfigError, resolve_locale};
pub use lookup::{LookupUrlError, decode_lookup_url, lookup_url};
pub use status::PortalStatus;
