#[cfg(any(target_arch = "wasm32", test))]
mod js_text;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;
    use web_time::Instant;

    use ceno_portal_core::bootstrap::{
        BindingMechanism, Languages, Navigation, PortalBoot, PortalBootReport,
        PortalCollaborators, PortalDocument, PortalError, PortalHost, PortalLocation,
        PortalScheduler, SubmitEvent, SubmitHandler, SupportedBindings, init_portal,
    };
    use ceno_portal_core::config::{PortalConfig, resolve_locale};
    use gloo_timers::future::sleep;
    use serde::Serialize;
    use tracing::{debug, info, warn};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::HtmlInputElement;

    use crate::js_text::{describe_thrown, reported_status};
    use crate::wasm_constants::*;

    mod dom;
    mod host;
    mod lifecycle;
    mod logging;

    use dom::BrowserDocument;
    use host::{BrowserLocation, JsLanguages, JsNavigation, TimerScheduler};
    use lifecycle::*;
    use logging::install_console_logging;

    thread_local! {
        static PORTAL_BOOT: RefCell<Option<PortalBoot>> = const { RefCell::new(None) };
        static PORTAL_CONFIG: RefCell<PortalConfig> = RefCell::new(PortalConfig::default());
        static DIAGNOSTICS: RefCell<BootDiagnostics> = RefCell::new(BootDiagnostics::default());
        static LOOKUP_FORM_SUBMIT_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        install_console_logging();
        set_boot_phase("booting", "initializing CENO portal bootstrap");
        if let Err(error) = boot() {
            set_boot_error(&error);
        }
    }

    #[wasm_bindgen]
    pub fn portal_boot_diagnostics_json() -> String {
        let mut snapshot = DIAGNOSTICS.with(|state| state.borrow().clone());
        snapshot.portal = PORTAL_BOOT.with(|boot| boot.borrow().as_ref().map(PortalBoot::report));
        serde_json::to_string(&snapshot).unwrap_or_else(|_| {
            "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
        })
    }

    /// Lookup URL for `site_url` against the active portal config.
    #[wasm_bindgen]
    pub fn lookup_url(site_url: &str) -> String {
        PORTAL_CONFIG.with(|config| config.borrow().lookup_url(site_url))
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{lookup_url, portal_boot_diagnostics_json};

#[cfg(not(target_arch = "wasm32"))]
pub fn lookup_url(site_url: &str) -> String {
    ceno_portal_core::lookup_url(site_url)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn portal_boot_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"portal diagnostics only available on wasm\"}".to_string()
}
