use super::*;

#[derive(Debug, Clone, Default, Serialize)]
pub(super) struct BootDiagnostics {
    pub(super) phase: String,
    pub(super) detail: String,
    pub(super) last_error: Option<String>,
    pub(super) boot_latency_ms: Option<u64>,
    pub(super) budget_breaches: Vec<String>,
    pub(super) config: Option<PortalConfig>,
    pub(super) portal: Option<PortalBootReport>,
}

pub(super) fn boot() -> Result<(), String> {
    let started = Instant::now();
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;

    set_boot_phase("configuring", "resolving portal config");
    let config = resolve_portal_config(&window);
    let locale = resolve_locale(config.locale.as_deref(), page_locale(&window).as_deref());

    let host = PortalHost {
        document: Rc::new(BrowserDocument::from_window(&window)?),
        location: Rc::new(BrowserLocation::new(window.clone())),
        scheduler: Rc::new(TimerScheduler),
    };
    let collaborators = PortalCollaborators {
        languages: Rc::new(JsLanguages::new(window.clone())),
        navigation: Rc::new(JsNavigation::new(window)),
    };

    set_boot_phase("binding", "attaching lookup form and scheduling status check");
    let boot = init_portal(&config, &locale, &host, &collaborators);
    info!(
        locale = %locale,
        client = %config.client_base_url,
        binding = ?boot.report().lookup_form_binding,
        "portal bootstrap initialized"
    );

    PORTAL_CONFIG.with(|slot| {
        *slot.borrow_mut() = config.clone();
    });
    PORTAL_BOOT.with(|slot| {
        *slot.borrow_mut() = Some(boot);
    });
    DIAGNOSTICS.with(|state| {
        state.borrow_mut().config = Some(config);
    });
    record_boot_latency(started.elapsed().as_millis() as u64, BOOT_BUDGET_MS);
    set_boot_phase("ready", "waiting for portal status check");
    Ok(())
}

/// Reads `window.__CENO_PORTAL_CONFIG__`, accepting either a JSON string or
/// a plain object. Anything unusable falls back to the defaults.
pub(super) fn resolve_portal_config(window: &web_sys::Window) -> PortalConfig {
    let Ok(value) = js_sys::Reflect::get(window, &JsValue::from_str(PORTAL_CONFIG_GLOBAL)) else {
        return PortalConfig::default();
    };
    if value.is_undefined() || value.is_null() {
        return PortalConfig::default();
    }

    let raw = value.as_string().or_else(|| {
        js_sys::JSON::stringify(&value)
            .ok()
            .and_then(|raw| raw.as_string())
    });
    let Some(raw) = raw else {
        warn!(
            js_type = ?value.js_typeof().as_string(),
            "portal config global is not serializable; using defaults"
        );
        return PortalConfig::default();
    };

    match PortalConfig::from_json(&raw) {
        Ok(config) => {
            debug!(?config, "loaded portal config from page");
            config
        }
        Err(error) => {
            warn!(%error, "invalid portal config; using defaults");
            PortalConfig::default()
        }
    }
}

pub(super) fn page_locale(window: &web_sys::Window) -> Option<String> {
    js_sys::Reflect::get(window, &JsValue::from_str(PAGE_LOCALE_GLOBAL))
        .ok()?
        .as_string()
}

pub(super) fn set_boot_phase(phase: &str, detail: &str) {
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.phase = phase.to_string();
        state.detail = detail.to_string();
        if phase != "error" {
            state.last_error = None;
        }
    });
    debug!(phase, detail, "portal boot phase");
}

pub(super) fn set_boot_error(message: &str) {
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.phase = "error".to_string();
        state.detail = "startup failed".to_string();
        state.last_error = Some(message.to_string());
    });
    warn!(error = message, "portal bootstrap failed");
}

pub(super) fn record_boot_latency(actual_ms: u64, budget_ms: u64) {
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.boot_latency_ms = Some(actual_ms);
        if actual_ms > budget_ms {
            state
                .budget_breaches
                .push(format!("boot_latency_ms>{budget_ms} (actual={actual_ms})"));
        }
    });
}
