use super::dom::describe_js_error;
use super::*;

pub(super) struct BrowserLocation {
    window: web_sys::Window,
}

impl BrowserLocation {
    pub(super) fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl PortalLocation for BrowserLocation {
    fn navigate(&self, url: &str) -> Result<(), PortalError> {
        self.window
            .location()
            .set_href(url)
            .map_err(|error| PortalError::Navigation {
                url: url.to_string(),
                detail: describe_js_error(&error),
            })
    }
}

pub(super) struct TimerScheduler;

impl PortalScheduler for TimerScheduler {
    fn schedule_once(&self, delay: std::time::Duration, task: Box<dyn FnOnce()>) {
        spawn_local(async move {
            sleep(delay).await;
            task();
        });
    }
}

/// `window.languages`, owned by the portal's localization script.
pub(super) struct JsLanguages {
    window: web_sys::Window,
}

impl JsLanguages {
    pub(super) fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Languages for JsLanguages {
    fn set_index_text(&self, locale: &str) -> Result<(), PortalError> {
        let args = js_sys::Array::of1(&JsValue::from_str(locale));
        call_page_helper(&self.window, LANGUAGES_GLOBAL, SET_INDEX_TEXT_FN, &args)
            .map(|_| ())
            .map_err(|detail| PortalError::Collaborator {
                name: LANGUAGES_GLOBAL,
                detail,
            })
    }
}

/// `window.navigation`, the portal's connectivity helper.
pub(super) struct JsNavigation {
    window: web_sys::Window,
}

impl JsNavigation {
    pub(super) fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Navigation for JsNavigation {
    fn portal_status(&self) -> Result<String, PortalError> {
        let status = call_page_helper(
            &self.window,
            NAVIGATION_GLOBAL,
            GET_PORTAL_STATUS_FN,
            &js_sys::Array::new(),
        )
        .map_err(|detail| PortalError::Collaborator {
            name: NAVIGATION_GLOBAL,
            detail,
        })?;
        let js_type = status.js_typeof().as_string().unwrap_or_default();
        Ok(reported_status(status.as_string(), &js_type))
    }
}

fn call_page_helper(
    window: &web_sys::Window,
    object: &str,
    method: &str,
    args: &js_sys::Array,
) -> Result<JsValue, String> {
    let target = js_sys::Reflect::get(window, &JsValue::from_str(object))
        .map_err(|error| describe_js_error(&error))?;
    if target.is_undefined() || target.is_null() {
        return Err(format!("window.{object} is not defined"));
    }
    let function = js_sys::Reflect::get(&target, &JsValue::from_str(method))
        .map_err(|error| describe_js_error(&error))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| format!("{object}.{method} is not a function"))?;
    debug!(object, method, "calling portal page helper");
    function
        .apply(&target, args)
        .map_err(|error| describe_js_error(&error))
}
