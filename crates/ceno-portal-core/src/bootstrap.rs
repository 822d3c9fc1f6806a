//! Portal page startup: lookup form interception, localized text, and the
//! deferred connectivity check.
//!
//! Browser capabilities come in through [`PortalHost`] and the page's
//! external helpers through [`PortalCollaborators`], so the whole flow runs
//! against in-memory fakes outside a browser.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PortalConfig, PortalDomIds};
use crate::status::PortalStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortalError {
    #[error("element `{id}` is missing from the document")]
    MissingElement { id: String },
    #[error("element `{id}` is not a {expected}")]
    UnexpectedElement { id: String, expected: &'static str },
    #[error("element `{id}` supports neither addEventListener nor attachEvent")]
    EventBindingUnavailable { id: String },
    #[error("failed to bind submit handler on `{id}`: {detail}")]
    EventBinding { id: String, detail: String },
    #[error("failed to update class list of `{id}`: {detail}")]
    ClassList { id: String, detail: String },
    #[error("navigation to `{url}` failed: {detail}")]
    Navigation { url: String, detail: String },
    #[error("`{name}` collaborator failed: {detail}")]
    Collaborator { name: &'static str, detail: String },
}

impl PortalError {
    pub fn missing_element(id: &str) -> Self {
        Self::MissingElement { id: id.to_string() }
    }
}

/// How a submit handler ended up attached to the lookup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingMechanism {
    AddEventListener,
    AttachEvent,
}

impl BindingMechanism {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddEventListener => "add_event_listener",
            Self::AttachEvent => "attach_event",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportedBindings {
    pub add_event_listener: bool,
    pub attach_event: bool,
}

/// The standard listener API wins whenever the element offers it.
#[must_use]
pub fn preferred_binding(supported: SupportedBindings) -> Option<BindingMechanism> {
    if supported.add_event_listener {
        Some(BindingMechanism::AddEventListener)
    } else if supported.attach_event {
        Some(BindingMechanism::AttachEvent)
    } else {
        None
    }
}

pub trait SubmitEvent {
    fn prevent_default(&self);
}

pub type SubmitHandler = Box<dyn FnMut(&dyn SubmitEvent)>;

/// Element accessor over the portal page's document.
pub trait PortalDocument {
    fn has_element(&self, id: &str) -> bool;
    fn supported_bindings(&self, id: &str) -> Result<SupportedBindings, PortalError>;
    fn bind_submit(
        &self,
        id: &str,
        mechanism: BindingMechanism,
        handler: SubmitHandler,
    ) -> Result<(), PortalError>;
    fn input_value(&self, id: &str) -> Result<String, PortalError>;
    fn add_class(&self, id: &str, class_name: &str) -> Result<(), PortalError>;
    fn remove_class(&self, id: &str, class_name: &str) -> Result<(), PortalError>;
}

pub trait PortalLocation {
    /// Full page navigation.
    fn navigate(&self, url: &str) -> Result<(), PortalError>;
}

pub trait PortalScheduler {
    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

pub trait Languages {
    fn set_index_text(&self, locale: &str) -> Result<(), PortalError>;
}

pub trait Navigation {
    fn portal_status(&self) -> Result<String, PortalError>;
}

#[derive(Clone)]
pub struct PortalHost {
    pub document: Rc<dyn PortalDocument>,
    pub location: Rc<dyn PortalLocation>,
    pub scheduler: Rc<dyn PortalScheduler>,
}

#[derive(Clone)]
pub struct PortalCollaborators {
    pub languages: Rc<dyn Languages>,
    pub navigation: Rc<dyn Navigation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WaitMessageOutcome {
    /// Portal reported `okay`; layout untouched.
    Connected,
    WaitMessageShown { status: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatusCheckState {
    #[default]
    Pending,
    Completed {
        outcome: WaitMessageOutcome,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortalBootReport {
    pub locale: String,
    pub lookup_form_binding: Option<BindingMechanism>,
    pub lookup_form_error: Option<String>,
    pub localization_error: Option<String>,
    pub status_check_delay_ms: u64,
    pub status_check: StatusCheckState,
}

/// Handle returned by [`init_portal`]; the status check settles after the
/// scheduler fires.
#[derive(Debug, Clone)]
pub struct PortalBoot {
    report: PortalBootReport,
    status_check: Rc<RefCell<StatusCheckState>>,
}

impl PortalBoot {
    #[must_use]
    pub fn status_check(&self) -> StatusCheckState {
        self.status_check.borrow().clone()
    }

    #[must_use]
    pub fn report(&self) -> PortalBootReport {
        PortalBootReport {
            status_check: self.status_check(),
            ..self.report.clone()
        }
    }
}

/// Intercepts a lookup form submission and sends the browser to the CENO
/// client's lookup endpoint instead. Returns the URL navigated to.
pub fn encode_lookup_url(
    event: &dyn SubmitEvent,
    config: &PortalConfig,
    document: &dyn PortalDocument,
    location: &dyn PortalLocation,
) -> Result<String, PortalError> {
    event.prevent_default();
    let site_url = document.input_value(&config.dom.url_input)?;
    let lookup_url = config.lookup_url(&site_url);
    info!(lookup_url = %lookup_url, "redirecting portal lookup to client");
    location.navigate(&lookup_url)?;
    Ok(lookup_url)
}

/// Attaches the lookup submit handler when the form is on the page.
/// `Ok(None)` means the page has no lookup form.
pub fn bind_lookup_form(
    config: &PortalConfig,
    host: &PortalHost,
) -> Result<Option<BindingMechanism>, PortalError> {
    let form_id = config.dom.lookup_form.as_str();
    if !host.document.has_element(form_id) {
        debug!(form_id, "lookup form absent; skipping submit binding");
        return Ok(None);
    }

    let supported = host.document.supported_bindings(form_id)?;
    let mechanism = preferred_binding(supported).ok_or_else(|| {
        PortalError::EventBindingUnavailable {
            id: form_id.to_string(),
        }
    })?;

    let handler_config = config.clone();
    let document = Rc::clone(&host.document);
    let location = Rc::clone(&host.location);
    let handler: SubmitHandler = Box::new(move |event: &dyn SubmitEvent| {
        if let Err(error) =
            encode_lookup_url(event, &handler_config, document.as_ref(), location.as_ref())
        {
            warn!(%error, "portal lookup submission failed");
        }
    });

    host.document.bind_submit(form_id, mechanism, handler)?;
    debug!(form_id, mechanism = mechanism.as_str(), "lookup form bound");
    Ok(Some(mechanism))
}

/// Swaps the "what's next" header for the "waiting for connection" notice
/// unless the portal reports `okay`.
pub fn show_wait_message(
    dom: &PortalDomIds,
    document: &dyn PortalDocument,
    navigation: &dyn Navigation,
) -> Result<WaitMessageOutcome, PortalError> {
    let status = PortalStatus::from_reported(&navigation.portal_status()?);
    if status.is_okay() {
        return Ok(WaitMessageOutcome::Connected);
    }

    document.add_class(&dom.what_next_header, &dom.hidden_class)?;
    document.remove_class(&dom.wait_for_connect, &dom.hidden_class)?;
    Ok(WaitMessageOutcome::WaitMessageShown {
        status: status.as_str().to_string(),
    })
}

/// Runs the portal page startup against the given host.
///
/// Binding and localization failures are recorded in the report rather than
/// aborting, so the status check is always scheduled.
pub fn init_portal(
    config: &PortalConfig,
    locale: &str,
    host: &PortalHost,
    collaborators: &PortalCollaborators,
) -> PortalBoot {
    let (lookup_form_binding, lookup_form_error) = match bind_lookup_form(config, host) {
        Ok(binding) => (binding, None),
        Err(error) => {
            warn!(%error, "lookup form left unbound");
            (None, Some(error.to_string()))
        }
    };

    let localization_error = collaborators
        .languages
        .set_index_text(locale)
        .err()
        .map(|error| {
            warn!(%error, locale, "failed to set localized index text");
            error.to_string()
        });

    let status_check = Rc::new(RefCell::new(StatusCheckState::Pending));
    let delay = config.status_check_delay();
    {
        let status_check = Rc::clone(&status_check);
        let dom = config.dom.clone();
        let document = Rc::clone(&host.document);
        let navigation = Rc::clone(&collaborators.navigation);
        host.scheduler.schedule_once(
            delay,
            Box::new(move || {
                let next = match show_wait_message(&dom, document.as_ref(), navigation.as_ref())
                {
                    Ok(outcome) => {
                        debug!(?outcome, "portal status check finished");
                        StatusCheckState::Completed { outcome }
                    }
                    Err(error) => {
                        warn!(%error, "portal status check failed");
                        StatusCheckState::Failed {
                            error: error.to_string(),
                        }
                    }
                };
                *status_check.borrow_mut() = next;
            }),
        );
    }

    PortalBoot {
        report: PortalBootReport {
            locale: locale.to_string(),
            lookup_form_binding,
            lookup_form_error,
            localization_error,
            status_check_delay_ms: config.status_check_delay_ms,
            status_check: StatusCheckState::Pending,
        },
        status_check,
    }
}
