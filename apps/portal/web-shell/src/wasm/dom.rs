use super::*;

pub(super) struct BrowserDocument {
    document: web_sys::Document,
}

struct BrowserSubmitEvent(web_sys::Event);

impl SubmitEvent for BrowserSubmitEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

impl BrowserDocument {
    pub(super) fn from_window(window: &web_sys::Window) -> Result<Self, String> {
        let document = window
            .document()
            .ok_or_else(|| "document is unavailable".to_string())?;
        Ok(Self { document })
    }

    fn element(&self, id: &str) -> Result<web_sys::Element, PortalError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| PortalError::missing_element(id))
    }
}

impl PortalDocument for BrowserDocument {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn supported_bindings(&self, id: &str) -> Result<SupportedBindings, PortalError> {
        let element = self.element(id)?;
        Ok(SupportedBindings {
            add_event_listener: has_function(&element, ADD_EVENT_LISTENER_FN),
            attach_event: has_function(&element, ATTACH_EVENT_FN),
        })
    }

    fn bind_submit(
        &self,
        id: &str,
        mechanism: BindingMechanism,
        mut handler: SubmitHandler,
    ) -> Result<(), PortalError> {
        let element = self.element(id)?;
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            handler(&BrowserSubmitEvent(event));
        }));

        let bound = match mechanism {
            BindingMechanism::AddEventListener => element
                .add_event_listener_with_callback(SUBMIT_EVENT, callback.as_ref().unchecked_ref()),
            BindingMechanism::AttachEvent => {
                js_sys::Reflect::get(&element, &JsValue::from_str(ATTACH_EVENT_FN))
                    .and_then(|value| value.dyn_into::<js_sys::Function>())
                    .and_then(|attach| {
                        attach.call2(
                            &element,
                            &JsValue::from_str(LEGACY_SUBMIT_EVENT),
                            callback.as_ref(),
                        )
                    })
                    .map(|_| ())
            }
        };
        bound.map_err(|error| PortalError::EventBinding {
            id: id.to_string(),
            detail: describe_js_error(&error),
        })?;

        LOOKUP_FORM_SUBMIT_HANDLER.with(|slot| {
            *slot.borrow_mut() = Some(callback);
        });
        Ok(())
    }

    fn input_value(&self, id: &str) -> Result<String, PortalError> {
        let input = self
            .element(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PortalError::UnexpectedElement {
                id: id.to_string(),
                expected: "HtmlInputElement",
            })?;
        Ok(input.value())
    }

    fn add_class(&self, id: &str, class_name: &str) -> Result<(), PortalError> {
        self.element(id)?
            .class_list()
            .add_1(class_name)
            .map_err(|error| PortalError::ClassList {
                id: id.to_string(),
                detail: describe_js_error(&error),
            })
    }

    fn remove_class(&self, id: &str, class_name: &str) -> Result<(), PortalError> {
        self.element(id)?
            .class_list()
            .remove_1(class_name)
            .map_err(|error| PortalError::ClassList {
                id: id.to_string(),
                detail: describe_js_error(&error),
            })
    }
}

fn has_function(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map(|value| value.is_function())
        .unwrap_or(false)
}

pub(super) fn describe_js_error(error: &JsValue) -> String {
    let message = error.as_string().or_else(|| {
        error
            .dyn_ref::<js_sys::Error>()
            .and_then(|error| error.message().as_string())
    });
    // `JSON.stringify(undefined)` resolves to `undefined`, not a string.
    let json = js_sys::JSON::stringify(error)
        .ok()
        .and_then(|raw| raw.as_string());
    describe_thrown(message, json)
}
