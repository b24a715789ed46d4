use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, Event, HtmlFormElement, HtmlInputElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::PageConfig;
use crate::error::{PageError, Result};
use crate::form::{FetchTransport, FormView, SignupFields, StatusMessage, SubmissionController};
use crate::reveal::{Intersection, ObserveCapability, RevealTracker};
use crate::scroll::{ClickEvent, ScrollHost, SmoothScroll};

pub fn document() -> Result<Document> {
    web_sys::window()
        .ok_or(PageError::NoWindow)?
        .document()
        .ok_or(PageError::NoDocument)
}

/// Runs `init` once the document has been parsed.
pub fn on_content_loaded(document: &Document, init: impl FnOnce() + 'static) -> Result<()> {
    if document.ready_state() != "loading" {
        init();
        return Ok(());
    }
    let callback = Closure::once(init);
    document.add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Wires every behavior. A failure in one is logged and does not stop the rest.
pub fn enhance(document: &Document, config: &PageConfig) {
    match bind_smooth_scroll(document, config) {
        Ok(count) => info!("smooth scroll bound to {} anchors", count),
        Err(e) => warn!("smooth scroll unavailable: {}", e),
    }
    match observe_reveals(document, config) {
        Ok(count) => info!("watching {} sections for reveal", count),
        Err(e) => warn!("reveal on scroll unavailable: {}", e),
    }
    match bind_signup_form(document, config) {
        Ok(()) => info!("signup form ready"),
        Err(e) => warn!("signup form unavailable: {}", e),
    }
}

#[derive(Clone)]
struct DocumentScroll {
    document: Document,
}

impl ScrollHost for DocumentScroll {
    fn scroll_to_start(&self, id: &str) -> bool {
        let Some(target) = self.document.get_element_by_id(id) else {
            return false;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

struct BrowserClick(MouseEvent);

impl ClickEvent for BrowserClick {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

pub fn bind_smooth_scroll(document: &Document, config: &PageConfig) -> Result<u32> {
    let anchors = document.query_selector_all(config.anchor_selector)?;
    let host = DocumentScroll { document: document.clone() };
    let mut bound = 0;

    for i in 0..anchors.length() {
        let Some(anchor) = anchors.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let host = host.clone();
        let link = anchor.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            let href = link.get_attribute("href").unwrap_or_default();
            SmoothScroll.handle_click(&href, &BrowserClick(e), &host);
        });
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        bound += 1;
    }
    Ok(bound)
}

struct ViewportObserver(IntersectionObserver);

impl ObserveCapability<Element> for ViewportObserver {
    fn observe(&self, target: &Element) {
        self.0.observe(target);
    }

    fn unobserve(&self, target: &Element) {
        self.0.unobserve(target);
    }
}

type SharedTracker = Rc<RefCell<Option<RevealTracker<Element, ViewportObserver>>>>;

pub fn observe_reveals(document: &Document, config: &PageConfig) -> Result<u32> {
    let tracker: SharedTracker = Rc::new(RefCell::new(None));
    let visible_class = config.visible_class;

    let on_intersect = {
        let tracker = tracker.clone();
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let reports = entries.iter().filter_map(|entry| {
                    let entry = entry.dyn_into::<IntersectionObserverEntry>().ok()?;
                    Some(Intersection {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                });
                let revealed = match tracker.borrow_mut().as_mut() {
                    Some(tracker) => tracker.on_entries(reports),
                    None => return,
                };
                for element in revealed {
                    if let Err(e) = element.class_list().add_1(visible_class) {
                        warn!("could not reveal element: {:?}", e);
                    }
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    on_intersect.forget();

    let elements = document.query_selector_all(config.reveal_selector)?;
    let mut watcher = RevealTracker::new(ViewportObserver(observer), config.reveal_threshold);
    for i in 0..elements.length() {
        if let Some(element) = elements.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            watcher.watch(element);
        }
    }
    let count = watcher.pending_count() as u32;
    *tracker.borrow_mut() = Some(watcher);
    Ok(count)
}

/// The landing page's signup form and its `#form-message` line.
pub struct DomForm {
    form: HtmlFormElement,
    name: HtmlInputElement,
    email: HtmlInputElement,
    phone: HtmlInputElement,
    message: Element,
    submit_control_selector: &'static str,
}

impl DomForm {
    pub fn find(document: &Document, config: &PageConfig) -> Result<Self> {
        let form = document
            .query_selector("form")?
            .ok_or_else(|| PageError::MissingElement("form".to_string()))?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| PageError::MissingElement("form".to_string()))?;
        let message = document
            .get_element_by_id(config.form_message_id)
            .ok_or_else(|| PageError::MissingElement(config.form_message_id.to_string()))?;

        Ok(Self {
            form,
            name: input_by_id(document, config.name_input_id)?,
            email: input_by_id(document, config.email_input_id)?,
            phone: input_by_id(document, config.phone_input_id)?,
            message,
            submit_control_selector: config.submit_control_selector,
        })
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }
}

fn input_by_id(document: &Document, id: &str) -> Result<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .ok_or_else(|| PageError::MissingElement(id.to_string()))
}

impl FormView for DomForm {
    fn read_fields(&self) -> SignupFields {
        SignupFields {
            name: self.name.value(),
            email: self.email.value(),
            phone: self.phone.value(),
        }
    }

    fn show_status(&self, status: &StatusMessage) {
        self.message.set_text_content(Some(&status.text));
        self.message.set_class_name(status.kind.css_class());
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn set_busy(&self, busy: bool) {
        let Ok(controls) = self.form.query_selector_all(self.submit_control_selector) else {
            return;
        };
        for i in 0..controls.length() {
            let Some(control) = controls.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            let result = if busy {
                control.set_attribute("disabled", "")
            } else {
                control.remove_attribute("disabled")
            };
            if let Err(e) = result {
                debug!("could not toggle submit control: {:?}", e);
            }
        }
    }
}

pub fn bind_signup_form(document: &Document, config: &PageConfig) -> Result<()> {
    let view = DomForm::find(document, config)?;
    let form = view.form().clone();
    let controller = Rc::new(SubmissionController::new(view, FetchTransport::new(form.clone())));

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        e.prevent_default();
        let controller = controller.clone();
        spawn_local(async move {
            let outcome = controller.submit().await;
            debug!("signup attempt finished: {:?}", outcome);
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}
