use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use log::Level;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent,
};

use super::{dom, PageState};
use crate::contact::{
    ButtonView, ContactFields, ContactForm, SubmitOutcome, SubmitPhase, CONTACT_FORM_SELECTOR,
    EMAIL_SELECTOR, MESSAGE_SELECTOR, NAME_SELECTOR, SHAKE_ANIMATION, SHAKE_DURATION_MS,
    SUBMIT_BUTTON_SELECTOR,
};
use crate::error::{EffectError, Result};
use crate::logging::log_event;
use crate::modal::{
    close_all_open, close_modal, hide, open_modal, ModalSurface, ESCAPE_KEY, HIDDEN_DISPLAY,
    LOCKED_OVERFLOW, MODAL_CLASS, SHOWN_DISPLAY, UNLOCKED_OVERFLOW,
};
use crate::projects::{ProjectsVisibility, HIDDEN_PROJECT_SELECTOR, TOGGLE_BUTTON_SELECTOR};

const GLOBAL_EXPORTS: [&str; 3] = ["openModal", "closeModal", "toggleProjects"];

struct DomModals;

impl ModalSurface for DomModals {
    type Modal = HtmlElement;

    fn find(&self, id: &str) -> Option<HtmlElement> {
        dom::by_id(id)
    }

    fn all(&self) -> Vec<HtmlElement> {
        dom::query_all(&format!(".{MODAL_CLASS}"))
    }

    fn is_shown(&self, modal: &HtmlElement) -> bool {
        dom::style_value(modal, "display") == SHOWN_DISPLAY
    }

    fn set_shown(&self, modal: &HtmlElement, shown: bool) {
        let display = if shown { SHOWN_DISPLAY } else { HIDDEN_DISPLAY };
        dom::set_style(modal, "display", display);
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Ok(body) = dom::body() {
            let overflow = if locked { LOCKED_OVERFLOW } else { UNLOCKED_OVERFLOW };
            dom::set_style(&body, "overflow", overflow);
        }
    }
}

pub(super) fn install_modal_dismissal(page: &Rc<PageState>) -> Result<()> {
    let window = dom::browser_window()?;
    let backdrop_click = EventListener::new(&window, "click", |event| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if target.class_list().contains(MODAL_CLASS) {
            hide(&DomModals, &target);
        }
    });

    let escape = EventListener::new(&dom::document()?, "keydown", |event| {
        let is_escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|event| event.key() == ESCAPE_KEY);
        if is_escape {
            close_all_open(&DomModals);
        }
    });

    page.hold(backdrop_click);
    page.hold(escape);
    Ok(())
}

pub(crate) fn toggle_projects() {
    let projects = dom::query_all(HIDDEN_PROJECT_SELECTOR);
    let Some(first) = projects.first() else {
        return;
    };

    let next = ProjectsVisibility::from_display(&dom::style_value(first, "display")).toggled();
    for project in &projects {
        dom::set_style(project, "display", next.display());
    }
    if let Some(button) = dom::query_opt(TOGGLE_BUTTON_SELECTOR) {
        button.set_text_content(Some(next.button_label()));
    }
}

fn export(name: &str, value: &JsValue) -> Result<()> {
    let window = dom::browser_window()?;
    Reflect::set(&window, &JsValue::from_str(name), value)
        .map_err(dom::js_error("export global"))?;
    Ok(())
}

pub(super) fn install_globals() -> Result<()> {
    let open = Closure::<dyn Fn(JsValue)>::new(|id: JsValue| {
        if let Some(id) = id.as_string() {
            open_modal(&DomModals, &id);
        }
    });
    let close = Closure::<dyn Fn(JsValue)>::new(|id: JsValue| {
        if let Some(id) = id.as_string() {
            close_modal(&DomModals, &id);
        }
    });
    let toggle = Closure::<dyn Fn()>::new(toggle_projects);

    export("openModal", &open.into_js_value())?;
    export("closeModal", &close.into_js_value())?;
    export("toggleProjects", &toggle.into_js_value())
}

pub(super) fn remove_globals() {
    let Ok(window) = dom::browser_window() else {
        return;
    };
    for name in GLOBAL_EXPORTS {
        let _ = Reflect::delete_property(&window, &JsValue::from_str(name));
    }
}

fn field_value(form: &Element, selector: &str) -> String {
    if let Some(input) = dom::query_in::<HtmlInputElement>(form, selector) {
        return input.value();
    }
    dom::query_in::<HtmlTextAreaElement>(form, selector)
        .map(|area| area.value())
        .unwrap_or_default()
}

fn read_fields(form: &Element) -> ContactFields {
    ContactFields {
        name: field_value(form, NAME_SELECTOR),
        email: field_value(form, EMAIL_SELECTOR),
        message: field_value(form, MESSAGE_SELECTOR),
    }
}

fn render_button(button: &HtmlButtonElement, view: &ButtonView) {
    if view.icon.is_some() {
        button.set_inner_html(&view.markup());
    } else {
        button.set_text_content(Some(&view.label));
    }
    button.set_disabled(view.disabled);
    dom::set_style(button, "background", view.background);
}

struct ContactWidgets {
    form: HtmlFormElement,
    button: HtmlButtonElement,
    state: RefCell<ContactForm>,
    sending_ms: u32,
    reset_ms: u32,
}

fn shake(form: &HtmlFormElement) {
    dom::set_style(form, "animation", SHAKE_ANIMATION);
    let form = form.clone();
    Timeout::new(SHAKE_DURATION_MS, move || {
        dom::set_style(&form, "animation", "");
    })
    .forget();
}

fn advance_after(widgets: Rc<ContactWidgets>, delay_ms: u32) {
    Timeout::new(delay_ms, move || {
        let phase = widgets.state.borrow_mut().advance();
        let view = widgets.state.borrow().button_view();
        render_button(&widgets.button, &view);

        match phase {
            Some(SubmitPhase::Sent) => {
                let reset_ms = widgets.reset_ms;
                advance_after(widgets, reset_ms);
            }
            Some(SubmitPhase::Idle) => {
                widgets.form.reset();
                log_event(Level::Debug, "contact_form_reset", json!({}));
            }
            Some(SubmitPhase::Sending) | None => {}
        }
    })
    .forget();
}

fn handle_submit(widgets: &Rc<ContactWidgets>) {
    let fields = read_fields(&widgets.form);
    let outcome = widgets.state.borrow_mut().submit(&fields);

    match outcome {
        SubmitOutcome::Rejected { missing } => {
            shake(&widgets.form);
            log_event(
                Level::Info,
                "contact_form_rejected",
                json!({ "missing": missing }),
            );
        }
        SubmitOutcome::Busy => {}
        SubmitOutcome::Accepted => {
            let view = widgets.state.borrow().button_view();
            render_button(&widgets.button, &view);
            advance_after(Rc::clone(widgets), widgets.sending_ms);
            log_event(Level::Info, "contact_form_accepted", json!({}));
        }
    }
}

pub(super) fn install_contact_form(page: &Rc<PageState>) -> Result<()> {
    let form = dom::query(CONTACT_FORM_SELECTOR)?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| EffectError::missing(format!("form{CONTACT_FORM_SELECTOR}")))?;
    let button = dom::query_in::<HtmlButtonElement>(&form, SUBMIT_BUTTON_SELECTOR)
        .ok_or_else(|| EffectError::missing(SUBMIT_BUTTON_SELECTOR))?;

    let original_label = button.text_content().unwrap_or_default();
    let widgets = Rc::new(ContactWidgets {
        form: form.clone(),
        button,
        state: RefCell::new(ContactForm::new(original_label.trim())),
        sending_ms: page.config.contact_sending_ms,
        reset_ms: page.config.contact_reset_ms,
    });

    let listener = EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            handle_submit(&widgets);
        },
    );
    page.hold(listener);
    Ok(())
}
