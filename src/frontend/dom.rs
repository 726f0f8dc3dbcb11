use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, DocumentReadyState, Element, HtmlElement, Window};

use crate::config::{EffectsConfig, CONFIG_ELEMENT_ID};
use crate::error::{EffectError, Result};
use crate::logging::log_event;

pub(crate) fn browser_window() -> Result<Window> {
    window().ok_or_else(|| EffectError::missing("window"))
}

pub(crate) fn document() -> Result<Document> {
    browser_window()?
        .document()
        .ok_or_else(|| EffectError::missing("document"))
}

pub(crate) fn body() -> Result<HtmlElement> {
    document()?.body().ok_or_else(|| EffectError::missing("body"))
}

pub(crate) fn js_error(context: &'static str) -> impl Fn(JsValue) -> EffectError {
    move |value| {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|error| String::from(error.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        EffectError::js(context, message)
    }
}

pub(crate) fn query_opt(selector: &str) -> Option<HtmlElement> {
    document()
        .ok()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub(crate) fn query(selector: &str) -> Result<HtmlElement> {
    query_opt(selector).ok_or_else(|| EffectError::missing(selector))
}

pub(crate) fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Ok(document) = document() else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub(crate) fn query_in<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
}

pub(crate) fn by_id(id: &str) -> Option<HtmlElement> {
    document()
        .ok()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub(crate) fn style_value(element: &HtmlElement, property: &str) -> String {
    element
        .style()
        .get_property_value(property)
        .unwrap_or_default()
}

pub(crate) fn set_class(element: &Element, class: &str, enabled: bool) {
    let _ = element.class_list().toggle_with_force(class, enabled);
}

pub(crate) fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub(crate) fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub(crate) fn ready_state() -> DocumentReadyState {
    document()
        .map(|document| document.ready_state())
        .unwrap_or(DocumentReadyState::Complete)
}

/// Reads the optional JSON config block. Anything unreadable falls back to
/// defaults after a warning.
pub(crate) fn load_config() -> EffectsConfig {
    let Some(raw) = by_id(CONFIG_ELEMENT_ID).and_then(|element| element.text_content()) else {
        return EffectsConfig::default();
    };

    match EffectsConfig::from_json(&raw) {
        Ok(config) => config,
        Err(error) => {
            log_event(
                log::Level::Warn,
                "config_rejected",
                serde_json::json!({ "reason": error.class(), "detail": error.to_string() }),
            );
            EffectsConfig::default()
        }
    }
}
