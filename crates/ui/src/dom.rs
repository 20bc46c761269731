//! Null-safe DOM helpers
//!
//! Every lookup returns `Option`; a missing element is never an error.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement};

/// Get document helper
pub fn get_document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Look up an element by id
pub fn element_by_id(id: &str) -> Option<Element> {
    get_document()?.get_element_by_id(id)
}

/// First element found among `ids`, in order
pub fn first_element_by_id<S: AsRef<str>>(ids: &[S]) -> Option<Element> {
    let doc = get_document()?;
    ids.iter().find_map(|id| doc.get_element_by_id(id.as_ref()))
}

/// First match of `selector` in the whole document
pub fn query(selector: &str) -> Option<Element> {
    get_document()?.query_selector(selector).ok().flatten()
}

/// First match of `selector` below `parent`
pub fn query_in(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok().flatten()
}

/// Set an inline style property, ignoring elements that are not `HtmlElement`
pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html_el) = el.dyn_ref::<HtmlElement>() {
        let _ = html_el.style().set_property(property, value);
    }
}

/// Client size of `el` in CSS pixels, zero while hidden
pub fn client_size(el: &Element) -> (f64, f64) {
    (f64::from(el.client_width()), f64::from(el.client_height()))
}

/// Substitute `default` for each dimension that is zero or not finite
pub fn size_or_default(width: f64, height: f64, default: f64) -> (f64, f64) {
    let pick = |v: f64| if v.is_finite() && v > 0.0 { v } else { default };
    (pick(width), pick(height))
}

/// `document.readyState` value before the DOM is parsed
fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Run `f` once the DOM is parsed: now if already past `loading`,
/// otherwise on `DOMContentLoaded`
pub fn on_dom_ready(f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let doc = get_document().ok_or("No document")?;
    if is_loading(&doc.ready_state()) {
        let cb = Closure::once(Box::new(f) as Box<dyn FnOnce()>);
        doc.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())?;
        cb.forget();
    } else {
        f();
    }
    Ok(())
}
