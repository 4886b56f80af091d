//! Small DOM helpers shared by the carousel host, the registry and the page
//! bootstrap.
//!
//! DOM calls that return `Result` are either propagated as
//! [`CarouselError`] or logged at debug level here; nothing panics.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent, Node, NodeList, TouchEvent};

use crate::error::CarouselError;

/// Collect the element nodes of a `NodeList`, in document order.
#[must_use]
pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

/// First element matching any selector, trying the selectors in order.
///
/// # Errors
///
/// Returns [`CarouselError::Dom`] for an invalid selector.
pub fn first_match(root: &Element, selectors: &[&str]) -> Result<Option<Element>, CarouselError> {
    for selector in selectors {
        if let Some(element) = root.query_selector(selector)? {
            return Ok(Some(element));
        }
    }
    Ok(None)
}

/// All matches of the first selector that matches anything.
///
/// # Errors
///
/// Returns [`CarouselError::Dom`] for an invalid selector.
pub fn first_match_all(root: &Element, selectors: &[&str]) -> Result<Vec<Element>, CarouselError> {
    for selector in selectors {
        let found = elements(&root.query_selector_all(selector)?);
        if !found.is_empty() {
            return Ok(found);
        }
    }
    Ok(Vec::new())
}

/// Whether the event's target lies inside `node` (inclusive).
#[must_use]
pub fn event_within(event: &Event, node: &Node) -> bool {
    event
        .target()
        .is_some_and(|target| target.dyn_ref::<Node>().is_some_and(|target| node.contains(Some(target))))
}

/// Set an inline style property, logging failures.
pub fn set_style(element: &Element, property: &str, value: &str) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        log::debug!("cannot style non-HTML element for {property}");
        return;
    };
    if let Err(err) = element.style().set_property(property, value) {
        log::debug!("failed to set {property}: {err:?}");
    }
}

/// Remove an inline style property, logging failures.
pub fn clear_style(element: &Element, property: &str) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    if let Err(err) = element.style().remove_property(property) {
        log::debug!("failed to clear {property}: {err:?}");
    }
}

/// Add or remove a class, logging failures.
pub fn set_class(element: &Element, class: &str, enabled: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, enabled) {
        log::debug!("failed to toggle class {class}: {err:?}");
    }
}

/// Append `child` to `parent`, logging failures. Returns whether it worked.
pub fn append(parent: &Node, child: &Node) -> bool {
    match parent.append_child(child) {
        Ok(_) => true,
        Err(err) => {
            log::debug!("failed to append node: {err:?}");
            false
        }
    }
}

/// Deep copy of an element, or `None` if the browser refused.
#[must_use]
pub fn deep_clone(element: &Element) -> Option<Element> {
    match element.clone_node_with_deep(true) {
        Ok(node) => node.dyn_ref::<Element>().cloned(),
        Err(err) => {
            log::debug!("failed to clone slide: {err:?}");
            None
        }
    }
}

/// Current viewport width in CSS pixels (0 outside a browser window).
#[must_use]
pub fn viewport_width() -> f64 {
    let Some(window) = web_sys::window() else {
        return 0.0;
    };
    match window.inner_width() {
        Ok(width) => width.as_f64().unwrap_or(0.0),
        Err(err) => {
            log::debug!("failed to read viewport width: {err:?}");
            0.0
        }
    }
}

/// Wall-clock milliseconds, used for the post-swipe click guard.
#[must_use]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Horizontal screen coordinate of the first changed touch.
#[must_use]
pub fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_x()))
}

/// Horizontal client coordinate of a mouse event.
#[must_use]
pub fn mouse_x(event: &Event) -> Option<f64> {
    event.dyn_ref::<MouseEvent>().map(|event| f64::from(event.client_x()))
}
