//! Thin helpers over `web-sys` shared by every widget.
//!
//! Lookups return [`SiteError::MissingElement`] so a mount function can bail
//! out with `?` when its markup is absent. Listeners live for the lifetime of
//! the page, so their closures are leaked once attached.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MutationObserver,
    MutationObserverInit, MutationRecord, NodeList, Window,
};

use crate::error::SiteError;

/// The global `window`.
///
/// # Errors
///
/// Fails outside a browser context.
pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::MissingElement("window"))
}

/// The global `document`.
///
/// # Errors
///
/// Fails outside a browser context.
pub fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or(SiteError::MissingElement("document"))
}

/// Look up an element by id and cast it to `T`.
///
/// # Errors
///
/// [`SiteError::MissingElement`] when absent or of a different element type.
pub fn by_id<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, SiteError> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or(SiteError::MissingElement(id))
}

/// First element matching `selector` anywhere in the document.
///
/// # Errors
///
/// [`SiteError::MissingElement`] when nothing matches.
pub fn query(doc: &Document, selector: &'static str) -> Result<Element, SiteError> {
    doc.query_selector(selector)?.ok_or(SiteError::MissingElement(selector))
}

/// First matching element, as an [`HtmlElement`].
///
/// # Errors
///
/// [`SiteError::MissingElement`] when nothing matches.
pub fn query_html(doc: &Document, selector: &'static str) -> Result<HtmlElement, SiteError> {
    into_html(query(doc, selector)?).ok_or(SiteError::MissingElement(selector))
}

/// All elements matching `selector` in the document.
///
/// # Errors
///
/// Fails only on an invalid selector.
pub fn query_all(doc: &Document, selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(&doc.query_selector_all(selector)?))
}

/// All elements matching `selector` below `root`.
///
/// # Errors
///
/// Fails only on an invalid selector.
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(&root.query_selector_all(selector)?))
}

/// First element matching `selector` below `root`, if any.
///
/// # Errors
///
/// Fails only on an invalid selector.
pub fn query_in(root: &Element, selector: &str) -> Result<Option<HtmlElement>, SiteError> {
    Ok(root.query_selector(selector)?.and_then(into_html))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Downcast an element to [`HtmlElement`]; SVG and other foreign elements yield `None`.
#[must_use]
pub fn into_html(el: Element) -> Option<HtmlElement> {
    el.dyn_into::<HtmlElement>().ok()
}

// ── Classes, attributes, styles ─────────────────────────────────

/// Add or remove `class` on `el`.
///
/// # Errors
///
/// Fails if the class token is invalid.
pub fn set_class(el: &Element, class: &str, on: bool) -> Result<(), SiteError> {
    let list = el.class_list();
    if on { list.add_1(class)? } else { list.remove_1(class)? }
    Ok(())
}

#[must_use]
pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Set one inline style property.
///
/// # Errors
///
/// Fails if the declaration is read-only.
pub fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), SiteError> {
    el.style().set_property(property, value)?;
    Ok(())
}

/// Remove one inline style property, restoring the stylesheet value.
///
/// # Errors
///
/// Fails if the declaration is read-only.
pub fn clear_style(el: &HtmlElement, property: &str) -> Result<(), SiteError> {
    el.style().remove_property(property)?;
    Ok(())
}

/// Whether a media query currently matches.
#[must_use]
pub fn media_matches(window: &Window, query: &str) -> bool {
    matches!(window.match_media(query), Ok(Some(list)) if list.matches())
}

/// Whether the user asked the system to minimize motion.
#[must_use]
pub fn prefers_reduced_motion(window: &Window) -> bool {
    media_matches(window, "(prefers-reduced-motion: reduce)")
}

/// Whether `window` exposes a property (the `'name' in window` test).
#[must_use]
pub fn window_has(window: &Window, name: &str) -> bool {
    matches!(js_sys::Reflect::has(window, &JsValue::from_str(name)), Ok(true))
}

/// `window.innerWidth` in CSS pixels, or 0 when unavailable.
#[must_use]
pub fn inner_width(window: &Window) -> f64 {
    window.inner_width().map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
}

/// `window.innerHeight` in CSS pixels, or 0 when unavailable.
#[must_use]
pub fn inner_height(window: &Window) -> f64 {
    window.inner_height().map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
}

/// The element an event was dispatched to, if it is an element.
#[must_use]
pub fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

// ── Listeners ───────────────────────────────────────────────────

/// Attach `handler` to `event` on `target` for the lifetime of the page.
///
/// # Errors
///
/// Fails if the browser rejects the listener.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SiteError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], but in the capture phase.
///
/// # Errors
///
/// Fails if the browser rejects the listener.
pub fn listen_capture<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SiteError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback_and_bool(event, closure.as_ref().unchecked_ref(), true)?;
    closure.forget();
    Ok(())
}

/// Attach a handler that the browser removes after its first call.
///
/// # Errors
///
/// Fails if the browser rejects the listener.
pub fn listen_once<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SiteError>
where
    F: FnOnce(Event) + 'static,
{
    let closure = Closure::once(handler);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

/// Run `callback` on the next animation frame.
///
/// # Errors
///
/// Fails if the frame request is rejected.
pub fn next_frame<F>(window: &Window, callback: F) -> Result<(), SiteError>
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once(callback);
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `callback` once the DOM has been parsed.
///
/// # Errors
///
/// Fails if the listener cannot be attached.
pub fn on_ready<F>(doc: &Document, callback: F) -> Result<(), SiteError>
where
    F: FnOnce() + 'static,
{
    let state = doc.ready_state();
    if state == "interactive" || state == "complete" {
        callback();
        Ok(())
    } else {
        listen_once(doc, "DOMContentLoaded", move |_| callback())
    }
}

// ── Observers ───────────────────────────────────────────────────

/// Build an intersection observer that calls `on_visible` for every entry
/// that becomes visible past `threshold`.
///
/// # Errors
///
/// Fails if the browser rejects the observer options.
pub fn intersection_observer<F>(threshold: f64, mut on_visible: F) -> Result<IntersectionObserver, SiteError>
where
    F: FnMut(Element, &IntersectionObserver) + 'static,
{
    let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_visible(entry.target(), &observer);
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)?;
    closure.forget();
    Ok(observer)
}

/// Call `on_change` with the name of every attribute changed on `target`.
///
/// # Errors
///
/// Fails if the observer cannot be created or attached.
pub fn attribute_observer<F>(target: &Element, mut on_change: F) -> Result<MutationObserver, SiteError>
where
    F: FnMut(&str) + 'static,
{
    let closure = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |records: js_sys::Array, _observer: MutationObserver| {
            let records = records.iter().filter_map(|r| r.dyn_into::<MutationRecord>().ok());
            for name in records.filter(|r| r.type_() == "attributes").filter_map(|r| r.attribute_name()) {
                on_change(&name);
            }
        },
    );
    let observer = MutationObserver::new(closure.as_ref().unchecked_ref())?;
    closure.forget();
    let options = MutationObserverInit::new();
    options.set_attributes(true);
    observer.observe_with_options(target, &options)?;
    Ok(observer)
}

/// Fetch `src` off-screen and call `on_loaded` once it has arrived.
///
/// # Errors
///
/// Fails if the loader image cannot be created.
pub fn preload_image<F>(src: &str, on_loaded: F) -> Result<(), SiteError>
where
    F: FnOnce() + 'static,
{
    let loader = HtmlImageElement::new()?;
    let closure = Closure::once(on_loaded);
    loader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    loader.set_src(src);
    Ok(())
}
