//! Slide-in "request a sample" panel.
//!
//! While open the panel owns the keyboard: `Tab` cycles through its visible
//! controls, focus that escapes is pulled back, and `Escape` closes it. On
//! close, focus returns to whatever had it before. The open panel is also
//! reachable from the host page through [`open_sample_panel`] and
//! [`close_sample_panel`].

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, FormData, HtmlElement, HtmlFormElement, KeyboardEvent, Node,
};

use crate::consts::{ERROR_COLOR, FOCUSABLE_SELECTOR, PANEL_CLOSE_AFTER_SUBMIT_MS, PANEL_FOCUS_DELAY_MS, SUCCESS_COLOR};
use crate::dom;
use crate::error::{SiteError, report};

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

const OPEN: &str = "open";
const INIT_MARKER: &str = "data-sample-init";

pub const MSG_SAMPLE_MISSING: &str = "Please fill name and email.";
pub const MSG_SAMPLE_SENT: &str = "Request sent — we will contact you shortly.";

thread_local! {
    static PANEL: RefCell<Option<Rc<SamplePanel>>> = const { RefCell::new(None) };
}

// =============================================================================
// CORE
// =============================================================================

/// Where keyboard focus currently sits relative to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPosition {
    /// Focus is somewhere outside the panel.
    Outside,
    /// Focus is on the focusable control at this index.
    At(usize),
    /// Focus is inside the panel but on nothing in the focusable list.
    Elsewhere,
}

/// A focus correction for a `Tab` press or an escaped focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMove {
    pub index: usize,
    /// Whether the browser's own `Tab` handling must be suppressed.
    pub prevent_default: bool,
}

/// Decide where focus goes on a keypress while the panel is open.
///
/// `count` is the number of visible focusable controls.
#[must_use]
pub fn trap_focus(count: usize, position: FocusPosition, is_tab: bool, shift: bool) -> Option<FocusMove> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match position {
        FocusPosition::Outside => Some(FocusMove { index: 0, prevent_default: false }),
        FocusPosition::At(0) if is_tab && shift => Some(FocusMove { index: last, prevent_default: true }),
        FocusPosition::At(i) if is_tab && !shift && i == last => Some(FocusMove { index: 0, prevent_default: true }),
        FocusPosition::At(_) | FocusPosition::Elsewhere => None,
    }
}

/// Open/closed state; transitions report whether anything changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    open: bool,
}

impl PanelState {
    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Check the sample form's required fields.
///
/// # Errors
///
/// Returns the message to show when name or email is blank.
pub fn validate_request(name: &str, email: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() || email.trim().is_empty() { Err(MSG_SAMPLE_MISSING) } else { Ok(()) }
}

// =============================================================================
// DOM
// =============================================================================

struct SamplePanel {
    doc: Document,
    panel: HtmlElement,
    state: RefCell<PanelState>,
    last_active: RefCell<Option<Element>>,
    focus_timer: RefCell<Option<Timeout>>,
    close_timer: RefCell<Option<Timeout>>,
}

impl SamplePanel {
    fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    fn lock_scroll(&self, locked: bool) -> Result<(), SiteError> {
        let roots = [self.doc.document_element().and_then(dom::into_html), self.doc.body()];
        for root in roots.iter().flatten() {
            if locked { dom::set_style(root, "overflow", "hidden")? } else { dom::clear_style(root, "overflow")? }
        }
        Ok(())
    }

    fn focus_first(&self) -> Result<(), SiteError> {
        if let Some(first) = dom::query_in(&self.panel, FOCUSABLE_SELECTOR)? {
            first.focus()?;
        }
        Ok(())
    }

    /// Focusable controls that are actually rendered.
    fn focusables(&self) -> Result<Vec<HtmlElement>, SiteError> {
        Ok(dom::query_all_in(&self.panel, FOCUSABLE_SELECTOR)?
            .into_iter()
            .filter_map(dom::into_html)
            .filter(|el| el.offset_parent().is_some())
            .collect())
    }

    fn open(self: &Rc<Self>) -> Result<(), SiteError> {
        if !self.state.borrow_mut().open() {
            return Ok(());
        }
        *self.last_active.borrow_mut() = self.doc.active_element();
        dom::set_class(&self.panel, OPEN, true)?;
        self.panel.set_attribute("aria-hidden", "false")?;
        self.lock_scroll(true)?;
        let panel = Rc::clone(self);
        let timer = Timeout::new(PANEL_FOCUS_DELAY_MS, move || report("focus sample panel", panel.focus_first()));
        *self.focus_timer.borrow_mut() = Some(timer);
        Ok(())
    }

    fn close(&self) -> Result<(), SiteError> {
        if !self.state.borrow_mut().close() {
            return Ok(());
        }
        self.focus_timer.borrow_mut().take();
        dom::set_class(&self.panel, OPEN, false)?;
        self.panel.set_attribute("aria-hidden", "true")?;
        self.lock_scroll(false)?;
        let previous = self.last_active.borrow_mut().take().and_then(dom::into_html);
        if let Some(previous) = previous {
            previous.focus()?;
        }
        Ok(())
    }

    fn on_key(&self, event: &KeyboardEvent) -> Result<(), SiteError> {
        if !self.is_open() {
            return Ok(());
        }
        let key = event.key();
        if key == "Escape" {
            event.prevent_default();
            return self.close();
        }
        if key != "Tab" {
            return Ok(());
        }
        let focusables = self.focusables()?;
        let active = self.doc.active_element();
        let inside = active.as_ref().is_some_and(|el| self.panel.contains(Some(&**el)));
        let position = match active {
            Some(el) if inside => focusables
                .iter()
                .position(|f| **f == el)
                .map_or(FocusPosition::Elsewhere, FocusPosition::At),
            _ => FocusPosition::Outside,
        };
        let Some(step) = trap_focus(focusables.len(), position, true, event.shift_key()) else {
            return Ok(());
        };
        if step.prevent_default {
            event.prevent_default();
        }
        match focusables.get(step.index) {
            Some(target) => Ok(target.focus()?),
            None => Ok(()),
        }
    }

    fn on_focus_in(&self, event: &Event) -> Result<(), SiteError> {
        if !self.is_open() {
            return Ok(());
        }
        let escaped = event
            .target()
            .and_then(|t| t.dyn_into::<Node>().ok())
            .is_some_and(|node| !self.panel.contains(Some(&node)));
        if escaped {
            event.stop_propagation();
            self.focus_first()?;
        }
        Ok(())
    }

    fn submit(self: &Rc<Self>, form: &HtmlFormElement, feedback: Option<&HtmlElement>) -> Result<(), SiteError> {
        let data = FormData::new_with_form(form)?;
        let name = data.get("name").as_string().unwrap_or_default();
        let email = data.get("email").as_string().unwrap_or_default();
        let verdict = validate_request(&name, &email);
        if let Some(feedback) = feedback {
            let (text, color) = match verdict {
                Err(message) => (message, ERROR_COLOR),
                Ok(()) => (MSG_SAMPLE_SENT, SUCCESS_COLOR),
            };
            feedback.set_text_content(Some(text));
            dom::set_style(feedback, "color", color)?;
        }
        if verdict.is_err() {
            return Ok(());
        }
        let panel = Rc::clone(self);
        let form = form.clone();
        let timer = Timeout::new(PANEL_CLOSE_AFTER_SUBMIT_MS, move || {
            form.reset();
            report("close sample panel", panel.close());
        });
        *self.close_timer.borrow_mut() = Some(timer);
        Ok(())
    }
}

/// Keep `aria-hidden` false while the panel is open, whatever else touches it.
fn guard_aria_hidden(panel: &Rc<SamplePanel>) -> Result<(), SiteError> {
    let p = Rc::clone(panel);
    dom::attribute_observer(&panel.panel, move |name| {
        if name == "aria-hidden" && p.is_open() && p.panel.get_attribute("aria-hidden").as_deref() == Some("true") {
            report("restore aria-hidden", p.panel.set_attribute("aria-hidden", "false").map_err(SiteError::from));
        }
    })?;
    Ok(())
}

/// Wire `#sample-panel`, its openers, close buttons and form.
///
/// # Errors
///
/// [`SiteError::MissingElement`] when the page has no sample panel.
pub fn mount(doc: &Document) -> Result<(), SiteError> {
    let el: HtmlElement = dom::by_id(doc, "sample-panel")?;
    if el.has_attribute(INIT_MARKER) {
        return Ok(());
    }
    el.set_attribute(INIT_MARKER, "1")?;

    let panel = Rc::new(SamplePanel {
        doc: doc.clone(),
        panel: el,
        state: RefCell::new(PanelState::default()),
        last_active: RefCell::new(None),
        focus_timer: RefCell::new(None),
        close_timer: RefCell::new(None),
    });

    let p = Rc::clone(&panel);
    dom::listen(doc, "keydown", move |e: Event| {
        if let Some(key) = e.dyn_ref::<KeyboardEvent>() {
            report("sample panel key", p.on_key(key));
        }
    })?;
    let p = Rc::clone(&panel);
    dom::listen_capture(doc, "focus", move |e: Event| report("sample panel focus", p.on_focus_in(&e)))?;

    let p = Rc::clone(&panel);
    dom::listen(&panel.panel, "click", move |e: Event| {
        if dom::event_element(&e).is_some_and(|t| t == *p.panel) {
            report("close sample panel", p.close());
        }
    })?;
    if let Some(inner) = panel.panel.query_selector(".sample-inner")? {
        dom::listen(&inner, "click", |e: Event| e.stop_propagation())?;
    }

    for id in ["sample-close", "sample-cancel"] {
        if let Some(button) = doc.get_element_by_id(id) {
            let p = Rc::clone(&panel);
            dom::listen(&button, "click", move |e: Event| {
                e.prevent_default();
                report("close sample panel", p.close());
            })?;
        }
    }

    for opener in dom::query_all(doc, "[data-open-sample]")? {
        let p = Rc::clone(&panel);
        dom::listen(&opener, "click", move |e: Event| {
            e.prevent_default();
            e.stop_propagation();
            report("open sample panel", p.open());
        })?;
    }
    if let Some(hero) = doc.get_element_by_id("heroRequestSample") {
        let p = Rc::clone(&panel);
        dom::listen(&hero, "click", move |e: Event| {
            e.prevent_default();
            report("open sample panel", p.open());
        })?;
    }

    if let Ok(form) = dom::by_id::<HtmlFormElement>(doc, "sample-form") {
        let feedback = dom::by_id::<HtmlElement>(doc, "sample-feedback").ok();
        let p = Rc::clone(&panel);
        let f = form.clone();
        dom::listen(&form, "submit", move |e: Event| {
            e.prevent_default();
            report("sample request", p.submit(&f, feedback.as_ref()));
        })?;
    }

    guard_aria_hidden(&panel)?;
    PANEL.with(|slot| *slot.borrow_mut() = Some(panel));
    Ok(())
}

fn with_panel(action: impl FnOnce(&Rc<SamplePanel>) -> Result<(), SiteError>) {
    PANEL.with(|slot| {
        if let Some(panel) = slot.borrow().as_ref() {
            report("sample panel", action(panel));
        }
    });
}

/// Open the sample panel from host JavaScript.
#[wasm_bindgen]
pub fn open_sample_panel() {
    with_panel(SamplePanel::open);
}

/// Close the sample panel from host JavaScript.
#[wasm_bindgen]
pub fn close_sample_panel() {
    with_panel(|panel| panel.close());
}
