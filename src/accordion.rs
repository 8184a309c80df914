//! FAQ accordion with animated panel heights.
//!
//! DESIGN
//! ======
//! Each item moves through [`Phase`]. Both `aria-expanded` and the panel's
//! `hidden` flag are derived from the phase, so they cannot disagree: a
//! collapsing panel is still on screen and still reports itself expanded
//! until its height transition ends. Toggling mid-collapse reopens it.
//! Mount writes the closed state to both, whatever the markup said.
//!
//! A height change that goes nowhere (an empty answer, a hidden FAQ section)
//! fires no `transitionend`, so those settle immediately; a timer settles
//! anything whose event is lost.
//!
//! Heights animate between `0px` and the measured `scrollHeight`; once an
//! expand finishes the height goes back to `auto` so the answer can reflow.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, TransitionEvent, Window};

use crate::config::SiteConfig;
use crate::consts::{
    FAQ_CLOSE_TRANSITION, FAQ_OPEN_TRANSITION, FAQ_REVEAL_STAGGER_MS, FAQ_REVEAL_THRESHOLD, FAQ_SETTLE_FALLBACK_MS,
};
use crate::dom;
use crate::error::{SiteError, report};

#[cfg(test)]
#[path = "accordion_test.rs"]
mod accordion_test;

const INIT_MARKER: &str = "data-faq-init";

// =============================================================================
// CORE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl Phase {
    #[must_use]
    pub fn aria_expanded(self) -> bool {
        self != Self::Closed
    }

    #[must_use]
    pub fn hidden(self) -> bool {
        self == Self::Closed
    }
}

/// A DOM update the accordion asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Unhide and grow to the natural height.
    Expand(usize),
    /// Shrink to zero; the panel hides when the transition ends.
    Collapse(usize),
    /// Show at once (reduced motion).
    Show(usize),
    /// Hide at once (reduced motion).
    Hide(usize),
}

/// The end of a height transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone)]
pub struct AccordionCore {
    phases: Vec<Phase>,
    single_open: bool,
    animate: bool,
}

impl AccordionCore {
    #[must_use]
    pub fn new(items: usize, single_open: bool, animate: bool) -> Self {
        Self { phases: vec![Phase::Closed; items], single_open, animate }
    }

    #[must_use]
    pub fn phase(&self, index: usize) -> Phase {
        self.phases.get(index).copied().unwrap_or_default()
    }

    /// Flip item `index`, returning the DOM changes in order.
    pub fn toggle(&mut self, index: usize) -> Vec<Change> {
        match self.phase(index) {
            _ if index >= self.phases.len() => Vec::new(),
            Phase::Opening | Phase::Open => vec![self.close(index)],
            Phase::Closed | Phase::Closing => {
                let mut changes = Vec::new();
                if self.single_open {
                    let others: Vec<usize> = (0..self.phases.len())
                        .filter(|&i| i != index && matches!(self.phases[i], Phase::Opening | Phase::Open))
                        .collect();
                    changes.extend(others.into_iter().map(|i| self.close(i)));
                }
                changes.push(self.open(index));
                changes
            }
        }
    }

    fn open(&mut self, index: usize) -> Change {
        if self.animate {
            self.phases[index] = Phase::Opening;
            Change::Expand(index)
        } else {
            self.phases[index] = Phase::Open;
            Change::Show(index)
        }
    }

    fn close(&mut self, index: usize) -> Change {
        if self.animate {
            self.phases[index] = Phase::Closing;
            Change::Collapse(index)
        } else {
            self.phases[index] = Phase::Closed;
            Change::Hide(index)
        }
    }

    /// The panel's height transition ended. Returns what settled, or `None`
    /// if nothing was animating.
    pub fn settle(&mut self, index: usize) -> Option<Settled> {
        let phase = self.phases.get_mut(index)?;
        match *phase {
            Phase::Opening => {
                *phase = Phase::Open;
                Some(Settled::Expanded)
            }
            Phase::Closing => {
                *phase = Phase::Closed;
                Some(Settled::Collapsed)
            }
            Phase::Open | Phase::Closed => None,
        }
    }

    /// Settle at once when the panel's height would animate from `from_px`
    /// to the same `to_px`; no transition runs, so no end event comes.
    pub fn settle_if_still(&mut self, index: usize, from_px: i32, to_px: i32) -> Option<Settled> {
        if from_px == to_px { self.settle(index) } else { None }
    }
}

/// Keys that toggle a focused question.
#[must_use]
pub fn is_toggle_key(key: &str, code: &str) -> bool {
    key == "Enter" || key == " " || code == "Space"
}

/// Staggered fade-in transition for the item at `index`.
#[must_use]
pub fn reveal_transition(index: usize) -> String {
    let delay = index * FAQ_REVEAL_STAGGER_MS as usize;
    format!("opacity 420ms ease {delay}ms, transform 420ms cubic-bezier(.2,.9,.3,1) {delay}ms")
}

// =============================================================================
// DOM
// =============================================================================

struct FaqItem {
    item: HtmlElement,
    button: HtmlElement,
    panel: HtmlElement,
}

struct Accordion {
    window: Window,
    items: Vec<FaqItem>,
    core: RefCell<AccordionCore>,
    fallbacks: RefCell<Vec<Option<Timeout>>>,
}

impl Accordion {
    fn toggle(self: &Rc<Self>, index: usize) -> Result<(), SiteError> {
        let changes = self.core.borrow_mut().toggle(index);
        for change in changes {
            self.apply(change)?;
        }
        Ok(())
    }

    /// Replace item `index`'s settle timer; dropping the old one cancels it.
    /// A timer that outlives its transition finds nothing to settle.
    fn arm_fallback(self: &Rc<Self>, index: usize) {
        let a = Rc::clone(self);
        let timer = Timeout::new(FAQ_SETTLE_FALLBACK_MS, move || report("faq settle", a.transition_ended(index)));
        if let Some(slot) = self.fallbacks.borrow_mut().get_mut(index) {
            *slot = Some(timer);
        }
    }

    fn settle_if_still(&self, index: usize, from_px: i32, to_px: i32) -> Result<bool, SiteError> {
        let settled = self.core.borrow_mut().settle_if_still(index, from_px, to_px);
        let still = settled.is_some();
        self.finish(index, settled)?;
        Ok(still)
    }

    fn set_expanded(&self, item: &FaqItem, expanded: bool) -> Result<(), SiteError> {
        item.button.set_attribute("aria-expanded", if expanded { "true" } else { "false" })?;
        item.panel.set_hidden(!expanded);
        Ok(())
    }

    fn apply(self: &Rc<Self>, change: Change) -> Result<(), SiteError> {
        match change {
            Change::Show(i) => {
                let Some(item) = self.items.get(i) else { return Ok(()) };
                self.set_expanded(item, true)?;
                dom::set_style(&item.panel, "height", "auto")?;
                dom::clear_style(&item.panel, "opacity")?;
                dom::clear_style(&item.panel, "overflow")
            }
            Change::Hide(i) => {
                let Some(item) = self.items.get(i) else { return Ok(()) };
                self.set_expanded(item, false)?;
                clear_panel(&item.panel)
            }
            Change::Expand(i) => {
                let Some(item) = self.items.get(i) else { return Ok(()) };
                let panel = &item.panel;
                let start = if panel.hidden() { 0 } else { panel.offset_height() };
                self.set_expanded(item, true)?;
                dom::set_style(panel, "overflow", "hidden")?;
                dom::set_style(panel, "height", &format!("{start}px"))?;
                if start == 0 {
                    dom::set_style(panel, "opacity", "0")?;
                }
                let full = panel.scroll_height();
                if self.settle_if_still(i, start, full)? {
                    return Ok(());
                }
                self.arm_fallback(i);
                let panel = panel.clone();
                dom::next_frame(&self.window, move || {
                    report("faq expand", animate_to(&panel, FAQ_OPEN_TRANSITION, &format!("{full}px"), "1"));
                })
            }
            Change::Collapse(i) => {
                let Some(item) = self.items.get(i) else { return Ok(()) };
                let panel = &item.panel;
                let full = panel.scroll_height();
                if self.settle_if_still(i, full, 0)? {
                    return Ok(());
                }
                self.arm_fallback(i);
                dom::set_style(panel, "height", &format!("{full}px"))?;
                dom::set_style(panel, "opacity", "1")?;
                dom::set_style(panel, "overflow", "hidden")?;
                let panel = panel.clone();
                dom::next_frame(&self.window, move || {
                    report("faq collapse", animate_to(&panel, FAQ_CLOSE_TRANSITION, "0px", "0"));
                })
            }
        }
    }

    fn transition_ended(&self, index: usize) -> Result<(), SiteError> {
        let settled = self.core.borrow_mut().settle(index);
        self.finish(index, settled)
    }

    fn finish(&self, index: usize, settled: Option<Settled>) -> Result<(), SiteError> {
        let (Some(settled), Some(item)) = (settled, self.items.get(index)) else {
            return Ok(());
        };
        match settled {
            Settled::Expanded => {
                dom::set_style(&item.panel, "height", "auto")?;
                dom::clear_style(&item.panel, "transition")?;
                dom::clear_style(&item.panel, "overflow")
            }
            Settled::Collapsed => {
                self.set_expanded(item, false)?;
                clear_panel(&item.panel)
            }
        }
    }
}

fn animate_to(panel: &HtmlElement, transition: &str, height: &str, opacity: &str) -> Result<(), SiteError> {
    dom::set_style(panel, "transition", transition)?;
    dom::set_style(panel, "height", height)?;
    dom::set_style(panel, "opacity", opacity)
}

fn clear_panel(panel: &HtmlElement) -> Result<(), SiteError> {
    for property in ["transition", "height", "opacity", "overflow"] {
        dom::clear_style(panel, property)?;
    }
    Ok(())
}

/// Give the question and answer ids and initial ARIA state.
fn prepare(item: &FaqItem, index: usize) -> Result<(), SiteError> {
    if item.panel.id().is_empty() {
        item.panel.set_id(&format!("faq-panel-{index}"));
    }
    if item.button.id().is_empty() {
        item.button.set_id(&format!("faq-btn-{index}"));
    }
    item.button.set_attribute("aria-controls", &item.panel.id())?;
    let closed = Phase::Closed;
    item.button.set_attribute("aria-expanded", if closed.aria_expanded() { "true" } else { "false" })?;
    item.panel.set_hidden(closed.hidden());
    dom::set_style(&item.panel, "overflow", "hidden")
}

fn mount_reveal(window: &Window, doc: &Document, items: &[FaqItem], animate: bool) -> Result<(), SiteError> {
    if !animate || !dom::window_has(window, "IntersectionObserver") {
        for item in items {
            dom::set_style(&item.item, "opacity", "1")?;
            dom::set_style(&item.item, "transform", "none")?;
        }
        return Ok(());
    }
    let observer = dom::intersection_observer(FAQ_REVEAL_THRESHOLD, |target, observer| {
        let Some(item) = dom::into_html(target) else { return };
        let index = item.get_attribute("data-index").and_then(|v| v.parse().ok()).unwrap_or(0);
        let shown = dom::set_style(&item, "transition", &reveal_transition(index))
            .and_then(|()| dom::set_style(&item, "opacity", "1"))
            .and_then(|()| dom::set_style(&item, "transform", "translateY(0)"));
        report("faq reveal", shown);
        observer.unobserve(&item);
    })?;
    for item in dom::query_all(doc, ".faq-item")? {
        observer.observe(&item);
    }
    Ok(())
}

/// Wire every `.faq-item` on the page.
///
/// # Errors
///
/// [`SiteError::MissingElement`] when the page has no FAQ.
pub fn mount(window: &Window, doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let found = dom::query_all(doc, ".faq-item")?;
    if found.is_empty() {
        return Err(SiteError::MissingElement(".faq-item"));
    }
    let animate = !dom::prefers_reduced_motion(window);

    let mut items = Vec::new();
    for (index, el) in found.into_iter().enumerate() {
        let Some(item) = dom::into_html(el) else { continue };
        let button = dom::query_in(&item, ".faq-q")?;
        let panel = dom::query_in(&item, ".faq-a")?;
        let (Some(button), Some(panel)) = (button, panel) else { continue };
        let faq = FaqItem { item, button, panel };
        prepare(&faq, index)?;
        if faq.button.get_attribute(INIT_MARKER).as_deref() == Some("1") {
            continue;
        }
        faq.button.set_attribute(INIT_MARKER, "1")?;
        dom::set_style(&faq.item, "opacity", "0")?;
        dom::set_style(&faq.item, "transform", "translateY(8px)")?;
        faq.item.set_attribute("data-index", &index.to_string())?;
        items.push(faq);
    }

    let accordion = Rc::new(Accordion {
        window: window.clone(),
        core: RefCell::new(AccordionCore::new(items.len(), config.faq_single_open, animate)),
        fallbacks: RefCell::new(items.iter().map(|_| None).collect()),
        items,
    });

    for (i, item) in accordion.items.iter().enumerate() {
        let a = Rc::clone(&accordion);
        dom::listen(&item.button, "click", move |e: Event| {
            e.prevent_default();
            report("faq toggle", a.toggle(i));
        })?;

        let a = Rc::clone(&accordion);
        dom::listen(&item.button, "keydown", move |e: Event| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>() else { return };
            if is_toggle_key(&key.key(), &key.code()) {
                e.prevent_default();
                report("faq toggle", a.toggle(i));
            }
        })?;

        let a = Rc::clone(&accordion);
        dom::listen(&item.panel, "transitionend", move |e: Event| {
            let height = e.dyn_ref::<TransitionEvent>().is_none_or(|t| t.property_name() == "height");
            if height {
                report("faq settle", a.transition_ended(i));
            }
        })?;
    }

    mount_reveal(window, doc, &accordion.items, animate)?;
    log::debug!("faq mounted with {} items", accordion.items.len());
    Ok(())
}
