//! Header navigation: mobile overlay, mobile accordion, desktop dropdowns.
//!
//! DESIGN
//! ======
//! Open/closed state for the overlay and the desktop dropdowns lives in small
//! cores ([`OverlayState`], [`MenuCore`]) and is pushed to the DOM after every
//! change, so the `open` class never drifts from the state the handlers see.
//! Desktop items close on a delay after the pointer leaves them; each item
//! owns at most one pending [`Timeout`], and replacing or dropping it cancels
//! the previous one.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, Window};

use crate::config::SiteConfig;
use crate::consts::HAMBURGER_BAR_SHIFT_PX;
use crate::dom;
use crate::error::{SiteError, report, tolerate_missing};

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

const OPEN: &str = "open";

// =============================================================================
// CORE
// =============================================================================

/// Open state of the full-screen mobile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub open: bool,
}

impl OverlayState {
    /// Flip the overlay, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

/// Which desktop dropdowns are open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuCore {
    open: Vec<bool>,
}

impl MenuCore {
    #[must_use]
    pub fn new(items: usize) -> Self {
        Self { open: vec![false; items] }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    /// Click on a trigger: every other item closes, this one flips.
    ///
    /// Returns whether the item is open afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(was_open) = self.open.get(index).copied() else {
            return false;
        };
        self.close_all();
        self.open[index] = !was_open;
        !was_open
    }

    /// Keyboard open: this item opens and the others close.
    pub fn open_only(&mut self, index: usize) {
        if index < self.open.len() {
            self.close_all();
            self.open[index] = true;
        }
    }

    pub fn close(&mut self, index: usize) {
        if let Some(slot) = self.open.get_mut(index) {
            *slot = false;
        }
    }

    pub fn close_all(&mut self) {
        self.open.iter_mut().for_each(|slot| *slot = false);
    }

    /// Indices of the open items.
    pub fn open_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.open.iter().enumerate().filter(|(_, open)| **open).map(|(i, _)| i)
    }
}

/// Which navigation the current viewport shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLayout {
    Mobile,
    Desktop,
}

impl NavLayout {
    /// The breakpoint itself still counts as mobile.
    #[must_use]
    pub fn for_width(width: f64, breakpoint: f64) -> Self {
        if width <= breakpoint { Self::Mobile } else { Self::Desktop }
    }
}

/// Inline style for one of the three hamburger bars while the overlay is open.
///
/// Returns `(transform, opacity)`; `None` leaves that property untouched.
#[must_use]
pub fn hamburger_bar_style(index: usize) -> (Option<String>, Option<&'static str>) {
    let shift = HAMBURGER_BAR_SHIFT_PX;
    match index {
        0 => (Some(format!("translateY({shift}px) rotate(45deg)")), None),
        1 => (None, Some("0")),
        2 => (Some(format!("translateY(-{shift}px) rotate(-45deg)")), None),
        _ => (None, None),
    }
}

/// Keys that open a focused desktop trigger.
#[must_use]
pub fn is_open_key(key: &str) -> bool {
    matches!(key, "ArrowDown" | "Enter" | " ")
}

// =============================================================================
// MOBILE OVERLAY
// =============================================================================

struct Overlay {
    overlay: HtmlElement,
    hamburger: Option<HtmlElement>,
    body: Option<HtmlElement>,
    state: RefCell<OverlayState>,
}

impl Overlay {
    fn set_open(&self, open: bool) -> Result<(), SiteError> {
        self.state.borrow_mut().open = open;
        dom::set_class(&self.overlay, OPEN, open)?;
        self.overlay.set_attribute("aria-hidden", if open { "false" } else { "true" })?;
        if let Some(body) = &self.body {
            if open { dom::set_style(body, "overflow", "hidden")? } else { dom::clear_style(body, "overflow")? }
        }
        let Some(hamburger) = &self.hamburger else {
            return Ok(());
        };
        hamburger.set_attribute("aria-expanded", if open { "true" } else { "false" })?;
        let bars = dom::query_all_in(hamburger, ".lines span")?;
        for (i, bar) in bars.into_iter().filter_map(dom::into_html).enumerate() {
            if open {
                let (transform, opacity) = hamburger_bar_style(i);
                if let Some(transform) = transform {
                    dom::set_style(&bar, "transform", &transform)?;
                }
                if let Some(opacity) = opacity {
                    dom::set_style(&bar, "opacity", opacity)?;
                }
            } else {
                dom::clear_style(&bar, "transform")?;
                dom::clear_style(&bar, "opacity")?;
            }
        }
        Ok(())
    }

    fn toggle(&self) -> Result<(), SiteError> {
        let open = self.state.borrow_mut().toggle();
        self.set_open(open)
    }
}

fn mount_overlay(doc: &Document) -> Result<Rc<Overlay>, SiteError> {
    let overlay = Rc::new(Overlay {
        overlay: dom::by_id(doc, "mobileOverlay")?,
        hamburger: dom::by_id(doc, "hamburger").ok(),
        body: doc.body(),
        state: RefCell::new(OverlayState::default()),
    });

    if let Some(hamburger) = &overlay.hamburger {
        let o = Rc::clone(&overlay);
        dom::listen(hamburger, "click", move |_| report("toggle mobile menu", o.toggle()))?;
    }
    if let Ok(close) = dom::by_id::<HtmlElement>(doc, "mobileClose") {
        let o = Rc::clone(&overlay);
        dom::listen(&close, "click", move |_| report("close mobile menu", o.set_open(false)))?;
    }
    let o = Rc::clone(&overlay);
    dom::listen(&overlay.overlay, "click", move |e: Event| {
        let on_backdrop = dom::event_element(&e).is_some_and(|t| t == *o.overlay);
        if on_backdrop {
            report("close mobile menu", o.set_open(false));
        }
    })?;
    Ok(overlay)
}

/// `[data-toggle]` opens its `.item`, `[data-subtoggle]` its `.sub-item`.
fn mount_mobile_accordion(doc: &Document) -> Result<(), SiteError> {
    for (selector, parent) in [("[data-toggle]", ".item"), ("[data-subtoggle]", ".sub-item")] {
        for toggle in dom::query_all(doc, selector)? {
            let target = toggle.clone();
            dom::listen(&toggle, "click", move |e: Event| {
                e.prevent_default();
                if let Ok(Some(item)) = target.closest(parent) {
                    report("toggle mobile section", item.class_list().toggle(OPEN).map(|_| ()).map_err(SiteError::from));
                }
            })?;
        }
    }
    Ok(())
}

// =============================================================================
// DESKTOP DROPDOWNS
// =============================================================================

struct DropdownItem {
    li: Element,
    trigger: HtmlElement,
    dropdown: Element,
}

struct DesktopMenu {
    items: Vec<DropdownItem>,
    core: RefCell<MenuCore>,
    timers: RefCell<Vec<Option<Timeout>>>,
    close_delay_ms: u32,
}

impl DesktopMenu {
    /// Push the core's open flags onto the `<li>` classes.
    fn sync(&self) -> Result<(), SiteError> {
        let core = self.core.borrow();
        for (i, item) in self.items.iter().enumerate() {
            dom::set_class(&item.li, OPEN, core.is_open(i))?;
        }
        Ok(())
    }

    fn focus_first(&self, index: usize) -> Result<(), SiteError> {
        if let Some(item) = self.items.get(index) {
            if let Some(first) = dom::query_in(&item.dropdown, "a, button")? {
                first.focus()?;
            }
        }
        Ok(())
    }

    fn toggle(&self, index: usize) -> Result<(), SiteError> {
        let opened = self.core.borrow_mut().toggle(index);
        self.sync()?;
        if opened { self.focus_first(index) } else { Ok(()) }
    }

    fn open(&self, index: usize) -> Result<(), SiteError> {
        self.core.borrow_mut().open_only(index);
        self.sync()?;
        self.focus_first(index)
    }

    fn close_all(&self) -> Result<(), SiteError> {
        self.core.borrow_mut().close_all();
        self.sync()
    }

    fn clear_close_timer(&self, index: usize) {
        if let Some(slot) = self.timers.borrow_mut().get_mut(index) {
            slot.take();
        }
    }

    fn start_close_timer(self: &Rc<Self>, index: usize) {
        if !self.core.borrow().is_open(index) {
            return;
        }
        let menu = Rc::clone(self);
        let timeout = Timeout::new(self.close_delay_ms, move || {
            menu.core.borrow_mut().close(index);
            report("close dropdown", menu.sync());
            menu.clear_close_timer(index);
        });
        if let Some(slot) = self.timers.borrow_mut().get_mut(index) {
            *slot = Some(timeout);
        }
    }
}

fn mount_desktop(doc: &Document, config: &SiteConfig) -> Result<Rc<DesktopMenu>, SiteError> {
    let nav = dom::query(doc, ".nav-desktop")?;
    let mut items = Vec::new();
    for li in dom::query_all_in(&nav, ":scope > ul > li")? {
        let trigger = dom::query_in(&li, "a[aria-haspopup=\"true\"], a")?;
        let dropdown = li.query_selector(".dropdown")?;
        if let (Some(trigger), Some(dropdown)) = (trigger, dropdown) {
            items.push(DropdownItem { li, trigger, dropdown });
        }
    }

    let menu = Rc::new(DesktopMenu {
        core: RefCell::new(MenuCore::new(items.len())),
        timers: RefCell::new((0..items.len()).map(|_| None).collect()),
        items,
        close_delay_ms: config.nav_close_delay_ms,
    });

    for (i, item) in menu.items.iter().enumerate() {
        let m = Rc::clone(&menu);
        dom::listen(&item.trigger, "click", move |e: Event| {
            e.prevent_default();
            e.stop_propagation();
            report("toggle dropdown", m.toggle(i));
        })?;

        let m = Rc::clone(&menu);
        dom::listen(&item.trigger, "keydown", move |e: Event| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if is_open_key(&key) {
                e.prevent_default();
                e.stop_propagation();
                report("open dropdown", m.open(i));
            }
        })?;

        dom::listen(&item.dropdown, "click", |e: Event| e.stop_propagation())?;

        for target in [&item.li, &item.dropdown] {
            let m = Rc::clone(&menu);
            dom::listen(target, "pointerenter", move |_| m.clear_close_timer(i))?;
            let m = Rc::clone(&menu);
            dom::listen(target, "pointerleave", move |_| m.start_close_timer(i))?;
        }
        for target in [&*item.trigger, &item.dropdown] {
            let m = Rc::clone(&menu);
            dom::listen(target, "touchstart", move |_| m.clear_close_timer(i))?;
        }
    }

    let m = Rc::clone(&menu);
    dom::listen(doc, "click", move |e: Event| {
        let inside = dom::event_element(&e).is_some_and(|t| matches!(t.closest(".nav-desktop"), Ok(Some(_))));
        if !inside {
            report("close dropdowns", m.close_all());
        }
    })?;
    Ok(menu)
}

// =============================================================================
// LAYOUT FALLBACK
// =============================================================================

fn apply_layout(window: &Window, nav: &HtmlElement, hamburger: &HtmlElement, breakpoint: f64) -> Result<(), SiteError> {
    match NavLayout::for_width(dom::inner_width(window), breakpoint) {
        NavLayout::Mobile => {
            dom::set_style(nav, "display", "none")?;
            dom::set_style(hamburger, "display", "flex")
        }
        NavLayout::Desktop => {
            dom::clear_style(nav, "display")?;
            dom::clear_style(hamburger, "display")
        }
    }
}

fn mount_layout_fallback(window: &Window, doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let nav = dom::query_html(doc, ".nav-desktop")?;
    let hamburger = dom::query_html(doc, ".hamburger")?;
    let breakpoint = config.mobile_breakpoint_px;
    for event in ["resize", "load"] {
        let (w, n, h) = (window.clone(), nav.clone(), hamburger.clone());
        dom::listen(window, event, move |_| report("nav layout", apply_layout(&w, &n, &h, breakpoint)))?;
    }
    apply_layout(window, &nav, &hamburger, breakpoint)
}

// =============================================================================
// MOUNT
// =============================================================================

/// Wire every navigation feature present on the page.
///
/// # Errors
///
/// Returns the first listener failure; absent features are skipped.
pub fn mount(window: &Window, doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let overlay = tolerate_missing(mount_overlay(doc))?;
    tolerate_missing(mount_mobile_accordion(doc))?;
    let desktop = tolerate_missing(mount_desktop(doc, config))?;
    tolerate_missing(mount_layout_fallback(window, doc, config))?;

    if overlay.is_none() && desktop.is_none() {
        return Ok(());
    }
    dom::listen(doc, "keydown", move |e: Event| {
        let escape = e.dyn_ref::<KeyboardEvent>().is_some_and(|k| k.key() == "Escape");
        if !escape {
            return;
        }
        if let Some(overlay) = &overlay {
            report("close mobile menu", overlay.set_open(false));
        }
        if let Some(desktop) = &desktop {
            report("close dropdowns", desktop.close_all());
        }
    })
}
