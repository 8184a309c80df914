//! Shared constants for the site widgets.
//!
//! Timings are milliseconds, sizes are CSS pixels. Values that a page may
//! override live in [`crate::config::SiteConfig`]; these are its defaults.

// ── Navigation ──────────────────────────────────────────────────

/// Delay before an open desktop dropdown closes after the pointer leaves it.
pub const NAV_CLOSE_DELAY_MS: u32 = 1500;

/// Viewport width at or below which the mobile navigation is used.
pub const MOBILE_BREAKPOINT_PX: f64 = 900.0;

/// Vertical offset of the outer hamburger bars when morphing into an X.
pub const HAMBURGER_BAR_SHIFT_PX: u32 = 7;

// ── Sample panel ────────────────────────────────────────────────

/// Delay before focusing the first control of a freshly opened panel.
pub const PANEL_FOCUS_DELAY_MS: u32 = 120;

/// Delay between a successful sample request and the panel closing.
pub const PANEL_CLOSE_AFTER_SUBMIT_MS: u32 = 900;

/// Elements reachable by keyboard inside the sample panel.
pub const FOCUSABLE_SELECTOR: &str =
    "a[href], button:not([disabled]), textarea, input, select, [tabindex]:not([tabindex=\"-1\"])";

// ── Hero ────────────────────────────────────────────────────────

/// Maximum horizontal parallax travel of the hero light, edge to edge.
pub const PARALLAX_RANGE_X_PX: f64 = 40.0;

/// Maximum vertical parallax travel of the hero light, edge to edge.
pub const PARALLAX_RANGE_Y_PX: f64 = 30.0;

// ── Background video ────────────────────────────────────────────

/// Viewport width at or below which the background video stays paused.
pub const SMALL_DEVICE_MAX_WIDTH_PX: u32 = 560;

/// `HAVE_CURRENT_DATA`: enough data to render the current frame.
pub const VIDEO_READY_STATE: u16 = 2;

/// Fallback delay for a play attempt when `loadedmetadata` never fires.
pub const VIDEO_PLAY_FALLBACK_MS: u32 = 800;

// ── Reveal ──────────────────────────────────────────────────────

/// Visible fraction of the about hero that triggers its reveal.
pub const ABOUT_REVEAL_THRESHOLD: f64 = 0.12;

/// Delay between the about hero reveal and its background pan.
pub const ABOUT_BG_DELAY_MS: u32 = 220;

/// Per-card stagger when a service card has no `data-delay`.
pub const SERVICE_CARD_STAGGER_MS: u32 = 80;

/// Visible fraction of a product image that triggers its fade-in.
pub const PRODUCT_IMAGE_THRESHOLD: f64 = 0.2;

// ── Carousel ────────────────────────────────────────────────────

/// Time between automatic testimonial advances.
pub const CAROUSEL_INTERVAL_MS: u32 = 1500;

/// Transition applied to the testimonial track while sliding.
pub const CAROUSEL_TRANSITION: &str = "transform 0.6s ease";

// ── Accordion ───────────────────────────────────────────────────

pub const FAQ_OPEN_TRANSITION: &str = "height 320ms cubic-bezier(.22,.9,.3,1), opacity 220ms ease";
pub const FAQ_CLOSE_TRANSITION: &str = "height 260ms cubic-bezier(.2,.9,.3,1), opacity 200ms ease";

/// Settle a FAQ panel whose `transitionend` never arrives (cancelled, or
/// hidden by an ancestor). Longer than either height transition.
pub const FAQ_SETTLE_FALLBACK_MS: u32 = 450;

/// Visible fraction of a FAQ item that triggers its fade-in.
pub const FAQ_REVEAL_THRESHOLD: f64 = 0.12;

/// Per-item stagger of the FAQ fade-in.
pub const FAQ_REVEAL_STAGGER_MS: u32 = 60;

// ── Contact ─────────────────────────────────────────────────────

pub const DEFAULT_MAILTO_ADDRESS: &str = "info@stackly.example";
pub const DEFAULT_BRAND: &str = "Stackly";

/// Feedback colours shared by the contact form and the sample panel.
pub const SUCCESS_COLOR: &str = "#c7f464";
pub const ERROR_COLOR: &str = "#ffb4b4";
