//! Shared numeric constants for the carousel crate.
//!
//! These are the defaults behind [`crate::config::CarouselConfig`]; a
//! container can override any of them through its `data-carousel` attribute.

// ── Timing ──────────────────────────────────────────────────────

/// Length of the slide transition, and of the navigation lock, in milliseconds.
pub const TRANSITION_MS: u32 = 500;

/// Autoplay tick interval for the image banner variant, in milliseconds.
pub const AUTOPLAY_MS: u32 = 3000;

/// How long clicks on the track are swallowed after a committed swipe.
pub const CLICK_GUARD_MS: u32 = 300;

// ── Gestures ────────────────────────────────────────────────────

/// Minimum net horizontal displacement, in pixels, for a swipe to navigate.
pub const COMMIT_THRESHOLD_PX: f64 = 50.0;

/// Touch movement beyond this many pixels marks the gesture as a swipe.
pub const TOUCH_JITTER_PX: f64 = 10.0;

/// Mouse-drag movement beyond this many pixels marks the gesture as a swipe.
pub const POINTER_JITTER_PX: f64 = 5.0;

// ── Layout ──────────────────────────────────────────────────────

/// Viewports at or below this width (CSS pixels) use the mobile item counts.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Gap between items inside a synthesized repertory grid page, in pixels.
pub const GRID_GAP_PX: u32 = 10;

/// Width of the track viewport expressed as a percentage.
pub const FULL_WIDTH_PERCENT: f64 = 100.0;
