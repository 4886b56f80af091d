//! Per-carousel timing and threshold configuration.
//!
//! DESIGN
//! ======
//! Every knob has a default in [`crate::consts`]. A container may override
//! any subset through a JSON object in its `data-carousel` attribute, e.g.
//! `data-carousel='{"autoplay_ms": 5000}'`. Unknown keys are rejected so a
//! typo is reported instead of silently ignored; a rejected config falls back
//! to the defaults as a whole.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    AUTOPLAY_MS, CLICK_GUARD_MS, COMMIT_THRESHOLD_PX, GRID_GAP_PX, MOBILE_BREAKPOINT_PX, POINTER_JITTER_PX,
    TOUCH_JITTER_PX, TRANSITION_MS,
};
use crate::error::CarouselError;
use crate::gesture::InputSource;

/// Name of the container attribute carrying config overrides.
pub const CONFIG_ATTRIBUTE: &str = "data-carousel";

/// Timings and thresholds for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Slide transition duration; also the navigation lock window.
    pub transition_ms: u32,
    /// Autoplay tick interval (image banner only).
    pub autoplay_ms: u32,
    /// Click suppression window after a committed swipe.
    pub click_guard_ms: u32,
    /// Minimum swipe distance that navigates.
    pub commit_threshold_px: f64,
    /// Jitter allowance for touch gestures.
    pub touch_jitter_px: f64,
    /// Jitter allowance for mouse drags.
    pub pointer_jitter_px: f64,
    /// Widest viewport still treated as mobile.
    pub mobile_breakpoint_px: f64,
    /// Gap between items in a synthesized repertory page.
    pub grid_gap_px: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_ms: TRANSITION_MS,
            autoplay_ms: AUTOPLAY_MS,
            click_guard_ms: CLICK_GUARD_MS,
            commit_threshold_px: COMMIT_THRESHOLD_PX,
            touch_jitter_px: TOUCH_JITTER_PX,
            pointer_jitter_px: POINTER_JITTER_PX,
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            grid_gap_px: GRID_GAP_PX,
        }
    }
}

impl CarouselConfig {
    /// Parse a JSON object of overrides on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Config`] for malformed JSON, wrong value
    /// types, or unknown keys.
    pub fn from_json(raw: &str) -> Result<Self, CarouselError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolve the config for a container from its optional attribute value.
    ///
    /// Missing or blank attributes yield the defaults. Invalid ones are
    /// logged and also yield the defaults.
    #[must_use]
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring {CONFIG_ATTRIBUTE} attribute: {err}");
                Self::default()
            }
        }
    }

    /// Whether a viewport of this width uses the mobile layout.
    #[must_use]
    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width <= self.mobile_breakpoint_px
    }

    /// Movement allowance before a press becomes a swipe.
    #[must_use]
    pub fn jitter_px(&self, source: InputSource) -> f64 {
        match source {
            InputSource::Touch => self.touch_jitter_px,
            InputSource::Pointer => self.pointer_jitter_px,
        }
    }
}
