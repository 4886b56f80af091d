//! Carousel variants and their behavior profiles.
//!
//! DESIGN
//! ======
//! Each variant maps to one static [`Profile`]. The state machine and the DOM
//! host consult the profile instead of matching on the variant, so every
//! per-variant decision (wrap policy, strip layout, autoplay, dot styling,
//! item counts) lives in one table.

#[cfg(test)]
#[path = "variant_test.rs"]
mod variant_test;

/// Selector list matching every carousel container the page can host.
pub const CONTAINER_SELECTOR: &str =
    ".slider-container, .repertory-slider-container, .logo-slider-container, .image-slider-container";

/// Track candidates, tried in order; the first match wins.
pub const TRACK_SELECTORS: [&str; 4] = [".slider", ".repertory-slider", ".logo-slider", ".image-slider"];

/// Slide candidates, tried in order; the first selector with any match wins.
pub const SLIDE_SELECTORS: [&str; 4] = [".slide", ".repertory-slide", ".logo-slide", ".image-slide"];

/// Dot container candidates, tried in order.
pub const DOT_CONTAINER_SELECTORS: [&str; 4] = [".slider-dots", ".repertory-dots", ".logo-dots", ".image-slider-dots"];

/// Previous-page control.
pub const PREV_SELECTOR: &str = ".prev, .slider-arrow.prev, .repertory-arrow.prev, .logo-arrow.prev";

/// Next-page control.
pub const NEXT_SELECTOR: &str = ".next, .slider-arrow.next, .repertory-arrow.next, .logo-arrow.next";

/// Items that a repertory carousel re-paginates.
pub const REPERTORY_ITEM_SELECTOR: &str = ".repertory-item";

/// Which behavior profile a carousel follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Full-width paging slider with infinite wraparound.
    #[default]
    Main,
    /// Continuous strip of logos, several visible at once.
    Logo,
    /// Grid pages synthesized from a flat list of show items.
    Repertory,
    /// Full-width image banner with autoplay.
    Image,
}

/// Static per-variant behavior table.
#[derive(Debug)]
pub struct Profile {
    /// Container class that selects this variant (`None` for the fallback).
    pub container_class: Option<&'static str>,
    /// Items visible at once on mobile viewports.
    pub mobile_items: usize,
    /// Items visible at once on desktop viewports.
    pub desktop_items: usize,
    /// Whether clone slots fake an endless loop.
    pub wraps: bool,
    /// Whether slides are sized to a fraction of the track and the offset
    /// advances one slide at a time instead of one full width.
    pub strip: bool,
    /// Whether slides are rebuilt from a flat item list on every layout.
    pub synthesizes_pages: bool,
    /// Whether an autoplay timer drives `next()`.
    pub autoplay: bool,
    /// Class name given to generated pagination dots.
    pub dot_class: &'static str,
}

static MAIN: Profile = Profile {
    container_class: None,
    mobile_items: 1,
    desktop_items: 1,
    wraps: true,
    strip: false,
    synthesizes_pages: false,
    autoplay: false,
    dot_class: "dot",
};

static LOGO: Profile = Profile {
    container_class: Some("logo-slider-container"),
    mobile_items: 3,
    desktop_items: 5,
    wraps: false,
    strip: true,
    synthesizes_pages: false,
    autoplay: false,
    dot_class: "dot",
};

static REPERTORY: Profile = Profile {
    container_class: Some("repertory-slider-container"),
    mobile_items: 4,
    desktop_items: 6,
    wraps: false,
    strip: false,
    synthesizes_pages: true,
    autoplay: false,
    dot_class: "dot",
};

static IMAGE: Profile = Profile {
    container_class: Some("image-slider-container"),
    mobile_items: 1,
    desktop_items: 1,
    wraps: true,
    strip: false,
    synthesizes_pages: false,
    autoplay: true,
    dot_class: "image-slider-dot",
};

impl Variant {
    /// Every variant, in container-class resolution order (fallback last).
    pub const ALL: [Self; 4] = [Self::Logo, Self::Repertory, Self::Image, Self::Main];

    /// The behavior table for this variant.
    #[must_use]
    pub fn profile(self) -> &'static Profile {
        match self {
            Self::Main => &MAIN,
            Self::Logo => &LOGO,
            Self::Repertory => &REPERTORY,
            Self::Image => &IMAGE,
        }
    }

    /// Resolve the variant from a container's class membership test.
    ///
    /// Containers carrying none of the specific classes are [`Variant::Main`].
    pub fn from_classes(has_class: impl Fn(&str) -> bool) -> Self {
        Self::ALL
            .into_iter()
            .find(|variant| variant.profile().container_class.is_some_and(&has_class))
            .unwrap_or_default()
    }

    /// How many items are visible at once for the given breakpoint.
    #[must_use]
    pub fn visible_items(self, mobile: bool) -> usize {
        let profile = self.profile();
        if mobile { profile.mobile_items } else { profile.desktop_items }
    }
}
