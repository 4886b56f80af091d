//! Carousel state machine.
//!
//! DESIGN
//! ======
//! `CarouselCore` holds everything that does not need a browser: the slot
//! layout, the current index, the transition lock, gesture state, the click
//! guard and autoplay bookkeeping. Every operation returns a list of
//! [`Action`]s that the DOM host executes in order. Deferred work (settling a
//! transition, autoplay ticks) is never hidden inside the core: it is
//! requested through an action and fed back by the host as an explicit call.
//!
//! Settle requests carry a ticket. Any relayout bumps the ticket, so a settle
//! scheduled against the previous layout becomes a no-op when it fires.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::config::CarouselConfig;
use crate::gesture::{GestureState, InputSource, SwipeDirection, classify_release};
use crate::layout::{Page, Slot, build_slots, chunk_pages, strip_width_percent};
use crate::variant::{Profile, Variant};

/// Track cursor feedback for mouse drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Instructions returned from core operations for the host to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Rebuild the track's children from [`CarouselCore::slots`].
    RenderSlides,
    /// Size every slide to this percentage of the track width.
    SizeSlides { percent: f64 },
    /// Move the track to `-percent%`, with or without the transition.
    Translate { percent: f64, animate: bool },
    /// Replace the pagination dots with `count` fresh ones.
    RenderDots { count: usize },
    /// Mark the dot at `active` and clear the rest.
    SyncDots { active: Option<usize> },
    /// Call [`CarouselCore::settle`] with `ticket` after `delay_ms`.
    ScheduleSettle { ticket: u64, delay_ms: u32 },
    /// (Re)start the repeating timer that calls [`CarouselCore::autoplay_tick`].
    StartAutoplay { interval_ms: u32 },
    /// Cancel the autoplay timer.
    StopAutoplay,
    /// Cancel the browser default for the event being handled.
    PreventDefault,
    /// Change the track cursor.
    SetCursor(Cursor),
    /// Drop clones, synthesized pages and dots; put the original slides (or
    /// Repertory items in their original wrappers) back and clear inline styles.
    RestoreMarkup,
}

/// Browser-independent carousel state.
#[derive(Debug)]
pub struct CarouselCore {
    config: CarouselConfig,
    variant: Variant,
    visible: usize,
    item_count: usize,
    pages: Vec<Page>,
    slots: Vec<Slot>,
    current: usize,
    animating: bool,
    ticket: u64,
    gesture: GestureState,
    click_suppressed_until: f64,
    autoplay_running: bool,
    initialized: bool,
}

impl CarouselCore {
    /// Create an uninitialized core over `item_count` items.
    ///
    /// For Repertory the items are the flattened show entries; for every other
    /// variant they are the original slides.
    #[must_use]
    pub fn new(variant: Variant, item_count: usize, viewport_width: f64, config: CarouselConfig) -> Self {
        Self {
            visible: variant.visible_items(config.is_mobile(viewport_width)),
            config,
            variant,
            item_count,
            pages: Vec::new(),
            slots: Vec::new(),
            current: 0,
            animating: false,
            ticket: 0,
            gesture: GestureState::Idle,
            click_suppressed_until: 0.0,
            autoplay_running: false,
            initialized: false,
        }
    }

    fn profile(&self) -> &'static Profile {
        self.variant.profile()
    }

    // --- Lifecycle ---

    /// Build the initial layout, dots and position.
    ///
    /// A paging variant with fewer than two slides stays uninitialized and
    /// every later operation on it is a no-op. Calling this twice is a no-op.
    pub fn initialize(&mut self) -> Vec<Action> {
        if self.initialized {
            return Vec::new();
        }
        if self.item_count < 2 && !self.profile().synthesizes_pages {
            log::debug!("{:?} carousel has {} slide(s); leaving it static", self.variant, self.item_count);
            return Vec::new();
        }
        self.initialized = true;
        let mut actions = vec![Action::SetCursor(Cursor::Grab)];
        actions.extend(self.rebuild(0));
        actions.extend(self.start_autoplay());
        actions
    }

    /// Stop autoplay, forget any in-flight transition or gesture, and hand
    /// the original markup back.
    ///
    /// The core returns to its uninitialized state: every later operation is a
    /// no-op until [`Self::initialize`] runs again.
    pub fn dispose(&mut self) -> Vec<Action> {
        self.interrupt();
        self.gesture = GestureState::Idle;
        let mut actions = Vec::new();
        if self.autoplay_running {
            self.autoplay_running = false;
            actions.push(Action::StopAutoplay);
        }
        if self.initialized {
            self.initialized = false;
            self.pages.clear();
            self.slots.clear();
            self.current = 0;
            actions.push(Action::RestoreMarkup);
        }
        actions
    }

    // --- Navigation ---

    /// Move to slot `index`.
    ///
    /// Ignored while a transition is running or when `index` is out of range.
    /// Every move takes the lock and asks for a settle after `transition_ms`,
    /// with or without the CSS transition; the settle re-anchors off clones.
    pub fn go_to_slide(&mut self, index: usize, animate: bool) -> Vec<Action> {
        if self.animating || index >= self.slots.len() {
            return Vec::new();
        }
        self.animating = true;
        self.current = index;
        self.ticket = self.ticket.wrapping_add(1);
        vec![
            Action::Translate { percent: self.offset_percent(index), animate },
            Action::SyncDots { active: self.active_dot() },
            Action::ScheduleSettle { ticket: self.ticket, delay_ms: self.config.transition_ms },
        ]
    }

    /// End of a transition: release the lock and step off a clone slot.
    ///
    /// Stale tickets (from before a relayout) are ignored.
    pub fn settle(&mut self, ticket: u64) -> Vec<Action> {
        if !self.animating || ticket != self.ticket {
            return Vec::new();
        }
        self.animating = false;
        let anchored = self.anchor(self.current);
        if anchored == self.current {
            return Vec::new();
        }
        self.current = anchored;
        vec![
            Action::Translate { percent: self.offset_percent(anchored), animate: false },
            Action::SyncDots { active: self.active_dot() },
        ]
    }

    /// Advance one slot, wrapping modulo the slot count.
    pub fn next(&mut self) -> Vec<Action> {
        let len = self.slots.len();
        if len <= 1 {
            return Vec::new();
        }
        self.go_to_slide((self.current + 1) % len, true)
    }

    /// Retreat one slot, wrapping modulo the slot count.
    pub fn prev(&mut self) -> Vec<Action> {
        let len = self.slots.len();
        if len <= 1 {
            return Vec::new();
        }
        self.go_to_slide((self.current + len - 1) % len, true)
    }

    /// Jump to the logical page behind pagination dot `dot`.
    pub fn go_to_dot(&mut self, dot: usize) -> Vec<Action> {
        if dot >= self.dot_count() {
            return Vec::new();
        }
        self.go_to_slide(dot + self.clone_offset(), true)
    }

    // --- Gestures ---

    /// Start a gesture on the track.
    pub fn press(&mut self, source: InputSource, x: f64) -> Vec<Action> {
        if !self.initialized {
            return Vec::new();
        }
        self.gesture = GestureState::press(source, x);
        match source {
            InputSource::Pointer => vec![Action::SetCursor(Cursor::Grabbing), Action::PreventDefault],
            InputSource::Touch => Vec::new(),
        }
    }

    /// Track a move. Once the press is a swipe, default scrolling is suppressed.
    pub fn drag(&mut self, x: f64) -> Vec<Action> {
        let Some(source) = self.gesture.source() else {
            return Vec::new();
        };
        if self.gesture.track(x, self.config.jitter_px(source)) {
            vec![Action::PreventDefault]
        } else {
            Vec::new()
        }
    }

    /// Finish a gesture at `x` (or at the last tracked position when `None`).
    ///
    /// A committed swipe navigates once and guards the track against the
    /// click that the release would otherwise produce.
    pub fn release(&mut self, x: Option<f64>, now_ms: f64) -> Vec<Action> {
        let Some(source) = self.gesture.source() else {
            return Vec::new();
        };
        let swiping = self.gesture.is_swiping();
        let delta = x.map_or_else(|| self.gesture.delta(), |x| self.gesture.delta_to(x));
        self.gesture = GestureState::Idle;

        let mut actions = Vec::new();
        if source == InputSource::Pointer {
            actions.push(Action::SetCursor(Cursor::Grab));
        }
        if let Some(direction) = classify_release(delta, swiping, self.config.commit_threshold_px) {
            self.click_suppressed_until = now_ms + f64::from(self.config.click_guard_ms);
            actions.push(Action::PreventDefault);
            actions.extend(match direction {
                SwipeDirection::Forward => self.next(),
                SwipeDirection::Backward => self.prev(),
            });
        }
        actions
    }

    /// The pointer left the track mid-drag; treat it as a release in place.
    pub fn cancel(&mut self, now_ms: f64) -> Vec<Action> {
        self.release(None, now_ms)
    }

    /// Whether clicks landing on the track should be swallowed at `now_ms`.
    #[must_use]
    pub fn clicks_suppressed(&self, now_ms: f64) -> bool {
        now_ms < self.click_suppressed_until
    }

    // --- Autoplay ---

    /// Pointer or finger entered the container: pause autoplay.
    pub fn pointer_enter(&mut self) -> Vec<Action> {
        if !self.autoplay_running {
            return Vec::new();
        }
        self.autoplay_running = false;
        vec![Action::StopAutoplay]
    }

    /// Pointer or finger left the container: resume autoplay.
    pub fn pointer_leave(&mut self) -> Vec<Action> {
        self.start_autoplay()
    }

    /// One autoplay interval elapsed.
    pub fn autoplay_tick(&mut self) -> Vec<Action> {
        if !self.autoplay_running {
            return Vec::new();
        }
        self.next()
    }

    fn start_autoplay(&mut self) -> Vec<Action> {
        if !self.initialized || !self.profile().autoplay || self.autoplay_running {
            return Vec::new();
        }
        self.autoplay_running = true;
        vec![Action::StartAutoplay { interval_ms: self.config.autoplay_ms }]
    }

    // --- Responsive ---

    /// Viewport resized. Relayout only when the visible item count changes.
    pub fn resize(&mut self, viewport_width: f64) -> Vec<Action> {
        let visible = self.variant.visible_items(self.config.is_mobile(viewport_width));
        if visible == self.visible {
            return Vec::new();
        }
        self.visible = visible;
        if !self.initialized {
            return Vec::new();
        }
        if self.profile().strip {
            self.interrupt();
            let mut actions = vec![Action::SizeSlides { percent: strip_width_percent(visible) }];
            actions.extend(self.snap_to(self.current));
            return actions;
        }
        let page = self.logical_page();
        self.rebuild(page)
    }

    // --- Queries ---

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Items visible at once for the current breakpoint.
    #[must_use]
    pub fn visible_items(&self) -> usize {
        self.visible
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// The track layout, clone slots included.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of slots on the track (`slides.length`).
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slots.len()
    }

    /// The real pages, as item ranges.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    #[must_use]
    pub fn autoplay_running(&self) -> bool {
        self.autoplay_running
    }

    /// One dot per logical page.
    #[must_use]
    pub fn dot_count(&self) -> usize {
        if !self.initialized {
            0
        } else if self.has_clones() {
            self.slots.len() - 2
        } else {
            self.pages.len()
        }
    }

    /// Dot that represents the current slot.
    ///
    /// With clone slots the raw index is shifted by one; resting on the lead
    /// clone shows the last dot and on the trail clone the first.
    #[must_use]
    pub fn active_dot(&self) -> Option<usize> {
        let count = self.dot_count();
        if count == 0 {
            return None;
        }
        if !self.has_clones() {
            return (self.current < count).then_some(self.current);
        }
        let dot = match self.current.checked_sub(1) {
            None => self.slots.len() - 3,
            Some(dot) if dot >= count => 0,
            Some(dot) => dot,
        };
        Some(dot)
    }

    /// Track offset for slot `index`, as a percentage of the track width.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn offset_percent(&self, index: usize) -> f64 {
        let step = if self.profile().strip { strip_width_percent(self.visible) } else { 100.0 };
        index as f64 * step
    }

    // --- Internals ---

    fn has_clones(&self) -> bool {
        self.slots.len() == self.pages.len() + 2
    }

    fn clone_offset(&self) -> usize {
        usize::from(self.has_clones())
    }

    /// Real slot showing the same content as `index`.
    fn anchor(&self, index: usize) -> usize {
        if !self.has_clones() {
            return index;
        }
        let len = self.slots.len();
        if index == 0 {
            len - 2
        } else if index == len - 1 {
            1
        } else {
            index
        }
    }

    fn logical_page(&self) -> usize {
        if self.has_clones() { self.active_dot().unwrap_or(0) } else { self.current }
    }

    /// Drop the transition lock and invalidate any pending settle.
    fn interrupt(&mut self) {
        self.animating = false;
        self.ticket = self.ticket.wrapping_add(1);
    }

    /// Instantly show slot `index` (clamped, re-anchored off clones).
    fn snap_to(&mut self, index: usize) -> Vec<Action> {
        let Some(last) = self.slots.len().checked_sub(1) else {
            return Vec::new();
        };
        let index = self.anchor(index.min(last));
        self.current = index;
        vec![
            Action::Translate { percent: self.offset_percent(index), animate: false },
            Action::SyncDots { active: self.active_dot() },
        ]
    }

    /// Recompute pages and slots, then land on `page` (clamped).
    fn rebuild(&mut self, page: usize) -> Vec<Action> {
        let profile = self.profile();
        let per_page = if profile.synthesizes_pages { self.visible } else { 1 };
        self.pages = chunk_pages(self.item_count, per_page);
        self.slots = build_slots(self.pages.len(), profile.wraps);
        self.interrupt();

        let mut actions = vec![Action::RenderSlides];
        if profile.strip {
            actions.push(Action::SizeSlides { percent: strip_width_percent(self.visible) });
        }
        actions.push(Action::RenderDots { count: self.dot_count() });
        let page = page.min(self.pages.len().saturating_sub(1));
        actions.extend(self.snap_to(page + self.clone_offset()));
        actions
    }
}
