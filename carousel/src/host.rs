//! DOM host that binds a [`CarouselCore`] to one container element.
//!
//! ARCHITECTURE
//! ============
//! `Carousel` resolves the container's structure once, owns the slide (or
//! item) elements, the listeners and the timers, and executes the core's
//! [`Action`]s. Every listener and timer closure holds a `Weak` reference to
//! the instance, so dropping the last `Carousel` handle tears it down:
//! listeners unregister themselves and timers cancel.
//!
//! Each event handler borrows the core mutably only long enough to compute
//! its actions; the actions run afterwards, with the core free again.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use uuid::Uuid;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

use crate::config::{CONFIG_ATTRIBUTE, CarouselConfig};
use crate::dom::{
    append, clear_style, deep_clone, elements, event_within, first_match, first_match_all, mouse_x, now_ms,
    set_class, set_style, touch_x, viewport_width,
};
use crate::engine::{Action, CarouselCore};
use crate::error::CarouselError;
use crate::gesture::InputSource;
use crate::layout::{Page, grid_shape};
use crate::listener::{ListenOptions, Listener};
use crate::variant::{
    DOT_CONTAINER_SELECTORS, NEXT_SELECTOR, PREV_SELECTOR, REPERTORY_ITEM_SELECTOR, SLIDE_SELECTORS, TRACK_SELECTORS,
    Variant,
};

/// A carousel mounted on a container. Clones share the same instance.
#[derive(Clone)]
pub struct Carousel {
    inner: Rc<Inner>,
}

struct Inner {
    id: Uuid,
    core: RefCell<CarouselCore>,
    dom: Structure,
    rendered: RefCell<Vec<Element>>,
    dots: RefCell<Vec<Element>>,
    timers: RefCell<Timers>,
    listeners: RefCell<Vec<Listener>>,
    dot_listeners: RefCell<Vec<Listener>>,
}

/// Elements resolved from the container at mount time.
struct Structure {
    document: Document,
    container: HtmlElement,
    track: HtmlElement,
    /// Original slides, or the flattened items for Repertory.
    items: Vec<Element>,
    /// Slides as found in the markup, restored on disposal.
    slides: Vec<Element>,
    /// Repertory only: the original wrapper of each entry in `items`.
    homes: Vec<Element>,
    prev: Option<Element>,
    next: Option<Element>,
    dot_container: Option<Element>,
}

#[derive(Default)]
struct Timers {
    settle: Option<Timeout>,
    autoplay: Option<Interval>,
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Carousel");
        out.field("id", &self.inner.id);
        if let Ok(core) = self.inner.core.try_borrow() {
            out.field("variant", &core.variant())
                .field("current_index", &core.current_index())
                .field("slides", &core.slide_count());
        }
        out.finish_non_exhaustive()
    }
}

impl Carousel {
    /// Resolve the container's structure, initialize, and wire events.
    ///
    /// # Errors
    ///
    /// - [`CarouselError::MissingTrack`] when no track selector matches.
    /// - [`CarouselError::TooFewSlides`] for a paging variant with fewer than
    ///   two slides.
    /// - [`CarouselError::Dom`] when the container is detached or a DOM call throws.
    pub fn mount(container: HtmlElement) -> Result<Self, CarouselError> {
        let document = container
            .owner_document()
            .ok_or_else(|| CarouselError::Dom("container is not attached to a document".into()))?;
        let classes = container.class_list();
        let variant = Variant::from_classes(|class| classes.contains(class));
        let profile = variant.profile();
        let config = CarouselConfig::from_attribute(container.get_attribute(CONFIG_ATTRIBUTE).as_deref());

        let track = first_match(&container, &TRACK_SELECTORS)?
            .and_then(|track| track.dyn_ref::<HtmlElement>().cloned())
            .ok_or(CarouselError::MissingTrack)?;
        let slides = first_match_all(&container, &SLIDE_SELECTORS)?;

        let mut homes = Vec::new();
        let items = if profile.synthesizes_pages {
            let mut items = Vec::new();
            for slide in &slides {
                for item in elements(&slide.query_selector_all(REPERTORY_ITEM_SELECTOR)?) {
                    homes.push(slide.clone());
                    items.push(item);
                }
            }
            track.set_inner_html("");
            items
        } else if slides.len() < 2 {
            return Err(CarouselError::TooFewSlides { count: slides.len() });
        } else {
            slides.clone()
        };

        let prev = container.query_selector(PREV_SELECTOR)?;
        let next = container.query_selector(NEXT_SELECTOR)?;
        if prev.is_none() || next.is_none() {
            log::debug!("{variant:?} carousel has no arrow pair; arrows disabled");
        }
        let dot_container = first_match(&container, &DOT_CONTAINER_SELECTORS)?;
        if dot_container.is_none() {
            log::debug!("{variant:?} carousel has no dot container; pagination disabled");
        }

        let core = CarouselCore::new(variant, items.len(), viewport_width(), config);
        let carousel = Self {
            inner: Rc::new(Inner {
                id: Uuid::new_v4(),
                core: RefCell::new(core),
                dom: Structure { document, container, track, items, slides, homes, prev, next, dot_container },
                rendered: RefCell::new(Vec::new()),
                dots: RefCell::new(Vec::new()),
                timers: RefCell::new(Timers::default()),
                listeners: RefCell::new(Vec::new()),
                dot_listeners: RefCell::new(Vec::new()),
            }),
        };

        let actions = carousel.inner.core.borrow_mut().initialize();
        carousel.inner.apply(actions, None);
        carousel.inner.wire();
        log::debug!(
            "mounted {variant:?} carousel {} with {} item(s)",
            carousel.inner.id,
            carousel.inner.dom.items.len()
        );
        Ok(carousel)
    }

    /// Unique id of this instance, used in logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.inner.core.borrow().variant()
    }

    /// Stop autoplay, cancel pending timers, remove every listener and put
    /// the container's original markup back, so a later mount starts clean.
    pub fn dispose(&self) {
        let actions = self.inner.core.borrow_mut().dispose();
        self.inner.apply(actions, None);
        *self.inner.timers.borrow_mut() = Timers::default();
        self.inner.listeners.borrow_mut().clear();
        self.inner.dot_listeners.borrow_mut().clear();
        log::debug!("disposed carousel {}", self.inner.id);
    }
}

impl Inner {
    // --- Action execution ---

    fn apply(self: &Rc<Self>, actions: Vec<Action>, event: Option<&Event>) {
        for action in actions {
            match action {
                Action::RenderSlides => self.render_slides(),
                Action::SizeSlides { percent } => self.size_slides(percent),
                Action::Translate { percent, animate } => self.translate(percent, animate),
                Action::RenderDots { count } => self.render_dots(count),
                Action::SyncDots { active } => self.sync_dots(active),
                Action::ScheduleSettle { ticket, delay_ms } => self.schedule_settle(ticket, delay_ms),
                Action::StartAutoplay { interval_ms } => self.start_autoplay(interval_ms),
                Action::StopAutoplay => self.timers.borrow_mut().autoplay = None,
                Action::PreventDefault => {
                    if let Some(event) = event {
                        event.prevent_default();
                    }
                }
                Action::SetCursor(cursor) => set_style(&self.dom.track, "cursor", cursor.css()),
                Action::RestoreMarkup => self.restore_markup(),
            }
        }
    }

    fn render_slides(&self) {
        let core = self.core.borrow();
        let synthesize = core.variant().profile().synthesizes_pages;
        let gap_px = core.config().grid_gap_px;
        let per_page = core.visible_items();

        let Some(pages) = core
            .pages()
            .iter()
            .map(|page| {
                if synthesize {
                    self.synthesize_page(*page, per_page, gap_px)
                } else {
                    self.dom.items.get(page.start).cloned()
                }
            })
            .collect::<Option<Vec<_>>>()
        else {
            log::debug!("carousel {} could not build its pages; layout unchanged", self.id);
            return;
        };

        self.dom.track.set_inner_html("");
        let mut rendered = Vec::with_capacity(core.slots().len());
        for slot in core.slots() {
            let Some(source) = pages.get(slot.source_page(pages.len())) else {
                continue;
            };
            let element = if slot.is_clone() { deep_clone(source) } else { Some(source.clone()) };
            if let Some(element) = element
                && append(&self.dom.track, &element)
            {
                rendered.push(element);
            }
        }
        *self.rendered.borrow_mut() = rendered;
    }

    /// Build one repertory grid page holding the items in `page`.
    fn synthesize_page(&self, page: Page, per_page: usize, gap_px: u32) -> Option<Element> {
        let slide = match self.dom.document.create_element("div") {
            Ok(slide) => slide,
            Err(err) => {
                log::debug!("failed to create repertory page: {err:?}");
                return None;
            }
        };
        slide.set_class_name("repertory-slide");
        let shape = grid_shape(per_page);
        set_style(&slide, "display", "grid");
        set_style(&slide, "grid-template-columns", &format!("repeat({}, 1fr)", shape.columns));
        set_style(&slide, "grid-template-rows", &format!("repeat({}, 1fr)", shape.rows));
        set_style(&slide, "gap", &format!("{gap_px}px"));
        set_style(&slide, "width", "100%");
        set_style(&slide, "flex-shrink", "0");
        for item in self.dom.items.get(page.start..page.end).unwrap_or_default() {
            append(&slide, item);
        }
        Some(slide)
    }

    fn restore_markup(&self) {
        self.dot_listeners.borrow_mut().clear();
        self.dots.borrow_mut().clear();
        if let Some(container) = &self.dom.dot_container {
            container.set_inner_html("");
        }
        for (item, home) in self.dom.items.iter().zip(&self.dom.homes) {
            append(home, item);
        }

        self.rendered.borrow_mut().clear();
        self.dom.track.set_inner_html("");
        for slide in &self.dom.slides {
            clear_style(slide, "min-width");
            clear_style(slide, "flex");
            append(&self.dom.track, slide);
        }
        for property in ["transition", "transform", "cursor"] {
            clear_style(&self.dom.track, property);
        }
    }

    fn size_slides(&self, percent: f64) {
        let width = format!("{percent}%");
        let flex = format!("0 0 {percent}%");
        for slide in self.rendered.borrow().iter() {
            set_style(slide, "min-width", &width);
            set_style(slide, "flex", &flex);
        }
    }

    fn translate(&self, percent: f64, animate: bool) {
        let transition = if animate {
            format!("transform {}ms ease-in-out", self.core.borrow().config().transition_ms)
        } else {
            "none".to_owned()
        };
        set_style(&self.dom.track, "transition", &transition);
        set_style(&self.dom.track, "transform", &format!("translateX(-{percent}%)"));
    }

    fn render_dots(self: &Rc<Self>, count: usize) {
        let Some(container) = &self.dom.dot_container else {
            return;
        };
        self.dot_listeners.borrow_mut().clear();
        container.set_inner_html("");

        let class = self.core.borrow().variant().profile().dot_class;
        let mut dots = Vec::with_capacity(count);
        let mut listeners = Vec::with_capacity(count);
        for index in 0..count {
            let dot = match self.dom.document.create_element("div") {
                Ok(dot) => dot,
                Err(err) => {
                    log::debug!("failed to create dot {index}: {err:?}");
                    continue;
                }
            };
            dot.set_class_name(class);
            if let Err(err) = dot.set_attribute("data-slide", &index.to_string()) {
                log::debug!("failed to tag dot {index}: {err:?}");
            }
            let weak = Rc::downgrade(self);
            let clicked = Listener::attach(&dot, "click", ListenOptions::default(), move |_event| {
                if let Some(inner) = weak.upgrade() {
                    let actions = inner.core.borrow_mut().go_to_dot(index);
                    inner.apply(actions, None);
                }
            });
            match clicked {
                Ok(listener) => listeners.push(listener),
                Err(err) => log::debug!("failed to wire dot {index}: {err}"),
            }
            append(container, &dot);
            dots.push(dot);
        }
        *self.dots.borrow_mut() = dots;
        *self.dot_listeners.borrow_mut() = listeners;
    }

    fn sync_dots(&self, active: Option<usize>) {
        for (index, dot) in self.dots.borrow().iter().enumerate() {
            set_class(dot, "active", Some(index) == active);
        }
    }

    fn schedule_settle(self: &Rc<Self>, ticket: u64, delay_ms: u32) {
        let weak = Rc::downgrade(self);
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(inner) = weak.upgrade() {
                let actions = inner.core.borrow_mut().settle(ticket);
                inner.apply(actions, None);
            }
        });
        self.timers.borrow_mut().settle = Some(timeout);
    }

    fn start_autoplay(self: &Rc<Self>, interval_ms: u32) {
        let weak = Rc::downgrade(self);
        let interval = Interval::new(interval_ms, move || {
            if let Some(inner) = weak.upgrade() {
                let actions = inner.core.borrow_mut().autoplay_tick();
                inner.apply(actions, None);
            }
        });
        self.timers.borrow_mut().autoplay = Some(interval);
    }

    // --- Event wiring ---

    /// Register `handler` and keep the listener for disposal.
    fn listen(
        self: &Rc<Self>,
        target: &EventTarget,
        kind: &'static str,
        options: ListenOptions,
        handler: impl Fn(&Self, &Event) -> Vec<Action> + 'static,
    ) {
        let weak = Rc::downgrade(self);
        let attached = Listener::attach(target, kind, options, move |event| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let actions = handler(&*inner, &event);
            inner.apply(actions, Some(&event));
        });
        match attached {
            Ok(listener) => self.listeners.borrow_mut().push(listener),
            Err(err) => log::debug!("carousel {} failed to listen for {kind}: {err}", self.id),
        }
    }

    fn wire(self: &Rc<Self>) {
        if let Some(prev) = &self.dom.prev {
            self.listen(prev, "click", ListenOptions::default(), |inner, _| inner.core.borrow_mut().prev());
        }
        if let Some(next) = &self.dom.next {
            self.listen(next, "click", ListenOptions::default(), |inner, _| inner.core.borrow_mut().next());
        }
        self.wire_touch();
        self.wire_mouse();
        if self.core.borrow().variant().profile().autoplay {
            self.wire_autoplay_pause();
        }
        if let Some(window) = web_sys::window() {
            self.listen(&window, "resize", ListenOptions::default(), |inner, _| {
                inner.core.borrow_mut().resize(viewport_width())
            });
        }
    }

    fn wire_touch(self: &Rc<Self>) {
        let track = &self.dom.track;
        self.listen(track, "touchstart", ListenOptions::PASSIVE, |inner, event| match touch_x(event) {
            Some(x) => inner.core.borrow_mut().press(InputSource::Touch, x),
            None => Vec::new(),
        });
        self.listen(track, "touchmove", ListenOptions::ACTIVE, |inner, event| match touch_x(event) {
            Some(x) => inner.core.borrow_mut().drag(x),
            None => Vec::new(),
        });
        self.listen(track, "touchend", ListenOptions::default(), |inner, event| {
            inner.core.borrow_mut().release(touch_x(event), now_ms())
        });
    }

    fn wire_mouse(self: &Rc<Self>) {
        let track = &self.dom.track;
        self.listen(track, "mousedown", ListenOptions::default(), |inner, event| match mouse_x(event) {
            Some(x) => inner.core.borrow_mut().press(InputSource::Pointer, x),
            None => Vec::new(),
        });
        self.listen(track, "mousemove", ListenOptions::default(), |inner, event| match mouse_x(event) {
            Some(x) => inner.core.borrow_mut().drag(x),
            None => Vec::new(),
        });
        self.listen(track, "mouseup", ListenOptions::default(), |inner, event| {
            let dragging = inner.core.borrow().gesture().source() == Some(InputSource::Pointer);
            if !dragging {
                return Vec::new();
            }
            let actions = inner.core.borrow_mut().release(mouse_x(event), now_ms());
            if actions.contains(&Action::PreventDefault) {
                event.stop_propagation();
            }
            actions
        });
        self.listen(track, "mouseleave", ListenOptions::default(), |inner, _| {
            let dragging = inner.core.borrow().gesture().source() == Some(InputSource::Pointer);
            if dragging { inner.core.borrow_mut().cancel(now_ms()) } else { Vec::new() }
        });

        // Swallow the click a committed drag would otherwise deliver to slide content.
        let document = self.dom.document.clone();
        self.listen(&document, "click", ListenOptions::CAPTURE, |inner, event| {
            if inner.core.borrow().clicks_suppressed(now_ms()) && event_within(event, &inner.dom.track) {
                event.prevent_default();
                event.stop_propagation();
                event.stop_immediate_propagation();
            }
            Vec::new()
        });
    }

    fn wire_autoplay_pause(self: &Rc<Self>) {
        let container = &self.dom.container;
        self.listen(container, "mouseenter", ListenOptions::default(), |inner, _| {
            inner.core.borrow_mut().pointer_enter()
        });
        self.listen(container, "mouseleave", ListenOptions::default(), |inner, _| {
            inner.core.borrow_mut().pointer_leave()
        });
        self.listen(container, "touchstart", ListenOptions::PASSIVE, |inner, _| {
            inner.core.borrow_mut().pointer_enter()
        });
        self.listen(container, "touchend", ListenOptions::default(), |inner, _| {
            inner.core.borrow_mut().pointer_leave()
        });
    }
}
