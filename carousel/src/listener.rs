//! Owned DOM event listeners.
//!
//! A [`Listener`] keeps the exact closure it registered, so dropping it can
//! remove that same function from its target. Holding every listener this way
//! is what lets a carousel (or the page bootstrap) tear down cleanly.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::error::CarouselError;

/// How a listener is registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenOptions {
    /// Listen in the capture phase.
    pub capture: bool,
    /// Explicit passive flag; `None` leaves the browser default.
    pub passive: Option<bool>,
}

impl ListenOptions {
    /// Passive listener: the handler never cancels the default.
    pub const PASSIVE: Self = Self { capture: false, passive: Some(true) };
    /// Non-passive listener: the handler may cancel scrolling.
    pub const ACTIVE: Self = Self { capture: false, passive: Some(false) };
    /// Capture-phase listener.
    pub const CAPTURE: Self = Self { capture: true, passive: None };
}

/// An event listener that unregisters itself on drop.
#[derive(Debug)]
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Register `handler` for `kind` events on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Dom`] if the browser rejects the registration.
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        options: ListenOptions,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, CarouselError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let registration = AddEventListenerOptions::new();
        registration.set_capture(options.capture);
        if let Some(passive) = options.passive {
            registration.set_passive(passive);
        }
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &registration,
        )?;
        Ok(Self { target: target.clone(), kind, capture: options.capture, closure })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        ) {
            log::debug!("failed to remove {} listener: {err:?}", self.kind);
        }
    }
}
