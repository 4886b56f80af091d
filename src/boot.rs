//! Two-phase page bootstrap.
//!
//! Phase one runs when the DOM is parsed: the info box is wired and a first
//! carousel scan mounts what is already laid out. Phase two runs on window
//! `load`, once images have their natural sizes: the show cards are
//! arranged and a second scan follows after a short delay to pick up
//! containers that only became complete late. The registry makes the second
//! scan a no-op for containers mounted in phase one.

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

use carousel::listener::{ListenOptions, Listener};
use gloo_timers::callback::Timeout;
use web_sys::{Document, DocumentReadyState, EventTarget};

use crate::{disclosure, shows_grid, with_page};

/// Delay between window `load` and the late carousel scan.
pub const LATE_SCAN_MS: u32 = 100;

/// Which phases have already passed for a given `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phases {
    pub dom_ready: bool,
    pub loaded: bool,
}

impl Phases {
    #[must_use]
    pub fn for_ready_state(state: DocumentReadyState) -> Self {
        match state {
            DocumentReadyState::Interactive => Self { dom_ready: true, loaded: false },
            DocumentReadyState::Complete => Self { dom_ready: true, loaded: true },
            _ => Self { dom_ready: false, loaded: false },
        }
    }
}

/// Run each phase now if it has passed, otherwise when its event fires.
pub fn install() {
    let Some(window) = web_sys::window() else {
        log::debug!("no window; bootstrap skipped");
        return;
    };
    let Some(document) = window.document() else {
        log::debug!("no document; bootstrap skipped");
        return;
    };
    let phases = Phases::for_ready_state(document.ready_state());

    if phases.dom_ready {
        dom_ready(&document);
    } else {
        let target = document.clone();
        defer(&document, "DOMContentLoaded", move || dom_ready(&target));
    }

    if phases.loaded {
        loaded(&document);
    } else {
        let target = document.clone();
        defer(&window, "load", move || loaded(&target));
    }
}

fn defer(target: &EventTarget, kind: &'static str, run: impl Fn() + 'static) {
    match Listener::attach(target, kind, ListenOptions::default(), move |_event| run()) {
        Ok(listener) => with_page(|page| page.boot_listeners.push(listener)),
        Err(err) => log::warn!("failed to defer {kind} bootstrap: {err}"),
    }
}

fn dom_ready(document: &Document) {
    let toggle = disclosure::mount(document);
    with_page(|page| {
        page.disclosure = toggle;
        scan(page, document, "initial");
    });
}

fn loaded(document: &Document) {
    shows_grid::arrange(document);
    let target = document.clone();
    let late = Timeout::new(LATE_SCAN_MS, move || with_page(|page| scan(page, &target, "late")));
    with_page(|page| page.late_scan = Some(late));
}

fn scan(page: &mut crate::PageState, document: &Document, phase: &str) {
    match page.registry.scan(document) {
        Ok(count) => log::info!("{phase} scan mounted {count} carousel(s)"),
        Err(err) => log::warn!("{phase} carousel scan failed: {err}"),
    }
}
