//! Page bootstrap for the theatre website.
//!
//! Compiled to WebAssembly and loaded once per page. The start hook installs
//! logging and the panic hook, then [`boot`] mounts the page's interactive
//! pieces: every carousel (through the [`carousel`] crate's registry), the
//! creators info box ([`disclosure`]) and the show-card grid
//! ([`shows_grid`]).
//!
//! Two functions are exported for hand-written page scripts:
//! `initialize_carousels()` rescans for new containers and
//! `dispose_carousels()` tears every mounted carousel down.

pub mod boot;
pub mod disclosure;
pub mod shows_grid;

use std::cell::RefCell;

use carousel::Registry;
use carousel::listener::Listener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;

/// Everything the page keeps alive between events.
#[derive(Debug, Default)]
pub struct PageState {
    pub registry: Registry,
    /// Info box toggle, once mounted.
    pub disclosure: Option<Listener>,
    /// `DOMContentLoaded` / `load` hooks waiting to fire.
    pub boot_listeners: Vec<Listener>,
    /// Rescan scheduled after `load`.
    pub late_scan: Option<Timeout>,
}

thread_local! {
    static PAGE: RefCell<PageState> = RefCell::new(PageState::default());
}

/// Run `f` with the page state borrowed mutably.
pub(crate) fn with_page<R>(f: impl FnOnce(&mut PageState) -> R) -> R {
    PAGE.with(|page| f(&mut page.borrow_mut()))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
    boot::install();
}

/// Mount carousels on containers not seen before. Returns how many were mounted.
#[wasm_bindgen]
pub fn initialize_carousels() -> usize {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return 0;
    };
    with_page(|page| match page.registry.scan(&document) {
        Ok(count) => count,
        Err(err) => {
            log::warn!("carousel scan failed: {err}");
            0
        }
    })
}

/// Dispose every mounted carousel and forget skipped containers.
#[wasm_bindgen]
pub fn dispose_carousels() {
    with_page(|page| {
        if page.registry.is_empty() {
            log::debug!("no carousels mounted");
        } else {
            log::info!("disposing {} carousel(s)", page.registry.len());
        }
        page.registry.dispose_all();
    });
}
