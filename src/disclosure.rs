//! Creators info box: a button that opens and closes a panel.
//!
//! The panel carries the `active` class while open; the button's icon swaps
//! between `fa-plus` (closed) and `fa-minus` (open).

#[cfg(test)]
#[path = "disclosure_test.rs"]
mod disclosure_test;

use carousel::dom::set_class;
use carousel::listener::{ListenOptions, Listener};
use web_sys::{Document, Element};

pub const TOGGLE_ID: &str = "toggleCreators";
pub const BOX_ID: &str = "creatorsBox";
pub const OPEN_CLASS: &str = "active";
pub const OPEN_ICON: &str = "fa-minus";
pub const CLOSED_ICON: &str = "fa-plus";

/// Open/closed state of the info box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disclosure {
    open: bool,
}

impl Disclosure {
    #[must_use]
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Flip the state and return whether the box is now open.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Icon class to show for the current state.
    #[must_use]
    pub fn icon(self) -> &'static str {
        if self.open { OPEN_ICON } else { CLOSED_ICON }
    }

    /// Icon class to remove for the current state.
    #[must_use]
    pub fn stale_icon(self) -> &'static str {
        if self.open { CLOSED_ICON } else { OPEN_ICON }
    }
}

/// Wire the toggle button. Returns `None` (with a debug log) when the
/// button, the box or the icon is missing from the page.
pub fn mount(document: &Document) -> Option<Listener> {
    let Some(button) = document.get_element_by_id(TOGGLE_ID) else {
        log::debug!("no #{TOGGLE_ID} on this page");
        return None;
    };
    let Some(panel) = document.get_element_by_id(BOX_ID) else {
        log::debug!("no #{BOX_ID} on this page");
        return None;
    };
    let icon = match button.query_selector("i") {
        Ok(Some(icon)) => icon,
        Ok(None) => {
            log::debug!("#{TOGGLE_ID} has no icon");
            return None;
        }
        Err(err) => {
            log::debug!("icon lookup failed: {err:?}");
            return None;
        }
    };

    let mut state = Disclosure::new(panel.class_list().contains(OPEN_CLASS));
    let attached = Listener::attach(&button, "click", ListenOptions::default(), move |_event| {
        state.toggle();
        render(state, &panel, &icon);
    });
    match attached {
        Ok(listener) => Some(listener),
        Err(err) => {
            log::debug!("failed to wire #{TOGGLE_ID}: {err}");
            None
        }
    }
}

fn render(state: Disclosure, panel: &Element, icon: &Element) {
    set_class(panel, OPEN_CLASS, state.is_open());
    set_class(icon, state.stale_icon(), false);
    set_class(icon, state.icon(), true);
}
