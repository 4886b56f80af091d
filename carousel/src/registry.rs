//! Page-wide carousel registry.
//!
//! Scanning is idempotent: a container already mounted (or already found
//! unusable) is recognised by node identity and never touched twice, so the
//! bootstrap can rescan after late layout without duplicating listeners.
//!
//! The bookkeeping lives in [`Ledger`], which knows nothing about the DOM and
//! is tested natively; [`Registry`] feeds it the page's containers.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::fmt::Display;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::elements;
use crate::error::CarouselError;
use crate::host::Carousel;
use crate::variant::CONTAINER_SELECTOR;

/// Mounted and skipped entries, keyed by identity.
///
/// For DOM elements `PartialEq` is JS `===`, i.e. node identity.
#[derive(Debug)]
pub struct Ledger<K, V> {
    mounted: Vec<(K, V)>,
    skipped: Vec<K>,
}

impl<K, V> Default for Ledger<K, V> {
    fn default() -> Self {
        Self { mounted: Vec::new(), skipped: Vec::new() }
    }
}

impl<K: PartialEq, V> Ledger<K, V> {
    /// Whether `key` was already mounted or skipped.
    #[must_use]
    pub fn knows(&self, key: &K) -> bool {
        self.mounted.iter().any(|(known, _)| known == key) || self.skipped.contains(key)
    }

    /// Try `mount` on every candidate not seen before.
    ///
    /// Successes are recorded as mounted, failures as skipped so they are not
    /// retried. Returns how many were newly mounted.
    pub fn admit<E: Display>(
        &mut self,
        candidates: impl IntoIterator<Item = K>,
        mut mount: impl FnMut(&K) -> Result<V, E>,
    ) -> usize {
        let mut mounted = 0;
        for key in candidates {
            if self.knows(&key) {
                continue;
            }
            match mount(&key) {
                Ok(value) => {
                    self.mounted.push((key, value));
                    mounted += 1;
                }
                Err(err) => {
                    log::debug!("skipping carousel container: {err}");
                    self.skipped.push(key);
                }
            }
        }
        mounted
    }

    /// Forget everything, handing back the mounted values in mount order.
    pub fn forget_all(&mut self) -> Vec<V> {
        self.skipped.clear();
        self.mounted.drain(..).map(|(_, value)| value).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    #[must_use]
    pub fn skipped_len(&self) -> usize {
        self.skipped.len()
    }
}

/// Every carousel mounted on a page, plus containers that were skipped.
#[derive(Debug, Default)]
pub struct Registry {
    ledger: Ledger<Element, Carousel>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a carousel on every recognised container not seen before.
    ///
    /// Returns how many carousels were newly mounted. Containers that fail
    /// to mount are logged and remembered so later scans skip them.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Dom`] if the container query itself fails.
    pub fn scan(&mut self, document: &Document) -> Result<usize, CarouselError> {
        let containers = elements(&document.query_selector_all(CONTAINER_SELECTOR)?);
        Ok(self.ledger.admit(containers, |container| {
            let html = container
                .dyn_ref::<HtmlElement>()
                .cloned()
                .ok_or_else(|| CarouselError::Dom("container is not an HTML element".into()))?;
            let carousel = Carousel::mount(html)?;
            log::info!("carousel {} mounted as {:?}", carousel.id(), carousel.variant());
            Ok::<_, CarouselError>(carousel)
        }))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Dispose and forget every carousel. Skipped containers are forgotten
    /// too; disposal restores each container's markup, so a later scan can
    /// mount them afresh.
    pub fn dispose_all(&mut self) {
        for carousel in self.ledger.forget_all() {
            carousel.dispose();
        }
    }
}
