//! Slide layout: pages, clone slots, and the geometry derived from them.
//!
//! DESIGN
//! ======
//! The track is modeled as an index-addressed sequence of [`Slot`]s. A slot is
//! either a real page or one of the two clone sentinels that fake an endless
//! loop. The DOM host owns the actual elements and materializes them from
//! this sequence, so "re-anchoring" off a clone is only an index rewrite.
//!
//! Pages are half-open ranges into the flat item list. For every variant
//! except Repertory a page is exactly one original slide.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::FULL_WIDTH_PERCENT;

/// One position on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A real page, by page index.
    Page(usize),
    /// Clone of the last page, placed before the first.
    LeadClone,
    /// Clone of the first page, placed after the last.
    TrailClone,
}

impl Slot {
    /// The page whose content this slot shows.
    #[must_use]
    pub fn source_page(self, page_count: usize) -> usize {
        match self {
            Self::Page(index) => index,
            Self::LeadClone => page_count.saturating_sub(1),
            Self::TrailClone => 0,
        }
    }

    /// Whether this slot is one of the two wraparound sentinels.
    #[must_use]
    pub fn is_clone(self) -> bool {
        matches!(self, Self::LeadClone | Self::TrailClone)
    }
}

/// A half-open range `start..end` of item indices forming one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: usize,
    pub end: usize,
}

impl Page {
    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `item_count` items into consecutive pages of at most `per_page` items.
///
/// The final page holds the remainder. A `per_page` of zero is treated as one.
#[must_use]
pub fn chunk_pages(item_count: usize, per_page: usize) -> Vec<Page> {
    let per_page = per_page.max(1);
    (0..item_count)
        .step_by(per_page)
        .map(|start| Page { start, end: (start + per_page).min(item_count) })
        .collect()
}

/// Lay out the track for `page_count` pages.
///
/// Wrapping layouts with at least two pages get a lead clone of the last page
/// and a trail clone of the first, so `slots.len() == page_count + 2`.
#[must_use]
pub fn build_slots(page_count: usize, wraps: bool) -> Vec<Slot> {
    let pages = (0..page_count).map(Slot::Page);
    if wraps && page_count > 1 {
        std::iter::once(Slot::LeadClone)
            .chain(pages)
            .chain(std::iter::once(Slot::TrailClone))
            .collect()
    } else {
        pages.collect()
    }
}

/// Column/row shape of a synthesized repertory page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
}

/// Grid shape for a page holding up to `per_page` items: 2×2 for the mobile
/// count of four, 3×2 otherwise.
#[must_use]
pub fn grid_shape(per_page: usize) -> GridShape {
    if per_page == 4 { GridShape { columns: 2, rows: 2 } } else { GridShape { columns: 3, rows: 2 } }
}

/// Width of one slide in a strip showing `visible` slides, as a percentage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn strip_width_percent(visible: usize) -> f64 {
    FULL_WIDTH_PERCENT / visible.max(1) as f64
}
