//! Show-card arrangement on the repertoire page.
//!
//! Cards sit in a two-column CSS grid. A portrait card takes the first
//! column and pulls a directly following landscape card into the second
//! column of the same row; a landscape card on its own spans both columns.
//! Orientation classes are assigned elsewhere once the card images load.

#[cfg(test)]
#[path = "shows_grid_test.rs"]
mod shows_grid_test;

use carousel::dom::{elements, set_style};
use web_sys::{Document, Element};

pub const HOLDER_SELECTOR: &str = ".shows-holder";
pub const CARD_SELECTOR: &str = ".show-card";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Read the orientation class; `None` for a card not yet classified.
    #[must_use]
    pub fn from_classes(has_class: impl Fn(&str) -> bool) -> Option<Self> {
        if has_class("portrait") {
            Some(Self::Portrait)
        } else if has_class("landscape") {
            Some(Self::Landscape)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    First,
    Second,
    /// Both columns.
    Span,
}

impl Column {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::First => "1",
            Self::Second => "2",
            Self::Span => "1 / 3",
        }
    }
}

/// Grid position for the card at index `card`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub card: usize,
    pub column: Column,
    pub row: u32,
}

/// Plan grid positions for cards in document order.
///
/// Rows start at 1. Unclassified cards get no placement and take no row.
#[must_use]
pub fn plan(cards: &[Option<Orientation>]) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(cards.len());
    let mut row = 1;
    let mut index = 0;
    while index < cards.len() {
        match cards[index] {
            Some(Orientation::Portrait) => {
                placements.push(Placement { card: index, column: Column::First, row });
                if cards.get(index + 1) == Some(&Some(Orientation::Landscape)) {
                    index += 1;
                    placements.push(Placement { card: index, column: Column::Second, row });
                }
                row += 1;
            }
            Some(Orientation::Landscape) => {
                placements.push(Placement { card: index, column: Column::Span, row });
                row += 1;
            }
            None => {}
        }
        index += 1;
    }
    placements
}

/// Apply [`plan`] to the cards of the first `.shows-holder`. Returns the
/// number of cards placed.
pub fn arrange(document: &Document) -> usize {
    let holder = match document.query_selector(HOLDER_SELECTOR) {
        Ok(Some(holder)) => holder,
        Ok(None) => {
            log::debug!("no {HOLDER_SELECTOR} on this page");
            return 0;
        }
        Err(err) => {
            log::debug!("holder lookup failed: {err:?}");
            return 0;
        }
    };
    let cards = match holder.query_selector_all(CARD_SELECTOR) {
        Ok(list) => elements(&list),
        Err(err) => {
            log::debug!("card lookup failed: {err:?}");
            return 0;
        }
    };

    let orientations: Vec<_> = cards
        .iter()
        .map(|card| {
            let classes = card.class_list();
            Orientation::from_classes(|class| classes.contains(class))
        })
        .collect();
    let placements = plan(&orientations);
    for placement in &placements {
        if let Some(card) = cards.get(placement.card) {
            place(card, *placement);
        }
    }
    log::debug!("arranged {} of {} show card(s)", placements.len(), cards.len());
    placements.len()
}

fn place(card: &Element, placement: Placement) {
    set_style(card, "grid-column", placement.column.css());
    set_style(card, "grid-row", &placement.row.to_string());
}
