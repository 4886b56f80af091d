//! Carousel controller for the theatre website.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It turns
//! each recognised slider container on a page into a working carousel:
//! arrows, pagination dots, touch and mouse swipes, infinite wrap through
//! clone slides, responsive relayout and autoplay. All navigation rules live
//! in the browser-free [`engine::CarouselCore`], which returns
//! [`engine::Action`]s for the DOM host to execute.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Navigation state machine and the [`engine::Action`] vocabulary |
//! | [`variant`] | The four carousel variants, their selectors and profiles |
//! | [`layout`] | Pages, clone slots and grid geometry |
//! | [`gesture`] | Press/swipe classification for touch and mouse |
//! | [`config`] | Per-container tuning read from `data-carousel` |
//! | [`host`] | DOM binding of one carousel: rendering, events, timers |
//! | [`registry`] | Page-wide discovery and disposal |
//! | [`listener`] | Event listeners that unregister on drop |
//! | [`dom`] | Small DOM helpers |
//! | [`error`] | Error type for mounting |
//! | [`consts`] | Shared timing and geometry constants |

pub mod config;
pub mod consts;
pub mod dom;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod host;
pub mod layout;
pub mod listener;
pub mod registry;
pub mod variant;

pub use error::CarouselError;
pub use host::Carousel;
pub use registry::Registry;
