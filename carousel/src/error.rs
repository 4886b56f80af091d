//! Errors raised while mounting a carousel onto its container.
//!
//! Nothing here is fatal to the page: the registry logs the error at debug
//! level and leaves the container as plain markup.

use wasm_bindgen::JsValue;

/// Error returned by [`crate::host::Carousel::mount`].
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// None of the track selector candidates matched inside the container.
    #[error("carousel container has no track element")]
    MissingTrack,
    /// A paging variant found fewer than two slides, so there is nothing to page through.
    #[error("carousel needs at least 2 slides, found {count}")]
    TooFewSlides { count: usize },
    /// The `data-carousel` attribute did not hold a valid config object.
    #[error("invalid carousel config: {0}")]
    Config(#[from] serde_json::Error),
    /// A DOM call threw.
    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for CarouselError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
