//! Terminal renderer for the hero banner.

mod inline;

pub use inline::InlineRenderer;
