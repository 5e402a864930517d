//! Next-up selection engine for a personal media queue.
//!
//! Given a weighted mix of content pools and a read-only catalog of
//! watched/unwatched movies and series, the engine narrows down to one
//! concrete thing to watch next: a show's next unwatched episode, or a
//! specific movie. Cross-referenced items ("collections") are pulled into
//! the decision so franchises are offered in chronological order even when
//! they span movies and TV.
//!
//! REST routing, persistence, and UI belong to the embedding application;
//! this crate is the decision logic those layers call.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod services;

pub use catalog::{Catalog, CatalogError, CatalogItemRecord, EpisodeRecord, MediaKind, MemoryCatalog};
pub use config::{OrderTypeWeights, SelectionSettings};
pub use services::{
    CustomOrderSelector, OrderType, SelectionEngine, SelectionResult, select_order_type,
};
