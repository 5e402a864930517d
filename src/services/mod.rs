//! Selection engine services

pub mod collections;
pub mod engine;
pub mod episodes;
pub mod order_type;
pub mod pool;
pub mod tie_break;

pub use collections::{CollectionExpander, CollectionNaming, CollectionPeer};
pub use engine::{CustomOrderSelector, SelectionEngine, SelectionResult};
pub use episodes::EpisodeResolver;
pub use order_type::{OrderType, select_order_type};
pub use pool::select_from_pool;
pub use tie_break::{ChronologicalTieBreaker, TieBreakOutcome};
