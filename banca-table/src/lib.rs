//! Configuration-driven data table engine.
//!
//! A view describes its table declaratively with a [`TableConfig`] and hands
//! its rows to a [`TableEngine`], which searches, paginates and formats
//! them. The engine performs no I/O; create and row-action requests are
//! queued as [`TableEvent`]s for the owning view to route.

pub mod config;
pub mod filter;
pub mod format;
pub mod paginate;
pub mod path;

mod engine;

pub use config::Action;
pub use config::ActionKind;
pub use config::BadgeConfig;
pub use config::Column;
pub use config::ColumnKind;
pub use config::TableConfig;
pub use engine::PageRecovery;
pub use engine::TableEngine;
pub use engine::TableEvent;
pub use paginate::PageLink;
