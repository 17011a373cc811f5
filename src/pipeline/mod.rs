//! Pipeline entry points.
//!
//! - `run_poll`: Poll every configured topic once and notify new articles

pub mod diff;
pub mod poll;

pub use diff::new_identifiers;
pub use poll::run_poll;
