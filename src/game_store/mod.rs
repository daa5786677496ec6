//! Cached access to the game dataset.
//!
//! [`GameStore`] owns the in-memory snapshot and its freshness window;
//! [`GameSource`] implementations supply the raw records from the remote
//! URL or the local fallback file.

pub mod source;
pub mod store;

pub use source::{GameSource, HttpGameSource, LocalFileSource, decode_games};
pub use store::GameStore;
