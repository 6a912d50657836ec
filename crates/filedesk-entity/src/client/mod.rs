//! Client organisation entities.

pub mod model;

pub use model::ClientRecord;
