//! # filedesk-entity
//!
//! Domain records for the FileDesk console. Every struct here mirrors a
//! JSON shape returned by the file-exchange backend, or a value the console
//! keeps locally (the session, a file picked for upload). All records
//! derive `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod activity;
pub mod client;
pub mod file;
pub mod session;
pub mod user;

mod wire;
