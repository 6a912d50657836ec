//! Value types shared across the FileDesk workspace.

pub mod date_range;
pub mod id;

pub use date_range::{DATE_FORMAT, DateRange, parse_date};
pub use id::*;
