//! Access token claim decoding.

pub mod claims;

pub use claims::TokenClaims;
