//! Session persistence, the shared session context and role resolution.

pub mod context;
pub mod memory;
pub mod role;
pub mod store;

pub use context::SessionContext;
pub use memory::MemorySessionStore;
pub use role::{RoleResolver, role_from_username};
pub use store::{FileSessionStore, SessionStore};
