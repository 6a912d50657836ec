//! Role-gated navigation.

pub mod shell;

pub use shell::{NavigationShell, ShellState};
