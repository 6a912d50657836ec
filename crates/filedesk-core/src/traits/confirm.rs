//! Confirmation step for destructive or session-ending actions.

use crate::result::AppResult;

/// Asks the user to confirm an action before it happens.
///
/// The CLI answers through an interactive prompt; `--force` flags and tests
/// use [`AutoConfirm`].
pub trait Confirmer: Send + Sync {
    /// Return `true` to proceed, `false` to cancel.
    fn confirm(&self, prompt: &str) -> AppResult<bool>;
}

/// A confirmer that always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> AppResult<bool> {
        Ok(self.0)
    }
}
