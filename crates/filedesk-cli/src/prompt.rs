//! Interactive prompts built on `dialoguer`.

use dialoguer::{Confirm, Input, Password, Select};

use filedesk_core::AppResult;
use filedesk_core::error::AppError;
use filedesk_core::traits::Confirmer;

/// Asks on the terminal; anything but an explicit yes cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, prompt: &str) -> AppResult<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(input_error)
    }
}

/// Confirmer for a command with a `--force` flag.
pub fn confirmer(force: bool) -> Box<dyn Confirmer> {
    if force {
        Box::new(filedesk_core::traits::AutoConfirm(true))
    } else {
        Box::new(DialoguerConfirmer)
    }
}

pub fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {}", e))
}

pub fn text(prompt: &str, allow_empty: bool) -> AppResult<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(input_error)
}

pub fn password(prompt: &str) -> AppResult<String> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(input_error)
}

/// Pick one of `items`; `None` when the user backs out with Esc.
pub fn select<T: std::fmt::Display>(prompt: &str, items: &[T]) -> AppResult<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(input_error)
}
