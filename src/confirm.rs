//! Confirmation of destructive operations.

use inquire::Confirm;
use tracing::debug;

pub trait Confirmer {
    /// Asks `prompt`; true means proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Interactive yes/no prompt on the terminal. Defaults to "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct InquireConfirmer;

impl Confirmer for InquireConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        match Confirm::new(prompt).with_default(false).prompt() {
            Ok(answer) => answer,
            Err(e) => {
                // no terminal, or the prompt was interrupted
                debug!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }
}

/// Fixed answer, used for `--yes` and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssumeAnswer(pub bool);

impl Confirmer for AssumeAnswer {
    fn confirm(&self, prompt: &str) -> bool {
        debug!("Answering '{}' with {}", prompt, self.0);
        self.0
    }
}

pub static ASSUME_YES: AssumeAnswer = AssumeAnswer(true);
