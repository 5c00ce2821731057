//! Interactive prompt handling.

use anyhow::Result;

use crate::cmdutil::CancelError;

/// Trait for interactive terminal prompts.
pub trait Prompter: Send + Sync + std::fmt::Debug {
    /// Present a list of options and return the selected index.
    ///
    /// # Errors
    ///
    /// Returns [`CancelError`] if the user dismisses the prompt.
    fn select(&self, prompt: &str, default: Option<usize>, options: &[String]) -> Result<usize>;
}

/// Dialoguer-based prompter implementation.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, default: Option<usize>, options: &[String]) -> Result<usize> {
        let mut sel = dialoguer::Select::new().with_prompt(prompt).items(options);
        if let Some(d) = default {
            sel = sel.default(d);
        }
        sel.interact_opt()?.ok_or_else(|| CancelError.into())
    }
}

/// Stub prompter for testing that returns pre-configured answers.
#[derive(Debug, Default)]
pub struct StubPrompter {
    /// Pre-configured select answers (index).
    pub select_answers: std::sync::Mutex<Vec<usize>>,
    /// Option lists shown by `select`, in call order.
    pub shown_options: std::sync::Mutex<Vec<Vec<String>>>,
    /// Dismiss every `select`, as if the user pressed Esc.
    pub dismiss: std::sync::atomic::AtomicBool,
}

impl Prompter for StubPrompter {
    fn select(&self, _prompt: &str, default: Option<usize>, options: &[String]) -> Result<usize> {
        self.shown_options
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(options.to_vec());
        if self.dismiss.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(CancelError.into());
        }
        let mut answers = self
            .select_answers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if answers.is_empty() {
            Ok(default.unwrap_or(0))
        } else {
            Ok(answers.remove(0))
        }
    }
}
