//! Line-oriented input/output collaborator used by interactive commands.

use async_trait::async_trait;

use crate::error::ConsoleError;

/// Style hint for highlighted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Success,
    Failure,
    Score,
}

#[async_trait]
pub trait Console: Send {
    /// Show `prompt` and wait for one line of input, without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Closed` at end of input.
    async fn prompt_line(&mut self, prompt: &str) -> Result<String, ConsoleError>;

    fn report_line(&mut self, text: &str);

    fn report_emphasized(&mut self, text: &str, emphasis: Emphasis);

    fn report_error(&mut self, text: &str);
}
