//! Channel type definitions for inter-task communication

use tokio::sync::mpsc;

use super::errors::Result;
use super::types::Article;

/// Result of one fetch task, tagged with the report slot it belongs to
#[derive(Debug)]
pub struct SlotOutcome {
    pub slot: usize,
    pub articles: Result<Vec<Article>>,
}

/// Create a new outcome channel with room for `size` outcomes
///
/// Sizing the buffer to the number of tasks means no sender ever waits
/// on the coordinator.
pub fn create_outcome_channel(
    size: usize,
) -> (mpsc::Sender<SlotOutcome>, mpsc::Receiver<SlotOutcome>) {
    mpsc::channel(size.max(1))
}
