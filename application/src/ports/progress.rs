//! Progress notification port
//!
//! The pipeline reports phase transitions and per-task completions through
//! this trait so the presentation layer can render spinners or plain logs
//! without the use case knowing which.

use crate::use_cases::run_review::Phase;

/// Receives progress events during a review run
pub trait ProgressNotifier: Send + Sync {
    /// A phase is starting with the given number of tasks
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// One task within the current phase finished
    fn on_task_complete(&self, phase: &Phase, subject: &str, success: bool);

    /// The phase finished
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op notifier for callers that do not care about progress
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _subject: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
