//! Per-record outcomes and the end-of-run summary.
//!
//! Each record moves through `Pending → Rendered → Delivered`, or drops to
//! `Failed` from either non-terminal state. Nothing is retried.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use uuid::Uuid;

/// Processing state of one record within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordState {
    /// Loaded, not yet rendered.
    Pending,
    /// Document written, not yet delivered.
    Rendered,
    /// Document delivered. Terminal.
    Delivered,
    /// Processing stopped on an error. Terminal.
    Failed,
}

impl RecordState {
    /// Returns true for `Delivered` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }

    /// Returns true if moving from `self` to `next` is a legal transition.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_mailer::models::RecordState;
    ///
    /// assert!(RecordState::Pending.can_transition_to(RecordState::Rendered));
    /// assert!(!RecordState::Pending.can_transition_to(RecordState::Delivered));
    /// assert!(!RecordState::Failed.can_transition_to(RecordState::Rendered));
    /// ```
    pub fn can_transition_to(self, next: RecordState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Rendered)
                | (Self::Pending, Self::Failed)
                | (Self::Rendered, Self::Delivered)
                | (Self::Rendered, Self::Failed)
        )
    }
}

/// The final outcome of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Employee the record belongs to.
    pub employee_id: String,
    /// Employee display name, for log lines.
    pub name: String,
    /// Terminal state reached.
    pub state: RecordState,
    /// Last state reached before a failure; equals `state` on success.
    pub reached: RecordState,
    /// The generated document, if rendering succeeded.
    pub document: Option<PathBuf>,
    /// Failure cause, if the record failed.
    pub error: Option<String>,
}

impl RecordOutcome {
    /// Returns true if the payslip was rendered and delivered.
    pub fn is_success(&self) -> bool {
        self.state == RecordState::Delivered
    }
}

/// Tally of a completed batch run.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Identifier attached to every log line of the run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Outcomes in input order.
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchSummary {
    /// Creates an empty summary for a new run.
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            outcomes: Vec::new(),
        }
    }

    /// Number of records processed.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of records rendered and delivered.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of records that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Iterates over the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, state: RecordState, reached: RecordState) -> RecordOutcome {
        RecordOutcome {
            employee_id: id.to_string(),
            name: format!("Employee {}", id),
            state,
            reached,
            document: None,
            error: (state == RecordState::Failed).then(|| "boom".to_string()),
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(RecordState::Delivered.is_terminal());
        assert!(RecordState::Failed.is_terminal());
        assert!(!RecordState::Pending.is_terminal());
        assert!(!RecordState::Rendered.is_terminal());
    }

    #[test]
    fn test_no_transition_leaves_terminal_state() {
        for next in [
            RecordState::Pending,
            RecordState::Rendered,
            RecordState::Delivered,
            RecordState::Failed,
        ] {
            assert!(!RecordState::Delivered.can_transition_to(next));
            assert!(!RecordState::Failed.can_transition_to(next));
        }
    }

    #[test]
    fn test_rendered_can_fail() {
        assert!(RecordState::Rendered.can_transition_to(RecordState::Failed));
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = BatchSummary::new(Uuid::new_v4());
        summary.outcomes = vec![
            outcome("E1", RecordState::Delivered, RecordState::Delivered),
            outcome("E2", RecordState::Failed, RecordState::Pending),
            outcome("E3", RecordState::Delivered, RecordState::Delivered),
            outcome("E4", RecordState::Failed, RecordState::Rendered),
        ];

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 2);

        let failed_ids: Vec<&str> = summary.failures().map(|o| o.employee_id.as_str()).collect();
        assert_eq!(failed_ids, vec!["E2", "E4"]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::new(Uuid::new_v4());
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.failed(), 0);
    }
}
