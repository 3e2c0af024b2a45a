//! Alert workflow stepper
//!
//! Walks a fixed list of food-safety alerts by index. There is no branching:
//! each alert is either handled or skipped, and `back` undoes the last step.

use serde::{Deserialize, Serialize};
use shared::models::Alert;
use shared::{AppError, AppResult, ErrorCode};

/// What happened to a walked alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Handled,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertWorkflow {
    alerts: Vec<Alert>,
    outcomes: Vec<StepOutcome>,
}

impl AlertWorkflow {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self {
            outcomes: Vec::with_capacity(alerts.len()),
            alerts,
        }
    }

    /// Index of the current alert (== number of alerts walked)
    pub fn position(&self) -> usize {
        self.outcomes.len()
    }

    pub fn current(&self) -> Option<&Alert> {
        self.alerts.get(self.position())
    }

    pub fn is_finished(&self) -> bool {
        self.position() >= self.alerts.len()
    }

    /// `(walked, total)`
    pub fn progress(&self) -> (usize, usize) {
        (self.position(), self.alerts.len())
    }

    /// Mark the current alert handled and step to the next one
    pub fn advance(&mut self) -> AppResult<Option<&Alert>> {
        self.step(StepOutcome::Handled)
    }

    /// Leave the current alert unhandled and step to the next one
    pub fn skip(&mut self) -> AppResult<Option<&Alert>> {
        self.step(StepOutcome::Skipped)
    }

    fn step(&mut self, outcome: StepOutcome) -> AppResult<Option<&Alert>> {
        let Some(alert) = self.current() else {
            return Err(AppError::new(ErrorCode::WorkflowFinished));
        };
        tracing::debug!(alert_id = alert.id, ?outcome, "Alert step");
        self.outcomes.push(outcome);
        Ok(self.current())
    }

    /// Step back to the previous alert, forgetting its outcome
    pub fn back(&mut self) -> Option<&Alert> {
        self.outcomes.pop()?;
        self.current()
    }

    /// Ids of the alerts walked with `outcome`, in walk order
    pub fn ids_with(&self, outcome: StepOutcome) -> Vec<i64> {
        self.alerts
            .iter()
            .zip(&self.outcomes)
            .filter(|(_, o)| **o == outcome)
            .map(|(a, _)| a.id)
            .collect()
    }
}
