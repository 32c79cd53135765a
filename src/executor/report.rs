//! Per-step outcomes and the run report.

use super::error::StepError;
use crate::template::WorkStep;
use std::time::Duration;

/// What happened when one step was executed.
#[derive(Debug)]
pub struct StepOutcome {
    /// Zero-based position of the step in the template
    pub index: usize,

    /// Step label from the template
    pub name: String,

    /// Method as declared in the template
    pub method: String,

    /// Resolved URL, once it could be composed
    pub url: Option<String>,

    /// Status code of the response, if one arrived
    pub status_code: Option<u16>,

    /// Time spent on the step, including extraction
    pub duration: Duration,

    /// `Ok(())` when the status matched and extraction ran
    pub result: Result<(), StepError>,
}

impl StepOutcome {
    pub(crate) fn new(index: usize, step: &WorkStep) -> Self {
        Self {
            index,
            name: step.name.clone(),
            method: step.method.clone(),
            url: None,
            status_code: None,
            duration: Duration::ZERO,
            result: Ok(()),
        }
    }

    /// Whether the step succeeded.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }

    /// The failure, if the step failed.
    pub fn error(&self) -> Option<&StepError> {
        self.result.as_ref().err()
    }
}

/// Outcomes of a whole run, in execution order.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of steps in the template
    pub total_steps: usize,

    /// One outcome per executed step
    pub outcomes: Vec<StepOutcome>,

    /// True when fail-fast stopped the run before the last step
    pub halted: bool,
}

impl RunReport {
    pub(crate) fn new(total_steps: usize) -> Self {
        Self {
            total_steps,
            outcomes: Vec::with_capacity(total_steps),
            halted: false,
        }
    }

    /// Number of steps that were executed
    pub fn executed(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of steps that succeeded
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of steps that failed
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }

    /// Failed outcomes in execution order
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// True when every step ran and succeeded
    pub fn all_passed(&self) -> bool {
        !self.halted && self.executed() == self.total_steps && self.failed() == 0
    }
}
