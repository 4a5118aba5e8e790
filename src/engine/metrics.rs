//! Pipeline run metrics.
//!
//! Collected only by [`Plan::run_with_metrics`](super::plan::Plan::run_with_metrics);
//! the plain [`Plan::run`](super::plan::Plan::run) path records nothing and
//! never clones intermediate texts.

use super::pipeline::Stage;
use std::time::Duration;

/// What a single pipeline step did.
#[derive(Debug, Clone)]
pub struct StepMetrics {
    pub stage: Stage,
    /// Human-readable step description.
    pub label: String,
    /// Working text after the step.
    pub output: String,
    /// The step could not change the text and was not executed.
    pub skipped: bool,
    pub duration: Duration,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Text after ignored code points were removed and the text was composed.
    pub prepared: String,
    pub steps: Vec<StepMetrics>,
    /// Time spent in the filter and collapse pass.
    pub filter: Duration,
}
