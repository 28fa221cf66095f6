use std::sync::Arc;

use clap::ValueEnum;
use failfast_runner::{
    BoundRunner, Context, ErrorSlot, LoggingObserver, Observer, StepJournal, StepMetrics,
};
use thiserror::Error;
use tracing::debug;

/// The steps of the demo workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Step {
    Validate,
    Fetch,
    Process,
    Save,
}

impl Step {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Step::Validate => "validate input",
            Step::Fetch => "fetch data",
            Step::Process => "process data",
            Step::Save => "save result",
        }
    }
}

/// Which step, if any, should fail. Stored in the execution context.
#[derive(Debug, Clone, Copy)]
struct FailurePlan(Option<Step>);

impl FailurePlan {
    fn fails(ctx: &Context, step: Step) -> bool {
        ctx.get::<FailurePlan>()
            .is_some_and(|plan| plan.0 == Some(step))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DemoError {
    #[error("input rejected: {0}")]
    InvalidInput(String),

    #[error("record source unavailable")]
    SourceUnavailable,

    #[error("processing failed")]
    ProcessingFailed,

    #[error("total exceeds {}", u64::MAX)]
    Overflow,

    #[error("could not store result {0}")]
    StoreFailed(u64),
}

#[derive(Debug, Default)]
struct WorkflowState {
    input: String,
    records: Vec<u64>,
    total: Option<u64>,
    saved: Option<u64>,
}

/// Outcome of a workflow run.
#[derive(Debug)]
pub struct WorkflowReport {
    pub outcome: Result<(), DemoError>,
    pub saved: Option<u64>,
    pub journal: Arc<StepJournal>,
    pub metrics: Arc<StepMetrics>,
}

/// Run validate, fetch, process and save with fail-fast semantics.
#[must_use]
pub fn run_workflow(input: &str, trace_id: Option<&str>, fail_at: Option<Step>) -> WorkflowReport {
    let mut ctx = Context::new().with(FailurePlan(fail_at));
    if let Some(trace_id) = trace_id {
        ctx = ctx.with_trace_id(trace_id);
    }

    let journal = Arc::new(StepJournal::new());
    let metrics = Arc::new(StepMetrics::new());
    let observers: Vec<Box<dyn Observer<DemoError>>> = vec![
        Box::new(LoggingObserver::new()),
        Box::new(Arc::clone(&journal)),
        Box::new(Arc::clone(&metrics)),
    ];
    let run = BoundRunner::new(ctx, observers);

    let mut state = WorkflowState {
        input: input.to_string(),
        ..WorkflowState::default()
    };
    let mut slot = ErrorSlot::new();

    run.run(&mut slot, Step::Validate.label(), |ctx| validate(ctx, &state));
    run.run(&mut slot, Step::Fetch.label(), |ctx| fetch(ctx, &mut state));
    run.run(&mut slot, Step::Process.label(), |ctx| process(ctx, &mut state));
    run.run(&mut slot, Step::Save.label(), |ctx| save(ctx, &mut state));

    WorkflowReport {
        outcome: slot.into_result(),
        saved: state.saved,
        journal,
        metrics,
    }
}

fn validate(ctx: &Context, state: &WorkflowState) -> Result<(), DemoError> {
    if FailurePlan::fails(ctx, Step::Validate) {
        return Err(DemoError::InvalidInput("rejected on request".to_string()));
    }
    if state.input.trim().is_empty() {
        return Err(DemoError::InvalidInput("empty input".to_string()));
    }
    Ok(())
}

fn fetch(ctx: &Context, state: &mut WorkflowState) -> Result<(), DemoError> {
    if FailurePlan::fails(ctx, Step::Fetch) {
        return Err(DemoError::SourceUnavailable);
    }
    state.records = state
        .input
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u64>()
                .map_err(|_| DemoError::InvalidInput(part.to_string()))
        })
        .collect::<Result<_, _>>()?;
    debug!(count = state.records.len(), "fetched records");
    Ok(())
}

fn process(ctx: &Context, state: &mut WorkflowState) -> Result<(), DemoError> {
    if FailurePlan::fails(ctx, Step::Process) || state.records.is_empty() {
        return Err(DemoError::ProcessingFailed);
    }
    let total = state
        .records
        .iter()
        .try_fold(0u64, |total, &record| total.checked_add(record))
        .ok_or(DemoError::Overflow)?;
    state.total = Some(total);
    Ok(())
}

fn save(ctx: &Context, state: &mut WorkflowState) -> Result<(), DemoError> {
    let total = state.total.ok_or(DemoError::ProcessingFailed)?;
    if FailurePlan::fails(ctx, Step::Save) {
        return Err(DemoError::StoreFailed(total));
    }
    state.saved = Some(total);
    Ok(())
}
