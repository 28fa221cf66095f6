//! Integration tests for runners with a bound context and observer list.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use failfast_runner::{
    BoundRunner, Context, ErrorSlot, Observer, StepJournal, StepMetrics, bind_runner, run_step,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
struct TestError(String);

type Log = Rc<RefCell<Vec<String>>>;

fn recording_observer(log: &Log) -> impl Observer<TestError> + 'static {
    let log = Rc::clone(log);
    move |ctx: &Context, error: Option<&TestError>, label: &str| {
        let trace = ctx.trace_id().unwrap_or("-");
        let entry = match error {
            None => format!("{trace} ok {label}"),
            Some(error) => format!("{trace} err {label}: {error}"),
        };
        log.borrow_mut().push(entry);
    }
}

fn workflow_steps() -> Vec<(&'static str, Result<(), TestError>)> {
    vec![
        ("one", Ok(())),
        ("two", Err(TestError("two failed".to_string()))),
        ("three", Ok(())),
    ]
}

#[test]
fn runner_can_be_reused_across_independent_slots() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let runner: BoundRunner<TestError> = BoundRunner::new(Context::new(), Vec::new())
        .with_observer(move |_: &Context, _: Option<&TestError>, _: &str| {
            *counter.borrow_mut() += 1;
        });

    let mut first = ErrorSlot::new();
    runner.run(&mut first, "operation 1", |_| Ok(()));

    let mut second = ErrorSlot::new();
    runner.run(&mut second, "operation 2", |_| {
        Err(TestError("error 2".to_string()))
    });

    assert_eq!(*calls.borrow(), 2);
    assert!(first.into_result().is_ok());
    assert_eq!(second.into_inner(), Some(TestError("error 2".to_string())));
}

#[test]
fn failure_in_one_slot_does_not_affect_another() {
    let runner: BoundRunner<TestError> = bind_runner(Context::new(), Vec::new());
    let mut failed = ErrorSlot::new();
    let mut healthy = ErrorSlot::new();
    let ran = RefCell::new(Vec::new());

    runner.run(&mut failed, "a", |_| Err(TestError("a failed".to_string())));
    runner.run(&mut healthy, "b", |_| {
        ran.borrow_mut().push("b");
        Ok(())
    });
    runner.run(&mut failed, "c", |_| {
        ran.borrow_mut().push("c");
        Ok(())
    });

    assert_eq!(*ran.borrow(), vec!["b"]);
    assert!(failed.is_failed());
    assert!(!healthy.is_failed());
}

#[test]
fn bound_runner_matches_direct_run_step_calls() {
    let ctx = Context::new().with_trace_id("req-123");

    let bound_log: Log = Rc::new(RefCell::new(Vec::new()));
    let runner: BoundRunner<TestError> =
        BoundRunner::new(ctx.clone(), Vec::new()).with_observer(recording_observer(&bound_log));
    let mut bound_first = ErrorSlot::new();
    let mut bound_second = ErrorSlot::new();
    for (label, outcome) in workflow_steps() {
        runner.run(&mut bound_first, label, |_| outcome);
    }
    for (label, outcome) in workflow_steps() {
        runner.run(&mut bound_second, label, |_| outcome);
    }

    let direct_log: Log = Rc::new(RefCell::new(Vec::new()));
    let observer = recording_observer(&direct_log);
    let mut direct_first = ErrorSlot::new();
    let mut direct_second = ErrorSlot::new();
    for (label, outcome) in workflow_steps() {
        run_step(&ctx, &mut direct_first, label, |_| outcome, &[&observer]);
    }
    for (label, outcome) in workflow_steps() {
        run_step(&ctx, &mut direct_second, label, |_| outcome, &[&observer]);
    }

    assert_eq!(*bound_log.borrow(), *direct_log.borrow());
    assert_eq!(
        *bound_log.borrow(),
        vec![
            "req-123 ok one",
            "req-123 err two: two failed",
            "req-123 ok one",
            "req-123 err two: two failed",
        ]
    );
    assert_eq!(bound_first.into_inner(), direct_first.into_inner());
    assert_eq!(bound_second.into_inner(), direct_second.into_inner());
}

#[test]
fn operations_and_observers_receive_bound_context() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let observed = Rc::clone(&seen);
    let runner: BoundRunner<TestError> =
        BoundRunner::new(Context::new().with_trace_id("trace-789"), Vec::new()).with_observer(
            move |ctx: &Context, _: Option<&TestError>, _: &str| {
                observed
                    .borrow_mut()
                    .push(format!("observer:{}", ctx.trace_id().unwrap_or("-")));
            },
        );
    let mut slot = ErrorSlot::new();

    runner.run(&mut slot, "test", |ctx| {
        seen.borrow_mut()
            .push(format!("operation:{}", ctx.trace_id().unwrap_or("-")));
        Ok(())
    });

    assert_eq!(
        *seen.borrow(),
        vec!["operation:trace-789", "observer:trace-789"]
    );
}

#[test]
fn shared_observers_stay_readable_after_binding() {
    let journal = Arc::new(StepJournal::new());
    let metrics = Arc::new(StepMetrics::new());
    let observers: Vec<Box<dyn Observer<TestError>>> = vec![
        Box::new(Arc::clone(&journal)),
        Box::new(Arc::clone(&metrics)),
    ];
    let runner = BoundRunner::new(Context::new(), observers);
    let mut slot = ErrorSlot::new();

    for (label, outcome) in workflow_steps() {
        runner.run(&mut slot, label, |_| outcome);
    }

    assert_eq!(runner.observer_count(), 2);
    assert_eq!(journal.summary(), "✓ one\n✗ two: two failed");
    assert_eq!(metrics.labels(), vec!["one", "two"]);
    assert_eq!(metrics.totals().failed, 1);
}
