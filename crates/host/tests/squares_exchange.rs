//! End-to-end exchange: scripted runtime → coordinator → solution sink.

use approx::assert_relative_eq;

use mooring_core::{ArrayRef, CooArray, IndexSet, ResultSink, Value};
use mooring_host::script::{ScriptArgs, ScriptError, ScriptedRuntime, send};
use mooring_host::{ExecParams, RunCoordinator};
use mooring_sinks::{OutputKind, ResultCollection, SolutionSink};

/// Squares of 1, 2, 3, ... while the square stays within the `NUM` bound,
/// streamed under the `Squares` label. The `Bound` item is a scalar the
/// host never registers, exercising the unrecognized-item path mid-run.
fn squares(args: &ScriptArgs, sink: &mut dyn ResultSink) -> Result<(), ScriptError> {
    let bound = args.int("NUM")?;
    if args.callback_target("SOLFILE").is_none() {
        return Err(ScriptError::BadParams {
            detail: "SOLFILE must reference a callback sink".into(),
        });
    }

    send(sink, "Bound", Value::Int(bound))?;

    let labels: Vec<i64> = (1..).take_while(|&n| n * n <= bound).collect();
    let mut array = CooArray::new(vec![IndexSet::from_labels(labels.iter().copied())])
        .expect("one dimension is always valid");
    for (position, &label) in labels.iter().enumerate() {
        array
            .insert(&[position], (label * label) as f64)
            .expect("every position is within the index set");
    }

    send(sink, "Squares", Value::Array(ArrayRef::new(&array)))
}

fn run_with_bound(bound: i64) -> ResultCollection {
    let mut runtime = ScriptedRuntime::new();
    runtime.register("calcsquares", squares);
    let mut coordinator = RunCoordinator::new(runtime);

    let mut params = ExecParams::new();
    params.set_int("NUM", bound).unwrap();
    params.set_callback("SOLFILE", "squares").unwrap();
    assert_eq!(
        params.to_param_string(),
        format!("NUM={bound},SOLFILE='sink:squares'")
    );

    let mut sink = SolutionSink::new().expect_item("Squares", OutputKind::RealVector);
    coordinator.execute("calcsquares", &params, &mut sink).unwrap();
    coordinator.reset();

    sink.take_vector("Squares").expect("the model emitted Squares")
}

fn report(results: &ResultCollection) -> String {
    let mut out = format!("Found {} numbers\n", results.len());
    for record in results {
        out.push_str(&format!(" {}^2 = {}\n", record.label(), record.value()));
    }
    out
}

#[test]
fn exchanges_fourteen_squares_for_a_bound_of_two_hundred() {
    let results = run_with_bound(200);

    assert_eq!(results.len(), 14);
    for (index, record) in results.iter().enumerate() {
        let label = index as i64 + 1;
        assert_eq!(record.label(), label);
        assert_relative_eq!(record.value(), (label * label) as f64);
    }

    let rendered = report(&results);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[0], "Found 14 numbers");
    assert_eq!(lines[1], " 1^2 = 1");
    assert_eq!(lines[14], " 14^2 = 196");
}

#[test]
fn a_bound_below_one_exchanges_an_empty_collection() {
    let results = run_with_bound(0);

    assert!(results.is_empty());
    assert_eq!(report(&results), "Found 0 numbers\n");
}

#[test]
fn repeated_runs_exchange_equal_collections() {
    let first = run_with_bound(50);
    let second = run_with_bound(50);

    assert_eq!(first, second);
    assert_eq!(first.len(), 7);
}
