//! The classic host-integration exchange: a scripted model generates every
//! square no greater than a bound and streams the results back through a
//! callback sink.
//!
//! ```text
//! cargo run --example squares
//! ```

use std::error::Error;

use mooring_core::{ArrayRef, CooArray, IndexSet, ResultSink, Value};
use mooring_host::script::{ScriptArgs, ScriptError, ScriptedRuntime, send};
use mooring_host::{ExecParams, RunCoordinator};
use mooring_sinks::{OutputKind, SolutionSink};

/// The model body: squares of 1, 2, 3, ... while the square stays within
/// the `NUM` bound, keyed by the number itself.
fn squares(args: &ScriptArgs, sink: &mut dyn ResultSink) -> Result<(), ScriptError> {
    let bound = args.int("NUM")?;
    if args.callback_target("SOLFILE").is_none() {
        return Err(ScriptError::BadParams {
            detail: "SOLFILE must reference a callback sink".into(),
        });
    }

    let labels: Vec<i64> = (1..).take_while(|&n| n * n <= bound).collect();
    let mut array = CooArray::new(vec![IndexSet::from_labels(labels.iter().copied())])
        .expect("one dimension is always valid");
    for (position, &label) in labels.iter().enumerate() {
        array
            .insert(&[position], (label * label) as f64)
            .expect("every position is within the index set");
    }
    println!("Numbers generated: {}", labels.len());

    send(sink, "Squares", Value::Array(ArrayRef::new(&array)))
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut runtime = ScriptedRuntime::new();
    runtime.register("calcsquares", squares);
    let mut coordinator = RunCoordinator::new(runtime);

    let mut params = ExecParams::new();
    params.set_int("NUM", 200)?;
    params.set_callback("SOLFILE", "squares")?;

    let mut sink = SolutionSink::new().expect_item("Squares", OutputKind::RealVector);
    coordinator.execute("calcsquares", &params, &mut sink)?;

    let results = sink.take_vector("Squares").unwrap_or_default();
    println!("Found {} numbers", results.len());
    for record in &results {
        println!(" {}^2 = {}", record.label(), record.value());
    }

    coordinator.reset();
    Ok(())
}
