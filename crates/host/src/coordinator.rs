use log::debug;
use thiserror::Error;

use mooring_core::{ResultSink, Value};

use crate::{ExecParams, ModelInstance, Runtime};

/// Errors that can occur while coordinating a model run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The runtime failed to compile or load the model. No later phase ran.
    #[error("model compilation failed")]
    Compile(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The run failed inside the runtime.
    #[error("model run failed")]
    Run(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The sink reported that an output item could not be materialized.
    #[error("result exchange failed for output item `{label}`")]
    DataExchange {
        /// The first label the sink rejected.
        label: String,
    },
}

/// Sequences compile → configure parameters → run against an embedded
/// runtime.
///
/// The coordinator owns no retries: a failing phase propagates immediately
/// and no later phase executes. Callbacks fire synchronously while the run
/// phase is in flight; it is the only point at which the sink is invoked.
///
/// The compiled model is retained after [`execute`] returns, on success and
/// on run failure alike, so the host can inspect the outcome before deciding
/// to release runtime resources with [`reset`]. Reset is never implicit, not
/// even on error paths.
///
/// [`execute`]: RunCoordinator::execute
/// [`reset`]: RunCoordinator::reset
pub struct RunCoordinator<R: Runtime> {
    runtime: R,
    model: Option<R::Model>,
}

impl<R: Runtime> RunCoordinator<R> {
    /// Wraps a runtime.
    #[must_use]
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            model: None,
        }
    }

    /// Compiles `source`, applies `params`, and runs the model, streaming
    /// output items into `sink`.
    ///
    /// A model left loaded by a previous call is dropped unreset; hosts
    /// that need the runtime to release its resources first call
    /// [`reset`](RunCoordinator::reset) themselves.
    ///
    /// # Errors
    ///
    /// - [`RunError::Compile`] when compilation fails; nothing was run.
    /// - [`RunError::DataExchange`] when the sink rejected an output item;
    ///   the model stays loaded.
    /// - [`RunError::Run`] when the run failed for any other reason; the
    ///   model stays loaded.
    pub fn execute<S: ResultSink>(
        &mut self,
        source: &str,
        params: &ExecParams,
        sink: &mut S,
    ) -> Result<(), RunError> {
        debug!("compiling model `{source}`");
        let mut model = self
            .runtime
            .compile(source)
            .map_err(|cause| RunError::Compile(Box::new(cause)))?;

        model.set_exec_params(&params.to_param_string());

        debug!("running model `{source}`");
        let mut probe = RejectionProbe {
            inner: sink,
            rejected: None,
        };
        let outcome = model.run(&mut probe);
        let rejected = probe.rejected;
        self.model = Some(model);

        match (outcome, rejected) {
            (_, Some(label)) => Err(RunError::DataExchange { label }),
            (Err(cause), None) => Err(RunError::Run(Box::new(cause))),
            (Ok(()), None) => Ok(()),
        }
    }

    /// Returns the model loaded by the last [`execute`] call, if any.
    ///
    /// [`execute`]: RunCoordinator::execute
    #[must_use]
    pub fn model(&self) -> Option<&R::Model> {
        self.model.as_ref()
    }

    /// Returns `true` while a compiled model is loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Releases the loaded model, if any, telling the runtime to free the
    /// resources it holds.
    pub fn reset(&mut self) {
        if let Some(mut model) = self.model.take() {
            debug!("resetting model");
            model.reset();
        }
    }

    /// Returns the wrapped runtime, dropping any loaded model.
    #[must_use]
    pub fn into_runtime(self) -> R {
        self.runtime
    }
}

/// Records the first label a sink rejects so the coordinator can classify
/// the failure as a data-exchange error rather than a generic run error.
struct RejectionProbe<'a, S> {
    inner: &'a mut S,
    rejected: Option<String>,
}

impl<S: ResultSink> ResultSink for RejectionProbe<'_, S> {
    fn receive(&mut self, label: &str, value: Value<'_>) -> bool {
        let accepted = self.inner.receive(label, value);
        if !accepted && self.rejected.is_none() {
            self.rejected = Some(label.to_string());
        }
        accepted
    }
}
