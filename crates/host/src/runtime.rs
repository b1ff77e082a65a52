use mooring_core::ResultSink;

/// An embedded model runtime, treated as an opaque external system.
///
/// The runtime owns compilation, execution, and every array it exposes
/// during a run. Hosts interact with it only through this seam.
pub trait Runtime {
    /// The compiled, runnable model type.
    type Model: ModelInstance;

    /// The runtime's own error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compiles and loads a model, returning a runnable instance.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the source cannot be compiled or
    /// loaded.
    fn compile(&mut self, source: &str) -> Result<Self::Model, Self::Error>;
}

/// A compiled model held by a [`Runtime`].
pub trait ModelInstance {
    /// The runtime's own error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sets the flat `KEY=VALUE` execution-parameter string.
    ///
    /// The string is interpreted by the runtime, not the host; see
    /// [`ExecParams`](crate::ExecParams) for building it.
    fn set_exec_params(&mut self, params: &str);

    /// Runs the model to completion.
    ///
    /// Blocking: the call returns only when the run is over, and the sink
    /// is invoked synchronously on the calling thread for each output item
    /// the model emits, never after `run` returns.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the run fails, including when the sink
    /// rejects an output item.
    fn run(&mut self, sink: &mut dyn ResultSink) -> Result<(), Self::Error>;

    /// Releases runtime-owned resources held by this instance.
    fn reset(&mut self);
}
