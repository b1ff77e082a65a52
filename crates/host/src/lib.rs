//! Host-side orchestration for embedding a model runtime.
//!
//! A host program treats the runtime as an opaque black box: it compiles a
//! model, hands it a flat execution-parameter string, and blocks in `run`
//! while the runtime streams output items back through a
//! [`ResultSink`](mooring_core::ResultSink).
//!
//! - [`Runtime`] and [`ModelInstance`] — the embedding seam
//! - [`ExecParams`] — validated construction of the `KEY=VALUE` string
//! - [`RunCoordinator`] — compile → configure → run sequencing, with reset
//!   left to the host
//! - [`script`] — an in-memory runtime standing in for an external solver

pub mod script;

mod coordinator;
mod exec_params;
mod runtime;

pub use coordinator::{RunCoordinator, RunError};
pub use exec_params::{CALLBACK_SCHEME, ExecParams, ParamError, ParamValue};
pub use runtime::{ModelInstance, Runtime};
