use crate::Value;

/// A callback target that receives named output items from a model run.
///
/// The runtime invokes [`receive`] synchronously, on the thread that called
/// run, once per distinct output item the model emits, strictly within the
/// run call's extent. There are no concurrent invocations and no
/// invocations after the run returns.
///
/// Borrowed data inside the [`Value`] is valid only until `receive`
/// returns; anything worth keeping must be copied into host-owned storage
/// before then.
///
/// Any `FnMut(&str, Value<'_>) -> bool` closure is a sink.
///
/// [`receive`]: ResultSink::receive
pub trait ResultSink {
    /// Handles one named output item.
    ///
    /// Returning `false` tells the runtime the item could not be
    /// materialized, which fails the run's reporting phase; returning
    /// `true` lets the exchange continue.
    fn receive(&mut self, label: &str, value: Value<'_>) -> bool;
}

impl<F> ResultSink for F
where
    F: FnMut(&str, Value<'_>) -> bool,
{
    fn receive(&mut self, label: &str, value: Value<'_>) -> bool {
        self(label, value)
    }
}
