//! An in-memory scripted runtime standing in for an external solver.
//!
//! Hosts register named programs (plain closures) and drive them through
//! the ordinary [`Runtime`] seam: compile looks the program up, run parses
//! the execution-parameter string and invokes the program with the host's
//! sink. Parameter interpretation deliberately lives here, on the runtime
//! side of the seam, where the real external solver would do it.

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use mooring_core::{ResultSink, Value};

use crate::exec_params::CALLBACK_SCHEME;
use crate::{ModelInstance, Runtime};

/// A scripted model body: receives parsed execution arguments and the
/// host's sink.
pub type Program = Rc<dyn Fn(&ScriptArgs, &mut dyn ResultSink) -> Result<(), ScriptError>>;

/// Errors produced by the scripted runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Compilation was asked for a program that was never registered.
    #[error("no scripted model named `{name}`")]
    UnknownModel { name: String },

    /// The execution-parameter string could not be interpreted.
    #[error("malformed execution parameters: {detail}")]
    BadParams { detail: String },

    /// The sink refused an output item.
    #[error("sink rejected output item `{label}`")]
    Rejected { label: String },

    /// The program itself failed.
    #[error("{message}")]
    Failed { message: String },
}

/// Execution arguments as parsed by the scripted runtime.
#[derive(Debug, Clone, Default)]
pub struct ScriptArgs {
    values: HashMap<String, String>,
}

impl ScriptArgs {
    /// Parses a flat `KEY=VALUE` parameter string, honoring single-quoted
    /// values (a quoted value may contain commas).
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::BadParams`] for unterminated quotes, empty
    /// pairs, or pairs without `=`.
    pub fn parse(raw: &str) -> Result<Self, ScriptError> {
        let mut values = HashMap::new();
        for pair in split_pairs(raw)? {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(ScriptError::BadParams {
                    detail: format!("missing `=` in `{pair}`"),
                });
            };
            if key.is_empty() {
                return Err(ScriptError::BadParams {
                    detail: format!("missing key in `{pair}`"),
                });
            }
            values.insert(key.to_string(), value.to_string());
        }
        Ok(Self { values })
    }

    /// Returns a value exactly as it appeared on the wire.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns an integer parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::BadParams`] when the parameter is missing or
    /// not an integer.
    pub fn int(&self, key: &str) -> Result<i64, ScriptError> {
        let raw = self.raw(key).ok_or_else(|| ScriptError::BadParams {
            detail: format!("missing parameter `{key}`"),
        })?;
        raw.parse().map_err(|_| ScriptError::BadParams {
            detail: format!("parameter `{key}` is not an integer: `{raw}`"),
        })
    }

    /// Returns a text parameter with any surrounding quotes removed.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        let raw = self.raw(key)?;
        match raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            Some(inner) => Some(inner),
            None => Some(raw),
        }
    }

    /// Returns the sink target of a callback-scheme parameter, or `None`
    /// when the value does not carry the scheme.
    #[must_use]
    pub fn callback_target(&self, key: &str) -> Option<&str> {
        self.text(key)?
            .strip_prefix(CALLBACK_SCHEME)?
            .strip_prefix(':')
    }
}

fn split_pairs(raw: &str) -> Result<Vec<&str>, ScriptError> {
    let mut pairs = Vec::new();
    if raw.is_empty() {
        return Ok(pairs);
    }

    let mut start = 0;
    let mut in_quote = false;
    for (index, c) in raw.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            ',' if !in_quote => {
                pairs.push(&raw[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    if in_quote {
        return Err(ScriptError::BadParams {
            detail: "unterminated quote".into(),
        });
    }
    pairs.push(&raw[start..]);

    if pairs.iter().any(|pair| pair.is_empty()) {
        return Err(ScriptError::BadParams {
            detail: "empty KEY=VALUE pair".into(),
        });
    }
    Ok(pairs)
}

/// Emits one output item, converting a sink rejection into an error so
/// program bodies can use `?`.
///
/// # Errors
///
/// Returns [`ScriptError::Rejected`] when the sink returns `false`.
pub fn send(sink: &mut dyn ResultSink, label: &str, value: Value<'_>) -> Result<(), ScriptError> {
    if sink.receive(label, value) {
        Ok(())
    } else {
        Err(ScriptError::Rejected {
            label: label.to_string(),
        })
    }
}

/// An in-memory [`Runtime`] whose models are registered closures.
#[derive(Default)]
pub struct ScriptedRuntime {
    programs: HashMap<String, Program>,
}

impl ScriptedRuntime {
    /// Creates a runtime with no programs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a program under a model name, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, program: F)
    where
        F: Fn(&ScriptArgs, &mut dyn ResultSink) -> Result<(), ScriptError> + 'static,
    {
        self.programs.insert(name.into(), Rc::new(program));
    }
}

impl Runtime for ScriptedRuntime {
    type Model = ScriptedModel;
    type Error = ScriptError;

    fn compile(&mut self, source: &str) -> Result<Self::Model, Self::Error> {
        let program = self
            .programs
            .get(source)
            .cloned()
            .ok_or_else(|| ScriptError::UnknownModel {
                name: source.to_string(),
            })?;
        Ok(ScriptedModel {
            program,
            params: String::new(),
        })
    }
}

/// A compiled scripted model.
pub struct ScriptedModel {
    program: Program,
    params: String,
}

impl std::fmt::Debug for ScriptedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedModel")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl ModelInstance for ScriptedModel {
    type Error = ScriptError;

    fn set_exec_params(&mut self, params: &str) {
        self.params = params.to_string();
    }

    fn run(&mut self, sink: &mut dyn ResultSink) -> Result<(), Self::Error> {
        let args = ScriptArgs::parse(&self.params)?;
        (self.program)(&args, sink)
    }

    fn reset(&mut self) {
        self.params.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_quoted_values() {
        let args = ScriptArgs::parse("NUM=200,SOLFILE='sink:squares',MSG='a,b'").unwrap();

        assert_eq!(args.int("NUM").unwrap(), 200);
        assert_eq!(args.raw("SOLFILE"), Some("'sink:squares'"));
        assert_eq!(args.text("SOLFILE"), Some("sink:squares"));
        assert_eq!(args.callback_target("SOLFILE"), Some("squares"));
        // The comma inside the quoted value did not split the pair.
        assert_eq!(args.text("MSG"), Some("a,b"));
    }

    #[test]
    fn empty_string_parses_to_no_args() {
        let args = ScriptArgs::parse("").unwrap();

        assert!(args.raw("NUM").is_none());
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(matches!(
            ScriptArgs::parse("NUM"),
            Err(ScriptError::BadParams { .. })
        ));
        assert!(matches!(
            ScriptArgs::parse("=5"),
            Err(ScriptError::BadParams { .. })
        ));
        assert!(matches!(
            ScriptArgs::parse("A=1,,B=2"),
            Err(ScriptError::BadParams { .. })
        ));
        assert!(matches!(
            ScriptArgs::parse("MSG='open"),
            Err(ScriptError::BadParams { .. })
        ));
    }

    #[test]
    fn non_callback_value_has_no_target() {
        let args = ScriptArgs::parse("SOLFILE='result.dat'").unwrap();

        assert_eq!(args.callback_target("SOLFILE"), None);
    }

    #[test]
    fn unknown_model_does_not_compile() {
        let mut runtime = ScriptedRuntime::new();

        let err = runtime.compile("ghost").unwrap_err();
        assert_eq!(err, ScriptError::UnknownModel { name: "ghost".into() });
    }

    #[test]
    fn send_converts_rejection_into_an_error() {
        let mut accepting = |_: &str, _: Value<'_>| true;
        assert!(send(&mut accepting, "A", Value::Int(1)).is_ok());

        let mut rejecting = |_: &str, _: Value<'_>| false;
        let err = send(&mut rejecting, "A", Value::Int(1)).unwrap_err();
        assert_eq!(err, ScriptError::Rejected { label: "A".into() });
    }

    #[test]
    fn reset_clears_staged_params() {
        let mut runtime = ScriptedRuntime::new();
        runtime.register("echo", |args, sink| {
            send(sink, "NUM", Value::Int(args.int("NUM")?))
        });

        let mut model = runtime.compile("echo").unwrap();
        model.set_exec_params("NUM=7");

        let mut seen = Vec::new();
        let mut sink = |label: &str, value: Value<'_>| {
            seen.push(format!("{label}={value}"));
            true
        };
        model.run(&mut sink).unwrap();

        model.reset();
        // With params cleared the program's required NUM is gone.
        let err = model.run(&mut sink).unwrap_err();
        assert!(matches!(err, ScriptError::BadParams { .. }));

        assert_eq!(seen, vec!["NUM=7"]);
    }
}
