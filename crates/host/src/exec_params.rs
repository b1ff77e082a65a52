use std::fmt;

use thiserror::Error;

/// Scheme prefix marking a parameter value as streamed through a callback
/// sink rather than written to a file.
pub const CALLBACK_SCHEME: &str = "sink";

/// A single execution-parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// An integer, rendered bare.
    Int(i64),

    /// A real, rendered bare.
    Real(f64),

    /// Text, rendered single-quoted.
    Text(String),

    /// A callback sink reference, rendered as `'sink:<target>'`.
    Callback(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{value}'"),
            Self::Callback(target) => write!(f, "'{CALLBACK_SCHEME}:{target}'"),
        }
    }
}

/// Errors that can occur when building execution parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The key was empty.
    #[error("parameter key must not be empty")]
    EmptyKey,

    /// The key contains a character the flat wire format reserves.
    #[error("parameter key `{key}` contains a reserved character")]
    ReservedKeyChar { key: String },

    /// The text value cannot be represented in single quotes.
    #[error("text value for `{key}` contains a quote, which the wire format cannot escape")]
    UnquotableText { key: String },
}

/// Execution parameters for a model run.
///
/// Rendered as a flat string of `KEY=VALUE` pairs joined by commas, for
/// example `NUM=200,SOLFILE='sink:squares'`. The string is parsed by the
/// runtime the model runs in; the host only constructs it. Pairs keep
/// their insertion order; setting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecParams {
    pairs: Vec<(String, ParamValue)>,
}

impl ExecParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any existing value under the same key.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] when the key is empty or contains a reserved
    /// character, or when a text value cannot be quoted.
    pub fn set(&mut self, key: &str, value: ParamValue) -> Result<&mut Self, ParamError> {
        validate_key(key)?;
        if let ParamValue::Text(text) | ParamValue::Callback(text) = &value {
            if text.contains('\'') {
                return Err(ParamError::UnquotableText { key: key.to_string() });
            }
        }

        match self.pairs.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        Ok(self)
    }

    /// Sets an integer parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] when the key is invalid.
    pub fn set_int(&mut self, key: &str, value: i64) -> Result<&mut Self, ParamError> {
        self.set(key, ParamValue::Int(value))
    }

    /// Sets a real parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] when the key is invalid.
    pub fn set_real(&mut self, key: &str, value: f64) -> Result<&mut Self, ParamError> {
        self.set(key, ParamValue::Real(value))
    }

    /// Sets a text parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] when the key is invalid or the text contains
    /// a quote.
    pub fn set_text(&mut self, key: &str, value: impl Into<String>) -> Result<&mut Self, ParamError> {
        self.set(key, ParamValue::Text(value.into()))
    }

    /// Sets a callback sink reference, marking the item as streamed to the
    /// host rather than written to a file.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] when the key is invalid or the target
    /// contains a quote.
    pub fn set_callback(
        &mut self,
        key: &str,
        target: impl Into<String>,
    ) -> Result<&mut Self, ParamError> {
        self.set(key, ParamValue::Callback(target.into()))
    }

    /// Returns the value set under a key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` when no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders the flat parameter string handed to the runtime.
    #[must_use]
    pub fn to_param_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExecParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), ParamError> {
    if key.is_empty() {
        return Err(ParamError::EmptyKey);
    }
    if key
        .chars()
        .any(|c| c == '=' || c == ',' || c == '\'' || c.is_whitespace())
    {
        return Err(ParamError::ReservedKeyChar { key: key.to_string() });
    }
    Ok(())
}
