//! Declared signatures and per-call argument lists.

use serde_json::Value;

/// One declared parameter of a wrapped function.
#[derive(Debug, Clone)]
pub struct Param {
    /// Parameter name, as referenced by selectors.
    pub name: String,

    /// Default value used when a call does not supply this parameter.
    pub default: Option<Value>,
}

/// The declared parameter list of a wrapped function, in declaration order.
///
/// Built once at wrapping time and consulted on every call to map
/// positional values onto names and to fill defaulted parameters.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Create an empty signature (a zero-parameter function).
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Append a required parameter.
    pub fn param(mut self, name: &str) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            default: None,
        });
        self
    }

    /// Append a parameter with a default value.
    pub fn param_with_default(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            default: Some(default.into()),
        });
        self
    }

    /// The declared parameters, in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

/// The arguments of one invocation, in call order.
///
/// Positional values come first, then named values in the order they were
/// passed. Insertion order is preserved because auto-generated lock keys
/// depend on it.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    pub(super) positional: Vec<Value>,
    pub(super) named: Vec<(String, Value)>,
}

impl CallArgs {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append a named argument.
    pub fn named(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.named.push((name.to_string(), value.into()));
        self
    }

    /// The positional values, in call order.
    pub fn positional_values(&self) -> &[Value] {
        &self.positional
    }

    /// The named values, in call order.
    pub fn named_values(&self) -> &[(String, Value)] {
        &self.named
    }
}
