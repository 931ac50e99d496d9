//! Binding call arguments onto declared parameter names.

use super::types::{CallArgs, Signature};
use serde_json::Value;
use std::collections::BTreeMap;

/// The bound view of one invocation.
///
/// Holds every argument value in call order (positional first, then named)
/// plus a name-to-value map covering positionally-bound parameters, named
/// arguments, and declared defaults for parameters the call omitted.
#[derive(Debug, Clone)]
pub struct BoundCall {
    all_values: Vec<Value>,
    by_name: BTreeMap<String, Value>,
}

impl BoundCall {
    /// Every argument value actually passed, in call order.
    ///
    /// Defaulted parameters do not appear here: the call never mentioned
    /// them. Surplus positional values (beyond the declared parameter list)
    /// do appear; they were part of the call even if no name binds them.
    pub fn values_in_call_order(&self) -> &[Value] {
        &self.all_values
    }

    /// Look up a bound value by parameter name.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.by_name.get(name)
    }
}

impl Signature {
    /// Bind one invocation's arguments onto this signature.
    ///
    /// Positional values map to declared parameters by position. Named
    /// values map by name and win over a positional binding of the same
    /// parameter. Declared defaults fill parameters the call did not
    /// supply. Named arguments that match no declared parameter are still
    /// entered into the by-name map so selectors can reference them.
    pub fn bind(&self, args: CallArgs) -> BoundCall {
        let mut all_values = args.positional.clone();
        all_values.extend(args.named.iter().map(|(_, v)| v.clone()));

        let mut by_name = BTreeMap::new();

        // Positional values bind to declared names by position.
        for (param, value) in self.params().iter().zip(args.positional.iter()) {
            by_name.insert(param.name.clone(), value.clone());
        }

        // Named values bind by name and override positional bindings.
        for (name, value) in args.named {
            by_name.insert(name, value);
        }

        // Declared defaults fill whatever the call did not supply.
        for param in self.params() {
            if let Some(default) = &param.default
                && !by_name.contains_key(&param.name)
            {
                by_name.insert(param.name.clone(), default.clone());
            }
        }

        BoundCall {
            all_values,
            by_name,
        }
    }
}
