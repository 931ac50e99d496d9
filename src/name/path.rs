//! Nested attribute/index traversal over argument values.

use super::types::Step;
use serde_json::Value;
use thiserror::Error;

/// A path step could not be applied to the value it reached.
///
/// Never surfaced to callers: the resolution engine recovers every path
/// failure to an empty key fragment.
#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum PathError {
    #[error("no field '{0}'")]
    MissingField(String),

    #[error("index {0} out of range")]
    OutOfRange(usize),

    #[error("field step '{0}' applied to a non-object value")]
    NotAnObject(String),

    #[error("index step {0} applied to a non-array value")]
    NotAnArray(usize),
}

/// Walk `steps` from `root`, returning the terminal value.
///
/// Field steps require an object, index steps require an array; any
/// inapplicable step fails the whole traversal. No partial results.
pub(crate) fn resolve_path<'a>(
    root: &'a Value,
    steps: &[Step],
) -> std::result::Result<&'a Value, PathError> {
    let mut current = root;
    for step in steps {
        current = match step {
            Step::Attr(name) => match current {
                Value::Object(fields) => fields
                    .get(name)
                    .ok_or_else(|| PathError::MissingField(name.clone()))?,
                _ => return Err(PathError::NotAnObject(name.clone())),
            },
            Step::Index(index) => match current {
                Value::Array(items) => {
                    items.get(*index).ok_or(PathError::OutOfRange(*index))?
                }
                _ => return Err(PathError::NotAnArray(*index)),
            },
        };
    }
    Ok(current)
}
