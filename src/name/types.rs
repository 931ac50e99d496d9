//! Lock-name specification types.

/// How the lock key for a wrapped function is derived.
#[derive(Debug, Clone, Default)]
pub enum LockName {
    /// Auto-generate from every argument value with a meaningful textual
    /// form, in call order.
    #[default]
    Auto,

    /// A fixed key: `<function>:<literal>`, regardless of arguments.
    Literal(String),

    /// An ordered selector list; each selector contributes one fragment.
    Selectors(Vec<Selector>),
}

impl LockName {
    /// Convenience constructor for [`LockName::Literal`].
    pub fn literal(name: &str) -> Self {
        LockName::Literal(name.to_string())
    }

    /// Convenience constructor for [`LockName::Selectors`].
    pub fn selectors(selectors: impl IntoIterator<Item = Selector>) -> Self {
        LockName::Selectors(selectors.into_iter().collect())
    }
}

/// One declarative instruction deriving a single key fragment.
#[derive(Debug, Clone)]
pub enum Selector {
    /// The value bound to a single parameter name.
    Param(String),

    /// A nested traversal: the parameter named `root`, then each step
    /// applied in order. The terminal value contributes the fragment.
    Path { root: String, steps: Vec<Step> },

    /// The first listed parameter whose bound value is truthy. Plain
    /// parameter names only; a priority entry is never itself a path.
    Priority(Vec<String>),
}

impl Selector {
    /// Convenience constructor for [`Selector::Param`].
    pub fn param(name: &str) -> Self {
        Selector::Param(name.to_string())
    }

    /// Convenience constructor for [`Selector::Path`].
    pub fn path(root: &str, steps: impl IntoIterator<Item = Step>) -> Self {
        Selector::Path {
            root: root.to_string(),
            steps: steps.into_iter().collect(),
        }
    }

    /// Convenience constructor for [`Selector::Priority`].
    pub fn priority<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Selector::Priority(names.into_iter().map(str::to_string).collect())
    }
}

/// One step of a [`Selector::Path`] traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Field lookup on an object value.
    Attr(String),

    /// Positional lookup on an array value.
    Index(usize),
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::Attr(name.to_string())
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Step::Index(index)
    }
}
