//! Template variables and the scope they are bound in

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Name of the built-in variable holding the dashboard's computed group interval
pub const INTERVAL_VARIABLE: &str = "__interval";

/// Runtime value of a variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(Number),
    List(Vec<String>),
    /// Any other shape (booleans, null, objects). Interpolated unchanged.
    Other(serde_json::Value),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Whether a variable was declared to accept more than one selected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Multiplicity {
    Single,
    Multi,
    IncludeAll,
}

impl Multiplicity {
    /// True for variables that may hold several values at once
    pub fn is_multi_capable(&self) -> bool {
        matches!(self, Self::Multi | Self::IncludeAll)
    }
}

/// A bound variable.
///
/// Multi-capable variables always carry a sequence, even when exactly one
/// value is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "multiplicity", content = "value", rename_all = "kebab-case")]
pub enum Variable {
    Single(Value),
    Multi(Vec<String>),
    IncludeAll(Vec<String>),
}

impl Variable {
    pub fn single(value: impl Into<Value>) -> Self {
        Self::Single(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    pub fn include_all<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::IncludeAll(values.into_iter().map(Into::into).collect())
    }

    pub fn multiplicity(&self) -> Multiplicity {
        match self {
            Self::Single(_) => Multiplicity::Single,
            Self::Multi(_) => Multiplicity::Multi,
            Self::IncludeAll(_) => Multiplicity::IncludeAll,
        }
    }

    /// The value handed to the interpolation callback
    pub fn value(&self) -> Cow<'_, Value> {
        match self {
            Self::Single(value) => Cow::Borrowed(value),
            Self::Multi(values) | Self::IncludeAll(values) => Cow::Owned(Value::List(values.clone())),
        }
    }
}

/// Variables bound for a single render, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope {
    vars: BTreeMap<String, Variable>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous binding
    pub fn insert(&mut self, name: impl Into<String>, variable: Variable) -> Option<Variable> {
        self.vars.insert(name.into(), variable)
    }

    /// Builder form of [`Scope::insert`]
    pub fn with(mut self, name: impl Into<String>, variable: Variable) -> Self {
        self.insert(name, variable);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.vars.iter().map(|(name, var)| (name.as_str(), var))
    }

    /// Return a new scope with `overrides` layered on top of `self`
    pub fn merged(&self, overrides: &Scope) -> Scope {
        let mut vars = self.vars.clone();
        vars.extend(overrides.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        Scope { vars }
    }
}

impl<N: Into<String>> FromIterator<(N, Variable)> for Scope {
    fn from_iter<T: IntoIterator<Item = (N, Variable)>>(iter: T) -> Self {
        Scope {
            vars: iter.into_iter().map(|(name, var)| (name.into(), var)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicity_of_variants() {
        assert_eq!(Variable::single("x").multiplicity(), Multiplicity::Single);
        assert_eq!(Variable::multi(["a"]).multiplicity(), Multiplicity::Multi);
        assert_eq!(Variable::include_all(["a"]).multiplicity(), Multiplicity::IncludeAll);
        assert!(!Multiplicity::Single.is_multi_capable());
        assert!(Multiplicity::IncludeAll.is_multi_capable());
    }

    #[test]
    fn test_multi_value_is_always_a_list() {
        let var = Variable::multi(["only"]);
        assert_eq!(var.value().into_owned(), Value::list(["only"]));
    }

    #[test]
    fn test_scope_merged_prefers_overrides() {
        let base = Scope::new()
            .with("a", Variable::single("base"))
            .with("b", Variable::single(1i64));
        let overrides = Scope::new().with("a", Variable::single("override"));

        let merged = base.merged(&overrides);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("a"), Some(&Variable::single("override")));
        assert_eq!(base.get("a"), Some(&Variable::single("base")));
    }

    #[test]
    fn test_variable_yaml_shapes() {
        let yaml = r#"
host:
  multiplicity: multi
  value: [a, b]
limit:
  multiplicity: single
  value: 10
region:
  multiplicity: include-all
  value: [eu]
name:
  multiplicity: single
  value: cpu
flag:
  multiplicity: single
  value: true
"#;
        let scope: Scope = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scope.get("host"), Some(&Variable::multi(["a", "b"])));
        assert_eq!(scope.get("limit"), Some(&Variable::single(10i64)));
        assert_eq!(scope.get("region"), Some(&Variable::include_all(["eu"])));
        assert_eq!(scope.get("name"), Some(&Variable::single("cpu")));
        assert_eq!(
            scope.get("flag"),
            Some(&Variable::Single(Value::Other(serde_json::Value::Bool(true))))
        );
    }

    #[test]
    fn test_scope_from_iter() {
        let scope: Scope = [("x", Variable::single("1")), ("y", Variable::single("2"))]
            .into_iter()
            .collect();
        assert!(scope.contains("x"));
        assert!(!scope.contains("z"));
        assert_eq!(scope.iter().count(), 2);
    }
}
