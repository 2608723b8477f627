//! Built-in variable rewrites applied before substitution

use tracing::{debug, info};

use crate::duration::normalize_durations;
use crate::variable::{INTERVAL_VARIABLE, Scope, Value, Variable};

/// Return a copy of `scope` with engine-specific fixes applied to built-ins.
///
/// Only the interval variable is touched, and only when it is a single
/// non-empty string. Every other binding is copied as is; other
/// duration-shaped values are deliberately left alone.
pub fn preprocess(scope: &Scope) -> Scope {
    debug!(vars = scope.len(), "preprocess: called");
    let mut out = scope.clone();

    match scope.get(INTERVAL_VARIABLE) {
        Some(Variable::Single(Value::Text(interval))) if !interval.is_empty() => {
            let normalized = normalize_durations(interval);
            info!(from = %interval, to = %normalized, "Normalized interval variable");
            out.insert(INTERVAL_VARIABLE, Variable::single(normalized));
        }
        _ => debug!("preprocess: no interval variable to normalize"),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_normalized() {
        let scope = Scope::new().with(INTERVAL_VARIABLE, Variable::single("30s"));
        let out = preprocess(&scope);
        assert_eq!(out.get(INTERVAL_VARIABLE), Some(&Variable::single("30 seconds")));
    }

    #[test]
    fn test_input_scope_not_mutated() {
        let scope = Scope::new().with(INTERVAL_VARIABLE, Variable::single("1m"));
        let _ = preprocess(&scope);
        assert_eq!(scope.get(INTERVAL_VARIABLE), Some(&Variable::single("1m")));
    }

    #[test]
    fn test_other_variables_untouched() {
        let scope = Scope::new()
            .with(INTERVAL_VARIABLE, Variable::single("5m"))
            .with("__interval_ms", Variable::single("300000ms"))
            .with("window", Variable::single("10s"));
        let out = preprocess(&scope);
        assert_eq!(out.get("__interval_ms"), Some(&Variable::single("300000ms")));
        assert_eq!(out.get("window"), Some(&Variable::single("10s")));
    }

    #[test]
    fn test_empty_interval_left_alone() {
        let scope = Scope::new().with(INTERVAL_VARIABLE, Variable::single(""));
        assert_eq!(preprocess(&scope), scope);
    }

    #[test]
    fn test_missing_interval_is_noop() {
        let scope = Scope::new().with("host", Variable::multi(["a"]));
        assert_eq!(preprocess(&scope), scope);
    }

    #[test]
    fn test_non_text_interval_left_alone() {
        let scope = Scope::new().with(INTERVAL_VARIABLE, Variable::single(30i64));
        assert_eq!(preprocess(&scope), scope);
    }
}
