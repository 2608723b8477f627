//! Placeholder discovery and substitution
//!
//! Recognized placeholder forms:
//!
//! - `$name` (greedy over `[A-Za-z0-9_]`)
//! - `${name}`
//! - `[[name]]`
//!
//! Only names bound in the scope are replaced. Everything else, including
//! macro tokens like `$__timeFilter(time)`, is copied through byte for byte.
//! A bare `$__name(` is a macro call and is never replaced, even when a
//! variable of that name is bound. Substituted text is not re-scanned.

use tracing::{debug, warn};

use crate::interpolate::Fragment;
use crate::variable::{Multiplicity, Scope, Value};

/// Callback invoked once per placeholder occurrence
pub type FormatFn<'a> = &'a dyn Fn(&Value, Multiplicity) -> Fragment;

/// A templating facility that finds placeholders and asks `format` for their text
pub trait Substitute {
    fn substitute(&self, template: &str, scope: &Scope, format: FormatFn<'_>) -> String;
}

/// The default single-pass `$name` / `${name}` / `[[name]]` substituter
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderSubstituter;

/// Prefix shared by built-in variables and macro tokens
const BUILTIN_PREFIX: &str = "__";

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_name_char)
}

impl PlaceholderSubstituter {
    pub fn new() -> Self {
        Self
    }

    /// Try the placeholder starting at `start` (which holds `$` or `[`).
    ///
    /// Returns the replacement text and the index just past the placeholder,
    /// or `None` when the text there is not a bound placeholder.
    fn expand(&self, template: &str, start: usize, scope: &Scope, format: FormatFn<'_>) -> Option<(String, usize)> {
        let rest = &template[start..];

        let (name, end) = if let Some(inner) = rest.strip_prefix("${") {
            let Some(close) = inner.find('}') else {
                warn!(offset = start, "Unterminated ${{ placeholder, leaving as text");
                return None;
            };
            (&inner[..close], start + 2 + close + 1)
        } else if let Some(inner) = rest.strip_prefix("[[") {
            let Some(close) = inner.find("]]") else {
                debug!(offset = start, "expand: no closing ]], leaving as text");
                return None;
            };
            (&inner[..close], start + 2 + close + 2)
        } else if let Some(inner) = rest.strip_prefix('$') {
            let len = inner.bytes().take_while(|b| is_name_char(*b)).count();
            let name = &inner[..len];
            let end = start + 1 + len;
            if name.starts_with(BUILTIN_PREFIX) && template[end..].starts_with('(') {
                debug!(%name, "expand: macro call, leaving as text");
                return None;
            }
            (name, end)
        } else {
            return None;
        };

        if !is_valid_name(name) {
            return None;
        }

        let Some(variable) = scope.get(name) else {
            debug!(%name, "expand: unbound placeholder, leaving as text");
            return None;
        };

        let value: &Value = &variable.value();
        let fragment = format(value, variable.multiplicity());
        debug!(%name, "expand: substituted");
        Some((fragment.to_string(), end))
    }
}

impl Substitute for PlaceholderSubstituter {
    fn substitute(&self, template: &str, scope: &Scope, format: FormatFn<'_>) -> String {
        debug!(template_len = template.len(), vars = scope.len(), "substitute: called");
        let mut out = String::with_capacity(template.len());
        let mut pos = 0;

        while let Some(offset) = template[pos..].find(['$', '[']) {
            let start = pos + offset;
            out.push_str(&template[pos..start]);

            match self.expand(template, start, scope, format) {
                Some((text, end)) => {
                    out.push_str(&text);
                    pos = end;
                }
                None => {
                    // Both delimiters are single-byte ASCII.
                    out.push_str(&template[start..start + 1]);
                    pos = start + 1;
                }
            }
        }

        out.push_str(&template[pos..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    fn echo(value: &Value, _: Multiplicity) -> Fragment {
        match value {
            Value::Text(s) => Fragment::Text(format!("<{}>", s)),
            Value::Number(n) => Fragment::Number(n.clone()),
            Value::List(items) => Fragment::Text(items.join("|")),
            Value::Other(other) => Fragment::Raw(other.clone()),
        }
    }

    fn run(template: &str, scope: &Scope) -> String {
        PlaceholderSubstituter::new().substitute(template, scope, &echo)
    }

    fn scope() -> Scope {
        Scope::new()
            .with("host", Variable::single("web"))
            .with("hosts", Variable::multi(["a", "b"]))
            .with("n", Variable::single(3i64))
    }

    #[test]
    fn test_dollar_form() {
        assert_eq!(run("WHERE h = $host", &scope()), "WHERE h = <web>");
    }

    #[test]
    fn test_dollar_form_is_greedy() {
        // `$hosts` must not be read as `$host` followed by `s`
        assert_eq!(run("IN ($hosts)", &scope()), "IN (a|b)");
    }

    #[test]
    fn test_braced_and_bracket_forms() {
        assert_eq!(run("${host}_x [[n]]", &scope()), "<web>_x 3");
    }

    #[test]
    fn test_every_occurrence_replaced() {
        assert_eq!(run("$n $n ${n}", &scope()), "3 3 3");
    }

    #[test]
    fn test_unbound_left_as_text() {
        assert_eq!(run("$missing ${missing} [[missing]]", &scope()), "$missing ${missing} [[missing]]");
    }

    #[test]
    fn test_macro_tokens_untouched() {
        let template = "WHERE $__timeFilter(time) GROUP BY $__dateBin(time)";
        assert_eq!(run(template, &scope()), template);
    }

    #[test]
    fn test_macro_call_opaque_even_when_bound() {
        let scope = Scope::new().with("__interval", Variable::single("1 minutes"));
        assert_eq!(run("$__interval($__interval)", &scope), "$__interval(<1 minutes>)");
    }

    #[test]
    fn test_lone_and_unterminated_delimiters() {
        assert_eq!(run("cost $ 5", &scope()), "cost $ 5");
        assert_eq!(run("${host", &scope()), "${host");
        assert_eq!(run("arr[1] [[host", &scope()), "arr[1] [[host");
        assert_eq!(run("$", &scope()), "$");
    }

    #[test]
    fn test_braced_with_invalid_name_left_as_text() {
        assert_eq!(run("${host:csv}", &scope()), "${host:csv}");
        assert_eq!(run("${ host }", &scope()), "${ host }");
    }

    #[test]
    fn test_substituted_text_not_rescanned() {
        let scope = Scope::new()
            .with("a", Variable::single("$b"))
            .with("b", Variable::single("boom"));
        assert_eq!(run("$a", &scope), "<$b>");
    }

    #[test]
    fn test_non_ascii_text_preserved() {
        assert_eq!(run("héllo $host → ok [ü]", &scope()), "héllo <web> → ok [ü]");
    }
}
