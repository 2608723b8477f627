//! Variable interpolation
//!
//! Decides how a single variable value is written into query text.
//!
//! | value  | multiplicity       | result                               |
//! |--------|--------------------|--------------------------------------|
//! | text   | single             | quotes doubled, no wrapping quotes   |
//! | text   | multi, include-all | quoted literal                       |
//! | number | any                | the number as is                     |
//! | list   | any                | quoted literals joined with `,`      |
//! | other  | any                | unchanged                            |

use std::fmt;

use serde_json::Number;
use tracing::debug;

use crate::quote::{escape_quotes, quote_literal};
use crate::variable::{Multiplicity, Value};

/// Text produced for one placeholder occurrence
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Number(Number),
    /// A value of unrecognized shape, passed through untouched
    Raw(serde_json::Value),
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(s) => f.write_str(s),
            Fragment::Number(n) => write!(f, "{}", n),
            Fragment::Raw(serde_json::Value::String(s)) => f.write_str(s),
            Fragment::Raw(other) => write!(f, "{}", other),
        }
    }
}

/// Interpolate `value` according to the variable's declared multiplicity.
///
/// Never fails: shapes outside the table fall through unchanged.
pub fn interpolate(value: &Value, multiplicity: Multiplicity) -> Fragment {
    debug!(?multiplicity, "interpolate: called");
    match value {
        Value::Text(s) if multiplicity.is_multi_capable() => Fragment::Text(quote_literal(s)),
        Value::Text(s) => Fragment::Text(escape_quotes(s)),
        Value::Number(n) => Fragment::Number(n.clone()),
        Value::List(items) => Fragment::Text(quote_list(items)),
        Value::Other(other) => {
            debug!(%other, "interpolate: passing unrecognized value through");
            Fragment::Raw(other.clone())
        }
    }
}

fn quote_list(items: &[String]) -> String {
    items.iter().map(|item| quote_literal(item)).collect::<Vec<_>>().join(",")
}
