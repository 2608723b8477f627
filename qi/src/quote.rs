//! Literal quoting
//!
//! The target engine only understands doubled single quotes inside string
//! literals. Backslashes carry no meaning and are left alone.

/// Double every single quote in `value` without adding surrounding quotes.
pub fn escape_quotes(value: &str) -> String {
    value.replace('\'', "''")
}

/// Wrap `value` in single quotes, doubling any embedded single quote.
///
/// ```
/// use queryinterp::quote_literal;
///
/// assert_eq!(quote_literal("O'Brien"), "'O''Brien'");
/// ```
pub fn quote_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    quoted.push_str(&escape_quotes(value));
    quoted.push('\'');
    quoted
}
