//! Duration literal normalization
//!
//! Dashboards express intervals as shorthand (`30s`, `5m`); the query engine
//! expects `30 seconds`, `5 minutes`.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

// `ms` must come before `m` in the alternation.
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)(ms|s|m|h|d)").expect("duration pattern is valid"));

/// Time unit of a shorthand duration token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    /// Parse a shorthand suffix (`ms`, `s`, `m`, `h`, `d`)
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ms" => Some(Self::Milliseconds),
            "s" => Some(Self::Seconds),
            "m" => Some(Self::Minutes),
            "h" => Some(Self::Hours),
            "d" => Some(Self::Days),
            _ => None,
        }
    }

    /// The word the query engine uses for this unit
    pub fn word(&self) -> &'static str {
        match self {
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }
}

impl std::fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.word())
    }
}

/// Rewrite every `<integer><unit>` token in `text` to `<integer> <word>`.
///
/// All other text, including punctuation next to a token, is copied through.
/// The output never contains a digit directly followed by a unit that came
/// from a rewrite, so applying this twice gives the same result as once.
pub fn normalize_durations(text: &str) -> String {
    debug!(text_len = text.len(), "normalize_durations: called");
    DURATION_RE
        .replace_all(text, |caps: &Captures| match DurationUnit::from_suffix(&caps[2]) {
            Some(unit) => format!("{} {}", &caps[1], unit.word()),
            None => caps[0].to_string(),
        })
        .into_owned()
}
