//! QueryInterp - template variable interpolation for dashboard SQL
//!
//! Rewrites a query template containing variable placeholders into query
//! text that the columnar engine can run, quoting every substituted value
//! for its position.
//!
//! # Pipeline
//!
//! ```text
//! template + scope
//!   └── preprocess   normalize built-in interval ("30s" -> "30 seconds")
//!       └── substitute   find $name / ${name} / [[name]]
//!           └── interpolate   escape, quote or join each value
//! ```
//!
//! # Example
//!
//! ```
//! use queryinterp::{Scope, Variable, render};
//!
//! let scope = Scope::new()
//!     .with("ids", Variable::multi(["1", "2"]))
//!     .with("n", Variable::single(5i64));
//! let sql = render("SELECT * FROM t WHERE id IN ($ids) AND n = $n", &scope);
//! assert_eq!(sql, "SELECT * FROM t WHERE id IN ('1','2') AND n = 5");
//! ```
//!
//! Macro tokens such as `$__timeFilter(time)` are expanded by the engine
//! and pass through untouched.

pub mod cli;
pub mod config;
pub mod datasource;
pub mod duration;
pub mod error;
pub mod interpolate;
pub mod preprocess;
pub mod query;
pub mod quote;
pub mod render;
pub mod substitute;
pub mod variable;

pub use config::Config;
pub use datasource::{DataSource, Field, Frame, KNOWN_MACROS, MetricFindValue, QueryBackend, QueryResponse, Resource};
pub use duration::{DurationUnit, normalize_durations};
pub use error::{BackendError, Error, Result};
pub use interpolate::{Fragment, interpolate};
pub use preprocess::preprocess;
pub use query::{METRIC_FIND_REF_ID, QueryFormat, SqlQuery, apply_template_variables};
pub use quote::{escape_quotes, quote_literal};
pub use render::{Renderer, render};
pub use substitute::{FormatFn, PlaceholderSubstituter, Substitute};
pub use variable::{INTERVAL_VARIABLE, Multiplicity, Scope, Value, Variable};
