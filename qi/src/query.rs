//! Dashboard query model

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::render;
use crate::variable::Scope;

/// refId used for queries that populate variable option lists
pub const METRIC_FIND_REF_ID: &str = "metricFindQuery";

/// Result shape requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QueryFormat {
    #[default]
    Table,
    TimeSeries,
}

impl QueryFormat {
    /// `"table"` selects a table, every other hint a time series
    pub fn from_hint(hint: &str) -> Self {
        match hint {
            "table" => Self::Table,
            _ => Self::TimeSeries,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::TimeSeries => "time_series",
        }
    }
}

impl From<String> for QueryFormat {
    fn from(hint: String) -> Self {
        Self::from_hint(&hint)
    }
}

impl From<QueryFormat> for String {
    fn from(format: QueryFormat) -> Self {
        format.as_str().to_string()
    }
}

impl std::fmt::Display for QueryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A panel query as sent by the dashboard.
///
/// The query builder fields are carried along untouched; only `query_text`
/// takes part in interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SqlQuery {
    pub ref_id: String,
    pub query_text: String,
    pub raw_editor: bool,
    pub format: QueryFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_data_points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wheres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl Default for SqlQuery {
    fn default() -> Self {
        Self {
            ref_id: String::new(),
            query_text: String::new(),
            raw_editor: true,
            format: QueryFormat::Table,
            interval_ms: None,
            max_data_points: None,
            table: None,
            columns: Vec::new(),
            wheres: Vec::new(),
            order_by: None,
            group_by: None,
            limit: None,
        }
    }
}

impl SqlQuery {
    /// A raw-editor query with the given refId and text
    pub fn raw(ref_id: impl Into<String>, query_text: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            query_text: query_text.into(),
            ..Default::default()
        }
    }

    /// The query used to populate a dashboard variable's options
    pub fn metric_find(query_text: impl Into<String>) -> Self {
        Self::raw(METRIC_FIND_REF_ID, query_text)
    }

    pub fn with_format(mut self, format: QueryFormat) -> Self {
        self.format = format;
        self
    }
}

/// Return a copy of `query` with its text rendered against `scope`
pub fn apply_template_variables(query: &SqlQuery, scope: &Scope) -> SqlQuery {
    debug!(ref_id = %query.ref_id, "apply_template_variables: called");
    SqlQuery {
        query_text: render(&query.query_text, scope),
        ..query.clone()
    }
}
