//! Query execution and resource endpoints
//!
//! The transport to the query engine lives outside this crate. It is
//! reached through [`QueryBackend`]; [`DataSource`] renders queries before
//! handing them over.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::BackendError;
use crate::query::{SqlQuery, apply_template_variables};
use crate::variable::Scope;

/// Macros expanded by the remote engine. Never touched during interpolation.
pub const KNOWN_MACROS: &[&str] = &[
    "column",
    "dateBin",
    "dateBinAlias",
    "interval",
    "table",
    "timeFilter",
    "timeFrom",
    "timeGroup",
    "timeGroupAlias",
    "timeRange",
    "timeRangeFrom",
    "timeRangeTo",
    "timeTo",
];

/// Read-only endpoints exposed by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    SqlInfo,
    Tables,
    Columns { table: String },
    Macros,
}

impl Resource {
    /// Request path of this resource
    pub fn path(&self) -> String {
        match self {
            Self::SqlInfo => "/flightsql/sql-info".to_string(),
            Self::Tables => "/flightsql/tables".to_string(),
            Self::Columns { table } => format!("/flightsql/columns?table={}", table),
            Self::Macros => "/plugin/macros".to_string(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One named column
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub values: Vec<serde_json::Value>,
}

/// One named columnar result set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Result sets returned for a query, keyed by refId
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub frames: BTreeMap<String, Vec<Frame>>,
}

impl QueryResponse {
    /// A response with no frames for `ref_id`
    pub fn empty(ref_id: impl Into<String>) -> Self {
        let mut frames = BTreeMap::new();
        frames.insert(ref_id.into(), Vec::new());
        Self { frames }
    }

    pub fn frames_for(&self, ref_id: &str) -> &[Frame] {
        self.frames.get(ref_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Flatten every value of every frame into variable options.
    ///
    /// Frames are walked in refId order, fields and values in order. Only the
    /// first option for each text is kept.
    pub fn to_metric_find_values(&self) -> Vec<MetricFindValue> {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for frame in self.frames.values().flatten() {
            for field in &frame.fields {
                for value in &field.values {
                    let text = value_text(value);
                    if seen.insert(text.clone()) {
                        values.push(MetricFindValue { text });
                    }
                }
            }
        }
        debug!(count = values.len(), "QueryResponse::to_metric_find_values: extracted");
        values
    }
}

/// One option of a dashboard variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFindValue {
    pub text: String,
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Transport to the remote query engine
pub trait QueryBackend {
    /// Execute an already rendered query
    fn execute(&self, query: &SqlQuery) -> Result<QueryResponse, BackendError>;

    /// Fetch a read-only resource
    fn fetch_resource(&self, resource: &Resource) -> Result<serde_json::Value, BackendError>;
}

/// Renders queries and forwards them to a [`QueryBackend`]
pub struct DataSource<B> {
    backend: B,
}

impl<B: QueryBackend> DataSource<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render `query` against `scope` and execute it.
    ///
    /// A query that renders to the empty string is not sent. Backend failures are
    /// returned as is.
    pub fn query(&self, query: &SqlQuery, scope: &Scope) -> Result<QueryResponse, BackendError> {
        debug!(ref_id = %query.ref_id, "DataSource::query: called");
        let rendered = apply_template_variables(query, scope);
        if rendered.query_text.is_empty() {
            info!(ref_id = %rendered.ref_id, "Skipping empty query");
            return Ok(QueryResponse::empty(rendered.ref_id));
        }
        self.backend.execute(&rendered)
    }

    /// Run a variable options query and return its distinct values
    pub fn metric_find_query(&self, query_text: &str, scope: &Scope) -> Result<Vec<MetricFindValue>, BackendError> {
        debug!("DataSource::metric_find_query: called");
        let response = self.query(&SqlQuery::metric_find(query_text), scope)?;
        Ok(response.to_metric_find_values())
    }

    pub fn sql_info(&self) -> Result<serde_json::Value, BackendError> {
        self.backend.fetch_resource(&Resource::SqlInfo)
    }

    pub fn tables(&self) -> Result<serde_json::Value, BackendError> {
        self.backend.fetch_resource(&Resource::Tables)
    }

    pub fn columns(&self, table: &str) -> Result<serde_json::Value, BackendError> {
        self.backend.fetch_resource(&Resource::Columns {
            table: table.to_string(),
        })
    }

    pub fn macros(&self) -> Result<serde_json::Value, BackendError> {
        self.backend.fetch_resource(&Resource::Macros)
    }
}
