// Copyright (c) 2025 the snowflake-client authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Materialized statement results.

use crate::error::{Error, Result};
use crate::types::api::{RowType, StatementResponse};

/// Metadata for one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescription {
    pub name: String,
    /// Snowflake logical type ("fixed", "text", "timestamp_ntz", ...).
    pub column_type: String,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    pub length: Option<i64>,
    pub nullable: bool,
}

impl From<&RowType> for ColumnDescription {
    fn from(row_type: &RowType) -> Self {
        Self {
            name: row_type.name.clone(),
            column_type: row_type.column_type.clone(),
            precision: row_type.precision,
            scale: row_type.scale,
            length: row_type.length,
            nullable: row_type.nullable,
        }
    }
}

/// A fully materialized result set.
///
/// Cells hold the JSON wire values as delivered; `None` is SQL NULL.
/// `statement` is the SQL text that produced the result, verbatim.
#[derive(Debug, Clone)]
pub struct ResultSet {
    /// The original SQL text.
    pub statement: String,
    /// Rows, one `Vec` of cells per row.
    pub results: Vec<Vec<Option<String>>>,
    /// Per-column metadata.
    pub description: Vec<ColumnDescription>,
    statement_handle: String,
    total_rows: i64,
}

impl ResultSet {
    /// Build a result set from a completed response. Only partition 0 is
    /// included; the connector appends further partitions as needed.
    pub(crate) fn from_response(statement: &str, response: &StatementResponse) -> Result<Self> {
        let meta = response.result_set_meta_data.as_ref().ok_or_else(|| {
            Error::ResultShape("completed response carried no result set metadata".to_string())
        })?;

        Ok(Self {
            statement: statement.to_string(),
            results: response.data.clone().unwrap_or_default(),
            description: meta.row_type.iter().map(ColumnDescription::from).collect(),
            statement_handle: response.statement_handle.clone().unwrap_or_default(),
            total_rows: meta.num_rows,
        })
    }

    /// Append rows from a further partition.
    pub(crate) fn extend_rows(&mut self, rows: Vec<Vec<Option<String>>>) {
        self.results.extend(rows);
    }

    /// Drop rows beyond the caller's requested cap.
    pub(crate) fn truncate_rows(&mut self, cap: usize) {
        self.results.truncate(cap);
    }

    /// Number of materialized rows.
    pub fn num_rows(&self) -> usize {
        self.results.len()
    }

    /// Number of result columns.
    pub fn num_columns(&self) -> usize {
        self.description.len()
    }

    /// Total row count reported by the service, across all partitions and
    /// regardless of any materialization cap.
    pub fn total_rows(&self) -> i64 {
        self.total_rows
    }

    /// Handle of the statement that produced this result.
    pub fn statement_handle(&self) -> &str {
        &self.statement_handle
    }

    /// Checked cell access. `Ok(None)` is a SQL NULL; an out-of-range
    /// index — including any access into an empty result set — is an
    /// [`Error::ResultShape`].
    pub fn scalar(&self, row: usize, col: usize) -> Result<Option<&str>> {
        let cells = self.results.get(row).ok_or_else(|| {
            Error::ResultShape(format!(
                "row {} out of range for result with {} row(s)",
                row,
                self.results.len()
            ))
        })?;
        let cell = cells.get(col).ok_or_else(|| {
            Error::ResultShape(format!(
                "column {} out of range for row with {} column(s)",
                col,
                cells.len()
            ))
        })?;
        Ok(cell.as_deref())
    }
}
