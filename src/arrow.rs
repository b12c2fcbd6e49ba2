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

//! Result set → Arrow record batch conversion.
//!
//! Backs [`SnowflakeConnector::query_arrow`], the tabular counterpart of
//! the row-oriented [`ResultSet`]. Wire values are parsed according to the
//! column's Snowflake logical type; anything without a faithful Arrow
//! representation (TIME, TIMESTAMP_TZ with its offset, VARIANT and
//! friends, BINARY hex) is carried through as the wire string.
//!
//! [`SnowflakeConnector::query_arrow`]: crate::SnowflakeConnector::query_arrow

use crate::error::{Error, Result};
use crate::result::{ColumnDescription, ResultSet};
use arrow_array::builder::{
    BooleanBuilder, Date32Builder, Float64Builder, Int64Builder, StringBuilder,
    TimestampNanosecondBuilder,
};
use arrow_array::{ArrayRef, RecordBatch};
use arrow_schema::{DataType, Field, Schema, TimeUnit};
use std::sync::Arc;

/// Map a Snowflake logical type to the Arrow type this module builds.
pub fn snowflake_type_to_arrow(column: &ColumnDescription) -> DataType {
    match column.column_type.to_uppercase().as_str() {
        // FIXED covers all exact numerics; scale decides integer vs not.
        "FIXED" => {
            if column.scale.unwrap_or(0) == 0 {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        "REAL" | "FLOAT" | "DOUBLE" => DataType::Float64,
        "BOOLEAN" => DataType::Boolean,
        "DATE" => DataType::Date32,
        "TIMESTAMP_NTZ" => DataType::Timestamp(TimeUnit::Nanosecond, None),
        "TIMESTAMP_LTZ" => DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
        // TIMESTAMP_TZ wire values carry a per-value offset; kept as text.
        "TIMESTAMP_TZ" => DataType::Utf8,
        // Semi-structured and everything else arrives as text.
        _ => DataType::Utf8,
    }
}

/// Build a [`RecordBatch`] from a materialized result set.
///
/// Parse failures are [`Error::ResultShape`] naming the column and row —
/// a wire value that does not match its declared type is a bug worth
/// surfacing, not a cell to silently null out.
pub fn to_record_batch(result: &ResultSet) -> Result<RecordBatch> {
    let fields: Vec<Field> = result
        .description
        .iter()
        .map(|c| Field::new(&c.name, snowflake_type_to_arrow(c), c.nullable))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    if result.description.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let columns: Vec<ArrayRef> = result
        .description
        .iter()
        .enumerate()
        .map(|(idx, column)| build_column(column, idx, result))
        .collect::<Result<_>>()?;

    RecordBatch::try_new(schema, columns).map_err(Error::from)
}

fn build_column(column: &ColumnDescription, idx: usize, result: &ResultSet) -> Result<ArrayRef> {
    let cells = result
        .results
        .iter()
        .map(|row| row.get(idx).and_then(|cell| cell.as_deref()));
    let rows = result.num_rows();

    let array: ArrayRef = match snowflake_type_to_arrow(column) {
        DataType::Int64 => {
            let mut builder = Int64Builder::with_capacity(rows);
            for (row_no, cell) in cells.enumerate() {
                match cell {
                    None => builder.append_null(),
                    Some(value) => builder.append_value(
                        value
                            .parse::<i64>()
                            .map_err(|_| cell_error(column, row_no, value, "integer"))?,
                    ),
                }
            }
            Arc::new(builder.finish())
        }
        DataType::Float64 => {
            let mut builder = Float64Builder::with_capacity(rows);
            for (row_no, cell) in cells.enumerate() {
                match cell {
                    None => builder.append_null(),
                    Some(value) => builder.append_value(
                        value
                            .parse::<f64>()
                            .map_err(|_| cell_error(column, row_no, value, "float"))?,
                    ),
                }
            }
            Arc::new(builder.finish())
        }
        DataType::Boolean => {
            let mut builder = BooleanBuilder::with_capacity(rows);
            for (row_no, cell) in cells.enumerate() {
                match cell {
                    None => builder.append_null(),
                    Some(value) => builder.append_value(
                        parse_bool(value)
                            .ok_or_else(|| cell_error(column, row_no, value, "boolean"))?,
                    ),
                }
            }
            Arc::new(builder.finish())
        }
        DataType::Date32 => {
            // DATE arrives as days since the unix epoch.
            let mut builder = Date32Builder::with_capacity(rows);
            for (row_no, cell) in cells.enumerate() {
                match cell {
                    None => builder.append_null(),
                    Some(value) => builder.append_value(
                        value
                            .parse::<i32>()
                            .map_err(|_| cell_error(column, row_no, value, "epoch days"))?,
                    ),
                }
            }
            Arc::new(builder.finish())
        }
        DataType::Timestamp(TimeUnit::Nanosecond, tz) => {
            // Timestamps arrive as "seconds.fraction" since the epoch.
            let mut builder = TimestampNanosecondBuilder::with_capacity(rows);
            for (row_no, cell) in cells.enumerate() {
                match cell {
                    None => builder.append_null(),
                    Some(value) => builder.append_value(
                        parse_epoch_nanos(value)
                            .ok_or_else(|| cell_error(column, row_no, value, "epoch seconds"))?,
                    ),
                }
            }
            match tz {
                Some(tz) => Arc::new(builder.finish().with_timezone(tz)),
                None => Arc::new(builder.finish()),
            }
        }
        _ => {
            let mut builder = StringBuilder::new();
            for cell in cells {
                builder.append_option(cell);
            }
            Arc::new(builder.finish())
        }
    };

    Ok(array)
}

fn cell_error(column: &ColumnDescription, row: usize, value: &str, expected: &str) -> Error {
    Error::ResultShape(format!(
        "column {} row {}: {:?} is not a valid {} ({} value)",
        column.name, row, value, expected, column.column_type
    ))
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}

/// Parse `"seconds[.fraction]"` since the epoch into nanoseconds.
fn parse_epoch_nanos(value: &str) -> Option<i64> {
    let (secs, frac) = match value.split_once('.') {
        Some((secs, frac)) => (secs, frac),
        None => (value, ""),
    };
    let secs: i64 = secs.parse().ok()?;

    let mut nanos: i64 = 0;
    if !frac.is_empty() {
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = &frac[..frac.len().min(9)];
        nanos = digits.parse::<i64>().ok()? * 10i64.pow(9 - digits.len() as u32);
    }

    let base = secs.checked_mul(1_000_000_000)?;
    if secs < 0 {
        base.checked_sub(nanos)
    } else {
        base.checked_add(nanos)
    }
}
